#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-nostalgia-ui]";

/// Floating layer CSS; mood modifiers recolor the card accent.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --floating-headline-bg: rgba(0, 0, 0, 0.8);
  --floating-quote-bg: rgba(155, 89, 182, 0.8);
  --floating-event-bg: rgba(52, 152, 219, 0.8);
  --floating-accent: #f39c12;
  --floating-text: #fff;
}

.floating-layer {
  position: fixed;
  inset: 0;
  overflow: hidden;
  pointer-events: none;
  z-index: 5;
}

.floating-item {
  position: absolute;
  z-index: 5;
  pointer-events: none;
  max-width: 300px;
  will-change: left, top, opacity;
}

.floating-headline {
  background: var(--floating-headline-bg);
  padding: 12px 18px;
  border-radius: 8px;
  border-left: 4px solid var(--floating-accent);
  font-family: 'Press Start 2P', cursive;
}

.floating-headline.hope { border-left-color: #2ecc71; }
.floating-headline.tech { border-left-color: #3498db; }
.floating-headline.energy { border-left-color: #f39c12; }
.floating-headline.momentum { border-left-color: #e67e22; }
.floating-headline.confrontation { border-left-color: #e74c3c; }
.floating-headline.persistence { border-left-color: #9b59b6; }
.floating-headline.world { border-left-color: #95a5a6; }
.floating-headline.personal { border-left-color: #1abc9c; }

.headline-date {
  display: block;
  font-size: 0.6rem;
  color: #bdc3c7;
  margin-bottom: 5px;
}

.headline-text {
  display: block;
  font-size: 0.7rem;
  color: var(--floating-text);
  line-height: 1.4;
}

.headline-subtext {
  display: block;
  font-size: 0.55rem;
  color: #95a5a6;
  margin-top: 5px;
}

.floating-quote {
  background: var(--floating-quote-bg);
  padding: 15px;
  border-radius: 10px;
  font-style: italic;
}

.quote-text {
  display: block;
  font-size: 0.9rem;
  color: var(--floating-text);
}

.quote-context {
  display: block;
  font-size: 0.7rem;
  color: #ecdcf5;
  margin-top: 6px;
}

.quote-source {
  display: block;
  font-size: 0.7rem;
  color: #d5b8e8;
  margin-top: 8px;
  text-align: right;
}

.floating-event {
  background: var(--floating-event-bg);
  padding: 10px 15px;
  border-radius: 20px;
}

.floating-event.confrontation { background: rgba(231, 76, 60, 0.8); }
.floating-event.hope { background: rgba(46, 204, 113, 0.8); }

.event-title {
  font-size: 0.8rem;
  color: var(--floating-text);
}

.floating-meme-img {
  max-width: 150px;
  max-height: 150px;
  border-radius: 10px;
  box-shadow: 0 5px 15px rgba(0, 0, 0, 0.3);
}

.nyan-trail {
  position: fixed;
  height: 6px;
  pointer-events: none;
  z-index: 9999;
  border-radius: 3px;
  background: linear-gradient(to bottom, #ff0000, #ff9900, #ffff00, #33ff00, #0099ff, #6633ff);
  animation: nyan-trail-fade 2s linear forwards;
}

@keyframes nyan-trail-fade {
  from { opacity: 0.8; }
  to { opacity: 0; transform: translateX(-20px); }
}
"#;

/// Injects [`DEFAULT_STYLES`] into `<head>` once per document.
pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document has no <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-nostalgia-ui", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.dyn_into::<Node>()?)?;

    Ok(())
}
