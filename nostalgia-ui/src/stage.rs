#![cfg(target_arch = "wasm32")]

use std::collections::HashMap;

use nostalgia_core::{ElementId, Frame, Stage, Viewport, Visual};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{console, Document, Element, HtmlElement, HtmlImageElement};

/// Stage drawing floating elements as absolutely positioned children of a container.
///
/// Content is written with `textContent` only, never parsed as markup.
pub struct DomStage {
    document: Document,
    container: Element,
    viewport: Viewport,
    nodes: HashMap<ElementId, HtmlElement>,
}

impl DomStage {
    pub fn new(document: Document, container: Element) -> Self {
        let mut stage = Self {
            document,
            container,
            viewport: Viewport::new(0.0, 0.0),
            nodes: HashMap::new(),
        };
        stage.refresh_viewport();
        stage
    }

    /// Re-reads the window size used for new paths.
    pub fn refresh_viewport(&mut self) {
        if let Some(window) = web_sys::window() {
            let width = window.inner_width().ok().and_then(|value| value.as_f64());
            let height = window.inner_height().ok().and_then(|value| value.as_f64());
            if let (Some(width), Some(height)) = (width, height) {
                self.viewport = Viewport::new(width, height);
            }
        }
    }

    fn build(&self, visual: &Visual) -> Result<HtmlElement, JsValue> {
        let item: HtmlElement = self.document.create_element("div")?.dyn_into()?;
        item.set_class_name("floating-item");

        let card = match visual {
            Visual::Meme { url, alt, size, .. } => {
                let img: HtmlImageElement = self.document.create_element("img")?.dyn_into()?;
                img.set_src(url);
                img.set_alt(alt);
                img.set_class_name(&visual.css_class());
                if *size > 0 {
                    img.style().set_property("max-width", &format!("{size}px"))?;
                }
                item.append_child(&img)?;
                return Ok(item);
            }
            _ => self.document.create_element("div")?,
        };
        card.set_class_name(&visual.css_class());

        match visual {
            Visual::Headline {
                date_label,
                title,
                subtext,
                ..
            } => {
                if let Some(label) = date_label {
                    self.append_span(&card, "headline-date", label)?;
                }
                self.append_span(&card, "headline-text", title)?;
                if let Some(subtext) = subtext {
                    self.append_span(&card, "headline-subtext", subtext)?;
                }
            }
            Visual::Quote {
                context, source, ..
            } => {
                if let Some(text) = visual.quote_text() {
                    self.append_span(&card, "quote-text", &text)?;
                }
                if let Some(context) = context {
                    self.append_span(&card, "quote-context", context)?;
                }
                if let Some(source) = source {
                    self.append_span(&card, "quote-source", &format!("- {source}"))?;
                }
            }
            Visual::Event { title, .. } => {
                self.append_span(&card, "event-title", title)?;
            }
            Visual::Meme { .. } => {}
        }

        item.append_child(&card)?;
        Ok(item)
    }

    fn append_span(&self, parent: &Element, class: &str, text: &str) -> Result<(), JsValue> {
        let span = self.document.create_element("span")?;
        span.set_class_name(class);
        span.set_text_content(Some(text));
        parent.append_child(&span)?;
        Ok(())
    }
}

fn apply_frame(node: &HtmlElement, frame: Frame) -> Result<(), JsValue> {
    let style = node.style();
    style.set_property("left", &format!("{}px", frame.x))?;
    style.set_property("top", &format!("{}px", frame.y))?;
    style.set_property("opacity", &frame.opacity.to_string())
}

impl Stage for DomStage {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn mount(&mut self, id: ElementId, visual: &Visual, frame: Frame) {
        let mounted = self.build(visual).and_then(|node| {
            apply_frame(&node, frame)?;
            self.container.append_child(&node)?;
            Ok(node)
        });
        match mounted {
            Ok(node) => {
                self.nodes.insert(id, node);
            }
            Err(err) => console::error_1(&err),
        }
    }

    fn update(&mut self, id: ElementId, frame: Frame) {
        if let Some(node) = self.nodes.get(&id) {
            if let Err(err) = apply_frame(node, frame) {
                console::error_1(&err);
            }
        }
    }

    fn unmount(&mut self, id: ElementId) {
        if let Some(node) = self.nodes.remove(&id) {
            node.remove();
        }
    }
}
