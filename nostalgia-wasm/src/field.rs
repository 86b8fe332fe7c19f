use nostalgia_core::content::{meme_sources, timeline_2011};
use nostalgia_core::{FastRandom, RecordingStage, Spawner, Viewport, Visual};
use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::*;

use crate::{parse_config, to_js};

/// Floating layer for hosts that render the stage events themselves.
///
/// The host calls `tick` from its animation frame callback and applies the returned
/// `mount` / `update` / `unmount` operations to its DOM.
#[wasm_bindgen]
pub struct FloatingField {
    spawner: Spawner<FastRandom>,
    stage: RecordingStage,
}

#[wasm_bindgen]
impl FloatingField {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, config: Option<JsValue>) -> Result<FloatingField, JsValue> {
        #[cfg(target_arch = "wasm32")]
        console_error_panic_hook::set_once();

        let config = parse_config(config)?;
        Ok(Self {
            spawner: Spawner::new(
                config.spawner,
                timeline_2011(),
                meme_sources(),
                FastRandom::new(),
            ),
            stage: RecordingStage::new(Viewport::new(width, height)),
        })
    }

    /// New paths use the new size; elements already in flight keep theirs.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.stage.viewport = Viewport::new(width, height);
    }

    pub fn start(&mut self, now_ms: f64) {
        self.spawner.start(now_ms);
    }

    /// Advances to `now_ms` and returns the stage operations to apply.
    pub fn tick(&mut self, now_ms: f64) -> Result<JsValue, JsValue> {
        self.spawner.tick(now_ms, &mut self.stage);
        to_js(&self.stage.drain(), "stage events")
    }

    /// Cancels every timer and returns the unmounts for the elements still on screen.
    pub fn stop(&mut self) -> Result<JsValue, JsValue> {
        self.spawner.stop(&mut self.stage);
        to_js(&self.stage.drain(), "stage events")
    }

    #[wasm_bindgen(getter)]
    pub fn live_count(&self) -> usize {
        self.spawner.live_count()
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.spawner.is_running()
    }
}

/// CSS classes for the card of a `visual` taken from a mount operation.
#[wasm_bindgen]
pub fn visual_class(visual: JsValue) -> Result<String, JsValue> {
    let visual: Visual = from_value(visual)
        .map_err(|err| JsValue::from_str(&format!("Could not read visual: {err}")))?;
    Ok(visual.css_class())
}
