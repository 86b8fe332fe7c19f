//! Yew floating layer for the nostalgia site.

#[cfg(target_arch = "wasm32")]
mod stage;
#[cfg(target_arch = "wasm32")]
mod styles;
#[cfg(target_arch = "wasm32")]
mod trail;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::stage::DomStage;
    use crate::styles;
    use crate::trail;
    use gloo::render::{request_animation_frame, AnimationFrame};
    use nostalgia_core::content::{meme_sources, timeline_2011};
    use nostalgia_core::{FastRandom, Spawner, SpawnerConfig};
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::prelude::*;
    use web_sys::{console, Document, Element, Window};
    use yew::prelude::*;

    /// Drives a spawner from `requestAnimationFrame` until disposed.
    struct FloatingDriver {
        spawner: RefCell<Spawner<FastRandom>>,
        stage: RefCell<DomStage>,
        frame: RefCell<Option<AnimationFrame>>,
        started: Cell<bool>,
        disposed: Cell<bool>,
    }

    impl FloatingDriver {
        fn new(config: SpawnerConfig, stage: DomStage) -> Rc<Self> {
            Rc::new(Self {
                spawner: RefCell::new(Spawner::new(
                    config,
                    timeline_2011(),
                    meme_sources(),
                    FastRandom::new(),
                )),
                stage: RefCell::new(stage),
                frame: RefCell::new(None),
                started: Cell::new(false),
                disposed: Cell::new(false),
            })
        }

        fn schedule(self: &Rc<Self>) {
            if self.disposed.get() {
                return;
            }
            let driver = Rc::clone(self);
            let handle = request_animation_frame(move |timestamp| driver.on_frame(timestamp));
            *self.frame.borrow_mut() = Some(handle);
        }

        fn on_frame(self: &Rc<Self>, timestamp: f64) {
            self.frame.borrow_mut().take();
            if self.disposed.get() {
                return;
            }

            {
                let mut spawner = self.spawner.borrow_mut();
                let mut stage = self.stage.borrow_mut();
                // The start delay counts from the first frame.
                if !self.started.replace(true) {
                    spawner.start(timestamp);
                }
                stage.refresh_viewport();
                spawner.tick(timestamp, &mut *stage);
            }

            self.schedule();
        }

        /// Stops the timer lines and clears the container. Breaks the frame cycle.
        fn dispose(&self) {
            self.disposed.set(true);
            self.frame.borrow_mut().take();
            self.spawner.borrow_mut().stop(&mut *self.stage.borrow_mut());
        }
    }

    #[derive(Properties, PartialEq)]
    pub struct FloatingLayerProps {
        #[prop_or_default]
        pub config: SpawnerConfig,
    }

    #[function_component(FloatingLayer)]
    pub fn floating_layer(props: &FloatingLayerProps) -> Html {
        let container = use_node_ref();

        {
            let container = container.clone();
            use_effect_with(props.config.clone(), move |config| {
                let driver = web_sys::window()
                    .and_then(|window| window.document())
                    .zip(container.cast::<Element>())
                    .map(|(document, target)| {
                        if let Err(err) = styles::ensure_styles(&document) {
                            console::error_1(&err);
                        }
                        let trail = trail::attach(&document);
                        let driver =
                            FloatingDriver::new(config.clone(), DomStage::new(document, target));
                        (driver, trail)
                    });

                if let Some((driver, _)) = &driver {
                    driver.schedule();
                }

                move || {
                    if let Some((driver, trail)) = driver {
                        driver.dispose();
                        drop(trail);
                    }
                }
            });
        }

        html! {
            <div id="meme-container" class="floating-layer" aria-hidden="true" ref={container} />
        }
    }

    /// Mounts the floating layer into the element matched by `selector`.
    ///
    /// `config` is an optional partial spawner config; missing fields keep their defaults.
    #[wasm_bindgen]
    pub fn mount_floating_layer(selector: &str, config: Option<JsValue>) -> Result<(), JsValue> {
        let window: Window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Cannot access document"))?;

        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("Invalid selector: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("No element matches the selector"))?;

        let config: SpawnerConfig = match config {
            Some(value) if !value.is_undefined() && !value.is_null() => from_value(value)?,
            _ => SpawnerConfig::default(),
        };

        yew::Renderer::<FloatingLayer>::with_root_and_props(target, FloatingLayerProps { config })
            .render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::{mount_floating_layer, FloatingLayer, FloatingLayerProps};

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_floating_layer(
    _: &str,
    _: Option<wasm_bindgen::JsValue>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "nostalgia-ui only supports the wasm32 target",
    ))
}
