#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use nostalgia_core::trail::TRAIL_LIFETIME_MS;
use nostalgia_core::{FastRandom, MouseTrail, TrailMark};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{console, Document, Event, HtmlElement, MouseEvent};

/// Listens for pointer moves on `document` and drops short-lived rainbow marks.
///
/// The trail stops when the returned listener is dropped.
pub(crate) fn attach(document: &Document) -> EventListener {
    let trail = Rc::new(RefCell::new((MouseTrail::new(), FastRandom::new())));
    let target = document.clone();
    EventListener::new(document, "mousemove", move |event: &Event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let mark = {
            let (trail, rng) = &mut *trail.borrow_mut();
            trail.on_move(
                event.time_stamp(),
                f64::from(event.client_x()),
                f64::from(event.client_y()),
                rng,
            )
        };
        if let Some(mark) = mark {
            if let Err(err) = draw(&target, mark) {
                console::error_1(&err);
            }
        }
    })
}

fn draw(document: &Document, mark: TrailMark) -> Result<(), JsValue> {
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("Document has no <body>"))?;
    let node: HtmlElement = document.create_element("div")?.dyn_into()?;
    node.set_class_name("nyan-trail");
    let style = node.style();
    style.set_property("left", &format!("{}px", mark.x))?;
    style.set_property("top", &format!("{}px", mark.y))?;
    style.set_property("width", &format!("{}px", mark.width))?;
    body.append_child(&node)?;

    Timeout::new(TRAIL_LIFETIME_MS, move || node.remove()).forget();
    Ok(())
}
