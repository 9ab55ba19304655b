use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, MouseEvent, Window};

use etmap_core::overlay::{MarkerId, PinView, RenderSurface};

use crate::state::{State, with_state};
use crate::utils::log;

/// A placed pin element together with its event closures. Dropping this
/// detaches the handlers, so repeated place/remove cycles don't leak.
struct PinNode {
    el: HtmlElement,
    _handlers: Vec<Closure<dyn FnMut(MouseEvent)>>,
}

/// DOM-backed rendering surface: pins are absolutely positioned `div.pin`
/// elements inside the `#mapCanvas` container, tooltips are `div.tooltip`
/// elements attached to `<body>` next to the hovered pin.
pub struct DomSurface {
    window: Window,
    document: Document,
    container: HtmlElement,
    pins: HashMap<MarkerId, PinNode>,
    tooltips: HashMap<MarkerId, HtmlElement>,
}

impl DomSurface {
    pub fn new(window: Window, document: Document) -> Result<Self, JsValue> {
        let container = document
            .get_element_by_id("mapCanvas")
            .ok_or_else(|| JsValue::from_str("map container #mapCanvas not found"))?
            .dyn_into::<HtmlElement>()?;
        Ok(DomSurface {
            window,
            document,
            container,
            pins: HashMap::new(),
            tooltips: HashMap::new(),
        })
    }

    fn build_pin(&self, marker: MarkerId, pin: &PinView) -> Result<PinNode, JsValue> {
        let el = self
            .document
            .create_element("div")?
            .dyn_into::<HtmlElement>()?;
        el.set_class_name(&format!("pin {}", pin.category.pin_class()));
        let ds = el.dataset();
        ds.set("name", &pin.id)?;
        ds.set("x", &pin.world.x.to_string())?;
        ds.set("y", &pin.world.y.to_string())?;
        let style = el.style();
        style.set_property("left", &format!("{}px", pin.pixel.0))?;
        style.set_property("top", &format!("{}px", pin.pixel.1))?;

        let onclick = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            e.stop_propagation();
            with_state(|s| {
                let State {
                    overlay, surface, ..
                } = s;
                overlay.click(surface, marker);
            });
        }));
        el.set_onclick(Some(onclick.as_ref().unchecked_ref()));

        let onmouseover = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |_: MouseEvent| {
            with_state(|s| {
                let State {
                    overlay, surface, ..
                } = s;
                overlay.hover_enter(surface, marker);
            });
        }));
        el.set_onmouseover(Some(onmouseover.as_ref().unchecked_ref()));

        let onmouseout = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |_: MouseEvent| {
            with_state(|s| {
                let State {
                    overlay, surface, ..
                } = s;
                overlay.hover_leave(surface, marker);
            });
        }));
        el.set_onmouseout(Some(onmouseout.as_ref().unchecked_ref()));

        Ok(PinNode {
            el,
            _handlers: vec![onclick, onmouseover, onmouseout],
        })
    }

    fn build_tooltip(&self, marker: MarkerId, text: &str) -> Result<HtmlElement, JsValue> {
        let pin = self
            .pins
            .get(&marker)
            .ok_or_else(|| JsValue::from_str("tooltip for unknown pin"))?;
        let tip = self
            .document
            .create_element("div")?
            .dyn_into::<HtmlElement>()?;
        tip.set_class_name("tooltip");
        tip.set_text_content(Some(text));

        // Position above the pin, in page coordinates.
        let rect = pin.el.get_bounding_client_rect();
        let scroll_x = self.window.page_x_offset().unwrap_or(0.0);
        let scroll_y = self.window.page_y_offset().unwrap_or(0.0);
        let style = tip.style();
        style.set_property("left", &format!("{}px", rect.left() + scroll_x))?;
        style.set_property("top", &format!("{}px", rect.top() - 26.0 + scroll_y))?;

        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?;
        body.append_child(&tip)?;
        Ok(tip)
    }
}

impl RenderSurface for DomSurface {
    fn place_marker(&mut self, marker: MarkerId, pin: &PinView) {
        match self.build_pin(marker, pin) {
            Ok(node) => {
                if self.container.append_child(&node.el).is_ok() {
                    self.pins.insert(marker, node);
                }
            }
            Err(err) => log(&format!("failed to place pin: {err:?}")),
        }
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        if let Some(node) = self.pins.remove(&marker) {
            node.el.remove();
        }
    }

    fn show_tooltip(&mut self, marker: MarkerId, text: &str) {
        match self.build_tooltip(marker, text) {
            Ok(tip) => {
                self.tooltips.insert(marker, tip);
            }
            Err(err) => log(&format!("failed to show tooltip: {err:?}")),
        }
    }

    fn hide_tooltip(&mut self, marker: MarkerId) {
        if let Some(tip) = self.tooltips.remove(&marker) {
            tip.remove();
        }
    }
}
