use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, Window};

use etmap_core::overlay::OverlayManager;
use etmap_core::session::MapSession;

use crate::surface::DomSurface;

/// Global application state stored behind an `Rc<RefCell<_>>` so it can be
/// shared across the WASM callbacks.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub session: MapSession,
    pub overlay: OverlayManager,
    pub surface: DomSurface,
}

/// Thread local storage for the single runtime state instance.
thread_local! {
    pub static STATE: RefCell<Option<Rc<RefCell<State>>>> = const { RefCell::new(None) };
}

/// Run a closure against the global state if it has been initialised.
pub fn with_state(f: impl FnOnce(&mut State)) {
    let rc = STATE.with(|st| st.borrow().clone());
    if let Some(rc) = rc {
        f(&mut rc.borrow_mut());
    }
}
