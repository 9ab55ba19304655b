//! Browser adapter for the Emperor's Tomb location map.
//!
//! Everything here is DOM plumbing: fetching the published assets, filling
//! the sidebar accordions, and backing the core overlay manager with real
//! pin/tooltip elements. The load and interaction semantics live in
//! `etmap-core`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use etmap_core::catalog::Category;
use etmap_core::config::{CANVAS, WORLD};
use etmap_core::overlay::OverlayManager;
use etmap_core::session::MapSession;

mod state;
mod surface;
mod utils;

use state::{STATE, State, with_state};
use surface::DomSurface;
use utils::{asset_url, fetch_text, get_query_param, log};

/// Asset file names published next to the map page.
const NAMES_FILE: &str = "ETmonsternames.json";
const SPAWN_FILE: &str = "ETNPCGener.txt";
const NPC_FILE: &str = "ETNPCLocation.json";
const PORTAL_FILE: &str = "ETPortalLocation.json";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let surface = DomSurface::new(window.clone(), document.clone())?;

    let state = Rc::new(RefCell::new(State {
        window,
        document: document.clone(),
        session: MapSession::new(WORLD, CANVAS),
        overlay: OverlayManager::new(),
        surface,
    }));
    STATE.with(|st| st.replace(Some(state)));

    attach_ui(&document)?;

    wasm_bindgen_futures::spawn_local(async {
        if let Err(err) = load_locations().await {
            log(&format!("map load failed: {err:?}"));
            if let Some(w) = web_sys::window() {
                let _ = w.alert_with_message("Failed to load map data.");
            }
        }
    });
    Ok(())
}

/// Fetch all four sources, then ingest and fill the sidebars. The spawn
/// generator text is mandatory; the name table, NPC and portal sources
/// degrade to empty when missing.
async fn load_locations() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let dir = window
        .location()
        .search()
        .ok()
        .and_then(|s| get_query_param(&s, "map"))
        .unwrap_or_default();

    let names = fetch_text(&window, &candidates(&dir, NAMES_FILE)).await;
    let spawn = fetch_text(&window, &candidates(&dir, SPAWN_FILE))
        .await
        .ok_or_else(|| JsValue::from_str("failed to load ETNPCGener.txt"))?;
    let npcs = fetch_text(&window, &candidates(&dir, NPC_FILE)).await;
    let portals = fetch_text(&window, &candidates(&dir, PORTAL_FILE)).await;

    with_state(|s| {
        if let Some(text) = names.as_deref() {
            let rows = s.session.ingest_names(text);
            log(&format!("monster name table: {rows} rows"));
        }
        let spawns = s.session.ingest_spawn_text(&spawn);
        log(&format!("spawn generator: {spawns} locations"));
        if let Some(text) = npcs.as_deref() {
            log(&format!("npc locations: {}", s.session.ingest_npcs(text)));
        }
        if let Some(text) = portals.as_deref() {
            log(&format!(
                "portal locations: {}",
                s.session.ingest_portals(text)
            ));
        }
        for category in Category::ALL {
            populate_sidebar(s, category);
        }
    });
    Ok(())
}

/// Candidate URLs for one asset: base-prefixed first, then relative to the
/// page, optionally under the `?map=<dir>` subdirectory.
fn candidates(dir: &str, file: &str) -> Vec<String> {
    let rel = if dir.is_empty() {
        file.to_string()
    } else {
        format!("{}/{}", dir.trim_end_matches('/'), file)
    };
    vec![asset_url(&rel), rel]
}

/// Rebuild one sidebar category from the catalog. Each entry becomes a
/// clickable row that places (or re-places) that entry's pins.
fn populate_sidebar(s: &State, category: Category) {
    let Some(container) = s.document.get_element_by_id(category.as_str()) else {
        return;
    };
    container.set_inner_html("");
    if s.session.catalog.is_empty(category) {
        container.set_inner_html("<i>No data</i>");
        return;
    }
    for (id, label) in s.session.catalog.entries(category) {
        let Ok(item) = s.document.create_element("div") else {
            continue;
        };
        item.set_class_name("list-item");
        item.set_text_content(Some(label));
        let Ok(item) = item.dyn_into::<HtmlElement>() else {
            continue;
        };
        let id = id.to_string();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            with_state(|s| {
                let State {
                    session,
                    overlay,
                    surface,
                    ..
                } = s;
                overlay.place_all(session, surface, category, &id);
            });
        }));
        item.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
        let _ = container.append_child(&item);
    }
}

/// Wire the static controls: the clear-pins button and the accordion
/// section headers.
fn attach_ui(document: &Document) -> Result<(), JsValue> {
    if let Some(btn) = document.get_element_by_id("clearPins") {
        let btn: HtmlElement = btn.dyn_into()?;
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            with_state(|s| {
                let State {
                    overlay, surface, ..
                } = s;
                overlay.clear_all(surface);
            });
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    for category in Category::ALL {
        let header_id = format!("{}Header", category.as_str());
        if let Some(header) = document.get_element_by_id(&header_id) {
            let header: HtmlElement = header.dyn_into()?;
            let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
                with_state(|s| toggle_accordion(&s.document, category.as_str()));
            }));
            header.set_onclick(Some(onclick.as_ref().unchecked_ref()));
            onclick.forget();
        }
    }
    Ok(())
}

/// Accordion toggle: click to open (closing the others); click again to
/// close.
fn toggle_accordion(document: &Document, id: &str) {
    let Some(target) = document.get_element_by_id(id) else {
        return;
    };
    let was_active = target.class_list().contains("active");
    if let Ok(all) = document.query_selector_all(".accordion-content") {
        for i in 0..all.length() {
            if let Some(node) = all.item(i)
                && let Ok(el) = node.dyn_into::<web_sys::Element>()
            {
                let _ = el.class_list().remove_1("active");
            }
        }
    }
    if !was_active {
        let _ = target.class_list().add_1("active");
    }
}
