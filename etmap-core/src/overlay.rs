//! Pin and tooltip runtime.
//!
//! The manager owns every placed pin and drives a [`RenderSurface`], so the
//! state machine runs identically under the DOM adapter and under the mock
//! surface used in tests. Pin lifecycle per slot:
//! absent → placed → (hovered ⇄ unhovered) → absent.

use crate::catalog::Category;
use crate::models::LocationPoint;
use crate::session::MapSession;

/// Opaque handle tying a placed pin to whatever the surface created for it.
pub type MarkerId = u64;

/// What a surface needs to render one pin.
#[derive(Clone, Debug, PartialEq)]
pub struct PinView {
    pub category: Category,
    pub id: String,
    pub label: String,
    pub world: LocationPoint,
    pub pixel: (f64, f64),
}

/// Minimal rendering surface the overlay manager drives. The browser
/// adapter backs this with absolutely-positioned DOM elements; tests use a
/// recording mock.
pub trait RenderSurface {
    fn place_marker(&mut self, marker: MarkerId, pin: &PinView);
    fn remove_marker(&mut self, marker: MarkerId);
    fn show_tooltip(&mut self, marker: MarkerId, text: &str);
    fn hide_tooltip(&mut self, marker: MarkerId);
}

#[derive(Clone, Debug)]
struct Pin {
    marker: MarkerId,
    category: Category,
    id: String,
    label: String,
    world: LocationPoint,
    tooltip: bool,
}

/// Owns the placed pins and enforces the single-active-tooltip rule.
#[derive(Debug, Default)]
pub struct OverlayManager {
    pins: Vec<Pin>,
    active_tooltip: Option<MarkerId>,
    next_marker: MarkerId,
}

impl OverlayManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    pub fn active_tooltip(&self) -> Option<MarkerId> {
        self.active_tooltip
    }

    /// Place one pin per location of the selected entry, replacing any
    /// pins already tagged with the same `(category, id)`; calling this
    /// twice leaves exactly the pins of one call. Pixel positions are
    /// computed from the session's bounds at placement time and are not
    /// revisited if the bounds grow later. Unknown ids place nothing.
    pub fn place_all<S: RenderSurface>(
        &mut self,
        session: &MapSession,
        surface: &mut S,
        category: Category,
        id: &str,
    ) {
        let Some(entry) = session.catalog.get(category, id) else {
            return;
        };
        self.remove_tagged(surface, category, id);
        for loc in &entry.locations {
            let marker = self.next_marker;
            self.next_marker += 1;
            self.pins.push(Pin {
                marker,
                category,
                id: id.to_string(),
                label: entry.label.clone(),
                world: *loc,
                tooltip: false,
            });
            let view = PinView {
                category,
                id: id.to_string(),
                label: entry.label.clone(),
                world: *loc,
                pixel: session.world_to_pixel(loc.x, loc.y),
            };
            surface.place_marker(marker, &view);
        }
    }

    /// Remove every pin of every category and release the active tooltip.
    pub fn clear_all<S: RenderSurface>(&mut self, surface: &mut S) {
        for pin in std::mem::take(&mut self.pins) {
            if pin.tooltip {
                surface.hide_tooltip(pin.marker);
            }
            surface.remove_marker(pin.marker);
        }
        self.active_tooltip = None;
    }

    /// First-hover-wins: while any tooltip is active, further hovers are
    /// no-ops until it is released. Stale markers are ignored.
    pub fn hover_enter<S: RenderSurface>(&mut self, surface: &mut S, marker: MarkerId) {
        if self.active_tooltip.is_some() {
            return;
        }
        let Some(pin) = self.pins.iter_mut().find(|p| p.marker == marker) else {
            return;
        };
        pin.tooltip = true;
        self.active_tooltip = Some(marker);
        let text = format!("{} ({}, {})", pin.label, pin.world.x, pin.world.y);
        surface.show_tooltip(marker, &text);
    }

    /// Hide this pin's tooltip if it owns one and release the active
    /// reference if it pointed here.
    pub fn hover_leave<S: RenderSurface>(&mut self, surface: &mut S, marker: MarkerId) {
        let Some(pin) = self.pins.iter_mut().find(|p| p.marker == marker) else {
            return;
        };
        if !pin.tooltip {
            return;
        }
        pin.tooltip = false;
        surface.hide_tooltip(marker);
        if self.active_tooltip == Some(marker) {
            self.active_tooltip = None;
        }
    }

    /// Remove a single pin (click-to-remove); sibling pins of the same
    /// entry stay put.
    pub fn click<S: RenderSurface>(&mut self, surface: &mut S, marker: MarkerId) {
        let Some(idx) = self.pins.iter().position(|p| p.marker == marker) else {
            return;
        };
        let pin = self.pins.remove(idx);
        self.drop_pin(surface, &pin);
    }

    fn remove_tagged<S: RenderSurface>(&mut self, surface: &mut S, category: Category, id: &str) {
        let (tagged, keep): (Vec<Pin>, Vec<Pin>) = std::mem::take(&mut self.pins)
            .into_iter()
            .partition(|p| p.category == category && p.id == id);
        self.pins = keep;
        for pin in &tagged {
            self.drop_pin(surface, pin);
        }
    }

    fn drop_pin<S: RenderSurface>(&mut self, surface: &mut S, pin: &Pin) {
        if pin.tooltip {
            surface.hide_tooltip(pin.marker);
            if self.active_tooltip == Some(pin.marker) {
                self.active_tooltip = None;
            }
        }
        surface.remove_marker(pin.marker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Records what a real surface would have on screen.
    #[derive(Default)]
    struct MockSurface {
        markers: HashMap<MarkerId, PinView>,
        tooltips: HashMap<MarkerId, String>,
    }

    impl RenderSurface for MockSurface {
        fn place_marker(&mut self, marker: MarkerId, pin: &PinView) {
            self.markers.insert(marker, pin.clone());
        }
        fn remove_marker(&mut self, marker: MarkerId) {
            self.markers.remove(&marker);
        }
        fn show_tooltip(&mut self, marker: MarkerId, text: &str) {
            self.tooltips.insert(marker, text.to_string());
        }
        fn hide_tooltip(&mut self, marker: MarkerId) {
            self.tooltips.remove(&marker);
        }
    }

    fn session() -> MapSession {
        let mut s = MapSession::default();
        s.ingest_names(r#"[{"id": 7, "label": "Tomb Guard"}]"#);
        s.ingest_spawn_text(
            "#Monster1: 7\nSegment0X: 100\nSegment0Y: 200\n#Monster2: 7\nSegment0X: 50\nSegment0Y: 60\n#Monster1: 9\nSegment0X: 80\nSegment0Y: 90\n",
        );
        s.ingest_npcs(r#"{"npcs": [{"id": 3, "x": 40, "y": 40, "label": "Healer"}]}"#);
        s
    }

    #[test]
    fn place_all_places_one_pin_per_location() {
        let (mut overlay, mut surface) = (OverlayManager::new(), MockSurface::default());
        overlay.place_all(&session(), &mut surface, Category::Monsters, "7");
        assert_eq!(overlay.pin_count(), 2);
        assert_eq!(surface.markers.len(), 2);
    }

    #[test]
    fn place_all_twice_is_idempotent() {
        let (mut overlay, mut surface) = (OverlayManager::new(), MockSurface::default());
        let s = session();
        overlay.place_all(&s, &mut surface, Category::Monsters, "7");
        overlay.place_all(&s, &mut surface, Category::Monsters, "7");
        assert_eq!(overlay.pin_count(), 2);
        assert_eq!(surface.markers.len(), 2);
    }

    #[test]
    fn place_all_unknown_id_is_a_no_op() {
        let (mut overlay, mut surface) = (OverlayManager::new(), MockSurface::default());
        overlay.place_all(&session(), &mut surface, Category::Monsters, "404");
        assert_eq!(overlay.pin_count(), 0);
        assert!(surface.markers.is_empty());
    }

    #[test]
    fn replacement_does_not_disturb_other_entries() {
        let (mut overlay, mut surface) = (OverlayManager::new(), MockSurface::default());
        let s = session();
        overlay.place_all(&s, &mut surface, Category::Monsters, "9");
        overlay.place_all(&s, &mut surface, Category::Npcs, "3");
        overlay.place_all(&s, &mut surface, Category::Monsters, "9");
        assert_eq!(overlay.pin_count(), 2);
    }

    #[test]
    fn only_one_tooltip_at_a_time() {
        let (mut overlay, mut surface) = (OverlayManager::new(), MockSurface::default());
        overlay.place_all(&session(), &mut surface, Category::Monsters, "7");
        let markers: Vec<MarkerId> = surface.markers.keys().copied().collect();
        overlay.hover_enter(&mut surface, markers[0]);
        assert_eq!(overlay.active_tooltip(), Some(markers[0]));
        // Competing hover while the first is still active: no-op.
        overlay.hover_enter(&mut surface, markers[1]);
        assert_eq!(overlay.active_tooltip(), Some(markers[0]));
        assert_eq!(surface.tooltips.len(), 1);
        // Released on leave, then the second pin may claim it.
        overlay.hover_leave(&mut surface, markers[0]);
        assert_eq!(overlay.active_tooltip(), None);
        overlay.hover_enter(&mut surface, markers[1]);
        assert_eq!(overlay.active_tooltip(), Some(markers[1]));
    }

    #[test]
    fn tooltip_text_is_label_and_world_coords() {
        let (mut overlay, mut surface) = (OverlayManager::new(), MockSurface::default());
        let s = session();
        overlay.place_all(&s, &mut surface, Category::Npcs, "3");
        let marker = *surface.markers.keys().next().unwrap();
        overlay.hover_enter(&mut surface, marker);
        assert_eq!(surface.tooltips[&marker], "Healer (40, 40)");
    }

    #[test]
    fn click_removes_only_that_pin() {
        let (mut overlay, mut surface) = (OverlayManager::new(), MockSurface::default());
        overlay.place_all(&session(), &mut surface, Category::Monsters, "7");
        let marker = *surface.markers.keys().next().unwrap();
        overlay.hover_enter(&mut surface, marker);
        overlay.click(&mut surface, marker);
        assert_eq!(overlay.pin_count(), 1);
        assert!(surface.tooltips.is_empty());
        assert_eq!(overlay.active_tooltip(), None);
    }

    #[test]
    fn replacing_an_entry_releases_its_tooltip() {
        let (mut overlay, mut surface) = (OverlayManager::new(), MockSurface::default());
        let s = session();
        overlay.place_all(&s, &mut surface, Category::Monsters, "7");
        let marker = *surface.markers.keys().next().unwrap();
        overlay.hover_enter(&mut surface, marker);
        overlay.place_all(&s, &mut surface, Category::Monsters, "7");
        assert_eq!(overlay.active_tooltip(), None);
        assert!(surface.tooltips.is_empty());
        assert_eq!(overlay.pin_count(), 2);
    }

    #[test]
    fn clear_all_leaves_nothing() {
        let (mut overlay, mut surface) = (OverlayManager::new(), MockSurface::default());
        let s = session();
        overlay.place_all(&s, &mut surface, Category::Monsters, "7");
        overlay.place_all(&s, &mut surface, Category::Npcs, "3");
        let marker = *surface.markers.keys().next().unwrap();
        overlay.hover_enter(&mut surface, marker);
        overlay.clear_all(&mut surface);
        assert_eq!(overlay.pin_count(), 0);
        assert_eq!(overlay.active_tooltip(), None);
        assert!(surface.markers.is_empty());
        assert!(surface.tooltips.is_empty());
    }

    #[test]
    fn hover_on_stale_marker_is_ignored() {
        let (mut overlay, mut surface) = (OverlayManager::new(), MockSurface::default());
        overlay.place_all(&session(), &mut surface, Category::Monsters, "9");
        let marker = *surface.markers.keys().next().unwrap();
        overlay.click(&mut surface, marker);
        overlay.hover_enter(&mut surface, marker);
        overlay.hover_leave(&mut surface, marker);
        assert_eq!(overlay.active_tooltip(), None);
    }

    #[test]
    fn pins_keep_stale_pixels_when_bounds_grow_later() {
        let (mut overlay, mut surface) = (OverlayManager::new(), MockSurface::default());
        let mut s = MapSession::default();
        s.ingest_spawn_text("#Monster1: 7\nSegment0X: 100\nSegment0Y: 200\n");
        overlay.place_all(&s, &mut surface, Category::Monsters, "7");
        let before = surface.markers.values().next().unwrap().pixel;
        // A late source doubles the extent; placed pins are not revisited.
        s.ingest_npcs(r#"{"npcs": [{"id": 1, "x": 200, "y": 400, "label": "Late"}]}"#);
        let after = surface.markers.values().next().unwrap().pixel;
        assert_eq!(before, after);
        assert_ne!(s.world_to_pixel(100.0, 200.0), before);
    }
}
