//! Ingestion context: configuration, autodetect bounds, name table and
//! location catalog, built once per page load.

use std::collections::HashMap;

use crate::bounds::SpawnBounds;
use crate::catalog::{Catalog, CatalogEntry, Category};
use crate::config::{CANVAS, CanvasConfig, WORLD, WorldConfig};
use crate::models::{LocationPoint, NameEntry, NpcFile, PlacedRecord, PortalFile};
use crate::spawn;
use crate::transform;

/// Everything the map accumulates while loading. Constructed once at load
/// time, written only by the ingest operations, and read-only afterwards;
/// the transform is not stable until every source has been ingested.
pub struct MapSession {
    pub world: WorldConfig,
    pub canvas: CanvasConfig,
    pub bounds: SpawnBounds,
    pub catalog: Catalog,
    names: HashMap<String, String>,
}

impl Default for MapSession {
    fn default() -> Self {
        MapSession::new(WORLD, CANVAS)
    }
}

impl MapSession {
    pub fn new(world: WorldConfig, canvas: CanvasConfig) -> Self {
        MapSession {
            world,
            canvas,
            bounds: SpawnBounds::default(),
            catalog: Catalog::default(),
            names: HashMap::new(),
        }
    }

    /// Load the optional id→label table. Ingest this before the spawn text
    /// so monster entries pick the labels up. Returns the number of usable
    /// rows; an undecodable source contributes none.
    pub fn ingest_names(&mut self, json: &str) -> usize {
        let Ok(rows) = serde_json::from_str::<Vec<NameEntry>>(json) else {
            return 0;
        };
        let mut n = 0;
        for row in rows {
            if let (Some(id), Some(label)) = (row.id, row.label) {
                self.names.insert(id.as_key(), label);
                n += 1;
            }
        }
        n
    }

    /// Ingest the mandatory spawn generator text. Every well-formed block
    /// grows the bounds once and appends one location per monster line to
    /// that monster's entry, so an id recurring across blocks accumulates
    /// spawn points. Returns the number of locations recorded.
    pub fn ingest_spawn_text(&mut self, text: &str) -> usize {
        let mut placed = 0;
        for rec in spawn::parse_spawn_text(text) {
            self.bounds.expand(rec.x, rec.y);
            for id in &rec.monsters {
                let label = self.monster_label(id);
                let entry = self
                    .catalog
                    .map_mut(Category::Monsters)
                    .entry(id.clone())
                    .or_insert_with(|| CatalogEntry {
                        id: id.clone(),
                        label,
                        locations: Vec::new(),
                    });
                entry.locations.push(LocationPoint { x: rec.x, y: rec.y });
                placed += 1;
            }
        }
        placed
    }

    fn monster_label(&self, id: &str) -> String {
        self.names
            .get(id)
            .cloned()
            .unwrap_or_else(|| format!("Monster {id}"))
    }

    /// Ingest the optional NPC source. A top-level shape mismatch leaves
    /// the category empty.
    pub fn ingest_npcs(&mut self, json: &str) -> usize {
        let Ok(file) = serde_json::from_str::<NpcFile>(json) else {
            return 0;
        };
        self.ingest_placed(Category::Npcs, "Npc", file.npcs)
    }

    /// Ingest the optional portal source. Same shape and tolerance as the
    /// NPC path, separate category.
    pub fn ingest_portals(&mut self, json: &str) -> usize {
        let Ok(file) = serde_json::from_str::<PortalFile>(json) else {
            return 0;
        };
        self.ingest_placed(Category::Portals, "Portal", file.portals)
    }

    /// NPC and portal records share a shape: exactly one location per id,
    /// already labeled upstream (with a synthesized fallback when the
    /// label is missing). Re-ingesting replaces the category wholesale.
    fn ingest_placed(
        &mut self,
        category: Category,
        kind: &str,
        records: Vec<PlacedRecord>,
    ) -> usize {
        self.catalog.map_mut(category).clear();
        let mut n = 0;
        for rec in records {
            let Some(id) = rec.id else { continue };
            let (Some(x), Some(y)) = (rec.x, rec.y) else {
                continue;
            };
            let id = id.as_key();
            let label = rec.label.unwrap_or_else(|| format!("{kind} {id}"));
            self.bounds.expand(x, y);
            self.catalog.map_mut(category).insert(
                id.clone(),
                CatalogEntry {
                    id,
                    label,
                    locations: vec![LocationPoint { x, y }],
                },
            );
            n += 1;
        }
        n
    }

    /// Affine world→canvas mapping against the session's current bounds.
    pub fn world_to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        transform::world_to_pixel(&self.world, &self.canvas, &self.bounds, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_text_builds_monster_entries() {
        let mut s = MapSession::default();
        let n = s.ingest_spawn_text("#Monster1: 7\nSegment0X: 100\nSegment0Y: 200\n");
        assert_eq!(n, 1);
        let entry = s.catalog.get(Category::Monsters, "7").unwrap();
        assert_eq!(entry.label, "Monster 7");
        assert_eq!(entry.locations, vec![LocationPoint { x: 100.0, y: 200.0 }]);
        assert_eq!((s.bounds.max_x, s.bounds.max_y), (100.0, 200.0));
    }

    #[test]
    fn recurring_monster_id_accumulates_locations() {
        let mut s = MapSession::default();
        let text = "#Monster1: 7\nSegment0X: 10\nSegment0Y: 10\n#Monster4: 7\nSegment0X: 30\nSegment0Y: 40\n";
        assert_eq!(s.ingest_spawn_text(text), 2);
        let entry = s.catalog.get(Category::Monsters, "7").unwrap();
        assert_eq!(entry.locations.len(), 2);
    }

    #[test]
    fn name_table_labels_monsters_with_fallback() {
        let mut s = MapSession::default();
        assert_eq!(s.ingest_names(r#"[{"id": 7, "label": "Tomb Guard"}]"#), 1);
        s.ingest_spawn_text(
            "#Monster1: 7\nSegment0X: 1\nSegment0Y: 1\n#Monster1: 8\nSegment0X: 2\nSegment0Y: 2\n",
        );
        assert_eq!(s.catalog.get(Category::Monsters, "7").unwrap().label, "Tomb Guard");
        assert_eq!(s.catalog.get(Category::Monsters, "8").unwrap().label, "Monster 8");
    }

    #[test]
    fn npc_records_land_in_their_own_category() {
        let mut s = MapSession::default();
        let n = s.ingest_npcs(r#"{"npcs": [{"id": 3, "x": 40, "y": 60, "label": "Healer"}]}"#);
        assert_eq!(n, 1);
        let entry = s.catalog.get(Category::Npcs, "3").unwrap();
        assert_eq!(entry.label, "Healer");
        assert_eq!(entry.locations, vec![LocationPoint { x: 40.0, y: 60.0 }]);
    }

    #[test]
    fn npc_source_without_npcs_array_leaves_category_empty() {
        let mut s = MapSession::default();
        s.ingest_spawn_text("#Monster1: 7\nSegment0X: 5\nSegment0Y: 5\n");
        assert_eq!(s.ingest_npcs(r#"{"rooms": []}"#), 0);
        assert!(s.catalog.is_empty(Category::Npcs));
        // The other categories are unaffected.
        assert_eq!(s.catalog.len(Category::Monsters), 1);
    }

    #[test]
    fn undecodable_npc_source_leaves_category_empty() {
        let mut s = MapSession::default();
        assert_eq!(s.ingest_npcs("not json at all"), 0);
        assert!(s.catalog.is_empty(Category::Npcs));
    }

    #[test]
    fn npc_record_missing_a_coordinate_is_skipped() {
        let mut s = MapSession::default();
        let n = s.ingest_npcs(
            r#"{"npcs": [{"id": 1, "x": 10, "label": "Half"}, {"id": 2, "x": 10, "y": 20}]}"#,
        );
        assert_eq!(n, 1);
        assert!(s.catalog.get(Category::Npcs, "1").is_none());
        assert_eq!(s.catalog.get(Category::Npcs, "2").unwrap().label, "Npc 2");
    }

    #[test]
    fn bounds_are_global_across_sources() {
        let mut s = MapSession::default();
        s.ingest_spawn_text("#Monster1: 7\nSegment0X: 100\nSegment0Y: 10\n");
        s.ingest_npcs(r#"{"npcs": [{"id": 1, "x": 5, "y": 300, "label": "Guide"}]}"#);
        s.ingest_portals(r#"{"portals": [{"id": 9, "x": 250, "y": 2, "label": "Gate"}]}"#);
        assert_eq!((s.bounds.max_x, s.bounds.max_y), (250.0, 300.0));
    }

    #[test]
    fn transform_uses_session_bounds() {
        let mut s = MapSession::default();
        s.ingest_spawn_text("#Monster1: 7\nSegment0X: 100\nSegment0Y: 200\n");
        assert_eq!(s.world_to_pixel(100.0, 200.0), (478.0, 483.0));
    }
}
