use std::collections::BTreeMap;

use crate::models::LocationPoint;

/// The three pin categories shown in the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Monsters,
    Npcs,
    Portals,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Monsters, Category::Npcs, Category::Portals];

    /// Sidebar container id for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Monsters => "monsters",
            Category::Npcs => "npcs",
            Category::Portals => "portals",
        }
    }

    /// CSS class applied to pins of this category.
    pub fn pin_class(self) -> &'static str {
        match self {
            Category::Monsters => "monster",
            Category::Npcs => "npc",
            Category::Portals => "portal",
        }
    }
}

/// A labeled game object together with every world location it was seen
/// at. Monster entries aggregate locations across generator blocks; NPC
/// and portal entries hold exactly one location per source record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogEntry {
    pub id: String,
    pub label: String,
    pub locations: Vec<LocationPoint>,
}

/// Id-keyed entries, one mapping per category. Ordered maps keep sidebar
/// listings and tests deterministic; the order itself carries no meaning.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    monsters: BTreeMap<String, CatalogEntry>,
    npcs: BTreeMap<String, CatalogEntry>,
    portals: BTreeMap<String, CatalogEntry>,
}

impl Catalog {
    fn map(&self, category: Category) -> &BTreeMap<String, CatalogEntry> {
        match category {
            Category::Monsters => &self.monsters,
            Category::Npcs => &self.npcs,
            Category::Portals => &self.portals,
        }
    }

    pub(crate) fn map_mut(&mut self, category: Category) -> &mut BTreeMap<String, CatalogEntry> {
        match category {
            Category::Monsters => &mut self.monsters,
            Category::Npcs => &mut self.npcs,
            Category::Portals => &mut self.portals,
        }
    }

    /// Look up one entry. Unknown ids resolve to `None`, which callers
    /// treat as a silent no-op.
    pub fn get(&self, category: Category, id: &str) -> Option<&CatalogEntry> {
        self.map(category).get(id)
    }

    /// `(id, label)` pairs for the sidebar, in map order.
    pub fn entries(&self, category: Category) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.map(category)
            .values()
            .map(|e| (e.id.as_str(), e.label.as_str()))
    }

    pub fn len(&self, category: Category) -> usize {
        self.map(category).len()
    }

    pub fn is_empty(&self, category: Category) -> bool {
        self.map(category).is_empty()
    }
}
