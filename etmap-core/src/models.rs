use serde::{Deserialize, Serialize};

/// A position in raw world units as stored in the source data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationPoint {
    pub x: f64,
    pub y: f64,
}

impl From<(f64, f64)> for LocationPoint {
    fn from(v: (f64, f64)) -> Self {
        LocationPoint { x: v.0, y: v.1 }
    }
}

/// Ids appear in the source files both as JSON numbers and as strings;
/// either form normalizes to the same string key.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Number(i64),
    Text(String),
}

impl IdValue {
    pub fn as_key(&self) -> String {
        match self {
            IdValue::Number(n) => n.to_string(),
            IdValue::Text(s) => s.trim().to_string(),
        }
    }
}

/// One row of the optional monster name table (`ETmonsternames.json`).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NameEntry {
    pub id: Option<IdValue>,
    pub label: Option<String>,
}

/// One NPC or portal record. Every field is optional; ingestion skips
/// records missing the id or either coordinate.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlacedRecord {
    pub id: Option<IdValue>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub label: Option<String>,
}

/// Top-level shape of `ETNPCLocation.json`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NpcFile {
    #[serde(default)]
    pub npcs: Vec<PlacedRecord>,
}

/// Top-level shape of `ETPortalLocation.json`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PortalFile {
    #[serde(default)]
    pub portals: Vec<PlacedRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_value_accepts_numbers_and_strings() {
        let rows: Vec<NameEntry> =
            serde_json::from_str(r#"[{"id": 7, "label": "Imp"}, {"id": "8", "label": "Bat"}]"#)
                .unwrap();
        assert_eq!(rows[0].id.as_ref().unwrap().as_key(), "7");
        assert_eq!(rows[1].id.as_ref().unwrap().as_key(), "8");
    }

    #[test]
    fn npc_file_without_npcs_array_is_empty() {
        let file: NpcFile = serde_json::from_str(r#"{"something": "else"}"#).unwrap();
        assert!(file.npcs.is_empty());
    }
}
