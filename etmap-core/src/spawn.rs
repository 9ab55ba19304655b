//! Parser for the `#`-delimited spawn generator format (`ETNPCGener.txt`).
//!
//! Block splitting and per-block field scanning are two separate steps so
//! the skip-on-malformed policy stays local: a bad block drops out here and
//! never disturbs the rest of the file.

use once_cell::sync::Lazy;
use regex::Regex;

static MONSTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Monster\d+:\s*(\d+)").unwrap());
static X_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Segment0X:\s*(\d+)").unwrap());
static Y_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Segment0Y:\s*(\d+)").unwrap());

/// One well-formed generator block: the monster ids it references and its
/// spawn coordinate. The same id may recur across many blocks.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnRecord {
    pub monsters: Vec<String>,
    pub x: f64,
    pub y: f64,
}

/// Split the raw text on `#` and scan each block. The segment before the
/// first `#` is header preamble and is discarded. Blocks missing either
/// coordinate field or containing no monster lines contribute nothing.
pub fn parse_spawn_text(text: &str) -> Vec<SpawnRecord> {
    text.split('#').skip(1).filter_map(scan_block).collect()
}

fn scan_block(block: &str) -> Option<SpawnRecord> {
    let monsters: Vec<String> = MONSTER_RE
        .captures_iter(block)
        .map(|c| c[1].to_string())
        .collect();
    if monsters.is_empty() {
        return None;
    }
    let x = field(&X_RE, block)?;
    let y = field(&Y_RE, block)?;
    Some(SpawnRecord { monsters, x, y })
}

fn field(re: &Regex, block: &str) -> Option<f64> {
    re.captures(block)?[1].parse().ok()
}
