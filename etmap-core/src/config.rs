//! Compile-time map configuration.
//! World values are in game-world units, canvas values in CSS pixels.

/// World-space extent and origin used by the coordinate transform.
#[derive(Clone, Copy, Debug)]
pub struct WorldConfig {
    /// If true, use the max X/Y seen across all inputs as the world
    /// bounds. If false, use the fixed width/height below.
    pub autodetect: bool,
    pub width: f64,
    pub height: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

/// Target pixel dimensions plus a constant translation applied after
/// scaling.
#[derive(Clone, Copy, Debug)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Default world mapping: autodetect, with a 1022×1022 fixed fallback.
pub const WORLD: WorldConfig = WorldConfig {
    autodetect: true,
    width: 1022.0,
    height: 1022.0,
    origin_x: 0.0,
    origin_y: 0.0,
};

/// Default canvas: 488×488, nudged to line pins up with the map image.
pub const CANVAS: CanvasConfig = CanvasConfig {
    width: 488.0,
    height: 488.0,
    offset_x: -10.0,
    offset_y: -5.0,
};
