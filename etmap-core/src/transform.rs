//! World → canvas pixel mapping.

use crate::bounds::SpawnBounds;
use crate::config::{CanvasConfig, WorldConfig};

/// Map a world coordinate onto the canvas.
///
/// In autodetect mode the world extent comes from the observed bounds,
/// floored at 1 so the scale is always finite; otherwise the configured
/// fixed size is used. Pure in its inputs: while autodetect bounds are
/// still growing, output for the same world point changes with them, and
/// pins placed earlier keep their old pixel positions.
pub fn world_to_pixel(
    world: &WorldConfig,
    canvas: &CanvasConfig,
    bounds: &SpawnBounds,
    x: f64,
    y: f64,
) -> (f64, f64) {
    let world_w = if world.autodetect {
        (bounds.max_x - world.origin_x).max(1.0)
    } else {
        world.width
    };
    let world_h = if world.autodetect {
        (bounds.max_y - world.origin_y).max(1.0)
    } else {
        world.height
    };
    let px = (x - world.origin_x) / world_w * canvas.width + canvas.offset_x;
    let py = (y - world.origin_y) / world_h * canvas.height + canvas.offset_y;
    (px, py)
}
