//! Location-ingestion and overlay logic for the Emperor's Tomb world map.
//!
//! Everything here runs without a browser: the spawn generator text parser,
//! the three ingestion paths feeding one catalog, the world→canvas
//! transform and the pin/tooltip state machine. The rendering side is
//! abstracted behind [`overlay::RenderSurface`] so the whole crate is
//! testable with a mock surface; the `etmap-wasm` crate supplies the DOM
//! binding.

pub mod bounds;
pub mod catalog;
pub mod config;
pub mod models;
pub mod overlay;
pub mod session;
pub mod spawn;
pub mod transform;

pub use bounds::SpawnBounds;
pub use catalog::{Catalog, CatalogEntry, Category};
pub use config::{CanvasConfig, WorldConfig};
pub use models::LocationPoint;
pub use overlay::{MarkerId, OverlayManager, PinView, RenderSurface};
pub use session::MapSession;
