//! Road World - endless procedural road streaming for Bevy.
//!
//! A vehicle drives along +Z on a road cut into fixed-length chunks. Chunks
//! around the vehicle are generated deterministically from the world seed
//! and their index, kept in a bounded window, and dropped as the vehicle
//! moves on. The crate provides:
//! - an arcade vehicle model stepped on a fixed tick
//! - barrier collision with rollback
//! - chunk content generation (road, terrain, billboards, stars)
//! - a streaming window and a Bevy plugin that mirrors it as entities
//! - a day/night clock

pub mod collision;
pub mod coords;
pub mod day_night;
pub mod generation;
pub mod input;
pub mod render;
pub mod session;
pub mod text;
#[cfg(feature = "tracy")]
mod tracy_init;
pub mod vehicle;
pub mod world;

pub use collision::{Aabb, hits_barrier, vehicle_extent};
pub use coords::{CHUNK_SIZE, ChunkIndex, RENDER_DISTANCE, ROAD_WIDTH};
pub use day_night::{DayNightClock, DayNightConfig, DayPhase};
pub use generation::{
  Billboard, BillboardCatalog, BillboardConfig, BillboardEntry, BillboardPolicy, CatalogError,
  ChunkGenerator, GenerationConfig, InvalidGenerationConfig, RoadChunk, StarsChunk, TerrainChunk,
};
pub use input::{Control, ControlEvent, InputState};
pub use render::{Canvas, ChunkAssets, ChunkStars, Rgba};
pub use session::{DrivingSession, TickReport};
pub use text::{CpuFont, FontError, TextStyle, draw_text};
#[cfg(feature = "tracy")]
pub use tracy_init::tracy_layer;
pub use vehicle::{EngineVolume, VehicleSignals, VehicleState, VehicleTuning};
pub use world::plugin::{
  ChunkRoot, DayPhaseChanged, PendingStreaming, RoadWorldPlugin, RoadWorldSet, RoadWorldSettings,
  TickTelemetry,
};
pub use world::{ChunkSlot, ChunkWindow, RoadWorld, StreamingConfig, StreamingDelta, StreamingStats};
