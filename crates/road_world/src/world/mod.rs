//! RoadWorld - chunk streaming around the vehicle.
//!
//! Owns every active chunk, keyed by [`ChunkIndex`]. Each slot holds the
//! road, terrain and stars content of one index plus the entity the renderer
//! registered for it. Activation and deactivation happen only through
//! [`RoadWorld::initialize_at`] and [`RoadWorld::update_center`], which report
//! what changed as a [`StreamingDelta`] for the renderer to apply.

pub mod plugin;
mod window;

use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::Deserialize;
pub use window::ChunkWindow;
use window::compute_index_changes;

use crate::collision::{Aabb, hits_barrier};
use crate::coords::{ChunkIndex, RENDER_DISTANCE};
use crate::generation::{BillboardCatalog, ChunkGenerator, RoadChunk, StarsChunk, TerrainChunk};

/// Streaming window parameters.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct StreamingConfig {
  /// Chunks kept alive on each side of the vehicle's chunk.
  pub render_distance: i32,
}

impl Default for StreamingConfig {
  fn default() -> Self {
    Self {
      render_distance: RENDER_DISTANCE,
    }
  }
}

/// Content and render registration of one active index.
#[derive(Debug)]
pub struct ChunkSlot {
  pub road: RoadChunk,
  pub terrain: TerrainChunk,
  pub stars: StarsChunk,
  /// Root entity spawned for this chunk, once registered.
  pub entity: Option<Entity>,
}

/// Changes from moving the streaming window.
#[derive(Debug, Default, PartialEq)]
pub struct StreamingDelta {
  /// Indices that left the window, with the entity to despawn if one was
  /// registered.
  pub to_despawn: Vec<(ChunkIndex, Option<Entity>)>,
  /// Indices that entered the window and now need an entity.
  pub to_spawn: Vec<ChunkIndex>,
}

impl StreamingDelta {
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn is_empty(&self) -> bool {
    self.to_despawn.is_empty() && self.to_spawn.is_empty()
  }
}

/// Running totals of chunk lifecycle transitions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreamingStats {
  pub activations: u64,
  pub deactivations: u64,
}

/// Bounded window of generated chunks along the travel axis.
pub struct RoadWorld {
  generator: ChunkGenerator,
  catalog: BillboardCatalog,
  window: ChunkWindow,
  slots: BTreeMap<ChunkIndex, ChunkSlot>,
  initialized: bool,
  stats: StreamingStats,
}

impl RoadWorld {
  /// Creates an empty world. Nothing is generated until
  /// [`RoadWorld::initialize_at`] runs.
  pub fn new(generator: ChunkGenerator, catalog: BillboardCatalog, config: StreamingConfig) -> Self {
    Self {
      generator,
      catalog,
      window: ChunkWindow::new(ChunkIndex::ORIGIN, config.render_distance),
      slots: BTreeMap::new(),
      initialized: false,
      stats: StreamingStats::default(),
    }
  }

  pub fn generator(&self) -> &ChunkGenerator {
    &self.generator
  }

  pub fn catalog(&self) -> &BillboardCatalog {
    &self.catalog
  }

  /// Current streaming window.
  pub fn window(&self) -> ChunkWindow {
    self.window
  }

  pub fn center(&self) -> ChunkIndex {
    self.window.center
  }

  pub fn chunk_size(&self) -> f32 {
    self.generator.config().chunk_size
  }

  pub fn is_initialized(&self) -> bool {
    self.initialized
  }

  pub fn stats(&self) -> StreamingStats {
    self.stats
  }

  pub fn is_active(&self, index: ChunkIndex) -> bool {
    self.slots.contains_key(&index)
  }

  /// Active indices in ascending order.
  pub fn active_indices(&self) -> impl Iterator<Item = ChunkIndex> + '_ {
    self.slots.keys().copied()
  }

  pub fn active_count(&self) -> usize {
    self.slots.len()
  }

  pub fn slot(&self, index: ChunkIndex) -> Option<&ChunkSlot> {
    self.slots.get(&index)
  }

  pub fn road_chunk(&self, index: ChunkIndex) -> Option<&RoadChunk> {
    self.slots.get(&index).map(|slot| &slot.road)
  }

  pub fn terrain_chunk(&self, index: ChunkIndex) -> Option<&TerrainChunk> {
    self.slots.get(&index).map(|slot| &slot.terrain)
  }

  pub fn stars_chunk(&self, index: ChunkIndex) -> Option<&StarsChunk> {
    self.slots.get(&index).map(|slot| &slot.stars)
  }

  /// Returns true if `extent` overlaps a barrier of the current chunk or its
  /// neighbours.
  pub fn collides(&self, extent: &Aabb) -> bool {
    hits_barrier(extent, self.window.center, |index| self.road_chunk(index))
  }

  // === Streaming logic ===

  /// Eagerly populates the full window around `center`.
  ///
  /// Used once before the first tick. Calling it again on a populated world
  /// recenters it like [`RoadWorld::update_center`].
  #[cfg_attr(feature = "tracy", tracing::instrument(skip_all))]
  pub fn initialize_at(&mut self, center: ChunkIndex) -> StreamingDelta {
    if self.initialized {
      return self.update_center(center);
    }
    self.initialized = true;
    self.window = ChunkWindow::new(center, self.window.radius);

    let mut to_spawn = Vec::with_capacity(self.window.len());
    for index in self.window.indices() {
      self.activate(index);
      to_spawn.push(index);
    }
    info!(
      "Road world initialized at {} with {} chunks",
      center,
      to_spawn.len()
    );

    StreamingDelta {
      to_despawn: Vec::new(),
      to_spawn,
    }
  }

  /// Moves the window to `new_center`.
  ///
  /// Indices that stay inside the window keep their content untouched.
  #[cfg_attr(feature = "tracy", tracing::instrument(skip_all))]
  pub fn update_center(&mut self, new_center: ChunkIndex) -> StreamingDelta {
    if !self.initialized {
      return self.initialize_at(new_center);
    }
    if new_center == self.window.center {
      return StreamingDelta::empty();
    }
    let new_window = ChunkWindow::new(new_center, self.window.radius);
    debug!("Recentering window {} -> {}", self.window.center, new_center);
    self.retarget(new_window)
  }

  /// Recomputes the window for a vehicle at `along_axis` on the travel axis.
  pub fn update_for_position(&mut self, along_axis: f32) -> StreamingDelta {
    let center = ChunkIndex::containing(along_axis, self.chunk_size());
    self.update_center(center)
  }

  /// Changes the number of chunks kept on each side of the center.
  pub fn set_render_distance(&mut self, render_distance: i32) -> StreamingDelta {
    let new_window = ChunkWindow::new(self.window.center, render_distance);
    if new_window == self.window {
      return StreamingDelta::empty();
    }
    if !self.initialized {
      self.window = new_window;
      return StreamingDelta::empty();
    }
    self.retarget(new_window)
  }

  /// Records the root entity spawned for `index`.
  ///
  /// Returns false if the index is not active, e.g. it already left the
  /// window again.
  pub fn register_chunk_entity(&mut self, index: ChunkIndex, entity: Entity) -> bool {
    match self.slots.get_mut(&index) {
      Some(slot) => {
        slot.entity = Some(entity);
        true
      }
      None => false,
    }
  }

  fn retarget(&mut self, new_window: ChunkWindow) -> StreamingDelta {
    let (leaving, entering) = compute_index_changes(&self.window, &new_window);
    self.window = new_window;

    let mut to_despawn = Vec::with_capacity(leaving.len());
    for index in leaving {
      if let Some(slot) = self.slots.remove(&index) {
        self.stats.deactivations += 1;
        debug!("Deactivated {}", index);
        to_despawn.push((index, slot.entity));
      }
    }

    let mut to_spawn = Vec::with_capacity(entering.len());
    for index in entering {
      if self.activate(index) {
        to_spawn.push(index);
      }
    }

    StreamingDelta {
      to_despawn,
      to_spawn,
    }
  }

  /// Generates content for `index` unless it is already active.
  fn activate(&mut self, index: ChunkIndex) -> bool {
    if self.slots.contains_key(&index) {
      return false;
    }
    let slot = ChunkSlot {
      road: self.generator.road(index, &self.catalog),
      terrain: self.generator.terrain(index),
      stars: self.generator.stars(index),
      entity: None,
    };
    self.slots.insert(index, slot);
    self.stats.activations += 1;
    debug!("Activated {}", index);
    true
  }
}
