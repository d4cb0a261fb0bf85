//! Per-tick driving session.
//!
//! [`DrivingSession`] owns the vehicle, the input latch, the tuning and the
//! streaming world, and runs the fixed tick order: integrate, collide, commit
//! or roll back, then recenter the streaming window on the committed pose.

use bevy::prelude::*;

use crate::collision::vehicle_extent;
use crate::input::{ControlEvent, InputState};
use crate::vehicle::{VehicleSignals, VehicleState, VehicleTuning, advance, rollback};
use crate::world::{RoadWorld, StreamingDelta};

/// Everything one tick produced.
#[derive(Debug, Default)]
pub struct TickReport {
  /// Tick counter after this tick.
  pub tick: u64,
  /// True when the tentative pose hit a barrier and was reverted.
  pub collided: bool,
  pub signals: VehicleSignals,
  pub delta: StreamingDelta,
}

/// Owned state of one driving session.
#[derive(Resource)]
pub struct DrivingSession {
  pub vehicle: VehicleState,
  pub input: InputState,
  pub tuning: VehicleTuning,
  world: RoadWorld,
  signals: VehicleSignals,
  tick: u64,
}

impl DrivingSession {
  /// Creates a session with `vehicle` as the starting state.
  ///
  /// The world is populated around the vehicle immediately; the returned
  /// delta lists every chunk that needs an entity.
  pub fn new(
    vehicle: VehicleState,
    tuning: VehicleTuning,
    mut world: RoadWorld,
  ) -> (Self, StreamingDelta) {
    let delta = world.update_for_position(vehicle.position.z);
    let session = Self {
      vehicle,
      input: InputState::default(),
      tuning,
      world,
      signals: VehicleSignals::default(),
      tick: 0,
    };
    (session, delta)
  }

  pub fn world(&self) -> &RoadWorld {
    &self.world
  }

  pub fn world_mut(&mut self) -> &mut RoadWorld {
    &mut self.world
  }

  /// Signals derived on the last tick.
  pub fn signals(&self) -> VehicleSignals {
    self.signals
  }

  pub fn tick_count(&self) -> u64 {
    self.tick
  }

  /// Latches a control press or release for the next tick.
  pub fn apply(&mut self, event: ControlEvent) {
    self.input.apply(event);
  }

  /// Runs one tick.
  #[cfg_attr(feature = "tracy", tracing::instrument(skip_all))]
  pub fn tick(&mut self) -> TickReport {
    let previous = self.vehicle;
    let tentative = advance(&previous, &self.input, &self.tuning);

    let extent = vehicle_extent(tentative.position, tentative.heading, &self.tuning.body);
    let collided = self.world.collides(&extent);
    self.vehicle = if collided {
      trace!(
        "Barrier hit at ({:.2}, {:.2}), rolling back",
        tentative.position.x,
        tentative.position.z
      );
      rollback(&previous, &tentative)
    } else {
      tentative
    };

    let delta = self.world.update_for_position(self.vehicle.position.z);
    self.signals = VehicleSignals::derive(&self.vehicle, &self.input, &self.tuning);
    self.tick += 1;

    TickReport {
      tick: self.tick,
      collided,
      signals: self.signals,
      delta,
    }
  }

  /// Moves the vehicle without integrating and recenters the window.
  pub fn teleport(&mut self, position: Vec3) -> StreamingDelta {
    self.vehicle.position = position;
    self.vehicle.speed = 0.0;
    self.world.update_for_position(position.z)
  }
}
