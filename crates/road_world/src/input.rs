//! Input latch for the four driving controls.
//!
//! The latch holds the last reported pressed/released state per control. It
//! does no debouncing, repeat suppression or queuing: a press sets the entry,
//! a release clears it, and the motion model reads whatever is latched when
//! the next tick runs.

/// Logical driving control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
  Forward,
  Backward,
  Left,
  Right,
}

impl Control {
  pub const ALL: [Control; 4] = [
    Control::Forward,
    Control::Backward,
    Control::Left,
    Control::Right,
  ];
}

/// A "control pressed" or "control released" notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlEvent {
  Pressed(Control),
  Released(Control),
}

/// Latched state of the four controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
  pub forward: bool,
  pub backward: bool,
  pub left: bool,
  pub right: bool,
}

impl InputState {
  /// Returns whether `control` is currently latched as pressed.
  pub fn is_pressed(&self, control: Control) -> bool {
    match control {
      Control::Forward => self.forward,
      Control::Backward => self.backward,
      Control::Left => self.left,
      Control::Right => self.right,
    }
  }

  /// Sets the latched state for `control`.
  pub fn set(&mut self, control: Control, pressed: bool) {
    let slot = match control {
      Control::Forward => &mut self.forward,
      Control::Backward => &mut self.backward,
      Control::Left => &mut self.left,
      Control::Right => &mut self.right,
    };
    *slot = pressed;
  }

  /// Applies a press/release notification.
  pub fn apply(&mut self, event: ControlEvent) {
    match event {
      ControlEvent::Pressed(control) => self.set(control, true),
      ControlEvent::Released(control) => self.set(control, false),
    }
  }

  /// Returns true if any control is held.
  pub fn any(&self) -> bool {
    self.forward || self.backward || self.left || self.right
  }
}
