//! Endless Drive - an endless procedural road driving game.
//!
//! The road, terrain, vehicle model and day/night clock live in
//! [`road_world`]; this crate adds the window, configuration, keyboard
//! bindings, the car model, chase camera, sky, sound and HUD.

pub mod ambiance;
pub mod car;
pub mod config;
pub mod core;
pub mod hud;
pub mod input;
