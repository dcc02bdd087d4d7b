//! Unattended play for watch views.
//!
//! - `SteeringPolicy`: Chooses a direction for the next tick
//! - `Autopilot`, `Straight`: Built-in policies
//! - `Spectator`: Drives a game with a policy and restarts it when it ends

pub mod policy;
pub mod spectator;

pub use policy::{Autopilot, SteeringPolicy, Straight};
pub use spectator::{Spectator, SpectatorTick};
