//! Navigation core: carrot planner, motion controller, collision guard
//!
//! Data flows through these in a fixed order each control cycle:
//! pose → [`planner::select_target`] → target point →
//! [`controller::MotionController`] → draft command →
//! [`guard::CollisionGuard`] → final command.

pub mod controller;
pub mod guard;
pub mod planner;

pub use controller::MotionController;
pub use guard::{CollisionGuard, GuardState};
pub use planner::{select_target, Carrot};
