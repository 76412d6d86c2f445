//! Player module
//!
//! Movement settings and controller, plus the [`Player`] router that owns
//! the whole rig and runs it frame by frame.

mod controller;
mod movement;
mod router;

pub use controller::MovementController;
pub use movement::{MovementMode, MovementSettings};
pub use router::{CursorMode, FrameOutput, Player, PlayerConfig};
