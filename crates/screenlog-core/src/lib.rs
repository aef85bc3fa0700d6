pub mod controller;
pub mod locks;
pub mod resolver;
pub mod state;

pub use controller::{ControllerRegistry, ToggleController, ToggleOutcome, ERROR_TTL};
pub use locks::{ToggleGuard, ToggleKind, ToggleLocks};
pub use state::{ItemSnapshot, TransientError};
