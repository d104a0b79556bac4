//! Screen rendering and input handling.

mod desk;

pub use desk::DeskScreen;
