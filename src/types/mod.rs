pub mod frame;
pub mod gps;

pub use frame::*;
pub use gps::*;
