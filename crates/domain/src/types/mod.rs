//! Common data types used throughout the application

pub mod calendar;
pub mod command;
pub mod credential;
pub mod device;
pub mod playback;

pub use calendar::*;
pub use command::*;
pub use credential::*;
pub use device::*;
pub use playback::*;
