pub mod config;
pub mod platform;

pub use config::*;
pub use platform::*;
