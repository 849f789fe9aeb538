mod config;
mod constant;
mod context;

pub use config::*;
pub use constant::*;
pub use context::*;
