mod api;
mod handler;

pub use api::*;
pub use handler::*;
