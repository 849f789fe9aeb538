mod command;
mod helper;
mod http;
mod poller;
mod printer;
mod submit;

pub use command::*;
pub use helper::*;
pub use http::*;
pub use poller::*;
pub use printer::*;
pub use submit::*;
