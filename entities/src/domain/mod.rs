pub mod account;
pub mod card;
pub mod constant;
pub mod error;
pub mod page;
pub mod task;

pub use account::*;
pub use card::*;
pub use constant::*;
pub use error::*;
pub use page::*;
pub use task::*;
