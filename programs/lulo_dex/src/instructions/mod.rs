pub mod admin;
pub mod trade;

pub use admin::*;
pub use trade::*;
