pub mod core;
pub mod error;
pub mod http;
pub mod model;
pub mod utils;
