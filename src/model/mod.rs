pub mod config;
pub mod course;
pub mod item;
pub mod reddit_listing;
pub mod token_response;
