pub mod catalog;
pub mod coursebot;
pub mod firebase;
pub mod forum;
pub mod html_parser;
pub mod matcher;
pub mod reddit;
pub mod store;
