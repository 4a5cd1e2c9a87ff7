pub mod coursebot;
