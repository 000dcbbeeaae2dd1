pub mod cli;
pub mod config;
pub mod credentials;
pub mod filesystem;
pub mod generator;
pub mod manager;
pub mod store;
pub mod tui;
