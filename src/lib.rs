pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod nav;
pub mod segment;
pub mod session;
pub mod settings;
pub mod sidebar;
pub mod state;
pub mod store;
pub mod structure;
pub mod ui;
pub mod views;
