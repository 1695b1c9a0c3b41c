// Presentation layer - Command line and preview HTTP surface
pub mod app_state;
pub mod cli;
pub mod handlers;
