// The binary in main.rs owns the terminal; everything it drives lives here so
// integration tests can exercise the controller without a TTY.
pub mod analytics;
pub mod app;
pub mod config;
pub mod course;
pub mod event;
pub mod keymap;
pub mod store;
pub mod ui;
