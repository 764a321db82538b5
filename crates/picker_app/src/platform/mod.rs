mod app;
mod config;
mod console;
mod render;

pub use app::run_app;
