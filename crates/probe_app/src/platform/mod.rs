mod app;
mod effects;
mod input;
mod logging;
mod options;
mod ui;

pub use app::run_app;
