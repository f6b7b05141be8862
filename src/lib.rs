#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod metrics;
pub mod proc;
pub mod settings;
pub mod ui;
pub use app::SystemMonitorApp;
