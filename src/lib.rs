// Library surface shared by the binary and the headless tests.
pub mod app_dirs;
pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod settings;
pub mod tick;
pub mod timer;
