// devassist - lib.rs
//
// Library entry point, exposing all modules for integration testing and
// programmatic use. The CLI lives in `main.rs`.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;

pub use crate::app::assistant::Assistant;
pub use crate::app::logger::SessionLogger;
pub use crate::core::model::{CommandResult, Level, LogEntry, SessionSnapshot, TaskStatus};
