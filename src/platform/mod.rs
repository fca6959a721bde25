// devassist - platform/mod.rs
//
// Platform abstraction layer: config directories, config.toml, process
// spawning.
// Dependencies: standard library, directories crate, core::model.
// Must NOT depend on: app.

pub mod config;
pub mod shell;
