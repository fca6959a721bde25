// devassist - core/mod.rs
//
// Core scan logic and the shared data model.
// Dependencies: standard library, walkdir, glob, serde.
// Must NOT depend on: app or platform.

pub mod config_files;
pub mod model;
pub mod structure;
