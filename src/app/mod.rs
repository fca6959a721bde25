// devassist - app/mod.rs
//
// Application layer: the session journal, snapshot persistence, and the
// Assistant that drives scans and commands.
// Dependencies: core, platform, util.

pub mod assistant;
pub mod logger;
pub mod session;
