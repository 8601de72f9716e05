//! Report module - summaries, profile tables and the run manifest

pub mod manifest;
pub mod profile;
pub mod summary;

pub use manifest::*;
pub use profile::*;
pub use summary::*;
