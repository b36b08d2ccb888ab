//! Media processing actions.
//!
//! - Stream-copy remuxing with rewritten container metadata

mod remux;

pub use remux::{FfmpegRemuxer, RemuxMetadata, Remuxer};
