//! Mediashelf - media library renamer and integrity checker
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod hasher;
pub mod metadata;
pub mod pipeline;
pub mod scanner;
