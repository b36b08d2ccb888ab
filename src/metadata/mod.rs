//! Metadata catalog lookups.
//!
//! This module defines the [`MetadataProvider`] trait the series and movie
//! processors use to resolve directory names into catalog records, plus the
//! TMDB implementation.
//!
//! # Module layout
//!
//! - [`provider`] -- Trait definition and shared data types.
//! - [`providers`] -- Concrete provider implementations (TMDB).

pub mod provider;
pub mod providers;

pub use provider::{
    CatalogError, EpisodeRecord, MetadataProvider, MovieMatch, SeasonDetails, ShowMatch,
};
pub use providers::TmdbProvider;
