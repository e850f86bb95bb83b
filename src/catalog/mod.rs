//! Anime catalog (AniList GraphQL) integration.
//!
//! - `client` - HTTP client with the no-data sentinel contract
//! - `query` - fixed chart queries and season handling
//! - `models` - response types

mod client;
mod models;
mod query;

pub use client::CatalogClient;
pub use models::Media;
pub use query::{MediaSeason, SeasonFilter};

#[cfg(test)]
pub(crate) use client::tests::{serve as serve_fixture, PAGE_BODY};
