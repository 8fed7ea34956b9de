//! MoviesDB Core Library
//!
//! This crate provides a typed client for The Movie Database (TMDB) API
//! together with the screen coordinators of a media browsing app.
//!
//! # Features
//! - Decode movies, tv shows and people into one [`MediaRecord`] type
//! - Bearer-authenticated requests with TMDB error bodies mapped to
//!   [`NetworkError`]
//! - Trending, category lists, search, details, favorites and genres
//! - Debounced search and all-or-nothing concurrent screen loads

pub mod catalog;
pub mod client;
pub mod coordinator;
pub mod decoder;
pub mod endpoints;
pub mod error;
pub mod genres;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use catalog::{Catalog, TmdbCatalog};
pub use client::{ApiRequest, ClientConfig, TmdbClient, Token};
pub use coordinator::{
    DetailsCoordinator, DetailsState, FavoritesCoordinator, FavoritesState, HomeCoordinator,
    HomeState, MediaListCoordinator, MediaListState, SEARCH_DEBOUNCE,
};
pub use error::{ConfigError, DecodeError, NetworkError, RequestError, Result, TransportError};
pub use genres::GenreIndex;
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    Account, Credits, Genre, ImageSize, ListName, MediaList, MediaRecord, MediaType,
    PaginatedResult, Person, Review, TimeWindow, Video,
};
