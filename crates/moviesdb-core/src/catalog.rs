//! Typed TMDB catalog API
//!
//! This module provides the high-level operations the coordinators build on.
//! It combines the request engine with the endpoint routing and the media
//! decoder; every media decode is given the media type of the call as its
//! context.

use async_trait::async_trait;
use serde::Deserialize;

use crate::client::{TmdbClient, Token};
use crate::decoder::{decode_media, decode_page};
use crate::endpoints;
use crate::error::{ConfigError, Result};
use crate::genres::GenreIndex;
use crate::types::{
    Account, AccountId, Genre, ListName, MediaId, MediaRecord, MediaType, PaginatedResult,
    TimeWindow,
};

/// Catalog operations consumed by the coordinators
///
/// Implemented by [`TmdbCatalog`]; tests substitute their own
/// implementation.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Account owning the configured token
    async fn account(&self) -> Result<Account>;

    /// Trending records; `All` mixes movies, tv shows and people
    async fn trending(
        &self,
        media_type: MediaType,
        window: TimeWindow,
    ) -> Result<PaginatedResult<MediaRecord>>;

    /// One page of a category list for movies or tv shows
    async fn list(
        &self,
        name: ListName,
        media_type: MediaType,
        page: u32,
    ) -> Result<PaginatedResult<MediaRecord>>;

    /// One page of search results; `All` uses multi search
    async fn search(
        &self,
        media_type: MediaType,
        query: &str,
        page: u32,
    ) -> Result<PaginatedResult<MediaRecord>>;

    /// Fully populated record (account state, credits, videos, reviews)
    async fn details(&self, media_type: MediaType, id: MediaId) -> Result<MediaRecord>;

    async fn favorite_movies(&self, account: AccountId) -> Result<PaginatedResult<MediaRecord>>;

    async fn favorite_tv_shows(&self, account: AccountId) -> Result<PaginatedResult<MediaRecord>>;

    /// Ask the server to set `favorite` to the opposite of `record.favorite`.
    ///
    /// Not idempotent: two calls with the same record flip the flag twice.
    /// Returns the server's success flag.
    async fn toggle_favorite(&self, record: &MediaRecord, account: AccountId) -> Result<bool>;

    /// Genre index for movies or tv shows
    async fn genres(&self, media_type: MediaType) -> Result<GenreIndex>;
}

#[derive(Debug, Deserialize)]
struct GenreList {
    genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    success: bool,
}

/// TMDB implementation of [`Catalog`]
///
/// # Example
/// ```no_run
/// use moviesdb_core::{Catalog, ListName, MediaType, TmdbCatalog};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let catalog = TmdbCatalog::from_env()?;
/// let popular = catalog.list(ListName::Popular, MediaType::Movie, 1).await?;
/// for movie in popular.items {
///     println!("{} ({:.1})", movie.title, movie.vote_average);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TmdbCatalog {
    client: TmdbClient,
}

impl TmdbCatalog {
    /// Create a catalog with default client configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(token: Token) -> std::result::Result<Self, ConfigError> {
        Ok(Self::with_client(TmdbClient::new(token)?))
    }

    /// Create a catalog on top of a pre-configured client.
    ///
    /// This is useful for testing or when you need a custom transport.
    pub fn with_client(client: TmdbClient) -> Self {
        Self { client }
    }

    /// Create a catalog from the `TMDB_TOKEN` environment variable.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingToken` when no token is configured.
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        Ok(Self::with_client(TmdbClient::from_env()?))
    }

    pub fn client(&self) -> &TmdbClient {
        &self.client
    }

    async fn fetch_page(
        &self,
        request: &crate::client::ApiRequest,
        context: Option<MediaType>,
    ) -> Result<PaginatedResult<MediaRecord>> {
        self.client
            .execute_with(request, |body| decode_page(body, context))
            .await
    }
}

#[async_trait]
impl Catalog for TmdbCatalog {
    async fn account(&self) -> Result<Account> {
        self.client.execute(&endpoints::account()).await
    }

    async fn trending(
        &self,
        media_type: MediaType,
        window: TimeWindow,
    ) -> Result<PaginatedResult<MediaRecord>> {
        let request = endpoints::trending(media_type, window);
        self.fetch_page(&request, media_type.decode_context()).await
    }

    async fn list(
        &self,
        name: ListName,
        media_type: MediaType,
        page: u32,
    ) -> Result<PaginatedResult<MediaRecord>> {
        let request = endpoints::list(name, media_type, page)?;
        self.fetch_page(&request, media_type.decode_context()).await
    }

    async fn search(
        &self,
        media_type: MediaType,
        query: &str,
        page: u32,
    ) -> Result<PaginatedResult<MediaRecord>> {
        let request = endpoints::search(media_type, query, page)?;
        self.fetch_page(&request, media_type.decode_context()).await
    }

    async fn details(&self, media_type: MediaType, id: MediaId) -> Result<MediaRecord> {
        let request = endpoints::details(media_type, id)?;
        let context = media_type.decode_context();
        self.client
            .execute_with(&request, |body| decode_media(body, context))
            .await
    }

    async fn favorite_movies(&self, account: AccountId) -> Result<PaginatedResult<MediaRecord>> {
        self.fetch_page(&endpoints::favorite_movies(account), Some(MediaType::Movie))
            .await
    }

    async fn favorite_tv_shows(&self, account: AccountId) -> Result<PaginatedResult<MediaRecord>> {
        self.fetch_page(&endpoints::favorite_tv_shows(account), Some(MediaType::Tv))
            .await
    }

    async fn toggle_favorite(&self, record: &MediaRecord, account: AccountId) -> Result<bool> {
        let request = endpoints::toggle_favorite(record, account)?;
        let response: StatusResponse = self.client.execute(&request).await?;
        Ok(response.success)
    }

    async fn genres(&self, media_type: MediaType) -> Result<GenreIndex> {
        let request = endpoints::genres(media_type)?;
        let list: GenreList = self.client.execute(&request).await?;
        Ok(GenreIndex::new(media_type, list.genres))
    }
}
