//! Test doubles shared by the coordinator tests

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::catalog::Catalog;
use crate::decoder::decode_media;
use crate::error::{NetworkError, RequestError, Result};
use crate::genres::GenreIndex;
use crate::types::{
    Account, AccountId, Genre, ListName, MediaId, MediaRecord, MediaType, PaginatedResult,
    TimeWindow,
};

/// Build a minimal record of the given type
pub(crate) fn record(id: MediaId, media_type: MediaType, title: &str) -> MediaRecord {
    let json = json!({
        "id": id,
        "title": title,
        "name": title,
        "overview": format!("About {title}"),
        "vote_average": 7.0,
        "popularity": 7.0
    });
    decode_media(&serde_json::to_vec(&json).unwrap(), Some(media_type)).unwrap()
}

fn page(items: Vec<MediaRecord>) -> PaginatedResult<MediaRecord> {
    let total = items.len() as u32;
    PaginatedResult::new(items, 1, 1, total)
}

/// Recording catalog with per-operation failure injection
///
/// Every call is logged as a short string such as `list:popular:movie:1` or
/// `search:tv:Dune`; operations whose name is in the failing set return a
/// 500 error.
pub(crate) struct FakeCatalog {
    calls: Mutex<Vec<String>>,
    failing: Mutex<HashSet<&'static str>>,
    favorites: Mutex<HashSet<(MediaType, MediaId)>>,
    search_delay: Mutex<Duration>,
    pub(crate) account: Account,
}

impl FakeCatalog {
    pub(crate) fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            favorites: Mutex::new(HashSet::new()),
            search_delay: Mutex::new(Duration::ZERO),
            account: Account {
                id: 42,
                username: "cinephile".to_string(),
            },
        }
    }

    pub(crate) fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub(crate) fn recover(&self, operation: &'static str) {
        self.failing.lock().unwrap().remove(operation);
    }

    /// Hold every search answer back for `delay` after the call is logged
    pub(crate) fn delay_search(&self, delay: Duration) {
        *self.search_delay.lock().unwrap() = delay;
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call.starts_with(prefix))
            .collect()
    }

    pub(crate) fn is_favorite(&self, media_type: MediaType, id: MediaId) -> bool {
        self.favorites.lock().unwrap().contains(&(media_type, id))
    }

    fn enter(&self, operation: &'static str, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(operation) {
            return Err(RequestError::BadResponse {
                status: 500,
                error: NetworkError::known(11),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn account(&self) -> Result<Account> {
        self.enter("account", "account".to_string())?;
        Ok(self.account.clone())
    }

    async fn trending(
        &self,
        media_type: MediaType,
        window: TimeWindow,
    ) -> Result<PaginatedResult<MediaRecord>> {
        self.enter("trending", format!("trending:{}:{}", media_type, window.as_str()))?;
        Ok(page(vec![
            record(1, MediaType::Movie, "Trending Movie"),
            record(2, MediaType::Tv, "Trending Show"),
        ]))
    }

    async fn list(
        &self,
        name: ListName,
        media_type: MediaType,
        page_number: u32,
    ) -> Result<PaginatedResult<MediaRecord>> {
        self.enter(
            "list",
            format!("list:{}:{}:{}", name.as_str(), media_type, page_number),
        )?;
        let title = format!("{} {}", name.as_str(), media_type);
        Ok(page(vec![record(100, media_type, &title)]))
    }

    async fn search(
        &self,
        media_type: MediaType,
        query: &str,
        _page: u32,
    ) -> Result<PaginatedResult<MediaRecord>> {
        self.enter("search", format!("search:{media_type}:{query}"))?;
        let delay = *self.search_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(page(vec![record(200, media_type, query)]))
    }

    async fn details(&self, media_type: MediaType, id: MediaId) -> Result<MediaRecord> {
        self.enter("details", format!("details:{media_type}:{id}"))?;
        let mut detailed = record(id, media_type, "Detailed");
        detailed.genre_ids = vec![18, 10759];
        detailed.favorite = self.is_favorite(media_type, id);
        Ok(detailed)
    }

    async fn favorite_movies(&self, account: AccountId) -> Result<PaginatedResult<MediaRecord>> {
        self.enter("favorite_movies", format!("favorite_movies:{account}"))?;
        Ok(page(vec![
            record(300, MediaType::Movie, "Fav Movie"),
            record(300, MediaType::Movie, "Fav Movie"),
        ]))
    }

    async fn favorite_tv_shows(&self, account: AccountId) -> Result<PaginatedResult<MediaRecord>> {
        self.enter("favorite_tv_shows", format!("favorite_tv_shows:{account}"))?;
        Ok(page(vec![record(400, MediaType::Tv, "Fav Show")]))
    }

    async fn toggle_favorite(&self, record: &MediaRecord, account: AccountId) -> Result<bool> {
        let requested = !record.favorite;
        self.enter(
            "toggle_favorite",
            format!("toggle_favorite:{}:{}:{}", account, record.id, requested),
        )?;
        let mut favorites = self.favorites.lock().unwrap();
        if requested {
            favorites.insert(record.key());
        } else {
            favorites.remove(&record.key());
        }
        Ok(true)
    }

    async fn genres(&self, media_type: MediaType) -> Result<GenreIndex> {
        self.enter("genres", format!("genres:{media_type}"))?;
        Ok(GenreIndex::new(
            media_type,
            vec![Genre {
                id: 18,
                name: "Fetched Drama".to_string(),
            }],
        ))
    }
}
