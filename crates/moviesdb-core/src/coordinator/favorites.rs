//! Favorites screen coordinator

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use super::Mailbox;
use crate::catalog::Catalog;
use crate::error::RequestError;
use crate::types::{Account, MediaRecord, MediaType};

/// Observable favorites screen state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoritesState {
    /// Account whose favorites are shown; anonymous until loaded
    pub account: Account,
    /// Favorite movies, one entry per id
    pub movies: Vec<MediaRecord>,
    /// Favorite tv shows, one entry per id
    pub tv_shows: Vec<MediaRecord>,
    /// True from `load()` until the latest load completes
    pub is_loading: bool,
    /// Message of the last failed load, cleared by the next successful one
    pub last_error: Option<String>,
}

impl FavoritesState {
    fn list_mut(&mut self, media_type: MediaType) -> Option<&mut Vec<MediaRecord>> {
        match media_type {
            MediaType::Movie => Some(&mut self.movies),
            MediaType::Tv => Some(&mut self.tv_shows),
            MediaType::Person | MediaType::All => None,
        }
    }
}

#[derive(Debug)]
enum FavoritesEvent {
    Loaded {
        generation: u64,
        account: Account,
        movies: Vec<MediaRecord>,
        tv_shows: Vec<MediaRecord>,
    },
    LoadFailed {
        generation: u64,
        error: RequestError,
    },
}

/// Coordinator for the account's favorites screen
pub struct FavoritesCoordinator {
    catalog: Arc<dyn Catalog>,
    state: FavoritesState,
    mailbox: Mailbox<FavoritesEvent>,
    load_generation: u64,
}

/// Keep the first record of every id
fn dedupe(records: Vec<MediaRecord>) -> Vec<MediaRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.id))
        .collect()
}

impl FavoritesCoordinator {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            state: FavoritesState::default(),
            mailbox: Mailbox::new(),
            load_generation: 0,
        }
    }

    pub fn state(&self) -> &FavoritesState {
        &self.state
    }

    /// Resolve the account, then fetch favorite movies and tv shows together
    pub fn load(&mut self) {
        self.state.is_loading = true;
        self.load_generation += 1;
        let generation = self.load_generation;
        let catalog = Arc::clone(&self.catalog);
        let events = self.mailbox.sender();

        tokio::spawn(async move {
            let result = async {
                let account = catalog.account().await?;
                let (movies, tv_shows) = tokio::try_join!(
                    catalog.favorite_movies(account.id),
                    catalog.favorite_tv_shows(account.id),
                )?;
                Ok::<_, RequestError>(FavoritesEvent::Loaded {
                    generation,
                    account,
                    movies: dedupe(movies.items),
                    tv_shows: dedupe(tv_shows.items),
                })
            }
            .await;
            let event =
                result.unwrap_or_else(|error| FavoritesEvent::LoadFailed { generation, error });
            let _ = events.send(event);
        });
    }

    /// Mirror a favorite flag change made elsewhere into the lists
    pub fn favorite_changed(&mut self, record: &MediaRecord) {
        let Some(list) = self.state.list_mut(record.media_type) else {
            return;
        };
        let position = list.iter().position(|item| item.id == record.id);
        match (record.favorite, position) {
            (true, None) => list.push(record.clone()),
            (false, Some(index)) => {
                list.remove(index);
            }
            _ => {}
        }
    }

    pub async fn process_next(&mut self) {
        if let Some(event) = self.mailbox.recv().await {
            self.apply(event);
        }
    }

    pub fn try_process(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.mailbox.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    fn apply(&mut self, event: FavoritesEvent) {
        let generation = match &event {
            FavoritesEvent::Loaded { generation, .. }
            | FavoritesEvent::LoadFailed { generation, .. } => *generation,
        };
        if generation != self.load_generation {
            debug!(generation, current = self.load_generation, "Dropping superseded favorites load");
            return;
        }

        self.state.is_loading = false;
        match event {
            FavoritesEvent::Loaded {
                account,
                movies,
                tv_shows,
                ..
            } => {
                self.state.account = account;
                self.state.movies = movies;
                self.state.tv_shows = tv_shows;
                self.state.last_error = None;
            }
            FavoritesEvent::LoadFailed { error, .. } => {
                warn!(error = %error, "Favorites load failed");
                self.state.last_error = Some(error.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{record, FakeCatalog};

    #[tokio::test]
    async fn test_load_fetches_account_then_both_lists() {
        let catalog = Arc::new(FakeCatalog::new());
        let mut favorites = FavoritesCoordinator::new(catalog.clone());
        favorites.load();
        favorites.process_next().await;

        let state = favorites.state();
        assert!(!state.is_loading);
        assert_eq!(state.account.id, 42);
        assert_eq!(state.movies.len(), 1, "duplicate ids are collapsed");
        assert_eq!(state.tv_shows[0].title, "Fav Show");

        let calls = catalog.calls();
        assert_eq!(calls[0], "account");
        let mut rest = calls[1..].to_vec();
        rest.sort();
        assert_eq!(rest, ["favorite_movies:42", "favorite_tv_shows:42"]);
    }

    #[tokio::test]
    async fn test_account_failure_skips_list_calls() {
        let catalog = Arc::new(FakeCatalog::new());
        catalog.fail("account");
        let mut favorites = FavoritesCoordinator::new(catalog.clone());
        favorites.load();
        favorites.process_next().await;

        assert!(favorites.state().last_error.is_some());
        assert_eq!(catalog.calls(), ["account"]);
    }

    #[tokio::test]
    async fn test_one_failing_list_applies_nothing() {
        let catalog = Arc::new(FakeCatalog::new());
        let mut favorites = FavoritesCoordinator::new(catalog.clone());
        favorites.load();
        favorites.process_next().await;
        let before = favorites.state().clone();

        catalog.fail("favorite_tv_shows");
        favorites.load();
        favorites.process_next().await;

        assert_eq!(favorites.state().movies, before.movies);
        assert_eq!(favorites.state().tv_shows, before.tv_shows);
        assert!(favorites.state().last_error.is_some());
    }

    #[tokio::test]
    async fn test_overlapping_loads_apply_only_the_latest() {
        let catalog = Arc::new(FakeCatalog::new());
        let mut favorites = FavoritesCoordinator::new(catalog.clone());
        favorites.load();
        favorites.load();

        favorites.process_next().await;
        assert!(favorites.state().is_loading);
        assert!(favorites.state().movies.is_empty());

        favorites.process_next().await;
        assert!(!favorites.state().is_loading);
        assert_eq!(favorites.state().movies.len(), 1);
        assert_eq!(catalog.calls_starting_with("account").len(), 2);
    }

    #[test]
    fn test_favorite_changed_mirrors_toggle() {
        let mut favorites = FavoritesCoordinator::new(Arc::new(FakeCatalog::new()));
        let mut show = record(9, MediaType::Tv, "Severance");

        show.favorite = true;
        favorites.favorite_changed(&show);
        favorites.favorite_changed(&show);
        assert_eq!(favorites.state().tv_shows.len(), 1);
        assert!(favorites.state().movies.is_empty());

        show.favorite = false;
        favorites.favorite_changed(&show);
        assert!(favorites.state().tv_shows.is_empty());

        let mut person = record(3, MediaType::Person, "Zendaya");
        person.favorite = true;
        favorites.favorite_changed(&person);
        assert!(favorites.state().movies.is_empty() && favorites.state().tv_shows.is_empty());
    }
}
