//! Home screen coordinator
//!
//! Loads trending plus popular movies and tv shows in one batch, and runs a
//! debounced search over movies and tv shows. While no search is active the
//! visible lists mirror the popular baseline.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::{debounced, Cancellables, Mailbox};
use crate::catalog::Catalog;
use crate::error::RequestError;
use crate::types::{ListName, MediaRecord, MediaType, TimeWindow};

/// Quiet period before a staged search query is sent
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Observable home screen state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeState {
    /// Trending movies, tv shows and people of the day
    pub trending: Vec<MediaRecord>,
    /// Popular movies; baseline shown when no search is active
    pub popular_movies: Vec<MediaRecord>,
    /// Popular tv shows; baseline shown when no search is active
    pub popular_tv_shows: Vec<MediaRecord>,
    /// Visible movies: search results or the popular baseline
    pub movies: Vec<MediaRecord>,
    /// Visible tv shows: search results or the popular baseline
    pub tv_shows: Vec<MediaRecord>,
    /// Query as typed, surrounding whitespace included
    pub search_query: String,
    /// True from `load()` until the latest load completes
    pub is_loading: bool,
    /// Message of the last failed load, cleared by the next successful one
    pub last_error: Option<String>,
}

impl HomeState {
    /// Whether the query holds anything besides whitespace
    pub fn is_searching(&self) -> bool {
        !self.search_query.trim().is_empty()
    }

    fn show_baseline(&mut self) {
        self.movies = self.popular_movies.clone();
        self.tv_shows = self.popular_tv_shows.clone();
    }
}

#[derive(Debug)]
enum HomeEvent {
    Loaded {
        generation: u64,
        trending: Vec<MediaRecord>,
        popular_movies: Vec<MediaRecord>,
        popular_tv_shows: Vec<MediaRecord>,
    },
    LoadFailed {
        generation: u64,
        error: RequestError,
    },
    SearchResults {
        generation: u64,
        movies: Vec<MediaRecord>,
        tv_shows: Vec<MediaRecord>,
    },
    /// Search error; leaves the visible lists as they are
    SearchFailed {
        generation: u64,
        error: RequestError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CancelId {
    Search,
}

/// Coordinator for the home screen
pub struct HomeCoordinator {
    catalog: Arc<dyn Catalog>,
    state: HomeState,
    mailbox: Mailbox<HomeEvent>,
    cancellables: Cancellables<CancelId>,
    load_generation: u64,
    search_generation: u64,
    debounce: Duration,
}

impl HomeCoordinator {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            state: HomeState::default(),
            mailbox: Mailbox::new(),
            cancellables: Cancellables::new(),
            load_generation: 0,
            search_generation: 0,
            debounce: SEARCH_DEBOUNCE,
        }
    }

    /// Override the search quiet period
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn state(&self) -> &HomeState {
        &self.state
    }

    /// Load trending, popular movies and popular tv shows concurrently.
    ///
    /// The three lists are applied together once all calls succeed; if any
    /// call fails none of them change. A load started while another is in
    /// flight supersedes it.
    pub fn load(&mut self) {
        self.state.is_loading = true;
        self.load_generation += 1;
        let generation = self.load_generation;
        let catalog = Arc::clone(&self.catalog);
        let events = self.mailbox.sender();

        tokio::spawn(async move {
            let result = tokio::try_join!(
                catalog.trending(MediaType::All, TimeWindow::Day),
                catalog.list(ListName::Popular, MediaType::Movie, 1),
                catalog.list(ListName::Popular, MediaType::Tv, 1),
            );
            let event = match result {
                Ok((trending, movies, tv_shows)) => HomeEvent::Loaded {
                    generation,
                    trending: trending.items,
                    popular_movies: movies.items,
                    popular_tv_shows: tv_shows.items,
                },
                Err(error) => HomeEvent::LoadFailed { generation, error },
            };
            let _ = events.send(event);
        });
    }

    /// Stage a new search query.
    ///
    /// Any pending or in-flight search is cancelled. A query with visible
    /// characters is searched once it has been stable for the debounce
    /// period and always reports back with exactly one event; a blank query
    /// restores the popular baseline immediately and reports nothing.
    pub fn search_query_changed(&mut self, query: impl Into<String>) {
        self.state.search_query = query.into();
        self.search_generation += 1;

        if !self.state.is_searching() {
            self.cancellables.cancel(&CancelId::Search);
            self.state.show_baseline();
            return;
        }

        let token = self.cancellables.begin(CancelId::Search);
        let generation = self.search_generation;
        let query = self.state.search_query.clone();
        let quiet = self.debounce;
        let catalog = Arc::clone(&self.catalog);
        let events = self.mailbox.sender();

        tokio::spawn(async move {
            let search = async {
                tokio::try_join!(
                    catalog.search(MediaType::Movie, &query, 1),
                    catalog.search(MediaType::Tv, &query, 1),
                )
            };
            // A superseded cycle stays silent; the query that replaced it
            // reports instead
            let event = match debounced(&token, quiet, search).await {
                Some(Ok((movies, tv_shows))) => HomeEvent::SearchResults {
                    generation,
                    movies: movies.items,
                    tv_shows: tv_shows.items,
                },
                Some(Err(error)) => HomeEvent::SearchFailed { generation, error },
                None => {
                    debug!(query = %query, "Search superseded");
                    return;
                }
            };
            let _ = events.send(event);
        });
    }

    /// Leave search mode: clear the query and show the popular baseline
    pub fn search_canceled(&mut self) {
        self.search_query_changed(String::new());
    }

    /// Wait for the next task event and apply it to the state
    pub async fn process_next(&mut self) {
        if let Some(event) = self.mailbox.recv().await {
            self.apply(event);
        }
    }

    /// Apply every event that is already queued; returns how many were applied
    pub fn try_process(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.mailbox.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    fn apply(&mut self, event: HomeEvent) {
        match event {
            HomeEvent::Loaded { generation, .. } | HomeEvent::LoadFailed { generation, .. }
                if generation != self.load_generation =>
            {
                debug!(generation, current = self.load_generation, "Dropping superseded load");
            }
            HomeEvent::Loaded {
                trending,
                popular_movies,
                popular_tv_shows,
                ..
            } => {
                self.state.trending = trending;
                self.state.popular_movies = popular_movies;
                self.state.popular_tv_shows = popular_tv_shows;
                if !self.state.is_searching() {
                    self.state.show_baseline();
                }
                self.state.is_loading = false;
                self.state.last_error = None;
            }
            HomeEvent::LoadFailed { error, .. } => {
                warn!(error = %error, "Home load failed");
                self.state.is_loading = false;
                self.state.last_error = Some(error.to_string());
            }
            HomeEvent::SearchResults {
                generation,
                movies,
                tv_shows,
            } => {
                if generation != self.search_generation {
                    debug!(generation, current = self.search_generation, "Dropping stale search results");
                    return;
                }
                self.state.movies = movies;
                self.state.tv_shows = tv_shows;
            }
            HomeEvent::SearchFailed { generation, error } => {
                debug!(generation, error = %error, "Search failed");
            }
        }
    }
}
