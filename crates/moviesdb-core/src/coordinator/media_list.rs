//! Category lists for one media type

use std::sync::Arc;

use tracing::{debug, warn};

use super::Mailbox;
use crate::catalog::Catalog;
use crate::error::RequestError;
use crate::types::{ListName, MediaList, MediaType};

/// Observable state of a category list screen
#[derive(Debug, Clone, PartialEq)]
pub struct MediaListState {
    /// Movie or tv; fixed for the lifetime of the screen
    pub media_type: MediaType,
    /// Most popular titles
    pub popular: MediaList,
    /// Highest rated titles
    pub top_rated: MediaList,
    /// Now playing movies, or tv shows airing today
    pub now_playing: MediaList,
    /// True from `load()` until the latest load completes
    pub is_loading: bool,
    /// Message of the last failed load, cleared by the next successful one
    pub last_error: Option<String>,
}

impl MediaListState {
    fn new(media_type: MediaType) -> Self {
        Self {
            media_type,
            popular: MediaList::new(ListName::Popular),
            top_rated: MediaList::new(ListName::TopRated),
            now_playing: MediaList::new(ListName::NowPlaying),
            is_loading: false,
            last_error: None,
        }
    }

    /// Lists in display order
    pub fn lists(&self) -> [&MediaList; 3] {
        [&self.popular, &self.top_rated, &self.now_playing]
    }
}

#[derive(Debug)]
enum MediaListEvent {
    Loaded {
        generation: u64,
        lists: [MediaList; 3],
    },
    LoadFailed {
        generation: u64,
        error: RequestError,
    },
}

/// Loads popular, top rated and now playing lists together
pub struct MediaListCoordinator {
    catalog: Arc<dyn Catalog>,
    state: MediaListState,
    mailbox: Mailbox<MediaListEvent>,
    load_generation: u64,
}

impl MediaListCoordinator {
    pub fn new(catalog: Arc<dyn Catalog>, media_type: MediaType) -> Self {
        Self {
            catalog,
            state: MediaListState::new(media_type),
            mailbox: Mailbox::new(),
            load_generation: 0,
        }
    }

    pub fn state(&self) -> &MediaListState {
        &self.state
    }

    /// Fetch all three lists at their current pages.
    ///
    /// On success the lists are replaced wholesale; on failure none change.
    /// Only the most recent load is applied.
    pub fn load(&mut self) {
        self.state.is_loading = true;
        self.load_generation += 1;
        let generation = self.load_generation;
        let catalog = Arc::clone(&self.catalog);
        let events = self.mailbox.sender();
        let media_type = self.state.media_type;
        let pages = self.state.lists().map(|list| (list.name, list.page));

        tokio::spawn(async move {
            let [(popular, p1), (top_rated, p2), (now_playing, p3)] = pages;
            let result = tokio::try_join!(
                catalog.list(popular, media_type, p1),
                catalog.list(top_rated, media_type, p2),
                catalog.list(now_playing, media_type, p3),
            );
            let event = match result {
                Ok((a, b, c)) => MediaListEvent::Loaded {
                    generation,
                    lists: [
                        MediaList { name: popular, page: p1, items: a.items },
                        MediaList { name: top_rated, page: p2, items: b.items },
                        MediaList { name: now_playing, page: p3, items: c.items },
                    ],
                },
                Err(error) => MediaListEvent::LoadFailed { generation, error },
            };
            let _ = events.send(event);
        });
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

    fn apply(&mut self, event: MediaListEvent) {
        let generation = match &event {
            MediaListEvent::Loaded { generation, .. }
            | MediaListEvent::LoadFailed { generation, .. } => *generation,
        };
        if generation != self.load_generation {
            debug!(generation, current = self.load_generation, "Dropping superseded list load");
            return;
        }

        self.state.is_loading = false;
        match event {
            MediaListEvent::Loaded {
                lists: [popular, top_rated, now_playing],
                ..
            } => {
                self.state.popular = popular;
                self.state.top_rated = top_rated;
                self.state.now_playing = now_playing;
                self.state.last_error = None;
            }
            MediaListEvent::LoadFailed { error, .. } => {
                warn!(media_type = %self.state.media_type, error = %error, "List load failed");
                self.state.last_error = Some(error.to_string());
            }
        }
    }
}
