//! Details screen coordinator

use std::sync::Arc;

use tracing::{debug, warn};

use super::Mailbox;
use crate::catalog::Catalog;
use crate::error::RequestError;
use crate::genres::{fallback_genre_name, GenreIndex};
use crate::types::{Account, GenreId, MediaRecord};

/// Observable details screen state
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsState {
    /// Summary record until the first load completes, then the full details
    pub media: MediaRecord,
    /// Account used for favorite toggles; anonymous until loaded
    pub account: Account,
    /// Only present for movies and tv shows after a load
    pub genres: Option<GenreIndex>,
    /// True from `load()` until the latest load completes
    pub is_loading: bool,
    /// Message of the last failed load, cleared by the next successful one
    pub last_error: Option<String>,
}

impl DetailsState {
    /// Genre name from the fetched index, else the static table of the
    /// record's own media type
    pub fn genre_name(&self, id: GenreId) -> Option<&str> {
        self.genres
            .as_ref()
            .and_then(|index| index.get(id))
            .or_else(|| fallback_genre_name(id, self.media.media_type))
    }

    /// Names of every genre of the record that resolves
    pub fn genre_names(&self) -> Vec<&str> {
        self.media
            .genre_ids
            .iter()
            .filter_map(|id| self.genre_name(*id))
            .collect()
    }

    /// YouTube key of the record's trailer
    pub fn trailer_key(&self) -> Option<&str> {
        self.media.trailer().map(|video| video.key.as_str())
    }
}

#[derive(Debug)]
enum DetailsEvent {
    Loaded {
        generation: u64,
        media: MediaRecord,
        account: Account,
        genres: Option<GenreIndex>,
    },
    LoadFailed {
        generation: u64,
        error: RequestError,
    },
    FavoriteSet(bool),
    FavoriteFailed,
}

/// Coordinator for one record's details screen
pub struct DetailsCoordinator {
    catalog: Arc<dyn Catalog>,
    state: DetailsState,
    mailbox: Mailbox<DetailsEvent>,
    load_generation: u64,
    /// Favorite value the next toggle starts from; runs ahead of
    /// `state.media.favorite` while toggles are in flight
    desired_favorite: bool,
}

impl DetailsCoordinator {
    /// Start from a summary record, typically one taken from a list
    pub fn new(catalog: Arc<dyn Catalog>, media: MediaRecord) -> Self {
        let desired_favorite = media.favorite;
        Self {
            catalog,
            state: DetailsState {
                media,
                account: Account::default(),
                genres: None,
                is_loading: false,
                last_error: None,
            },
            mailbox: Mailbox::new(),
            load_generation: 0,
            desired_favorite,
        }
    }

    pub fn state(&self) -> &DetailsState {
        &self.state
    }

    /// Fetch genres, full details and the account concurrently.
    ///
    /// Only the most recent load is applied.
    pub fn load(&mut self) {
        self.state.is_loading = true;
        self.load_generation += 1;
        let generation = self.load_generation;
        let catalog = Arc::clone(&self.catalog);
        let events = self.mailbox.sender();
        let (media_type, id) = self.state.media.key();

        tokio::spawn(async move {
            let genres = async {
                if media_type.has_genres() {
                    catalog.genres(media_type).await.map(Some)
                } else {
                    Ok(None)
                }
            };
            let result = tokio::try_join!(genres, catalog.details(media_type, id), catalog.account());
            let event = match result {
                Ok((genres, media, account)) => DetailsEvent::Loaded {
                    generation,
                    media,
                    account,
                    genres,
                },
                Err(error) => DetailsEvent::LoadFailed { generation, error },
            };
            let _ = events.send(event);
        });
    }

    /// Ask the server to flip the favorite flag.
    ///
    /// The local flag follows only once the server reports success.
    pub fn toggle_favorite(&mut self) {
        let mut record = self.state.media.clone();
        record.favorite = self.desired_favorite;
        let requested = !record.favorite;
        self.desired_favorite = requested;

        let account = self.state.account.id;
        let catalog = Arc::clone(&self.catalog);
        let events = self.mailbox.sender();

        tokio::spawn(async move {
            let event = match catalog.toggle_favorite(&record, account).await {
                Ok(true) => DetailsEvent::FavoriteSet(requested),
                Ok(false) => {
                    debug!(id = record.id, "Favorite toggle rejected");
                    DetailsEvent::FavoriteFailed
                }
                Err(e) => {
                    debug!(id = record.id, error = %e, "Favorite toggle failed");
                    DetailsEvent::FavoriteFailed
                }
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

    fn apply(&mut self, event: DetailsEvent) {
        match event {
            DetailsEvent::Loaded { generation, .. } | DetailsEvent::LoadFailed { generation, .. }
                if generation != self.load_generation =>
            {
                debug!(generation, current = self.load_generation, "Dropping superseded details load");
            }
            DetailsEvent::Loaded {
                media,
                account,
                genres,
                ..
            } => {
                self.desired_favorite = media.favorite;
                self.state.media = media;
                self.state.account = account;
                self.state.genres = genres;
                self.state.is_loading = false;
                self.state.last_error = None;
            }
            DetailsEvent::LoadFailed { error, .. } => {
                warn!(id = self.state.media.id, error = %error, "Details load failed");
                self.state.is_loading = false;
                self.state.last_error = Some(error.to_string());
            }
            DetailsEvent::FavoriteSet(favorite) => {
                self.state.media.favorite = favorite;
            }
            DetailsEvent::FavoriteFailed => {
                self.desired_favorite = self.state.media.favorite;
            }
        }
    }
}
