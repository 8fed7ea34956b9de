//! Data types for the MoviesDB core
//!
//! This module contains the domain model shared by the decoder, the catalog
//! client and the coordinators. Records coming from the decoder are fully
//! resolved: every field has already been selected according to the
//! record's media type.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Base URL for TMDB images
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Identifier of a movie, tv show or person (unique per media type only)
pub type MediaId = i64;

/// Identifier of a genre
pub type GenreId = u32;

/// Identifier of a TMDB account
pub type AccountId = i64;

/// Kind of media record
///
/// `All` is only meaningful as a query filter (trending, multi search) and
/// never appears on a decoded record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
    Person,
    All,
}

impl MediaType {
    /// Wire name used in paths and payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
            MediaType::Person => "person",
            MediaType::All => "all",
        }
    }

    /// Decode context for this type, or `None` for the query-only `All`
    pub fn decode_context(self) -> Option<MediaType> {
        match self {
            MediaType::All => None,
            concrete => Some(concrete),
        }
    }

    /// Whether TMDB publishes a genre list for this type
    pub fn has_genres(&self) -> bool {
        matches!(self, MediaType::Movie | MediaType::Tv)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time window for trending lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    #[default]
    Day,
    Week,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

/// Image size tokens understood by the TMDB image CDN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    Thumbnail,
    #[default]
    Regular,
    Original,
    Backdrop,
}

impl ImageSize {
    pub fn token(&self) -> &'static str {
        match self {
            ImageSize::Thumbnail => "w220_and_h330_face",
            ImageSize::Regular => "w500",
            ImageSize::Original => "original",
            ImageSize::Backdrop => "w1920_and_h800_multi_faces",
        }
    }
}

/// Build an image URL from a size token and a TMDB image path.
///
/// Returns `None` for an empty path.
///
/// # Examples
/// ```
/// use moviesdb_core::types::{image_url, ImageSize};
///
/// assert_eq!(
///     image_url(ImageSize::Regular, "/abc.jpg").as_deref(),
///     Some("https://image.tmdb.org/t/p/w500/abc.jpg")
/// );
/// assert_eq!(image_url(ImageSize::Regular, ""), None);
/// ```
pub fn image_url(size: ImageSize, path: &str) -> Option<String> {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return None;
    }
    Some(format!("{}/{}/{}", IMAGE_BASE_URL, size.token(), path))
}

/// Unified movie / tv show / person record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaRecord {
    /// TMDB id, unique within its media type
    pub id: MediaId,
    /// Always a concrete type, never `All`
    pub media_type: MediaType,
    /// `title` for movies, `name` for tv shows and people
    pub title: String,
    /// Empty for people
    pub overview: String,
    /// `poster_path` for movies and tv shows, `profile_path` for people
    pub poster_path: String,
    /// Wide background image path; empty when absent
    pub backdrop_path: String,
    /// `vote_average` for movies and tv shows, `popularity` for people
    pub vote_average: f64,
    /// Genre ids from `genre_ids`, or from the `genres` objects on details
    pub genre_ids: Vec<GenreId>,
    /// `release_date` for movies, `first_air_date` for tv shows
    pub release_date: Option<NaiveDate>,
    /// Favorite flag of the current account (`account_states.favorite`)
    pub favorite: bool,
    /// Cast and crew; only filled by a details request
    pub credits: Credits,
    /// Attached videos; only filled by a details request
    pub videos: Vec<Video>,
    /// User reviews; only filled by a details request
    pub reviews: Vec<Review>,
}

impl MediaRecord {
    pub fn poster_url(&self, size: ImageSize) -> Option<String> {
        image_url(size, &self.poster_path)
    }

    pub fn backdrop_url(&self) -> Option<String> {
        image_url(ImageSize::Backdrop, &self.backdrop_path)
    }

    /// First official YouTube trailer, if any
    pub fn trailer(&self) -> Option<&Video> {
        self.videos.iter().find(|video| video.is_trailer())
    }

    /// Identity of the record across media types
    pub fn key(&self) -> (MediaType, MediaId) {
        (self.media_type, self.id)
    }
}

/// Cast member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// TMDB person id
    pub id: MediaId,
    /// Display name
    pub name: String,
    /// Character played
    pub character: String,
    /// Profile image path, if any
    pub profile_path: Option<String>,
}

/// Crew member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crew {
    /// TMDB person id
    pub id: MediaId,
    /// Display name
    pub name: String,
    /// Job on the production (e.g. "Director")
    pub job: String,
    /// Profile image path, if any
    pub profile_path: Option<String>,
}

/// A person credited on a movie or tv show
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Person {
    Actor(Actor),
    Crew(Crew),
}

impl Person {
    pub fn id(&self) -> MediaId {
        match self {
            Person::Actor(actor) => actor.id,
            Person::Crew(crew) => crew.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Person::Actor(actor) => &actor.name,
            Person::Crew(crew) => &crew.name,
        }
    }

    pub fn profile_path(&self) -> Option<&str> {
        match self {
            Person::Actor(actor) => actor.profile_path.as_deref(),
            Person::Crew(crew) => crew.profile_path.as_deref(),
        }
    }

    pub fn profile_url(&self, size: ImageSize) -> Option<String> {
        self.profile_path().and_then(|path| image_url(size, path))
    }
}

/// Cast and crew of a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Credits {
    /// Actors, in billing order
    pub cast: Vec<Person>,
    /// Crew members
    pub crew: Vec<Person>,
}

/// Video attached to a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// TMDB video id
    pub id: String,
    /// Title of the video
    pub name: String,
    /// Provider-side video id (e.g. the YouTube video id)
    pub key: String,
    /// Hosting site (e.g. "YouTube")
    pub site: String,
    /// Video kind (e.g. "Trailer", "Teaser"); wire name `type`
    #[serde(rename = "type")]
    pub kind: String,
    /// Vertical resolution
    pub size: u32,
    /// Published by the rights holder
    pub official: bool,
}

impl Video {
    pub fn is_trailer(&self) -> bool {
        self.site == "YouTube" && self.kind == "Trailer" && self.official
    }
}

/// User review of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// TMDB review id
    pub id: String,
    /// Author name
    pub author: String,
    /// Review text
    pub content: String,
}

/// Genre as returned by the genre list endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Genre id within its media type
    pub id: GenreId,
    /// Localized display name
    pub name: String,
}

/// TMDB account; the default value is the anonymous account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account id; 0 for the anonymous account
    pub id: AccountId,
    /// Login name
    pub username: String,
}

impl Account {
    pub fn is_anonymous(&self) -> bool {
        self.id == 0
    }
}

/// Canonical category list kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListName {
    Popular,
    TopRated,
    NowPlaying,
}

impl ListName {
    pub const ALL: [ListName; 3] = [ListName::Popular, ListName::TopRated, ListName::NowPlaying];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListName::Popular => "popular",
            ListName::TopRated => "top_rated",
            ListName::NowPlaying => "now_playing",
        }
    }
}

/// One category list as held by a screen
#[derive(Debug, Clone, PartialEq)]
pub struct MediaList {
    /// Which category this list holds
    pub name: ListName,
    /// Page to request on the next load (1-based)
    pub page: u32,
    /// Records of the last loaded page
    pub items: Vec<MediaRecord>,
}

impl MediaList {
    /// Create an empty list positioned at page 1
    pub fn new(name: ListName) -> Self {
        Self {
            name,
            page: 1,
            items: Vec::new(),
        }
    }
}

/// Paginated result wrapper for list endpoints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedResult<T> {
    /// Items on the current page
    pub items: Vec<T>,
    /// Current page number (1-based)
    pub current_page: u32,
    /// Total number of pages
    pub total_pages: u32,
    /// Total number of results across all pages
    pub total_results: u32,
}

impl<T> PaginatedResult<T> {
    /// Create a new paginated result
    pub fn new(items: Vec<T>, current_page: u32, total_pages: u32, total_results: u32) -> Self {
        Self {
            items,
            current_page,
            total_pages,
            total_results,
        }
    }

    /// Create an empty result for the first page
    pub fn empty() -> Self {
        Self::new(Vec::new(), 1, 0, 0)
    }

    /// Whether there are more pages available
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }
}
