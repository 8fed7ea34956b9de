//! Genre lookup
//!
//! Movie and tv genre ids live in separate spaces on TMDB (id 10759 only
//! exists for tv, 28 only for movies), so every index is bound to a single
//! media type.

use std::collections::HashMap;

use crate::types::{Genre, GenreId, MediaType};

/// Genre id → name mapping for one media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreIndex {
    media_type: MediaType,
    names: HashMap<GenreId, String>,
}

impl GenreIndex {
    /// Flatten a genre list into an index for `media_type`
    pub fn new(media_type: MediaType, genres: Vec<Genre>) -> Self {
        let names = genres
            .into_iter()
            .map(|genre| (genre.id, genre.name))
            .collect();
        Self { media_type, names }
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    /// Name from the fetched list only
    pub fn get(&self, id: GenreId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Name from the fetched list, falling back to the static table of the
    /// same media type
    pub fn name(&self, id: GenreId) -> Option<&str> {
        self.get(id)
            .or_else(|| fallback_genre_name(id, self.media_type))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Static genre names used when no list has been fetched.
///
/// `All` tries the movie table first, then the tv table.
///
/// # Examples
/// ```
/// use moviesdb_core::genres::fallback_genre_name;
/// use moviesdb_core::MediaType;
///
/// assert_eq!(fallback_genre_name(28, MediaType::Movie), Some("Action"));
/// assert_eq!(fallback_genre_name(28, MediaType::Tv), None);
/// assert_eq!(fallback_genre_name(10759, MediaType::All), Some("Action & Adventure"));
/// ```
pub fn fallback_genre_name(id: GenreId, media_type: MediaType) -> Option<&'static str> {
    match media_type {
        MediaType::Movie => movie_genre(id),
        MediaType::Tv => tv_genre(id),
        MediaType::Person => None,
        MediaType::All => movie_genre(id).or_else(|| tv_genre(id)),
    }
}

fn movie_genre(id: GenreId) -> Option<&'static str> {
    let name = match id {
        12 => "Adventure",
        14 => "Fantasy",
        16 => "Animation",
        18 => "Drama",
        27 => "Horror",
        28 => "Action",
        35 => "Comedy",
        36 => "History",
        37 => "Western",
        53 => "Thriller",
        80 => "Crime",
        99 => "Documentary",
        878 => "Science Fiction",
        9648 => "Mystery",
        10402 => "Music",
        10749 => "Romance",
        10751 => "Family",
        10752 => "War",
        10770 => "TV Movie",
        _ => return None,
    };
    Some(name)
}

fn tv_genre(id: GenreId) -> Option<&'static str> {
    let name = match id {
        16 => "Animation",
        18 => "Drama",
        35 => "Comedy",
        37 => "Western",
        80 => "Crime",
        99 => "Documentary",
        9648 => "Mystery",
        10751 => "Family",
        10759 => "Action & Adventure",
        10762 => "Kids",
        10763 => "News",
        10764 => "Reality",
        10765 => "Sci-Fi & Fantasy",
        10766 => "Soap",
        10767 => "Talk",
        10768 => "War & Politics",
        _ => return None,
    };
    Some(name)
}
