//! Media record decoder
//!
//! TMDB returns movies, tv shows and people with different field names for
//! the same concept. The payload is first read into a permissive raw shape,
//! then the effective media type selects which raw fields populate the
//! record.

use serde::Deserialize;

use super::date::parse_date;
use crate::error::DecodeError;
use crate::types::{
    Actor, Credits, Crew, Genre, GenreId, MediaId, MediaRecord, MediaType, PaginatedResult,
    Person, Review, Video,
};

#[derive(Debug, Deserialize)]
struct RawMedia {
    id: Option<MediaId>,
    media_type: Option<MediaType>,
    // movie
    title: Option<String>,
    release_date: Option<String>,
    // tv / person
    name: Option<String>,
    first_air_date: Option<String>,
    // person
    profile_path: Option<String>,
    popularity: Option<f64>,
    // shared
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    vote_average: Option<f64>,
    genre_ids: Option<Vec<GenreId>>,
    genres: Option<Vec<Genre>>,
    // appended on details
    account_states: Option<RawAccountStates>,
    credits: Option<RawCredits>,
    videos: Option<RawResults<Video>>,
    reviews: Option<RawResults<Review>>,
}

#[derive(Debug, Deserialize)]
struct RawAccountStates {
    favorite: bool,
}

#[derive(Debug, Deserialize)]
struct RawCredits {
    #[serde(default)]
    cast: Vec<Actor>,
    #[serde(default)]
    crew: Vec<Crew>,
}

#[derive(Debug, Deserialize)]
struct RawResults<T> {
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    results: Vec<RawMedia>,
    page: u32,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    total_results: u32,
}

/// Decode a single media record.
///
/// # Arguments
/// * `raw` - JSON payload of one movie, tv show or person
/// * `context` - Media type to assume when the payload carries no
///   `media_type` field; `All` counts as no context
///
/// # Errors
/// * `DecodeError::MediaTypeNotFound` if neither the payload nor the context
///   names a concrete type
/// * `DecodeError::MissingField` if a field required by the type is absent
/// * `DecodeError::MalformedField` for an invalid date
/// * `DecodeError::Json` for invalid JSON or a wrongly shaped nested object
///
/// # Examples
/// ```
/// use moviesdb_core::decoder::decode_media;
/// use moviesdb_core::MediaType;
///
/// let json = br#"{"id": 1, "name": "Dark", "overview": "", "vote_average": 8.4}"#;
/// let show = decode_media(json, Some(MediaType::Tv)).unwrap();
/// assert_eq!(show.title, "Dark");
/// assert!(decode_media(json, None).is_err());
/// ```
pub fn decode_media(raw: &[u8], context: Option<MediaType>) -> Result<MediaRecord, DecodeError> {
    let media: RawMedia = serde_json::from_slice(raw)?;
    resolve(media, context)
}

/// Decode a paginated list, applying the same context to every item.
pub fn decode_page(
    raw: &[u8],
    context: Option<MediaType>,
) -> Result<PaginatedResult<MediaRecord>, DecodeError> {
    let page: RawPage = serde_json::from_slice(raw)?;
    let items = page
        .results
        .into_iter()
        .map(|media| resolve(media, context))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PaginatedResult::new(
        items,
        page.page,
        page.total_pages,
        page.total_results,
    ))
}

fn effective_type(
    embedded: Option<MediaType>,
    context: Option<MediaType>,
) -> Result<MediaType, DecodeError> {
    match embedded.or(context.and_then(MediaType::decode_context)) {
        Some(MediaType::All) | None => Err(DecodeError::MediaTypeNotFound),
        Some(concrete) => Ok(concrete),
    }
}

fn required<T>(value: Option<T>, field: &'static str, media_type: MediaType) -> Result<T, DecodeError> {
    value.ok_or(DecodeError::MissingField { field, media_type })
}

fn resolve(raw: RawMedia, context: Option<MediaType>) -> Result<MediaRecord, DecodeError> {
    let media_type = effective_type(raw.media_type, context)?;

    let (title, overview, poster_path, vote_average, release_date) = match media_type {
        MediaType::Movie => (
            required(raw.title, "title", media_type)?,
            required(raw.overview, "overview", media_type)?,
            raw.poster_path,
            required(raw.vote_average, "vote_average", media_type)?,
            parse_date("release_date", raw.release_date.as_deref())?,
        ),
        MediaType::Tv => (
            required(raw.name, "name", media_type)?,
            required(raw.overview, "overview", media_type)?,
            raw.poster_path,
            required(raw.vote_average, "vote_average", media_type)?,
            parse_date("first_air_date", raw.first_air_date.as_deref())?,
        ),
        MediaType::Person => (
            required(raw.name, "name", media_type)?,
            String::new(),
            raw.profile_path,
            required(raw.popularity, "popularity", media_type)?,
            None,
        ),
        MediaType::All => return Err(DecodeError::MediaTypeNotFound),
    };

    let genre_ids = match (raw.genre_ids, raw.genres) {
        (Some(ids), _) => ids,
        (None, Some(genres)) => genres.into_iter().map(|genre| genre.id).collect(),
        (None, None) => Vec::new(),
    };

    let credits = raw
        .credits
        .map(|credits| Credits {
            cast: credits.cast.into_iter().map(Person::Actor).collect(),
            crew: credits.crew.into_iter().map(Person::Crew).collect(),
        })
        .unwrap_or_default();

    Ok(MediaRecord {
        id: required(raw.id, "id", media_type)?,
        media_type,
        title,
        overview,
        poster_path: poster_path.unwrap_or_default(),
        backdrop_path: raw.backdrop_path.unwrap_or_default(),
        vote_average,
        genre_ids,
        release_date,
        favorite: raw.account_states.is_some_and(|states| states.favorite),
        credits,
        videos: raw.videos.map(|videos| videos.results).unwrap_or_default(),
        reviews: raw.reviews.map(|reviews| reviews.results).unwrap_or_default(),
    })
}
