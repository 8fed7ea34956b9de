//! TMDB endpoint routing
//!
//! Pure functions mapping catalog operations to [`ApiRequest`]s. Argument
//! validation happens here so that an invalid combination never reaches the
//! network.

use serde_json::json;

use crate::client::ApiRequest;
use crate::error::{RequestError, Result};
use crate::types::{AccountId, ListName, MediaId, MediaRecord, MediaType, TimeWindow};

/// Sub-resources appended to every details request
pub const DETAILS_APPENDICES: &str = "account_states,credits,videos,reviews";

fn require_page(page: u32) -> Result<()> {
    if page == 0 {
        return Err(RequestError::BadUrl("page must be >= 1".to_string()));
    }
    Ok(())
}

fn require_movie_or_tv(media_type: MediaType, operation: &str) -> Result<()> {
    if !matches!(media_type, MediaType::Movie | MediaType::Tv) {
        return Err(RequestError::BadUrl(format!(
            "{operation} requires movie or tv, got {media_type}"
        )));
    }
    Ok(())
}

pub fn account() -> ApiRequest {
    ApiRequest::get("/account")
}

pub fn trending(media_type: MediaType, window: TimeWindow) -> ApiRequest {
    ApiRequest::get(format!("/trending/{}/{}", media_type, window.as_str()))
}

/// Category list request.
///
/// Now playing for tv shows lives under `airing_today`.
pub fn list(name: ListName, media_type: MediaType, page: u32) -> Result<ApiRequest> {
    require_movie_or_tv(media_type, "list")?;
    require_page(page)?;

    let path = match (name, media_type) {
        (ListName::NowPlaying, MediaType::Tv) => "/tv/airing_today".to_string(),
        _ => format!("/{}/{}", media_type, name.as_str()),
    };
    Ok(ApiRequest::get(path).query("page", page))
}

/// Search request; `All` searches across every type via `/search/multi`.
pub fn search(media_type: MediaType, query: &str, page: u32) -> Result<ApiRequest> {
    let query = query.trim();
    if query.is_empty() {
        return Err(RequestError::BadUrl("search query cannot be empty".to_string()));
    }
    require_page(page)?;

    let target = match media_type {
        MediaType::All => "multi",
        concrete => concrete.as_str(),
    };
    Ok(ApiRequest::get(format!("/search/{target}"))
        .query("query", query)
        .query("page", page))
}

pub fn details(media_type: MediaType, id: MediaId) -> Result<ApiRequest> {
    if media_type == MediaType::All {
        return Err(RequestError::BadUrl("details requires a concrete media type".to_string()));
    }
    Ok(ApiRequest::get(format!("/{media_type}/{id}")).query("append_to_response", DETAILS_APPENDICES))
}

pub fn favorite_movies(account: AccountId) -> ApiRequest {
    ApiRequest::get(format!("/account/{account}/favorite/movies"))
}

pub fn favorite_tv_shows(account: AccountId) -> ApiRequest {
    ApiRequest::get(format!("/account/{account}/favorite/tv"))
}

/// Request flipping the favorite flag of `record`
pub fn toggle_favorite(record: &MediaRecord, account: AccountId) -> Result<ApiRequest> {
    require_movie_or_tv(record.media_type, "favorite")?;
    Ok(
        ApiRequest::post(format!("/account/{account}/favorite")).json(json!({
            "media_type": record.media_type,
            "media_id": record.id,
            "favorite": !record.favorite,
        })),
    )
}

pub fn genres(media_type: MediaType) -> Result<ApiRequest> {
    require_movie_or_tv(media_type, "genres")?;
    Ok(ApiRequest::get(format!("/genre/{media_type}/list")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode_media;
    use reqwest::Method;

    fn record(media_type: MediaType, favorite: bool) -> MediaRecord {
        let json = json!({
            "id": 550,
            "title": "Fight Club",
            "name": "Fight Club",
            "overview": "",
            "vote_average": 8.4,
            "popularity": 1.0,
            "account_states": { "favorite": favorite }
        });
        decode_media(&serde_json::to_vec(&json).unwrap(), Some(media_type)).unwrap()
    }

    #[test]
    fn test_now_playing_tv_routes_to_airing_today() {
        let request = list(ListName::NowPlaying, MediaType::Tv, 1).unwrap();
        assert_eq!(request.path, "/tv/airing_today");
        assert_eq!(request.query_value("page"), Some("1"));
    }

    #[test]
    fn test_now_playing_movie_routes_to_now_playing() {
        let request = list(ListName::NowPlaying, MediaType::Movie, 1).unwrap();
        assert_eq!(request.path, "/movie/now_playing");
    }

    #[test]
    fn test_list_paths() {
        assert_eq!(list(ListName::Popular, MediaType::Tv, 1).unwrap().path, "/tv/popular");
        assert_eq!(
            list(ListName::TopRated, MediaType::Movie, 3).unwrap().path,
            "/movie/top_rated"
        );
        assert_eq!(
            list(ListName::TopRated, MediaType::Movie, 3).unwrap().query_value("page"),
            Some("3")
        );
    }

    #[test]
    fn test_list_rejects_invalid_arguments() {
        assert!(matches!(
            list(ListName::Popular, MediaType::Person, 1),
            Err(RequestError::BadUrl(_))
        ));
        assert!(list(ListName::Popular, MediaType::All, 1).is_err());
        assert!(list(ListName::Popular, MediaType::Movie, 0).is_err());
    }

    #[test]
    fn test_trending_path() {
        assert_eq!(trending(MediaType::All, TimeWindow::Day).path, "/trending/all/day");
        assert_eq!(trending(MediaType::Tv, TimeWindow::Week).path, "/trending/tv/week");
    }

    #[test]
    fn test_search_routes() {
        let multi = search(MediaType::All, "dune", 1).unwrap();
        assert_eq!(multi.path, "/search/multi");
        assert_eq!(multi.query_value("query"), Some("dune"));
        assert_eq!(search(MediaType::Movie, "dune", 1).unwrap().path, "/search/movie");
        assert_eq!(search(MediaType::Tv, "dune", 2).unwrap().path, "/search/tv");
        assert_eq!(search(MediaType::Person, "dune", 1).unwrap().path, "/search/person");
    }

    #[test]
    fn test_search_rejects_blank_query() {
        assert!(matches!(
            search(MediaType::Movie, "  ", 1),
            Err(RequestError::BadUrl(msg)) if msg.contains("empty")
        ));
    }

    #[test]
    fn test_details_appends_sub_resources() {
        let request = details(MediaType::Movie, 550).unwrap();
        assert_eq!(request.path, "/movie/550");
        assert_eq!(
            request.query_value("append_to_response"),
            Some("account_states,credits,videos,reviews")
        );
        assert!(details(MediaType::All, 550).is_err());
    }

    #[test]
    fn test_favorite_list_paths() {
        assert_eq!(favorite_movies(42).path, "/account/42/favorite/movies");
        assert_eq!(favorite_tv_shows(42).path, "/account/42/favorite/tv");
    }

    #[test]
    fn test_toggle_favorite_body_inverts_flag() {
        let request = toggle_favorite(&record(MediaType::Movie, false), 42).unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/account/42/favorite");
        assert_eq!(
            request.body,
            Some(json!({ "media_type": "movie", "media_id": 550, "favorite": true }))
        );

        let request = toggle_favorite(&record(MediaType::Tv, true), 42).unwrap();
        assert_eq!(
            request.body,
            Some(json!({ "media_type": "tv", "media_id": 550, "favorite": false }))
        );
    }

    #[test]
    fn test_toggle_favorite_rejects_people() {
        assert!(toggle_favorite(&record(MediaType::Person, false), 42).is_err());
    }

    #[test]
    fn test_genres_path() {
        assert_eq!(genres(MediaType::Movie).unwrap().path, "/genre/movie/list");
        assert_eq!(genres(MediaType::Tv).unwrap().path, "/genre/tv/list");
        assert!(genres(MediaType::All).is_err());
    }
}
