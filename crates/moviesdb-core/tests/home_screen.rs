//! Home screen flow over the real HTTP stack

use std::sync::Arc;
use std::time::Duration;

use moviesdb_core::{ClientConfig, HomeCoordinator, TmdbCatalog, TmdbClient, Token};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page(results: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "page": 1, "results": results }))
}

fn movie(id: i64, title: &str) -> Value {
    json!({ "id": id, "title": title, "overview": "", "vote_average": 7.0 })
}

fn show(id: i64, name: &str) -> Value {
    json!({ "id": id, "name": name, "overview": "", "vote_average": 8.0 })
}

async fn home(server: &MockServer) -> HomeCoordinator {
    let config = ClientConfig::default().with_api_base(server.uri());
    let client = TmdbClient::with_config(Token::new("test-token").unwrap(), config).unwrap();
    HomeCoordinator::new(Arc::new(TmdbCatalog::with_client(client)))
        .with_debounce(Duration::from_millis(20))
}

async fn mount_baseline(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/trending/all/day"))
        .respond_with(page(json!([
            { "id": 1, "media_type": "movie", "title": "Dune", "overview": "", "vote_average": 7.8 }
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/popular"))
        .respond_with(page(json!([movie(10, "Oppenheimer")])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tv/popular"))
        .respond_with(page(json!([show(20, "The Bear")])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_load_then_search_then_clear() {
    let server = MockServer::start().await;
    mount_baseline(&server).await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("query", "alien"))
        .respond_with(page(json!([movie(30, "Alien")])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/tv"))
        .and(query_param("query", "alien"))
        .respond_with(page(json!([show(40, "Alien: Earth")])))
        .expect(1)
        .mount(&server)
        .await;

    let mut home = home(&server).await;
    home.load();
    home.process_next().await;
    assert_eq!(home.state().trending[0].title, "Dune");
    assert_eq!(home.state().movies[0].title, "Oppenheimer");
    assert_eq!(home.state().tv_shows[0].title, "The Bear");

    home.search_query_changed("alien");
    home.process_next().await;
    assert_eq!(home.state().movies[0].title, "Alien");
    assert_eq!(home.state().tv_shows[0].title, "Alien: Earth");

    home.search_canceled();
    assert_eq!(home.state().movies[0].title, "Oppenheimer");
    assert_eq!(home.state().tv_shows[0].title, "The Bear");
}

#[tokio::test]
async fn test_one_failing_branch_fails_the_whole_load() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trending/all/day"))
        .respond_with(page(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movie/popular"))
        .respond_with(page(json!([movie(10, "Oppenheimer")])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tv/popular"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status_code": 7,
            "status_message": "Invalid API key: You must be granted a valid key."
        })))
        .mount(&server)
        .await;

    let mut home = home(&server).await;
    home.load();
    home.process_next().await;

    let state = home.state();
    assert!(!state.is_loading);
    assert!(state.movies.is_empty());
    assert!(state.popular_movies.is_empty());
    assert!(state.last_error.as_deref().unwrap().contains("HTTP 401"));
}

#[tokio::test]
async fn test_failed_search_still_reports_back() {
    let server = MockServer::start().await;
    mount_baseline(&server).await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/tv"))
        .respond_with(page(json!([show(40, "Alien: Earth")])))
        .mount(&server)
        .await;

    let mut home = home(&server).await;
    home.load();
    home.process_next().await;

    home.search_query_changed("alien");
    tokio::time::timeout(Duration::from_secs(5), home.process_next())
        .await
        .expect("failed search must still produce an event");

    assert!(home.state().is_searching());
    assert_eq!(home.state().movies[0].title, "Oppenheimer");
    assert_eq!(home.state().last_error, None);
}
