use std::sync::Arc;

use moviesdb_core::{DetailsCoordinator, HomeCoordinator, ImageSize, TmdbCatalog};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let catalog = Arc::new(TmdbCatalog::from_env()?);

    let mut home = HomeCoordinator::new(catalog.clone());
    home.load();
    home.process_next().await;

    if let Some(error) = &home.state().last_error {
        eprintln!("Load failed: {error}");
        return Ok(());
    }

    println!("Trending today:");
    for (i, item) in home.state().trending.iter().take(10).enumerate() {
        println!("  {}. {} [{}] {:.1}", i + 1, item.title, item.media_type, item.vote_average);
    }

    println!("\nPopular movies:");
    for movie in home.state().movies.iter().take(5) {
        let year = movie.release_date.map(|d| d.format("%Y").to_string()).unwrap_or_default();
        println!("  {} ({}) {}", movie.title, year, movie.poster_url(ImageSize::Thumbnail).unwrap_or_default());
    }

    let query = std::env::args().nth(1).unwrap_or_else(|| "dune".to_string());
    println!("\nSearching '{query}'...");
    home.search_query_changed(query);
    if home.state().is_searching() {
        home.process_next().await;
    }
    for show in home.state().tv_shows.iter().take(5) {
        println!("  tv: {}", show.title);
    }
    for movie in home.state().movies.iter().take(5) {
        println!("  movie: {}", movie.title);
    }

    if let Some(first) = home.state().movies.first().cloned() {
        let mut details = DetailsCoordinator::new(catalog, first);
        details.load();
        details.process_next().await;

        let state = details.state();
        println!("\n{}", state.media.title);
        println!("  Genres: {}", state.genre_names().join(", "));
        println!("  Favorite: {}", state.media.favorite);
        if let Some(key) = state.trailer_key() {
            println!("  Trailer: https://www.youtube.com/watch?v={key}");
        }
        for person in state.media.credits.cast.iter().take(5) {
            println!("  Cast: {}", person.name());
        }
    }

    Ok(())
}
