//! Development fixture: a small watchlist with providers and runtimes.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Value, json};

use crate::cache::{CacheStore, CacheStoreError, Clock, Namespace};
use crate::models::{MovieDetails, MovieId, MovieSummary};

pub const DEV_ACCOUNT_ID: &str = "dev_account";

/// What `seed` wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub movies: usize,
    pub providers: usize,
    pub runtimes: usize,
}

fn fixture_movie(
    id: MovieId,
    title: &str,
    genre_ids: &[i64],
    release_date: &str,
    vote_average: f64,
    poster_path: &str,
) -> MovieSummary {
    MovieSummary {
        id,
        title: title.to_string(),
        overview: String::new(),
        poster_path: Some(poster_path.to_string()),
        backdrop_path: None,
        release_date: release_date.to_string(),
        vote_average,
        genre_ids: genre_ids.to_vec(),
    }
}

pub fn fixture_movies() -> Vec<MovieSummary> {
    vec![
        fixture_movie(278, "The Shawshank Redemption", &[18, 80], "1994-09-23", 8.7, "/q6y0Go1tsGEsmtFryDOJo3dEmqu.jpg"),
        fixture_movie(238, "The Godfather", &[18, 80], "1972-03-14", 8.7, "/3bhkrj58Vtu7enYsRolD1fZdja1.jpg"),
        fixture_movie(240, "The Godfather Part II", &[18, 80], "1974-12-20", 8.6, "/hek3koDUyRQk7FIhPXsa6mT2Zc3.jpg"),
        fixture_movie(424, "Schindler's List", &[18, 36, 10752], "1993-12-15", 8.6, "/sF1U4EUQS8YHUYjNl3pMGNIQyr0.jpg"),
        fixture_movie(389, "12 Angry Men", &[18], "1957-04-10", 8.5, "/ow3wq89wM8qd5X7hWKxiRfsFf9C.jpg"),
    ]
}

fn flatrate(names: &[&str]) -> Value {
    let services: Vec<Value> = names.iter().map(|name| json!({"provider_name": name})).collect();
    json!({"US": {"flatrate": services}})
}

fn fixture_providers() -> HashMap<String, Value> {
    HashMap::from([
        ("278".to_string(), flatrate(&["Netflix", "Amazon Prime Video"])),
        ("238".to_string(), flatrate(&["Paramount Plus"])),
        ("240".to_string(), flatrate(&["Paramount Plus"])),
        ("424".to_string(), flatrate(&["Netflix"])),
        ("389".to_string(), flatrate(&["Amazon Prime Video"])),
    ])
}

fn fixture_runtimes() -> Result<HashMap<String, Value>, CacheStoreError> {
    [(278, 142), (238, 175), (240, 202), (424, 195), (389, 96)]
        .into_iter()
        .map(|(id, runtime): (MovieId, i64)| -> Result<(String, Value), CacheStoreError> {
            let payload = serde_json::to_value(MovieDetails {
                runtime: Some(runtime),
            })?;
            Ok((id.to_string(), payload))
        })
        .collect()
}

/// Reset provider and detail records and write the fixture for `account_id`,
/// every record stamped with one timestamp.
pub async fn seed(
    store: &Arc<dyn CacheStore>,
    clock: &dyn Clock,
    account_id: &str,
) -> Result<SeedReport, CacheStoreError> {
    let now = clock.now();
    let movies = fixture_movies();
    let providers = fixture_providers();
    let runtimes = fixture_runtimes()?;

    let report = SeedReport {
        movies: movies.len(),
        providers: providers.len(),
        runtimes: runtimes.len(),
    };

    store.clear_namespace(Namespace::Providers).await?;
    store.clear_namespace(Namespace::Details).await?;
    store
        .put_one(Namespace::Watchlist, account_id, serde_json::to_value(&movies)?, now)
        .await?;
    store.put_many(Namespace::Providers, providers, now).await?;
    store.put_many(Namespace::Details, runtimes, now).await?;

    tracing::info!(
        account_id,
        movies = report.movies,
        providers = report.providers,
        runtimes = report.runtimes,
        "Development fixture written"
    );
    Ok(report)
}
