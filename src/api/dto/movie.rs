//! Query and response DTOs for the per-movie endpoints.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{MovieDetails, MovieId, WatchProviders};

pub const NO_IDS_MESSAGE: &str = "No movie IDs provided";
pub const INVALID_IDS_MESSAGE: &str = "Invalid movie IDs";

/// `?ids=1,2,3`
#[derive(Debug, Deserialize, IntoParams, Validate)]
pub struct MovieIdsQuery {
    /// Comma-separated movie ids; blank segments are ignored
    #[serde(default)]
    #[validate(length(min = 1, message = "No movie IDs provided"))]
    #[param(example = "278,238,424")]
    pub ids: String,
}

impl MovieIdsQuery {
    /// Parse the list, keeping first-seen order and dropping duplicates.
    ///
    /// Any segment that is not an integer rejects the whole request.
    pub fn movie_ids(&self) -> AppResult<Vec<MovieId>> {
        let mut ids = Vec::new();
        let mut seen = HashSet::new();
        for segment in self.ids.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let id = segment
                .parse::<MovieId>()
                .map_err(|_| AppError::validation("ids", INVALID_IDS_MESSAGE))?;
            if seen.insert(id) {
                ids.push(id);
            }
        }

        if ids.is_empty() {
            return Err(AppError::validation("ids", NO_IDS_MESSAGE));
        }
        Ok(ids)
    }
}

/// Movie id → provider structure.
pub type ProvidersResponse = BTreeMap<MovieId, WatchProviders>;

/// Movie id → `{runtime}`.
pub type MovieDetailsResponse = BTreeMap<MovieId, MovieDetails>;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> AppResult<Vec<MovieId>> {
        MovieIdsQuery {
            ids: raw.to_string(),
        }
        .movie_ids()
    }

    fn reason(result: AppResult<Vec<MovieId>>) -> String {
        match result {
            Err(AppError::Validation { reason, .. }) => reason,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parses_and_dedups() {
        assert_eq!(parse("3, 1,,3 ,2,").unwrap(), vec![3, 1, 2]);
    }

    #[test]
    fn test_large_list_dedups_in_first_seen_order() {
        let raw: Vec<String> = (0..5_000).chain(0..5_000).rev().map(|id| id.to_string()).collect();
        let ids = parse(&raw.join(",")).unwrap();
        assert_eq!(ids.len(), 5_000);
        assert_eq!(ids.first(), Some(&4_999));
        assert_eq!(ids.last(), Some(&0));
    }

    #[test]
    fn test_blank_list_has_no_ids() {
        assert_eq!(reason(parse(" , ,")), NO_IDS_MESSAGE);
    }

    #[test]
    fn test_non_integer_rejects_request() {
        assert_eq!(reason(parse("1,two,3")), INVALID_IDS_MESSAGE);
        assert_eq!(reason(parse("1.5")), INVALID_IDS_MESSAGE);
    }

    #[test]
    fn test_empty_raw_value_fails_validation() {
        let query = MovieIdsQuery { ids: String::new() };
        assert!(query.validate().is_err());
    }
}
