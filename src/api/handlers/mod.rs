//! HTTP request handlers for API endpoints.
//!
//! This module contains all request handlers organized by resource type.

pub mod cache;
pub mod diagnostics;
pub mod health;
pub mod movies;
pub mod watchlist;
