//! Songday - a handful of songs for today
//!
//! Picks songs from the iTunes Search API. The daily pick is the same for
//! everybody on a given date; the random pick changes on every call.

/// HTTP routes for the JSON API
pub mod api;
/// Static catalog of search terms and date-derived term selection
pub mod catalog;
/// Client modules for the external search API
pub mod clients;
/// Environment driven configuration
pub mod config;
/// Single active preview clip tracking
pub mod playback;
/// Daily and random song selection
pub mod selector;
/// Seeded shuffle backing the daily pick
pub mod shuffle;

pub use selector::{DailySongSelector, RandomSongSelector};
