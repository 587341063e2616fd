/// Data entities for raw search results and normalized songs
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// iTunes Search API client
pub mod itunes;

pub use entities::{RawTrack, Song};
pub use itunes::ItunesClient;

use errors::Result;

/// A music search backend queried once per catalog term
pub trait SearchClient {
    /// Search for up to `limit` tracks matching `term`
    fn search(
        &self,
        term: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<RawTrack>>> + Send;
}
