use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// Cover used when the search API returns a track without artwork
pub const DEFAULT_COVER: &str = "https://via.placeholder.com/300x300/1DB954/ffffff?text=%F0%9F%8E%B5";

const SPOTIFY_SEARCH_URL: &str = "https://open.spotify.com/search/";

// Characters left as-is by a URI component encoder
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Track record as returned by the search API
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawTrack {
    pub track_id: u64,
    pub track_name: String,
    pub artist_name: String,
    #[serde(default)]
    pub collection_name: Option<String>,
    #[serde(default)]
    pub artwork_url100: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
}

/// Envelope of a search API response
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub result_count: usize,
    // missing array means nothing matched
    #[serde(default)]
    pub results: Vec<RawTrack>,
}

/// Normalized song handed to the presentation layer
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub cover: String,
    pub preview_url: Option<String>,
    pub spotify_url: String,
}

impl From<RawTrack> for Song {
    fn from(t: RawTrack) -> Song {
        let spotify_url = spotify_search_url(&t.track_name, &t.artist_name);
        Song {
            album: t
                .collection_name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "Single".to_string()),
            cover: t
                .artwork_url100
                .as_deref()
                .map_or_else(|| DEFAULT_COVER.to_string(), upscale_artwork),
            preview_url: t.preview_url.filter(|url| !url.is_empty()),
            spotify_url,
            title: t.track_name,
            artist: t.artist_name,
        }
    }
}

/// Swap the 100x100 artwork token for the 600x600 rendition
pub fn upscale_artwork(url: &str) -> String {
    url.replacen("100x100", "600x600", 1)
}

/// Deep link into Spotify's search for a title and artist
pub fn spotify_search_url(title: &str, artist: &str) -> String {
    let query = format!("{title} {artist}");
    format!(
        "{SPOTIFY_SEARCH_URL}{}",
        utf8_percent_encode(&query, URI_COMPONENT)
    )
}
