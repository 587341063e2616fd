//! Song selection: query the search backend per term, merge, dedup, shuffle.

use std::collections::HashSet;

use chrono::NaiveDate;
use futures::future::join_all;
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::catalog;
use crate::clients::{
    RawTrack, SearchClient, Song,
    errors::{Error, Result},
};
use crate::shuffle::seeded_shuffle;

/// Per-term result limit for the daily picks
pub const DAILY_LIMIT: u32 = 30;
/// Per-term result limit for random picks
pub const RANDOM_LIMIT: u32 = 25;

/// Query every term concurrently and concatenate the successful results.
///
/// Results keep term order, and each term's own order. A failing term is
/// logged and skipped; only an empty merge is an error.
pub async fn fetch_merged<C>(client: &C, terms: &[&str], limit: u32) -> Result<Vec<RawTrack>>
where
    C: SearchClient + Sync,
{
    let results = join_all(
        terms
            .iter()
            .map(|&term| async move { (term, client.search(term, limit).await) }),
    )
    .await;

    let mut merged = Vec::new();
    for (term, result) in results {
        match result {
            Ok(tracks) => {
                debug!("Term {term:?} returned {} tracks", tracks.len());
                merged.extend(tracks);
            }
            Err(e) => warn!("Search for {term:?} failed: {e}"),
        }
    }

    if merged.is_empty() {
        return Err(Error::NoResultsError);
    }
    Ok(merged)
}

/// Keep the first track seen for each track id, preserving order
pub fn dedup_by_track_id(tracks: Vec<RawTrack>) -> Vec<RawTrack> {
    let mut seen = HashSet::with_capacity(tracks.len());
    tracks
        .into_iter()
        .filter(|t| seen.insert(t.track_id))
        .collect()
}

fn pick(tracks: Vec<RawTrack>, count: usize) -> Vec<Song> {
    tracks.into_iter().take(count).map(Song::from).collect()
}

/// Picks the same songs for everybody on a given day
pub struct DailySongSelector<C> {
    client: C,
}

impl<C> DailySongSelector<C>
where
    C: SearchClient + Sync,
{
    pub fn new(client: C) -> Self {
        DailySongSelector { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Up to `count` songs for `date`, stable for a given set of search results
    pub async fn select(&self, date: NaiveDate, count: usize) -> Result<Vec<Song>> {
        let seed = catalog::daily_seed(date);
        let terms = catalog::daily_terms(date);
        info!("Selecting {count} songs for {date} from {terms:?}");

        let merged = fetch_merged(&self.client, &terms, DAILY_LIMIT).await?;
        let mut tracks = dedup_by_track_id(merged);
        debug!("{} distinct tracks for {date}", tracks.len());
        seeded_shuffle(&mut tracks, seed);

        Ok(pick(tracks, count))
    }
}

/// Picks a fresh random mix on every call
pub struct RandomSongSelector<C> {
    client: C,
}

impl<C> RandomSongSelector<C>
where
    C: SearchClient + Sync,
{
    pub fn new(client: C) -> Self {
        RandomSongSelector { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn select(&self, count: usize) -> Result<Vec<Song>> {
        let mut rng = StdRng::from_os_rng();
        self.select_with_rng(&mut rng, count).await
    }

    // Same as select, with the caller's generator driving term choice and order
    pub async fn select_with_rng<R>(&self, rng: &mut R, count: usize) -> Result<Vec<Song>>
    where
        R: Rng + Send,
    {
        let terms = catalog::random_terms(rng, catalog::TERMS_PER_SELECTION);
        info!("Selecting {count} random songs from {terms:?}");

        let merged = fetch_merged(&self.client, &terms, RANDOM_LIMIT).await?;
        let mut tracks = dedup_by_track_id(merged);
        tracks.shuffle(rng);

        Ok(pick(tracks, count))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use pretty_assertions::assert_eq;

    pub(crate) fn track(id: u64, name: &str) -> RawTrack {
        RawTrack {
            track_id: id,
            track_name: name.to_string(),
            artist_name: format!("Artist {id}"),
            collection_name: None,
            artwork_url100: Some(format!("https://art.example/{id}/100x100bb.jpg")),
            preview_url: Some(format!("https://audio.example/{id}.m4a")),
        }
    }

    pub(crate) fn tracks(ids: std::ops::Range<u64>) -> Vec<RawTrack> {
        ids.map(|id| track(id, &format!("Song {id}"))).collect()
    }

    /// In-memory search backend. `None` responses fail like a dropped request.
    #[derive(Default)]
    pub(crate) struct StubClient {
        responses: HashMap<String, Option<Vec<RawTrack>>>,
        fallback: Option<Vec<RawTrack>>,
        calls: Mutex<Vec<(String, u32)>>,
    }

    impl StubClient {
        pub(crate) fn respond(mut self, term: &str, tracks: Vec<RawTrack>) -> Self {
            self.responses.insert(term.to_string(), Some(tracks));
            self
        }

        pub(crate) fn fail(mut self, term: &str) -> Self {
            self.responses.insert(term.to_string(), None);
            self
        }

        // answer unknown terms with these tracks instead of an empty list
        pub(crate) fn otherwise(mut self, tracks: Vec<RawTrack>) -> Self {
            self.fallback = Some(tracks);
            self
        }

        pub(crate) fn calls(&self) -> Vec<(String, u32)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl SearchClient for StubClient {
        async fn search(&self, term: &str, limit: u32) -> Result<Vec<RawTrack>> {
            self.calls.lock().unwrap().push((term.to_string(), limit));
            match self.responses.get(term) {
                Some(Some(tracks)) => Ok(tracks.clone()),
                Some(None) => Err(Error::TransportError("HTTP 503 Service Unavailable".into())),
                None => Ok(self.fallback.clone().unwrap_or_default()),
            }
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn daily_stub() -> StubClient {
        StubClient::default()
            .respond("electronic dance", tracks(0..12))
            .respond("soul motown", tracks(8..20))
            .respond("reggae", tracks(30..40))
    }

    #[tokio::test]
    async fn merge_keeps_term_order() {
        let client = StubClient::default()
            .respond("a", tracks(0..2))
            .respond("b", tracks(10..12));
        let merged = fetch_merged(&client, &["b", "a"], 30).await.unwrap();
        let ids: Vec<_> = merged.iter().map(|t| t.track_id).collect();
        assert_eq!(ids, vec![10, 11, 0, 1]);
    }

    #[tokio::test]
    async fn merge_fails_when_everything_is_empty() {
        let client = StubClient::default();
        let err = fetch_merged(&client, &["a", "b"], 30).await.unwrap_err();
        assert!(matches!(err, Error::NoResultsError));
    }

    #[tokio::test]
    async fn merge_fails_when_every_query_fails() {
        let client = StubClient::default().fail("a").fail("b");
        let err = fetch_merged(&client, &["a", "b"], 30).await.unwrap_err();
        assert!(matches!(err, Error::NoResultsError));
    }

    #[tokio::test]
    async fn merge_tolerates_partial_failure() {
        let client = StubClient::default()
            .fail("a")
            .respond("b", tracks(0..3))
            .respond("c", tracks(3..5));
        let merged = fetch_merged(&client, &["a", "b", "c"], 30).await.unwrap();
        assert_eq!(merged, tracks(0..5));
        assert_eq!(client.calls().len(), 3);
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let input = vec![
            track(1, "first"),
            track(2, "two"),
            track(1, "second"),
            track(3, "three"),
            track(2, "again"),
        ];
        let out = dedup_by_track_id(input);
        let names: Vec<_> = out.iter().map(|t| t.track_name.as_str()).collect();
        assert_eq!(names, vec!["first", "two", "three"]);
    }

    #[tokio::test]
    async fn daily_queries_date_terms_with_daily_limit() {
        let selector = DailySongSelector::new(daily_stub());
        selector.select(day(), 5).await.unwrap();
        assert_eq!(
            selector.client().calls(),
            vec![
                ("electronic dance".to_string(), DAILY_LIMIT),
                ("soul motown".to_string(), DAILY_LIMIT),
                ("reggae".to_string(), DAILY_LIMIT),
            ]
        );
    }

    #[tokio::test]
    async fn daily_is_deterministic() {
        let a = DailySongSelector::new(daily_stub())
            .select(day(), 5)
            .await
            .unwrap();
        let b = DailySongSelector::new(daily_stub())
            .select(day(), 5)
            .await
            .unwrap();
        assert_eq!(a.len(), 5);
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn daily_is_dedup_then_seeded_shuffle() {
        let selector = DailySongSelector::new(daily_stub());
        let songs = selector.select(day(), 4).await.unwrap();

        let mut expected = tracks(0..20);
        expected.extend(tracks(30..40));
        seeded_shuffle(&mut expected, 20_240_315);
        let expected: Vec<Song> = expected.into_iter().take(4).map(Song::from).collect();
        assert_eq!(songs, expected);
    }

    #[tokio::test]
    async fn daily_output_is_bounded() {
        let selector = DailySongSelector::new(daily_stub());
        // 12 + 12 + 10 tracks, 4 shared ids
        assert_eq!(selector.select(day(), 100).await.unwrap().len(), 30);
        assert_eq!(selector.select(day(), 3).await.unwrap().len(), 3);
        assert!(selector.select(day(), 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn daily_has_no_duplicate_tracks() {
        let client = StubClient::default().otherwise(tracks(0..10));
        let songs = DailySongSelector::new(client)
            .select(day(), 30)
            .await
            .unwrap();
        assert_eq!(songs.len(), 10);
        let titles: HashSet<_> = songs.iter().map(|s| s.title.clone()).collect();
        assert_eq!(titles.len(), 10);
    }

    #[tokio::test]
    async fn daily_uses_successful_terms_only() {
        let client = StubClient::default()
            .fail("electronic dance")
            .respond("soul motown", tracks(0..4))
            .respond("reggae", tracks(4..6));
        let songs = DailySongSelector::new(client)
            .select(day(), 10)
            .await
            .unwrap();
        assert_eq!(songs.len(), 6);
    }

    #[tokio::test]
    async fn daily_fails_without_results() {
        let err = DailySongSelector::new(StubClient::default())
            .select(day(), 5)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NoResultsError));
    }

    #[tokio::test]
    async fn random_queries_three_distinct_terms() {
        let selector = RandomSongSelector::new(StubClient::default().otherwise(tracks(0..40)));
        let songs = selector.select(5).await.unwrap();
        assert_eq!(songs.len(), 5);

        let calls = selector.client().calls();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|(_, limit)| *limit == RANDOM_LIMIT));
        let terms: HashSet<_> = calls.iter().map(|(term, _)| term.clone()).collect();
        assert_eq!(terms.len(), 3);
    }

    #[tokio::test]
    async fn random_is_reproducible_with_same_rng() {
        let selector = RandomSongSelector::new(StubClient::default().otherwise(tracks(0..40)));
        let a = selector
            .select_with_rng(&mut StdRng::seed_from_u64(9), 5)
            .await
            .unwrap();
        let b = selector
            .select_with_rng(&mut StdRng::seed_from_u64(9), 5)
            .await
            .unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn random_fails_without_results() {
        let err = RandomSongSelector::new(StubClient::default())
            .select(5)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NoResultsError));
    }

    fn assert_send<T: Send>(_: T) {}

    #[test]
    fn selection_futures_are_send() {
        let client = crate::clients::ItunesClient::new("http://localhost", reqwest::Client::new());
        let daily = DailySongSelector::new(client.clone());
        let random = RandomSongSelector::new(client);
        // never polled, only type checked
        assert_send(daily.select(day(), 5));
        assert_send(random.select(5));
        assert_send(fetch_merged(daily.client(), &["jazz", "metal"], DAILY_LIMIT));
    }
}
