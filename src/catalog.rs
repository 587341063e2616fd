//! Genre and mood terms used to seed searches.
//!
//! The daily picks are derived from the calendar date alone, so everybody
//! asking on the same day searches the same terms.

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use rand::seq::index;

/// Ordered catalog of search terms. Order matters for daily selection.
pub const SEARCH_TERMS: [&str; 30] = [
    "pop hits",
    "rock classics",
    "hip hop",
    "r&b soul",
    "indie",
    "electronic dance",
    "latin reggaeton",
    "country music",
    "jazz",
    "alternative rock",
    "k-pop",
    "afrobeats",
    "funk disco",
    "punk rock",
    "trap",
    "lo-fi",
    "blues guitar",
    "metal",
    "reggae",
    "folk acoustic",
    "house music",
    "drill rap",
    "soul motown",
    "grunge",
    "synthwave",
    "bossa nova",
    "new wave",
    "psychedelic",
    "gospel",
    "ambient chill",
];

/// Number of terms picked per selection
pub const TERMS_PER_SELECTION: usize = 3;

/// `year * 10000 + month * 100 + day`, month starting at 1
pub fn daily_seed(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 10_000 + i64::from(date.month()) * 100 + i64::from(date.day())
}

/// Catalog positions for a seed, before deduplication
pub fn daily_indices(seed: i64, len: usize) -> [usize; TERMS_PER_SELECTION] {
    let len = i64::try_from(len.max(1)).unwrap_or(i64::MAX);
    // rem_euclid keeps seeds from negative years in range
    let at = |n: i64| usize::try_from(n.rem_euclid(len)).unwrap_or_default();
    // wrapping keeps arbitrary seeds from overflowing; dates never get near it
    [
        at(seed),
        at(seed.wrapping_mul(3).wrapping_add(7)),
        at(seed.wrapping_mul(7).wrapping_add(13)),
    ]
}

/// Distinct terms for a date, in first-seen order
pub fn daily_terms(date: NaiveDate) -> Vec<&'static str> {
    let mut terms = Vec::with_capacity(TERMS_PER_SELECTION);
    for idx in daily_indices(daily_seed(date), SEARCH_TERMS.len()) {
        let term = SEARCH_TERMS[idx];
        if !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

/// `amount` distinct terms drawn uniformly without replacement
pub fn random_terms<R: Rng + ?Sized>(rng: &mut R, amount: usize) -> Vec<&'static str> {
    let amount = amount.min(SEARCH_TERMS.len());
    index::sample(rng, SEARCH_TERMS.len(), amount)
        .into_iter()
        .map(|idx| SEARCH_TERMS[idx])
        .collect()
}
