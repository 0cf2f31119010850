//! Search Projection - live filtering of the catalog by a text query.
//!
//! The projection is a pure, stable filter: the result is always a
//! subsequence of the input in original order. [`SearchBox`] owns the query
//! string; results are recomputed on every read rather than cached, so they
//! can never lag behind the query.

use spark_signals::{signal, Signal};

use crate::catalog::{ContentCatalog, Searchable, Track, Workshop};

// =============================================================================
// PROJECTION
// =============================================================================

/// Check whether a blank query should disable filtering.
pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

/// Case-insensitive substring match against title or any topic.
///
/// `needle` must already be lowercased.
fn matches_lowered<T: Searchable + ?Sized>(item: &T, needle: &str) -> bool {
    item.title().to_lowercase().contains(needle)
        || item
            .topics()
            .iter()
            .any(|topic| topic.to_lowercase().contains(needle))
}

/// Check a single item against a query.
///
/// Blank queries match everything.
pub fn matches<T: Searchable + ?Sized>(item: &T, query: &str) -> bool {
    is_blank(query) || matches_lowered(item, &query.to_lowercase())
}

/// Filter `items` by `query`, preserving order.
///
/// An empty or whitespace-only query returns every item.
pub fn filter<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    if is_blank(query) {
        return items.iter().collect();
    }
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| matches_lowered(*item, &needle))
        .collect()
}

/// Tracks of `catalog` matching `query`, as owned values.
pub fn tracks_matching(catalog: &ContentCatalog, query: &str) -> Vec<Track> {
    filter(catalog.tracks, query).into_iter().copied().collect()
}

// =============================================================================
// SEARCH BOX
// =============================================================================

/// Search producer: owns the query and projects the catalog on demand.
pub struct SearchBox {
    catalog: &'static ContentCatalog,
    query: Signal<String>,
}

impl SearchBox {
    pub fn new(catalog: &'static ContentCatalog) -> Self {
        Self {
            catalog,
            query: signal(String::new()),
        }
    }

    /// Replace the query (one keystroke's worth of input).
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        tracing::trace!(%query, "search query changed");
        self.query.set(query);
    }

    pub fn clear(&self) {
        self.query.set(String::new());
    }

    pub fn query(&self) -> String {
        self.query.get()
    }

    /// The underlying signal, for renderer effects.
    pub fn query_signal(&self) -> Signal<String> {
        self.query.clone()
    }

    /// Tracks matching the current query.
    pub fn tracks(&self) -> Vec<Track> {
        tracks_matching(self.catalog, &self.query.get())
    }

    /// Workshops matching the current query.
    pub fn workshops(&self) -> Vec<Workshop> {
        filter(self.catalog.workshops, &self.query.get())
            .into_iter()
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ICADC_2026;

    fn titles(tracks: &[&Track]) -> Vec<&'static str> {
        tracks.iter().map(|t| t.title).collect()
    }

    /// Every result appears in `items` after the previous one.
    fn is_subsequence<T: PartialEq>(result: &[&T], items: &[T]) -> bool {
        let mut rest = items.iter();
        result.iter().all(|r| rest.any(|i| i == *r))
    }

    #[test]
    fn test_empty_query_is_identity() {
        let result = filter(ICADC_2026.tracks, "");
        assert_eq!(result.len(), ICADC_2026.tracks.len());
        assert!(result.iter().zip(ICADC_2026.tracks).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_whitespace_query_is_identity() {
        assert_eq!(filter(ICADC_2026.tracks, "   \t").len(), 10);
    }

    #[test]
    fn test_quantum_matches_single_track() {
        let result = filter(ICADC_2026.tracks, "quantum");
        assert_eq!(titles(&result), vec!["Quantum Computing"]);
    }

    #[test]
    fn test_matches_on_topic_only() {
        // "Homomorphic" appears only in a topic of Modern Cryptography
        let result = filter(ICADC_2026.tracks, "HOMOMORPHIC");
        assert_eq!(titles(&result), vec!["Modern Cryptography"]);
    }

    #[test]
    fn test_results_keep_catalog_order() {
        let result = filter(ICADC_2026.tracks, "ai");
        assert!(result.len() > 1);
        assert!(is_subsequence(&result, ICADC_2026.tracks));

        let ids: Vec<u32> = result.iter().map(|t| t.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_partition_property() {
        for query in ["ai", "Security", "detect", "zzz", "&", "Quantum-Resistant"] {
            let result = filter(ICADC_2026.tracks, query);
            assert!(is_subsequence(&result, ICADC_2026.tracks));

            let lowered = query.to_lowercase();
            for track in ICADC_2026.tracks {
                let hit = track.title.to_lowercase().contains(&lowered)
                    || track.topics.iter().any(|t| t.to_lowercase().contains(&lowered));
                assert_eq!(result.contains(&track), hit, "query {query:?}, track {}", track.title);
            }
        }
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(filter(ICADC_2026.tracks, "blockchain").is_empty());
    }

    #[test]
    fn test_filters_other_records() {
        let workshops = filter(ICADC_2026.workshops, "pytorch");
        assert_eq!(workshops.len(), 1);
        assert_eq!(workshops[0].seats, 18);

        let careers = filter(ICADC_2026.careers, "engineer");
        assert_eq!(careers.len(), 1);
        assert_eq!(careers[0].role, "Network Security Engineer");

        assert!(matches(&ICADC_2026.deadlines[0], "submission"));
        assert!(!matches(&ICADC_2026.deadlines[0], "camera"));
    }

    #[test]
    fn test_search_box_results_follow_query() {
        let search = SearchBox::new(&ICADC_2026);
        assert_eq!(search.tracks().len(), 10);

        search.set_query("quantum");
        let tracks = search.tracks();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, 9);

        search.set_query("federated");
        let tracks = search.tracks();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "Secure & Trustworthy AI");
        assert_eq!(search.workshops().len(), 1);

        search.clear();
        assert_eq!(search.query(), "");
        assert_eq!(search.tracks().len(), 10);
    }
}
