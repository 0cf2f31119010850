//! Content Catalog - the static conference records.
//!
//! Immutable data shared read-only by every consumer. Items borrow `'static`
//! strings, so the whole catalog is `Copy` and lives in a `static`.

mod content;

use serde::Serialize;

pub use content::ICADC_2026;

// =============================================================================
// RECORDS
// =============================================================================

/// Submission status shown on a deadline card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeadlineStatus {
    Open,
    Upcoming,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Deadline {
    pub label: &'static str,
    /// Display date, e.g. "30 May 2026".
    pub date: &'static str,
    pub status: DeadlineStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Track {
    pub id: u32,
    pub category: &'static str,
    pub title: &'static str,
    pub topics: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Workshop {
    pub title: &'static str,
    pub description: &'static str,
    pub seats: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CareerRole {
    pub role: &'static str,
}

/// All content shown on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentCatalog {
    pub deadlines: &'static [Deadline],
    pub tracks: &'static [Track],
    pub workshops: &'static [Workshop],
    pub careers: &'static [CareerRole],
}

impl ContentCatalog {
    pub fn track(&self, id: u32) -> Option<&'static Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Tracks in a category, in catalog order.
    pub fn tracks_in(&self, category: &str) -> impl Iterator<Item = &'static Track> {
        self.tracks
            .iter()
            .filter(move |t| t.category.eq_ignore_ascii_case(category))
    }

    /// The deadline currently accepting submissions, if any.
    pub fn open_deadline(&self) -> Option<&'static Deadline> {
        self.deadlines
            .iter()
            .find(|d| d.status == DeadlineStatus::Open)
    }
}

// =============================================================================
// SEARCH FIELDS
// =============================================================================

/// Fields a catalog record exposes to search.
pub trait Searchable {
    /// Primary title.
    fn title(&self) -> &str;

    /// Associated topic strings.
    fn topics(&self) -> &[&str] {
        &[]
    }
}

impl Searchable for Track {
    fn title(&self) -> &str {
        self.title
    }

    fn topics(&self) -> &[&str] {
        self.topics
    }
}

impl Searchable for Workshop {
    fn title(&self) -> &str {
        self.title
    }
}

impl Searchable for Deadline {
    fn title(&self) -> &str {
        self.label
    }
}

impl Searchable for CareerRole {
    fn title(&self) -> &str {
        self.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        assert_eq!(ICADC_2026.deadlines.len(), 4);
        assert_eq!(ICADC_2026.tracks.len(), 10);
        assert_eq!(ICADC_2026.workshops.len(), 3);
        assert_eq!(ICADC_2026.careers.len(), 4);
    }

    #[test]
    fn test_track_ids_unique_and_ordered() {
        let ids: Vec<u32> = ICADC_2026.tracks.iter().map(|t| t.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_track_lookup() {
        let track = ICADC_2026.track(9).unwrap();
        assert_eq!(track.title, "Quantum Computing");
        assert!(ICADC_2026.track(42).is_none());
    }

    #[test]
    fn test_tracks_in_category() {
        let titles: Vec<&str> = ICADC_2026.tracks_in("foundations").map(|t| t.title).collect();
        assert_eq!(titles, vec!["Modern Cryptography", "Quantum Computing"]);
    }

    #[test]
    fn test_open_deadline() {
        let open = ICADC_2026.open_deadline().unwrap();
        assert_eq!(open.label, "Submission Deadline");
        assert_eq!(open.date, "30 May 2026");
    }
}
