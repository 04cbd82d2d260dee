//! Playlist ordering engine
//!
//! Keeps two sequences: the canonical playlist exactly as the playlist
//! source delivered it, and the presentation order the UI shows and the
//! session plays through. With shuffle off they are identical; with
//! shuffle on the presentation order is a fresh uniform permutation of
//! the canonical playlist.
//!
//! The engine never touches session state. It answers positional
//! questions and hands back index values for the session to apply.

use aria_core::Track;

use crate::shuffle::shuffle_tracks;

/// Canonical playlist plus its current presentation order
#[derive(Debug, Clone, Default)]
pub struct OrderingEngine {
    /// Playlist as fetched, fixed for the lifetime of one load
    canonical: Vec<Track>,

    /// Permutation of `canonical` currently shown and played
    order: Vec<Track>,
}

impl OrderingEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the canonical playlist
    ///
    /// Resets the presentation order to canonical order. An empty sequence
    /// is a valid, degenerate state.
    pub fn set_canonical(&mut self, tracks: Vec<Track>) {
        self.order.clone_from(&tracks);
        self.canonical = tracks;
    }

    /// Rebuild the presentation order
    ///
    /// With `shuffled` the new order is an unbiased permutation of the
    /// canonical playlist, otherwise the canonical order verbatim.
    ///
    /// Returns the new index of `keep` so the caller can carry the
    /// currently playing track across the reordering: `Some(0)` when the
    /// identity is absent (or none was given) and the order is non-empty,
    /// `None` only when the order is empty.
    pub fn regenerate(&mut self, shuffled: bool, keep: Option<&str>) -> Option<usize> {
        self.order.clone_from(&self.canonical);
        if shuffled {
            shuffle_tracks(&mut self.order);
        }

        if self.order.is_empty() {
            return None;
        }
        Some(keep.and_then(|src| self.index_of(src)).unwrap_or(0))
    }

    /// Current index of the track with the given identity key
    pub fn index_of(&self, src: &str) -> Option<usize> {
        self.order.iter().position(|track| track.src == src)
    }

    /// Bounds-checked accessor into the presentation order
    pub fn track_at(&self, index: usize) -> Option<&Track> {
        self.order.get(index)
    }

    /// Presentation order, for rendering the track list
    pub fn tracks(&self) -> &[Track] {
        &self.order
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no playlist is loaded
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Presentation-order indices whose title or artist contains `query`
    ///
    /// Case-insensitive substring match; an empty or whitespace query
    /// matches everything. The filter works on the order itself so the UI
    /// never has to re-derive track identity from rendered elements.
    pub fn matching_indices(&self, query: &str) -> Vec<usize> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return (0..self.order.len()).collect();
        }

        self.order
            .iter()
            .enumerate()
            .filter(|(_, track)| {
                track.title.to_lowercase().contains(&needle)
                    || track.artist.to_lowercase().contains(&needle)
            })
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn test_tracks(count: usize) -> Vec<Track> {
        (0..count)
            .map(|i| Track::new(format!("Track {i}"), format!("Artist {i}"), format!("{i}.mp3")))
            .collect()
    }

    #[test]
    fn starts_empty() {
        let engine = OrderingEngine::new();
        assert!(engine.is_empty());
        assert_eq!(engine.len(), 0);
        assert_eq!(engine.track_at(0), None);
        assert_eq!(engine.index_of("0.mp3"), None);
    }

    #[test]
    fn set_canonical_mirrors_into_order() {
        let mut engine = OrderingEngine::new();
        engine.set_canonical(test_tracks(3));

        assert_eq!(engine.len(), 3);
        assert_eq!(engine.track_at(1).unwrap().src, "1.mp3");
        assert_eq!(engine.index_of("2.mp3"), Some(2));
    }

    #[test]
    fn regenerate_unshuffled_restores_canonical_order() {
        let mut engine = OrderingEngine::new();
        engine.set_canonical(test_tracks(5));
        engine.regenerate(true, None);
        engine.regenerate(false, None);

        let srcs: Vec<&str> = engine.tracks().iter().map(|t| t.src.as_str()).collect();
        assert_eq!(srcs, vec!["0.mp3", "1.mp3", "2.mp3", "3.mp3", "4.mp3"]);
    }

    #[test]
    fn regenerate_preserves_track_multiset() {
        let mut engine = OrderingEngine::new();
        engine.set_canonical(test_tracks(12));
        engine.regenerate(true, None);

        assert_eq!(engine.len(), 12);
        let srcs: HashSet<&str> = engine.tracks().iter().map(|t| t.src.as_str()).collect();
        assert_eq!(srcs.len(), 12);
    }

    #[test]
    fn regenerate_keeps_identity() {
        let mut engine = OrderingEngine::new();
        engine.set_canonical(test_tracks(10));

        let new_index = engine.regenerate(true, Some("7.mp3")).unwrap();
        assert_eq!(engine.track_at(new_index).unwrap().src, "7.mp3");
    }

    #[test]
    fn regenerate_with_absent_identity_falls_back_to_zero() {
        let mut engine = OrderingEngine::new();
        engine.set_canonical(test_tracks(4));

        assert_eq!(engine.regenerate(false, Some("nope.mp3")), Some(0));
        assert_eq!(engine.regenerate(false, None), Some(0));
    }

    #[test]
    fn regenerate_on_empty_order_returns_none() {
        let mut engine = OrderingEngine::new();
        assert_eq!(engine.regenerate(true, Some("0.mp3")), None);
        assert_eq!(engine.regenerate(false, None), None);
    }

    #[test]
    fn filter_matches_title_and_artist_case_insensitively() {
        let mut engine = OrderingEngine::new();
        engine.set_canonical(vec![
            Track::new("Morning Rain", "The Walkers", "a.mp3"),
            Track::new("Night Drive", "Rainer", "b.mp3"),
            Track::new("Silence", "Someone Else", "c.mp3"),
        ]);

        assert_eq!(engine.matching_indices("rain"), vec![0, 1]);
        assert_eq!(engine.matching_indices("WALKERS"), vec![0]);
        assert_eq!(engine.matching_indices("  "), vec![0, 1, 2]);
        assert!(engine.matching_indices("xyz").is_empty());
    }
}
