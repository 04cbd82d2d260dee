//! Playlist shuffling
//!
//! One algorithm only: an unbiased Fisher-Yates permutation via
//! `rand::seq::SliceRandom`. A sort-by-random-key shuffle is positionally
//! biased and must not be substituted here; the tests check for that.

use aria_core::Track;
use rand::seq::SliceRandom;
use rand::thread_rng;

/// Shuffle tracks in place, uniformly over all permutations
pub fn shuffle_tracks(tracks: &mut [Track]) {
    let mut rng = thread_rng();
    tracks.shuffle(&mut rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn test_tracks(count: usize) -> Vec<Track> {
        (0..count)
            .map(|i| Track::new(format!("Track {i}"), "Artist", format!("{i}.mp3")))
            .collect()
    }

    #[test]
    fn shuffle_preserves_all_tracks() {
        let mut tracks = test_tracks(8);
        shuffle_tracks(&mut tracks);

        let srcs: HashSet<String> = tracks.iter().map(|t| t.src.clone()).collect();
        assert_eq!(srcs.len(), 8);
        for i in 0..8 {
            assert!(srcs.contains(&format!("{i}.mp3")));
        }
    }

    #[test]
    fn shuffle_changes_order() {
        let mut tracks = test_tracks(10);
        let original: Vec<String> = tracks.iter().map(|t| t.src.clone()).collect();

        shuffle_tracks(&mut tracks);

        let shuffled: Vec<String> = tracks.iter().map(|t| t.src.clone()).collect();
        // Probability of identity permutation: 1/10! - if this ever fails
        // it is bad luck, not a bug
        assert_ne!(original, shuffled);
    }

    #[test]
    fn shuffle_handles_degenerate_sizes() {
        let mut empty: Vec<Track> = Vec::new();
        shuffle_tracks(&mut empty);
        assert!(empty.is_empty());

        let mut one = test_tracks(1);
        shuffle_tracks(&mut one);
        assert_eq!(one[0].src, "0.mp3");
    }

    #[test]
    fn shuffle_is_not_positionally_biased() {
        // Every track should land at every position with roughly equal
        // frequency. With 4 tracks over 4000 trials each (position, track)
        // cell expects 1000 hits; a biased sort-by-random-key or a shuffle
        // that pins suffixes in place falls far outside the band.
        const TRACKS: usize = 4;
        const TRIALS: usize = 4000;

        let mut counts = [[0usize; TRACKS]; TRACKS];
        for _ in 0..TRIALS {
            let mut tracks = test_tracks(TRACKS);
            shuffle_tracks(&mut tracks);
            for (position, track) in tracks.iter().enumerate() {
                let id: usize = track.src.trim_end_matches(".mp3").parse().unwrap();
                counts[position][id] += 1;
            }
        }

        let expected = TRIALS / TRACKS;
        for position in 0..TRACKS {
            for id in 0..TRACKS {
                let observed = counts[position][id];
                assert!(
                    observed > expected / 2 && observed < expected * 2,
                    "track {id} appeared at position {position} {observed} times, expected ~{expected}"
                );
            }
        }
    }
}
