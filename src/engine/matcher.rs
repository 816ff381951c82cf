//! Penalized-distance candidate scoring
//!
//! For each tile the matcher ranks every source by Euclidean color distance
//! plus an additive reuse penalty, then hands a shortlist of near-best
//! candidates to the executor for randomized tie-breaking.

use std::cmp::Ordering;

use crate::analysis::sources::SourceImage;
use crate::math::color::rgb_distance;

/// A candidate source with its selection score for one tile
#[derive(Clone, Copy, Debug)]
pub struct ScoredCandidate {
    /// Index into the run's source array
    pub index: usize,
    /// Color distance plus accumulated reuse penalty
    pub score: f64,
}

/// Selection score for a single candidate
///
/// The additive penalty makes previously chosen sources progressively less
/// attractive without ever excluding them, so a small source set can still
/// tile an arbitrarily large target.
pub fn selection_score(distance: f64, usage_count: usize, usage_penalty: f64) -> f64 {
    (usage_count as f64).mul_add(usage_penalty, distance)
}

/// Score every source against a tile color, ascending by score
pub fn rank_candidates(
    tile_color: [u8; 3],
    sources: &[SourceImage],
    usage_penalty: f64,
) -> Vec<ScoredCandidate> {
    let mut candidates: Vec<ScoredCandidate> = sources
        .iter()
        .enumerate()
        .map(|(index, source)| ScoredCandidate {
            index,
            score: selection_score(
                rgb_distance(tile_color, source.fingerprint()),
                source.usage_count(),
                usage_penalty,
            ),
        })
        .collect();

    candidates.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));
    candidates
}

/// The `considered` lowest-scoring candidates for a tile, best first
///
/// Shorter than `considered` when the source set is smaller; empty only for an
/// empty source set.
pub fn shortlist(
    tile_color: [u8; 3],
    sources: &[SourceImage],
    usage_penalty: f64,
    considered: usize,
) -> Vec<ScoredCandidate> {
    let mut candidates = rank_candidates(tile_color, sources, usage_penalty);
    candidates.truncate(considered.max(1));
    candidates
}
