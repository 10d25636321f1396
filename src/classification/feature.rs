//! Sparse feature vectors and per-label score vectors.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Sparse TF-IDF weights keyed by term-id.
///
/// Only terms that occur in the document and in the trained vocabulary are
/// present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    weights: AHashMap<u32, f64>,
}

impl FeatureVector {
    /// Create an empty vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the weight of `term_id`.
    pub fn insert(&mut self, term_id: u32, weight: f64) {
        self.weights.insert(term_id, weight);
    }

    /// Weight of `term_id`, if present.
    pub fn get(&self, term_id: u32) -> Option<f64> {
        self.weights.get(&term_id).copied()
    }

    /// Number of non-zero entries.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Iterate over entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.weights.iter().map(|(id, w)| (*id, *w))
    }

    /// Entries sorted by term-id.
    ///
    /// Scoring sums in this order so that results do not depend on hash
    /// iteration order.
    pub fn sorted_entries(&self) -> Vec<(u32, f64)> {
        let mut entries: Vec<(u32, f64)> = self.iter().collect();
        entries.sort_unstable_by_key(|(id, _)| *id);
        entries
    }
}

impl FromIterator<(u32, f64)> for FeatureVector {
    fn from_iter<T: IntoIterator<Item = (u32, f64)>>(iter: T) -> Self {
        FeatureVector {
            weights: iter.into_iter().collect(),
        }
    }
}

/// One score per label, indexed by label-id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreVector {
    scores: Vec<f64>,
}

impl ScoreVector {
    pub fn new(scores: Vec<f64>) -> Self {
        ScoreVector { scores }
    }

    /// Score of `label_id`.
    pub fn get(&self, label_id: u32) -> Option<f64> {
        self.scores.get(label_id as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.scores
    }

    /// The label with the strictly greatest score. Ties go to the lowest
    /// label-id. `None` when there are no labels.
    pub fn argmax(&self) -> Option<(u32, f64)> {
        let mut best: Option<(u32, f64)> = None;
        for (label_id, &score) in self.scores.iter().enumerate() {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((label_id as u32, score)),
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_prefers_lowest_id_on_tie() {
        let scores = ScoreVector::new(vec![-1.0, 2.5, 2.5, 0.0]);
        assert_eq!(scores.argmax(), Some((1, 2.5)));

        let scores = ScoreVector::new(vec![0.0, 0.0]);
        assert_eq!(scores.argmax(), Some((0, 0.0)));

        assert_eq!(ScoreVector::default().argmax(), None);
    }

    #[test]
    fn test_sorted_entries() {
        let vector: FeatureVector = [(5, 0.5), (1, 1.0), (3, 2.0)].into_iter().collect();
        assert_eq!(vector.sorted_entries(), vec![(1, 1.0), (3, 2.0), (5, 0.5)]);
        assert_eq!(vector.get(3), Some(2.0));
        assert_eq!(vector.len(), 3);
    }
}
