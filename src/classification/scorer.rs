//! Naive Bayes scoring.
//!
//! A [`BayesScorer`] is materialized once from a [`WeightModel`]: every
//! stored (term, label) cell is turned into its smoothed log weight.
//!
//! Standard rule:
//!
//! ```text
//! ln((w + α) / (labelWeight[l] + α · numFeatures))
//! ```
//!
//! Complementary rule:
//!
//! ```text
//! -ln((featureWeight[t] - w + α) / (totalWeight - labelWeight[l] + α · numFeatures)) / theta[l]
//! ```
//!
//! A pair the model does not store has a raw weight of 0 and goes through
//! the same rule, so a label is never rewarded for lacking evidence.
//!
//! The score of label `l` is its log prior (0 when the model has none) plus
//! the sum of `vector[t] · logweight(t, l)` over the document's terms. Terms
//! outside the model's term axis contribute nothing.

use ahash::AHashMap;

use crate::classification::feature::{FeatureVector, ScoreVector};
use crate::error::{NbError, Result};
use crate::model::WeightModel;

/// Per-label scorer over a materialized weight model.
#[derive(Debug, Clone)]
pub struct BayesScorer {
    num_labels: usize,
    num_features: usize,
    complementary: bool,
    alpha: f64,
    priors: Vec<f64>,
    theta: Vec<f64>,
    feature_weights: Vec<f64>,
    label_denominators: Vec<f64>,
    /// Per standard-rule label: log weight of an unstored cell.
    absent_weights: Vec<f64>,
    log_weights: AHashMap<u32, Vec<(u32, f64)>>,
}

impl BayesScorer {
    /// Materialize log weights from `model`.
    ///
    /// Fails with an artifact load error if any log weight, stored or
    /// implied by an absent cell, is not finite.
    pub fn new(model: &WeightModel) -> Result<Self> {
        let num_labels = model.num_labels();
        let num_features = model.num_features();
        let alpha = model.alpha_i();
        let smoothing = alpha * num_features as f64;
        let total_weight = model.total_weight();
        let complementary = model.is_complementary();

        let label_denominators = (0..num_labels as u32)
            .map(|l| {
                if complementary {
                    total_weight - model.label_weight(l) + smoothing
                } else {
                    model.label_weight(l) + smoothing
                }
            })
            .collect();

        let mut scorer = BayesScorer {
            num_labels,
            num_features,
            complementary,
            alpha,
            priors: (0..num_labels as u32).map(|l| model.log_prior(l)).collect(),
            theta: (0..num_labels as u32).map(|l| model.theta(l)).collect(),
            feature_weights: (0..num_features as u32)
                .map(|t| model.feature_weight(t))
                .collect(),
            label_denominators,
            absent_weights: Vec::new(),
            log_weights: AHashMap::new(),
        };

        for (term_id, label_id, weight) in model.cells() {
            let log_weight = scorer.apply_rule(term_id, label_id, weight);
            check_finite(log_weight, term_id, label_id)?;
            scorer
                .log_weights
                .entry(term_id)
                .or_default()
                .push((label_id, log_weight));
        }

        if complementary {
            for term_id in 0..num_features as u32 {
                for label_id in 0..num_labels as u32 {
                    check_finite(scorer.apply_rule(term_id, label_id, 0.0), term_id, label_id)?;
                }
            }
        } else {
            scorer.absent_weights = (0..num_labels as u32)
                .map(|label_id| {
                    let log_weight = scorer.apply_rule(0, label_id, 0.0);
                    check_finite(log_weight, 0, label_id).map(|_| log_weight)
                })
                .collect::<Result<_>>()?;
        }

        Ok(scorer)
    }

    fn apply_rule(&self, term_id: u32, label_id: u32, weight: f64) -> f64 {
        let denominator = self.label_denominators[label_id as usize];
        if self.complementary {
            let numerator = self.feature_weights[term_id as usize] - weight + self.alpha;
            -(numerator / denominator).ln() / self.theta[label_id as usize]
        } else {
            ((weight + self.alpha) / denominator).ln()
        }
    }

    fn absent_log_weight(&self, term_id: u32, label_id: u32) -> f64 {
        if self.complementary {
            self.apply_rule(term_id, label_id, 0.0)
        } else {
            self.absent_weights[label_id as usize]
        }
    }

    pub fn num_labels(&self) -> usize {
        self.num_labels
    }

    pub fn is_complementary(&self) -> bool {
        self.complementary
    }

    /// Whether the model stores a trained weight for `(term_id, label_id)`.
    pub fn is_stored(&self, term_id: u32, label_id: u32) -> bool {
        self.log_weights
            .get(&term_id)
            .is_some_and(|cells| cells.iter().any(|(l, _)| *l == label_id))
    }

    /// Log weight of `(term_id, label_id)`, using the raw weight 0 for cells
    /// the model does not store. `None` outside the model's axes.
    pub fn log_weight(&self, term_id: u32, label_id: u32) -> Option<f64> {
        if term_id as usize >= self.num_features || label_id as usize >= self.num_labels {
            return None;
        }
        let stored = self
            .log_weights
            .get(&term_id)
            .and_then(|cells| cells.iter().find(|(l, _)| *l == label_id))
            .map(|(_, w)| *w);
        Some(stored.unwrap_or_else(|| self.absent_log_weight(term_id, label_id)))
    }

    /// Score `vector` against every label.
    pub fn classify(&self, vector: &FeatureVector) -> Result<ScoreVector> {
        let mut scores = self.priors.clone();

        for (term_id, value) in vector.sorted_entries() {
            if term_id as usize >= self.num_features {
                continue;
            }
            let cells = self
                .log_weights
                .get(&term_id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            for (label_id, score) in scores.iter_mut().enumerate() {
                let label_id = label_id as u32;
                let log_weight = cells
                    .iter()
                    .find(|(l, _)| *l == label_id)
                    .map(|(_, w)| *w)
                    .unwrap_or_else(|| self.absent_log_weight(term_id, label_id));
                *score += value * log_weight;
            }
        }

        if let Some((label_id, score)) = scores
            .iter()
            .enumerate()
            .find(|(_, score)| !score.is_finite())
        {
            return Err(NbError::invalid_score(format!(
                "score of label {label_id} is {score}"
            )));
        }

        Ok(ScoreVector::new(scores))
    }
}

fn check_finite(log_weight: f64, term_id: u32, label_id: u32) -> Result<()> {
    if log_weight.is_finite() {
        Ok(())
    } else {
        Err(NbError::artifact_load(format!(
            "log weight of cell ({term_id}, {label_id}) is {log_weight}"
        )))
    }
}
