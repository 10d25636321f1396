//! Naive Bayes weight model.
//!
//! The model stores the raw trained weight of every observed (term, label)
//! pair together with the aggregates the scoring rules need: the per-label
//! weight sums, the per-feature weight sums, the smoothing parameter
//! `alpha_i`, and optionally a per-label theta normalizer (complementary
//! models) and per-label log priors.

use std::collections::BTreeMap;

use crate::error::{NbError, Result};
use crate::model::{WEIGHT_MODEL_MAGIC, read_count, read_header, write_header};
use crate::storage::{StorageInput, StorageOutput, StructReader, StructWriter};
use crate::util::varint::to_u32;

const FLAG_COMPLEMENTARY: u8 = 0b001;
const FLAG_THETA: u8 = 0b010;
const FLAG_PRIORS: u8 = 0b100;

/// Default Laplace smoothing parameter.
pub const DEFAULT_ALPHA_I: f64 = 1.0;

/// Sparse matrix of trained (term-id, label-id) weights.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightModel {
    complementary: bool,
    alpha_i: f64,
    label_weights: Vec<f64>,
    feature_weights: Vec<f64>,
    theta_normalizer: Option<Vec<f64>>,
    log_priors: Option<Vec<f64>>,
    cells: BTreeMap<(u32, u32), f64>,
}

impl WeightModel {
    /// Whether scores use the complementary rule.
    pub fn is_complementary(&self) -> bool {
        self.complementary
    }

    /// Smoothing parameter.
    pub fn alpha_i(&self) -> f64 {
        self.alpha_i
    }

    /// Number of labels on the label axis.
    pub fn num_labels(&self) -> usize {
        self.label_weights.len()
    }

    /// Number of features on the term axis.
    pub fn num_features(&self) -> usize {
        self.feature_weights.len()
    }

    /// Sum of all weights recorded for `label_id`.
    pub fn label_weight(&self, label_id: u32) -> f64 {
        self.label_weights
            .get(label_id as usize)
            .copied()
            .unwrap_or(0.0)
    }

    /// Sum of all weights recorded for `term_id`.
    pub fn feature_weight(&self, term_id: u32) -> f64 {
        self.feature_weights
            .get(term_id as usize)
            .copied()
            .unwrap_or(0.0)
    }

    /// Sum of every weight in the model.
    pub fn total_weight(&self) -> f64 {
        self.label_weights.iter().sum()
    }

    /// Theta normalizer of `label_id`; 1 when the model carries none.
    pub fn theta(&self, label_id: u32) -> f64 {
        self.theta_normalizer
            .as_ref()
            .and_then(|theta| theta.get(label_id as usize).copied())
            .unwrap_or(1.0)
    }

    /// Log prior of `label_id`; 0 when the model carries none.
    pub fn log_prior(&self, label_id: u32) -> f64 {
        self.log_priors
            .as_ref()
            .and_then(|priors| priors.get(label_id as usize).copied())
            .unwrap_or(0.0)
    }

    /// Whether the model carries per-label log priors.
    pub fn has_priors(&self) -> bool {
        self.log_priors.is_some()
    }

    /// Raw trained weight of `(term_id, label_id)`.
    pub fn weight(&self, term_id: u32, label_id: u32) -> Option<f64> {
        self.cells.get(&(term_id, label_id)).copied()
    }

    /// Iterate over stored `(term_id, label_id, weight)` cells in term order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, f64)> + '_ {
        self.cells.iter().map(|(&(t, l), &w)| (t, l, w))
    }

    /// Number of stored cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn validate(&self) -> Result<()> {
        if !self.alpha_i.is_finite() || self.alpha_i < 0.0 {
            return Err(NbError::artifact_load(format!(
                "invalid smoothing parameter alpha_i = {}",
                self.alpha_i
            )));
        }

        let num_labels = self.num_labels();
        let num_features = self.num_features();

        let vectors = [
            ("label weights", Some(&self.label_weights), num_labels),
            ("feature weights", Some(&self.feature_weights), num_features),
            ("theta normalizer", self.theta_normalizer.as_ref(), num_labels),
            ("log priors", self.log_priors.as_ref(), num_labels),
        ];
        for (what, values, expected) in vectors {
            let Some(values) = values else { continue };
            if values.len() != expected {
                return Err(NbError::artifact_load(format!(
                    "{what} has {} entries, expected {expected}",
                    values.len()
                )));
            }
            if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
                return Err(NbError::artifact_load(format!(
                    "non-finite value {bad} in {what}"
                )));
            }
        }

        for (&(term_id, label_id), &weight) in &self.cells {
            if term_id as usize >= num_features || label_id as usize >= num_labels {
                return Err(NbError::artifact_load(format!(
                    "cell ({term_id}, {label_id}) is outside the {num_features}x{num_labels} model"
                )));
            }
            if !weight.is_finite() {
                return Err(NbError::artifact_load(format!(
                    "non-finite weight {weight} at cell ({term_id}, {label_id})"
                )));
            }
        }

        Ok(())
    }

    /// Write the weight-model table body.
    pub fn write_to_storage<W: StorageOutput>(&self, writer: &mut StructWriter<W>) -> Result<()> {
        write_header(writer, WEIGHT_MODEL_MAGIC)?;

        let mut flags = 0u8;
        if self.complementary {
            flags |= FLAG_COMPLEMENTARY;
        }
        if self.theta_normalizer.is_some() {
            flags |= FLAG_THETA;
        }
        if self.log_priors.is_some() {
            flags |= FLAG_PRIORS;
        }
        writer.write_u8(flags)?;
        writer.write_f64(self.alpha_i)?;
        writer.write_varint(self.num_labels() as u64)?;
        writer.write_varint(self.num_features() as u64)?;

        for weight in &self.label_weights {
            writer.write_f64(*weight)?;
        }
        for weight in &self.feature_weights {
            writer.write_f64(*weight)?;
        }
        for optional in [&self.theta_normalizer, &self.log_priors] {
            if let Some(values) = optional {
                for value in values {
                    writer.write_f64(*value)?;
                }
            }
        }

        writer.write_varint(self.cells.len() as u64)?;
        for (&(term_id, label_id), &weight) in &self.cells {
            writer.write_varint(term_id as u64)?;
            writer.write_varint(label_id as u64)?;
            writer.write_f64(weight)?;
        }

        Ok(())
    }

    /// Read a weight-model table body.
    pub fn read_from_storage<R: StorageInput>(reader: &mut StructReader<R>) -> Result<Self> {
        read_header(reader, WEIGHT_MODEL_MAGIC, "weight-model")?;

        let flags = reader.read_u8()?;
        if flags & !(FLAG_COMPLEMENTARY | FLAG_THETA | FLAG_PRIORS) != 0 {
            return Err(NbError::artifact_load(format!(
                "unknown weight-model flags {flags:#04x}"
            )));
        }
        let alpha_i = reader.read_f64()?;
        let num_labels = read_count(reader, 8)?;
        let num_features = read_count(reader, 8)?;

        let label_weights = read_f64s(reader, num_labels)?;
        let feature_weights = read_f64s(reader, num_features)?;
        let theta_normalizer = if flags & FLAG_THETA != 0 {
            Some(read_f64s(reader, num_labels)?)
        } else {
            None
        };
        let log_priors = if flags & FLAG_PRIORS != 0 {
            Some(read_f64s(reader, num_labels)?)
        } else {
            None
        };

        let cell_count = read_count(reader, 10)?;
        let mut cells = BTreeMap::new();
        for _ in 0..cell_count {
            let term_id = to_u32(reader.read_varint()?)?;
            let label_id = to_u32(reader.read_varint()?)?;
            let weight = reader.read_f64()?;
            if cells.insert((term_id, label_id), weight).is_some() {
                return Err(NbError::artifact_load(format!(
                    "duplicate weight cell ({term_id}, {label_id})"
                )));
            }
        }

        let model = WeightModel {
            complementary: flags & FLAG_COMPLEMENTARY != 0,
            alpha_i,
            label_weights,
            feature_weights,
            theta_normalizer,
            log_priors,
            cells,
        };
        model.validate()?;
        Ok(model)
    }
}

fn read_f64s<R: StorageInput>(reader: &mut StructReader<R>, count: usize) -> Result<Vec<f64>> {
    (0..count).map(|_| reader.read_f64()).collect()
}

/// Builder that accumulates trained weights and derives the label and
/// feature sums.
///
/// # Example
///
/// ```
/// use nbclassify::model::WeightModelBuilder;
///
/// let mut builder = WeightModelBuilder::new(2, 3);
/// builder.add_weight(0, 1, 2.0).unwrap();
/// builder.add_weight(2, 0, 1.5).unwrap();
/// let model = builder.build().unwrap();
///
/// assert_eq!(model.label_weight(1), 2.0);
/// assert_eq!(model.feature_weight(2), 1.5);
/// assert_eq!(model.total_weight(), 3.5);
/// ```
#[derive(Debug, Clone)]
pub struct WeightModelBuilder {
    num_labels: usize,
    num_features: usize,
    alpha_i: f64,
    complementary: bool,
    theta_normalizer: Option<Vec<f64>>,
    log_priors: Option<Vec<f64>>,
    cells: BTreeMap<(u32, u32), f64>,
}

impl WeightModelBuilder {
    /// Start a model with the given label and term axis sizes.
    pub fn new(num_labels: usize, num_features: usize) -> Self {
        WeightModelBuilder {
            num_labels,
            num_features,
            alpha_i: DEFAULT_ALPHA_I,
            complementary: false,
            theta_normalizer: None,
            log_priors: None,
            cells: BTreeMap::new(),
        }
    }

    /// Set the smoothing parameter.
    pub fn alpha_i(mut self, alpha_i: f64) -> Self {
        self.alpha_i = alpha_i;
        self
    }

    /// Select the complementary scoring rule.
    pub fn complementary(mut self, complementary: bool) -> Self {
        self.complementary = complementary;
        self
    }

    /// Attach a per-label theta normalizer.
    pub fn theta_normalizer(mut self, theta: Vec<f64>) -> Self {
        self.theta_normalizer = Some(theta);
        self
    }

    /// Attach per-label log priors.
    pub fn log_priors(mut self, priors: Vec<f64>) -> Self {
        self.log_priors = Some(priors);
        self
    }

    /// Add `weight` to the `(term_id, label_id)` cell.
    pub fn add_weight(&mut self, term_id: u32, label_id: u32, weight: f64) -> Result<()> {
        if term_id as usize >= self.num_features || label_id as usize >= self.num_labels {
            return Err(NbError::invalid_config(format!(
                "cell ({term_id}, {label_id}) is outside the {}x{} model",
                self.num_features, self.num_labels
            )));
        }
        *self.cells.entry((term_id, label_id)).or_insert(0.0) += weight;
        Ok(())
    }

    /// Finish the model.
    pub fn build(self) -> Result<WeightModel> {
        let mut label_weights = vec![0.0; self.num_labels];
        let mut feature_weights = vec![0.0; self.num_features];
        for (&(term_id, label_id), &weight) in &self.cells {
            label_weights[label_id as usize] += weight;
            feature_weights[term_id as usize] += weight;
        }

        let model = WeightModel {
            complementary: self.complementary,
            alpha_i: self.alpha_i,
            label_weights,
            feature_weights,
            theta_normalizer: self.theta_normalizer,
            log_priors: self.log_priors,
            cells: self.cells,
        };
        model.validate()?;
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sums() {
        let mut builder = WeightModelBuilder::new(2, 2);
        builder.add_weight(0, 0, 1.0).unwrap();
        builder.add_weight(0, 0, 1.0).unwrap();
        builder.add_weight(1, 1, 3.0).unwrap();
        let model = builder.build().unwrap();

        assert_eq!(model.weight(0, 0), Some(2.0));
        assert_eq!(model.weight(0, 1), None);
        assert_eq!(model.label_weight(0), 2.0);
        assert_eq!(model.feature_weight(1), 3.0);
        assert_eq!(model.cell_count(), 2);
        assert_eq!(model.theta(1), 1.0);
        assert_eq!(model.log_prior(1), 0.0);
        assert!(!model.is_complementary());
    }

    #[test]
    fn test_out_of_range_cell_rejected() {
        let mut builder = WeightModelBuilder::new(2, 2);
        assert!(builder.add_weight(2, 0, 1.0).is_err());
        assert!(builder.add_weight(0, 2, 1.0).is_err());
    }

    #[test]
    fn test_validation() {
        let builder = WeightModelBuilder::new(2, 2).log_priors(vec![0.0]);
        let err = builder.build().unwrap_err();
        assert!(err.to_string().contains("log priors has 1 entries"));

        let builder = WeightModelBuilder::new(2, 2).alpha_i(f64::NAN);
        assert!(builder.build().is_err());
    }
}
