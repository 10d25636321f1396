//! Command line argument parsing for the nbclassify CLI using clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::model::ArtifactPaths;

/// Number of positional locations a classification needs.
pub const REQUIRED_LOCATIONS: usize = 5;

/// nbclassify - classify a text document with a trained Naive Bayes model
#[derive(Parser, Debug, Clone)]
#[command(name = "nbclassify")]
#[command(about = "Classify a text document with a trained Naive Bayes model")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ClassifyArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Classifier configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "NBCLASSIFY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Load the model artifacts one after another instead of concurrently
    #[arg(long)]
    pub sequential: bool,

    /// MODEL LABEL_INDEX DICTIONARY DOCUMENT_FREQUENCY INPUT
    #[arg(value_name = "LOCATION")]
    pub locations: Vec<PathBuf>,
}

impl ClassifyArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Whether the human output also reports the model's label and training
    /// document counts. Requires an explicit `-v`.
    pub fn show_counts(&self) -> bool {
        !self.quiet && self.verbose > 0
    }

    /// Split the positional locations into the model artifacts and the input
    /// document. `None` when fewer than five were given.
    pub fn request(&self) -> Option<(ArtifactPaths, PathBuf)> {
        let [model, label_index, dictionary, document_frequency, input, ..] =
            self.locations.as_slice()
        else {
            return None;
        };

        Some((
            ArtifactPaths {
                model: model.clone(),
                label_index: label_index.clone(),
                dictionary: dictionary.clone(),
                document_frequency: document_frequency.clone(),
            },
            input.clone(),
        ))
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_locations() {
        let args = ClassifyArgs::try_parse_from([
            "nbclassify",
            "model.bin",
            "labelindex.bin",
            "dictionary.bin",
            "df-count.bin",
            "mail.txt",
        ])
        .unwrap();

        let (paths, input) = args.request().unwrap();
        assert_eq!(paths.model, PathBuf::from("model.bin"));
        assert_eq!(paths.label_index, PathBuf::from("labelindex.bin"));
        assert_eq!(paths.dictionary, PathBuf::from("dictionary.bin"));
        assert_eq!(paths.document_frequency, PathBuf::from("df-count.bin"));
        assert_eq!(input, PathBuf::from("mail.txt"));
    }

    #[test]
    fn test_too_few_locations() {
        let args = ClassifyArgs::try_parse_from(["nbclassify", "model.bin", "labels.bin"]).unwrap();
        assert!(args.request().is_none());

        let args = ClassifyArgs::try_parse_from(["nbclassify"]).unwrap();
        assert!(args.request().is_none());
    }

    #[test]
    fn test_verbosity_levels() {
        // Default verbosity
        let args = ClassifyArgs::try_parse_from(["nbclassify"]).unwrap();
        assert_eq!(args.verbosity(), 1);
        assert!(!args.show_counts());

        // A single -v keeps warn logging but reports the model counts
        let args = ClassifyArgs::try_parse_from(["nbclassify", "-v"]).unwrap();
        assert_eq!(args.verbosity(), 1);
        assert!(args.show_counts());

        // Multiple verbose flags
        let args = ClassifyArgs::try_parse_from(["nbclassify", "-vvv"]).unwrap();
        assert_eq!(args.verbosity(), 3);
        assert!(args.show_counts());

        // Quiet flag
        let args = ClassifyArgs::try_parse_from(["nbclassify", "-vv", "--quiet"]).unwrap();
        assert_eq!(args.verbosity(), 0);
        assert!(!args.show_counts());
    }

    #[test]
    fn test_output_format() {
        let args =
            ClassifyArgs::try_parse_from(["nbclassify", "--format", "json", "--pretty"]).unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.pretty);

        assert!(ClassifyArgs::try_parse_from(["nbclassify", "--format", "yaml"]).is_err());
    }
}
