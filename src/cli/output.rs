//! Output formatting for classification results.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::classification::Classification;
use crate::cli::args::{ClassifyArgs, OutputFormat};
use crate::error::Result;
use crate::model::ModelArtifacts;

/// Result of classifying one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationOutput {
    /// Predicted label name.
    pub label: String,
    /// Predicted label id.
    pub label_id: u32,
    /// Score of the predicted label.
    pub score: f64,
    /// Number of labels in the model.
    pub labels: usize,
    /// Number of documents in the training set.
    pub documents: u64,
}

impl ClassificationOutput {
    pub fn new(classification: Classification, artifacts: &ModelArtifacts) -> Self {
        ClassificationOutput {
            label: classification.label,
            label_id: classification.label_id,
            score: classification.score,
            labels: artifacts.num_labels(),
            documents: artifacts.document_count(),
        }
    }
}

/// Output a result to stdout in the format selected by `args`.
pub fn output_result(result: &ClassificationOutput, args: &ClassifyArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_result(
        &mut out,
        result,
        args.output_format,
        args.pretty,
        args.show_counts(),
    )
}

/// Write a result in the given format.
///
/// JSON always carries the counts; human output prints them only when
/// `show_counts` is set.
pub fn write_result<W: Write>(
    out: &mut W,
    result: &ClassificationOutput,
    format: OutputFormat,
    pretty: bool,
    show_counts: bool,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if show_counts {
                writeln!(out, "Number of labels: {}", result.labels)?;
                writeln!(out, "Number of documents in training set: {}", result.documents)?;
            }
            writeln!(out, "Label: {}", result.label)?;
            writeln!(out, "Score: {}", result.score)?;
        }
        OutputFormat::Json => {
            let json = if pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClassificationOutput {
        ClassificationOutput {
            label: "spam".to_string(),
            label_id: 1,
            score: -2.5,
            labels: 2,
            documents: 4,
        }
    }

    #[test]
    fn test_human_output() {
        let mut buf = Vec::new();
        write_result(&mut buf, &sample(), OutputFormat::Human, false, false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Label: spam\nScore: -2.5\n");
    }

    #[test]
    fn test_human_output_with_counts() {
        let mut buf = Vec::new();
        write_result(&mut buf, &sample(), OutputFormat::Human, false, true).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Number of labels: 2\nNumber of documents in training set: 4\nLabel: spam\nScore: -2.5\n"
        );
    }

    #[test]
    fn test_json_output() {
        let mut buf = Vec::new();
        write_result(&mut buf, &sample(), OutputFormat::Json, false, true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "{\"label\":\"spam\",\"label_id\":1,\"score\":-2.5,\"labels\":2,\"documents\":4}\n"
        );

        let parsed: ClassificationOutput = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_pretty_json_output() {
        let mut buf = Vec::new();
        write_result(&mut buf, &sample(), OutputFormat::Json, true, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\n  \"label\": \"spam\""));
    }
}
