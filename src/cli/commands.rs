//! Command implementation for the nbclassify CLI.

use clap::CommandFactory;

use crate::classification::ClassifierPipeline;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ClassifierConfig;
use crate::error::{NbError, Result};

/// Execute a CLI invocation.
///
/// With fewer than five locations the usage banner is printed and nothing
/// else happens.
pub fn execute_command(args: ClassifyArgs) -> Result<()> {
    let Some((paths, input)) = args.request() else {
        ClassifyArgs::command().print_help()?;
        println!();
        return Ok(());
    };

    if args.locations.len() > REQUIRED_LOCATIONS {
        log::warn!(
            "ignoring {} extra location(s)",
            args.locations.len() - REQUIRED_LOCATIONS
        );
    }

    let mut config = match &args.config {
        Some(path) => ClassifierConfig::from_file(path)?,
        None => ClassifierConfig::default(),
    };
    if args.sequential {
        config.parallel_load = false;
    }

    let mut pipeline = ClassifierPipeline::new(config);
    let classification = pipeline.run(&paths, &input)?;
    let classifier = pipeline
        .classifier()
        .ok_or_else(|| NbError::other("pipeline finished without a classifier"))?;

    let result = ClassificationOutput::new(classification, classifier.artifacts());
    output_result(&result, &args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_usage_when_locations_missing() {
        let args = ClassifyArgs::try_parse_from(["nbclassify", "model.bin"]).unwrap();
        assert!(execute_command(args).is_ok());
    }

    #[test]
    fn test_missing_artifacts_fail() {
        let dir = TempDir::new().unwrap();
        let path = |name: &str| dir.path().join(name).display().to_string();
        let args = ClassifyArgs::try_parse_from([
            "nbclassify".to_string(),
            path("model.bin"),
            path("labelindex.bin"),
            path("dictionary.bin"),
            path("df-count.bin"),
            path("input.txt"),
        ])
        .unwrap();

        let err = execute_command(args).unwrap_err();
        assert!(matches!(err, NbError::ArtifactLoad(_)));
    }

    #[test]
    fn test_unreadable_config_fails() {
        let dir = TempDir::new().unwrap();
        let mut argv = vec!["nbclassify".to_string(), "--config".to_string()];
        argv.push(dir.path().join("absent.json").display().to_string());
        for name in ["m", "l", "d", "f", "i"] {
            argv.push(dir.path().join(name).display().to_string());
        }

        let args = ClassifyArgs::try_parse_from(argv).unwrap();
        assert!(matches!(
            execute_command(args).unwrap_err(),
            NbError::InvalidConfig(_)
        ));
    }
}
