//! Dataset files on disk. JSON or YAML, chosen by extension.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use frontdesk_core::Dataset;

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Json,
    Yaml,
}

fn format_of(path: &Path) -> Result<DocumentFormat, CliError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => Ok(DocumentFormat::Json),
        Some("yaml" | "yml") => Ok(DocumentFormat::Yaml),
        _ => Err(CliError::Dataset {
            path: path.display().to_string(),
            reason: "Unrecognized file extension.".into(),
        }),
    }
}

/// Parse a JSON or YAML document (datasets, journal drafts).
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let format = format_of(path)?;
    let contents = std::fs::read_to_string(path).map_err(|e| CliError::Dataset {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let parsed = match format {
        DocumentFormat::Json => serde_json::from_str(&contents).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_yaml::from_str(&contents).map_err(|e| e.to_string()),
    };
    parsed.map_err(|reason| CliError::Dataset {
        path: path.display().to_string(),
        reason,
    })
}

pub fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<(), CliError> {
    let body = match format_of(path)? {
        DocumentFormat::Json => {
            let mut s = serde_json::to_string_pretty(value)?;
            s.push('\n');
            s
        }
        DocumentFormat::Yaml => serde_yaml::to_string(value)?,
    };
    std::fs::write(path, body)?;
    Ok(())
}

pub fn load(path: &Path) -> Result<Dataset, CliError> {
    let dataset: Dataset = read_document(path)?;
    debug!(path = %path.display(), "dataset loaded");
    Ok(dataset)
}

pub fn save(path: &Path, dataset: &Dataset) -> Result<(), CliError> {
    write_document(path, dataset)?;
    debug!(path = %path.display(), "dataset saved");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn extension_picks_the_format() {
        assert_eq!(format_of(Path::new("hotel.JSON")).unwrap(), DocumentFormat::Json);
        assert_eq!(format_of(Path::new("hotel.yml")).unwrap(), DocumentFormat::Yaml);
        assert!(matches!(
            format_of(Path::new("hotel.csv")),
            Err(CliError::Dataset { .. })
        ));
    }

    #[test]
    fn yaml_dataset_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hotel.yaml");
        std::fs::write(
            &path,
            "staff:\n  - id: STF-1\n    name: Rosa\n    isAvailable: true\n",
        )
        .unwrap();

        let dataset = load(&path).unwrap();
        assert_eq!(dataset.staff[0].name, "Rosa");
        save(&path, &dataset).unwrap();
        assert_eq!(load(&path).unwrap(), dataset);
    }
}
