use std::path::Path;

use crate::error::ProjectionError;
use crate::models::ProjectionInputs;

use super::reader_for;

/// File formats projection inputs can be loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Toml,
    Json,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self, ProjectionError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "toml" => Ok(InputFormat::Toml),
            "json" => Ok(InputFormat::Json),
            _ => Err(ProjectionError::ParseError(format!(
                "Unsupported input format: .{ext}. Use .toml or .json"
            ))),
        }
    }
}

/// Parse and validate projection inputs. Missing fields take their defaults.
pub fn parse_inputs(content: &str, format: InputFormat) -> Result<ProjectionInputs, ProjectionError> {
    let inputs: ProjectionInputs = match format {
        InputFormat::Toml => toml::from_str(content)?,
        InputFormat::Json => serde_json::from_str(content)?,
    };
    inputs.validate()?;
    Ok(inputs)
}

/// Read projection inputs from a `.toml` or `.json` file.
pub fn read_inputs(path: impl AsRef<Path>) -> Result<ProjectionInputs, ProjectionError> {
    let path = path.as_ref();
    let inputs = reader_for(path)?.read(path)?;
    tracing::info!(path = %path.display(), "loaded projection inputs");
    Ok(inputs)
}
