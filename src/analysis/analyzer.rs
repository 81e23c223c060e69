use chrono::NaiveDate;

use crate::analysis::{yearly_snapshots, ProjectionSummary, YearlySnapshot};
use crate::error::ProjectionError;
use crate::models::{ProjectionConfig, ProjectionInputs};
use crate::projection::{Projection, ProjectionEngine};

/// Unified API that runs a projection and groups the views built on it.
pub struct Analyzer {
    inputs: ProjectionInputs,
    projection: Projection,
}

impl Analyzer {
    /// Project `inputs` from `start_date` under `config`.
    pub fn new(
        inputs: ProjectionInputs,
        config: ProjectionConfig,
        start_date: NaiveDate,
    ) -> Result<Self, ProjectionError> {
        let projection = ProjectionEngine::new(config).run(&inputs, start_date)?;
        Ok(Self { inputs, projection })
    }

    pub fn inputs(&self) -> &ProjectionInputs {
        &self.inputs
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Headline totals and break-even over the inputs' display window.
    pub fn summary(&self) -> Result<ProjectionSummary, ProjectionError> {
        let window = self.inputs.display_window()?;
        Ok(ProjectionSummary::from_projection(&self.projection, &window))
    }

    /// Anniversary totals over the inputs' display window.
    pub fn yearly_snapshots(&self) -> Result<Vec<YearlySnapshot>, ProjectionError> {
        let window = self.inputs.display_window()?;
        Ok(yearly_snapshots(&self.projection, &window))
    }
}
