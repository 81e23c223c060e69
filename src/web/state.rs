use crate::models::ProjectionConfig;

/// Shared server state. Requests never mutate it; every handler projects
/// from scratch.
pub struct AppState {
    pub config: ProjectionConfig,
}

impl AppState {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ProjectionConfig::default())
    }
}
