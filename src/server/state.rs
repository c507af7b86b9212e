//! Application state shared by handlers

use crate::pipeline::DocumentPipeline;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<DocumentPipeline>,
}

impl AppState {
    /// Create a new application state
    pub fn new(pipeline: DocumentPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// The document pipeline
    pub fn pipeline(&self) -> &DocumentPipeline {
        &self.pipeline
    }
}
