//! Errors surfaced by the rendering pipeline.

use std::fmt;

use thiserror::Error;

use crate::content::ContentError;

/// Pipeline stage at which a generation failure occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderStage {
    /// Composing pages from structured content.
    Compose,
    /// Serializing the composed document to PDF bytes.
    Serialize,
}

impl fmt::Display for RenderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderStage::Compose => f.write_str("composition"),
            RenderStage::Serialize => f.write_str("serialization"),
        }
    }
}

/// Failure while rendering a document.
///
/// Generation failures are terminal for the given input: retrying the same
/// render reproduces the same failure, so callers surface a single "failed to
/// generate the document" message instead of retrying.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The supplied content violates a structural invariant.
    #[error("invalid document content: {0}")]
    InvalidContent(#[from] ContentError),
    /// A draw or serialization step failed; the cause is preserved.
    #[error("failed to generate the document during {stage}")]
    Generation {
        /// Stage that produced the failure.
        stage: RenderStage,
        /// Underlying cause.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RenderError {
    /// Wraps an underlying failure with the stage it occurred in.
    pub(crate) fn generation(
        stage: RenderStage,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        RenderError::Generation {
            stage,
            source: source.into(),
        }
    }
}
