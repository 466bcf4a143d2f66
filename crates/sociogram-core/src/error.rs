//! Error types for graph ingestion.
//!
//! The graph algorithms themselves are total: invalid input degrades to a
//! no-op or an empty result. Only turning external text into a
//! [`GraphStore`](crate::graph::GraphStore) and explicit vertex checks can
//! fail.

use crate::graph::VertexId;

/// Errors raised while building or querying a graph from external input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A line of an edge list could not be interpreted (strict mode only).
    #[error("line {line}: {reason}: {content:?}")]
    Parse {
        /// 1-based line number in the source document.
        line: usize,
        /// The offending line, trimmed.
        content: String,
        /// Short description of what was wrong.
        reason: &'static str,
    },

    /// A vertex id was required to be registered but is not.
    #[error("vertex {0} is not registered in the graph")]
    UnknownVertex(VertexId),
}

impl GraphError {
    /// Stable machine-readable identifier for CLI and JSON output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "parse_error",
            Self::UnknownVertex(_) => "unknown_vertex",
        }
    }

    /// Remediation hint that can be surfaced to operators.
    #[must_use]
    pub fn suggestion(&self) -> String {
        match self {
            Self::Parse { line, .. } => format!(
                "fix line {line} (expected `<from> <to>` or a single vertex id), or load without strict mode"
            ),
            Self::UnknownVertex(id) => {
                format!("vertex {id} does not appear in the loaded edge list")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display_includes_line_and_content() {
        let err = GraphError::Parse {
            line: 7,
            content: "1 x".to_string(),
            reason: "vertex id is not a non-negative integer",
        };

        let rendered = err.to_string();
        assert!(rendered.starts_with("line 7:"), "got {rendered}");
        assert!(rendered.contains("\"1 x\""), "got {rendered}");
        assert_eq!(err.error_code(), "parse_error");
        assert!(err.suggestion().contains("line 7"));
    }

    #[test]
    fn unknown_vertex_display() {
        let err = GraphError::UnknownVertex(42);
        assert_eq!(err.to_string(), "vertex 42 is not registered in the graph");
        assert_eq!(err.error_code(), "unknown_vertex");
    }
}
