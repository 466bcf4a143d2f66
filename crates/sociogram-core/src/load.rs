//! Edge-list ingestion.
//!
//! Turns an edge-list document into a [`GraphStore`] using only the store's
//! registration primitives. The parser works on text already in memory; the
//! caller owns reading it from disk or a pipe.
//!
//! # Format
//!
//! ```text
//! # comment
//! 0 1        # edge 0 → 1, registering 0 and 1 on first sight
//! 1 0
//! 7          # isolated vertex
//! ```
//!
//! Tokens are separated by any whitespace. Trailing comments after the ids
//! are allowed when they start with the comment prefix.
//!
//! A line naming the same vertex twice registers the vertex but stores no
//! edge (self-loops are not modelled) and counts as skipped.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::GraphError;
use crate::graph::store::{GraphStore, VertexId};

/// How to treat the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Fail on the first malformed line instead of skipping it.
    #[serde(default)]
    pub strict: bool,
    /// Lines (and line tails) starting with this prefix are ignored.
    #[serde(default = "default_comment_prefix")]
    pub comment_prefix: String,
}

fn default_comment_prefix() -> String {
    "#".to_string()
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            strict: false,
            comment_prefix: default_comment_prefix(),
        }
    }
}

/// Counters describing one ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Total lines read, including blanks and comments.
    pub lines: usize,
    /// Registered vertices after loading.
    pub vertices: usize,
    /// Stored edges after loading (duplicates collapse).
    pub edges: usize,
    /// Lines that contributed nothing: malformed lines (lenient mode) and
    /// self-loops.
    pub skipped: usize,
}

enum Line {
    Blank,
    Vertex(VertexId),
    Edge(VertexId, VertexId),
}

const BAD_ID: &str = "vertex id is not a non-negative integer";
const TOO_MANY: &str = "expected at most two vertex ids";

fn strip_comment<'a>(line: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return line;
    }
    line.find(prefix).map_or(line, |at| &line[..at])
}

fn parse_line(line: &str, prefix: &str) -> Result<Line, &'static str> {
    let body = strip_comment(line, prefix);
    let mut tokens = body.split_whitespace();
    let parse = |token: &str| token.parse::<VertexId>().map_err(|_| BAD_ID);

    match (tokens.next(), tokens.next(), tokens.next()) {
        (None, _, _) => Ok(Line::Blank),
        (Some(a), None, _) => Ok(Line::Vertex(parse(a)?)),
        (Some(a), Some(b), None) => Ok(Line::Edge(parse(a)?, parse(b)?)),
        (Some(_), Some(_), Some(_)) => Err(TOO_MANY),
    }
}

/// Parse an edge list into a new [`GraphStore`].
///
/// Both endpoints of every edge are registered before the edge is added, so
/// no edge is dropped for a missing endpoint.
///
/// # Errors
///
/// In strict mode, returns [`GraphError::Parse`] for the first malformed
/// line. In lenient mode malformed lines are logged and skipped, and this
/// never fails.
#[instrument(skip(text), fields(bytes = text.len()))]
pub fn parse_edge_list(
    text: &str,
    options: &LoadOptions,
) -> Result<(GraphStore, LoadReport), GraphError> {
    let mut graph = GraphStore::new();
    let mut report = LoadReport::default();

    for (index, raw) in text.lines().enumerate() {
        report.lines += 1;
        let line = raw.trim();

        match parse_line(line, &options.comment_prefix) {
            Ok(Line::Blank) => {}
            Ok(Line::Vertex(vertex)) => graph.add_vertex(vertex),
            Ok(Line::Edge(from, to)) => {
                graph.add_vertex(from);
                graph.add_vertex(to);
                if from == to {
                    debug!(line = index + 1, vertex = from, "self-loop dropped");
                    report.skipped += 1;
                } else {
                    graph.add_edge(from, to);
                }
            }
            Err(reason) if options.strict => {
                return Err(GraphError::Parse {
                    line: index + 1,
                    content: line.to_string(),
                    reason,
                });
            }
            Err(reason) => {
                warn!(line = index + 1, content = line, reason, "skipping malformed edge-list line");
                report.skipped += 1;
            }
        }
    }

    report.vertices = graph.vertex_count();
    report.edges = graph.edge_count();
    debug!(
        vertices = report.vertices,
        edges = report.edges,
        skipped = report.skipped,
        "edge list loaded"
    );
    Ok((graph, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenient(text: &str) -> (GraphStore, LoadReport) {
        parse_edge_list(text, &LoadOptions::default()).expect("lenient parse never fails")
    }

    #[test]
    fn empty_input() {
        let (graph, report) = lenient("");
        assert!(graph.is_empty());
        assert_eq!(report, LoadReport::default());
    }

    #[test]
    fn edges_register_both_endpoints() {
        let (graph, report) = lenient("0 1\n1 0\n1 2\n");

        assert_eq!(graph.vertices().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(graph.is_mutual(0, 1));
        assert!(graph.contains_edge(1, 2));
        assert!(!graph.contains_edge(2, 1));
        assert_eq!(
            report,
            LoadReport {
                lines: 3,
                vertices: 3,
                edges: 3,
                skipped: 0
            }
        );
    }

    #[test]
    fn comments_blanks_and_whitespace() {
        let text = "# header\n\n  3\t4  \n4 3 # reciprocal\n   \n# 9 9\n";
        let (graph, report) = lenient(text);

        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(3, 4), (4, 3)]);
        assert_eq!(report.lines, 6);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn single_id_registers_isolated_vertex() {
        let (graph, _) = lenient("1 2\n7\n");
        assert!(graph.contains_vertex(7));
        assert!(graph.neighbors(7).is_empty());
    }

    #[test]
    fn duplicate_edges_collapse() {
        let (graph, report) = lenient("1 2\n1 2\n");
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(report.edges, 1);
    }

    #[test]
    fn self_loop_is_skipped_but_vertex_kept() {
        let (graph, report) = lenient("5 5\n");
        assert!(graph.contains_vertex(5));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn lenient_mode_skips_malformed_lines() {
        let (graph, report) = lenient("1 2\nx 3\n1 2 3\n-4 1\n2 1\n");

        assert_eq!(graph.vertices().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(report.skipped, 3);
        assert_eq!(report.edges, 2);
    }

    #[test]
    fn strict_mode_reports_first_bad_line() {
        let options = LoadOptions {
            strict: true,
            ..LoadOptions::default()
        };

        let err = parse_edge_list("1 2\n\n1 two\n3 x\n", &options).expect_err("strict must fail");

        assert_eq!(
            err,
            GraphError::Parse {
                line: 3,
                content: "1 two".to_string(),
                reason: BAD_ID,
            }
        );
    }

    #[test]
    fn strict_mode_rejects_extra_tokens() {
        let options = LoadOptions {
            strict: true,
            ..LoadOptions::default()
        };

        let err = parse_edge_list("1 2 3\n", &options).expect_err("strict must fail");

        assert!(matches!(err, GraphError::Parse { line: 1, reason: TOO_MANY, .. }));
    }

    #[test]
    fn custom_comment_prefix() {
        let options = LoadOptions {
            strict: true,
            comment_prefix: "%".to_string(),
        };

        let (graph, _) = parse_edge_list("% matrix market style\n1 2 % weight\n", &options)
            .expect("parse");

        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(1, 2)]);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: LoadOptions = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(options, LoadOptions::default());
    }
}
