//! Shared edge-list input handling for graph commands.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Args;
use sociogram_core::{GraphStore, LoadOptions, LoadReport, parse_edge_list};
use tracing::debug;

use super::Context;
use crate::output::OutputMode;

/// Input arguments common to every graph command.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Edge-list file (`<from> <to>` per line), or `-` to read stdin.
    pub file: PathBuf,

    /// Fail on the first malformed line instead of skipping it.
    #[arg(long)]
    pub strict: bool,
}

impl InputArgs {
    /// Effective load options: `--strict` turns strict mode on over the config.
    pub fn load_options(&self, base: &LoadOptions) -> LoadOptions {
        LoadOptions {
            strict: self.strict || base.strict,
            ..base.clone()
        }
    }
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read edge list from stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn summary_line(path: &Path, report: &LoadReport) -> String {
    let mut line = format!(
        "Loaded {} vertices and {} edges from {}",
        report.vertices,
        report.edges,
        path.display()
    );
    if report.skipped > 0 {
        line.push_str(&format!(" ({} lines skipped)", report.skipped));
    }
    line
}

/// Read and parse the edge list named by `input`.
///
/// Parse failures surface as [`sociogram_core::GraphError`] inside the
/// returned error so `main` can render their code and suggestion.
///
/// # Errors
///
/// Returns an error if the source cannot be read, or if strict mode is on
/// and a line is malformed.
pub fn load_graph(input: &InputArgs, ctx: &Context) -> Result<GraphStore> {
    let text = read_source(&input.file)?;
    let options = input.load_options(&ctx.load);
    let (graph, report) = parse_edge_list(&text, &options)?;

    debug!(
        file = %input.file.display(),
        vertices = report.vertices,
        edges = report.edges,
        skipped = report.skipped,
        "graph loaded"
    );
    if ctx.output == OutputMode::Pretty && !ctx.quiet {
        eprintln!("{}", summary_line(&input.file, &report));
    }

    Ok(graph)
}
