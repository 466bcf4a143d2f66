//! `sg cover`: greedy dominating set, optionally step by step.

use std::io::{self, Write};

use clap::Args;
use serde::Serialize;
use sociogram_core::{CoverStep, GraphStore, VertexId, graph::greedy_cover_steps};

use super::Context;
use super::input::{InputArgs, load_graph};
use crate::output::{join_ids, pretty_kv, pretty_section, render_mode};

/// Arguments for `sg cover`.
#[derive(Args, Debug)]
pub struct CoverArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Report every selection with the vertices it influenced.
    #[arg(long)]
    pub steps: bool,
}

#[derive(Debug, Serialize)]
struct StepEntry {
    /// The selected (influencer) vertex.
    vertex: VertexId,
    gain: usize,
    /// Vertices newly covered by this selection, excluding `vertex`.
    influenced: Vec<VertexId>,
}

impl From<CoverStep> for StepEntry {
    fn from(step: CoverStep) -> Self {
        let influenced = step
            .covered
            .into_iter()
            .filter(|&v| v != step.vertex)
            .collect();
        Self {
            vertex: step.vertex,
            gain: step.gain,
            influenced,
        }
    }
}

#[derive(Debug, Serialize)]
struct CoverOutput {
    vertex_count: usize,
    cover: Vec<VertexId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    steps: Option<Vec<StepEntry>>,
}

fn build_output(graph: &GraphStore, with_steps: bool) -> CoverOutput {
    let steps = greedy_cover_steps(graph);
    let cover = steps.iter().map(|step| step.vertex).collect();
    CoverOutput {
        vertex_count: graph.vertex_count(),
        cover,
        steps: with_steps.then(|| steps.into_iter().map(StepEntry::from).collect()),
    }
}

/// Execute `sg cover`.
///
/// # Errors
///
/// Returns an error if the input cannot be loaded or output fails.
pub fn run_cover(args: &CoverArgs, ctx: &Context) -> anyhow::Result<()> {
    let graph = load_graph(&args.input, ctx)?;
    let payload = build_output(&graph, args.steps);

    render_mode(ctx.output, &payload, render_cover_text, render_cover_pretty)
}

fn write_step_lines(steps: &[StepEntry], w: &mut dyn Write) -> io::Result<()> {
    let total = steps.len();
    for (idx, step) in steps.iter().enumerate() {
        writeln!(w, "Covered {} out of {}. +{}", idx + 1, total, step.gain)?;
        writeln!(
            w,
            "  influencer: {}  influenced: {}",
            step.vertex,
            join_ids(&step.influenced)
        )?;
    }
    Ok(())
}

/// The cover on one line, or the step report when requested.
fn render_cover_text(payload: &CoverOutput, w: &mut dyn Write) -> io::Result<()> {
    match &payload.steps {
        Some(steps) => write_step_lines(steps, w),
        None => writeln!(w, "{}", join_ids(&payload.cover)),
    }
}

fn render_cover_pretty(payload: &CoverOutput, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Greedy cover")?;
    pretty_kv(w, "Vertices", payload.vertex_count.to_string())?;
    pretty_kv(w, "Cover size", payload.cover.len().to_string())?;
    pretty_kv(w, "Cover", join_ids(&payload.cover))?;

    if let Some(steps) = &payload.steps {
        writeln!(w)?;
        write_step_lines(steps, w)?;
    }
    Ok(())
}
