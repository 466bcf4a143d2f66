//! `sg scc`: list strongly connected components.

use std::io::{self, Write};

use clap::Args;
use serde::Serialize;
use sociogram_core::{GraphStore, VertexId, graph::strongly_connected_components};

use super::Context;
use super::input::{InputArgs, load_graph};
use crate::output::{join_ids, pretty_kv, pretty_section, render_mode};

/// Arguments for `sg scc`.
#[derive(Args, Debug)]
pub struct SccArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Only list components with at least this many vertices.
    #[arg(long, value_name = "N")]
    pub min_size: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ComponentEntry {
    size: usize,
    vertices: Vec<VertexId>,
    edges: Vec<(VertexId, VertexId)>,
}

#[derive(Debug, Serialize)]
struct SccOutput {
    total: usize,
    min_size: usize,
    components: Vec<ComponentEntry>,
}

/// Largest components first; equal sizes ordered by smallest member.
fn build_output(graph: &GraphStore, min_size: usize) -> SccOutput {
    let components = strongly_connected_components(graph);
    let total = components.len();

    let mut entries: Vec<ComponentEntry> = components
        .iter()
        .filter(|component| component.vertex_count() >= min_size)
        .map(|component| ComponentEntry {
            size: component.vertex_count(),
            vertices: component.vertices().collect(),
            edges: component.edges().collect(),
        })
        .collect();
    entries.sort_by(|a, b| {
        b.size
            .cmp(&a.size)
            .then_with(|| a.vertices.first().cmp(&b.vertices.first()))
    });

    SccOutput {
        total,
        min_size,
        components: entries,
    }
}

/// Execute `sg scc`.
///
/// # Errors
///
/// Returns an error if the input cannot be loaded or output fails.
pub fn run_scc(args: &SccArgs, ctx: &Context) -> anyhow::Result<()> {
    let graph = load_graph(&args.input, ctx)?;
    let min_size = args.min_size.unwrap_or(ctx.scc_min_size);
    let payload = build_output(&graph, min_size);

    render_mode(ctx.output, &payload, render_scc_text, render_scc_pretty)
}

/// One component per line, members space separated.
fn render_scc_text(payload: &SccOutput, w: &mut dyn Write) -> io::Result<()> {
    for component in &payload.components {
        writeln!(w, "{}", join_ids(&component.vertices))?;
    }
    Ok(())
}

fn render_scc_pretty(payload: &SccOutput, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Strongly connected components")?;
    pretty_kv(w, "Total", payload.total.to_string())?;
    pretty_kv(
        w,
        "Shown",
        format!(
            "{} (min size {})",
            payload.components.len(),
            payload.min_size
        ),
    )?;

    if payload.components.is_empty() {
        writeln!(w, "\nNo components match.")?;
        return Ok(());
    }

    for (idx, component) in payload.components.iter().enumerate() {
        writeln!(w, "\nComponent {} ({} vertices)", idx + 1, component.size)?;
        writeln!(w, "  members: {}", join_ids(&component.vertices))?;
        if !component.edges.is_empty() {
            let edges: Vec<String> = component
                .edges
                .iter()
                .map(|(from, to)| format!("{from}->{to}"))
                .collect();
            writeln!(w, "  edges:   {}", edges.join(" "))?;
        }
    }

    Ok(())
}
