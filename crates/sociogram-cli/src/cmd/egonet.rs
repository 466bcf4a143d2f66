//! `sg egonet`: the mutual neighborhood of one vertex.

use std::io::{self, Write};

use clap::Args;
use serde::Serialize;
use sociogram_core::{GraphStore, VertexId, graph::egonet};

use super::Context;
use super::input::{InputArgs, load_graph};
use crate::output::{join_ids, pretty_kv, pretty_section, render_mode};

/// Arguments for `sg egonet`.
#[derive(Args, Debug)]
pub struct EgonetArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Center vertex id.
    pub center: VertexId,
}

#[derive(Debug, Serialize)]
struct EgonetOutput {
    center: VertexId,
    vertices: Vec<VertexId>,
    edges: Vec<(VertexId, VertexId)>,
}

impl EgonetOutput {
    fn from_egonet(center: VertexId, ego: &GraphStore) -> Self {
        Self {
            center,
            vertices: ego.vertices().collect(),
            edges: ego.edges().collect(),
        }
    }

    /// Each reciprocated edge once, as `(low, high)`.
    fn pairs(&self) -> impl Iterator<Item = &(VertexId, VertexId)> {
        self.edges.iter().filter(|(from, to)| from < to)
    }
}

/// Execute `sg egonet`.
///
/// # Errors
///
/// Returns an error if the input cannot be loaded, if `center` is not a
/// vertex of the loaded graph, or if output fails.
pub fn run_egonet(args: &EgonetArgs, ctx: &Context) -> anyhow::Result<()> {
    let graph = load_graph(&args.input, ctx)?;
    graph.require_vertex(args.center)?;

    let ego = egonet(&graph, args.center);
    let payload = EgonetOutput::from_egonet(args.center, &ego);

    render_mode(ctx.output, &payload, render_egonet_text, render_egonet_pretty)
}

/// Members on the first line, then one `from to` edge per line.
fn render_egonet_text(payload: &EgonetOutput, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{}", join_ids(&payload.vertices))?;
    for (from, to) in &payload.edges {
        writeln!(w, "{from} {to}")?;
    }
    Ok(())
}

fn render_egonet_pretty(payload: &EgonetOutput, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Egonet of {}", payload.center))?;
    pretty_kv(w, "Members", join_ids(&payload.vertices))?;
    pretty_kv(w, "Mutual friends", payload.vertices.len().saturating_sub(1).to_string())?;

    let mut pairs = payload.pairs().peekable();
    if pairs.peek().is_none() {
        writeln!(w, "\nNo mutual connections.")?;
        return Ok(());
    }

    writeln!(w, "\nConnections:")?;
    for (low, high) in pairs {
        writeln!(w, "  {low} <-> {high}")?;
    }
    Ok(())
}
