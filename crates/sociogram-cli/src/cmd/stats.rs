//! `sg stats`: structural summary of a graph.

use std::io::{self, Write};

use clap::Args;
use sociogram_core::GraphStats;

use super::Context;
use super::input::{InputArgs, load_graph};
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `sg stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Execute `sg stats`.
///
/// # Errors
///
/// Returns an error if the input cannot be loaded or output fails.
pub fn run_stats(args: &StatsArgs, ctx: &Context) -> anyhow::Result<()> {
    let graph = load_graph(&args.input, ctx)?;
    let stats = GraphStats::compute(&graph);

    render_mode(ctx.output, &stats, render_stats_text, render_stats_pretty)
}

fn rows(stats: &GraphStats) -> [(&'static str, String); 13] {
    [
        ("vertices", stats.vertex_count.to_string()),
        ("edges", stats.edge_count.to_string()),
        ("mutual_pairs", stats.mutual_pair_count.to_string()),
        ("density", format!("{:.6}", stats.density)),
        ("scc_count", stats.scc_count.to_string()),
        ("nontrivial_sccs", stats.nontrivial_scc_count.to_string()),
        ("largest_scc", stats.largest_scc_size.to_string()),
        (
            "weak_components",
            stats.weakly_connected_component_count.to_string(),
        ),
        ("isolated", stats.isolated_vertex_count.to_string()),
        ("max_in_degree", stats.max_in_degree.to_string()),
        ("max_out_degree", stats.max_out_degree.to_string()),
        ("cover_size", stats.cover_size.to_string()),
        ("content_hash", stats.content_hash.clone()),
    ]
}

/// `key value` per line, keys stable for scripting.
fn render_stats_text(stats: &GraphStats, w: &mut dyn Write) -> io::Result<()> {
    for (key, value) in rows(stats) {
        writeln!(w, "{key} {value}")?;
    }
    Ok(())
}

fn render_stats_pretty(stats: &GraphStats, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Graph statistics")?;
    pretty_kv(w, "Vertices", stats.vertex_count.to_string())?;
    pretty_kv(w, "Edges", stats.edge_count.to_string())?;
    pretty_kv(w, "Mutual pairs", stats.mutual_pair_count.to_string())?;
    pretty_kv(w, "Density", format!("{:.4}", stats.density))?;
    pretty_kv(w, "Isolated vertices", stats.isolated_vertex_count.to_string())?;
    pretty_kv(
        w,
        "Max degree",
        format!("in {}, out {}", stats.max_in_degree, stats.max_out_degree),
    )?;

    writeln!(w)?;
    pretty_section(w, "Components")?;
    pretty_kv(
        w,
        "Strong",
        format!(
            "{} ({} non-trivial, largest {})",
            stats.scc_count, stats.nontrivial_scc_count, stats.largest_scc_size
        ),
    )?;
    pretty_kv(w, "Weak", stats.weakly_connected_component_count.to_string())?;
    pretty_kv(w, "Greedy cover", format!("{} vertices", stats.cover_size))?;

    writeln!(w)?;
    pretty_kv(w, "Content hash", &stats.content_hash)
}
