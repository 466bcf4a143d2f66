pub mod completions;
pub mod cover;
pub mod egonet;
pub mod input;
pub mod scc;
pub mod stats;

use sociogram_core::LoadOptions;

use crate::output::OutputMode;

/// Settings resolved once in `main` and shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub output: OutputMode,
    pub load: LoadOptions,
    /// Default for `sg scc --min-size`.
    pub scc_min_size: usize,
    pub quiet: bool,
}
