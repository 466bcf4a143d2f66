use anyhow::Result;
use clap::Args;
use clap_complete::{Shell, generate};

/// Arguments for `sg completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script generation.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Generate a shell completion script for `command` to `out`.
pub fn write_completions(shell: Shell, command: &mut clap::Command, out: &mut dyn std::io::Write) {
    generate(shell, command, "sg", out);
}

/// Generate shell completion script to stdout.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_completions(shell: Shell, command: &mut clap::Command) -> Result<()> {
    let mut out = std::io::stdout();
    write_completions(shell, command, &mut out);
    Ok(())
}
