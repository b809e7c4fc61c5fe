use clap::Parser;
use coremodel_codegen::{Layout, resolve_root};
use eyre::{Result, WrapErr};

use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

/// Generate the Rust and TypeScript code of every coremodel, and the
/// registry wiring them together.
///
/// Run from `pkg/framework/coremodel`; the repository root is three
/// directories up. No arguments are accepted.
#[derive(Parser)]
#[command(name = "coremodel")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub(crate) struct Cli {}

impl Cli {
    pub fn run(&self) -> Result<()> {
        let cwd = std::env::current_dir().wrap_err("could not determine working directory")?;
        let root = resolve_root(&cwd)?;
        tracing::debug!(root = %root.display(), "resolved repository root");

        let layout = Layout::load(root)?;
        let report = ops::generate(&layout)?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
