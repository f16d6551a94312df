//! `sc replace` command implementation.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;

use super::Context;
use crate::error::CliError;

/// Arguments for the replace command.
#[derive(Args)]
pub(crate) struct ReplaceArgs {
    /// Input file (default: stdin; `-` also reads stdin).
    pub(crate) file: Option<PathBuf>,
}

impl ReplaceArgs {
    /// Execute the replace command.
    ///
    /// Fails when the addon is disabled, so scripts can tell unprocessed
    /// output apart.
    pub(crate) fn execute(self, ctx: &Context, out: &mut impl Write) -> Result<(), CliError> {
        let content = match self.file.as_deref() {
            Some(path) if path != Path::new("-") => std::fs::read(path)?,
            _ => {
                let mut buf = Vec::new();
                std::io::stdin().lock().read_to_end(&mut buf)?;
                buf
            }
        };

        let output = ctx.addon.replace(&content)?;
        out.write_all(&output)?;
        out.flush()?;
        Ok(())
    }
}
