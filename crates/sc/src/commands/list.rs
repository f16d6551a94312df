//! `sc list` command implementation.

use std::io::Write;

use super::Context;
use crate::error::CliError;
use crate::output::Output;

/// Print the display label of every active shortcode, ordered by tag.
pub(crate) fn list(ctx: &Context, out: &mut impl Write) -> Result<(), CliError> {
    let active = ctx.addon.active_shortcodes()?;
    if active.is_empty() {
        Output::new().warning("No active shortcodes");
        return Ok(());
    }
    for shortcode in active.iter() {
        writeln!(out, "{shortcode}")?;
    }
    Ok(())
}
