//! `sc add` command implementation.

use clap::Args;
use sc_shortcodes::{ITEM_TYPE, Shortcode};

use super::Context;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the add command.
#[derive(Args)]
pub(crate) struct AddArgs {
    /// Tag used inside brackets (lowercase letters only).
    pub(crate) tag: String,

    /// Text substituted for the tag.
    pub(crate) replacement: String,

    /// Admin-facing description.
    #[arg(short = 'D', long, default_value = "")]
    pub(crate) description: String,

    /// Store the shortcode without activating it.
    #[arg(long)]
    pub(crate) inactive: bool,
}

impl AddArgs {
    /// Execute the add command.
    ///
    /// The record is stored under its tag as id. A record already stored
    /// under that id is updated in place and is not counted as a tag
    /// collision; any other active record with the same tag is.
    pub(crate) fn execute(self, ctx: &Context) -> Result<(), CliError> {
        let mut shortcode = Shortcode::new(self.tag, self.description, self.replacement);
        shortcode.active = !self.inactive;
        shortcode.validate()?;

        let mut previous = None;
        let mut others = Vec::new();
        for (id, payload) in ctx.storage.records(ITEM_TYPE)? {
            let stored: Shortcode = serde_json::from_slice(&payload)?;
            if id == shortcode.tag {
                previous = Some(stored);
            } else {
                others.push(stored);
            }
        }
        shortcode.check_unique_tag(&others)?;

        ctx.storage
            .write_record(ITEM_TYPE, &shortcode.tag, &serde_json::to_vec(&shortcode)?)?;
        tracing::info!(tag = %shortcode.tag, active = shortcode.active, "Stored shortcode");

        let output = Output::new();
        match previous {
            Some(previous) if previous.active && !shortcode.active => {
                output.warning(&format!("Deactivated [{}]", shortcode.tag));
            }
            Some(_) => output.success(&format!("Updated {shortcode}")),
            None => output.success(&format!("Added {shortcode}")),
        }
        Ok(())
    }
}
