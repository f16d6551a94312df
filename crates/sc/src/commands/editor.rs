//! `sc editor` command implementation.

use std::io::Write;

use clap::Args;
use sc_editor::Editable;
use sc_host::Item;
use sc_shortcodes::{ITEM_TYPE, Shortcode};
use sc_storage::Storage;

use super::Context;
use crate::error::CliError;

/// Arguments for the editor command.
#[derive(Args)]
pub(crate) struct EditorArgs {
    /// Tag of the stored shortcode.
    pub(crate) tag: String,
}

impl EditorArgs {
    /// Execute the editor command.
    ///
    /// Records are decoded through the type registry, the way the host's
    /// admin does, so the item type must be registered (addon enabled).
    pub(crate) fn execute(self, ctx: &Context, out: &mut impl Write) -> Result<(), CliError> {
        for payload in ctx.storage.content_all(ITEM_TYPE)? {
            let item = ctx.types.decode(ITEM_TYPE, &payload)?;
            let matches = item
                .as_any()
                .downcast_ref::<Shortcode>()
                .is_some_and(|sc| sc.tag == self.tag);
            if matches {
                out.write_all(&item.marshal_editor()?)?;
                writeln!(out)?;
                return Ok(());
            }
        }
        Err(CliError::Validation(format!(
            "No shortcode with tag {:?}",
            self.tag
        )))
    }
}

#[cfg(test)]
mod tests {
    use sc_host::{ItemError, Status};

    use super::*;
    use crate::commands::testing;

    fn run(ctx: &Context, tag: &str) -> Result<String, CliError> {
        let mut out = Vec::new();
        EditorArgs {
            tag: tag.to_owned(),
        }
        .execute(ctx, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_editor_renders_form() {
        let dir = tempfile::tempdir().unwrap();
        testing::write_status(dir.path(), Status::Enabled);
        testing::write_shortcode(dir.path(), "year", &Shortcode::new("year", "Year", "<b>2024</b>"));
        let ctx = testing::open(dir.path());

        let html = run(&ctx, "year").unwrap();

        assert!(html.starts_with(r#"<div class="editor" data-item-type="Shortcode">"#));
        assert!(html.contains(r#"value="year""#));
        assert!(html.contains("&lt;b&gt;2024&lt;/b&gt;"));
        assert!(html.ends_with("</div>\n"));
    }

    #[test]
    fn test_editor_unknown_tag() {
        let dir = tempfile::tempdir().unwrap();
        testing::write_status(dir.path(), Status::Enabled);
        testing::write_shortcode(dir.path(), "year", &Shortcode::new("year", "Year", "2024"));
        let ctx = testing::open(dir.path());

        let err = run(&ctx, "month").unwrap_err();

        assert_eq!(err.to_string(), "No shortcode with tag \"month\"");
    }

    #[test]
    fn test_editor_requires_enabled_addon() {
        let dir = tempfile::tempdir().unwrap();
        testing::write_status(dir.path(), Status::Disabled);
        testing::write_shortcode(dir.path(), "year", &Shortcode::new("year", "Year", "2024"));
        let ctx = testing::open(dir.path());

        let err = run(&ctx, "year").unwrap_err();

        assert!(matches!(err, CliError::Item(ItemError::UnknownType(_))));
    }
}
