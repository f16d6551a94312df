//! `sc status`, `sc enable` and `sc disable` command implementations.

use std::io::Write;

use sc_host::{AddonConfig, HookRequest, HookResponse, Status};
use sc_shortcodes::{LoadError, Shortcodes};
use sc_storage::StorageErrorKind;

use super::Context;
use crate::error::CliError;
use crate::output::Output;

/// Print the addon key and its stored status.
///
/// An addon that was never configured reports as disabled.
pub(crate) fn status(ctx: &Context, out: &mut impl Write) -> Result<(), CliError> {
    let status = match ctx.addon.config() {
        Ok(config) => config.status,
        Err(LoadError::Storage(e)) if e.kind() == StorageErrorKind::NotFound => Status::Disabled,
        Err(e) => return Err(e.into()),
    };
    writeln!(out, "{}: {status}", ctx.key)?;
    Ok(())
}

/// Store the enabled status and run the addon's enable hook.
pub(crate) fn enable(ctx: &Context) -> Result<(), CliError> {
    set_status(ctx, Status::Enabled)?;
    Output::new().success(&format!("Enabled {}", ctx.key));
    Ok(())
}

/// Store the disabled status and run the addon's disable hook.
pub(crate) fn disable(ctx: &Context) -> Result<(), CliError> {
    set_status(ctx, Status::Disabled)?;
    Output::new().success(&format!("Disabled {}", ctx.key));
    Ok(())
}

fn set_status(ctx: &Context, status: Status) -> Result<(), CliError> {
    let config = AddonConfig::new(Shortcodes::meta(), status);
    ctx.storage.write_addon(&ctx.key, &config.to_vec()?)?;

    let action = match status {
        Status::Enabled => "enable",
        Status::Disabled => "disable",
    };
    let req = HookRequest::new("POST", format!("/admin/addons/{action}"));
    let mut res = HookResponse::default();
    match status {
        Status::Enabled => ctx.addons.after_enable(&ctx.key, &req, &mut res)?,
        Status::Disabled => ctx.addons.after_disable(&ctx.key, &req, &mut res)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sc_shortcodes::ITEM_TYPE;

    use super::*;
    use crate::commands::testing;

    fn status_line(ctx: &Context) -> String {
        let mut out = Vec::new();
        status(ctx, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_status_unconfigured() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = testing::open(dir.path());

        assert_eq!(status_line(&ctx), format!("{}: disabled\n", ctx.key));
    }

    #[test]
    fn test_enable_then_disable() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = testing::open(dir.path());
        assert!(!ctx.types.contains(ITEM_TYPE));

        enable(&ctx).unwrap();
        assert_eq!(status_line(&ctx), format!("{}: enabled\n", ctx.key));
        assert!(ctx.types.contains(ITEM_TYPE));
        assert!(ctx.addon.replace(b"no tags").is_ok());

        disable(&ctx).unwrap();
        assert_eq!(status_line(&ctx), format!("{}: disabled\n", ctx.key));
        assert!(!ctx.types.contains(ITEM_TYPE));
        assert!(ctx.addon.replace(b"no tags").unwrap_err().is_disabled());
    }

    #[test]
    fn test_enabled_status_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        enable(&testing::open(dir.path())).unwrap();

        let reopened = testing::open(dir.path());

        assert!(reopened.types.contains(ITEM_TYPE));
    }

    #[test]
    fn test_corrupt_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = sc_storage_fs::FsStorage::new(dir.path().to_path_buf());
        storage
            .write_addon(&Shortcodes::key().unwrap(), b"not json")
            .unwrap();
        let ctx = testing::open(dir.path());
        let mut out = Vec::new();

        let err = status(&ctx, &mut out).unwrap_err();

        assert!(matches!(err, CliError::Load(LoadError::Decode(_))));
    }
}
