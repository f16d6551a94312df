//! Host-side addon and item type registries.
//!
//! An addon plugs into the host through three seams, all owned by the host
//! and passed to the addon explicitly:
//!
//! - [`AddonRegistry`]: addons register under their [`Meta`]; the derived
//!   [`key_from_meta`] key addresses the addon's persisted [`AddonConfig`]
//!   and its enable/disable [`Addon`] hooks.
//! - [`TypeRegistry`]: addons contribute content types as typed
//!   [`ItemFactory`]s so the host can create, decode and edit records
//!   generically.
//! - [`HookRequest`]/[`HookResponse`]: HTTP-style context handed to lifecycle
//!   hooks.

mod addon;
mod item;
mod meta;

pub use addon::{Addon, AddonRegistry, HookRequest, HookResponse};
pub use item::{Item, ItemError, ItemFactory, TypeRegistry};
pub use meta::{AddonConfig, AddonError, Meta, Status, key_from_meta};
