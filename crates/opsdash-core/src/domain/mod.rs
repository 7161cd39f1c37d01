//! Domain entities and rules for the operations dashboard.
//!
//! Everything in here is pure: no file system, no clock, no global state.
//! The console crate owns persistence and the edit session; this module only
//! answers "what does a valid configuration look like" and "how do I get one
//! from whatever the operator or the store handed me".
//!
//! - **`config`**    – the [`config::DashboardConfig`] entity, panel ids and
//!   built-in defaults.
//! - **`merge`**     – schema validation of untrusted JSON and the pure
//!   overlay merge.
//! - **`normalize`** – column-width and panel-content normalization, loose
//!   number coercion.
//! - **`editor`**    – raw editor input and the commit rules.
//! - **`presets`**   – named column layouts.
//! - **`hints`**     – advisory checks on panel content.

pub mod config;
pub mod editor;
pub mod hints;
pub mod merge;
pub mod normalize;
pub mod presets;

mod number;
