//! Infrastructure layer for the console.
//!
//! Contains the file-system facing adapters: key/value storage for the
//! dashboard document and the TOML settings file of the console itself.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `opsdash_core`, but MUST NOT be imported by the `application` layer.

pub mod settings;
pub mod storage;
