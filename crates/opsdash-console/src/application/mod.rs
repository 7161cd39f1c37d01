//! Application layer use cases for the console.
//!
//! - **`config_store`** – the [`config_store::KeyValueStorage`] abstraction
//!   and the load/save rules for the dashboard document on top of it.
//! - **`session`**      – owns the live configuration and the edit draft;
//!   every change to what the dashboard shows goes through a
//!   [`session::DashboardSession`].
//! - **`transfer`**     – export to and import from pasted JSON text.
//!
//! Nothing here touches the file system directly.  Concrete storage adapters
//! are injected from the infrastructure layer.

pub mod config_store;
pub mod session;
pub mod transfer;
