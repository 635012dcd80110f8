//! Persisted client state and its schema migrations.
//!
//! On disk the state is a flat JSON object tagged with `stateVersion`. Each
//! schema version has its own module with the full default document for that
//! version and a pure `transition` from the previous shape. [`migrate`] walks
//! the [`MIGRATIONS`] table upward from whatever version a document carries,
//! so any older (or empty) document ends up in the current shape and can be
//! decoded into [`State`].

mod chain;
mod persist;
mod shape;
pub mod v1;
pub mod v2;
pub mod v3;

pub use chain::{document_version, migrate, migrate_to, Transition, MIGRATIONS};
pub use shape::{
    CachedTasks, ConnectionSettings, FailureKeyword, LogLevel, Logging, LoggingSettings,
    NotificationSettings, Protocol, Settings, State, TaskFetchFailureReason, TaskSortType,
    VisibleTaskSettings,
};
pub use v3::transition;

/// A persisted state document.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Key carrying the schema version.
pub const VERSION_KEY: &str = "stateVersion";

pub const CURRENT_VERSION: u32 = 3;

/// Copies every top-level key of `doc` onto `base`; values already in `doc` win.
pub(crate) fn overlay(base: &mut Document, doc: Document) {
    for (key, value) in doc {
        base.insert(key, value);
    }
}

pub(crate) fn stamp(doc: &mut Document, version: u32) {
    doc.insert(VERSION_KEY.to_string(), version.into());
}
