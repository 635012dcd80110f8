//! Version table and the driver that applies it.

use serde_json::Value;

use super::{stamp, v1, v2, v3, Document, CURRENT_VERSION, VERSION_KEY};

/// One schema step: previous version's document in, this version's out.
pub type Transition = fn(Document) -> Document;

/// Every schema step, in ascending version order.
pub static MIGRATIONS: [(u32, Transition); 3] = [
    (v1::VERSION, v1::transition as Transition),
    (v2::VERSION, v2::transition as Transition),
    (v3::VERSION, v3::transition as Transition),
];

/// Version tag of `doc`.
///
/// An empty document counts as 0 and is seeded from scratch. A non-empty
/// document with a missing or non-numeric tag predates tagging and counts
/// as version 1, so its values are overlaid by every later step.
pub fn document_version(doc: &Document) -> u32 {
    if doc.is_empty() {
        return 0;
    }
    doc.get(VERSION_KEY)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .filter(|v| *v > 0)
        .unwrap_or(v1::VERSION)
}

/// Migrate any persisted value (including `null`) to [`CURRENT_VERSION`].
pub fn migrate(value: Value) -> Document {
    migrate_to(value, CURRENT_VERSION)
}

/// Applies every step newer than the document's tag, up to `target`
/// (capped at [`CURRENT_VERSION`]). The result is always tagged `target`.
pub fn migrate_to(value: Value, target: u32) -> Document {
    let target = target.min(CURRENT_VERSION);
    let mut doc = match value {
        Value::Object(map) => map,
        _ => Document::new(),
    };
    let from = document_version(&doc);
    for (_, step) in MIGRATIONS
        .iter()
        .filter(|(version, _)| *version > from && *version <= target)
    {
        doc = step(doc);
    }
    stamp(&mut doc, target);
    doc
}
