//! Version 2: adds the logging sub-record (`logging`, `lastSevereError`).

use serde_json::json;

use super::{overlay, stamp, v1, Document};

pub const VERSION: u32 = 2;

pub fn defaults() -> Document {
    let mut doc = v1::defaults();
    doc.insert(
        "logging".to_string(),
        json!({ "enabled": false, "level": "warn" }),
    );
    doc.insert("lastSevereError".to_string(), serde_json::Value::Null);
    stamp(&mut doc, VERSION);
    doc
}

pub fn transition(prev: Document) -> Document {
    let mut doc = defaults();
    overlay(&mut doc, prev);
    stamp(&mut doc, VERSION);
    doc
}
