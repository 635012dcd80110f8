//! Version 3: retires `cachedTasksVersion` and clears `lastSevereError`.

use super::{overlay, stamp, v2, Document};

pub const VERSION: u32 = 3;

const RETIRED: &[&str] = &["cachedTasksVersion"];

pub fn defaults() -> Document {
    let mut doc = v2::defaults();
    for key in RETIRED {
        doc.remove(*key);
    }
    stamp(&mut doc, VERSION);
    doc
}

pub fn transition(prev: Document) -> Document {
    let mut doc = defaults();
    overlay(&mut doc, prev);
    for key in RETIRED {
        doc.remove(*key);
    }
    doc.insert("lastSevereError".to_string(), serde_json::Value::Null);
    stamp(&mut doc, VERSION);
    doc
}
