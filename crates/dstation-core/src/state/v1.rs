//! Version 1: the seed shape. Settings plus the cached task list.

use serde_json::json;

use super::{stamp, Document};

pub const VERSION: u32 = 1;

/// Full default document for version 1.
pub fn defaults() -> Document {
    let seed = json!({
        "connection": {
            "protocol": "https",
            "hostname": "",
            "port": 5001,
            "username": "",
            "password": ""
        },
        "visibleTasks": {
            "downloading": true,
            "uploading": true,
            "completed": true,
            "errored": true,
            "other": true
        },
        "taskSortType": "name-asc",
        "notifications": {
            "enableFeedbackNotifications": true,
            "enableCompletionNotifications": false,
            "completionPollingInterval": 60
        },
        "shouldHandleDownloadLinks": true,
        "tasks": [],
        "taskFetchFailureReason": null,
        "tasksLastInitiatedFetchTimestamp": null,
        "tasksLastCompletedFetchTimestamp": null,
        "cachedTasksVersion": 1
    });
    let mut doc = match seed {
        serde_json::Value::Object(map) => map,
        _ => Document::new(),
    };
    stamp(&mut doc, VERSION);
    doc
}

/// There is no version 0 shape; whatever was passed in is discarded.
pub fn transition(_prev: Document) -> Document {
    defaults()
}
