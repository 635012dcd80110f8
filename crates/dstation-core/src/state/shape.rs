//! Typed view of the current state version.
//!
//! The persisted document is flat: the sub-records below are flattened into a
//! single JSON object with camelCase keys.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{v3, Document, CURRENT_VERSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    #[default]
    Https,
}

impl Protocol {
    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSettings {
    pub protocol: Protocol,
    pub hostname: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            protocol: Protocol::Https,
            hostname: String::new(),
            port: 5001,
            username: String::new(),
            password: String::new(),
        }
    }
}

impl ConnectionSettings {
    /// `{protocol}://{hostname}:{port}`, or None until a hostname is configured.
    pub fn base_url(&self) -> Option<String> {
        let host = self.hostname.trim();
        if host.is_empty() {
            return None;
        }
        Some(format!("{}://{}:{}", self.protocol.as_str(), host, self.port))
    }

    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleTaskSettings {
    pub downloading: bool,
    pub uploading: bool,
    pub completed: bool,
    pub errored: bool,
    pub other: bool,
}

impl Default for VisibleTaskSettings {
    fn default() -> Self {
        Self {
            downloading: true,
            uploading: true,
            completed: true,
            errored: true,
            other: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskSortType {
    #[default]
    NameAsc,
    NameDesc,
    TimestampAddedAsc,
    TimestampAddedDesc,
    TimestampCompletedAsc,
    TimestampCompletedDesc,
    CompletedPercentAsc,
    CompletedPercentDesc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub enable_feedback_notifications: bool,
    pub enable_completion_notifications: bool,
    /// Seconds between completion polls.
    pub completion_polling_interval: u32,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enable_feedback_notifications: true,
            enable_completion_notifications: false,
            completion_polling_interval: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub connection: ConnectionSettings,
    pub visible_tasks: VisibleTaskSettings,
    pub task_sort_type: TaskSortType,
    pub notifications: NotificationSettings,
    pub should_handle_download_links: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            connection: ConnectionSettings::default(),
            visible_tasks: VisibleTaskSettings::default(),
            task_sort_type: TaskSortType::default(),
            notifications: NotificationSettings::default(),
            should_handle_download_links: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKeyword {
    #[serde(rename = "missing-config")]
    MissingConfig,
}

/// Why the last task fetch failed: `"missing-config"` or `{failureMessage}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskFetchFailureReason {
    Keyword(FailureKeyword),
    #[serde(rename_all = "camelCase")]
    Message { failure_message: String },
}

impl TaskFetchFailureReason {
    pub fn missing_config() -> Self {
        TaskFetchFailureReason::Keyword(FailureKeyword::MissingConfig)
    }

    pub fn message(msg: impl Into<String>) -> Self {
        TaskFetchFailureReason::Message {
            failure_message: msg.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedTasks {
    /// Raw task records as last returned by the NAS.
    pub tasks: Vec<serde_json::Value>,
    pub task_fetch_failure_reason: Option<TaskFetchFailureReason>,
    /// Epoch milliseconds.
    pub tasks_last_initiated_fetch_timestamp: Option<i64>,
    /// Epoch milliseconds.
    pub tasks_last_completed_fetch_timestamp: Option<i64>,
}

impl CachedTasks {
    pub fn record_fetch_started(&mut self, now_ms: i64) {
        self.tasks_last_initiated_fetch_timestamp = Some(now_ms);
    }

    pub fn record_fetch_success(&mut self, tasks: Vec<serde_json::Value>, now_ms: i64) {
        self.tasks = tasks;
        self.task_fetch_failure_reason = None;
        self.tasks_last_completed_fetch_timestamp = Some(now_ms);
    }

    /// Keeps the previously cached tasks; only the failure reason and timestamp change.
    pub fn record_fetch_failure(&mut self, reason: TaskFetchFailureReason, now_ms: i64) {
        self.task_fetch_failure_reason = Some(reason);
        self.tasks_last_completed_fetch_timestamp = Some(now_ms);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

/// Diagnostics for this client. While `enabled` is false only warnings and
/// errors are written to the log file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingSettings {
    pub enabled: bool,
    pub level: LogLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logging {
    pub logging: LoggingSettings,
    pub last_severe_error: Option<String>,
}

/// Current-version state. Build it with [`State::from_document`] after migration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    #[serde(flatten)]
    pub settings: Settings,
    #[serde(flatten)]
    pub cached_tasks: CachedTasks,
    #[serde(flatten)]
    pub logging: Logging,
    pub state_version: u32,
}

impl Default for State {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            cached_tasks: CachedTasks::default(),
            logging: Logging::default(),
            state_version: CURRENT_VERSION,
        }
    }
}

impl State {
    /// Decode an already-migrated document. Never fails.
    ///
    /// A value that does not fit its field (a string where a port belongs,
    /// an unknown sort order, `null` for a record) is replaced by that
    /// field's default. Object-valued fields are repaired member by member,
    /// so one bad `port` does not lose the `hostname` next to it.
    pub fn from_document(doc: Document) -> Self {
        match serde_json::from_value(Value::Object(doc.clone())) {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(error = %err, "persisted state has mismatched fields, repairing");
                Self::decode(repair(doc)).unwrap_or_default()
            }
        }
    }

    fn decode(doc: Document) -> Option<Self> {
        serde_json::from_value(Value::Object(doc)).ok()
    }

    pub fn to_document(&self) -> Document {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            // A struct of plain fields always serializes to an object.
            _ => Document::new(),
        }
    }
}

/// Rebuilds `doc` on top of the current defaults, keeping only the values
/// that still decode.
fn repair(doc: Document) -> Document {
    let mut accepted = v3::defaults();
    for (key, value) in doc {
        let previous = accepted.insert(key.clone(), value.clone());
        if State::decode(accepted.clone()).is_some() {
            continue;
        }
        match previous {
            Some(p) => accepted.insert(key.clone(), p),
            None => accepted.remove(&key),
        };
        let is_record = matches!(accepted.get(&key), Some(Value::Object(_)));
        match value {
            Value::Object(members) if is_record => repair_members(&mut accepted, &key, members),
            value => {
                tracing::warn!(key = %key, value = %value, "dropped persisted state value");
            }
        }
    }
    accepted
}

fn repair_members(accepted: &mut Document, key: &str, members: Document) {
    for (member, value) in members {
        let mut candidate = accepted.clone();
        if let Some(Value::Object(record)) = candidate.get_mut(key) {
            record.insert(member.clone(), value.clone());
        }
        if State::decode(candidate.clone()).is_some() {
            *accepted = candidate;
        } else {
            tracing::warn!(key = %key, member = %member, value = %value, "dropped persisted state value");
        }
    }
}
