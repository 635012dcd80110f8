//! `SYNO.DownloadStation.Task`: list, create, delete, pause, resume.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{get, post, ApiRequest, Envelope, FilePayload, TransportError};

const CGI: &str = "DownloadStation/task";
const API: &str = "SYNO.DownloadStation.Task";
const VERSION: u32 = 1;

/// Task status as reported by the NAS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Waiting,
    Downloading,
    Paused,
    Finishing,
    Finished,
    HashChecking,
    Seeding,
    #[serde(rename = "filehosting_waiting")]
    FilehostWaiting,
    Extracting,
    Error,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetail {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub create_time: Option<i64>,
    #[serde(default)]
    pub completed_time: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTransfer {
    #[serde(default)]
    pub size_downloaded: u64,
    #[serde(default)]
    pub size_uploaded: u64,
    #[serde(default)]
    pub speed_download: u64,
    #[serde(default)]
    pub speed_upload: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAdditional {
    #[serde(default)]
    pub detail: Option<TaskDetail>,
    #[serde(default)]
    pub transfer: Option<TaskTransfer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub username: String,
    pub title: String,
    pub size: u64,
    pub status: TaskStatus,
    #[serde(default)]
    pub additional: Option<TaskAdditional>,
}

impl Task {
    /// Completed fraction in `[0, 1]`, when transfer info was requested.
    pub fn progress(&self) -> Option<f64> {
        let transfer = self.additional.as_ref()?.transfer.as_ref()?;
        if self.size == 0 {
            return None;
        }
        Some((transfer.size_downloaded as f64 / self.size as f64).min(1.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskList {
    pub total: u64,
    pub offset: u64,
    pub tasks: Vec<Task>,
}

/// Per-task outcome of delete/pause/resume; `error == 0` means success.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskResult {
    pub id: String,
    pub error: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Additional {
    Detail,
    Transfer,
    File,
    Tracker,
    Peer,
}

impl Additional {
    fn as_str(self) -> &'static str {
        match self {
            Additional::Detail => "detail",
            Additional::Transfer => "transfer",
            Additional::File => "file",
            Additional::Tracker => "tracker",
            Additional::Peer => "peer",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub additional: Vec<Additional>,
    pub timeout: Option<Duration>,
}

pub fn list_request(sid: &str, opts: &ListOptions) -> ApiRequest {
    let additional = if opts.additional.is_empty() {
        None
    } else {
        Some(
            opts.additional
                .iter()
                .map(|a| a.as_str())
                .collect::<Vec<_>>()
                .join(","),
        )
    };
    ApiRequest::new(API, VERSION, "list")
        .sid(sid)
        .timeout_opt(opts.timeout)
        .param_opt("offset", opts.offset)
        .param_opt("limit", opts.limit)
        .param_opt("additional", additional)
}

pub async fn list(
    base_url: &str,
    sid: &str,
    opts: &ListOptions,
) -> Result<Envelope<TaskList>, TransportError> {
    get(base_url, CGI, &list_request(sid, opts)).await
}

pub fn create_from_url_request(sid: &str, uri: &str, destination: Option<&str>) -> ApiRequest {
    ApiRequest::new(API, VERSION, "create")
        .sid(sid)
        .param("uri", uri)
        .param_opt("destination", destination)
}

pub fn create_from_file_request(
    sid: &str,
    file: FilePayload,
    destination: Option<&str>,
) -> ApiRequest {
    ApiRequest::new(API, VERSION, "create")
        .sid(sid)
        .param_opt("destination", destination)
        .file("file", file)
}

/// Create a task from a URL (http/ftp/magnet/...). Sent as multipart like file uploads.
pub async fn create_from_url(
    base_url: &str,
    sid: &str,
    uri: &str,
    destination: Option<&str>,
    timeout: Option<Duration>,
) -> Result<Envelope<()>, TransportError> {
    let request = create_from_url_request(sid, uri, destination).timeout_opt(timeout);
    post(base_url, CGI, &request).await
}

/// Create a task from an uploaded file (e.g. a `.torrent`).
pub async fn create_from_file(
    base_url: &str,
    sid: &str,
    file: FilePayload,
    destination: Option<&str>,
    timeout: Option<Duration>,
) -> Result<Envelope<()>, TransportError> {
    let request = create_from_file_request(sid, file, destination).timeout_opt(timeout);
    post(base_url, CGI, &request).await
}

fn ids_request(sid: &str, method: &str, ids: &[String]) -> ApiRequest {
    ApiRequest::new(API, VERSION, method)
        .sid(sid)
        .param("id", ids.join(","))
}

pub fn delete_request(sid: &str, ids: &[String], force_complete: bool) -> ApiRequest {
    ids_request(sid, "delete", ids).param("force_complete", force_complete)
}

pub async fn delete(
    base_url: &str,
    sid: &str,
    ids: &[String],
    force_complete: bool,
    timeout: Option<Duration>,
) -> Result<Envelope<Vec<TaskResult>>, TransportError> {
    let request = delete_request(sid, ids, force_complete).timeout_opt(timeout);
    get(base_url, CGI, &request).await
}

pub async fn pause(
    base_url: &str,
    sid: &str,
    ids: &[String],
    timeout: Option<Duration>,
) -> Result<Envelope<Vec<TaskResult>>, TransportError> {
    let request = ids_request(sid, "pause", ids).timeout_opt(timeout);
    get(base_url, CGI, &request).await
}

pub async fn resume(
    base_url: &str,
    sid: &str,
    ids: &[String],
    timeout: Option<Duration>,
) -> Result<Envelope<Vec<TaskResult>>, TransportError> {
    let request = ids_request(sid, "resume", ids).timeout_opt(timeout);
    get(base_url, CGI, &request).await
}
