//! `SYNO.DownloadStation.Info`: server info.

use serde::Deserialize;
use std::time::Duration;

use super::{get, ApiRequest, Envelope, TransportError};

const CGI: &str = "DownloadStation/info";
const API: &str = "SYNO.DownloadStation.Info";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InfoData {
    pub is_manager: bool,
    pub version: u64,
    pub version_string: String,
}

pub async fn get_info(
    base_url: &str,
    sid: &str,
    timeout: Option<Duration>,
) -> Result<Envelope<InfoData>, TransportError> {
    let request = ApiRequest::new(API, 1, "getinfo")
        .sid(sid)
        .timeout_opt(timeout);
    get(base_url, CGI, &request).await
}
