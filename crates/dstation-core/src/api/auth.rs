//! `SYNO.API.Auth`: session login/logout.

use serde::Deserialize;
use std::time::Duration;

use super::{get, ApiRequest, Envelope, TransportError};

const CGI: &str = "auth";
const API: &str = "SYNO.API.Auth";
const VERSION: u32 = 2;
/// Session name Download Station expects on login/logout.
pub const SESSION: &str = "DownloadStation";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginData {
    pub sid: String,
}

pub fn login_request(account: &str, passwd: &str) -> ApiRequest {
    ApiRequest::new(API, VERSION, "login")
        .param("account", account)
        .param("passwd", passwd)
        .param("session", SESSION)
        .param("format", "sid")
}

pub fn logout_request(sid: &str) -> ApiRequest {
    ApiRequest::new(API, VERSION, "logout")
        .sid(sid)
        .param("session", SESSION)
}

/// Log in and obtain a session id.
pub async fn login(
    base_url: &str,
    account: &str,
    passwd: &str,
    timeout: Option<Duration>,
) -> Result<Envelope<LoginData>, TransportError> {
    let request = login_request(account, passwd).timeout_opt(timeout);
    get(base_url, CGI, &request).await
}

pub async fn logout(
    base_url: &str,
    sid: &str,
    timeout: Option<Duration>,
) -> Result<Envelope<()>, TransportError> {
    let request = logout_request(sid).timeout_opt(timeout);
    get(base_url, CGI, &request).await
}
