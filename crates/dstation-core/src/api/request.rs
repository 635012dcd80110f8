//! Request model: the `api`/`version`/`method` triple, session id, timeout,
//! and named parameters.

use std::fmt;
use std::time::Duration;

/// Binary upload attached to a multipart POST (e.g. a `.torrent` file).
#[derive(Clone, PartialEq, Eq)]
pub struct FilePayload {
    pub content: Vec<u8>,
    pub filename: String,
}

impl FilePayload {
    pub fn new(content: impl Into<Vec<u8>>, filename: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            filename: filename.into(),
        }
    }
}

impl fmt::Debug for FilePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePayload")
            .field("filename", &self.filename)
            .field("len", &self.content.len())
            .finish()
    }
}

/// A parameter value: either a plain form/query field or a file part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Scalar(String),
    File(FilePayload),
}

impl Param {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Param::Scalar(s) => Some(s),
            Param::File(_) => None,
        }
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Param::Scalar(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Param::Scalar(v.to_string())
    }
}

impl From<&String> for Param {
    fn from(v: &String) -> Self {
        Param::Scalar(v.clone())
    }
}

impl From<bool> for Param {
    fn from(v: bool) -> Self {
        Param::Scalar(v.to_string())
    }
}

impl From<FilePayload> for Param {
    fn from(v: FilePayload) -> Self {
        Param::File(v)
    }
}

macro_rules! numeric_param {
    ($($t:ty),*) => {
        $(impl From<$t> for Param {
            fn from(v: $t) -> Self {
                Param::Scalar(v.to_string())
            }
        })*
    };
}

numeric_param!(u16, u32, u64, i32, i64, usize);

/// One call against a Download Station CGI endpoint.
///
/// Parameters keep insertion order; the POST encoder relies on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub api: String,
    pub version: u32,
    pub method: String,
    pub sid: Option<String>,
    pub timeout: Option<Duration>,
    pub params: Vec<(String, Param)>,
}

impl ApiRequest {
    pub fn new(api: impl Into<String>, version: u32, method: impl Into<String>) -> Self {
        Self {
            api: api.into(),
            version,
            method: method.into(),
            sid: None,
            timeout: None,
            params: Vec::new(),
        }
    }

    pub fn sid(mut self, sid: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self
    }

    pub fn sid_opt(mut self, sid: Option<&str>) -> Self {
        self.sid = sid.map(str::to_string);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout_opt(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<Param>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Adds the parameter only when `value` is `Some`; `None` leaves the key out entirely.
    pub fn param_opt<V: Into<Param>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    pub fn file(self, key: impl Into<String>, file: FilePayload) -> Self {
        self.param(key, Param::File(file))
    }

    /// Timeout used for the transfer: the per-request override or [`super::DEFAULT_TIMEOUT`].
    /// A zero override falls back to the default; curl would read it as "no limit".
    pub fn effective_timeout(&self) -> Duration {
        self.timeout
            .filter(|t| !t.is_zero())
            .unwrap_or(super::DEFAULT_TIMEOUT)
    }
}
