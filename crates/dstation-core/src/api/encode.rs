//! Request encoding: sorted query string for GET, two-pass multipart layout for POST.
//!
//! Pure functions only; the curl transfer lives in `transport`.

use serde_json::Value;
use std::borrow::Cow;
use std::fmt::Write as _;

use super::request::{ApiRequest, FilePayload, Param};

/// Fixed key the session id is re-sent under.
pub const SID_KEY: &str = "_sid";

/// Never serialized; it only controls the transfer.
const TIMEOUT_KEY: &str = "timeout";

/// Keys whose values are masked in log output, in requests and in response `data`.
const SENSITIVE_KEYS: &[&str] = &["passwd", "password", "sid", SID_KEY];

/// `{base_url}/webapi/{cgi}.cgi`. Neither part is validated.
pub fn endpoint_url(base_url: &str, cgi: &str) -> String {
    format!("{}/webapi/{}.cgi", base_url, cgi)
}

/// Scalar request fields in declaration order: api, version, method, sid, then scalar params.
fn scalar_fields(req: &ApiRequest) -> Vec<(&str, Cow<'_, str>)> {
    let mut out: Vec<(&str, Cow<'_, str>)> = vec![
        ("api", Cow::Borrowed(req.api.as_str())),
        ("version", Cow::Owned(req.version.to_string())),
        ("method", Cow::Borrowed(req.method.as_str())),
    ];
    if let Some(sid) = &req.sid {
        out.push(("sid", Cow::Borrowed(sid.as_str())));
    }
    for (key, value) in &req.params {
        if key == TIMEOUT_KEY {
            continue;
        }
        if let Param::Scalar(v) = value {
            out.push((key.as_str(), Cow::Borrowed(v.as_str())));
        }
    }
    out
}

/// Key/value pairs carried by a GET, sorted by key. File params are skipped.
pub fn query_pairs(req: &ApiRequest) -> Vec<(&str, Cow<'_, str>)> {
    let mut pairs = scalar_fields(req);
    if let Some(sid) = &req.sid {
        pairs.push((SID_KEY, Cow::Borrowed(sid.as_str())));
    }
    pairs.sort_by(|a, b| a.0.cmp(b.0));
    pairs
}

fn encode_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, Cow<'a, str>)>,
{
    let mut ser = url::form_urlencoded::Serializer::new(String::new());
    for (k, v) in pairs {
        ser.append_pair(k, &v);
    }
    ser.finish()
}

pub fn query_string(req: &ApiRequest) -> String {
    encode_pairs(query_pairs(req))
}

/// Full GET URL: endpoint plus sorted query string.
pub fn get_url(base_url: &str, cgi: &str, req: &ApiRequest) -> String {
    format!("{}?{}", endpoint_url(base_url, cgi), query_string(req))
}

/// GET URL with sensitive values masked, for logging only.
pub(crate) fn loggable_get_url(base_url: &str, cgi: &str, req: &ApiRequest) -> String {
    let pairs = query_pairs(req)
        .into_iter()
        .map(|(k, v)| (k, redact(k, v)));
    format!("{}?{}", endpoint_url(base_url, cgi), encode_pairs(pairs))
}

/// One multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart<'a> {
    Field { name: &'a str, value: Cow<'a, str> },
    File { name: &'a str, file: &'a FilePayload },
}

impl FormPart<'_> {
    pub fn name(&self) -> &str {
        match self {
            FormPart::Field { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

/// Multipart layout: all scalar fields, then `_sid`, then every file part.
pub fn form_parts(req: &ApiRequest) -> Vec<FormPart<'_>> {
    let mut parts: Vec<FormPart<'_>> = scalar_fields(req)
        .into_iter()
        .map(|(name, value)| FormPart::Field { name, value })
        .collect();
    if let Some(sid) = &req.sid {
        parts.push(FormPart::Field {
            name: SID_KEY,
            value: Cow::Borrowed(sid.as_str()),
        });
    }
    for (key, value) in &req.params {
        if key == TIMEOUT_KEY {
            continue;
        }
        if let Param::File(file) = value {
            parts.push(FormPart::File {
                name: key.as_str(),
                file,
            });
        }
    }
    parts
}

/// Flattened `{name=value, ...}` view of a form, for logging only.
pub(crate) fn loggable_form(parts: &[FormPart<'_>]) -> String {
    let mut out = String::from("{");
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        match part {
            FormPart::Field { name, value } => {
                let _ = write!(out, "{}={}", name, redact(name, value.clone()));
            }
            FormPart::File { name, file } => {
                let _ = write!(
                    out,
                    "{}=<file {}, {} bytes>",
                    name,
                    file.filename,
                    file.content.len()
                );
            }
        }
    }
    out.push('}');
    out
}

/// Response body with sensitive `data` members masked, for logging only.
/// Login replies carry the session id as `data.sid`.
pub(crate) fn loggable_response(value: &Value) -> Value {
    let mut masked = value.clone();
    if let Some(Value::Object(data)) = masked.get_mut("data") {
        for (key, v) in data.iter_mut() {
            if SENSITIVE_KEYS.contains(&key.as_str()) && !v.is_null() {
                *v = Value::String("***".to_string());
            }
        }
    }
    masked
}

fn redact<'a>(key: &str, value: Cow<'a, str>) -> Cow<'a, str> {
    if SENSITIVE_KEYS.contains(&key) {
        Cow::Borrowed("***")
    } else {
        value
    }
}
