//! Curl transfers for GET (query string) and POST (multipart form).
//!
//! The `*_blocking` functions run in the current thread; the async wrappers
//! move them onto tokio's blocking pool.

use curl::easy::{Easy, Form, List};
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};

use super::encode::{self, FormPart};
use super::envelope::Envelope;
use super::error::TransportError;
use super::request::ApiRequest;

static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Per-process correlation id for log lines (`request-1`, `request-2`, ...).
pub fn next_request_id() -> String {
    let n = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
    format!("request-{}", n)
}

/// Runs the transfer and returns the body of a 2xx response.
fn perform(easy: &mut Easy) -> Result<Vec<u8>, TransportError> {
    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }
    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(TransportError::Http(code));
    }
    Ok(body)
}

fn decode<T: DeserializeOwned>(id: &str, body: &[u8]) -> Result<Envelope<T>, TransportError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    tracing::debug!(
        request_id = %id,
        response = %encode::loggable_response(&value),
        "(response)"
    );
    Ok(serde_json::from_value(value)?)
}

/// GET `{base_url}/webapi/{cgi}.cgi?<sorted query>` and decode the envelope.
pub fn get_blocking<T: DeserializeOwned>(
    base_url: &str,
    cgi: &str,
    request: &ApiRequest,
) -> Result<Envelope<T>, TransportError> {
    let url = encode::get_url(base_url, cgi, request);
    let id = next_request_id();
    tracing::debug!(
        request_id = %id,
        url = %encode::loggable_get_url(base_url, cgi, request),
        "GET"
    );

    let mut easy = Easy::new();
    easy.url(&url)?;
    easy.get(true)?;
    easy.timeout(request.effective_timeout())?;

    let body = perform(&mut easy).inspect_err(|e| {
        tracing::warn!(request_id = %id, "GET failed: {}", e);
    })?;
    decode(&id, &body)
}

/// POST a multipart form to `{base_url}/webapi/{cgi}.cgi` and decode the envelope.
pub fn post_blocking<T: DeserializeOwned>(
    base_url: &str,
    cgi: &str,
    request: &ApiRequest,
) -> Result<Envelope<T>, TransportError> {
    let url = encode::endpoint_url(base_url, cgi);
    let id = next_request_id();
    let parts = encode::form_parts(request);
    tracing::debug!(
        request_id = %id,
        url = %url,
        form = %encode::loggable_form(&parts),
        "POST"
    );

    let mut form = Form::new();
    for part in &parts {
        match part {
            FormPart::Field { name, value } => {
                form.part(name).contents(value.as_bytes()).add()?;
            }
            FormPart::File { name, file } => {
                form.part(name)
                    .buffer(&file.filename, file.content.clone())
                    .add()?;
            }
        }
    }

    // No `Expect: 100-continue` round trip for larger uploads.
    let mut headers = List::new();
    headers.append("Expect:")?;

    let mut easy = Easy::new();
    easy.url(&url)?;
    easy.http_headers(headers)?;
    easy.httppost(form)?;
    easy.timeout(request.effective_timeout())?;

    let body = perform(&mut easy).inspect_err(|e| {
        tracing::warn!(request_id = %id, "POST failed: {}", e);
    })?;
    decode(&id, &body)
}

/// Async [`get_blocking`]. Transport faults come back as `Err`; vendor failures as `Ok(Envelope::Failure)`.
pub async fn get<T>(
    base_url: &str,
    cgi: &str,
    request: &ApiRequest,
) -> Result<Envelope<T>, TransportError>
where
    T: DeserializeOwned + Send + 'static,
{
    let (base_url, cgi, request) = (base_url.to_string(), cgi.to_string(), request.clone());
    tokio::task::spawn_blocking(move || get_blocking(&base_url, &cgi, &request)).await?
}

/// Async [`post_blocking`].
pub async fn post<T>(
    base_url: &str,
    cgi: &str,
    request: &ApiRequest,
) -> Result<Envelope<T>, TransportError>
where
    T: DeserializeOwned + Send + 'static,
{
    let (base_url, cgi, request) = (base_url.to_string(), cgi.to_string(), request.clone());
    tokio::task::spawn_blocking(move || post_blocking(&base_url, &cgi, &request)).await?
}
