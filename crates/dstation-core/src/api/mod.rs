//! Download Station Web API client.
//!
//! Every call goes to `{base_url}/webapi/{cgi}.cgi`. Read-only calls are sent
//! as a GET query string, calls that may carry file uploads as a multipart
//! POST. The response is always a `success`-tagged envelope: a vendor failure
//! decodes to [`Envelope::Failure`], while network errors, timeouts, non-2xx
//! statuses and unparseable bodies surface as [`TransportError`].

pub mod auth;
pub mod encode;
mod envelope;
mod error;
pub mod info;
mod request;
pub mod task;
mod transport;

use std::time::Duration;

pub use envelope::{ApiError, Envelope, ErrorScope};
pub use error::TransportError;
pub use request::{ApiRequest, FilePayload, Param};
pub use transport::{get, get_blocking, next_request_id, post, post_blocking};

/// Transfer timeout used when a request does not set its own.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(60_000);
