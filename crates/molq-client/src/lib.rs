//! molq-client — blocking HTTP transport for the PUG REST API.
//!
//! [`PugClient`] executes the request descriptors built by `molq-core` and
//! feeds the responses back through the interpreter. One blocking call per
//! user action, exactly one attempt per call: timeouts and TLS belong to
//! reqwest, retry logic belongs to nobody.

use molq_core::response::decode_structure;
use molq_core::{
    interpret, structure_request, ApiError, Artifact, Cid, Method, Query, RawResponse,
    RequestDescriptor,
};
use std::fmt;
use std::time::Duration;

/// Blocking client bound to one PUG REST base URL.
#[derive(Clone)]
pub struct PugClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl fmt::Debug for PugClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PugClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl PugClient {
    /// Create a client for `base_url` (e.g. the public
    /// `https://pubchem.ncbi.nlm.nih.gov/rest/pug`). Trailing slashes are
    /// stripped so descriptor URLs join cleanly.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute one descriptor and return the raw exchange.
    ///
    /// POST bodies go through reqwest's form encoder, which applies the
    /// standard urlencoding to parameter values. Network-level failures map
    /// to [`ApiError::Transport`]; status handling is left to the
    /// interpreter.
    pub fn execute(&self, req: &RequestDescriptor) -> Result<RawResponse, ApiError> {
        tracing::debug!(method = ?req.method, url = %req.url, "executing request");

        let builder = match req.method {
            Method::Get => self.client.get(&req.url),
            Method::Post => self.client.post(&req.url).form(&req.body),
        };

        let resp = builder.send().map_err(map_network_error)?;
        let status = resp.status();
        // HTTP/2 carries no reason phrase; fall back to the canonical one.
        let reason = status
            .canonical_reason()
            .unwrap_or("Unknown Status")
            .to_string();
        let body = resp.bytes().map_err(map_network_error)?.to_vec();

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "response received");
        Ok(RawResponse {
            status: status.as_u16(),
            reason,
            body,
        })
    }

    /// Build, execute, and interpret one search action.
    pub fn search(&self, query: &Query) -> Result<Artifact, ApiError> {
        let req = query.request(&self.base_url);
        let resp = self.execute(&req)?;
        interpret(query.shape(), resp)
    }

    /// Fetch and decode the 2D structure rendering for one compound.
    pub fn fetch_structure(&self, cid: &Cid) -> Result<image::RgbaImage, ApiError> {
        let req = structure_request(&self.base_url, cid);
        let resp = self.execute(&req)?;
        if resp.status != 200 {
            return Err(ApiError::Http {
                status: resp.status,
                reason: resp.reason,
            });
        }
        decode_structure(&resp.body)
    }

    /// Lazily fetch structures for a batch of CIDs, in order.
    ///
    /// Each element carries its own result, so one compound's failure never
    /// aborts the rest of the batch — the consumer reports per-CID errors
    /// and keeps rendering.
    pub fn structures<'a>(
        &'a self,
        cids: &'a [Cid],
    ) -> impl Iterator<Item = (Cid, Result<image::RgbaImage, ApiError>)> + 'a {
        cids.iter()
            .map(move |cid| (cid.clone(), self.fetch_structure(cid)))
    }
}

/// Map a reqwest error (network/timeout) to an [`ApiError::Transport`].
fn map_network_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Transport(format!("request timed out: {e}"))
    } else if e.is_connect() {
        ApiError::Transport(format!("connection failed: {e}"))
    } else {
        ApiError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_strips_trailing_slash() {
        let client = PugClient::new(
            "https://pubchem.ncbi.nlm.nih.gov/rest/pug/",
            Duration::from_secs(5),
        );
        assert_eq!(client.base_url(), "https://pubchem.ncbi.nlm.nih.gov/rest/pug");
    }

    #[test]
    fn debug_shows_base_url_only() {
        let client = PugClient::new("http://localhost:9999", Duration::from_secs(5));
        let debug = format!("{client:?}");
        assert!(debug.contains("PugClient"));
        assert!(debug.contains("localhost:9999"));
    }

    #[test]
    fn connection_failure_maps_to_transport_error() {
        // Nothing listens on this port; the request must fail at the
        // transport layer, not surface as an HTTP error.
        let client = PugClient::new("http://127.0.0.1:1", Duration::from_secs(2));
        let err = client
            .search(&Query::ByName {
                name: "glucose".into(),
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
    }
}
