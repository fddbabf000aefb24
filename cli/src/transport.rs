//! Blocking execution of core requests.

use thiserror::Error;
use todo_core::{HttpMethod, HttpRequest, HttpResponse};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{method} {path}: {source}")]
    Request {
        method: HttpMethod,
        path: String,
        #[source]
        source: ureq::Error,
    },
}

/// Runs one round-trip for the app. Implemented by `UreqTransport` and by
/// canned responders in tests.
pub trait Transport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Disables ureq's status-code-as-error behavior so 4xx/5xx responses
    /// come back as data and the core decides what they mean.
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method, path, body, ..
        } = req;
        let agent = &self.agent;

        let sent = match (method, body) {
            (HttpMethod::Get, _) => agent.get(&path).call(),
            (HttpMethod::Delete, _) => agent.delete(&path).call(),
            (HttpMethod::Post, Some(body)) => agent
                .post(&path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => agent.post(&path).send_empty(),
            (HttpMethod::Put, Some(body)) => agent
                .put(&path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => agent.put(&path).send_empty(),
        };

        let fail = |source| TransportError::Request {
            method,
            path: path.clone(),
            source,
        };
        let mut response = sent.map_err(fail)?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().map_err(fail)?;
        Ok(HttpResponse::new(status, body))
    }
}
