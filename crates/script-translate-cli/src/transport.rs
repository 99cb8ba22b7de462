use script_translate_engine::ChatTransport;
use script_translate_engine::translate::{
    ChatRequest, ChatResponse, Endpoint, TransportError, TransportReply,
};

/// Chat-completions transport over blocking HTTP.
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatTransport for HttpTransport {
    fn send(
        &self,
        endpoint: &Endpoint<'_>,
        request: &ChatRequest,
    ) -> Result<TransportReply, TransportError> {
        log::debug!("POST {} (model {})", endpoint.url, request.model);
        let result = self
            .agent
            .post(endpoint.url)
            .timeout(endpoint.timeout)
            .set("Authorization", &format!("Bearer {}", endpoint.api_key))
            .set("Content-Type", "application/json")
            .send_json(request);

        match result {
            Ok(response) => {
                let status = response.status();
                // An unreadable body is reported as a reply without choices.
                let body = response.into_json::<ChatResponse>().ok();
                Ok(TransportReply { status, body })
            }
            Err(ureq::Error::Status(status, _)) => Ok(TransportReply::status(status)),
            Err(ureq::Error::Transport(transport)) => {
                if is_timeout(&transport) {
                    Err(TransportError::Timeout(endpoint.timeout))
                } else {
                    Err(TransportError::Failed(transport.to_string()))
                }
            }
        }
    }
}

fn is_timeout(transport: &ureq::Transport) -> bool {
    std::error::Error::source(transport)
        .and_then(|source| source.downcast_ref::<std::io::Error>())
        .is_some_and(|err| {
            matches!(
                err.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            )
        })
}
