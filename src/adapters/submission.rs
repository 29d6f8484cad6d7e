use crate::domain::model::{SubmissionOutcome, SubmissionPayload};
use crate::domain::ports::SubmissionGateway;
use crate::utils::error::SubmissionError;
use async_trait::async_trait;
use reqwest::Client;

/// One POST per submit, no automatic retry. Transport and status failures
/// come back as a classified `SubmissionOutcome`; state transitions stay
/// with the controller.
pub struct HttpSubmissionClient {
    client: Client,
    endpoint: String,
}

impl HttpSubmissionClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl SubmissionGateway for HttpSubmissionClient {
    async fn submit(&self, payload: &SubmissionPayload) -> SubmissionOutcome {
        tracing::debug!("POST {} for project {}", self.endpoint, payload.project_code);

        let response = self.client.post(&self.endpoint).json(payload).send().await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                tracing::debug!("submission accepted with status {}", resp.status());
                SubmissionOutcome::Accepted
            }
            Ok(resp) => {
                let kind = SubmissionError::from_status(resp.status().as_u16());
                SubmissionOutcome::rejected(kind)
            }
            Err(e) => {
                let kind = if e.is_builder() {
                    SubmissionError::ClientFault
                } else {
                    SubmissionError::NetworkUnreachable
                };
                tracing::warn!("submission transport failure: {}", e);
                SubmissionOutcome::rejected(kind)
            }
        }
    }
}
