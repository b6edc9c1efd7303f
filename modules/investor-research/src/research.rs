use async_trait::async_trait;
use research_client::{ResearchClient, ResearchError};

use investor_common::{InvestorError, Result};

use crate::traits::DeepResearcher;

const SERVICE: &str = "Deep research";

/// [`DeepResearcher`] backed by the long-form research endpoint.
pub struct ResearchService {
    client: ResearchClient,
}

impl ResearchService {
    pub fn new(client: ResearchClient) -> Self {
        Self { client }
    }
}

fn research_error(err: ResearchError) -> InvestorError {
    match err {
        ResearchError::Api { status, message } => {
            InvestorError::external(SERVICE, Some(status), message)
        }
        ResearchError::Network(message) => InvestorError::external(SERVICE, None, message),
        ResearchError::EmptyResponse => InvestorError::EmptyResponse(SERVICE),
    }
}

#[async_trait]
impl DeepResearcher for ResearchService {
    async fn research(&self, prompt: &str) -> Result<String> {
        self.client.research(prompt).await.map_err(research_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn service_answering(template: ResponseTemplate) -> (MockServer, ResearchService) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(template)
            .mount(&server)
            .await;
        let service = ResearchService::new(ResearchClient::new(server.uri(), None));
        (server, service)
    }

    #[tokio::test]
    async fn returns_answer_text() {
        let (_server, service) = service_answering(
            ResponseTemplate::new(200).set_body_json(json!({"answer": "Sequoia invests early."})),
        )
        .await;
        assert_eq!(service.research("p").await.unwrap(), "Sequoia invests early.");
    }

    #[tokio::test]
    async fn empty_answer_is_bad_gateway() {
        let (_server, service) =
            service_answering(ResponseTemplate::new(200).set_body_json(json!({"answer": "  "})))
                .await;
        let err = service.research("p").await.unwrap_err();
        assert!(matches!(err, InvestorError::EmptyResponse(_)));
        assert_eq!(err.status_code(), 502);
    }

    #[tokio::test]
    async fn upstream_failure_keeps_body_as_details() {
        let (_server, service) =
            service_answering(ResponseTemplate::new(500).set_body_string("overloaded")).await;
        let err = service.research("p").await.unwrap_err();
        assert_eq!(err.status_code(), 502);
        assert_eq!(err.details(), Some("overloaded"));
    }
}
