use crate::domain::form::FieldRecord;
use crate::domain::offer::{EvaluatorReply, LenderOffer};
use crate::domain::ports::Evaluator;
use crate::error::{PortabilityError, Result};
use async_trait::async_trait;
use serde::Deserialize;

/// The evaluator's wire shape. Either `erro`/`mensagens` or
/// `total_bancos`/`resultados` is present on a well-formed reply.
#[derive(Debug, Deserialize)]
struct WireResponse {
    erro: Option<bool>,
    mensagens: Option<Vec<String>>,
    total_bancos: Option<u32>,
    resultados: Option<Vec<LenderOffer>>,
}

/// Remote evaluator reached through a single form-encoded POST exchange.
pub struct HttpEvaluator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpEvaluator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Evaluator for HttpEvaluator {
    async fn evaluate(&self, record: &FieldRecord) -> Result<EvaluatorReply> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&record.to_form_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortabilityError::Transport(format!(
                "evaluator returned status {status}"
            )));
        }

        let body: serde_json::Value = response.json().await?;
        classify(body)
    }
}

/// Maps a JSON reply onto [`EvaluatorReply`]. Anything outside the two agreed
/// shapes is an error, which the engine reports as a transport failure.
pub(crate) fn classify(body: serde_json::Value) -> Result<EvaluatorReply> {
    let wire: WireResponse = serde_json::from_value(body)?;

    if wire.erro == Some(true) {
        let messages = wire.mensagens.ok_or_else(|| {
            PortabilityError::InvalidResponse("rejection without message list".to_string())
        })?;
        return Ok(EvaluatorReply::Rejected { messages });
    }

    match wire.total_bancos {
        Some(total_lenders) => Ok(EvaluatorReply::Accepted {
            total_lenders,
            offers: wire.resultados.unwrap_or_default(),
        }),
        None => Err(PortabilityError::InvalidResponse(
            "reply carries neither a rejection nor a result count".to_string(),
        )),
    }
}
