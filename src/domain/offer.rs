use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One eligible lender row, constructed solely from evaluator response data
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LenderOffer {
    #[serde(rename = "banco")]
    pub lender: String,
    #[serde(rename = "tipo_operacao")]
    pub operation_type: String,
    #[serde(rename = "taxa_aplicavel")]
    pub applicable_rate: Decimal,
    #[serde(rename = "observacoes")]
    pub notes: String,
}

impl LenderOffer {
    /// The rate as displayed: always two fractional digits.
    pub fn rate_display(&self) -> String {
        format!("{:.2}", self.applicable_rate.round_dp(2))
    }
}

/// A well-formed evaluator response: either a business-rule rejection with its
/// message list, or an acceptance with the eligible lender rows.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluatorReply {
    Rejected { messages: Vec<String> },
    Accepted { total_lenders: u32, offers: Vec<LenderOffer> },
}

/// Classified outcome of one submission attempt. Exactly one variant is
/// produced per attempt that reaches the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Success {
        total_lenders: u32,
        offers: Vec<LenderOffer>,
    },
    /// Server-side rejection; messages pass through verbatim.
    Rejected { messages: Vec<String> },
    /// Connectivity or malformed-response failure. The reason stays internal;
    /// the presentation layer only ever sees a generic message.
    TransportFailure { reason: String },
}
