use super::form::{Field, FieldRecord};
use super::offer::{EvaluatorReply, LenderOffer};
use crate::error::Result;
use async_trait::async_trait;

/// Transport port: performs the single request/response exchange with the
/// portability evaluator. Implementations return an error for anything that is
/// not a well-formed reply; the engine classifies those as transport failures.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(&self, record: &FieldRecord) -> Result<EvaluatorReply>;
}

/// Presentation port: notifications the engine emits and never reads back.
/// Rendering details (tooltips, highlight timers, scrolling) live entirely
/// behind this trait.
pub trait Presenter: Send + Sync {
    fn show_field_error(&self, field: Field, message: &str);
    fn show_field_success(&self, field: Field);
    fn clear_field_error(&self, field: Field);
    fn show_loading(&self);
    fn hide_loading(&self);
    fn show_results(&self, total_lenders: u32, offers: &[LenderOffer]);
    fn show_no_results(&self);
    fn show_errors(&self, messages: &[String]);
    fn hide_results(&self);
    fn hide_errors(&self);
}

pub type EvaluatorBox = Box<dyn Evaluator>;
pub type PresenterBox = Box<dyn Presenter>;
