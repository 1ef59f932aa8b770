use async_trait::async_trait;
use portcheck::domain::form::{Field, FieldRecord};
use portcheck::domain::offer::{EvaluatorReply, LenderOffer};
use portcheck::domain::ports::{Evaluator, Presenter};
use portcheck::error::{PortabilityError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Everything the engine can tell the presentation layer, flattened for
/// assertions on ordering and payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    FieldError(Field, String),
    FieldSuccess(Field),
    ClearFieldError(Field),
    ShowLoading,
    HideLoading,
    ShowResults(u32, usize),
    ShowNoResults,
    ShowErrors(Vec<String>),
    HideResults,
    HideErrors,
}

#[derive(Default, Clone)]
pub struct RecordingPresenter {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Notification> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: Notification) {
        self.events.lock().unwrap().push(event);
    }
}

impl Presenter for RecordingPresenter {
    fn show_field_error(&self, field: Field, message: &str) {
        self.push(Notification::FieldError(field, message.to_string()));
    }

    fn show_field_success(&self, field: Field) {
        self.push(Notification::FieldSuccess(field));
    }

    fn clear_field_error(&self, field: Field) {
        self.push(Notification::ClearFieldError(field));
    }

    fn show_loading(&self) {
        self.push(Notification::ShowLoading);
    }

    fn hide_loading(&self) {
        self.push(Notification::HideLoading);
    }

    fn show_results(&self, total_lenders: u32, offers: &[LenderOffer]) {
        self.push(Notification::ShowResults(total_lenders, offers.len()));
    }

    fn show_no_results(&self) {
        self.push(Notification::ShowNoResults);
    }

    fn show_errors(&self, messages: &[String]) {
        self.push(Notification::ShowErrors(messages.to_vec()));
    }

    fn hide_results(&self) {
        self.push(Notification::HideResults);
    }

    fn hide_errors(&self) {
        self.push(Notification::HideErrors);
    }
}

/// Evaluator stub with a fixed reply, an invocation counter and an optional
/// gate that holds the reply back until the test releases it.
pub struct ScriptedEvaluator {
    reply: Option<EvaluatorReply>,
    pub calls: Arc<AtomicUsize>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedEvaluator {
    pub fn replying(reply: EvaluatorReply) -> Self {
        Self {
            reply: Some(reply),
            calls: Arc::new(AtomicUsize::new(0)),
            gate: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Arc::new(AtomicUsize::new(0)),
            gate: None,
        }
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl Evaluator for ScriptedEvaluator {
    async fn evaluate(&self, _record: &FieldRecord) -> Result<EvaluatorReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(PortabilityError::Transport("connection refused".to_string())),
        }
    }
}

/// A record that passes every client-side rule.
pub fn valid_record_inputs() -> Vec<(Field, &'static str)> {
    vec![
        (Field::FullName, "Maria da Silva"),
        (Field::Cpf, "52998224725"),
        (Field::Age, "62"),
        (Field::BenefitCode, "41"),
        (Field::InstallmentsPaid, "20"),
        (Field::CurrentLender, "Bradesco"),
        (Field::InstallmentValue, "35000"),
        (Field::OutstandingBalance, "420000"),
        (Field::TotalValue, "600000"),
        (Field::Rate, "1,8"),
    ]
}
