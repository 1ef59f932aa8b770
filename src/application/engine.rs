use crate::domain::form::{Field, FieldRecord};
use crate::domain::mask;
use crate::domain::offer::{EvaluatorReply, SubmissionOutcome};
use crate::domain::ports::{EvaluatorBox, PresenterBox};
use crate::domain::validate::{self, ValidationOutcome};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// User-facing message for any transport-level failure. Details never leak to
/// the presentation layer.
pub const MSG_TRANSPORT_FAILURE: &str = "Erro ao conectar com o servidor. Tente novamente.";

/// Phase of the submission flow. A new submit trigger is accepted only from
/// `Idle`, which gives the single-flight guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
}

/// The main entry point of the application.
///
/// `SubmissionEngine` owns the live form state and the two ports. The
/// presentation layer feeds it change/blur/submit events; the engine answers
/// exclusively through `Presenter` notifications and the returned outcome.
pub struct SubmissionEngine {
    evaluator: EvaluatorBox,
    presenter: PresenterBox,
    fields: Mutex<FieldRecord>,
    state: Mutex<SubmissionState>,
}

impl SubmissionEngine {
    pub fn new(evaluator: EvaluatorBox, presenter: PresenterBox) -> Self {
        Self {
            evaluator,
            presenter,
            fields: Mutex::new(FieldRecord::new()),
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    pub fn state(&self) -> SubmissionState {
        *lock(&self.state)
    }

    /// Handles a change event: masks the raw input, stores it as the field's
    /// current value and clears any stale error mark. Returns the masked text
    /// for the presentation layer to write back into the field.
    pub fn field_changed(&self, field: Field, raw: &str) -> String {
        let masked = mask::mask(field.class(), raw);
        lock(&self.fields).set(field, masked.clone());
        self.presenter.clear_field_error(field);
        masked
    }

    /// Handles a blur event: validates the field's current value and notifies
    /// the presentation layer of the outcome.
    pub fn field_blurred(&self, field: Field) -> ValidationOutcome {
        let value = lock(&self.fields).get(field).to_string();
        let outcome = validate::validate(field.class(), &value);
        match outcome.message {
            Some(message) => self.presenter.show_field_error(field, message),
            None => self.presenter.show_field_success(field),
        }
        outcome
    }

    /// Handles a reset event: drops the form state and hides result and error
    /// panels.
    pub fn reset(&self) {
        lock(&self.fields).clear();
        for field in Field::ALL {
            self.presenter.clear_field_error(field);
        }
        self.presenter.hide_results();
        self.presenter.hide_errors();
    }

    /// Handles a submit trigger.
    ///
    /// Runs the aggregate validation and, only if every field passes, performs
    /// exactly one evaluator exchange and classifies its result. Returns
    /// `None` when validation blocked the submission or when another attempt
    /// is already in flight; the loading indicator is cleared on every exit
    /// path that showed it.
    pub async fn submit(&self) -> Option<SubmissionOutcome> {
        if !self.enter_validating() {
            return None;
        }

        let record = lock(&self.fields).clone();
        let validation = validate::validate_all(&record);
        for (&field, outcome) in &validation.outcomes {
            match outcome.message {
                Some(message) => self.presenter.show_field_error(field, message),
                None => self.presenter.show_field_success(field),
            }
        }

        if !validation.all_valid {
            self.presenter.show_errors(&validation.messages());
            self.set_state(SubmissionState::Idle);
            return None;
        }

        self.set_state(SubmissionState::Submitting);
        self.presenter.show_loading();
        self.presenter.hide_results();
        self.presenter.hide_errors();

        let outcome = match self.evaluator.evaluate(&record).await {
            Ok(EvaluatorReply::Accepted {
                total_lenders,
                offers,
            }) => {
                if total_lenders == 0 {
                    self.presenter.show_no_results();
                } else {
                    self.presenter.show_results(total_lenders, &offers);
                }
                SubmissionOutcome::Success {
                    total_lenders,
                    offers,
                }
            }
            Ok(EvaluatorReply::Rejected { messages }) => {
                self.presenter.show_errors(&messages);
                SubmissionOutcome::Rejected { messages }
            }
            Err(err) => {
                self.presenter
                    .show_errors(&[MSG_TRANSPORT_FAILURE.to_string()]);
                SubmissionOutcome::TransportFailure {
                    reason: err.to_string(),
                }
            }
        };

        self.presenter.hide_loading();
        self.set_state(SubmissionState::Idle);
        Some(outcome)
    }

    fn enter_validating(&self) -> bool {
        let mut state = lock(&self.state);
        if *state != SubmissionState::Idle {
            return false;
        }
        *state = SubmissionState::Validating;
        true
    }

    fn set_state(&self, next: SubmissionState) {
        *lock(&self.state) = next;
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
