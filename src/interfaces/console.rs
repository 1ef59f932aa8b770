use crate::domain::form::Field;
use crate::domain::offer::LenderOffer;
use crate::domain::ports::Presenter;

/// Terminal rendering of the engine's notifications. Field feedback and
/// errors go to stderr, result rows to stdout.
#[derive(Default)]
pub struct ConsolePresenter;

impl ConsolePresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Presenter for ConsolePresenter {
    fn show_field_error(&self, field: Field, message: &str) {
        eprintln!("  {field}: {message}");
    }

    fn show_field_success(&self, _field: Field) {}

    fn clear_field_error(&self, _field: Field) {}

    fn show_loading(&self) {
        eprintln!("Consultando bancos...");
    }

    fn hide_loading(&self) {}

    fn show_results(&self, total_lenders: u32, offers: &[LenderOffer]) {
        println!("{total_lenders} banco(s) encontrados:");
        for offer in offers {
            println!(
                "  {} | {} | {}% | {}",
                offer.lender,
                offer.operation_type,
                offer.rate_display(),
                offer.notes
            );
        }
    }

    fn show_no_results(&self) {
        println!("Nenhum banco encontrado.");
    }

    fn show_errors(&self, messages: &[String]) {
        for message in messages {
            eprintln!("  {message}");
        }
    }

    fn hide_results(&self) {}

    fn hide_errors(&self) {}
}
