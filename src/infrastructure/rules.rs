use crate::domain::form::{Field, FieldRecord};
use crate::domain::offer::{EvaluatorReply, LenderOffer};
use crate::domain::ports::Evaluator;
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

/// Bank roster offered for portability, kept as configured upstream
/// (duplicate entries included; each entry produces its own offer row).
const BANKS: &[&str] = &[
    "Banco do Brasil",
    "Caixa Econômica Federal",
    "Bradesco",
    "Itaú",
    "Santander",
    "Banrisul",
    "Sicredi",
    "Sicoob",
    "BRB",
    "Bancoob",
    "Cresol",
    "Unicred",
    "Ailos",
    "Sicredi Pioneira",
    "Sicoob Credisul",
    "Sicredi Norte",
    "Sicredi Centro",
    "Sicredi Sul",
    "Sicoob Credisul",
    "Sicredi Pioneira",
    "Sicoob Credisul",
    "Sicredi Norte",
    "Sicoob Centro",
];

/// Banks that do not accept portability at all.
const BLOCKED_BANKS: &[&str] = &["BRB"];

const MIN_OUTSTANDING_BALANCE: Decimal = dec!(500.00);
const MIN_REFINANCE_DIFFERENCE: Decimal = dec!(100.00);
const DISABILITY_MIN_INSTALLMENTS: u32 = 6;
const RATE_MARKUP: Decimal = dec!(0.5);

struct BankRule {
    max_age: u32,
    min_installments: u32,
    accepts_disability: bool,
    default_rate: Decimal,
}

fn rule_for(bank: &str) -> BankRule {
    let min_installments = match bank {
        "Bradesco" | "Itaú" => 15,
        _ => 12,
    };
    BankRule {
        max_age: 85,
        min_installments,
        accepts_disability: true,
        default_rate: dec!(2.49),
    }
}

/// Typed view of a record that already passed the submission checks.
struct Application {
    age: u32,
    installments_paid: u32,
    outstanding_balance: Decimal,
    total_value: Decimal,
    rate: Decimal,
    disability_benefit: bool,
}

/// In-process evaluator running the portability rule book directly.
///
/// Replays the remote evaluator's behavior: revalidates the submission with
/// the server-side message list, then walks the bank roster applying age,
/// installment, balance and refinance rules.
#[derive(Default)]
pub struct RulesEvaluator;

impl RulesEvaluator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Evaluator for RulesEvaluator {
    async fn evaluate(&self, record: &FieldRecord) -> Result<EvaluatorReply> {
        match parse_application(record) {
            Err(messages) => Ok(EvaluatorReply::Rejected { messages }),
            Ok(application) => {
                let offers = eligible_offers(&application);
                Ok(EvaluatorReply::Accepted {
                    total_lenders: offers.len() as u32,
                    offers,
                })
            }
        }
    }
}

fn eligible_offers(application: &Application) -> Vec<LenderOffer> {
    let mut offers = Vec::new();

    for &bank in BANKS {
        if BLOCKED_BANKS.contains(&bank) {
            continue;
        }

        let rule = rule_for(bank);
        if application.age > rule.max_age {
            continue;
        }

        let min_installments = if application.disability_benefit {
            DISABILITY_MIN_INSTALLMENTS
        } else {
            rule.min_installments
        };
        if application.installments_paid < min_installments {
            continue;
        }
        if application.disability_benefit && !rule.accepts_disability {
            continue;
        }

        if application.outstanding_balance < MIN_OUTSTANDING_BALANCE {
            continue;
        }
        let refinance = application.total_value - application.outstanding_balance;
        if refinance < MIN_REFINANCE_DIFFERENCE {
            continue;
        }

        let operation_type = if refinance > Decimal::ZERO {
            "Port+Refin"
        } else {
            "Portabilidade"
        };
        let applicable_rate = rule.default_rate.min(application.rate + RATE_MARKUP);

        let mut notes = Vec::new();
        if application.disability_benefit {
            notes.push("Benefício por invalidez".to_string());
        }
        if refinance > Decimal::ZERO {
            notes.push(format!("Refinanciamento de R$ {:.2}", refinance));
        }
        if application.installments_paid >= min_installments + 5 {
            notes.push("Cliente com histórico positivo".to_string());
        }

        offers.push(LenderOffer {
            lender: bank.to_string(),
            operation_type: operation_type.to_string(),
            applicable_rate,
            notes: if notes.is_empty() {
                "Regras atendidas".to_string()
            } else {
                notes.join("; ")
            },
        });
    }

    offers
}

/// Server-side revalidation of the raw submission. Collects every failing
/// message; a single failure rejects the whole request. The identifier check
/// here is deliberately lenient (length and repeated-digit only), matching
/// the remote evaluator.
fn parse_application(record: &FieldRecord) -> std::result::Result<Application, Vec<String>> {
    let mut messages = Vec::new();

    if record.get(Field::FullName).trim().chars().count() < 3 {
        messages.push("Nome deve ter pelo menos 3 caracteres".to_string());
    }
    if !lenient_identifier_check(record.get(Field::Cpf)) {
        messages.push("CPF inválido".to_string());
    }

    let age = match parse_count(record.get(Field::Age)) {
        Some(age) if (18..=120).contains(&age) => Some(age),
        _ => {
            messages.push("Idade deve ser entre 18 e 120 anos".to_string());
            None
        }
    };

    if record.get(Field::BenefitCode).trim().is_empty() {
        messages.push("Código do benefício é obrigatório".to_string());
    }

    let installments_paid = match parse_count(record.get(Field::InstallmentsPaid)) {
        Some(count) => Some(count),
        None => {
            messages.push("Quantidade de parcelas pagas deve ser um número positivo".to_string());
            None
        }
    };

    if record.get(Field::CurrentLender).trim().is_empty() {
        messages.push("Banco atual é obrigatório".to_string());
    }

    let installment_value =
        parse_amount(record, Field::InstallmentValue, "Valor da parcela", &mut messages);
    let outstanding_balance =
        parse_amount(record, Field::OutstandingBalance, "Saldo devedor", &mut messages);
    let total_value = parse_amount(record, Field::TotalValue, "Valor total", &mut messages);

    let rate = match Decimal::from_str(record.get(Field::Rate).trim()) {
        Ok(rate) if rate >= Decimal::ZERO && rate <= Decimal::ONE_HUNDRED => Some(rate),
        Ok(_) => {
            messages.push("Taxa deve ser entre 0 e 100%".to_string());
            None
        }
        Err(_) => {
            messages.push("Taxa inválida".to_string());
            None
        }
    };

    // The installment value is validated but not consumed by any rule.
    let _ = installment_value;

    if !messages.is_empty() {
        return Err(messages);
    }

    Ok(Application {
        age: age.unwrap_or_default(),
        installments_paid: installments_paid.unwrap_or_default(),
        outstanding_balance: outstanding_balance.unwrap_or_default(),
        total_value: total_value.unwrap_or_default(),
        rate: rate.unwrap_or_default(),
        disability_benefit: record
            .get(Field::BenefitCode)
            .to_lowercase()
            .contains("invalidez"),
    })
}

fn parse_amount(
    record: &FieldRecord,
    field: Field,
    label: &str,
    messages: &mut Vec<String>,
) -> Option<Decimal> {
    match Decimal::from_str(record.get(field).trim()) {
        Ok(amount) if amount > Decimal::ZERO => Some(amount),
        Ok(_) => {
            messages.push(format!("{label} deve ser maior que zero"));
            None
        }
        Err(_) => {
            messages.push(format!("{label} inválido"));
            None
        }
    }
}

fn parse_count(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

fn lenient_identifier_check(value: &str) -> bool {
    let digits: Vec<char> = value.chars().filter(char::is_ascii_digit).collect();
    digits.len() == 11 && !digits.iter().all(|&d| d == digits[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn application_record() -> FieldRecord {
        let mut record = FieldRecord::new();
        record.set(Field::FullName, "Maria da Silva");
        record.set(Field::Cpf, "529.982.247-25");
        record.set(Field::Age, "62");
        record.set(Field::BenefitCode, "41");
        record.set(Field::InstallmentsPaid, "20");
        record.set(Field::CurrentLender, "Bradesco");
        record.set(Field::InstallmentValue, "350.00");
        record.set(Field::OutstandingBalance, "4200.00");
        record.set(Field::TotalValue, "6000.00");
        record.set(Field::Rate, "1.80");
        record
    }

    async fn evaluate(record: &FieldRecord) -> EvaluatorReply {
        RulesEvaluator::new().evaluate(record).await.unwrap()
    }

    fn offers(reply: EvaluatorReply) -> Vec<LenderOffer> {
        match reply {
            EvaluatorReply::Accepted { offers, .. } => offers,
            other => panic!("expected acceptance, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blocked_bank_never_offered() {
        let offers = offers(evaluate(&application_record()).await);
        assert!(!offers.is_empty());
        assert!(offers.iter().all(|o| o.lender != "BRB"));
    }

    #[tokio::test]
    async fn test_roster_walked_in_order() {
        let offers = offers(evaluate(&application_record()).await);
        assert_eq!(offers.len(), BANKS.len() - 1);
        assert_eq!(offers[0].lender, "Banco do Brasil");
    }

    #[tokio::test]
    async fn test_higher_installment_floor_excludes_banks() {
        let mut record = application_record();
        record.set(Field::InstallmentsPaid, "13");

        let offers = offers(evaluate(&record).await);
        assert!(offers.iter().all(|o| o.lender != "Bradesco"));
        assert!(offers.iter().all(|o| o.lender != "Itaú"));
        assert!(offers.iter().any(|o| o.lender == "Banco do Brasil"));
    }

    #[tokio::test]
    async fn test_disability_benefit_lowers_floor() {
        let mut record = application_record();
        record.set(Field::BenefitCode, "32-invalidez");
        record.set(Field::InstallmentsPaid, "6");

        let offers = offers(evaluate(&record).await);
        assert!(offers.iter().any(|o| o.lender == "Bradesco"));
        assert!(offers[0].notes.contains("Benefício por invalidez"));
    }

    #[tokio::test]
    async fn test_age_limit() {
        let mut record = application_record();
        record.set(Field::Age, "86");

        match evaluate(&record).await {
            EvaluatorReply::Accepted { total_lenders, .. } => assert_eq!(total_lenders, 0),
            other => panic!("expected empty acceptance, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_minimum_balance_and_refinance() {
        let mut record = application_record();
        record.set(Field::OutstandingBalance, "499.99");
        assert!(offers(evaluate(&record).await).is_empty());

        let mut record = application_record();
        record.set(Field::OutstandingBalance, "4200.00");
        record.set(Field::TotalValue, "4250.00");
        assert!(offers(evaluate(&record).await).is_empty());
    }

    #[tokio::test]
    async fn test_applicable_rate_is_capped() {
        let offers = offers(evaluate(&application_record()).await);
        // 1.80 + 0.5 stays under the 2.49 default
        assert_eq!(offers[0].applicable_rate, dec!(2.30));

        let mut record = application_record();
        record.set(Field::Rate, "2.40");
        let offers = self::offers(evaluate(&record).await);
        assert_eq!(offers[0].applicable_rate, dec!(2.49));
    }

    #[tokio::test]
    async fn test_notes_assembly() {
        let offers = offers(evaluate(&application_record()).await);
        // 20 installments clears the 12 + 5 history threshold
        assert_eq!(
            offers[0].notes,
            "Refinanciamento de R$ 1800.00; Cliente com histórico positivo"
        );
    }

    #[tokio::test]
    async fn test_invalid_submission_is_rejected_with_server_messages() {
        let mut record = application_record();
        record.set(Field::FullName, "ab");
        record.set(Field::Rate, "abc");

        match evaluate(&record).await {
            EvaluatorReply::Rejected { messages } => {
                assert_eq!(
                    messages,
                    vec![
                        "Nome deve ter pelo menos 3 caracteres".to_string(),
                        "Taxa inválida".to_string(),
                    ]
                );
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_lenient_identifier_check_accepts_bad_checksum() {
        // Server-side check only looks at length and repeated digits.
        let mut record = application_record();
        record.set(Field::Cpf, "52998224724");
        assert!(!offers(evaluate(&record).await).is_empty());
    }
}
