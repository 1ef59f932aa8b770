//! Per-field validation rules and the whole-form aggregator.
//!
//! Rules are independent of one another; the aggregator evaluates every field
//! so the presentation layer can surface all errors at once.

use crate::domain::form::{Field, FieldClass, FieldRecord};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

pub const MSG_NAME: &str = "Nome deve ter pelo menos 3 caracteres";
pub const MSG_NATIONAL_ID: &str = "CPF inválido";
pub const MSG_AGE: &str = "Idade deve ser entre 18 e 120 anos";
pub const MSG_BENEFIT_CODE: &str = "Código do benefício é obrigatório";
pub const MSG_INSTALLMENTS: &str = "Quantidade de parcelas deve ser um número positivo";
pub const MSG_CURRENT_LENDER: &str = "Banco atual é obrigatório";
pub const MSG_MONETARY: &str = "Valor deve ser maior que zero";
pub const MSG_PERCENTAGE: &str = "Taxa deve ser entre 0 e 100%";

/// Result of validating a single field. Recomputed on every blur/change event
/// and on submission; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub message: Option<&'static str>,
}

impl ValidationOutcome {
    fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    fn fail(message: &'static str) -> Self {
        Self {
            valid: false,
            message: Some(message),
        }
    }
}

/// Result of validating a whole record, derived entirely from the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValidationResult {
    pub all_valid: bool,
    pub outcomes: BTreeMap<Field, ValidationOutcome>,
}

impl FormValidationResult {
    /// The messages of every failing field, in form order.
    pub fn messages(&self) -> Vec<String> {
        self.outcomes
            .values()
            .filter_map(|o| o.message.map(String::from))
            .collect()
    }
}

/// Validates a single value under the rules of its field class.
pub fn validate(class: FieldClass, value: &str) -> ValidationOutcome {
    let value = value.trim();
    match class {
        FieldClass::Name => {
            if value.chars().count() >= 3 {
                ValidationOutcome::pass()
            } else {
                ValidationOutcome::fail(MSG_NAME)
            }
        }
        FieldClass::NationalId => {
            if national_id_checksum(value) {
                ValidationOutcome::pass()
            } else {
                ValidationOutcome::fail(MSG_NATIONAL_ID)
            }
        }
        FieldClass::Age => match value.parse::<i64>() {
            Ok(age) if (18..=120).contains(&age) => ValidationOutcome::pass(),
            _ => ValidationOutcome::fail(MSG_AGE),
        },
        FieldClass::BenefitCode => {
            if value.is_empty() {
                ValidationOutcome::fail(MSG_BENEFIT_CODE)
            } else {
                ValidationOutcome::pass()
            }
        }
        FieldClass::InstallmentsPaid => match value.parse::<i64>() {
            Ok(count) if count >= 0 => ValidationOutcome::pass(),
            _ => ValidationOutcome::fail(MSG_INSTALLMENTS),
        },
        FieldClass::CurrentLender => {
            if value.is_empty() {
                ValidationOutcome::fail(MSG_CURRENT_LENDER)
            } else {
                ValidationOutcome::pass()
            }
        }
        FieldClass::MonetaryAmount => match Decimal::from_str(value) {
            Ok(amount) if amount > Decimal::ZERO => ValidationOutcome::pass(),
            _ => ValidationOutcome::fail(MSG_MONETARY),
        },
        FieldClass::PercentageRate => match Decimal::from_str(value) {
            Ok(rate) if rate >= Decimal::ZERO && rate <= Decimal::ONE_HUNDRED => {
                ValidationOutcome::pass()
            }
            _ => ValidationOutcome::fail(MSG_PERCENTAGE),
        },
    }
}

/// Validates every field of the record with no short-circuit.
pub fn validate_all(record: &FieldRecord) -> FormValidationResult {
    let outcomes: BTreeMap<Field, ValidationOutcome> = Field::ALL
        .iter()
        .map(|&field| (field, validate(field.class(), record.get(field))))
        .collect();
    let all_valid = outcomes.values().all(|o| o.valid);

    FormValidationResult {
        all_valid,
        outcomes,
    }
}

/// Checksum for the 11-digit national identifier.
///
/// Mask separators are stripped first. The value must be exactly 11 digits,
/// not a single repeated digit, and both weighted-sum check digits must match.
pub fn national_id_checksum(value: &str) -> bool {
    let digits: Vec<u32> = value.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 11 {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let check = |count: u32| {
        let sum: u32 = digits
            .iter()
            .take(count as usize)
            .enumerate()
            .map(|(i, &d)| d * (count + 1 - i as u32))
            .sum();
        let remainder = sum % 11;
        if remainder < 2 { 0 } else { 11 - remainder }
    };

    check(9) == digits[9] && check(10) == digits[10]
}
