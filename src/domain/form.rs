use std::collections::BTreeMap;
use std::fmt;

/// Determines which mask and which validation rule apply to a field.
///
/// The set is closed; a field's class is fixed for the lifetime of the form
/// and never inferred from its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldClass {
    Name,
    NationalId,
    Age,
    BenefitCode,
    InstallmentsPaid,
    CurrentLender,
    MonetaryAmount,
    PercentageRate,
}

/// The nine fields of the portability form.
///
/// Each field carries a fixed wire key (the form-encoded parameter name the
/// evaluator expects) and a fixed [`FieldClass`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FullName,
    Cpf,
    Age,
    BenefitCode,
    InstallmentsPaid,
    CurrentLender,
    InstallmentValue,
    OutstandingBalance,
    TotalValue,
    Rate,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::FullName,
        Field::Cpf,
        Field::Age,
        Field::BenefitCode,
        Field::InstallmentsPaid,
        Field::CurrentLender,
        Field::InstallmentValue,
        Field::OutstandingBalance,
        Field::TotalValue,
        Field::Rate,
    ];

    /// The form-encoded parameter name used on the wire.
    pub fn key(self) -> &'static str {
        match self {
            Field::FullName => "nome",
            Field::Cpf => "cpf",
            Field::Age => "idade",
            Field::BenefitCode => "codigo_beneficio",
            Field::InstallmentsPaid => "parcelas_pagas",
            Field::CurrentLender => "banco_atual",
            Field::InstallmentValue => "valor_parcela",
            Field::OutstandingBalance => "saldo_devedor",
            Field::TotalValue => "valor_total",
            Field::Rate => "taxa",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.key() == key)
    }

    pub fn class(self) -> FieldClass {
        match self {
            Field::FullName => FieldClass::Name,
            Field::Cpf => FieldClass::NationalId,
            Field::Age => FieldClass::Age,
            Field::BenefitCode => FieldClass::BenefitCode,
            Field::InstallmentsPaid => FieldClass::InstallmentsPaid,
            Field::CurrentLender => FieldClass::CurrentLender,
            Field::InstallmentValue | Field::OutstandingBalance | Field::TotalValue => {
                FieldClass::MonetaryAmount
            }
            Field::Rate => FieldClass::PercentageRate,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Snapshot of the form: field name to raw string value.
///
/// Built from live form state and captured immutably at submission time.
/// Fields never touched read back as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRecord {
    values: BTreeMap<Field, String>,
}

impl FieldRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Serializes the record as the flat key/value pairs the evaluator
    /// accepts, covering every field in form order.
    pub fn to_form_pairs(&self) -> Vec<(&'static str, String)> {
        Field::ALL
            .iter()
            .map(|&f| (f.key(), self.get(f).to_string()))
            .collect()
    }
}
