//! Document types and their extraction fields

use serde::{Deserialize, Serialize};

/// Category of financial document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Account statement with a transaction table
    BankStatement,
    /// Employee payslip
    SalarySlip,
    /// Income tax return / Form 16
    Itr,
    /// Electricity, water, gas, phone or internet bill
    UtilityBill,
    /// Single cheque
    Check,
    /// Not enough evidence to classify
    Unknown,
}

impl DocumentType {
    /// Canonical label used in reports and comparisons
    pub fn canonical_name(&self) -> &'static str {
        match self {
            DocumentType::BankStatement => "bank_statement",
            DocumentType::SalarySlip => "salary_slip",
            DocumentType::Itr => "itr",
            DocumentType::UtilityBill => "utility_bill",
            DocumentType::Check => "check",
            DocumentType::Unknown => "unknown",
        }
    }

    /// Name of the dataset folder holding this category
    pub fn folder_name(&self) -> &'static str {
        match self {
            DocumentType::BankStatement => "Bank Statement",
            DocumentType::SalarySlip => "Salary Slip",
            DocumentType::Itr => "ITR_Form 16",
            DocumentType::UtilityBill => "Utility",
            DocumentType::Check => "Check",
            DocumentType::Unknown => "unknown",
        }
    }

    /// Every classifiable type, without `Unknown`
    pub fn all() -> &'static [DocumentType] {
        &[
            DocumentType::BankStatement,
            DocumentType::Check,
            DocumentType::Itr,
            DocumentType::SalarySlip,
            DocumentType::UtilityBill,
        ]
    }

    /// Resolve a free-form label ("Bank Statement", "ITR_Form 16", "cheque", ...)
    pub fn parse(label: &str) -> Option<Self> {
        let key: String = label
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        let key: Vec<&str> = key.split('_').filter(|p| !p.is_empty()).collect();

        match key.join("_").as_str() {
            "bank_statement" | "bank" | "statement" => Some(DocumentType::BankStatement),
            "salary_slip" | "salary" | "payslip" | "pay_slip" => Some(DocumentType::SalarySlip),
            "itr" | "itr_form_16" | "itr_form16" | "form_16" | "form16" => Some(DocumentType::Itr),
            "utility" | "utility_bill" => Some(DocumentType::UtilityBill),
            "check" | "cheque" => Some(DocumentType::Check),
            "unknown" => Some(DocumentType::Unknown),
            _ => None,
        }
    }

    /// Map a label onto its canonical name, keeping unrecognised labels trimmed
    pub fn normalize(label: &str) -> String {
        match Self::parse(label) {
            Some(doc_type) => doc_type.canonical_name().to_string(),
            None => label.trim().to_string(),
        }
    }

    /// Fields the extractor is expected to fill for this type
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            DocumentType::BankStatement => &[
                "account_holder_name",
                "account_number",
                "statement_period_start",
                "statement_period_end",
                "opening_balance",
                "closing_balance",
            ],
            DocumentType::SalarySlip => &[
                "employee_name",
                "employee_id",
                "month",
                "year",
                "basic_salary",
                "allowances",
                "deductions",
                "net_salary",
                "employer_name",
            ],
            DocumentType::Itr => &[
                "taxpayer_name",
                "pan_number",
                "assessment_year",
                "total_income",
                "tax_payable",
                "filing_date",
            ],
            DocumentType::UtilityBill => &[
                "consumer_name",
                "consumer_number",
                "bill_date",
                "due_date",
                "billing_period_start",
                "billing_period_end",
                "total_amount",
                "utility_type",
            ],
            DocumentType::Check => &[
                "check_number",
                "payee_name",
                "amount_in_numbers",
                "amount_in_words",
                "bank_name",
            ],
            DocumentType::Unknown => &[],
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}
