//! PII category data model

use serde::{Deserialize, Serialize};
use std::fmt;

/// PII category enumeration
///
/// Categories are attached to dictionary labels and library patterns so that
/// reports and audit records can say *what* was masked without ever saying
/// *which value* was masked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PiiCategory {
    /// Generic government-issued identifiers
    GovernmentId,
    /// Social Security Numbers
    Ssn,
    /// Tax identifiers (including alphanumeric tax IDs)
    #[serde(alias = "PAN")]
    TaxId,
    /// Federal employer identification numbers
    #[serde(alias = "FEIN")]
    EmployerId,
    /// Driver's license numbers
    DriversLicense,
    /// Identification card numbers
    IdentificationCard,
    /// Passport and travel document numbers
    Passport,
    /// Military identifiers
    MilitaryId,
    /// Dates of birth
    #[serde(alias = "DOB")]
    DateOfBirth,
    /// Home addresses
    Address,
    /// Telephone numbers
    Phone,
    /// Email addresses
    Email,
    /// Social media handles and contact details
    SocialMedia,
    /// Health insurance policy numbers
    HealthPlanNumber,
    /// Medical record numbers
    #[serde(alias = "MRN")]
    MedicalRecordNumber,
    /// Insurance claim numbers
    ClaimNumber,
    /// Patient and bank account numbers
    AccountNumber,
    /// File numbers
    FileNumber,
    /// Chart numbers
    ChartNumber,
    /// Free-form financial information
    FinancialInformation,
    /// Payment card numbers
    CreditCard,
    /// Three-groups-of-four national ID numbers
    #[serde(alias = "AADHAAR")]
    NationalId,
    /// Long digit runs caught by the catch-all pass
    LongNumber,
}

impl PiiCategory {
    /// Get the stable label for the category
    pub fn label(&self) -> &'static str {
        match self {
            Self::GovernmentId => "GOVERNMENT_ID",
            Self::Ssn => "SSN",
            Self::TaxId => "TAX_ID",
            Self::EmployerId => "EMPLOYER_ID",
            Self::DriversLicense => "DRIVERS_LICENSE",
            Self::IdentificationCard => "IDENTIFICATION_CARD",
            Self::Passport => "PASSPORT",
            Self::MilitaryId => "MILITARY_ID",
            Self::DateOfBirth => "DATE_OF_BIRTH",
            Self::Address => "ADDRESS",
            Self::Phone => "PHONE",
            Self::Email => "EMAIL",
            Self::SocialMedia => "SOCIAL_MEDIA",
            Self::HealthPlanNumber => "HEALTH_PLAN_NUMBER",
            Self::MedicalRecordNumber => "MEDICAL_RECORD_NUMBER",
            Self::ClaimNumber => "CLAIM_NUMBER",
            Self::AccountNumber => "ACCOUNT_NUMBER",
            Self::FileNumber => "FILE_NUMBER",
            Self::ChartNumber => "CHART_NUMBER",
            Self::FinancialInformation => "FINANCIAL_INFORMATION",
            Self::CreditCard => "CREDIT_CARD",
            Self::NationalId => "NATIONAL_ID",
            Self::LongNumber => "LONG_NUMBER",
        }
    }
}

impl fmt::Display for PiiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which engine pass masked a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactionPass {
    /// Label-value pass
    Label,
    /// Named pattern pass
    Pattern,
    /// Long digit run pass
    CatchAll,
}
