use crate::utils::error::SubmissionError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw field values as the user typed them. Amount and dates stay as text
/// until validation parses them; an unparseable value reads as "not entered".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FormDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub origin_country: String,
    #[serde(default)]
    pub project_code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// A fully validated financing request. Only constructed once every field
/// rule has passed.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancingRequest {
    pub name: String,
    pub origin_country: String,
    pub project_code: String,
    pub description: String,
    pub amount: f64,
    pub currency: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub code: String,
    pub display_name: String,
}

/// Country and currency catalogs, loaded once per session. The fallback
/// flags record which axis had its static substitute applied.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub countries: Vec<Country>,
    pub currencies: BTreeMap<String, String>,
    pub countries_from_fallback: bool,
    pub currencies_from_fallback: bool,
}

impl ReferenceData {
    pub fn has_country(&self, code: &str) -> bool {
        self.countries.iter().any(|c| c.code == code)
    }

    pub fn has_currency(&self, code: &str) -> bool {
        self.currencies.contains_key(code)
    }

    pub fn used_any_fallback(&self) -> bool {
        self.countries_from_fallback || self.currencies_from_fallback
    }
}

/// Wire shape of the submission POST body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub full_name: String,
    pub country_code: String,
    pub project_code: String,
    pub description: String,
    pub amount: f64,
    pub currency: String,
    pub date: NaiveDate,
    pub validity_period: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Accepted,
    Rejected {
        kind: SubmissionError,
        message: String,
    },
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted)
    }

    pub fn rejected(kind: SubmissionError) -> Self {
        let message = kind.user_message();
        SubmissionOutcome::Rejected { kind, message }
    }
}
