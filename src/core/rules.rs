use crate::domain::model::{FinancingRequest, FormDraft};
use chrono::{Duration, NaiveDate};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use thiserror::Error;

/// The thirteen OPEC member codes. Origin in this set forces USD.
pub const OPEC_COUNTRIES: [&str; 13] = [
    "DZ", "AO", "CG", "GQ", "GA", "IR", "IQ", "KW", "LY", "NG", "SA", "AE", "VE",
];

pub const DESCRIPTION_MAX_CHARS: usize = 150;
pub const MIN_LEAD_DAYS: i64 = 15;
pub const MIN_VALIDITY_YEARS: f64 = 1.0;
pub const MAX_VALIDITY_YEARS: f64 = 3.0;

// 平均年長度，與前端日期函式庫的慣例一致
const AVERAGE_YEAR_DAYS: f64 = 365.25;

const PROJECT_CODE_PATTERN: &str = "^[A-Z]{4}-[1-9]{4}$";

fn project_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PROJECT_CODE_PATTERN).unwrap())
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("this field is required")]
    Required,

    #[error("expected four uppercase letters, a hyphen, then four digits 1-9 (e.g. ABCD-1234)")]
    FormatInvalid,

    #[error("value exceeds the allowed length")]
    TooLong,

    #[error("validity period is shorter than one year")]
    TooShort,

    #[error("amount must be greater than zero")]
    MustBePositive,

    #[error("start date must be at least 15 days from today")]
    TooSoon,

    #[error("end date must be after the start date")]
    EndBeforeOrEqualStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    OriginCountry,
    ProjectCode,
    Description,
    Amount,
    Currency,
    StartDate,
    EndDate,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::OriginCountry => "origin_country",
            Field::ProjectCode => "project_code",
            Field::Description => "description",
            Field::Amount => "amount",
            Field::Currency => "currency",
            Field::StartDate => "start_date",
            Field::EndDate => "end_date",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub fn is_opec(code: &str) -> bool {
    OPEC_COUNTRIES.contains(&code)
}

pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Elapsed time between two dates as a fractional year count.
pub fn years_between(start: NaiveDate, end: NaiveDate) -> f64 {
    (end - start).num_days() as f64 / AVERAGE_YEAR_DAYS
}

/// Whole-year count for the wire payload. Standard rounding: half up
/// (away from zero), which for a positive span is half up.
pub fn validity_period_years(start: NaiveDate, end: NaiveDate) -> i64 {
    years_between(start, end).round() as i64
}

pub fn validate_name(value: &str) -> Result<(), RuleViolation> {
    if value.trim().is_empty() {
        return Err(RuleViolation::Required);
    }
    Ok(())
}

pub fn validate_origin_country(value: &str) -> Result<(), RuleViolation> {
    if value.trim().is_empty() {
        return Err(RuleViolation::Required);
    }
    Ok(())
}

pub fn validate_project_code(value: &str) -> Result<(), RuleViolation> {
    if value.is_empty() {
        return Err(RuleViolation::Required);
    }
    if !project_code_regex().is_match(value) {
        return Err(RuleViolation::FormatInvalid);
    }
    Ok(())
}

pub fn validate_description(value: &str) -> Result<(), RuleViolation> {
    if value.is_empty() {
        return Err(RuleViolation::Required);
    }
    // 以字元數計算，不是位元組數
    if value.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(RuleViolation::TooLong);
    }
    Ok(())
}

pub fn validate_amount(raw: &str) -> Result<(), RuleViolation> {
    let amount = parse_amount(raw).ok_or(RuleViolation::Required)?;
    if amount <= 0.0 {
        return Err(RuleViolation::MustBePositive);
    }
    Ok(())
}

pub fn validate_currency(value: &str) -> Result<(), RuleViolation> {
    if value.trim().is_empty() {
        return Err(RuleViolation::Required);
    }
    Ok(())
}

/// Day-granularity comparison: the start date must be on or after
/// `today + 15 days`. The anchor is always the moment of validation,
/// never a fixed calendar date.
pub fn validate_start_date(raw: &str, today: NaiveDate) -> Result<(), RuleViolation> {
    let start = parse_date(raw).ok_or(RuleViolation::Required)?;
    if start < today + Duration::days(MIN_LEAD_DAYS) {
        return Err(RuleViolation::TooSoon);
    }
    Ok(())
}

/// Inclusive window check on the fractional year count: exactly 1.0 and
/// exactly 3.0 both pass, anything outside [1, 3] fails.
pub fn validate_validity_years(years: f64) -> Result<(), RuleViolation> {
    if years < MIN_VALIDITY_YEARS {
        return Err(RuleViolation::TooShort);
    }
    if years > MAX_VALIDITY_YEARS {
        return Err(RuleViolation::TooLong);
    }
    Ok(())
}

/// Cross-field rule for the end date, given the raw start date text. When
/// the start date itself is absent or unparseable only the end date's own
/// presence is checked; the window rule needs both dates.
pub fn validate_end_date(raw_end: &str, raw_start: &str) -> Result<(), RuleViolation> {
    let end = parse_date(raw_end).ok_or(RuleViolation::Required)?;
    let Some(start) = parse_date(raw_start) else {
        return Ok(());
    };
    if end <= start {
        return Err(RuleViolation::EndBeforeOrEqualStart);
    }
    validate_validity_years(years_between(start, end))
}

/// Full per-field evaluation of a draft. The form is valid exactly when the
/// returned map is empty; callers re-run this on every field change.
pub fn validate_draft(draft: &FormDraft, today: NaiveDate) -> BTreeMap<Field, RuleViolation> {
    let mut errors = BTreeMap::new();

    let checks: [(Field, Result<(), RuleViolation>); 8] = [
        (Field::Name, validate_name(&draft.name)),
        (Field::OriginCountry, validate_origin_country(&draft.origin_country)),
        (Field::ProjectCode, validate_project_code(&draft.project_code)),
        (Field::Description, validate_description(&draft.description)),
        (Field::Amount, validate_amount(&draft.amount)),
        (Field::Currency, validate_currency(&draft.currency)),
        (Field::StartDate, validate_start_date(&draft.start_date, today)),
        (Field::EndDate, validate_end_date(&draft.end_date, &draft.start_date)),
    ];

    for (field, result) in checks {
        if let Err(violation) = result {
            errors.insert(field, violation);
        }
    }

    errors
}

/// Turn a draft into a typed request. Returns `None` unless every field
/// parses; run `validate_draft` first to get per-field diagnostics.
pub fn build_request(draft: &FormDraft, today: NaiveDate) -> Option<FinancingRequest> {
    if !validate_draft(draft, today).is_empty() {
        return None;
    }
    Some(FinancingRequest {
        name: draft.name.trim().to_string(),
        origin_country: draft.origin_country.clone(),
        project_code: draft.project_code.clone(),
        description: draft.description.clone(),
        amount: parse_amount(&draft.amount)?,
        currency: draft.currency.clone(),
        start_date: parse_date(&draft.start_date)?,
        end_date: parse_date(&draft.end_date)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_code_format() {
        assert!(validate_project_code("ABCD-1234").is_ok());
        assert!(validate_project_code("ZZZZ-9999").is_ok());

        assert_eq!(validate_project_code(""), Err(RuleViolation::Required));
        // lowercase letter
        assert_eq!(
            validate_project_code("abcd-1234"),
            Err(RuleViolation::FormatInvalid)
        );
        // zero is rejected in every digit position
        assert_eq!(
            validate_project_code("ABCD-0234"),
            Err(RuleViolation::FormatInvalid)
        );
        assert_eq!(
            validate_project_code("ABCD-1230"),
            Err(RuleViolation::FormatInvalid)
        );
        // wrong segment lengths
        assert_eq!(
            validate_project_code("ABC-1234"),
            Err(RuleViolation::FormatInvalid)
        );
        assert_eq!(
            validate_project_code("ABCD-12345"),
            Err(RuleViolation::FormatInvalid)
        );
        // missing hyphen
        assert_eq!(
            validate_project_code("ABCD1234"),
            Err(RuleViolation::FormatInvalid)
        );
    }

    #[test]
    fn test_opec_membership() {
        for code in OPEC_COUNTRIES {
            assert!(is_opec(code), "{} should be OPEC", code);
        }
        assert!(!is_opec("US"));
        assert!(!is_opec("GB"));
        assert!(!is_opec(""));
    }

    #[test]
    fn test_description_char_counted() {
        assert!(validate_description(&"x".repeat(150)).is_ok());
        assert_eq!(
            validate_description(&"x".repeat(151)),
            Err(RuleViolation::TooLong)
        );
        // 150 multibyte chars are more than 150 bytes but still pass
        assert!(validate_description(&"é".repeat(150)).is_ok());
        assert_eq!(validate_description(""), Err(RuleViolation::Required));
    }

    #[test]
    fn test_amount_rules() {
        assert!(validate_amount("1000").is_ok());
        assert!(validate_amount("0.01").is_ok());
        assert_eq!(validate_amount(""), Err(RuleViolation::Required));
        assert_eq!(validate_amount("abc"), Err(RuleViolation::Required));
        assert_eq!(validate_amount("0"), Err(RuleViolation::MustBePositive));
        assert_eq!(validate_amount("-5"), Err(RuleViolation::MustBePositive));
    }

    #[test]
    fn test_start_date_window() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        let at = |days: i64| (today + Duration::days(days)).format("%Y-%m-%d").to_string();

        assert_eq!(
            validate_start_date(&at(14), today),
            Err(RuleViolation::TooSoon)
        );
        assert!(validate_start_date(&at(15), today).is_ok());
        assert!(validate_start_date(&at(100), today).is_ok());
        assert_eq!(validate_start_date("", today), Err(RuleViolation::Required));
        assert_eq!(
            validate_start_date("not-a-date", today),
            Err(RuleViolation::Required)
        );
    }

    #[test]
    fn test_validity_year_window_boundaries() {
        assert_eq!(validate_validity_years(0.999), Err(RuleViolation::TooShort));
        assert!(validate_validity_years(1.0).is_ok());
        assert!(validate_validity_years(2.0).is_ok());
        assert!(validate_validity_years(3.0).is_ok());
        assert_eq!(validate_validity_years(3.0001), Err(RuleViolation::TooLong));
    }

    #[test]
    fn test_end_date_rules() {
        let start = "2026-10-01";

        assert_eq!(validate_end_date("", start), Err(RuleViolation::Required));
        assert_eq!(
            validate_end_date("2026-10-01", start),
            Err(RuleViolation::EndBeforeOrEqualStart)
        );
        assert_eq!(
            validate_end_date("2026-09-30", start),
            Err(RuleViolation::EndBeforeOrEqualStart)
        );
        // 1095 days = 2.998 years, inside the window
        assert!(validate_end_date("2029-09-30", start).is_ok());
        // 300 days is under a year
        assert_eq!(
            validate_end_date("2027-07-28", start),
            Err(RuleViolation::TooShort)
        );
        // 1200 days is over three years
        assert_eq!(
            validate_end_date("2030-01-13", start),
            Err(RuleViolation::TooLong)
        );
        // unparseable start: only the end date's own presence is judged here
        assert!(validate_end_date("2027-10-01", "").is_ok());
    }

    #[test]
    fn test_years_between_uses_average_year() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let end = start + Duration::days(731);
        let years = years_between(start, end);
        assert!((years - 731.0 / 365.25).abs() < 1e-9);
    }

    #[test]
    fn test_validity_period_rounds_half_up() {
        let start = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();

        // ~2 years rounds to 2
        assert_eq!(validity_period_years(start, start + Duration::days(730)), 2);
        // 548 days = 1.5003 years, the half rounds up to 2
        assert_eq!(validity_period_years(start, start + Duration::days(548)), 2);
        // 512 days = 1.40 years rounds down
        assert_eq!(validity_period_years(start, start + Duration::days(512)), 1);
        // 913 days = 2.4996 years rounds down to 2
        assert_eq!(validity_period_years(start, start + Duration::days(913)), 2);
        // 914 days = 2.5024 years rounds up to 3
        assert_eq!(validity_period_years(start, start + Duration::days(914)), 3);
    }

    #[test]
    fn test_validate_draft_conjunction() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        let draft = FormDraft::default();
        let errors = validate_draft(&draft, today);
        // every field of an empty draft is missing
        assert_eq!(errors.len(), 8);
        assert!(errors.values().all(|v| *v == RuleViolation::Required));
    }

    #[test]
    fn test_build_request_happy_path() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        let start = today + Duration::days(20);
        let end = start + Duration::days(730);
        let draft = FormDraft {
            name: "Jane Doe".to_string(),
            origin_country: "US".to_string(),
            project_code: "ABCD-1234".to_string(),
            description: "test".to_string(),
            amount: "1000".to_string(),
            currency: "EUR".to_string(),
            start_date: start.format("%Y-%m-%d").to_string(),
            end_date: end.format("%Y-%m-%d").to_string(),
        };

        assert!(validate_draft(&draft, today).is_empty());
        let request = build_request(&draft, today).unwrap();
        assert_eq!(request.name, "Jane Doe");
        assert_eq!(request.amount, 1000.0);
        assert_eq!(validity_period_years(request.start_date, request.end_date), 2);
    }

    #[test]
    fn test_build_request_rejects_invalid_draft() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        let draft = FormDraft {
            name: "Jane Doe".to_string(),
            ..FormDraft::default()
        };
        assert!(build_request(&draft, today).is_none());
    }
}
