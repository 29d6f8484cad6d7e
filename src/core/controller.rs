use crate::core::rules::{self, Field, RuleViolation};
use crate::domain::model::{FormDraft, ReferenceData, SubmissionOutcome, SubmissionPayload};
use crate::domain::ports::SubmissionGateway;
use crate::utils::error::{FormError, Result};
use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
    SubmittedOk,
    SubmittedError,
}

type Clock = Box<dyn Fn() -> NaiveDate + Send + Sync>;

/// Owns the draft, re-validates on every field change and gates submission.
/// Reference data and the clock are passed in at construction; there is no
/// ambient session state.
pub struct FormController {
    draft: FormDraft,
    reference: ReferenceData,
    phase: FormPhase,
    currency_editable: bool,
    errors: BTreeMap<Field, RuleViolation>,
    last_outcome: Option<SubmissionOutcome>,
    clock: Clock,
}

impl FormController {
    pub fn new(reference: ReferenceData) -> Self {
        Self::with_clock(reference, Box::new(|| Local::now().date_naive()))
    }

    pub fn with_clock(reference: ReferenceData, clock: Clock) -> Self {
        let mut controller = Self {
            draft: FormDraft::default(),
            reference,
            phase: FormPhase::Editing,
            currency_editable: true,
            errors: BTreeMap::new(),
            last_outcome: None,
            clock,
        };
        controller.revalidate();
        controller
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn errors(&self) -> &BTreeMap<Field, RuleViolation> {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn can_submit(&self) -> bool {
        self.is_valid() && self.phase != FormPhase::Submitting
    }

    /// Capability flag for the rendering layer: false while an OPEC origin
    /// forces the currency to USD.
    pub fn currency_editable(&self) -> bool {
        self.currency_editable
    }

    /// Characters left for the 150-char description counter.
    pub fn description_remaining(&self) -> i64 {
        rules::DESCRIPTION_MAX_CHARS as i64 - self.draft.description.chars().count() as i64
    }

    pub fn last_outcome(&self) -> Option<&SubmissionOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn set_name(&mut self, value: &str) {
        self.draft.name = value.to_string();
        self.revalidate();
    }

    /// Country selection. Unknown codes are ignored, matching a select
    /// widget that only offers the loaded catalog. An OPEC origin forces
    /// the currency to USD and locks the field; leaving the OPEC set
    /// unlocks it without clearing the forced value.
    pub fn set_origin_country(&mut self, code: &str) {
        if !code.is_empty() && !self.reference.has_country(code) {
            tracing::warn!("ignoring unknown country code: {}", code);
            return;
        }
        self.draft.origin_country = code.to_string();

        if rules::is_opec(code) {
            if self.draft.currency != "USD" {
                tracing::debug!("OPEC origin {}: forcing currency to USD", code);
            }
            self.draft.currency = "USD".to_string();
            self.currency_editable = false;
        } else {
            self.currency_editable = true;
        }
        self.revalidate();
    }

    pub fn set_project_code(&mut self, value: &str) {
        self.draft.project_code = value.to_string();
        self.revalidate();
    }

    pub fn set_description(&mut self, value: &str) {
        self.draft.description = value.to_string();
        self.revalidate();
    }

    pub fn set_amount(&mut self, raw: &str) {
        self.draft.amount = raw.to_string();
        self.revalidate();
    }

    /// Currency selection; a no-op while the field is forced to USD.
    pub fn set_currency(&mut self, code: &str) {
        if !self.currency_editable {
            tracing::warn!("currency is forced to USD for an OPEC origin; ignoring {}", code);
            return;
        }
        if !code.is_empty() && !self.reference.has_currency(code) {
            tracing::warn!("ignoring unknown currency code: {}", code);
            return;
        }
        self.draft.currency = code.to_string();
        self.revalidate();
    }

    pub fn set_start_date(&mut self, raw: &str) {
        self.draft.start_date = raw.to_string();
        self.revalidate();
    }

    pub fn set_end_date(&mut self, raw: &str) {
        self.draft.end_date = raw.to_string();
        self.revalidate();
    }

    /// One submit cycle: Editing -> Submitting -> SubmittedOk | SubmittedError.
    /// A success clears the draft; a rejection keeps the fields for
    /// correction. Gated on `can_submit`.
    pub async fn submit<G: SubmissionGateway + ?Sized>(
        &mut self,
        gateway: &G,
    ) -> Result<SubmissionOutcome> {
        if !self.can_submit() {
            let reason = if self.phase == FormPhase::Submitting {
                "a submission is already in flight".to_string()
            } else {
                format!("{} field(s) failed validation", self.errors.len())
            };
            return Err(FormError::NotSubmittable { reason });
        }

        let today = (self.clock)();
        let request = rules::build_request(&self.draft, today).ok_or_else(|| {
            FormError::NotSubmittable {
                reason: "draft no longer parses as a complete request".to_string(),
            }
        })?;

        let payload = SubmissionPayload {
            full_name: request.name.clone(),
            country_code: request.origin_country.clone(),
            project_code: request.project_code.clone(),
            description: request.description.clone(),
            amount: request.amount,
            currency: request.currency.clone(),
            date: request.start_date,
            validity_period: rules::validity_period_years(request.start_date, request.end_date),
        };

        self.phase = FormPhase::Submitting;
        tracing::info!("submitting financing request {}", payload.project_code);

        let outcome = gateway.submit(&payload).await;

        match &outcome {
            SubmissionOutcome::Accepted => {
                self.phase = FormPhase::SubmittedOk;
                self.draft = FormDraft::default();
                self.currency_editable = true;
                self.revalidate();
            }
            SubmissionOutcome::Rejected { kind, message } => {
                tracing::warn!("submission rejected ({}): {}", kind, message);
                self.phase = FormPhase::SubmittedError;
            }
        }

        self.last_outcome = Some(outcome.clone());
        Ok(outcome)
    }

    /// Return to Editing after a terminal outcome has been shown.
    pub fn acknowledge(&mut self) {
        if matches!(self.phase, FormPhase::SubmittedOk | FormPhase::SubmittedError) {
            self.phase = FormPhase::Editing;
        }
    }

    // 每次欄位變更後重新驗證整份表單
    fn revalidate(&mut self) {
        let today = (self.clock)();
        self.errors = rules::validate_draft(&self.draft, today);
    }
}
