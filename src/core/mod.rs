pub mod controller;
pub mod rules;

pub use crate::domain::model::{FinancingRequest, FormDraft, ReferenceData, SubmissionOutcome};
pub use crate::domain::ports::{ReferenceSource, SubmissionGateway};
pub use crate::utils::error::Result;
pub use self::controller::{FormController, FormPhase};
