pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::reference::{load_reference_data, HttpReferenceSource};
pub use adapters::submission::HttpSubmissionClient;
pub use crate::core::controller::{FormController, FormPhase};
pub use domain::model::{
    Country, FinancingRequest, FormDraft, ReferenceData, SubmissionOutcome, SubmissionPayload,
};
pub use domain::ports::{ReferenceSource, SubmissionGateway};
pub use utils::error::{FormError, Result, SubmissionError};
