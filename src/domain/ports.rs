use crate::domain::model::{Country, SubmissionOutcome, SubmissionPayload};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn fetch_countries(&self) -> Result<Vec<Country>>;
    async fn fetch_currencies(&self) -> Result<BTreeMap<String, String>>;
}

#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> SubmissionOutcome;
}
