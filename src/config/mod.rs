#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::domain::model::FormDraft;
use crate::utils::error::Result;
use crate::utils::validation::validate_url;

/// The three remote collaborators, overridable from the outside.
pub trait RequestEndpoints {
    fn countries_endpoint(&self) -> &str;
    fn currencies_endpoint(&self) -> &str;
    fn submit_endpoint(&self) -> &str;
}

pub fn validate_endpoints<E: RequestEndpoints>(endpoints: &E) -> Result<()> {
    validate_url("countries_endpoint", endpoints.countries_endpoint())?;
    validate_url("currencies_endpoint", endpoints.currencies_endpoint())?;
    validate_url("submit_endpoint", endpoints.submit_endpoint())?;
    Ok(())
}

/// Read a draft from a TOML request file. Missing keys default to empty
/// strings, which validation then reports as `Required`.
pub fn load_draft(path: &str) -> Result<FormDraft> {
    let content = std::fs::read_to_string(path)?;
    let draft: FormDraft = toml::from_str(&content)?;
    Ok(draft)
}
