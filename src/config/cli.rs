use crate::config::RequestEndpoints;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "finreq")]
#[command(about = "Validate and submit financing requests")]
pub struct CliConfig {
    /// TOML file holding the financing request fields
    #[arg(long)]
    pub request: String,

    #[arg(long, default_value = "https://reference.example.com/countries")]
    pub countries_endpoint: String,

    #[arg(long, default_value = "https://reference.example.com/currencies")]
    pub currencies_endpoint: String,

    #[arg(long, default_value = "https://submissions.example.com/financing-requests")]
    pub submit_endpoint: String,

    #[arg(long, help = "Validate only, skip the submission call")]
    pub dry_run: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl RequestEndpoints for CliConfig {
    fn countries_endpoint(&self) -> &str {
        &self.countries_endpoint
    }

    fn currencies_endpoint(&self) -> &str {
        &self.currencies_endpoint
    }

    fn submit_endpoint(&self) -> &str {
        &self.submit_endpoint
    }
}
