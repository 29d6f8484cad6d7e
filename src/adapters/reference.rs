use crate::domain::model::{Country, ReferenceData};
use crate::domain::ports::ReferenceSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Catalog clients for the two reference services. Each request may fail
/// independently; `load_reference_data` applies the per-axis fallback.
pub struct HttpReferenceSource {
    client: Client,
    countries_endpoint: String,
    currencies_endpoint: String,
}

impl HttpReferenceSource {
    pub fn new(countries_endpoint: &str, currencies_endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            countries_endpoint: countries_endpoint.to_string(),
            currencies_endpoint: currencies_endpoint.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CountryEntry {
    name: CountryName,
    code: String,
}

#[derive(Debug, Deserialize)]
struct CountryName {
    common: String,
}

#[async_trait]
impl ReferenceSource for HttpReferenceSource {
    async fn fetch_countries(&self) -> Result<Vec<Country>> {
        tracing::debug!("fetching country catalog from {}", self.countries_endpoint);
        let entries: Vec<CountryEntry> = self
            .client
            .get(&self.countries_endpoint)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(entries
            .into_iter()
            .map(|entry| Country {
                code: entry.code,
                display_name: entry.name.common,
            })
            .collect())
    }

    async fn fetch_currencies(&self) -> Result<BTreeMap<String, String>> {
        tracing::debug!("fetching currency catalog from {}", self.currencies_endpoint);
        let currencies: BTreeMap<String, String> = self
            .client
            .get(&self.currencies_endpoint)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(currencies)
    }
}

/// Load both catalogs once per session. The two fetches run concurrently
/// and are joined all-settled: one failure never cancels the other. A
/// failed (or empty) axis gets its static fallback plus a warning; loading
/// is over when this future resolves. No retry.
pub async fn load_reference_data<S: ReferenceSource + ?Sized>(source: &S) -> ReferenceData {
    let (countries, currencies) = tokio::join!(source.fetch_countries(), source.fetch_currencies());

    let (mut countries, countries_from_fallback) = match countries {
        Ok(list) if !list.is_empty() => (list, false),
        Ok(_) => {
            tracing::warn!("⚠️ country catalog came back empty, using fallback list");
            (fallback_countries(), true)
        }
        Err(e) => {
            tracing::warn!("⚠️ country catalog unavailable, using fallback list: {}", e);
            (fallback_countries(), true)
        }
    };

    let (currencies, currencies_from_fallback) = match currencies {
        Ok(map) if !map.is_empty() => (map, false),
        Ok(_) => {
            tracing::warn!("⚠️ currency catalog came back empty, using fallback list");
            (fallback_currencies(), true)
        }
        Err(e) => {
            tracing::warn!("⚠️ currency catalog unavailable, using fallback list: {}", e);
            (fallback_currencies(), true)
        }
    };

    // 以顯示名稱排序
    countries.sort_by(|a, b| a.display_name.cmp(&b.display_name));

    tracing::info!(
        "reference data loaded: {} countries, {} currencies",
        countries.len(),
        currencies.len()
    );

    ReferenceData {
        countries,
        currencies,
        countries_from_fallback,
        currencies_from_fallback,
    }
}

fn fallback_countries() -> Vec<Country> {
    [
        ("US", "United States"),
        ("GB", "United Kingdom"),
        ("DE", "Germany"),
        ("FR", "France"),
        ("CA", "Canada"),
    ]
    .into_iter()
    .map(|(code, display_name)| Country {
        code: code.to_string(),
        display_name: display_name.to_string(),
    })
    .collect()
}

fn fallback_currencies() -> BTreeMap<String, String> {
    [
        ("USD", "US Dollar"),
        ("EUR", "Euro"),
        ("GBP", "British Pound"),
        ("JPY", "Japanese Yen"),
        ("CAD", "Canadian Dollar"),
    ]
    .into_iter()
    .map(|(code, name)| (code.to_string(), name.to_string()))
    .collect()
}
