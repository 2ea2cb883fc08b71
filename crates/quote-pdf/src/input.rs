use crate::money::Money;
use crate::types::{LineItem, QuoteError, Result};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Raw quote fields as collected by a form or posted to the backend.
///
/// Everything is optional here; [`assemble`](crate::assemble) decides what
/// is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteInput {
    #[serde(rename = "cliente", alias = "client", default)]
    pub client: Option<String>,
    #[serde(
        rename = "presupuesto",
        alias = "budget_label",
        default,
        deserialize_with = "budget_label"
    )]
    pub budget_label: Option<String>,
    #[serde(rename = "fecha", alias = "date", default, deserialize_with = "quote_date")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "descripcion", alias = "description", default)]
    pub description: Option<String>,
    #[serde(rename = "manoDeObra", alias = "labor_cost", default)]
    pub labor_cost: Option<Money>,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

/// Load a quote from a JSON file shaped like the backend payload
pub async fn load_quote_input(path: impl AsRef<Path>) -> Result<QuoteInput> {
    let path = path.as_ref().to_owned();

    let bytes = tokio::fs::read(&path).await?;

    let input = tokio::task::spawn_blocking(move || {
        serde_json::from_slice::<QuoteInput>(&bytes).map_err(QuoteError::from)
    })
    .await??;

    log::debug!(
        "Loaded quote input from {} ({} items)",
        path.display(),
        input.items.len()
    );
    Ok(input)
}

/// Parse a quote date, accepting a plain calendar date or an RFC 3339
/// timestamp such as `2024-05-01T00:00:00.000Z`.
pub fn parse_quote_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Int(i64),
    Float(f64),
    Text(String),
}

fn budget_label<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawLabel>::deserialize(deserializer)?;
    Ok(raw.map(|label| match label {
        RawLabel::Int(i) => i.to_string(),
        RawLabel::Float(f) => f.to_string(),
        RawLabel::Text(s) => s,
    }))
}

fn quote_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_quote_date(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {s}"))),
    }
}
