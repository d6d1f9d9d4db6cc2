use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::sync::OnceLock;

/// Unsigned decimal: digits, at most one `.`, more digits. Every part is
/// optional, so the empty string and a lone `.` both pass. ASCII digits only.
const PRICE_PATTERN: &str = r"^[0-9]*\.?[0-9]*$";

fn price_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(PRICE_PATTERN).expect("price pattern is a valid regex"))
}

/// Whether `value` may replace the current contents of the price field.
pub fn is_valid_price_input(value: &str) -> bool {
    value.is_empty() || price_regex().is_match(value)
}

/// Servers are not consistent about price types; keep whatever arrives as text.
pub(crate) fn deserialize_price<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawPrice::deserialize(deserializer)? {
        RawPrice::Text(text) => text,
        RawPrice::Number(number) => number.to_string(),
    })
}
