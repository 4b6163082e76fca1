//! Lenient numeric deserializers for spreadsheet-exported game data
//!
//! The source data writes numbers as JSON numbers, as numeric strings, or as
//! `""` for "nothing". All three are accepted; blanks and nulls become 0.

use serde::de::Error;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Number(f64),
    Text(String),
}

fn resolve<E: Error>(value: Option<Loose>) -> Result<f64, E> {
    match value {
        None => Ok(0.0),
        Some(Loose::Number(n)) => Ok(n),
        Some(Loose::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(0.0);
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| E::custom(format!("expected a number, found {:?}", text)))
        }
    }
}

/// Deserialize a float, treating blanks as 0
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Loose>::deserialize(deserializer)?;
    let n = resolve(value)?;
    if n.is_finite() {
        Ok(n)
    } else {
        Ok(0.0)
    }
}

/// Deserialize an integer, rounding fractional input
pub fn integer<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let n = number(deserializer)?;
    Ok(n.round() as i32)
}

/// Deserialize an optional positive float; blanks and zero become `None`
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let n = number(deserializer)?;
    Ok(if n > 0.0 { Some(n) } else { None })
}
