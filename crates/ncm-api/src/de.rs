// Lenient field deserializers.
//
// NCM is inconsistent about JSON types across resources and firmware:
// ids arrive as strings or numbers, counters as integers, floats, or null.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Str(String),
    Int(u64),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Int(u64),
    Float(f64),
}

/// `"123"`, `123`, or `null` → `Option<String>`.
pub(crate) fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Str(s) => s,
        RawId::Int(n) => n.to_string(),
    }))
}

/// Non-negative integer or float (truncated) or `null` → `Option<u64>`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub(crate) fn opt_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<RawCount>::deserialize(deserializer)?.map(|raw| match raw {
            RawCount::Int(n) => n,
            RawCount::Float(f) if f.is_finite() && f > 0.0 => f as u64,
            RawCount::Float(_) => 0,
        }),
    )
}
