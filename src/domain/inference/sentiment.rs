//! Sentiment labels and predictions.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Confidence, ValidationError};

/// Polarity assigned to a text by the sentiment model.
///
/// Serialized with the model's short codes (`NEG`, `NEU`, `POS`). Parsing
/// is case-insensitive and also accepts the long English names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    /// All labels, in model output order.
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
        SentimentLabel::Positive,
    ];

    /// Short code used on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            SentimentLabel::Negative => "NEG",
            SentimentLabel::Neutral => "NEU",
            SentimentLabel::Positive => "POS",
        }
    }

    /// Human-readable term shown to chat users.
    pub fn spanish_term(&self) -> &'static str {
        match self {
            SentimentLabel::Negative => "negativo",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Positive => "positivo",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SentimentLabel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "neg" | "negative" => Ok(SentimentLabel::Negative),
            "neu" | "neutral" => Ok(SentimentLabel::Neutral),
            "pos" | "positive" => Ok(SentimentLabel::Positive),
            _ => Err(ValidationError::invalid_format(
                "classification",
                format!("unknown sentiment label '{}'", s),
            )),
        }
    }
}

impl Serialize for SentimentLabel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for SentimentLabel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Output of one sentiment model call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentPrediction {
    pub label: SentimentLabel,
    pub confidence: Confidence,
}

impl SentimentPrediction {
    pub fn new(label: SentimentLabel, confidence: Confidence) -> Self {
        Self { label, confidence }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_codes_and_long_names() {
        assert_eq!("NEG".parse::<SentimentLabel>().unwrap(), SentimentLabel::Negative);
        assert_eq!("neu".parse::<SentimentLabel>().unwrap(), SentimentLabel::Neutral);
        assert_eq!("Positive".parse::<SentimentLabel>().unwrap(), SentimentLabel::Positive);
    }

    #[test]
    fn rejects_unknown_label() {
        let err = "MIXED".parse::<SentimentLabel>().unwrap_err();
        assert_eq!(err.field(), "classification");
    }

    #[test]
    fn translates_to_spanish_terms() {
        assert_eq!(SentimentLabel::Negative.spanish_term(), "negativo");
        assert_eq!(SentimentLabel::Neutral.spanish_term(), "neutral");
        assert_eq!(SentimentLabel::Positive.spanish_term(), "positivo");
    }

    #[test]
    fn serializes_to_short_code() {
        assert_eq!(serde_json::to_string(&SentimentLabel::Positive).unwrap(), "\"POS\"");
        let label: SentimentLabel = serde_json::from_str("\"negative\"").unwrap();
        assert_eq!(label, SentimentLabel::Negative);
    }
}
