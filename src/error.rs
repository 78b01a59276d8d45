//! Classified lookup failures.

use crate::locale::Locale;
use std::fmt;
use thiserror::Error;

/// Which outbound hop a transport failure happened on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStage {
    Geocode,
    Forecast,
}

impl fmt::Display for LookupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geocode => f.write_str("geocoding"),
            Self::Forecast => f.write_str("forecast"),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum LookupError {
    #[error("City name must not be blank")]
    Validation,

    #[error("No geocoding match for '{0}'")]
    NotFound(String),

    #[error("{stage} request failed: {message}")]
    Transport { stage: LookupStage, message: String },

    #[error("Lookup cancelled")]
    Cancelled,
}

impl LookupError {
    pub(crate) fn transport(stage: LookupStage, err: impl fmt::Display) -> Self {
        Self::Transport {
            stage,
            message: err.to_string(),
        }
    }

    /// Stable machine-readable code for the failure class.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound(_) => "not_found",
            Self::Transport { .. } => "transport",
            Self::Cancelled => "cancelled",
        }
    }

    /// User-facing message. Both transport stages share one text.
    pub fn user_message(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Validation, Locale::Hi) => "कृपया शहर का नाम दर्ज करें।",
            (Self::Validation, Locale::En) => "Please enter a city name.",
            (Self::NotFound(_), Locale::Hi) => {
                "क्षमा करें, शहर नहीं मिला। कृपया सही नाम दर्ज करें।"
            }
            (Self::NotFound(_), Locale::En) => "Sorry, city not found. Please check the spelling.",
            (Self::Transport { .. }, Locale::Hi) => {
                "मौसम जानकारी प्राप्त करने में समस्या हुई। पुनः प्रयास करें।"
            }
            (Self::Transport { .. }, Locale::En) => {
                "There was a problem fetching the weather. Please try again."
            }
            (Self::Cancelled, Locale::Hi) => "अनुरोध रद्द कर दिया गया।",
            (Self::Cancelled, Locale::En) => "The lookup was cancelled.",
        }
    }
}
