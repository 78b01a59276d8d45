//! Display languages and their fixed string tables.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language used for advisories, error messages and labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Hindi
    #[default]
    Hi,
    /// English
    En,
}

/// Labels shown next to each reported value
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    pub temperature: &'static str,
    pub humidity: &'static str,
    pub precipitation: &'static str,
    pub rain_chance: &'static str,
    pub idle: &'static str,
    pub loading: &'static str,
    pub attribution: &'static str,
}

impl Locale {
    /// BCP 47 primary language tag
    pub fn code(self) -> &'static str {
        match self {
            Self::Hi => "hi",
            Self::En => "en",
        }
    }

    pub fn labels(self) -> Labels {
        match self {
            Self::Hi => Labels {
                temperature: "तापमान",
                humidity: "आर्द्रता",
                precipitation: "वर्षा",
                rain_chance: "बारिश की संभावना",
                idle: "कृपया शहर चुनें और मौसम देखें।",
                loading: "मौसम जानकारी ला रहे हैं...",
                attribution: "मौसम डेटा Open-Meteo द्वारा प्रदत्त।",
            },
            Self::En => Labels {
                temperature: "Temperature",
                humidity: "Humidity",
                precipitation: "Precipitation",
                rain_chance: "Chance of rain",
                idle: "Choose a city to see the weather.",
                loading: "Fetching weather...",
                attribution: "Weather data provided by Open-Meteo.",
            },
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    /// Accepts a bare tag or a region-qualified one ("hi", "en-US", "hi_IN").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match primary.as_str() {
            "hi" => Ok(Self::Hi),
            "en" => Ok(Self::En),
            _ => Err(format!("Unsupported locale '{}'. Must be one of: hi, en", s)),
        }
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}
