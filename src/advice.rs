//! Threshold rules that turn temperature and rain chance into one advisory.

use serde::Serialize;

use crate::constants::{MILD_COLD_C, PLEASANT_C, SEVERE_HEAT_C, UMBRELLA_RAIN_PCT};
use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advice {
    Umbrella,
    SevereHeat,
    Pleasant,
    MildCold,
    ColdWind,
}

/// First matching rule wins; rain is checked before any temperature band.
pub fn advise(temperature_c: f64, rain_chance_pct: f64) -> Advice {
    if rain_chance_pct >= UMBRELLA_RAIN_PCT {
        Advice::Umbrella
    } else if temperature_c >= SEVERE_HEAT_C {
        Advice::SevereHeat
    } else if temperature_c >= PLEASANT_C {
        Advice::Pleasant
    } else if temperature_c >= MILD_COLD_C {
        Advice::MildCold
    } else {
        Advice::ColdWind
    }
}

impl Advice {
    pub fn message(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Umbrella, Locale::Hi) => "🌧️ कृपया छाता साथ रखें, बारिश की अच्छी संभावना है।",
            (Self::SevereHeat, Locale::Hi) => {
                "🔥 तेज़ गर्मी है, हल्के कपड़े पहनें और पर्याप्त जल पीते रहें।"
            }
            (Self::Pleasant, Locale::Hi) => "☀️ मौसम सुहावना है, खुले में घूमने का आनंद लें।",
            (Self::MildCold, Locale::Hi) => "🍂 हल्की ठंड है, शायद हल्की जैकेट काम आएगी।",
            (Self::ColdWind, Locale::Hi) => "❄️ ठंडी हवा चल रही है, गरम कपड़े पहनना बेहतर रहेगा।",
            (Self::Umbrella, Locale::En) => "🌧️ Carry an umbrella, rain is quite likely.",
            (Self::SevereHeat, Locale::En) => {
                "🔥 Severe heat. Wear light clothes and keep drinking water."
            }
            (Self::Pleasant, Locale::En) => "☀️ Pleasant weather, enjoy some time outdoors.",
            (Self::MildCold, Locale::En) => "🍂 A little chilly, a light jacket may help.",
            (Self::ColdWind, Locale::En) => "❄️ Cold wind is blowing, dress warmly.",
        }
    }
}
