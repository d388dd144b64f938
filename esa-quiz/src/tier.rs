//! Popularity tiers and the news-volume classifier

use serde::{Deserialize, Serialize};
use std::fmt;

/// News volume at or above which a figure is `Elite`
pub const ELITE_MIN_NEWS: u32 = 6;
/// News volume at or above which a figure is `Aspiring`
pub const ASPIRING_MIN_NEWS: u32 = 3;
/// News volume at or above which a figure is `Casual`
pub const CASUAL_MIN_NEWS: u32 = 1;

/// Ordinal popularity tier
///
/// Variants are declared lowest first so the derived `Ord` gives
/// `Elite > Aspiring > Casual > Minimalist`. The order is used for grouping
/// only; tiers carry no numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Minimalist,
    Casual,
    Aspiring,
    Elite,
}

impl Tier {
    /// Presentation order: highest tier first
    pub const PRIORITY: [Tier; 4] = [Tier::Elite, Tier::Aspiring, Tier::Casual, Tier::Minimalist];

    /// Classify a figure by how many news items mention it
    pub fn classify(news_volume: u32) -> Tier {
        if news_volume >= ELITE_MIN_NEWS {
            Tier::Elite
        } else if news_volume >= ASPIRING_MIN_NEWS {
            Tier::Aspiring
        } else if news_volume >= CASUAL_MIN_NEWS {
            Tier::Casual
        } else {
            Tier::Minimalist
        }
    }

    /// Position in [`Tier::PRIORITY`]
    pub fn priority_index(self) -> usize {
        match self {
            Tier::Elite => 0,
            Tier::Aspiring => 1,
            Tier::Casual => 2,
            Tier::Minimalist => 3,
        }
    }

    /// Machine name, e.g. `"elite"`
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Elite => "elite",
            Tier::Aspiring => "aspiring",
            Tier::Casual => "casual",
            Tier::Minimalist => "minimalist",
        }
    }

    /// User-facing label returned by the scoring API
    pub fn display_label(self) -> &'static str {
        match self {
            Tier::Elite => "Social Elite",
            Tier::Aspiring => "Aspiring Sophisticate",
            Tier::Casual => "Casual Consumer",
            Tier::Minimalist => "Practical Minimalist",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
