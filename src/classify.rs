//! Severity classification for the US air quality index
//!
//! Maps an AQI value to one of four severity tiers and picks the tier's
//! tmux colors from a resolved [`Palette`].

use std::fmt;

/// Severity tiers, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Good,
    Moderate,
    Unhealthy,
    Hazardous,
}

impl Tier {
    /// All tiers in ascending severity
    pub const ALL: [Tier; 4] = [Tier::Good, Tier::Moderate, Tier::Unhealthy, Tier::Hazardous];

    /// Map a US AQI value to its tier
    ///
    /// Total over all integers. Each boundary belongs to the lower tier:
    /// - ..=50: Good (zero and negative values included)
    /// - 51..=100: Moderate
    /// - 101..=150: Unhealthy
    /// - 151..: Hazardous
    pub fn from_aqi(aqi: i64) -> Tier {
        match aqi {
            i64::MIN..=50 => Tier::Good,
            51..=100 => Tier::Moderate,
            101..=150 => Tier::Unhealthy,
            151..=i64::MAX => Tier::Hazardous,
        }
    }

    /// Key used for this tier in the config file
    pub fn name(&self) -> &'static str {
        match self {
            Tier::Good => "good",
            Tier::Moderate => "moderate",
            Tier::Unhealthy => "unhealthy",
            Tier::Hazardous => "hazardous",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Foreground and background tmux color names for one tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRule {
    pub fg: String,
    pub bg: String,
}

impl ColorRule {
    pub fn new(fg: impl Into<String>, bg: impl Into<String>) -> Self {
        Self {
            fg: fg.into(),
            bg: bg.into(),
        }
    }
}

/// Fully resolved colors for all four tiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub good: ColorRule,
    pub moderate: ColorRule,
    pub unhealthy: ColorRule,
    pub hazardous: ColorRule,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            good: ColorRule::new("yellow", "green"),
            moderate: ColorRule::new("black", "yellow"),
            unhealthy: ColorRule::new("brightwhite", "red"),
            hazardous: ColorRule::new("brightwhite", "purple"),
        }
    }
}

impl Palette {
    /// Colors for the given tier
    pub fn rule(&self, tier: Tier) -> &ColorRule {
        match tier {
            Tier::Good => &self.good,
            Tier::Moderate => &self.moderate,
            Tier::Unhealthy => &self.unhealthy,
            Tier::Hazardous => &self.hazardous,
        }
    }
}

/// Pick the colors for an AQI value
pub fn classify(aqi: i64, palette: &Palette) -> &ColorRule {
    palette.rule(Tier::from_aqi(aqi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_belong_to_lower_tier() {
        assert_eq!(Tier::from_aqi(50), Tier::Good);
        assert_eq!(Tier::from_aqi(51), Tier::Moderate);
        assert_eq!(Tier::from_aqi(100), Tier::Moderate);
        assert_eq!(Tier::from_aqi(101), Tier::Unhealthy);
        assert_eq!(Tier::from_aqi(150), Tier::Unhealthy);
        assert_eq!(Tier::from_aqi(151), Tier::Hazardous);
    }

    #[test]
    fn test_zero_and_negative_are_good() {
        assert_eq!(Tier::from_aqi(0), Tier::Good);
        assert_eq!(Tier::from_aqi(-1), Tier::Good);
        assert_eq!(Tier::from_aqi(i64::MIN), Tier::Good);
    }

    #[test]
    fn test_extreme_values_are_hazardous() {
        assert_eq!(Tier::from_aqi(500), Tier::Hazardous);
        assert_eq!(Tier::from_aqi(i64::MAX), Tier::Hazardous);
    }

    #[test]
    fn test_tiers_partition_the_line_in_order() {
        // Walking upward, the tier never decreases and changes exactly at the thresholds
        let mut previous = Tier::from_aqi(-200);
        let mut changes = Vec::new();
        for aqi in -199..=400 {
            let tier = Tier::from_aqi(aqi);
            assert!(tier >= previous, "tier decreased at {aqi}");
            if tier != previous {
                changes.push((aqi, tier));
            }
            previous = tier;
        }

        assert_eq!(
            changes,
            vec![
                (51, Tier::Moderate),
                (101, Tier::Unhealthy),
                (151, Tier::Hazardous),
            ]
        );
    }

    #[test]
    fn test_classify_picks_palette_entry() {
        let palette = Palette::default();

        assert_eq!(classify(42, &palette), &palette.good);
        assert_eq!(classify(75, &palette), &palette.moderate);
        assert_eq!(classify(120, &palette), &palette.unhealthy);
        assert_eq!(classify(300, &palette), &palette.hazardous);
    }

    #[test]
    fn test_classify_does_not_modify_palette() {
        let palette = Palette::default();
        let before = palette.clone();

        for tier in Tier::ALL {
            let _ = palette.rule(tier);
        }
        let _ = classify(151, &palette);

        assert_eq!(palette, before);
    }

    #[test]
    fn test_default_tiers_are_distinguishable() {
        let palette = Palette::default();
        for (i, a) in Tier::ALL.iter().enumerate() {
            for b in &Tier::ALL[i + 1..] {
                assert_ne!(palette.rule(*a), palette.rule(*b), "{a} and {b} share colors");
            }
        }
    }

    #[test]
    fn test_tier_names() {
        let names: Vec<_> = Tier::ALL.iter().map(Tier::to_string).collect();
        assert_eq!(names, ["good", "moderate", "unhealthy", "hazardous"]);
    }
}
