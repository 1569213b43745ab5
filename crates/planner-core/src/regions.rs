use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::models::parse_variant;
use crate::notifications::Notice;

// ── GermanRegion ──────────────────────────────────────────────────────────────

/// A German federal state that can be targeted by a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GermanRegion {
    #[serde(rename = "baden-wurttemberg")]
    BadenWurttemberg,
    #[serde(rename = "bavaria")]
    Bavaria,
    #[serde(rename = "berlin")]
    Berlin,
    #[serde(rename = "brandenburg")]
    Brandenburg,
    #[serde(rename = "bremen")]
    Bremen,
    #[serde(rename = "hamburg")]
    Hamburg,
    #[serde(rename = "hesse")]
    Hesse,
    #[serde(rename = "lower saxony")]
    LowerSaxony,
    #[serde(rename = "mecklenburg-vorpommern")]
    MecklenburgVorpommern,
    #[serde(rename = "north rhine-westphalia")]
    NorthRhineWestphalia,
    #[serde(rename = "rhineland-palatinate")]
    RhinelandPalatinate,
    #[serde(rename = "saarland")]
    Saarland,
    #[serde(rename = "saxony")]
    Saxony,
    #[serde(rename = "saxony-anhalt")]
    SaxonyAnhalt,
    #[serde(rename = "schleswig-holstein")]
    SchleswigHolstein,
    #[serde(rename = "thuringia")]
    Thuringia,
}

/// Display data for one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionInfo {
    pub region: GermanRegion,
    pub name: &'static str,
    pub population: u64,
}

/// All sixteen states with display name and population.
pub const REGIONS: [RegionInfo; 16] = [
    RegionInfo { region: GermanRegion::BadenWurttemberg, name: "Baden-Württemberg", population: 11_100_000 },
    RegionInfo { region: GermanRegion::Bavaria, name: "Bavaria", population: 13_124_000 },
    RegionInfo { region: GermanRegion::Berlin, name: "Berlin", population: 3_669_000 },
    RegionInfo { region: GermanRegion::Brandenburg, name: "Brandenburg", population: 2_531_000 },
    RegionInfo { region: GermanRegion::Bremen, name: "Bremen", population: 680_000 },
    RegionInfo { region: GermanRegion::Hamburg, name: "Hamburg", population: 1_851_000 },
    RegionInfo { region: GermanRegion::Hesse, name: "Hesse", population: 6_290_000 },
    RegionInfo { region: GermanRegion::LowerSaxony, name: "Lower Saxony", population: 8_000_000 },
    RegionInfo { region: GermanRegion::MecklenburgVorpommern, name: "Mecklenburg-Vorpommern", population: 1_610_000 },
    RegionInfo { region: GermanRegion::NorthRhineWestphalia, name: "North Rhine-Westphalia", population: 17_930_000 },
    RegionInfo { region: GermanRegion::RhinelandPalatinate, name: "Rhineland-Palatinate", population: 4_094_000 },
    RegionInfo { region: GermanRegion::Saarland, name: "Saarland", population: 983_000 },
    RegionInfo { region: GermanRegion::Saxony, name: "Saxony", population: 4_056_000 },
    RegionInfo { region: GermanRegion::SaxonyAnhalt, name: "Saxony-Anhalt", population: 2_180_000 },
    RegionInfo { region: GermanRegion::SchleswigHolstein, name: "Schleswig-Holstein", population: 2_910_000 },
    RegionInfo { region: GermanRegion::Thuringia, name: "Thuringia", population: 2_120_000 },
];

impl GermanRegion {
    pub const ALL: [GermanRegion; 16] = [
        GermanRegion::BadenWurttemberg,
        GermanRegion::Bavaria,
        GermanRegion::Berlin,
        GermanRegion::Brandenburg,
        GermanRegion::Bremen,
        GermanRegion::Hamburg,
        GermanRegion::Hesse,
        GermanRegion::LowerSaxony,
        GermanRegion::MecklenburgVorpommern,
        GermanRegion::NorthRhineWestphalia,
        GermanRegion::RhinelandPalatinate,
        GermanRegion::Saarland,
        GermanRegion::Saxony,
        GermanRegion::SaxonyAnhalt,
        GermanRegion::SchleswigHolstein,
        GermanRegion::Thuringia,
    ];

    /// Stored identifier (`"north rhine-westphalia"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            GermanRegion::BadenWurttemberg => "baden-wurttemberg",
            GermanRegion::Bavaria => "bavaria",
            GermanRegion::Berlin => "berlin",
            GermanRegion::Brandenburg => "brandenburg",
            GermanRegion::Bremen => "bremen",
            GermanRegion::Hamburg => "hamburg",
            GermanRegion::Hesse => "hesse",
            GermanRegion::LowerSaxony => "lower saxony",
            GermanRegion::MecklenburgVorpommern => "mecklenburg-vorpommern",
            GermanRegion::NorthRhineWestphalia => "north rhine-westphalia",
            GermanRegion::RhinelandPalatinate => "rhineland-palatinate",
            GermanRegion::Saarland => "saarland",
            GermanRegion::Saxony => "saxony",
            GermanRegion::SaxonyAnhalt => "saxony-anhalt",
            GermanRegion::SchleswigHolstein => "schleswig-holstein",
            GermanRegion::Thuringia => "thuringia",
        }
    }

    pub fn info(&self) -> &'static RegionInfo {
        // REGIONS is in ALL order.
        &REGIONS[*self as usize]
    }

    /// Proper display name (`"Baden-Württemberg"`).
    pub fn name(&self) -> &'static str {
        self.info().name
    }

    pub fn population(&self) -> u64 {
        self.info().population
    }
}

impl FromStr for GermanRegion {
    type Err = PlannerError;

    fn from_str(value: &str) -> Result<Self> {
        parse_variant(&Self::ALL, Self::as_str, "region", value)
    }
}

impl fmt::Display for GermanRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

/// Add `region` to `selected` if absent, remove it otherwise, and describe
/// the change.
pub fn toggle_region(selected: &mut Vec<GermanRegion>, region: GermanRegion) -> Notice {
    if let Some(pos) = selected.iter().position(|r| *r == region) {
        selected.remove(pos);
        Notice::info(format!("Removed {} from selection", region.name()))
    } else {
        selected.push(region);
        Notice::success(format!("Added {} to selection", region.name()))
    }
}

/// How many people a set of states covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReachSummary {
    pub states: usize,
    pub population: u64,
}

impl ReachSummary {
    pub fn of(regions: &[GermanRegion]) -> Self {
        Self {
            states: regions.len(),
            population: regions.iter().map(GermanRegion::population).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_table_matches_enum_order() {
        for (i, region) in GermanRegion::ALL.iter().enumerate() {
            assert_eq!(REGIONS[i].region, *region);
        }
    }

    #[test]
    fn test_region_names_and_population() {
        assert_eq!(GermanRegion::BadenWurttemberg.name(), "Baden-Württemberg");
        assert_eq!(GermanRegion::NorthRhineWestphalia.population(), 17_930_000);
        assert_eq!(GermanRegion::Bremen.to_string(), "Bremen");
    }

    #[test]
    fn test_region_parse() {
        assert_eq!(
            "North Rhine-Westphalia".parse::<GermanRegion>().unwrap(),
            GermanRegion::NorthRhineWestphalia
        );
        assert!("tyrol".parse::<GermanRegion>().is_err());
    }

    #[test]
    fn test_region_serde_ids() {
        let json = serde_json::to_string(&GermanRegion::LowerSaxony).unwrap();
        assert_eq!(json, "\"lower saxony\"");
        let r: GermanRegion = serde_json::from_str("\"mecklenburg-vorpommern\"").unwrap();
        assert_eq!(r, GermanRegion::MecklenburgVorpommern);
    }

    #[test]
    fn test_toggle_region_notices() {
        let mut selected = Vec::new();
        let added = toggle_region(&mut selected, GermanRegion::Hesse);
        assert_eq!(added.title, "Added Hesse to selection");
        assert_eq!(selected, vec![GermanRegion::Hesse]);

        let removed = toggle_region(&mut selected, GermanRegion::Hesse);
        assert_eq!(removed.title, "Removed Hesse from selection");
        assert_eq!(removed.level, crate::notifications::NoticeLevel::Info);
        assert!(selected.is_empty());
    }

    #[test]
    fn test_reach_summary() {
        let reach = ReachSummary::of(&[GermanRegion::Berlin, GermanRegion::Hamburg]);
        assert_eq!(reach.states, 2);
        assert_eq!(reach.population, 3_669_000 + 1_851_000);
        assert_eq!(ReachSummary::of(&[]), ReachSummary::default());
    }
}
