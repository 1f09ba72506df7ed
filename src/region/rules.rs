use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Label returned when no rule matches a sensor name
pub const UNKNOWN_REGION: &str = "Unknown Region";

pub const FRONTAL_LOBE: &str = "Frontal Lobe";
pub const PARIETAL_LOBE: &str = "Parietal Lobe";
pub const PARIETAL_OCCIPITAL_LOBE: &str = "Parietal-Occipital Lobe";
pub const CENTRAL_SULCUS: &str = "Central Sulcus";
pub const TEMPORAL_LOBE: &str = "Temporal Lobe";
pub const TEMPORAL_PARIETAL_LOBE: &str = "Temporal-Parietal Lobe";
pub const OCCIPITAL_LOBE: &str = "Occipital Lobe";
pub const FRONTAL_TEMPORAL_LOBE: &str = "Frontal-Temporal Lobe";
pub const SENSORY_MOTOR_CORTEX: &str = "Sensory-Motor Cortex";
pub const MOTOR_CORTEX: &str = "Motor Cortex";

/// Standard rule order. First match wins.
///
/// The two-letter prefixes come first because each shadows a one-letter
/// ancestor ("PO1" must not land in "P"). The "F"/"AF" rule follows, then the
/// generic table, whose two-letter entries can no longer fire.
const STANDARD_RULES: &[(&[&str], &str)] = &[
    (&["PO"], PARIETAL_OCCIPITAL_LOBE),
    (&["TP"], TEMPORAL_PARIETAL_LOBE),
    (&["FT"], FRONTAL_TEMPORAL_LOBE),
    (&["CP"], SENSORY_MOTOR_CORTEX),
    (&["FC"], MOTOR_CORTEX),
    (&["F", "AF"], FRONTAL_LOBE),
    (&["CP"], SENSORY_MOTOR_CORTEX),
    (&["P"], PARIETAL_LOBE),
    (&["PO"], PARIETAL_OCCIPITAL_LOBE),
    (&["C"], CENTRAL_SULCUS),
    (&["T"], TEMPORAL_LOBE),
    (&["TP"], TEMPORAL_PARIETAL_LOBE),
    (&["F"], FRONTAL_LOBE),
    (&["O"], OCCIPITAL_LOBE),
    (&["FC"], MOTOR_CORTEX),
    (&["FT"], FRONTAL_TEMPORAL_LOBE),
];

/// Frontal-first order: "F"/"AF" is checked before every priority prefix,
/// so all FC and FT channels land in the frontal lobe.
const FRONTAL_FIRST_RULES: &[(&[&str], &str)] = &[
    (&["F", "AF"], FRONTAL_LOBE),
    (&["PO"], PARIETAL_OCCIPITAL_LOBE),
    (&["TP"], TEMPORAL_PARIETAL_LOBE),
    (&["FT"], FRONTAL_TEMPORAL_LOBE),
    (&["CP"], SENSORY_MOTOR_CORTEX),
    (&["FC"], MOTOR_CORTEX),
    (&["CP"], SENSORY_MOTOR_CORTEX),
    (&["P"], PARIETAL_LOBE),
    (&["PO"], PARIETAL_OCCIPITAL_LOBE),
    (&["C"], CENTRAL_SULCUS),
    (&["T"], TEMPORAL_LOBE),
    (&["TP"], TEMPORAL_PARIETAL_LOBE),
    (&["F"], FRONTAL_LOBE),
    (&["O"], OCCIPITAL_LOBE),
    (&["FC"], MOTOR_CORTEX),
    (&["FT"], FRONTAL_TEMPORAL_LOBE),
];

/// Flat table from the first version of the analysis: no priority rules and
/// no occipital entry, so "PO1" resolves to the parietal lobe.
const LEGACY_RULES: &[(&[&str], &str)] = &[
    (&["CP"], SENSORY_MOTOR_CORTEX),
    (&["P"], PARIETAL_LOBE),
    (&["PO"], PARIETAL_OCCIPITAL_LOBE),
    (&["C"], CENTRAL_SULCUS),
    (&["T"], TEMPORAL_LOBE),
    (&["TP"], TEMPORAL_PARIETAL_LOBE),
    (&["F"], FRONTAL_LOBE),
    (&["FC"], MOTOR_CORTEX),
    (&["FT"], FRONTAL_TEMPORAL_LOBE),
];

fn first_match(rules: &[(&[&str], &'static str)], sensor_name: &str) -> &'static str {
    rules
        .iter()
        .find(|(prefixes, _)| prefixes.iter().any(|p| sensor_name.starts_with(p)))
        .map(|(_, region)| *region)
        .unwrap_or(UNKNOWN_REGION)
}

/// Classify a sensor name with the standard rule table
///
/// ```
/// use eegcompare::region::classify_region;
///
/// assert_eq!(classify_region("PO1"), "Parietal-Occipital Lobe");
/// assert_eq!(classify_region("Z9"), "Unknown Region");
/// ```
pub fn classify_region(sensor_name: &str) -> &'static str {
    first_match(STANDARD_RULES, sensor_name)
}

/// Built-in rule tables, selectable by name from the config or the CLI
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum RegionPreset {
    /// Priority prefixes before "F"/"AF" (FC5 is Motor Cortex)
    #[default]
    Standard,
    /// "F"/"AF" before the priority prefixes (FC5 is Frontal Lobe)
    FrontalFirst,
    /// Standard without the "O" rule
    WithoutOccipital,
    /// Flat table, no priority rules, no "O" rule
    Legacy,
}

impl RegionPreset {
    pub fn rules(self) -> RegionRules {
        match self {
            RegionPreset::Standard => RegionRules::standard(),
            RegionPreset::FrontalFirst => RegionRules::frontal_first(),
            RegionPreset::WithoutOccipital => RegionRules::without_occipital(),
            RegionPreset::Legacy => RegionRules::legacy(),
        }
    }
}

/// One entry of a region rule table
///
/// # Example TOML
/// ```toml
/// [[region_rule]]
/// prefixes = ["F", "AF"]
/// region = "Frontal Lobe"
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RegionRule {
    /// A sensor name matches when it starts with any of these
    pub prefixes: Vec<String>,

    /// Region label assigned on match
    pub region: String,
}

impl RegionRule {
    pub fn new(prefixes: &[&str], region: &str) -> Self {
        Self {
            prefixes: prefixes.iter().map(|p| p.to_string()).collect(),
            region: region.to_string(),
        }
    }

    pub fn matches(&self, sensor_name: &str) -> bool {
        self.prefixes.iter().any(|p| sensor_name.starts_with(p.as_str()))
    }
}

/// Ordered, immutable sensor-name → brain-region rule table
///
/// Rules are evaluated top to bottom and the first match wins, so a longer
/// prefix must sit above every shorter prefix it would otherwise lose to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRules {
    rules: Vec<RegionRule>,
}

impl Default for RegionRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl RegionRules {
    fn from_static(table: &[(&[&str], &str)]) -> Self {
        Self {
            rules: table
                .iter()
                .map(|(prefixes, region)| RegionRule::new(prefixes, region))
                .collect(),
        }
    }

    /// Standard table, including the occipital rule
    pub fn standard() -> Self {
        Self::from_static(STANDARD_RULES)
    }

    /// "F"/"AF" before the priority prefixes; FC5 and FT7 are frontal
    pub fn frontal_first() -> Self {
        Self::from_static(FRONTAL_FIRST_RULES)
    }

    /// Standard table with the "O" → Occipital Lobe rule removed
    pub fn without_occipital() -> Self {
        let mut rules = Self::standard();
        rules.rules.retain(|rule| rule.region != OCCIPITAL_LOBE);
        rules
    }

    /// Flat table without priority rules or the occipital entry
    pub fn legacy() -> Self {
        Self::from_static(LEGACY_RULES)
    }

    /// Build a table from explicit rules, keeping their order
    ///
    /// # Errors
    /// Rejects empty tables, rules without prefixes, empty prefixes (they
    /// would match every sensor) and rules that assign the unknown label.
    pub fn from_rules(rules: Vec<RegionRule>) -> Result<Self> {
        if rules.is_empty() {
            anyhow::bail!("Region rule table is empty");
        }

        for (i, rule) in rules.iter().enumerate() {
            if rule.prefixes.is_empty() {
                anyhow::bail!("Region rule {} ('{}') has no prefixes", i, rule.region);
            }
            if rule.prefixes.iter().any(|p| p.is_empty()) {
                anyhow::bail!("Region rule {} ('{}') has an empty prefix", i, rule.region);
            }
            if rule.region.is_empty() || rule.region == UNKNOWN_REGION {
                anyhow::bail!("Region rule {} has an invalid region label '{}'", i, rule.region);
            }
        }

        Ok(Self { rules })
    }

    /// Parse a rule table from TOML text (`[[region_rule]]` entries)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct RuleFile {
            region_rule: Vec<RegionRule>,
        }

        let file: RuleFile =
            toml::from_str(content).context("Failed to parse TOML region rules")?;
        Self::from_rules(file.region_rule)
    }

    /// Load a rule table from a TOML file
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read region rules file: {}", path.as_ref().display())
        })?;
        Self::from_toml_str(&content)
    }

    pub fn rules(&self) -> &[RegionRule] {
        &self.rules
    }

    /// Region for a sensor name, or [`UNKNOWN_REGION`]
    pub fn classify(&self, sensor_name: &str) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.matches(sensor_name))
            .map(|rule| rule.region.as_str())
            .unwrap_or(UNKNOWN_REGION)
    }

    /// Whether a sensor name resolves to a known region
    pub fn is_known(&self, sensor_name: &str) -> bool {
        self.classify(sensor_name) != UNKNOWN_REGION
    }

    /// Distinct region labels in rule order
    pub fn regions(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for rule in &self.rules {
            if !seen.contains(&rule.region.as_str()) {
                seen.push(rule.region.as_str());
            }
        }
        seen
    }
}
