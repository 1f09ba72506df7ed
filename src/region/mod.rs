// Sensor-name → brain-region classification
//
// EEG sensor names follow the 10-20 layout, where the leading letters name
// the area under the electrode ("F" frontal, "PO" parieto-occipital, ...).
// Several two-letter prefixes extend a one-letter prefix that maps somewhere
// else, so classification is an ordered first-match walk over a rule table
// rather than a lookup in an unordered map.
//
// The table is an immutable value. The standard one is built in; others can
// be loaded from TOML, following the same `[[...]]` layout as the analysis
// configuration.

mod annotate;
mod rules;

pub use annotate::{annotate_regions, REGION_COLUMN};
pub use rules::{
    classify_region, RegionPreset, RegionRule, RegionRules, CENTRAL_SULCUS, FRONTAL_LOBE,
    FRONTAL_TEMPORAL_LOBE, MOTOR_CORTEX, OCCIPITAL_LOBE, PARIETAL_LOBE,
    PARIETAL_OCCIPITAL_LOBE, SENSORY_MOTOR_CORTEX, TEMPORAL_LOBE, TEMPORAL_PARIETAL_LOBE,
    UNKNOWN_REGION,
};

#[cfg(test)]
mod tests;
