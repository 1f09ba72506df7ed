//! eegcompare - group comparison of EEG sensor recordings
//!
//! Loads per-trial CSV recordings, cleans and concatenates them, then
//! compares two subject groups sensor by sensor: mean differences, Welch
//! t-tests grouped by brain region, per-condition statistics and
//! region-level means.

pub mod analysis;
pub mod cli;
pub mod csv_output;
pub mod ingest;
pub mod json_output;
pub mod region;
pub mod report;
pub mod table;
