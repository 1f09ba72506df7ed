// Integration test utilities
//
// Writes small recordings in the dataset layout into a temp directory

#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub const HEADER: &str = "trial number,sensor position,sample num,sensor value,subject identifier,matching condition,channel,name,time";

/// One CSV row in the dataset column order
pub fn row(trial: u32, position: &str, value: f32, group: &str, condition: &str) -> String {
    format!(
        "{},{},0,{},{},{},0,co2{}0000001,0.0",
        trial, position, value, group, condition, group
    )
}

/// Two recordings, one per group, with a strong effect at FC5 and none at CZ
///
/// X and nd rows carry a large offset but must never be reported.
pub fn write_recordings(dir: &Path) {
    let mut alcoholic = vec![HEADER.to_string()];
    let mut control = vec![HEADER.to_string()];

    for trial in 0..5u32 {
        let jitter = (trial % 3) as f32 * 0.4;
        for condition in ["S1 obj", "S2 match"] {
            alcoholic.push(row(trial, "FC5", 2.0 + jitter, "a", condition));
            control.push(row(trial, "FC5", 12.0 + jitter * 1.5, "c", condition));

            alcoholic.push(row(trial, "CZ", 1.0 + jitter, "a", condition));
            control.push(row(trial, "CZ", 1.1 + jitter, "c", condition));

            alcoholic.push(row(trial, "X", 0.0 + jitter, "a", condition));
            control.push(row(trial, "X", 50.0 + jitter * 2.0, "c", condition));

            alcoholic.push(row(trial, "nd", 0.0 + jitter, "a", condition));
            control.push(row(trial, "nd", 40.0 + jitter * 3.0, "c", condition));
        }
    }

    fs::write(dir.join("Data1.csv"), alcoholic.join("\n") + "\n").unwrap();
    fs::write(dir.join("Data2.csv"), control.join("\n") + "\n").unwrap();
}
