// Statistical primitives for group comparison
//
// - Welch's t-test (unequal variances): statistic and df from aprender's
//   `ttest_ind`, two-sided p-value from the Student t CDF in statrs
// - Mean and variance via trueno::Vector
// - trueno's variance divides by n; sample standard deviation rescales it
//   to ddof = 1

use anyhow::{Context, Result};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};
use trueno::Vector;

/// Outcome of a two-sample Welch t-test between two groups
#[derive(Debug, Clone, Serialize)]
pub struct WelchTest {
    /// t-statistic value
    pub statistic: f32,

    /// Two-tailed p-value
    pub pvalue: f32,

    /// Welch-Satterthwaite degrees of freedom
    pub df: f32,

    pub group1_mean: f32,
    pub group2_mean: f32,
    pub group1_n: usize,
    pub group2_n: usize,
}

impl WelchTest {
    /// Whether the p-value is strictly below `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.pvalue < alpha as f32
    }
}

/// Compare two samples using Welch's independent t-test
///
/// # Errors
/// Fails when either sample has fewer than 2 values, or when the test is
/// undefined for the data (e.g. both samples constant).
///
/// # Example
/// ```
/// use eegcompare::analysis::welch_t_test;
///
/// let alcoholic = vec![10.0, 12.0, 11.0, 13.0, 10.0];
/// let control = vec![25.0, 27.0, 26.0, 28.0, 25.0];
///
/// let result = welch_t_test(&alcoholic, &control).unwrap();
/// assert!(result.pvalue < 0.05);
/// ```
pub fn welch_t_test(group1: &[f32], group2: &[f32]) -> Result<WelchTest> {
    if group1.len() < 2 || group2.len() < 2 {
        anyhow::bail!(
            "Need at least 2 samples per group for t-test (got {} and {})",
            group1.len(),
            group2.len()
        );
    }

    let ttest_result = aprender::stats::hypothesis::ttest_ind(group1, group2, false)
        .context("Failed to compute t-test")?;

    let pvalue = two_sided_pvalue(ttest_result.statistic, ttest_result.df)?;

    let group1_mean = mean(group1).context("Failed to compute group 1 mean")?;
    let group2_mean = mean(group2).context("Failed to compute group 2 mean")?;

    Ok(WelchTest {
        statistic: ttest_result.statistic,
        pvalue,
        df: ttest_result.df,
        group1_mean,
        group2_mean,
        group1_n: group1.len(),
        group2_n: group2.len(),
    })
}

/// Two-sided p-value of `t` under Student's t with `df` degrees of freedom
///
/// # Errors
/// Fails when the statistic or df is not finite, or df is not positive.
pub fn two_sided_pvalue(t: f32, df: f32) -> Result<f32> {
    if !t.is_finite() || !df.is_finite() || df <= 0.0 {
        anyhow::bail!("t-test is undefined for these samples (t = {}, df = {})", t, df);
    }

    let t_dist = StudentsT::new(0.0, 1.0, f64::from(df))
        .with_context(|| format!("Invalid t distribution (df = {})", df))?;
    let p = 2.0 * (1.0 - t_dist.cdf(f64::from(t).abs()));
    Ok(p.clamp(0.0, 1.0) as f32)
}

/// Arithmetic mean, `None` for an empty sample
pub fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    Vector::from_slice(values).mean().ok()
}

/// Sample standard deviation (ddof = 1), `None` below 2 values
pub fn sample_std(values: &[f32]) -> Option<f32> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let population_variance = Vector::from_slice(values).variance().ok()?;
    let sample_variance = population_variance * n as f32 / (n - 1) as f32;
    Some(sample_variance.max(0.0).sqrt())
}
