//! Welch's two-sample t-test
//!
//! Rating variances differ a lot between albums, so the pooled-variance
//! Student test does not apply. Welch's variant compares the means with
//! per-sample variances and Welch–Satterthwaite degrees of freedom.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::Statistics;

/// Fixed significance level (95% confidence)
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Outcome of a two-sided Welch t-test
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WelchTest {
    /// Signed: positive when the first sample has the higher mean
    pub t_statistic: f64,
    /// Two-tailed, in [0, 1], or NaN when undefined
    pub p_value: f64,
    pub degrees_of_freedom: f64,
}

impl WelchTest {
    /// Result for input the test cannot handle (fewer than two values)
    pub fn undefined() -> Self {
        Self {
            t_statistic: f64::NAN,
            p_value: f64::NAN,
            degrees_of_freedom: f64::NAN,
        }
    }

    /// p-value at or below the significance level. NaN is never significant.
    pub fn is_significant(&self) -> bool {
        self.p_value <= SIGNIFICANCE_LEVEL
    }
}

/// Two-sided Welch t-test of `first` against `second`
///
/// Degenerate input:
/// - fewer than two values on either side: every field is NaN
/// - zero variance on both sides: t is 0 (p = 1) for equal means, else
///   ±infinity (p = 0); degrees of freedom are NaN
pub fn welch_t_test(first: &[f64], second: &[f64]) -> WelchTest {
    if first.len() < 2 || second.len() < 2 {
        return WelchTest::undefined();
    }

    let n1 = first.len() as f64;
    let n2 = second.len() as f64;
    let mean_diff = first.iter().mean() - second.iter().mean();
    // sample variances (n - 1)
    let q1 = first.iter().variance() / n1;
    let q2 = second.iter().variance() / n2;
    let se_squared = q1 + q2;

    if se_squared == 0.0 {
        let (t_statistic, p_value) = if mean_diff == 0.0 {
            (0.0, 1.0)
        } else {
            (mean_diff.signum() * f64::INFINITY, 0.0)
        };
        return WelchTest {
            t_statistic,
            p_value,
            degrees_of_freedom: f64::NAN,
        };
    }

    let t_statistic = mean_diff / se_squared.sqrt();
    let degrees_of_freedom =
        se_squared * se_squared / (q1 * q1 / (n1 - 1.0) + q2 * q2 / (n2 - 1.0));

    let p_value = if t_statistic == 0.0 {
        1.0
    } else {
        match StudentsT::new(0.0, 1.0, degrees_of_freedom) {
            Ok(dist) => (2.0 * dist.sf(t_statistic.abs())).clamp(0.0, 1.0),
            Err(_) => f64::NAN,
        }
    };

    WelchTest {
        t_statistic,
        p_value,
        degrees_of_freedom,
    }
}
