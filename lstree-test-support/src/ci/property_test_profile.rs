//! Environment-driven tuning for the property suites.
//!
//! CI runs the level-sweep properties with larger case counts and graphs
//! than a local `cargo test`; both are controlled from the environment so
//! the suites themselves stay declarative.

use std::env;

/// Environment variable controlling proptest case counts.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable controlling proptest process forking.
pub const LSTREE_PBT_FORK_ENV_KEY: &str = "LSTREE_PBT_FORK";
/// Environment variable capping the number of points in generated graphs.
pub const LSTREE_PBT_MAX_POINTS_ENV_KEY: &str = "LSTREE_PBT_MAX_POINTS";

/// Smallest point cap accepted from the environment.
const MIN_POINT_CAP: usize = 4;

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
    max_points: usize,
}

impl ProptestRunProfile {
    /// Loads a profile from the environment, falling back to the supplied
    /// defaults when a variable is absent or malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use lstree_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false, 48);
    /// assert!(profile.cases() > 0);
    /// assert!(profile.max_points() >= 4);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool, default_max_points: usize) -> Self {
        Self {
            cases: read_override(PROGTEST_CASES_ENV_KEY, parse_cases).unwrap_or(default_cases),
            fork: read_override(LSTREE_PBT_FORK_ENV_KEY, parse_bool).unwrap_or(default_fork),
            max_points: read_override(LSTREE_PBT_MAX_POINTS_ENV_KEY, parse_point_cap)
                .unwrap_or(default_max_points)
                .max(MIN_POINT_CAP),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether to run proptest cases in forked subprocesses.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }

    /// Upper bound on the number of points in generated neighbour graphs.
    #[must_use]
    pub fn max_points(&self) -> usize {
        self.max_points
    }
}

fn read_override<T>(key: &'static str, parse: fn(&str) -> Result<T, String>) -> Option<T> {
    let raw = env::var(key).ok()?;
    match parse(&raw) {
        Ok(value) => Some(value),
        Err(reason) => {
            tracing::warn!(
                env = key,
                raw = %raw,
                reason = %reason,
                "ignoring malformed property-test override",
            );
            None
        }
    }
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("cases must be > 0".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(format!("parse error: {error}")),
    }
}

fn parse_point_cap(raw: &str) -> Result<usize, String> {
    let cap = raw
        .trim()
        .parse::<usize>()
        .map_err(|error| format!("parse error: {error}"))?;
    if cap < MIN_POINT_CAP {
        return Err(format!("point cap must be at least {MIN_POINT_CAP}"));
    }
    Ok(cap)
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected one of: true/false/1/0/yes/no/on/off".to_owned()),
    }
}
