//! Domain wrapper types for the run retrieval BDD tests.

use std::fmt;
use std::str::FromStr;

/// Number of workflow runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunCount(u64);

impl RunCount {
    pub(crate) const fn value(self) -> u64 {
        self.0
    }
}

impl FromStr for RunCount {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

impl fmt::Display for RunCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of HTTP requests the mock server received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RequestCount(usize);

impl RequestCount {
    pub(crate) const fn value(self) -> usize {
        self.0
    }
}

impl FromStr for RequestCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.parse::<usize>().map_err(|error| error.to_string())?;
        if value == 0 {
            return Err("RequestCount must be >= 1".to_owned());
        }

        Ok(Self(value))
    }
}

impl fmt::Display for RequestCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
