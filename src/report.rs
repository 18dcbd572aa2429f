//! Optional JSON timing report.

use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use crate::error::{Error, Result};

/// Prints one JSON record per timed stage to stdout.
///
/// Configured from `json` or `json|<identifier>`; the identifier prefixes
/// every line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeReporter {
    identifier: String,
}

#[derive(Serialize)]
struct TimeRecord<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    value: f64,
    metric: &'a str,
    unit: &'a str,
}

impl TimeReporter {
    /// Parse a report option. An empty option disables reporting.
    ///
    /// # Errors
    ///
    /// Returns an error if the report type is not `json`.
    pub fn parse_option(option: &str) -> Result<Option<Self>> {
        if option.is_empty() {
            return Ok(None);
        }
        option.parse().map(Some)
    }

    /// Format a record line for a stage that took `elapsed`, in microseconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn format(&self, kind: &str, elapsed: Duration, metric: &str) -> String {
        let record = TimeRecord {
            kind,
            value: elapsed.as_nanos() as f64 / 1e3,
            metric,
            unit: "us",
        };
        // Serializing plain strings and a float cannot fail.
        let json = serde_json::to_string(&record).unwrap_or_default();
        format!("{}{json}", self.identifier)
    }

    /// Print a record line for a stage that took `elapsed`.
    pub fn report(&self, kind: &str, elapsed: Duration, metric: &str) {
        println!("{}", self.format(kind, elapsed, metric));
    }
}

impl FromStr for TimeReporter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (kind, identifier) = s.split_once('|').unwrap_or((s, ""));
        if kind != "json" {
            return Err(Error::InvalidParameter {
                name: "report_time".to_string(),
                reason: format!("unsupported report type {kind:?}; the valid type is \"json\""),
            });
        }
        Ok(Self {
            identifier: identifier.to_string(),
        })
    }
}
