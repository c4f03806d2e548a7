#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Fire event records and the identifiers they are keyed by.
//!
//! Every row of the BDIFF fire log is normalized into a [`FireEvent`]. The
//! commune it burned in is identified by a [`CommuneCode`], the same
//! identifier carried by the commune boundary layer, so both datasets can be
//! joined without further cleanup.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Number of characters in an INSEE commune code.
pub const COMMUNE_CODE_LEN: usize = 5;

/// A normalized INSEE commune code (e.g. `"04070"`, `"2A004"`).
///
/// Always exactly [`COMMUNE_CODE_LEN`] uppercase ASCII alphanumeric
/// characters. Codes exported from numeric columns lose their leading zero
/// (`4070`), so [`CommuneCode::parse`] pads them back.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommuneCode(String);

impl CommuneCode {
    /// Parses and normalizes a raw commune code.
    ///
    /// Surrounding whitespace and a trailing `.0` are removed, then the code
    /// is left-padded with zeros to five characters.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is empty, longer than five characters,
    /// or contains anything other than ASCII letters and digits.
    pub fn parse(raw: &str) -> Result<Self, InvalidCommuneCodeError> {
        let trimmed = raw.trim();
        let trimmed = trimmed.strip_suffix(".0").unwrap_or(trimmed);

        if trimmed.is_empty()
            || trimmed.len() > COMMUNE_CODE_LEN
            || !trimmed.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(InvalidCommuneCodeError {
                value: raw.to_string(),
            });
        }

        Ok(Self(format!(
            "{:0>width$}",
            trimmed.to_ascii_uppercase(),
            width = COMMUNE_CODE_LEN
        )))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the two-character department prefix (e.g. `"04"`).
    #[must_use]
    pub fn department_code(&self) -> &str {
        &self.0[..2]
    }
}

impl std::fmt::Display for CommuneCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CommuneCode {
    type Err = InvalidCommuneCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CommuneCode {
    type Error = InvalidCommuneCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CommuneCode> for String {
    fn from(code: CommuneCode) -> Self {
        code.0
    }
}

impl AsRef<str> for CommuneCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Error returned when a string cannot be normalized into a [`CommuneCode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCommuneCodeError {
    /// The raw value that was rejected.
    pub value: String,
}

impl std::fmt::Display for InvalidCommuneCodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid commune code {:?}: expected 1-5 ASCII letters or digits",
            self.value
        )
    }
}

impl std::error::Error for InvalidCommuneCodeError {}

/// A single fire recorded in the BDIFF log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireEvent {
    /// Year the fire started.
    pub year: i32,
    /// Commune the fire started in, `None` when the log's code is blank or
    /// not a commune code. Such fires still count towards department
    /// totals but never reach the map.
    pub commune_code: Option<CommuneCode>,
    /// Commune name as written in the fire log.
    pub commune_name: String,
    /// Burned area in hectares, when reported.
    pub burned_area_ha: Option<f64>,
    /// BDIFF event number, when reported.
    pub event_id: Option<String>,
}

impl FireEvent {
    /// Whether this event carries a BDIFF event number.
    ///
    /// Per-commune fire counts only include identified events.
    #[must_use]
    pub const fn is_identified(&self) -> bool {
        self.event_id.is_some()
    }
}

/// The value plotted on the department evolution chart.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FireMetric {
    /// Number of fires.
    #[default]
    FireCount,
    /// Burned area in hectares.
    BurnedArea,
}

impl FireMetric {
    /// Every metric, in widget order.
    pub const ALL: &[Self] = &[Self::FireCount, Self::BurnedArea];

    /// Label shown on the metric picker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FireCount => "Nombre de Feux",
            Self::BurnedArea => "Surface Brûlée",
        }
    }

    /// Title of the y axis when plotting this metric.
    #[must_use]
    pub const fn axis_title(self) -> &'static str {
        match self {
            Self::FireCount => "Nombre de Feux",
            Self::BurnedArea => "Surface brûlée (Ha)",
        }
    }

    /// Selects the value matching this metric.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn value(self, fire_count: u64, burned_area_ha: f64) -> f64 {
        match self {
            Self::FireCount => fire_count as f64,
            Self::BurnedArea => burned_area_ha,
        }
    }
}
