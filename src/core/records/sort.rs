//! Sort parameters for record views

use crate::domain::errors::CarebookError;
use crate::domain::patient::PatientView;
use crate::domain::Result;
use std::fmt;
use std::str::FromStr;

/// Field a sort can be keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Weight,
    Height,
    Bmi,
}

impl SortKey {
    /// Accepted `sort_by` values, matched exactly
    pub const VALID: [&'static str; 3] = ["weight", "height", "bmi"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Weight => "weight",
            SortKey::Height => "height",
            SortKey::Bmi => "bmi",
        }
    }

    /// Key value of a view
    pub fn value(&self, view: &PatientView) -> f64 {
        match self {
            SortKey::Weight => view.patient.weight(),
            SortKey::Height => view.patient.height(),
            SortKey::Bmi => view.bmi,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CarebookError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "weight" => Ok(SortKey::Weight),
            "height" => Ok(SortKey::Height),
            "bmi" => Ok(SortKey::Bmi),
            other => Err(CarebookError::InvalidArgument(format!(
                "invalid sort_by '{}', select from {:?}",
                other,
                SortKey::VALID
            ))),
        }
    }
}

/// Sort direction
///
/// Only the exact value `desc` selects descending order; anything else,
/// including an absent parameter, sorts ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn from_param(order: Option<&str>) -> Self {
        match order {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Stable sort; equal keys keep their incoming order in both directions
pub fn sort_views(views: &mut [PatientView], key: SortKey, order: SortOrder) {
    match order {
        SortOrder::Asc => views.sort_by(|a, b| key.value(a).total_cmp(&key.value(b))),
        SortOrder::Desc => views.sort_by(|a, b| key.value(b).total_cmp(&key.value(a))),
    }
}
