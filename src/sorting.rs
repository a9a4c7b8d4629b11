use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::AnalyzerError;
use crate::extractor::RawRow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// The direction the next click on the same column should request.
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(AnalyzerError::UnknownSortDirection(s.to_string())),
        }
    }
}

/// Sort rows by the text of one column.
///
/// Values are compared as strings, so `"100"` sorts before `"20"` even for
/// amount and timestamp columns. Rows without the column sort as `""`.
/// Equal keys keep their input order in both directions.
pub fn sort_rows(mut rows: Vec<RawRow>, column: &str, direction: SortDirection) -> Vec<RawRow> {
    match direction {
        SortDirection::Asc => rows.sort_by(|a, b| sort_key(a, column).cmp(sort_key(b, column))),
        SortDirection::Desc => rows.sort_by(|a, b| sort_key(b, column).cmp(sort_key(a, column))),
    }
    rows
}

fn sort_key<'a>(row: &'a RawRow, column: &str) -> &'a str {
    row.get(column).unwrap_or_default()
}
