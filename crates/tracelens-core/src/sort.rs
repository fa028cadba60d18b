//! Table ordering attributes.

use std::fmt;

/// The column the ranked table is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortAttribute {
    /// Total time spent in the transaction (the default ranking).
    #[default]
    Total,
    /// Average time per transaction.
    Average,
    /// Number of transactions.
    Count,
}

impl SortAttribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortAttribute::Total => "total",
            SortAttribute::Average => "average",
            SortAttribute::Count => "count",
        }
    }

    /// Parse a location/query parameter value.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "total" => Some(SortAttribute::Total),
            "average" => Some(SortAttribute::Average),
            "count" => Some(SortAttribute::Count),
            _ => None,
        }
    }
}

impl fmt::Display for SortAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction, descending by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Desc,
    Asc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Desc => "desc",
            SortDirection::Asc => "asc",
        }
    }

    /// The opposite direction.
    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Desc => SortDirection::Asc,
            SortDirection::Asc => SortDirection::Desc,
        }
    }

    /// Parse a location/query parameter value.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "desc" => Some(SortDirection::Desc),
            "asc" => Some(SortDirection::Asc),
            _ => None,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(SortAttribute::default(), SortAttribute::Total);
        assert_eq!(SortDirection::default(), SortDirection::Desc);
    }

    #[test]
    fn test_toggle_round_trips() {
        let original = SortDirection::Desc;
        assert_eq!(original.toggled(), SortDirection::Asc);
        assert_eq!(original.toggled().toggled(), original);
    }

    #[test]
    fn test_param_round_trip() {
        for attribute in [
            SortAttribute::Total,
            SortAttribute::Average,
            SortAttribute::Count,
        ] {
            assert_eq!(SortAttribute::from_param(attribute.as_str()), Some(attribute));
        }
        assert_eq!(SortAttribute::from_param("bogus"), None);
        assert_eq!(SortDirection::from_param("asc"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::from_param(""), None);
    }
}
