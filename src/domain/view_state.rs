// Table view state - period, sort and pagination
use std::fmt;
use std::str::FromStr;

pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Last24Hours,
    Last48Hours,
    LastWeek,
    LastMonth,
}

impl Period {
    pub const ALL: [Period; 4] = [
        Period::Last24Hours,
        Period::Last48Hours,
        Period::LastWeek,
        Period::LastMonth,
    ];

    /// Query-string form understood by the sensor API
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Last24Hours => "24h",
            Period::Last48Hours => "48h",
            Period::LastWeek => "1w",
            Period::LastMonth => "1m",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid period '{0}', expected one of 24h, 48h, 1w, 1m")]
pub struct InvalidPeriod(pub String);

impl FromStr for Period {
    type Err = InvalidPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| InvalidPeriod(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    EquipmentId,
    Average,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub period: Period,
    pub sort_column: SortColumn,
    pub sort_direction: SortDirection,
    pub page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            period: Period::default(),
            sort_column: SortColumn::default(),
            sort_direction: SortDirection::default(),
            page: 1,
        }
    }
}

pub fn total_pages(row_count: usize) -> usize {
    row_count.div_ceil(PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parse() {
        for period in Period::ALL {
            assert_eq!(period.as_str().parse::<Period>(), Ok(period));
        }
        assert_eq!(
            "2h".parse::<Period>(),
            Err(InvalidPeriod("2h".to_string()))
        );
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(10), 1);
        assert_eq!(total_pages(23), 3);
    }

    #[test]
    fn test_default_view_state() {
        let view = ViewState::default();
        assert_eq!(view.period, Period::Last24Hours);
        assert_eq!(view.sort_column, SortColumn::EquipmentId);
        assert_eq!(view.sort_direction, SortDirection::Asc);
        assert_eq!(view.page, 1);
    }
}
