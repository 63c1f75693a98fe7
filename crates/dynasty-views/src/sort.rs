// Column sort state shared by the sortable tables.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Orient an ascending comparison. `Equal` stays `Equal`, so a stable
    /// sort keeps tied rows in input order in both directions.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "\u{25B2}",
            SortDirection::Desc => "\u{25BC}",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction `{other}` (expected asc or desc)")),
        }
    }
}

/// Active sort column and direction for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: Copy + PartialEq> SortState<F> {
    /// Sort by `field`, descending.
    pub fn new(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    pub fn with_direction(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Column click: the active column flips direction, any other column
    /// becomes active in descending order.
    pub fn select(&mut self, field: F) {
        if self.field == field {
            self.direction = self.direction.toggled();
        } else {
            self.field = field;
            self.direction = SortDirection::Desc;
        }
    }

    pub fn is_active(&self, field: F) -> bool {
        self.field == field
    }
}

/// Case-insensitive name ordering; on a case-only difference lowercase
/// sorts first.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Total order for computed floats; NaN compares equal.
pub fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
