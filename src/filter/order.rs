//! Sort tokens for the search endpoint.
//!
//! The endpoint accepts a single `orderby` value: a field name, prefixed with
//! `-` for descending order. Unknown fields are ignored server-side in favour
//! of `-pk`, so only the known fields are representable here.

use std::fmt;

use crate::error::SecdeskError;

/// Field the event list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Pk,
    ProblemName,
    OccurredTime,
    AssignedUser,
}

enum_display_fromstr!(
    SortField,
    SecdeskError::InvalidSortField,
    {
        Pk => "pk",
        ProblemName => "problem__name",
        OccurredTime => "occurred_time",
        AssignedUser => "assigned_user__username",
    }
);

impl SortField {
    pub const ALL_STRINGS: &[&str] = &[
        "pk",
        "problem__name",
        "occurred_time",
        "assigned_user__username",
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub field: SortField,
    pub descending: bool,
}

impl OrderBy {
    pub fn ascending(field: SortField) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    pub fn descending(field: SortField) -> Self {
        Self {
            field,
            descending: true,
        }
    }

    /// Next sort token after the user asks to sort by `field`.
    ///
    /// Sorting by the current key flips its direction; any other field
    /// becomes the ascending primary key.
    pub fn toggled(current: Option<OrderBy>, field: SortField) -> OrderBy {
        match current {
            Some(order) if order.field == field => OrderBy {
                field,
                descending: !order.descending,
            },
            _ => OrderBy::ascending(field),
        }
    }

    /// Parse a token like `occurred_time` or `-pk`.
    pub fn parse(token: &str) -> Result<Self, SecdeskError> {
        let token = token.trim();
        match token.strip_prefix('-') {
            Some(field) => Ok(OrderBy::descending(field.parse()?)),
            None => Ok(OrderBy::ascending(token.parse()?)),
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field)
        } else {
            write!(f, "{}", self.field)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_field_flips_direction() {
        let first = OrderBy::toggled(None, SortField::OccurredTime);
        assert_eq!(first.to_string(), "occurred_time");

        let second = OrderBy::toggled(Some(first), SortField::OccurredTime);
        assert_eq!(second.to_string(), "-occurred_time");

        let third = OrderBy::toggled(Some(second), SortField::OccurredTime);
        assert_eq!(third, first);
    }

    #[test]
    fn test_other_field_starts_ascending() {
        let current = OrderBy::descending(SortField::Pk);
        let next = OrderBy::toggled(Some(current), SortField::ProblemName);
        assert_eq!(next, OrderBy::ascending(SortField::ProblemName));
    }

    #[test]
    fn test_parse_token() {
        assert_eq!(OrderBy::parse("-pk").unwrap(), OrderBy::descending(SortField::Pk));
        assert_eq!(
            OrderBy::parse("assigned_user__username").unwrap(),
            OrderBy::ascending(SortField::AssignedUser)
        );
        assert!(OrderBy::parse("-summary").is_err());
    }
}
