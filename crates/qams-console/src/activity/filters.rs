//! User-facing activity log filters and their translation to a query.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, Utc};

use qams_client::resources::ActivityLogQuery;
use qams_core::types::UserId;
use qams_entity::activity::{EntityTag, Operation};

/// Filter criteria as the operator enters them.
///
/// Dates are calendar days; the range is inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityLogFilters {
    /// Selected actor.
    pub actor_id: Option<UserId>,
    /// Specific entity instance.
    pub entity_id: Option<String>,
    /// Free-text entity name.
    pub entity_name: Option<String>,
    /// Kind of entity ("all" is `None`).
    pub entity_type: Option<EntityTag>,
    /// Kind of change ("all" is `None`).
    pub operation: Option<Operation>,
    /// First day included.
    pub from_date: Option<NaiveDate>,
    /// Last day included.
    pub to_date: Option<NaiveDate>,
}

impl ActivityLogFilters {
    /// Whether no criterion is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The inclusive timestamp range covered by the date filters.
    pub fn date_range(&self) -> DateRange {
        DateRange {
            from: self.from_date.map(start_of_day),
            to: self.to_date.map(end_of_day),
        }
    }

    /// Build the backend query for `page`.
    pub fn to_query(&self, page: u64, page_size: u64) -> ActivityLogQuery {
        let range = self.date_range();
        ActivityLogQuery {
            actor_id: self.actor_id.clone(),
            entity_id: non_blank(self.entity_id.as_deref()),
            entity_name: non_blank(self.entity_name.as_deref()),
            entity_type: self.entity_type.clone(),
            operation: self.operation,
            from: range.from,
            to: range.to,
            ..ActivityLogQuery::new(page, page_size)
        }
    }
}

/// Inclusive timestamp range; an open end is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// Earliest instant included.
    pub from: Option<DateTime<Utc>>,
    /// Latest instant included.
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Whether `ts` falls inside the range.
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| ts >= from) && self.to.is_none_or(|to| ts <= to)
    }
}

/// First instant of `day` in UTC.
pub fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// Last representable millisecond of `day` in UTC (23:59:59.999).
pub fn end_of_day(day: NaiveDate) -> DateTime<Utc> {
    match day.checked_add_days(Days::new(1)) {
        Some(next) => start_of_day(next) - TimeDelta::milliseconds(1),
        None => day
            .and_hms_milli_opt(23, 59, 59, 999)
            .map(|dt| dt.and_utc())
            .unwrap_or_else(|| start_of_day(day)),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
