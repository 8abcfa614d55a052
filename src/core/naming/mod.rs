//! Event folder names.
//!
//! - Single day: `2020-07-15`
//! - Several days: `2019-03-02__to__03-04` (the end date drops its year)

use chrono::NaiveDate;

/// Separator between the first and last day of a multi-day event
pub const RANGE_SEPARATOR: &str = "__to__";

/// Format the folder name for an event spanning `first` to `last`
pub fn event_folder_name(first: NaiveDate, last: NaiveDate) -> String {
    if first == last {
        return first.format("%Y-%m-%d").to_string();
    }

    format!(
        "{}{}{}",
        first.format("%Y-%m-%d"),
        RANGE_SEPARATOR,
        last.format("%m-%d")
    )
}
