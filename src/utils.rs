use chrono::{Datelike as _, Days, NaiveDate, Weekday};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::consts::{MONEY_SCALE, WEEKEND_DAYS_PER_WEEK};

/// Counts Monday to Friday between `start` and `end`, both inclusive
pub fn count_working_days(mut start: NaiveDate, end: NaiveDate) -> u32 {
    let mut working_days = 0;

    while start <= end {
        if start.weekday() != Weekday::Sat && start.weekday() != Weekday::Sun {
            working_days += 1;
        }

        let Some(next) = start.checked_add_days(Days::new(1)) else {
            break;
        };
        start = next;
    }

    working_days
}

/// Two weekend days taken off per full week, regardless of where the weekends fall
pub fn approximate_working_days(days_in_month: u32) -> u32 {
    days_in_month - (days_in_month / 7) * WEEKEND_DAYS_PER_WEEK
}

/// Rounds half away from zero, so 0.005 becomes 0.01 rather than 0.00
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}
