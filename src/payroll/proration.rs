use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::{
    entity::{leave_record, sea_orm_active_enums::LeaveType},
    payroll::period::PayPeriod,
    utils,
};

/// How paid working days in a month are counted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WorkingDayPolicy {
    /// `days - floor(days / 7) * 2`, ignoring where weekends actually fall
    #[default]
    Approximate,
    /// Monday to Friday counted on the real calendar
    Weekdays,
}

#[derive(Debug, Error)]
#[error("unknown working day policy `{0}`, expected `approximate` or `weekdays`")]
pub struct UnknownPolicy(String);

impl FromStr for WorkingDayPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approximate" => Ok(Self::Approximate),
            "weekdays" => Ok(Self::Weekdays),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

impl WorkingDayPolicy {
    pub fn working_days(self, period: &PayPeriod) -> u32 {
        match self {
            Self::Approximate => utils::approximate_working_days(period.days_in_month()),
            Self::Weekdays => utils::count_working_days(period.start(), period.end()),
        }
    }
}

/// Leave days split by whether they cut pay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeaveTally {
    pub unpaid_days: u32,
    pub paid_days: u32,
}

impl LeaveTally {
    /// Sums `total_days` of each record as stored; records are expected to be
    /// approved and overlapping the period already.
    pub fn from_records(records: &[leave_record::Model]) -> Self {
        records.iter().fold(Self::default(), |mut tally, record| {
            let days = u32::try_from(record.total_days).unwrap_or_default();
            match record.leave_type {
                LeaveType::Unpaid => tally.unpaid_days = tally.unpaid_days.saturating_add(days),
                LeaveType::Annual | LeaveType::Sick | LeaveType::Other => {
                    tally.paid_days = tally.paid_days.saturating_add(days)
                }
            }
            tally
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Proration {
    pub total_working_days: u32,
    pub unpaid_days: u32,
    pub days_worked: u32,
}

impl Proration {
    pub fn new(total_working_days: u32, unpaid_days: u32) -> Self {
        Self {
            total_working_days,
            unpaid_days,
            days_worked: total_working_days.saturating_sub(unpaid_days),
        }
    }

    /// `days_worked / total_working_days`, zero when the month has no working days
    pub fn factor(&self) -> Decimal {
        if self.total_working_days == 0 {
            return Decimal::ZERO;
        }

        Decimal::from(self.days_worked) / Decimal::from(self.total_working_days)
    }

    /// Scales `amount` and rounds to cents. Multiplies before dividing so that
    /// an unprorated amount comes back exactly.
    pub fn apply(&self, amount: Decimal) -> Decimal {
        if self.total_working_days == 0 {
            return Decimal::ZERO;
        }

        utils::round_money(amount * Decimal::from(self.days_worked) / Decimal::from(self.total_working_days))
    }

    pub fn is_prorated(&self) -> bool {
        self.unpaid_days > 0
    }

    pub fn note(&self) -> Option<String> {
        if !self.is_prorated() {
            return None;
        }

        let unit = if self.unpaid_days == 1 { "day" } else { "days" };

        Some(format!(
            "Prorated for {}/{} working days ({} unpaid leave {unit})",
            self.days_worked, self.total_working_days, self.unpaid_days
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDate};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::entity::sea_orm_active_enums::LeaveStatus;

    use super::*;

    fn leave(leave_type: LeaveType, total_days: i32) -> leave_record::Model {
        leave_record::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            employee_id: Uuid::new_v4(),
            leave_type,
            start_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(),
            total_days,
            status: LeaveStatus::Approved,
            reason: None,
        }
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("approximate".parse::<WorkingDayPolicy>().unwrap(), WorkingDayPolicy::Approximate);
        assert_eq!(" Weekdays ".parse::<WorkingDayPolicy>().unwrap(), WorkingDayPolicy::Weekdays);
        assert!("business".parse::<WorkingDayPolicy>().is_err());
    }

    #[test]
    fn test_policy_working_days() {
        let march = PayPeriod::new(3, 2025).unwrap();
        assert_eq!(WorkingDayPolicy::Approximate.working_days(&march), 23);
        assert_eq!(WorkingDayPolicy::Weekdays.working_days(&march), 21);

        let june = PayPeriod::new(6, 2024).unwrap();
        assert_eq!(WorkingDayPolicy::Weekdays.working_days(&june), 20);
    }

    #[test]
    fn test_leave_tally_only_deducts_unpaid() {
        let tally = LeaveTally::from_records(&[
            leave(LeaveType::Unpaid, 3),
            leave(LeaveType::Sick, 2),
            leave(LeaveType::Unpaid, 1),
            leave(LeaveType::Annual, 5),
        ]);

        assert_eq!(tally, LeaveTally { unpaid_days: 4, paid_days: 7 });
    }

    #[test]
    fn test_leave_tally_saturates() {
        let tally = LeaveTally::from_records(&[
            leave(LeaveType::Unpaid, i32::MAX),
            leave(LeaveType::Unpaid, i32::MAX),
            leave(LeaveType::Unpaid, i32::MAX),
            leave(LeaveType::Sick, -4),
        ]);

        assert_eq!(tally, LeaveTally { unpaid_days: u32::MAX, paid_days: 0 });

        let proration = Proration::new(23, tally.unpaid_days);
        assert_eq!(proration.days_worked, 0);
        assert_eq!(proration.apply(dec!(6000)), Decimal::ZERO);
    }

    #[test]
    fn test_no_unpaid_leave_keeps_amount() {
        let proration = Proration::new(23, 0);

        assert_eq!(proration.apply(dec!(6000)), dec!(6000));
        assert_eq!(proration.apply(dec!(1234.56)), dec!(1234.56));
        assert_eq!(proration.note(), None);
    }

    #[test]
    fn test_prorated_amount() {
        let proration = Proration::new(23, 3);

        assert_eq!(proration.days_worked, 20);
        assert_eq!(proration.apply(dec!(6000)), dec!(5217.39));
        assert_eq!(
            proration.note().as_deref(),
            Some("Prorated for 20/23 working days (3 unpaid leave days)")
        );
    }

    #[test]
    fn test_single_unpaid_day_note() {
        let proration = Proration::new(22, 1);

        assert_eq!(
            proration.note().as_deref(),
            Some("Prorated for 21/22 working days (1 unpaid leave day)")
        );
    }

    #[test]
    fn test_unpaid_days_beyond_working_days() {
        let proration = Proration::new(20, 25);

        assert_eq!(proration.days_worked, 0);
        assert_eq!(proration.apply(dec!(5000)), dec!(0));
    }

    #[test]
    fn test_zero_working_days_fails_closed() {
        let proration = Proration::new(0, 0);

        assert_eq!(proration.factor(), Decimal::ZERO);
        assert_eq!(proration.apply(dec!(5000)), Decimal::ZERO);
    }
}
