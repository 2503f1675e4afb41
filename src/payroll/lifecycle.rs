use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    entity::{payroll_record, sea_orm_active_enums::PayrollStatus},
    utils,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot move payroll record from {from:?} to {to:?}")]
    InvalidTransition { from: PayrollStatus, to: PayrollStatus },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdjustmentError {
    #[error("payroll record is {0:?} and can no longer be changed")]
    Locked(PayrollStatus),
    #[error("{0} must not be negative")]
    Negative(&'static str),
}

impl PayrollStatus {
    /// `Paid` and `Cancelled` accept no further edits, transitions or deletion
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Paid | Self::Cancelled)
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Generated, Self::Approved)
                | (Self::Approved, Self::Paid)
                | (Self::Generated, Self::Cancelled)
                | (Self::Approved, Self::Cancelled)
        )
    }
}

pub fn transition(from: PayrollStatus, to: PayrollStatus) -> Result<PayrollStatus, TransitionError> {
    if from.can_transition_to(to) {
        Ok(to)
    } else {
        Err(TransitionError::InvalidTransition { from, to })
    }
}

/// Manual bonus/deduction applied by an operator after generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjustment {
    pub bonus_amount: Decimal,
    pub deduction_amount: Decimal,
    pub adjustment_note: Option<String>,
}

/// Values to write back after an adjustment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustedTotals {
    pub bonus_amount: Decimal,
    pub deduction_amount: Decimal,
    pub adjustment_note: Option<String>,
    pub total_amount: Decimal,
}

pub fn apply_adjustment(record: &payroll_record::Model, adjustment: Adjustment) -> Result<AdjustedTotals, AdjustmentError> {
    if record.status.is_terminal() {
        return Err(AdjustmentError::Locked(record.status));
    }
    if adjustment.bonus_amount < Decimal::ZERO {
        return Err(AdjustmentError::Negative("bonus_amount"));
    }
    if adjustment.deduction_amount < Decimal::ZERO {
        return Err(AdjustmentError::Negative("deduction_amount"));
    }

    let bonus_amount = utils::round_money(adjustment.bonus_amount);
    let deduction_amount = utils::round_money(adjustment.deduction_amount);

    Ok(AdjustedTotals {
        total_amount: utils::round_money(record.items.total() + bonus_amount - deduction_amount),
        bonus_amount,
        deduction_amount,
        adjustment_note: adjustment.adjustment_note.or_else(|| record.adjustment_note.clone()),
    })
}

#[cfg(test)]
mod tests {
    use chrono::Local;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::entity::{
        payroll_record::{PayrollItem, PayrollItems},
        sea_orm_active_enums::{PaymentMethod, PayrollType},
    };

    use super::*;

    fn record(status: PayrollStatus) -> payroll_record::Model {
        let item = |payroll_type, amount| PayrollItem {
            setting_id: Uuid::new_v4(),
            description: "monthly".to_string(),
            payroll_type,
            amount,
            payment_method: PaymentMethod::BankTransfer,
        };

        payroll_record::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            created_by: None,
            updated_by: None,
            employee_id: Uuid::new_v4(),
            month: "03".to_string(),
            year: 2025,
            items: PayrollItems(vec![item(PayrollType::Primary, dec!(7000)), item(PayrollType::Bonus, dec!(500))]),
            bonus_amount: Decimal::ZERO,
            deduction_amount: Decimal::ZERO,
            adjustment_note: Some("Prorated for 20/23 working days (3 unpaid leave days)".to_string()),
            total_amount: dec!(7500),
            status,
        }
    }

    #[test]
    fn test_allowed_transitions() {
        assert_eq!(transition(PayrollStatus::Generated, PayrollStatus::Approved), Ok(PayrollStatus::Approved));
        assert_eq!(transition(PayrollStatus::Approved, PayrollStatus::Paid), Ok(PayrollStatus::Paid));
        assert_eq!(transition(PayrollStatus::Generated, PayrollStatus::Cancelled), Ok(PayrollStatus::Cancelled));
        assert_eq!(transition(PayrollStatus::Approved, PayrollStatus::Cancelled), Ok(PayrollStatus::Cancelled));
    }

    #[test]
    fn test_rejected_transitions() {
        let rejected = [
            (PayrollStatus::Generated, PayrollStatus::Paid),
            (PayrollStatus::Generated, PayrollStatus::Generated),
            (PayrollStatus::Approved, PayrollStatus::Generated),
            (PayrollStatus::Paid, PayrollStatus::Cancelled),
            (PayrollStatus::Paid, PayrollStatus::Approved),
            (PayrollStatus::Cancelled, PayrollStatus::Generated),
            (PayrollStatus::Cancelled, PayrollStatus::Approved),
        ];

        for (from, to) in rejected {
            assert_eq!(transition(from, to), Err(TransitionError::InvalidTransition { from, to }));
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(PayrollStatus::Paid.is_terminal());
        assert!(PayrollStatus::Cancelled.is_terminal());
        assert!(!PayrollStatus::Generated.is_terminal());
        assert!(!PayrollStatus::Approved.is_terminal());
    }

    #[test]
    fn test_apply_adjustment_recomputes_total() {
        let totals = apply_adjustment(&record(PayrollStatus::Generated), Adjustment {
            bonus_amount: dec!(250.555),
            deduction_amount: dec!(100),
            adjustment_note: Some("Quarterly target met".to_string()),
        })
        .unwrap();

        assert_eq!(totals.bonus_amount, dec!(250.56));
        assert_eq!(totals.deduction_amount, dec!(100));
        assert_eq!(totals.total_amount, dec!(7650.56));
        assert_eq!(totals.adjustment_note.as_deref(), Some("Quarterly target met"));
    }

    #[test]
    fn test_apply_adjustment_keeps_existing_note() {
        let record = record(PayrollStatus::Approved);

        let totals = apply_adjustment(&record, Adjustment {
            bonus_amount: Decimal::ZERO,
            deduction_amount: dec!(7600),
            adjustment_note: None,
        })
        .unwrap();

        assert_eq!(totals.total_amount, dec!(-100));
        assert_eq!(totals.adjustment_note, record.adjustment_note);
    }

    #[test]
    fn test_apply_adjustment_rejects_terminal_and_negative() {
        let adjustment = Adjustment {
            bonus_amount: dec!(10),
            deduction_amount: Decimal::ZERO,
            adjustment_note: None,
        };

        assert_eq!(
            apply_adjustment(&record(PayrollStatus::Paid), adjustment.clone()),
            Err(AdjustmentError::Locked(PayrollStatus::Paid))
        );
        assert_eq!(
            apply_adjustment(&record(PayrollStatus::Generated), Adjustment { bonus_amount: dec!(-1), ..adjustment }),
            Err(AdjustmentError::Negative("bonus_amount"))
        );
    }
}
