use serde::Serialize;
use sea_orm::DbErr;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    entity::{
        employee,
        payroll_record::{PayrollItem, PayrollItems},
        payroll_setting,
    },
    payroll::{
        period::PayPeriod,
        proration::{LeaveTally, Proration, WorkingDayPolicy},
    },
    store::{CreateOutcome, EmployeeDirectory, LeaveStore, NewPayrollRecord, PayrollRecordStore, PayrollSettingsStore},
};

#[derive(Debug, Error)]
pub enum GenerateError {
    /// A read failed; the run is aborted and nothing after the failure is generated
    #[error("unable to read payroll inputs")]
    Store(#[from] DbErr),
}

/// Outcome of one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationSummary {
    pub period: PayPeriod,
    pub created: usize,
    /// Employees that already had a record for the period
    pub skipped: usize,
    /// Active employees with no setting effective in the period
    pub without_settings: usize,
    pub records: Vec<Uuid>,
    pub errors: Vec<EmployeeFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeFailure {
    pub employee_id: Uuid,
    pub setting_ids: Vec<Uuid>,
    pub message: String,
}

impl GenerationSummary {
    fn new(period: PayPeriod) -> Self {
        Self {
            period,
            created: 0,
            skipped: 0,
            without_settings: 0,
            records: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// Builds one payroll record per active employee for a period, aggregating
/// every effective setting into line items.
pub struct PayrollGenerator<'a, S> {
    stores: &'a S,
    policy: WorkingDayPolicy,
}

impl<'a, S> PayrollGenerator<'a, S>
where
    S: EmployeeDirectory + PayrollSettingsStore + LeaveStore + PayrollRecordStore,
{
    pub fn new(stores: &'a S, policy: WorkingDayPolicy) -> Self {
        Self { stores, policy }
    }

    pub async fn generate(&self, period: PayPeriod, requested_by: Option<Uuid>) -> Result<GenerationSummary, GenerateError> {
        let employees = self.stores.find_active_employees().await?;
        let total_working_days = self.policy.working_days(&period);

        info!(
            month = %period.month_label(),
            year = period.year(),
            employees = employees.len(),
            total_working_days,
            "Generating payroll"
        );

        let mut summary = GenerationSummary::new(period);

        for employee in employees {
            let settings = self.stores.find_active_settings(employee.id, &period).await?;
            if settings.is_empty() {
                debug!(employee_id = %employee.id, "No effective payroll settings, skipping");
                summary.without_settings += 1;
                continue;
            }

            if self.stores.exists(employee.id, &period).await? {
                debug!(employee_id = %employee.id, "Payroll record already exists, skipping");
                summary.skipped += 1;
                continue;
            }

            let leaves = self
                .stores
                .find_approved_overlapping(employee.id, period.start(), period.end())
                .await?;
            let tally = LeaveTally::from_records(&leaves);
            let proration = Proration::new(total_working_days, tally.unpaid_days);

            debug!(
                employee_id = %employee.id,
                unpaid_days = tally.unpaid_days,
                paid_leave_days = tally.paid_days,
                days_worked = proration.days_worked,
                "Prorating payroll"
            );

            let record = build_record(&employee, &settings, period, &proration, requested_by);
            let setting_ids = settings.iter().map(|setting| setting.id).collect::<Vec<_>>();

            match self.stores.create(record).await {
                Ok(CreateOutcome::Created(created)) => {
                    summary.created += 1;
                    summary.records.push(created.id);
                }
                Ok(CreateOutcome::AlreadyExists) => {
                    debug!(employee_id = %employee.id, "Payroll record created concurrently, skipping");
                    summary.skipped += 1;
                }
                Err(err) => {
                    error!(employee_id = %employee.id, ?setting_ids, error = %err, "Failed to create payroll record");
                    summary.errors.push(EmployeeFailure {
                        employee_id: employee.id,
                        setting_ids,
                        message: err.to_string(),
                    });
                }
            }
        }

        if summary.errors.is_empty() {
            info!(
                created = summary.created,
                skipped = summary.skipped,
                without_settings = summary.without_settings,
                "Payroll generation finished"
            );
        } else {
            warn!(
                created = summary.created,
                skipped = summary.skipped,
                without_settings = summary.without_settings,
                errors = summary.errors.len(),
                "Payroll generation finished with errors"
            );
        }

        Ok(summary)
    }
}

fn build_record(
    employee: &employee::Model,
    settings: &[payroll_setting::Model],
    period: PayPeriod,
    proration: &Proration,
    requested_by: Option<Uuid>,
) -> NewPayrollRecord {
    let items = PayrollItems(
        settings
            .iter()
            .map(|setting| PayrollItem {
                setting_id: setting.id,
                description: setting
                    .description
                    .clone()
                    .unwrap_or_else(|| format!("{:?} pay for {period}", setting.payroll_type)),
                payroll_type: setting.payroll_type,
                amount: proration.apply(setting.amount),
                payment_method: setting.payment_method,
            })
            .collect(),
    );

    NewPayrollRecord {
        employee_id: employee.id,
        period,
        total_amount: items.total(),
        items,
        adjustment_note: proration.note(),
        created_by: requested_by,
    }
}
