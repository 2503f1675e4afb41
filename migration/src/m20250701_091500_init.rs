use sea_orm_migration::{prelude::{extension::postgres::TypeDropStatement, *}, sea_orm::{ActiveEnum, DbBackend, DeriveActiveEnum, EnumIter, Schema}};

use crate::{setup_audit_fk, util::{audited_table_statement, default_table_statement, employee_fk}};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(DbBackend::Postgres);

        manager.create_type(schema.create_enum_from_active_enum::<RoleType>()).await?;
        manager.create_type(schema.create_enum_from_active_enum::<PayrollType>()).await?;
        manager.create_type(schema.create_enum_from_active_enum::<PaymentMethod>()).await?;
        manager.create_type(schema.create_enum_from_active_enum::<LeaveType>()).await?;
        manager.create_type(schema.create_enum_from_active_enum::<LeaveStatus>()).await?;
        manager.create_type(schema.create_enum_from_active_enum::<PayrollStatus>()).await?;

        manager
            .create_table(default_table_statement()
                .table(Employee::Table)
                .col(ColumnDef::new(Employee::Username)
                    .text()
                    .unique_key()
                    .not_null())
                .col(ColumnDef::new(Employee::Password)
                    .binary()
                    .not_null()) // sha256 of `password:username`
                .col(ColumnDef::new(Employee::FullName)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Employee::Role)
                    .custom(RoleType::name())
                    .not_null())
                .col(ColumnDef::new(Employee::Active)
                    .boolean()
                    .not_null()
                    .default(true))
                .take()
            ).await?;

        manager
            .create_table(default_table_statement()
                .table(PayrollSetting::Table)
                .col(ColumnDef::new(PayrollSetting::EmployeeId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(PayrollSetting::PayrollType)
                    .custom(PayrollType::name())
                    .not_null())
                .col(ColumnDef::new(PayrollSetting::Description)
                    .text())
                .col(ColumnDef::new(PayrollSetting::Amount)
                    .decimal_len(19, 2)
                    .not_null())
                .col(ColumnDef::new(PayrollSetting::PaymentMethod)
                    .custom(PaymentMethod::name())
                    .not_null())
                .col(ColumnDef::new(PayrollSetting::IsActive)
                    .boolean()
                    .not_null()
                    .default(true))
                .col(ColumnDef::new(PayrollSetting::EffectiveFrom)
                    .date()
                    .not_null())
                .col(ColumnDef::new(PayrollSetting::EffectiveUntil)
                    .date()) // Open ended when null
                .take()
            ).await?;
        manager.create_foreign_key(employee_fk(PayrollSetting::Table, PayrollSetting::EmployeeId)).await?;

        manager
            .create_table(default_table_statement()
                .table(LeaveRecord::Table)
                .col(ColumnDef::new(LeaveRecord::EmployeeId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(LeaveRecord::LeaveType)
                    .custom(LeaveType::name())
                    .not_null())
                .col(ColumnDef::new(LeaveRecord::StartDate)
                    .date()
                    .not_null())
                .col(ColumnDef::new(LeaveRecord::EndDate)
                    .date()
                    .not_null())
                .col(ColumnDef::new(LeaveRecord::TotalDays)
                    .integer()
                    .not_null())
                .col(ColumnDef::new(LeaveRecord::Status)
                    .custom(LeaveStatus::name())
                    .not_null()
                    .default(Expr::val("pending").cast_as(LeaveStatus::name())))
                .col(ColumnDef::new(LeaveRecord::Reason)
                    .text())
                .take()
            ).await?;
        manager.create_foreign_key(employee_fk(LeaveRecord::Table, LeaveRecord::EmployeeId)).await?;

        manager
            .create_table(audited_table_statement()
                .table(PayrollRecord::Table)
                .col(ColumnDef::new(PayrollRecord::EmployeeId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(PayrollRecord::Month)
                    .text()
                    .not_null()) // Always two digits, `01` to `12`
                .col(ColumnDef::new(PayrollRecord::Year)
                    .integer()
                    .not_null())
                .col(ColumnDef::new(PayrollRecord::Items)
                    .json_binary()
                    .not_null())
                .col(ColumnDef::new(PayrollRecord::BonusAmount)
                    .decimal_len(19, 2)
                    .not_null()
                    .default(0))
                .col(ColumnDef::new(PayrollRecord::DeductionAmount)
                    .decimal_len(19, 2)
                    .not_null()
                    .default(0))
                .col(ColumnDef::new(PayrollRecord::AdjustmentNote)
                    .text())
                .col(ColumnDef::new(PayrollRecord::TotalAmount)
                    .decimal_len(19, 2)
                    .not_null())
                .col(ColumnDef::new(PayrollRecord::Status)
                    .custom(PayrollStatus::name())
                    .not_null()
                    .default(Expr::val("generated").cast_as(PayrollStatus::name())))
                .take()
            ).await?;
        setup_audit_fk!(manager, PayrollRecord::Table);
        manager.create_foreign_key(employee_fk(PayrollRecord::Table, PayrollRecord::EmployeeId)).await?;

        // One record per employee and period, concurrent generation relies on it
        manager
            .create_index(Index::create()
                .name("idx_payroll_record_employee_period")
                .table(PayrollRecord::Table)
                .col(PayrollRecord::EmployeeId)
                .col(PayrollRecord::Month)
                .col(PayrollRecord::Year)
                .unique()
                .take()
            ).await?;

        manager
            .create_index(Index::create()
                .name("idx_leave_record_employee_dates")
                .table(LeaveRecord::Table)
                .col(LeaveRecord::EmployeeId)
                .col(LeaveRecord::StartDate)
                .col(LeaveRecord::EndDate)
                .take()
            ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [PayrollRecord::Table.into_iden(), LeaveRecord::Table.into_iden(), PayrollSetting::Table.into_iden(), Employee::Table.into_iden()] {
            manager
                .drop_table(TableDropStatement::new()
                    .table(table)
                    .take()
                ).await?;
        }

        for name in [PayrollStatus::name(), LeaveStatus::name(), LeaveType::name(), PaymentMethod::name(), PayrollType::name(), RoleType::name()] {
            manager
                .drop_type(TypeDropStatement::new()
                    .name(name)
                    .to_owned()
                ).await?;
        }

        Ok(())
    }
}

#[derive(Iden)]
pub(crate) enum Employee {
    Table,
    Username,
    Password,
    FullName,
    Role,
    Active,
}

#[derive(Iden)]
pub(crate) enum PayrollSetting {
    Table,
    EmployeeId,
    PayrollType,
    Description,
    Amount,
    PaymentMethod,
    IsActive,
    EffectiveFrom,
    EffectiveUntil,
}

#[derive(Iden)]
enum LeaveRecord {
    Table,
    EmployeeId,
    LeaveType,
    StartDate,
    EndDate,
    TotalDays,
    Status,
    Reason,
}

#[derive(Iden)]
enum PayrollRecord {
    Table,
    EmployeeId,
    Month,
    Year,
    Items,
    BonusAmount,
    DeductionAmount,
    AdjustmentNote,
    TotalAmount,
    Status,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "role_type")]
enum RoleType {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "employee")]
    Employee,
    #[sea_orm(string_value = "hr")]
    Hr,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payroll_type")]
enum PayrollType {
    #[sea_orm(string_value = "allowance")]
    Allowance,
    #[sea_orm(string_value = "bonus")]
    Bonus,
    #[sea_orm(string_value = "commission")]
    Commission,
    #[sea_orm(string_value = "other")]
    Other,
    #[sea_orm(string_value = "overtime")]
    Overtime,
    #[sea_orm(string_value = "primary")]
    Primary,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_method")]
enum PaymentMethod {
    #[sea_orm(string_value = "bank_transfer")]
    BankTransfer,
    #[sea_orm(string_value = "cash")]
    Cash,
    #[sea_orm(string_value = "cheque")]
    Cheque,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "leave_type")]
enum LeaveType {
    #[sea_orm(string_value = "annual")]
    Annual,
    #[sea_orm(string_value = "other")]
    Other,
    #[sea_orm(string_value = "sick")]
    Sick,
    #[sea_orm(string_value = "unpaid")]
    Unpaid,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "leave_status")]
enum LeaveStatus {
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payroll_status")]
enum PayrollStatus {
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    #[sea_orm(string_value = "generated")]
    Generated,
    #[sea_orm(string_value = "paid")]
    Paid,
}
