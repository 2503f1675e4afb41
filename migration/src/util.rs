use sea_orm_migration::prelude::*;

pub(crate) fn default_table_statement() -> TableCreateStatement {
    TableCreateStatement::new()
        .if_not_exists()
        .col(ColumnDef::new(DefaultColumn::Id)
            .uuid()
            .primary_key()
            .default(Expr::cust("GEN_RANDOM_UUID()"))
            .take())
        .col(ColumnDef::new(DefaultColumn::CreatedAt)
            .timestamp_with_time_zone()
            .not_null()
            .default(Expr::current_timestamp())
            .take())
        .col(ColumnDef::new(DefaultColumn::UpdatedAt)
            .timestamp_with_time_zone()
            .not_null()
            .default(Expr::current_timestamp())
            .take())
        .take()
}

#[derive(DeriveIden)]
pub(crate) enum DefaultColumn {
    Id,
    CreatedAt,
    UpdatedAt,
}

/// Adds `created_by` / `updated_by`, run `setup_audit_fk` on the table afterwards
///
/// # Example
///
/// ```rs
/// manager
///     .create_table(audited_table_statement()
///         .table(PayrollRecord::Table)
///         .col(ColumnDef::new(PayrollRecord::Month)
///             .text()
///             .not_null())
///         .take()
///     ).await?;
/// setup_audit_fk!(manager, PayrollRecord::Table);
/// ```
pub(crate) fn audited_table_statement() -> TableCreateStatement {
    default_table_statement()
        .col(ColumnDef::new(AuditColumn::CreatedBy)
            .uuid())
        .col(ColumnDef::new(AuditColumn::UpdatedBy)
            .uuid())
        .take()
}

/// Points a table's `employee_id` at the employee it belongs to
pub(crate) fn employee_fk(table: impl IntoIden, column: impl IntoIden) -> ForeignKeyCreateStatement {
    use crate::m20250701_091500_init::Employee;

    ForeignKeyCreateStatement::new()
        .from(table, column)
        .to(Employee::Table, DefaultColumn::Id)
        .on_delete(ForeignKeyAction::Cascade)
        .on_update(ForeignKeyAction::Cascade)
        .take()
}

#[macro_export]
macro_rules! setup_audit_fk {
    ($m:expr,$t:expr) => {{
        use crate::util::*;
        use crate::m20250701_091500_init::Employee;

        $m.create_foreign_key(ForeignKeyCreateStatement::new()
                .from($t, AuditColumn::CreatedBy)
                .to(Employee::Table, DefaultColumn::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .on_update(ForeignKeyAction::Cascade)
                .take()
        ).await?;

        $m.create_foreign_key(ForeignKeyCreateStatement::new()
                .from($t, AuditColumn::UpdatedBy)
                .to(Employee::Table, DefaultColumn::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .on_update(ForeignKeyAction::Cascade)
                .take()
        ).await?;
    }};
}

#[derive(DeriveIden)]
pub(crate) enum AuditColumn {
    CreatedBy,
    UpdatedBy,
}
