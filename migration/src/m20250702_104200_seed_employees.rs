use sea_orm_migration::prelude::*;
use sha2::Digest as _;

use crate::m20250701_091500_init::{Employee, PayrollSetting};

const EMPLOYEE_COUNT: u128 = 50;
const ADMIN_ID: u128 = 12345;
const HR_ID: u128 = 12346;

fn seeded_id(i: u128) -> SimpleExpr {
    Expr::val(format!("{i:032x}")).cast_as("uuid")
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let time = Expr::val("2025-07-02T10:42:00.000Z").cast_as("timestamptz");

        // Employees log in with their username as password, e.g. `7:7`
        for i in 1..=EMPLOYEE_COUNT {
            let username = i.to_string();
            let hashed_password = &sha2::Sha256::digest(format!("{username}:{username}"))[..];
            let salary = rand::random_range(5_000_000..=20_000_000);

            manager
                .exec_stmt(Query::insert()
                    .into_table(Employee::Table)
                    .columns(["id", "created_at", "updated_at", "username", "password", "full_name", "role", "active"])
                    .values_panic([seeded_id(i), time.clone(), time.clone(), username.clone().into(), hashed_password.into(), format!("Employee {username}").into(), Expr::val("employee").cast_as("role_type"), true.into()])
                    .to_owned()
            ).await?;

            manager
                .exec_stmt(Query::insert()
                    .into_table(PayrollSetting::Table)
                    .columns(["created_at", "updated_at", "employee_id", "payroll_type", "description", "amount", "payment_method", "is_active", "effective_from"])
                    .values_panic([time.clone(), time.clone(), seeded_id(i), Expr::val("primary").cast_as("payroll_type"), "Base salary".into(), salary.into(), Expr::val("bank_transfer").cast_as("payment_method"), true.into(), Expr::val("2025-01-01").cast_as("date")])
                    .to_owned()
            ).await?;

            // Every fifth employee also gets a fixed allowance
            if i % 5 == 0 {
                manager
                    .exec_stmt(Query::insert()
                        .into_table(PayrollSetting::Table)
                        .columns(["created_at", "updated_at", "employee_id", "payroll_type", "description", "amount", "payment_method", "is_active", "effective_from"])
                        .values_panic([time.clone(), time.clone(), seeded_id(i), Expr::val("allowance").cast_as("payroll_type"), "Transport allowance".into(), 500_000.into(), Expr::val("cash").cast_as("payment_method"), true.into(), Expr::val("2025-01-01").cast_as("date")])
                        .to_owned()
                ).await?;
            }
        }

        for (id, username, full_name, role) in [(ADMIN_ID, "admin", "Administrator", "admin"), (HR_ID, "hr", "Human Resources", "hr")] {
            let hashed_password = &sha2::Sha256::digest(format!("{username}:{username}"))[..];

            manager
                .exec_stmt(Query::insert()
                    .into_table(Employee::Table)
                    .columns(["id", "created_at", "updated_at", "username", "password", "full_name", "role", "active"])
                    .values_panic([seeded_id(id), time.clone(), time.clone(), username.into(), hashed_password.into(), full_name.into(), Expr::val(role).cast_as("role_type"), true.into()])
                    .to_owned()
            ).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Settings go with their employee through the cascading foreign key
        for id in (1..=EMPLOYEE_COUNT).chain([ADMIN_ID, HR_ID]) {
            manager
                .exec_stmt(Query::delete()
                    .from_table(Employee::Table)
                    .and_where(Expr::col("id").eq(seeded_id(id)))
                    .to_owned()
            ).await?;
        }

        Ok(())
    }
}
