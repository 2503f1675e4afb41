/// Decimal places kept on every stored money amount
pub const MONEY_SCALE: u32 = 2;

/// Weekend days assumed per seven calendar days by the approximate working-day formula
pub const WEEKEND_DAYS_PER_WEEK: u32 = 2;
