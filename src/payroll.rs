pub mod generator;
pub mod lifecycle;
pub mod period;
pub mod proration;
