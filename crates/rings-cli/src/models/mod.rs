pub mod summary;

pub use summary::{
    ActivitySummaryRecord, CountUnit, DateComponents, DurationUnit, EnergyUnit, Quantity,
    RawDailySummary,
};
