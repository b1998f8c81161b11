mod engine;
mod types;

pub use engine::{allocate_month, categorize, run_allocation, yearly_totals};
pub use types::{
    Category, Field, InputError, MAX_AMOUNT, MONTHS, MonthlyRecord, MonthlyResult, SavingsRate,
    YearlyTotals, parse_column, records_from_columns,
};
