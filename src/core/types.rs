use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Largest accepted monthly amount. Keeps every derived sum and percentage
/// finite; a year of twelve maxed-out months is still far from `f64::MAX`.
pub const MAX_AMOUNT: f64 = 1e15;

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Field {
    Income,
    Needs,
    Wants,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Income => "income",
            Field::Needs => "needs",
            Field::Wants => "wants",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejections raised while turning raw user input into [`MonthlyRecord`]s.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} must have exactly 12 monthly values, got {found}")]
    MonthCount { field: Field, found: usize },

    #[error("{field} for {month} must be >= 0, got {value}")]
    Negative {
        month: &'static str,
        field: Field,
        value: f64,
    },

    #[error("{field} for {month} must be <= {max}, got {value}", max = MAX_AMOUNT)]
    TooLarge {
        month: &'static str,
        field: Field,
        value: f64,
    },

    #[error("{field} for {month} must be a finite number")]
    NotFinite { month: &'static str, field: Field },

    #[error("{field} value #{position} is not a number: '{raw}'")]
    Parse {
        field: Field,
        position: usize,
        raw: String,
    },
}

/// One month of user input. Only constructed through [`MonthlyRecord::new`],
/// so every value is finite and within `0..=MAX_AMOUNT`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MonthlyRecord {
    income: f64,
    needs: f64,
    wants: f64,
}

impl MonthlyRecord {
    /// Validates one month; `month` is the label rejections refer to.
    pub fn new(
        month: &'static str,
        income: f64,
        needs: f64,
        wants: f64,
    ) -> Result<Self, InputError> {
        for (field, value) in [
            (Field::Income, income),
            (Field::Needs, needs),
            (Field::Wants, wants),
        ] {
            if !value.is_finite() {
                return Err(InputError::NotFinite { month, field });
            }
            if value < 0.0 {
                return Err(InputError::Negative {
                    month,
                    field,
                    value,
                });
            }
            if value > MAX_AMOUNT {
                return Err(InputError::TooLarge {
                    month,
                    field,
                    value,
                });
            }
        }
        Ok(Self {
            income,
            needs,
            wants,
        })
    }

    pub fn income(&self) -> f64 {
        self.income
    }

    pub fn needs(&self) -> f64 {
        self.needs
    }

    pub fn wants(&self) -> f64 {
        self.wants
    }
}

/// Builds the ordered Jan..Dec batch from three parallel columns.
pub fn records_from_columns(
    income: &[f64],
    needs: &[f64],
    wants: &[f64],
) -> Result<[MonthlyRecord; 12], InputError> {
    for (field, column) in [
        (Field::Income, income),
        (Field::Needs, needs),
        (Field::Wants, wants),
    ] {
        if column.len() != MONTHS.len() {
            return Err(InputError::MonthCount {
                field,
                found: column.len(),
            });
        }
    }

    let mut records = [MonthlyRecord::default(); 12];
    for (i, record) in records.iter_mut().enumerate() {
        *record = MonthlyRecord::new(MONTHS[i], income[i], needs[i], wants[i])?;
    }
    Ok(records)
}

/// Parses one comma-separated column such as `"1000, 1200,900"`.
/// Blank input yields an empty column, which the month count check rejects.
pub fn parse_column(field: Field, raw: &str) -> Result<Vec<f64>, InputError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',')
        .enumerate()
        .map(|(i, part)| {
            let part = part.trim();
            part.parse::<f64>().map_err(|_| InputError::Parse {
                field,
                position: i + 1,
                raw: part.to_string(),
            })
        })
        .collect()
}

/// Savings rate in percent. `Undefined` marks a month without income.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SavingsRate {
    Percent(f64),
    Undefined,
}

impl SavingsRate {
    pub fn percent(self) -> Option<f64> {
        match self {
            SavingsRate::Percent(v) => Some(v),
            SavingsRate::Undefined => None,
        }
    }
}

impl fmt::Display for SavingsRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SavingsRate::Percent(v) => write!(f, "{v:.2}"),
            SavingsRate::Undefined => f.write_str("N/A"),
        }
    }
}

impl Serialize for SavingsRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.percent().serialize(serializer)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Category {
    TooRisky,
    Safe,
    VeryGood,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::TooRisky => "Too Risky",
            Category::Safe => "Safe",
            Category::VeryGood => "Very Good",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MonthlyResult {
    pub month: &'static str,
    pub income: f64,
    pub needs: f64,
    pub wants: f64,
    pub leftover: f64,
    pub invested: f64,
    pub savings: f64,
    pub savings_rate: SavingsRate,
    pub category: Category,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyTotals {
    pub needs: f64,
    pub wants: f64,
    pub invested: f64,
    pub savings: f64,
}

impl YearlyTotals {
    pub fn total(&self) -> f64 {
        self.needs + self.wants + self.invested + self.savings
    }
}
