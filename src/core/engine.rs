use super::types::{
    Category, MONTHS, MonthlyRecord, MonthlyResult, SavingsRate, YearlyTotals,
};

const INVESTED_SHARE: f64 = 0.5;
const SAFE_RATE_MIN: f64 = 10.0;
const SAFE_RATE_MAX: f64 = 30.0;

#[derive(Debug, Clone, Copy)]
struct Allocation {
    invested: f64,
    savings: f64,
}

impl Allocation {
    fn total(self) -> f64 {
        self.invested + self.savings
    }
}

fn allocate_leftover(leftover: f64) -> Allocation {
    if leftover > 0.0 {
        let invested = (leftover * INVESTED_SHARE).trunc();
        Allocation {
            invested,
            savings: leftover - invested,
        }
    } else {
        Allocation {
            invested: 0.0,
            savings: 0.0,
        }
    }
}

// Multiply before dividing: 300 of 1000 must land on 30.0 exactly, not
// 30.000000000000004, or the closed thresholds misclassify it.
fn savings_rate(allocation: Allocation, income: f64) -> SavingsRate {
    if income == 0.0 {
        SavingsRate::Undefined
    } else {
        SavingsRate::Percent(allocation.total() * 100.0 / income)
    }
}

pub fn categorize(rate: SavingsRate) -> Category {
    match rate {
        SavingsRate::Undefined => Category::TooRisky,
        SavingsRate::Percent(r) if r < SAFE_RATE_MIN => Category::TooRisky,
        SavingsRate::Percent(r) if r <= SAFE_RATE_MAX => Category::Safe,
        SavingsRate::Percent(_) => Category::VeryGood,
    }
}

pub fn allocate_month(month: &'static str, record: &MonthlyRecord) -> MonthlyResult {
    let income = record.income();
    let needs = record.needs();
    let wants = record.wants();
    let leftover = income - needs - wants;
    let allocation = allocate_leftover(leftover);
    let rate = savings_rate(allocation, income);

    MonthlyResult {
        month,
        income,
        needs,
        wants,
        leftover,
        invested: allocation.invested,
        savings: allocation.savings,
        savings_rate: rate,
        category: categorize(rate),
    }
}

/// Runs the allocation for a full Jan..Dec batch. Months are independent and
/// keep their input order.
pub fn run_allocation(records: &[MonthlyRecord; 12]) -> [MonthlyResult; 12] {
    std::array::from_fn(|i| allocate_month(MONTHS[i], &records[i]))
}

pub fn yearly_totals(results: &[MonthlyResult]) -> YearlyTotals {
    results
        .iter()
        .fold(YearlyTotals::default(), |acc, month| YearlyTotals {
            needs: acc.needs + month.needs,
            wants: acc.wants + month.wants,
            invested: acc.invested + month.invested,
            savings: acc.savings + month.savings,
        })
}
