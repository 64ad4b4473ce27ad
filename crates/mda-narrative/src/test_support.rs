use chrono::{Months, NaiveDate};
use mda_core::{MonthlyRecord, TrendDataPoint};

/// `n` consecutive months starting January 2022, each shaped by `f(index, record)`.
pub fn series(n: usize, f: impl Fn(usize, &mut MonthlyRecord)) -> Vec<MonthlyRecord> {
    let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    (0..n)
        .map(|i| {
            let mut record = MonthlyRecord::new(start + Months::new(i as u32));
            f(i, &mut record);
            record
        })
        .collect()
}

/// A profitable, liquid company with a balanced sheet.
pub fn healthy(i: usize, r: &mut MonthlyRecord) {
    r.revenue = 100_000.0 + 1_000.0 * i as f64;
    r.cogs_total = 55_000.0;
    r.payroll = 15_000.0;
    r.rent = 5_000.0;
    r.interest_expense = 1_000.0;
    r.depreciation_amortization = 500.0;
    r.cash = 80_000.0 + 2_000.0 * i as f64;
    r.ar = 60_000.0;
    r.inventory = 40_000.0;
    r.tca = 180_000.0 + 2_000.0 * i as f64;
    r.tcl = 60_000.0;
    r.ap = 20_000.0;
    r.fixed_assets = 300_000.0;
    r.total_assets = 480_000.0 + 2_000.0 * i as f64;
    r.total_liab = 160_000.0;
    r.total_equity = 320_000.0 + 2_000.0 * i as f64;
}

/// A trend point with every ratio at zero and a neutral growth score.
pub fn blank_point(month: NaiveDate) -> TrendDataPoint {
    TrendDataPoint {
        month,
        current_ratio: 0.0,
        quick_ratio: 0.0,
        debt_to_net_worth: 0.0,
        roe: 0.0,
        roa: 0.0,
        interest_coverage: 0.0,
        days_ar: 0.0,
        days_inventory: 0.0,
        days_ap: 0.0,
        total_asset_turnover: 0.0,
        ebitda_margin: 0.0,
        revenue_growth_score: 50.0,
    }
}
