use chrono::{Months, NaiveDate};
use mda_core::MonthlyRecord;

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
