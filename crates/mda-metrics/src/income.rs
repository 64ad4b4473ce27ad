//! Income statement path: gross profit, operating expense total, pre-tax and
//! net income.
//!
//! Interest expense is an operating line item here. The valuation path in
//! [`crate::valuation`] treats it as a financing cost instead; the two are kept
//! apart so reported figures do not move.

use mda_core::stats::safe_div;
use mda_core::MonthlyRecord;
use serde::{Deserialize, Serialize};

use crate::TTM_MONTHS;

/// Fixed list of operating expense line items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpenseCategory {
    Payroll,
    OwnerBasePay,
    OwnersRetirement,
    ProfessionalFees,
    Rent,
    Utilities,
    Infrastructure,
    AutoTravel,
    Insurance,
    SalesExpense,
    Subcontractors,
    DepreciationAmortization,
    InterestExpense,
    Marketing,
    Benefits,
    TaxLicense,
    PhoneComm,
    TrainingCert,
    MealsEntertainment,
    OtherExpense,
}

impl ExpenseCategory {
    /// Every line item summed into total operating expense, in display order.
    pub const ALL: [ExpenseCategory; 20] = [
        ExpenseCategory::Payroll,
        ExpenseCategory::OwnerBasePay,
        ExpenseCategory::OwnersRetirement,
        ExpenseCategory::ProfessionalFees,
        ExpenseCategory::Rent,
        ExpenseCategory::Utilities,
        ExpenseCategory::Infrastructure,
        ExpenseCategory::AutoTravel,
        ExpenseCategory::Insurance,
        ExpenseCategory::SalesExpense,
        ExpenseCategory::Subcontractors,
        ExpenseCategory::DepreciationAmortization,
        ExpenseCategory::InterestExpense,
        ExpenseCategory::Marketing,
        ExpenseCategory::Benefits,
        ExpenseCategory::TaxLicense,
        ExpenseCategory::PhoneComm,
        ExpenseCategory::TrainingCert,
        ExpenseCategory::MealsEntertainment,
        ExpenseCategory::OtherExpense,
    ];

    /// The record field this category reads.
    pub fn amount(&self, record: &MonthlyRecord) -> f64 {
        match self {
            ExpenseCategory::Payroll => record.payroll,
            ExpenseCategory::OwnerBasePay => record.owner_base_pay,
            ExpenseCategory::OwnersRetirement => record.owners_retirement,
            ExpenseCategory::ProfessionalFees => record.professional_fees,
            ExpenseCategory::Rent => record.rent,
            ExpenseCategory::Utilities => record.utilities,
            ExpenseCategory::Infrastructure => record.infrastructure,
            ExpenseCategory::AutoTravel => record.auto_travel,
            ExpenseCategory::Insurance => record.insurance,
            ExpenseCategory::SalesExpense => record.sales_expense,
            ExpenseCategory::Subcontractors => record.subcontractors,
            ExpenseCategory::DepreciationAmortization => record.depreciation_amortization,
            ExpenseCategory::InterestExpense => record.interest_expense,
            ExpenseCategory::Marketing => record.marketing,
            ExpenseCategory::Benefits => record.benefits,
            ExpenseCategory::TaxLicense => record.tax_license,
            ExpenseCategory::PhoneComm => record.phone_comm,
            ExpenseCategory::TrainingCert => record.training_cert,
            ExpenseCategory::MealsEntertainment => record.meals_entertainment,
            ExpenseCategory::OtherExpense => record.other_expense,
        }
    }

    /// Field name in the imported record documents.
    pub fn key(&self) -> &'static str {
        match self {
            ExpenseCategory::Payroll => "payroll",
            ExpenseCategory::OwnerBasePay => "ownerBasePay",
            ExpenseCategory::OwnersRetirement => "ownersRetirement",
            ExpenseCategory::ProfessionalFees => "professionalFees",
            ExpenseCategory::Rent => "rent",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Infrastructure => "infrastructure",
            ExpenseCategory::AutoTravel => "autoTravel",
            ExpenseCategory::Insurance => "insurance",
            ExpenseCategory::SalesExpense => "salesExpense",
            ExpenseCategory::Subcontractors => "subcontractors",
            ExpenseCategory::DepreciationAmortization => "depreciationAmortization",
            ExpenseCategory::InterestExpense => "interestExpense",
            ExpenseCategory::Marketing => "marketing",
            ExpenseCategory::Benefits => "benefits",
            ExpenseCategory::TaxLicense => "taxLicense",
            ExpenseCategory::PhoneComm => "phoneComm",
            ExpenseCategory::TrainingCert => "trainingCert",
            ExpenseCategory::MealsEntertainment => "mealsEntertainment",
            ExpenseCategory::OtherExpense => "otherExpense",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Payroll => "Payroll",
            ExpenseCategory::OwnerBasePay => "Owner's Base Pay",
            ExpenseCategory::OwnersRetirement => "Owner's Retirement",
            ExpenseCategory::ProfessionalFees => "Professional Fees",
            ExpenseCategory::Rent => "Rent/Lease",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Infrastructure => "Infrastructure",
            ExpenseCategory::AutoTravel => "Auto & Travel",
            ExpenseCategory::Insurance => "Insurance",
            ExpenseCategory::SalesExpense => "Sales Expense",
            ExpenseCategory::Subcontractors => "Subcontractors",
            ExpenseCategory::DepreciationAmortization => "Depreciation & Amortization",
            ExpenseCategory::InterestExpense => "Interest Expense",
            ExpenseCategory::Marketing => "Marketing",
            ExpenseCategory::Benefits => "Benefits",
            ExpenseCategory::TaxLicense => "Tax & License",
            ExpenseCategory::PhoneComm => "Phone & Communications",
            ExpenseCategory::TrainingCert => "Training & Certification",
            ExpenseCategory::MealsEntertainment => "Meals & Entertainment",
            ExpenseCategory::OtherExpense => "Other Expense",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.key() == key)
    }
}

pub fn gross_profit(record: &MonthlyRecord) -> f64 {
    record.revenue - record.cogs_total
}

/// Sum of the fixed operating expense line items, interest included.
pub fn total_operating_expense(record: &MonthlyRecord) -> f64 {
    ExpenseCategory::ALL.iter().map(|c| c.amount(record)).sum()
}

/// COGS plus operating expense.
pub fn total_expenses(record: &MonthlyRecord) -> f64 {
    record.cogs_total + total_operating_expense(record)
}

pub fn income_before_tax(record: &MonthlyRecord) -> f64 {
    record.revenue - record.cogs_total - total_operating_expense(record)
}

pub fn net_income(record: &MonthlyRecord) -> f64 {
    income_before_tax(record) - record.state_income_taxes - record.federal_income_taxes
}

/// Income statement for one month or an aggregated window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub months: usize,
    pub revenue: f64,
    pub cogs_total: f64,
    pub gross_profit: f64,
    /// Percent of revenue
    pub gross_margin: f64,
    pub operating_expenses: Vec<(ExpenseCategory, f64)>,
    pub total_operating_expense: f64,
    pub income_before_tax: f64,
    pub income_taxes: f64,
    pub net_income: f64,
    /// Percent of revenue
    pub net_margin: f64,
}

impl IncomeStatement {
    pub fn for_month(record: &MonthlyRecord) -> Self {
        Self::aggregate(std::slice::from_ref(record))
    }

    /// Sum of the last `months` records (all of them when fewer exist).
    pub fn trailing(records: &[MonthlyRecord], months: usize) -> Self {
        Self::aggregate(crate::trailing(records, months))
    }

    /// Trailing twelve months.
    pub fn ttm(records: &[MonthlyRecord]) -> Self {
        Self::trailing(records, TTM_MONTHS)
    }

    fn aggregate(records: &[MonthlyRecord]) -> Self {
        let revenue: f64 = records.iter().map(|r| r.revenue).sum();
        let cogs_total: f64 = records.iter().map(|r| r.cogs_total).sum();
        let operating_expenses: Vec<(ExpenseCategory, f64)> = ExpenseCategory::ALL
            .iter()
            .map(|c| (*c, records.iter().map(|r| c.amount(r)).sum()))
            .collect();
        let total_operating_expense: f64 = records.iter().map(total_operating_expense).sum();
        let income_before_tax: f64 = records.iter().map(income_before_tax).sum();
        let income_taxes: f64 = records
            .iter()
            .map(|r| r.state_income_taxes + r.federal_income_taxes)
            .sum();
        let net_income: f64 = records.iter().map(net_income).sum();
        let gross_profit = revenue - cogs_total;

        Self {
            months: records.len(),
            revenue,
            cogs_total,
            gross_profit,
            gross_margin: safe_div(gross_profit, revenue) * 100.0,
            operating_expenses,
            total_operating_expense,
            income_before_tax,
            income_taxes,
            net_income,
            net_margin: safe_div(net_income, revenue) * 100.0,
        }
    }
}

/// Target spend for one expense category, as a percent of revenue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseGoal {
    pub category: ExpenseCategory,
    pub target_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseGoalStatus {
    pub category: ExpenseCategory,
    pub target_pct: f64,
    /// Trailing-twelve spend as a percent of trailing-twelve revenue
    pub actual_pct: f64,
    /// Actual minus target, in percentage points
    pub variance_pct: f64,
    pub over_goal: bool,
}

/// Compare trailing-twelve spend per category with its goal.
pub fn evaluate_expense_goals(records: &[MonthlyRecord], goals: &[ExpenseGoal]) -> Vec<ExpenseGoalStatus> {
    let window = crate::trailing(records, TTM_MONTHS);
    let revenue: f64 = window.iter().map(|r| r.revenue).sum();

    goals
        .iter()
        .map(|goal| {
            let spend: f64 = window.iter().map(|r| goal.category.amount(r)).sum();
            let actual_pct = safe_div(spend, revenue) * 100.0;
            let variance_pct = actual_pct - goal.target_pct;
            ExpenseGoalStatus {
                category: goal.category,
                target_pct: goal.target_pct,
                actual_pct,
                variance_pct,
                over_goal: variance_pct > 0.0,
            }
        })
        .collect()
}
