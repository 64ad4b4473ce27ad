use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar month of income statement and balance sheet data.
///
/// Records are read-only snapshots supplied by the record store. Every numeric
/// field defaults to zero when absent from the source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRecord {
    /// First day of the month this record covers.
    pub month: NaiveDate,

    // Income statement
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub cogs_total: f64,
    #[serde(default)]
    pub cogs_payroll: f64,
    #[serde(default)]
    pub cogs_owner_pay: f64,
    #[serde(default)]
    pub cogs_contractors: f64,
    #[serde(default)]
    pub cogs_materials: f64,
    #[serde(default)]
    pub cogs_commissions: f64,
    #[serde(default)]
    pub cogs_other: f64,

    // Operating expenses
    #[serde(default)]
    pub payroll: f64,
    #[serde(default)]
    pub owner_base_pay: f64,
    #[serde(default)]
    pub owners_retirement: f64,
    #[serde(default)]
    pub benefits: f64,
    #[serde(default)]
    pub insurance: f64,
    #[serde(default)]
    pub professional_fees: f64,
    #[serde(default)]
    pub subcontractors: f64,
    #[serde(default)]
    pub rent: f64,
    #[serde(default)]
    pub utilities: f64,
    #[serde(default)]
    pub tax_license: f64,
    #[serde(default)]
    pub phone_comm: f64,
    #[serde(default)]
    pub infrastructure: f64,
    #[serde(default)]
    pub auto_travel: f64,
    #[serde(default)]
    pub sales_expense: f64,
    #[serde(default)]
    pub marketing: f64,
    #[serde(default)]
    pub training_cert: f64,
    #[serde(default)]
    pub meals_entertainment: f64,
    #[serde(default)]
    pub interest_expense: f64,
    #[serde(default)]
    pub depreciation_amortization: f64,
    #[serde(default)]
    pub other_expense: f64,
    /// Total expense as reported by the accounting import, when present.
    /// Only the valuation path reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense: Option<f64>,
    #[serde(default)]
    pub state_income_taxes: f64,
    #[serde(default)]
    pub federal_income_taxes: f64,

    // Balance sheet: assets
    #[serde(default)]
    pub cash: f64,
    #[serde(default)]
    pub ar: f64,
    #[serde(default)]
    pub inventory: f64,
    #[serde(default, rename = "otherCA")]
    pub other_ca: f64,
    #[serde(default)]
    pub tca: f64,
    #[serde(default)]
    pub fixed_assets: f64,
    #[serde(default)]
    pub other_assets: f64,
    #[serde(default)]
    pub total_assets: f64,

    // Balance sheet: liabilities
    #[serde(default)]
    pub ap: f64,
    #[serde(default, rename = "otherCL")]
    pub other_cl: f64,
    #[serde(default)]
    pub tcl: f64,
    #[serde(default)]
    pub ltd: f64,
    #[serde(default)]
    pub total_liab: f64,

    // Balance sheet: equity
    #[serde(default)]
    pub owners_capital: f64,
    #[serde(default)]
    pub owners_draw: f64,
    #[serde(default)]
    pub common_stock: f64,
    #[serde(default)]
    pub preferred_stock: f64,
    #[serde(default)]
    pub retained_earnings: f64,
    #[serde(default)]
    pub additional_paid_in_capital: f64,
    #[serde(default)]
    pub treasury_stock: f64,
    #[serde(default)]
    pub total_equity: f64,
    #[serde(default, rename = "totalLAndE")]
    pub total_l_and_e: f64,
}

impl MonthlyRecord {
    /// An all-zero record for `month`.
    pub fn new(month: NaiveDate) -> Self {
        Self {
            month,
            revenue: 0.0,
            cogs_total: 0.0,
            cogs_payroll: 0.0,
            cogs_owner_pay: 0.0,
            cogs_contractors: 0.0,
            cogs_materials: 0.0,
            cogs_commissions: 0.0,
            cogs_other: 0.0,
            payroll: 0.0,
            owner_base_pay: 0.0,
            owners_retirement: 0.0,
            benefits: 0.0,
            insurance: 0.0,
            professional_fees: 0.0,
            subcontractors: 0.0,
            rent: 0.0,
            utilities: 0.0,
            tax_license: 0.0,
            phone_comm: 0.0,
            infrastructure: 0.0,
            auto_travel: 0.0,
            sales_expense: 0.0,
            marketing: 0.0,
            training_cert: 0.0,
            meals_entertainment: 0.0,
            interest_expense: 0.0,
            depreciation_amortization: 0.0,
            other_expense: 0.0,
            expense: None,
            state_income_taxes: 0.0,
            federal_income_taxes: 0.0,
            cash: 0.0,
            ar: 0.0,
            inventory: 0.0,
            other_ca: 0.0,
            tca: 0.0,
            fixed_assets: 0.0,
            other_assets: 0.0,
            total_assets: 0.0,
            ap: 0.0,
            other_cl: 0.0,
            tcl: 0.0,
            ltd: 0.0,
            total_liab: 0.0,
            owners_capital: 0.0,
            owners_draw: 0.0,
            common_stock: 0.0,
            preferred_stock: 0.0,
            retained_earnings: 0.0,
            additional_paid_in_capital: 0.0,
            treasury_stock: 0.0,
            total_equity: 0.0,
            total_l_and_e: 0.0,
        }
    }

    /// `total_assets - (total_liab + total_equity)`. Zero for a balanced sheet.
    pub fn balance_gap(&self) -> f64 {
        self.total_assets - (self.total_liab + self.total_equity)
    }
}

/// Ratio bundle derived from one month plus its trailing history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendDataPoint {
    pub month: NaiveDate,
    pub current_ratio: f64,
    pub quick_ratio: f64,
    pub debt_to_net_worth: f64,
    /// Percent
    pub roe: f64,
    /// Percent
    pub roa: f64,
    pub interest_coverage: f64,
    pub days_ar: f64,
    pub days_inventory: f64,
    pub days_ap: f64,
    pub total_asset_turnover: f64,
    /// Percent
    pub ebitda_margin: f64,
    /// 0 to 100, 50 is flat
    pub revenue_growth_score: f64,
}

/// Industry five-year average for a named ratio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmark {
    pub metric_name: String,
    pub five_year_value: f64,
}

/// Ratios that can be compared against an industry benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BenchmarkMetric {
    CurrentRatio,
    QuickRatio,
    DebtToNetWorth,
    ReturnOnEquity,
    ReturnOnAssets,
    TotalAssetTurnover,
}

impl BenchmarkMetric {
    pub const ALL: [BenchmarkMetric; 6] = [
        BenchmarkMetric::CurrentRatio,
        BenchmarkMetric::QuickRatio,
        BenchmarkMetric::DebtToNetWorth,
        BenchmarkMetric::ReturnOnEquity,
        BenchmarkMetric::ReturnOnAssets,
        BenchmarkMetric::TotalAssetTurnover,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BenchmarkMetric::CurrentRatio => "Current Ratio",
            BenchmarkMetric::QuickRatio => "Quick Ratio",
            BenchmarkMetric::DebtToNetWorth => "Debt to Net Worth",
            BenchmarkMetric::ReturnOnEquity => "Return on Equity",
            BenchmarkMetric::ReturnOnAssets => "Return on Assets",
            BenchmarkMetric::TotalAssetTurnover => "Total Asset Turnover",
        }
    }

    /// Lower values are healthier for leverage ratios.
    pub fn lower_is_better(&self) -> bool {
        matches!(self, BenchmarkMetric::DebtToNetWorth)
    }

    /// Match a provider metric name, ignoring case, spaces and punctuation.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "currentratio" => Some(BenchmarkMetric::CurrentRatio),
            "quickratio" | "acidtest" | "acidtestratio" => Some(BenchmarkMetric::QuickRatio),
            "debttonetworth" | "debtnetworth" | "debttonw" | "debtnw" => {
                Some(BenchmarkMetric::DebtToNetWorth)
            }
            "roe" | "returnonequity" => Some(BenchmarkMetric::ReturnOnEquity),
            "roa" | "returnonassets" => Some(BenchmarkMetric::ReturnOnAssets),
            "totalassetturnover" | "assetturnover" => Some(BenchmarkMetric::TotalAssetTurnover),
            _ => None,
        }
    }
}

/// Benchmarks keyed by the metrics this engine understands
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchmarkSet {
    benchmarks: Vec<Benchmark>,
}

impl BenchmarkSet {
    pub fn new(benchmarks: Vec<Benchmark>) -> Self {
        Self { benchmarks }
    }

    /// First benchmark whose name resolves to `metric`.
    pub fn get(&self, metric: BenchmarkMetric) -> Option<f64> {
        self.benchmarks
            .iter()
            .find(|b| BenchmarkMetric::from_name(&b.metric_name) == Some(metric))
            .map(|b| b.five_year_value)
    }

    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }

    pub fn as_slice(&self) -> &[Benchmark] {
        &self.benchmarks
    }
}

impl From<Vec<Benchmark>> for BenchmarkSet {
    fn from(benchmarks: Vec<Benchmark>) -> Self {
        Self::new(benchmarks)
    }
}

/// Narrative output. Order reflects rule evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MdaAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueCategory {
    Revenue,
    Expenses,
    Liquidity,
    Cash,
    Equity,
    Leverage,
}

impl IssueCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::Revenue => "Revenue",
            IssueCategory::Expenses => "Expenses",
            IssueCategory::Liquidity => "Liquidity",
            IssueCategory::Cash => "Cash",
            IssueCategory::Equity => "Equity",
            IssueCategory::Leverage => "Leverage",
        }
    }
}

/// Risk flag raised by the critical review scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalReviewIssue {
    pub category: IssueCategory,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<f64>,
}
