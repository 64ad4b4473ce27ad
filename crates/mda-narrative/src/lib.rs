//! MD&A narrative generation.
//!
//! Turns the derived metrics of a monthly series into categorised statements
//! (strengths, weaknesses, insights), a severity-tagged critical review and the
//! fixed report sections.

pub mod context;
pub mod report;
pub mod review;
pub mod rules;
pub mod sections;
#[cfg(test)]
pub(crate) mod test_support;

pub use context::NarrativeContext;
pub use report::{generate_report, MdaReport};
pub use review::critical_review;
pub use rules::{generate_analysis, Finding, FindingKind, Rule, RULES};
pub use sections::ReportSections;
