//! Input and output locations for a run.

use crate::report::ReportKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_CUSTOMERS: &str = "customer.csv";
pub const DEFAULT_PAYMENTS: &str = "payments.csv";
pub const DEFAULT_CUSTOMER_REPORT: &str = "report01.csv";
pub const DEFAULT_WEBSHOP_REPORT: &str = "report02.csv";
pub const DEFAULT_TOP_REPORT: &str = "top.csv";
pub const DEFAULT_TOP_COUNT: usize = 2;

/// Where to read the sources from and where to write each report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub customers: PathBuf,
    pub payments: PathBuf,
    pub customer_report: PathBuf,
    pub webshop_report: PathBuf,
    pub top_report: PathBuf,

    /// How many customers the top report lists.
    pub top_count: usize,
}

impl Config {
    /// Resolves every default file name against `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Config {
            customers: dir.join(DEFAULT_CUSTOMERS),
            payments: dir.join(DEFAULT_PAYMENTS),
            customer_report: dir.join(DEFAULT_CUSTOMER_REPORT),
            webshop_report: dir.join(DEFAULT_WEBSHOP_REPORT),
            top_report: dir.join(DEFAULT_TOP_REPORT),
            top_count: DEFAULT_TOP_COUNT,
        }
    }

    /// Destination of the given report.
    pub fn report_path(&self, kind: ReportKind) -> &Path {
        match kind {
            ReportKind::Customers => &self.customer_report,
            ReportKind::Webshops => &self.webshop_report,
            ReportKind::TopCustomers => &self.top_report,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            customers: PathBuf::from(DEFAULT_CUSTOMERS),
            payments: PathBuf::from(DEFAULT_PAYMENTS),
            customer_report: PathBuf::from(DEFAULT_CUSTOMER_REPORT),
            webshop_report: PathBuf::from(DEFAULT_WEBSHOP_REPORT),
            top_report: PathBuf::from(DEFAULT_TOP_REPORT),
            top_count: DEFAULT_TOP_COUNT,
        }
    }
}
