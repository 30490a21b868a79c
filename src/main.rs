//! Webshop Analyzer CLI
//!
//! Reads the customer and payment sources, then writes the customer,
//! webshop and top customers reports. Rejected lines are logged and never
//! stop the run.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --customers customer.csv --payments payments.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use clap::Parser;
use env_logger::{Env, Target};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use webshop_analyzer::config::{
    DEFAULT_CUSTOMERS, DEFAULT_CUSTOMER_REPORT, DEFAULT_PAYMENTS, DEFAULT_TOP_COUNT,
    DEFAULT_TOP_REPORT, DEFAULT_WEBSHOP_REPORT,
};
use webshop_analyzer::{Config, LogSink, WebshopAnalyzer};

#[derive(Parser, Debug)]
#[command(
    name = "webshop-analyzer",
    version,
    about = "Aggregate webshop payments into summary reports"
)]
struct Cli {
    /// Customer source: webshopId;customerId;name;address
    #[arg(long, default_value = DEFAULT_CUSTOMERS)]
    customers: PathBuf,

    /// Payment source: webshopId;customerId;method;amount;bankAccount;cardNumber;date
    #[arg(long, default_value = DEFAULT_PAYMENTS)]
    payments: PathBuf,

    /// Customer report destination
    #[arg(long, default_value = DEFAULT_CUSTOMER_REPORT)]
    customer_report: PathBuf,

    /// Webshop report destination
    #[arg(long, default_value = DEFAULT_WEBSHOP_REPORT)]
    webshop_report: PathBuf,

    /// Top customers report destination
    #[arg(long, default_value = DEFAULT_TOP_REPORT)]
    top_report: PathBuf,

    /// Number of customers in the top customers report
    #[arg(long = "top", default_value_t = DEFAULT_TOP_COUNT)]
    top_count: usize,

    /// Append log output to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            customers: self.customers.clone(),
            payments: self.payments.clone(),
            customer_report: self.customer_report.clone(),
            webshop_report: self.webshop_report.clone(),
            top_report: self.top_report.clone(),
            top_count: self.top_count,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref());

    let config = cli.config();
    WebshopAnalyzer::new().run(&config, &mut LogSink);
}

fn init_logging(log_file: Option<&Path>) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));

    if let Some(path) = log_file {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Error: cannot open log file {}: {}", path.display(), e),
        }
    }

    builder.init();
}
