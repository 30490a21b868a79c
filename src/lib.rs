//! # Webshop Analyzer
//!
//! A batch processor that reads customer and payment records, aggregates
//! payment totals per customer and per webshop, and writes three reports.
//!
//! ## Design Principles
//!
//! - **Never abort on bad input**: every rejected line becomes a [`Diagnostic`]
//! - **Explicit state**: registries live in a [`WebshopAnalyzer`] value
//! - **Injected diagnostics**: callers choose the [`DiagnosticSink`]
//! - **Deterministic output**: reports follow first-seen order, the top
//!   customers report uses a stable sort
//!
//! ## Example
//!
//! ```no_run
//! use std::io::Cursor;
//! use webshop_analyzer::{Config, Diagnostic, ReportKind, WebshopAnalyzer};
//!
//! let mut analyzer = WebshopAnalyzer::new();
//! let mut diagnostics: Vec<Diagnostic> = Vec::new();
//! analyzer.ingest_customers(Cursor::new("S1;C1;Alice;Addr1\n"), &mut diagnostics).unwrap();
//! analyzer.ingest_payments(Cursor::new("S1;C1;card;100;;4111;2024-01-01\n"), &mut diagnostics).unwrap();
//! analyzer.write_report(ReportKind::Customers, &Config::default(), std::io::stdout()).unwrap();
//! ```

pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod model;
pub mod record;
pub mod report;

pub use config::Config;
pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink};
pub use engine::{IngestSummary, WebshopAnalyzer};
pub use error::{EngineError, RecordError, Result};
pub use model::{Customer, Registry, Webshop};
pub use record::{CustomerRecord, PaymentMethod, PaymentRecord};
pub use report::ReportKind;
