//! Ingestion pipeline and run driver.
//!
//! Customers are loaded first and establish the set of webshops; payments are
//! then applied on top of them. Every rejected line becomes a diagnostic and
//! processing carries on with the next line. A source that cannot be read at
//! all is reported once and contributes nothing.

use crate::config::Config;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{RecordError, Result};
use crate::model::{Customer, Registry, Webshop};
use crate::record::{split_line, CustomerRecord, PaymentRecord};
use crate::report::{self, ReportKind};
use csv::StringRecord;
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

/// Outcome of one ingestion phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Lines that updated the registries.
    pub accepted: usize,

    /// Lines that produced a diagnostic.
    pub rejected: usize,
}

/// Customer and webshop registries plus the operations that fill them.
///
/// # Partial updates
///
/// A payment whose customer exists but whose webshop does not is still added
/// to the customer's total before the missing webshop is reported. The two
/// aggregates are never reconciled against each other.
#[derive(Debug, Clone)]
pub struct WebshopAnalyzer {
    customers: Registry<Customer>,
    webshops: Registry<Webshop>,
}

impl WebshopAnalyzer {
    /// Creates an analyzer with empty registries.
    pub fn new() -> Self {
        WebshopAnalyzer {
            customers: Registry::new(),
            webshops: Registry::new(),
        }
    }

    pub fn customers(&self) -> &Registry<Customer> {
        &self.customers
    }

    pub fn webshops(&self) -> &Registry<Webshop> {
        &self.webshops
    }

    pub fn customer(&self, customer_id: &str) -> Option<&Customer> {
        self.customers.get(customer_id)
    }

    pub fn webshop(&self, webshop_id: &str) -> Option<&Webshop> {
        self.webshops.get(webshop_id)
    }

    /// Runs both phases and writes every report to the paths in `config`.
    ///
    /// Nothing here fails: unreadable sources and unwritable reports are
    /// turned into diagnostics and the remaining steps still run.
    pub fn run<S: DiagnosticSink>(&mut self, config: &Config, sink: &mut S) {
        if let Err(e) = self.load_customers(&config.customers, sink) {
            sink.record(Diagnostic::general(format!(
                "error reading customers from {}: {}",
                config.customers.display(),
                e
            )));
        }

        if let Err(e) = self.load_payments(&config.payments, sink) {
            sink.record(Diagnostic::general(format!(
                "error reading payments from {}: {}",
                config.payments.display(),
                e
            )));
        }

        for kind in ReportKind::ALL {
            let path = config.report_path(kind);
            match self.generate_report(kind, config) {
                Ok(rows) => info!("Wrote {} ({} lines) to {}", kind, rows, path.display()),
                Err(e) => sink.record(Diagnostic::general(format!(
                    "error generating {} at {}: {}",
                    kind,
                    path.display(),
                    e
                ))),
            }
        }
    }

    /// Opens the customer source at `path` and ingests it.
    pub fn load_customers<P, S>(&mut self, path: P, sink: &mut S) -> Result<IngestSummary>
    where
        P: AsRef<Path>,
        S: DiagnosticSink,
    {
        let file = File::open(path)?;
        self.ingest_customers(file, sink)
    }

    /// Opens the payment source at `path` and ingests it.
    pub fn load_payments<P, S>(&mut self, path: P, sink: &mut S) -> Result<IngestSummary>
    where
        P: AsRef<Path>,
        S: DiagnosticSink,
    {
        let file = File::open(path)?;
        self.ingest_payments(file, sink)
    }

    /// Reads customer lines, upserting customers and creating their webshops.
    pub fn ingest_customers<R, S>(&mut self, reader: R, sink: &mut S) -> Result<IngestSummary>
    where
        R: Read,
        S: DiagnosticSink,
    {
        let summary = ingest(reader, sink, Source::Customers, |record, line| {
            let customer = CustomerRecord::from_record(record)?;
            self.apply_customer(customer, line);
            Ok(())
        })?;

        info!(
            "Customers: {} accepted, {} rejected",
            summary.accepted, summary.rejected
        );
        Ok(summary)
    }

    /// Reads payment lines and adds them to customer and webshop totals.
    pub fn ingest_payments<R, S>(&mut self, reader: R, sink: &mut S) -> Result<IngestSummary>
    where
        R: Read,
        S: DiagnosticSink,
    {
        let summary = ingest(reader, sink, Source::Payments, |record, line| {
            self.apply_payment(record, line)
        })?;

        info!(
            "Payments: {} accepted, {} rejected",
            summary.accepted, summary.rejected
        );
        Ok(summary)
    }

    /// Last write for a customer id wins; an existing webshop is left alone.
    fn apply_customer(&mut self, record: CustomerRecord, line: usize) {
        self.webshops
            .entry(record.webshop_id.clone())
            .or_insert_with(|| Webshop::new(record.webshop_id.clone()));

        debug!(
            "Line {}: Loaded customer {} for webshop {}",
            line, record.customer_id, record.webshop_id
        );
        self.customers
            .insert(record.customer_id.clone(), Customer::new(record));
    }

    fn apply_payment(
        &mut self,
        record: &StringRecord,
        line: usize,
    ) -> std::result::Result<(), RecordError> {
        let payment = PaymentRecord::from_record(record)?;
        let method = payment.method()?;

        let customer = self
            .customers
            .get_mut(&payment.customer_id)
            .ok_or_else(|| RecordError::CustomerNotFound(payment.customer_id.clone()))?;
        customer.add_amount(payment.amount);

        // The customer total stays updated even if the webshop is missing.
        let webshop = self
            .webshops
            .get_mut(&payment.webshop_id)
            .ok_or_else(|| RecordError::WebshopNotFound(payment.webshop_id.clone()))?;
        webshop.add_amount(method, payment.amount);

        debug!(
            "Line {}: Applied {} payment of {} from customer {} to webshop {}",
            line,
            method.as_str(),
            payment.amount,
            payment.customer_id,
            payment.webshop_id
        );
        Ok(())
    }

    /// Writes one report to `writer`. Returns the number of lines written.
    ///
    /// Only the top customers report reads `config`, for its `top_count`.
    pub fn write_report<W: Write>(
        &self,
        kind: ReportKind,
        config: &Config,
        writer: W,
    ) -> Result<usize> {
        match kind {
            ReportKind::Customers => report::write_customers(self.customers.values(), writer),
            ReportKind::Webshops => report::write_webshops(&self.webshops, writer),
            ReportKind::TopCustomers => {
                report::write_top_customers(&self.customers, config.top_count, writer)
            }
        }
    }

    /// Creates (or truncates) the report file named by `config` and writes it.
    pub fn generate_report(&self, kind: ReportKind, config: &Config) -> Result<usize> {
        let file = File::create(config.report_path(kind))?;
        self.write_report(kind, config, file)
    }
}

impl Default for WebshopAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Which source a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Customers,
    Payments,
}

impl Source {
    /// Diagnostic message for a line of this source rejected with `error`.
    fn describe(self, error: &RecordError) -> String {
        match (self, error) {
            (Source::Customers, _) => format!("invalid customer data: {}", error),
            (
                Source::Payments,
                RecordError::InvalidPaymentMethod(_)
                | RecordError::CustomerNotFound(_)
                | RecordError::WebshopNotFound(_),
            ) => error.to_string(),
            (Source::Payments, _) => format!("invalid payment data: {}", error),
        }
    }
}

/// Drives `apply` over every line of a `;`-separated source.
///
/// A line `apply` rejects is turned into a diagnostic worded for `source`.
/// Lines that are not valid UTF-8 are rejected without reaching `apply`. Only
/// an I/O failure of the underlying reader stops the loop.
fn ingest<R, S, F>(reader: R, sink: &mut S, source: Source, mut apply: F) -> Result<IngestSummary>
where
    R: Read,
    S: DiagnosticSink,
    F: FnMut(&StringRecord, usize) -> std::result::Result<(), RecordError>,
{
    let mut summary = IngestSummary::default();

    for (index, bytes) in BufReader::new(reader).split(b'\n').enumerate() {
        let line = index + 1;
        let mut bytes = bytes?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }

        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                summary.rejected += 1;
                let message = source.describe(&RecordError::Malformed(e.utf8_error().to_string()));
                let raw = String::from_utf8_lossy(e.as_bytes()).into_owned();
                sink.record(Diagnostic::line(line, raw, message));
                continue;
            }
        };

        match apply(&split_line(&text), line) {
            Ok(()) => summary.accepted += 1,
            Err(error) => {
                summary.rejected += 1;
                sink.record(Diagnostic::line(line, text, source.describe(&error)));
            }
        }
    }

    Ok(summary)
}
