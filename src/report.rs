//! Report generators.
//!
//! Every report is a read-only projection of the final registries, written as
//! `;`-separated lines without a header and without quoting.

use crate::error::Result;
use crate::model::{Customer, Registry, Webshop};
use crate::record::DELIMITER;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use std::cmp::Reverse;
use std::fmt;
use std::io::Write;

/// The three reports produced by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// `name;address;totalAmount` for every customer.
    Customers,

    /// `webshopId;cardTotal;transferTotal` for every webshop.
    Webshops,

    /// The customers with the highest totals, highest first.
    TopCustomers,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [
        ReportKind::Customers,
        ReportKind::Webshops,
        ReportKind::TopCustomers,
    ];
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportKind::Customers => "customer report",
            ReportKind::Webshops => "webshop report",
            ReportKind::TopCustomers => "top customers report",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Serialize)]
struct CustomerRow<'a> {
    name: &'a str,
    address: &'a str,
    total_amount: i64,
}

impl<'a> From<&'a Customer> for CustomerRow<'a> {
    fn from(customer: &'a Customer) -> Self {
        CustomerRow {
            name: &customer.name,
            address: &customer.address,
            total_amount: customer.total_amount,
        }
    }
}

#[derive(Debug, Serialize)]
struct WebshopRow<'a> {
    webshop_id: &'a str,
    card_total: i64,
    transfer_total: i64,
}

fn report_writer<W: Write>(writer: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer)
}

/// Writes one line per customer, in the order given. Returns the line count.
pub fn write_customers<'a, W, I>(customers: I, writer: W) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Customer>,
{
    let mut csv_writer = report_writer(writer);
    let mut rows = 0;

    for customer in customers {
        csv_writer.serialize(CustomerRow::from(customer))?;
        rows += 1;
    }

    csv_writer.flush()?;
    Ok(rows)
}

/// Writes one line per webshop, in registry order. Returns the line count.
pub fn write_webshops<W: Write>(webshops: &Registry<Webshop>, writer: W) -> Result<usize> {
    let mut csv_writer = report_writer(writer);

    for webshop in webshops.values() {
        csv_writer.serialize(WebshopRow {
            webshop_id: &webshop.webshop_id,
            card_total: webshop.card_total,
            transfer_total: webshop.transfer_total,
        })?;
    }

    csv_writer.flush()?;
    Ok(webshops.len())
}

/// Returns the `count` customers with the highest totals, highest first.
///
/// The sort is stable: customers with equal totals keep registry order.
pub fn top_customers(customers: &Registry<Customer>, count: usize) -> Vec<&Customer> {
    let mut sorted: Vec<&Customer> = customers.values().collect();
    sorted.sort_by_key(|customer| Reverse(customer.total_amount));
    sorted.truncate(count);
    sorted
}

/// Writes the top customers report. Returns the line count.
pub fn write_top_customers<W: Write>(
    customers: &Registry<Customer>,
    count: usize,
    writer: W,
) -> Result<usize> {
    write_customers(top_customers(customers, count), writer)
}
