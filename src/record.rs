//! Record parsers for the customer and payment sources.
//!
//! Lines are split verbatim on [`DELIMITER`]: no trimming, no quoting and no
//! escaping, so a field can never contain the delimiter itself.

use crate::error::RecordError;
use csv::StringRecord;
use std::str::FromStr;

/// Field delimiter shared by inputs and reports.
pub const DELIMITER: u8 = b';';

/// Number of fields in a customer line.
pub const CUSTOMER_FIELDS: usize = 4;

/// Number of fields in a payment line.
pub const PAYMENT_FIELDS: usize = 7;

/// Splits a raw line into fields.
///
/// Empty fields between delimiters are kept but trailing empty fields are
/// dropped, so `a;b;` has two fields. A line without any delimiter is always
/// a single field, even when it is empty.
pub fn split_line(line: &str) -> StringRecord {
    let mut fields: Vec<&str> = line.split(char::from(DELIMITER)).collect();
    if fields.len() > 1 {
        while fields.last() == Some(&"") {
            fields.pop();
        }
    }
    fields.into_iter().collect()
}

fn expect_fields(record: &StringRecord, expected: usize) -> Result<(), RecordError> {
    if record.len() != expected {
        return Err(RecordError::FieldCount {
            expected,
            found: record.len(),
        });
    }
    Ok(())
}

/// One line of the customer source:
/// `webshopId;customerId;name;address`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    pub webshop_id: String,
    pub customer_id: String,
    pub name: String,
    pub address: String,
}

impl CustomerRecord {
    /// Builds a customer from an already split record.
    pub fn from_record(record: &StringRecord) -> Result<Self, RecordError> {
        expect_fields(record, CUSTOMER_FIELDS)?;

        Ok(CustomerRecord {
            webshop_id: record[0].to_string(),
            customer_id: record[1].to_string(),
            name: record[2].to_string(),
            address: record[3].to_string(),
        })
    }
}

impl FromStr for CustomerRecord {
    type Err = RecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        Self::from_record(&split_line(line))
    }
}

/// Accepted payment methods. Matching is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Card,
    Transfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
        }
    }
}

/// One line of the payment source:
/// `webshopId;customerId;paymentMethod;amount;bankAccount;cardNumber;paymentDate`.
///
/// Parsing only checks the field count and the amount. The payment method is
/// kept verbatim and checked by [`PaymentRecord::method`], so that a bad amount
/// is reported before a bad method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    pub webshop_id: String,
    pub customer_id: String,
    pub payment_method: String,
    /// Any integer is accepted, negative amounts included.
    pub amount: i32,
    pub bank_account: String,
    pub card_number: String,
    /// Opaque, never validated.
    pub payment_date: String,
}

impl PaymentRecord {
    /// Builds a payment from an already split record.
    pub fn from_record(record: &StringRecord) -> Result<Self, RecordError> {
        expect_fields(record, PAYMENT_FIELDS)?;

        let amount = record[3]
            .parse::<i32>()
            .map_err(|source| RecordError::InvalidAmount {
                value: record[3].to_string(),
                source,
            })?;

        Ok(PaymentRecord {
            webshop_id: record[0].to_string(),
            customer_id: record[1].to_string(),
            payment_method: record[2].to_string(),
            amount,
            bank_account: record[4].to_string(),
            card_number: record[5].to_string(),
            payment_date: record[6].to_string(),
        })
    }

    /// Resolves the payment method and checks it against the bank/card fields.
    ///
    /// A card payment is inconsistent when it names a bank account but no card
    /// number; a transfer is inconsistent the other way round. Any other
    /// combination, both fields empty included, is accepted.
    pub fn method(&self) -> Result<PaymentMethod, RecordError> {
        match self.payment_method.as_str() {
            "card" => {
                if self.card_number.is_empty() && !self.bank_account.is_empty() {
                    return Err(RecordError::InconsistentCardPayment);
                }
                Ok(PaymentMethod::Card)
            }
            "transfer" => {
                if self.bank_account.is_empty() && !self.card_number.is_empty() {
                    return Err(RecordError::InconsistentTransferPayment);
                }
                Ok(PaymentMethod::Transfer)
            }
            other => Err(RecordError::InvalidPaymentMethod(other.to_string())),
        }
    }
}

impl FromStr for PaymentRecord {
    type Err = RecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        Self::from_record(&split_line(line))
    }
}
