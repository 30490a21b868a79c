//! Customer and webshop aggregates.
//!
//! Totals only ever grow by addition of parsed payment amounts. Amounts are
//! not validated, so a negative payment lowers a total; nothing else does.

use crate::record::{CustomerRecord, PaymentMethod};
use indexmap::IndexMap;

/// Keyed store that iterates in order of first insertion.
///
/// Re-inserting an existing key replaces the value but keeps its position.
pub type Registry<T> = IndexMap<String, T>;

/// A customer and the sum of all payments attributed to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub customer_id: String,

    /// Webshop the customer was listed under. Not required to resolve.
    pub webshop_id: String,

    pub name: String,
    pub address: String,

    pub total_amount: i64,
}

impl Customer {
    /// Creates a customer with a zero total.
    pub fn new(record: CustomerRecord) -> Self {
        Customer {
            customer_id: record.customer_id,
            webshop_id: record.webshop_id,
            name: record.name,
            address: record.address,
            total_amount: 0,
        }
    }

    pub fn add_amount(&mut self, amount: i32) {
        self.total_amount += i64::from(amount);
    }
}

/// Per-webshop totals split by payment method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Webshop {
    pub webshop_id: String,
    pub card_total: i64,
    pub transfer_total: i64,
}

impl Webshop {
    /// Creates a webshop with zero totals.
    pub fn new(webshop_id: impl Into<String>) -> Self {
        Webshop {
            webshop_id: webshop_id.into(),
            card_total: 0,
            transfer_total: 0,
        }
    }

    /// Adds `amount` to the total of the given method.
    pub fn add_amount(&mut self, method: PaymentMethod, amount: i32) {
        match method {
            PaymentMethod::Card => self.card_total += i64::from(amount),
            PaymentMethod::Transfer => self.transfer_total += i64::from(amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_customer_has_zero_total() {
        let record: CustomerRecord = "S1;C1;Alice;Addr1".parse().unwrap();
        let customer = Customer::new(record);
        assert_eq!(customer.customer_id, "C1");
        assert_eq!(customer.webshop_id, "S1");
        assert_eq!(customer.total_amount, 0);
    }

    #[test]
    fn test_customer_accumulates_amounts() {
        let record: CustomerRecord = "S1;C1;Alice;Addr1".parse().unwrap();
        let mut customer = Customer::new(record);
        customer.add_amount(100);
        customer.add_amount(50);
        customer.add_amount(-20);
        assert_eq!(customer.total_amount, 130);
    }

    #[test]
    fn test_customer_total_does_not_overflow_i32() {
        let record: CustomerRecord = "S1;C1;Alice;Addr1".parse().unwrap();
        let mut customer = Customer::new(record);
        customer.add_amount(i32::MAX);
        customer.add_amount(i32::MAX);
        assert_eq!(customer.total_amount, 2 * i64::from(i32::MAX));
    }

    #[test]
    fn test_webshop_splits_totals_by_method() {
        let mut webshop = Webshop::new("S1");
        webshop.add_amount(PaymentMethod::Card, 100);
        webshop.add_amount(PaymentMethod::Transfer, 40);
        webshop.add_amount(PaymentMethod::Card, 5);
        assert_eq!(webshop.card_total, 105);
        assert_eq!(webshop.transfer_total, 40);
    }

    #[test]
    fn test_registry_keeps_first_insertion_order() {
        let mut registry: Registry<Webshop> = Registry::new();
        registry.insert("S2".to_string(), Webshop::new("S2"));
        registry.insert("S1".to_string(), Webshop::new("S1"));
        let mut replaced = Webshop::new("S2");
        replaced.card_total = 7;
        registry.insert("S2".to_string(), replaced);

        let ids: Vec<_> = registry.keys().map(String::as_str).collect();
        assert_eq!(ids, ["S2", "S1"]);
        assert_eq!(registry["S2"].card_total, 7);
    }
}
