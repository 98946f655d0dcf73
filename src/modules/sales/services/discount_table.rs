use rust_decimal::Decimal;

/// Contractual trade-discount rates, keyed by customer id.
///
/// Process-wide constant; never mutated after start. Customers without a
/// contract resolve to a zero rate.
pub struct DiscountTable;

impl DiscountTable {
    pub fn new() -> Self {
        Self
    }

    /// Look up the trade-discount rate for a customer. Total; no error cases.
    pub fn rate_for(&self, customer_id: &str) -> Decimal {
        match customer_id {
            "1300" => Decimal::new(75, 3),    // 0.075
            "2091" => Decimal::new(3, 2),     // 0.03
            "1716" => Decimal::new(5, 2),     // 0.05
            "2084" => Decimal::new(324, 4),   // 0.0324
            "9988" => Decimal::new(8, 2),     // 0.08
            "2614" => Decimal::new(1, 2),     // 0.01
            "1070" => Decimal::new(1, 2),     // 0.01
            "1402" => Decimal::new(7, 2),     // 0.07
            "1404" => Decimal::new(7, 2),     // 0.07
            _ => Decimal::ZERO,
        }
    }
}

impl Default for DiscountTable {
    fn default() -> Self {
        Self::new()
    }
}
