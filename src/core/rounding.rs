use rust_decimal::{Decimal, RoundingStrategy};

/// Round a currency amount to 2 decimal places, half away from zero.
///
/// Every derived monetary field is rounded exactly once, through this
/// function, before it is composed into dependent figures.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a prorated quantity to a whole number, half away from zero.
pub fn round_quantity(quantity: Decimal) -> Decimal {
    quantity.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
