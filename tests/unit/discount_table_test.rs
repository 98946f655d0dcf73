// Trade-discount lookup: fixed contractual table, zero for everyone else.

use rust_decimal_macros::dec;
use salemetrics::sales::services::DiscountTable;

#[test]
fn test_contracted_rates() {
    let table = DiscountTable::new();

    assert_eq!(table.rate_for("1300"), dec!(0.075));
    assert_eq!(table.rate_for("2091"), dec!(0.03));
    assert_eq!(table.rate_for("1716"), dec!(0.05));
    assert_eq!(table.rate_for("2084"), dec!(0.0324));
    assert_eq!(table.rate_for("9988"), dec!(0.08));
    assert_eq!(table.rate_for("2614"), dec!(0.01));
    assert_eq!(table.rate_for("1070"), dec!(0.01));
    assert_eq!(table.rate_for("1402"), dec!(0.07));
    assert_eq!(table.rate_for("1404"), dec!(0.07));
}

#[test]
fn test_unknown_customer_rate_is_zero() {
    let table = DiscountTable::new();

    assert_eq!(table.rate_for("5555"), dec!(0));
    assert_eq!(table.rate_for(""), dec!(0));
    assert_eq!(table.rate_for("13000"), dec!(0));
}

#[test]
fn test_rates_are_within_unit_interval() {
    let table = DiscountTable::new();
    for cid in ["1300", "2091", "1716", "2084", "9988", "2614", "1070", "1402", "1404"] {
        let rate = table.rate_for(cid);
        assert!(rate >= dec!(0) && rate < dec!(1), "rate for {} out of range", cid);
    }
}
