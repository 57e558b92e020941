//! Line calculator unit tests.

use pricing_core::{compute_line, LineItem, PricingError};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().expect("valid decimal literal")
}

/// Base item used by most tests: 2 x cost 50, no markup.
fn base_item() -> LineItem {
    LineItem {
        description: "Test item".to_string(),
        quantity: dec("2"),
        unit_cost: Some(dec("50")),
        markup_percent: Some(Decimal::ZERO),
        ..LineItem::default()
    }
}

#[test]
fn no_discount_means_net_equals_subtotal() {
    let item = base_item();
    let result = compute_line(&item).expect("valid line");
    assert_eq!(result.subtotal, dec("100"));
    assert_eq!(result.net_amount, result.subtotal);
}

#[test]
fn no_vat_means_total_equals_net() {
    let mut item = base_item();
    item.discount_percent = Some(dec("5"));
    let result = compute_line(&item).expect("valid line");
    assert_eq!(result.applied_vat, dec("0"));
    assert_eq!(result.line_total, result.net_amount);
}

#[test]
fn discount_percent_takes_precedence_over_amount() {
    let mut item = base_item();
    item.discount_percent = Some(dec("10"));
    item.discount_amount = Some(dec("999999"));
    let result = compute_line(&item).expect("valid line");
    // 10% of 100, never the fixed amount.
    assert_eq!(result.applied_discount, dec("10"));
    assert_eq!(result.net_amount, dec("90"));
}

#[test]
fn discount_amount_is_capped_at_subtotal() {
    let mut item = base_item();
    item.discount_amount = Some(dec("250"));
    let result = compute_line(&item).expect("valid line");
    assert_eq!(result.applied_discount, result.subtotal);
    assert_eq!(result.net_amount, dec("0"));
}

#[test]
fn discount_percent_above_hundred_is_clamped() {
    let mut item = base_item();
    item.discount_percent = Some(dec("150"));
    let result = compute_line(&item).expect("valid line");
    assert_eq!(result.applied_discount, dec("100"));
    assert_eq!(result.net_amount, dec("0"));
}

#[test]
fn markup_derives_selling_price() {
    let item = LineItem {
        quantity: dec("1"),
        unit_cost: Some(dec("100")),
        markup_percent: Some(dec("70")),
        ..LineItem::default()
    };
    let result = compute_line(&item).expect("valid line");
    assert_eq!(result.effective_unit_price, dec("170"));
}

#[test]
fn explicit_unit_price_overrides_markup_derivation() {
    let item = LineItem {
        quantity: dec("1"),
        unit_cost: Some(dec("100")),
        markup_percent: Some(dec("70")),
        unit_price: Some(dec("150")),
        ..LineItem::default()
    };
    let result = compute_line(&item).expect("valid line");
    assert_eq!(result.effective_unit_price, dec("150"));
}

#[test]
fn zero_unit_price_falls_back_to_cost_basis() {
    let item = LineItem {
        quantity: dec("1"),
        unit_cost: Some(dec("100")),
        markup_percent: Some(dec("70")),
        unit_price: Some(Decimal::ZERO),
        ..LineItem::default()
    };
    let result = compute_line(&item).expect("valid line");
    assert_eq!(result.effective_unit_price, dec("170"));
}

#[test]
fn negative_markup_is_clamped_to_zero() {
    let item = LineItem {
        quantity: dec("1"),
        unit_cost: Some(dec("100")),
        markup_percent: Some(dec("-20")),
        ..LineItem::default()
    };
    let result = compute_line(&item).expect("valid line");
    assert_eq!(result.effective_unit_price, dec("100"));
}

#[test]
fn full_cascade_scenario() {
    // quantity 2, cost 50, markup 0, discount 5%, VAT 10%.
    let mut item = base_item();
    item.discount_percent = Some(dec("5"));
    item.vat_percent = Some(dec("10"));
    let result = compute_line(&item).expect("valid line");
    assert_eq!(result.effective_unit_price, dec("50"));
    assert_eq!(result.subtotal, dec("100"));
    assert_eq!(result.applied_discount, dec("5"));
    assert_eq!(result.net_amount, dec("95"));
    assert_eq!(result.applied_vat, dec("9.5"));
    assert_eq!(result.line_total, dec("104.5"));
}

#[test]
fn vat_percent_takes_precedence_over_amount() {
    let mut item = base_item();
    item.vat_percent = Some(dec("10"));
    item.vat_amount = Some(dec("500"));
    let result = compute_line(&item).expect("valid line");
    assert_eq!(result.applied_vat, dec("10"));
}

#[test]
fn vat_amount_override_has_no_cap() {
    let mut item = base_item();
    item.vat_amount = Some(dec("500"));
    let result = compute_line(&item).expect("valid line");
    assert_eq!(result.applied_vat, dec("500"));
    assert_eq!(result.line_total, dec("600"));
}

#[test]
fn vat_percent_above_hundred_is_not_clamped() {
    let mut item = base_item();
    item.vat_percent = Some(dec("150"));
    let result = compute_line(&item).expect("valid line");
    assert_eq!(result.applied_vat, dec("150"));
}

#[test]
fn negative_vat_amount_is_floored_to_zero() {
    let mut item = base_item();
    item.vat_amount = Some(dec("-5"));
    let result = compute_line(&item).expect("valid line");
    assert_eq!(result.applied_vat, dec("0"));
}

#[test]
fn fractional_quantity_is_supported() {
    // Weight-based unit: 1.5 kg at 3.33/kg.
    let item = LineItem {
        quantity: dec("1.5"),
        unit_price: Some(dec("3.33")),
        ..LineItem::default()
    };
    let result = compute_line(&item).expect("valid line");
    // 4.995 rounds half away from zero to 5.00.
    assert_eq!(result.subtotal, dec("5.00"));
}

#[test]
fn zero_priced_line_is_valid_and_flagged_free() {
    let item = LineItem {
        quantity: dec("3"),
        ..LineItem::default()
    };
    let result = compute_line(&item).expect("valid line");
    assert!(result.is_free());
    assert_eq!(result.line_total, dec("0"));
}

#[test]
fn negative_quantity_is_rejected() {
    let mut item = base_item();
    item.quantity = dec("-1");
    let err = compute_line(&item).expect_err("negative quantity must fail");
    assert!(matches!(err, PricingError::InvalidQuantity(_)));
}

#[test]
fn negative_prices_are_rejected() {
    let mut item = base_item();
    item.unit_cost = Some(dec("-10"));
    let err = compute_line(&item).expect_err("negative cost must fail");
    assert!(matches!(
        err,
        PricingError::InvalidPrice {
            field: "unit_cost",
            ..
        }
    ));

    let mut item = base_item();
    item.unit_price = Some(dec("-10"));
    let err = compute_line(&item).expect_err("negative price must fail");
    assert!(matches!(
        err,
        PricingError::InvalidPrice {
            field: "unit_price",
            ..
        }
    ));
}

#[test]
fn recomputation_is_bit_identical() {
    let mut item = base_item();
    item.discount_percent = Some(dec("5"));
    item.vat_percent = Some(dec("10"));
    let first = compute_line(&item).expect("valid line");
    let second = compute_line(&item).expect("valid line");
    assert_eq!(first, second);
    // Bit-identical includes scale, so the serialized forms match too.
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn results_serialize_with_two_decimal_places() {
    let mut item = base_item();
    item.discount_percent = Some(dec("5"));
    item.vat_percent = Some(dec("10"));
    let result = compute_line(&item).expect("valid line");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["subtotal"], "100.00");
    assert_eq!(json["applied_vat"], "9.50");
    assert_eq!(json["line_total"], "104.50");
}

#[test]
fn line_item_accepts_json_numbers_and_storage_column_names() {
    let item: LineItem = serde_json::from_value(serde_json::json!({
        "description": "Imported row",
        "quantity": 2,
        "unit_cost": 50,
        "discount_percentage": 5,
        "vat_percent": 10.0
    }))
    .expect("deserializes from storage-shaped payload");
    let result = compute_line(&item).expect("valid line");
    assert_eq!(result.line_total, dec("104.50"));
}
