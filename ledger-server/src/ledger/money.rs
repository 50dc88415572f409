//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts travel as `f64`; every sum and product is done in `Decimal` and
//! rounded to cents before it is written back onto a row.

use rust_decimal::prelude::*;
use shared::models::{ItemStatus, Order, OrderItem, OrderStatus, Payment, PaymentStatus, Tab, Unit};
use std::collections::HashSet;

/// Rounding strategy for monetary values (2 decimal places, midpoint away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed quantity per item
pub const MAX_QUANTITY: i64 = 9999;
/// Maximum allowed price per product
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed payment amount
pub const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;

/// Convert f64 to Decimal
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Round a Decimal to cents
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal to f64, rounded to cents
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Financial snapshot of one tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabTotals {
    pub subtotal: Decimal,
    pub service_fee: Decimal,
    pub total: Decimal,
    pub paid: Decimal,
    pub due: Decimal,
}

impl TabTotals {
    /// Write the five snapshot fields onto a tab row
    pub fn apply_to(&self, tab: &mut Tab) {
        tab.subtotal_amount = to_f64(self.subtotal);
        tab.service_fee_amount = to_f64(self.service_fee);
        tab.total_amount = to_f64(self.total);
        tab.paid_amount = to_f64(self.paid);
        tab.due_amount = to_f64(self.due);
    }
}

/// Recompute a tab's totals from the rows it owns
///
/// `orders`, `items` and `payments` are expected to be the tab's own rows;
/// items whose order is not in `orders` are ignored. Only active items of
/// sent orders count, and only paid payments.
pub fn compute_totals(
    unit: &Unit,
    orders: &[Order],
    items: &[OrderItem],
    payments: &[Payment],
) -> TabTotals {
    let sent_orders: HashSet<u64> = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Sent)
        .map(|o| o.id)
        .collect();

    let subtotal = round_money(
        items
            .iter()
            .filter(|i| i.status == ItemStatus::Active && sent_orders.contains(&i.order_id))
            .map(|i| to_decimal(i.unit_price_snapshot) * Decimal::from(i.quantity))
            .sum(),
    );

    let service_fee = if unit.service_fee_enabled {
        round_money(subtotal * to_decimal(unit.service_fee_percent) / Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };

    let total = subtotal + service_fee;

    let paid = round_money(
        payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Paid)
            .map(|p| to_decimal(p.amount))
            .sum(),
    );

    let due = (total - paid).max(Decimal::ZERO);

    TabTotals {
        subtotal,
        service_fee,
        total,
        paid,
        due,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::PaymentMethod;

    fn unit(enabled: bool, percent: f64) -> Unit {
        Unit {
            id: 1,
            tenant_id: "t".into(),
            name: "Centro".into(),
            timezone: "UTC".into(),
            service_fee_enabled: enabled,
            service_fee_percent: percent,
        }
    }

    fn order(id: u64, status: OrderStatus) -> Order {
        Order {
            id,
            tenant_id: "t".into(),
            tab_id: 1,
            status,
            created_at: 0,
            sent_at: None,
        }
    }

    fn item(id: u64, order_id: u64, price: f64, quantity: u32, status: ItemStatus) -> OrderItem {
        OrderItem {
            id,
            tenant_id: "t".into(),
            order_id,
            product_id: 1,
            product_name_snapshot: "Soup".into(),
            unit_price_snapshot: price,
            quantity,
            status,
            voided_at: None,
        }
    }

    fn payment(id: u64, amount: f64, status: PaymentStatus) -> Payment {
        Payment {
            id,
            tenant_id: "t".into(),
            tab_id: 1,
            amount,
            method: PaymentMethod::Cash,
            status,
            paid_at: None,
        }
    }

    #[test]
    fn test_fee_on_sent_items() {
        let orders = [order(1, OrderStatus::Sent)];
        let items = [
            item(1, 1, 10.0, 1, ItemStatus::Active),
            item(2, 1, 10.0, 1, ItemStatus::Active),
        ];
        let totals = compute_totals(&unit(true, 10.0), &orders, &items, &[]);

        assert_eq!(to_f64(totals.subtotal), 20.0);
        assert_eq!(to_f64(totals.service_fee), 2.0);
        assert_eq!(to_f64(totals.total), 22.0);
        assert_eq!(to_f64(totals.due), 22.0);
    }

    #[test]
    fn test_draft_and_void_items_excluded() {
        let orders = [order(1, OrderStatus::Sent), order(2, OrderStatus::Draft)];
        let items = [
            item(1, 1, 12.5, 2, ItemStatus::Active),
            item(2, 1, 99.0, 1, ItemStatus::Void),
            item(3, 2, 50.0, 1, ItemStatus::Active),
        ];
        let totals = compute_totals(&unit(false, 10.0), &orders, &items, &[]);

        assert_eq!(to_f64(totals.subtotal), 25.0);
        assert_eq!(totals.service_fee, Decimal::ZERO);
        assert_eq!(to_f64(totals.total), 25.0);
    }

    #[test]
    fn test_items_of_foreign_orders_ignored() {
        let orders = [order(1, OrderStatus::Sent)];
        let items = [item(1, 7, 10.0, 1, ItemStatus::Active)];
        let totals = compute_totals(&unit(false, 0.0), &orders, &items, &[]);
        assert_eq!(totals.subtotal, Decimal::ZERO);
    }

    #[test]
    fn test_only_paid_payments_count() {
        let orders = [order(1, OrderStatus::Sent)];
        let items = [item(1, 1, 30.0, 1, ItemStatus::Active)];
        let payments = [
            payment(1, 10.0, PaymentStatus::Paid),
            payment(2, 15.0, PaymentStatus::Pending),
        ];
        let totals = compute_totals(&unit(false, 0.0), &orders, &items, &payments);

        assert_eq!(to_f64(totals.paid), 10.0);
        assert_eq!(to_f64(totals.due), 20.0);
    }

    #[test]
    fn test_due_never_negative() {
        let orders = [order(1, OrderStatus::Sent)];
        let items = [item(1, 1, 5.0, 1, ItemStatus::Void)];
        let payments = [payment(1, 5.0, PaymentStatus::Paid)];
        let totals = compute_totals(&unit(false, 0.0), &orders, &items, &payments);

        assert_eq!(totals.total, Decimal::ZERO);
        assert_eq!(to_f64(totals.paid), 5.0);
        assert_eq!(totals.due, Decimal::ZERO);
    }

    #[test]
    fn test_decimal_precision() {
        // 0.1 * 3 is not 0.3 in f64
        let orders = [order(1, OrderStatus::Sent)];
        let items = [item(1, 1, 0.1, 3, ItemStatus::Active)];
        let totals = compute_totals(&unit(false, 0.0), &orders, &items, &[]);
        assert_eq!(to_f64(totals.subtotal), 0.3);
    }

    #[test]
    fn test_fee_rounds_midpoint_away_from_zero() {
        // 0.05 * 10% = 0.005 -> 0.01
        let orders = [order(1, OrderStatus::Sent)];
        let items = [item(1, 1, 0.05, 1, ItemStatus::Active)];
        let totals = compute_totals(&unit(true, 10.0), &orders, &items, &[]);
        assert_eq!(to_f64(totals.service_fee), 0.01);
        assert_eq!(to_f64(totals.total), 0.06);
    }

    #[test]
    fn test_apply_to_tab() {
        let mut tab = Tab {
            id: 1,
            tenant_id: "t".into(),
            unit_id: 1,
            table_id: 1,
            status: shared::models::TabStatus::Open,
            opened_at: 0,
            closed_at: None,
            subtotal_amount: 0.0,
            service_fee_amount: 0.0,
            total_amount: 0.0,
            paid_amount: 0.0,
            due_amount: 0.0,
        };
        let orders = [order(1, OrderStatus::Sent)];
        let items = [item(1, 1, 33.33, 3, ItemStatus::Active)];
        let payments = [payment(1, 50.0, PaymentStatus::Paid)];
        compute_totals(&unit(true, 12.5), &orders, &items, &payments).apply_to(&mut tab);

        assert_eq!(tab.subtotal_amount, 99.99);
        assert_eq!(tab.service_fee_amount, 12.5);
        assert_eq!(tab.total_amount, 112.49);
        assert_eq!(tab.paid_amount, 50.0);
        assert_eq!(tab.due_amount, 62.49);
    }
}
