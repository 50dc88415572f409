//! Ledger state machine
//!
//! Governs the tab → order → item → payment lifecycles:
//!
//! ```text
//! Tab:       open ──close──▶ closed
//! Order:     draft ──send──▶ sent
//! OrderItem: active ──void──▶ void
//! Payment:   pending ──confirm──▶ paid
//! ```
//!
//! Every mutating operation runs as one [`TenantStore::transaction`]:
//!
//! ```text
//! operation(tenant, input)
//!     ├─ 1. Validate input (no transaction yet)
//!     ├─ 2. Begin write transaction (exclusive)
//!     ├─ 3. Load rows and check the transition against fresh state
//!     ├─ 4. Mutate rows
//!     ├─ 5. Recalculate the owning tab when money can change
//!     └─ 6. Commit, or abort on any error
//! ```

mod error;
pub mod money;

pub use error::{LedgerError, LedgerResult};

use shared::models::{
    AddItemRequest, CreateOrderRequest, CreatePaymentRequest, DiningTable, ItemStatus,
    OpenTabRequest, Order, OrderItem, OrderStatus, Payment, PaymentStatus, Product, Tab,
    TabStatus, Unit,
};
use shared::util::now_millis;

use crate::store::{Record, StorageError, TenantStore, TenantTxn};
use crate::tenant::TenantId;
use money::{MAX_PAYMENT_AMOUNT, MAX_QUANTITY, compute_totals, round_money, to_decimal};

/// Ledger service over a shared [`TenantStore`]
#[derive(Clone)]
pub struct LedgerService {
    store: TenantStore,
}

impl LedgerService {
    pub fn new(store: TenantStore) -> Self {
        Self { store }
    }

    /// Run a mutating operation in one transaction, logging rejections
    fn mutate<T, F>(&self, tenant: &TenantId, operation: &'static str, f: F) -> LedgerResult<T>
    where
        F: FnOnce(&mut TenantTxn<'_>) -> LedgerResult<T>,
    {
        self.store.transaction(tenant, f).inspect_err(|e| {
            // storage failures are logged where they become a response
            if matches!(e, LedgerError::Storage(err) if !matches!(err, StorageError::NotFound(..))) {
                return;
            }
            tracing::debug!(tenant = %tenant, operation, reason = %e, "Ledger operation rejected");
        })
    }

    // ========== Tab ==========

    /// Open a tab on a dining table
    pub fn open_tab(&self, tenant: &TenantId, req: OpenTabRequest) -> LedgerResult<Tab> {
        self.mutate(tenant, "open_tab", |txn| {
            let table: DiningTable = txn.require(req.table_id)?;
            let unit: Unit = txn.require(req.unit_id)?;

            if txn.open_tab_for_table(table.id)?.is_some() {
                return Err(LedgerError::TabAlreadyOpen(table.id));
            }

            let tab = txn.insert(|id| Tab {
                id,
                tenant_id: tenant.to_string(),
                unit_id: unit.id,
                table_id: table.id,
                status: TabStatus::Open,
                opened_at: now_millis(),
                closed_at: None,
                subtotal_amount: 0.0,
                service_fee_amount: 0.0,
                total_amount: 0.0,
                paid_amount: 0.0,
                due_amount: 0.0,
            })?;
            txn.mark_tab_open(table.id, tab.id)?;

            tracing::info!(tenant = %tenant, tab_id = tab.id, table_id = table.id, "Tab opened");
            Ok(tab)
        })
    }

    /// Refresh a tab's financial snapshot
    pub fn recalculate_tab(&self, tenant: &TenantId, tab_id: u64) -> LedgerResult<Tab> {
        self.mutate(tenant, "recalculate_tab", |txn| recalculate(txn, tab_id))
    }

    /// Close a settled tab
    ///
    /// Requires the tab to be open, no draft orders and nothing due.
    pub fn close_tab(&self, tenant: &TenantId, tab_id: u64) -> LedgerResult<Tab> {
        self.mutate(tenant, "close_tab", |txn| {
            let mut tab = recalculate(txn, tab_id)?;
            if !tab.is_open() {
                return Err(LedgerError::TabNotOpen(tab.id));
            }

            let has_drafts = orders_of(txn, tab.id)?
                .iter()
                .any(|o| o.status == OrderStatus::Draft);
            if has_drafts {
                return Err(LedgerError::PendingOrders(tab.id));
            }

            if tab.due_amount > 0.0 {
                return Err(LedgerError::AmountDue {
                    tab_id: tab.id,
                    due: tab.due_amount,
                });
            }

            tab.status = TabStatus::Closed;
            tab.closed_at = Some(now_millis());
            txn.put(&tab)?;
            txn.clear_open_tab(tab.table_id)?;

            tracing::info!(tenant = %tenant, tab_id = tab.id, total = tab.total_amount, "Tab closed");
            Ok(tab)
        })
    }

    // ========== Order ==========

    /// Create a draft order on an open tab
    pub fn create_order(&self, tenant: &TenantId, req: CreateOrderRequest) -> LedgerResult<Order> {
        self.mutate(tenant, "create_order", |txn| {
            let tab: Tab = txn.require(req.tab_id)?;
            if !tab.is_open() {
                return Err(LedgerError::TabClosed(tab.id));
            }

            let order = txn.insert(|id| Order {
                id,
                tenant_id: tenant.to_string(),
                tab_id: tab.id,
                status: OrderStatus::Draft,
                created_at: now_millis(),
                sent_at: None,
            })?;
            txn.link_child(tab.id, &order)?;

            tracing::info!(tenant = %tenant, order_id = order.id, tab_id = tab.id, "Order created");
            Ok(order)
        })
    }

    /// Send a draft order to the kitchen
    ///
    /// Its active items start counting towards the tab totals.
    pub fn send_order(&self, tenant: &TenantId, order_id: u64) -> LedgerResult<Order> {
        self.mutate(tenant, "send_order", |txn| {
            let mut order: Order = txn.require(order_id)?;
            if order.status == OrderStatus::Sent {
                return Err(LedgerError::OrderImmutable(format!(
                    "Order {} already sent",
                    order.id
                )));
            }

            let has_active = txn
                .children::<OrderItem>(order.id)?
                .iter()
                .any(|i| i.status == ItemStatus::Active);
            if !has_active {
                return Err(LedgerError::OrderEmpty(order.id));
            }

            order.status = OrderStatus::Sent;
            order.sent_at = Some(now_millis());
            txn.put(&order)?;
            recalculate(txn, order.tab_id)?;

            tracing::info!(tenant = %tenant, order_id = order.id, tab_id = order.tab_id, "Order sent");
            Ok(order)
        })
    }

    // ========== Order Item ==========

    /// Add an item to a draft order, snapshotting the product's name and price
    pub fn add_item(&self, tenant: &TenantId, req: AddItemRequest) -> LedgerResult<OrderItem> {
        let quantity = validate_quantity(req.quantity)?;

        self.mutate(tenant, "add_item", |txn| {
            let order: Order = txn.require(req.order_id)?;
            if order.status != OrderStatus::Draft {
                return Err(LedgerError::OrderImmutable(format!(
                    "Order {} is not a draft; items can only be added to draft orders",
                    order.id
                )));
            }

            let product: Product = txn.require(req.product_id)?;
            let item = txn.insert(|id| OrderItem {
                id,
                tenant_id: tenant.to_string(),
                order_id: order.id,
                product_id: product.id,
                product_name_snapshot: product.name.clone(),
                unit_price_snapshot: product.price,
                quantity,
                status: ItemStatus::Active,
                voided_at: None,
            })?;
            txn.link_child(order.id, &item)?;

            tracing::info!(
                tenant = %tenant,
                item_id = item.id,
                order_id = order.id,
                product_id = product.id,
                quantity,
                "Item added"
            );
            Ok(item)
        })
    }

    /// Void an item of a sent order
    ///
    /// Voiding an already void item returns it unchanged. A void that would
    /// leave the tab's confirmed payments above its new total is refused.
    pub fn void_item(&self, tenant: &TenantId, item_id: u64) -> LedgerResult<OrderItem> {
        self.mutate(tenant, "void_item", |txn| {
            let mut item: OrderItem = txn.require(item_id)?;
            if item.status == ItemStatus::Void {
                return Ok(item);
            }

            let order: Order = txn.require(item.order_id)?;
            if order.status != OrderStatus::Sent {
                return Err(LedgerError::InvalidState(format!(
                    "Item {} belongs to draft order {}; only items of sent orders can be voided",
                    item.id, order.id
                )));
            }

            let tab: Tab = txn.require(order.tab_id)?;
            if !tab.is_open() {
                return Err(LedgerError::TabClosed(tab.id));
            }

            item.status = ItemStatus::Void;
            item.voided_at = Some(now_millis());
            txn.put(&item)?;
            let tab = recalculate(txn, tab.id)?;
            if to_decimal(tab.paid_amount) > to_decimal(tab.total_amount) {
                return Err(LedgerError::InvalidState(format!(
                    "Voiding item {} would bring tab {} total {:.2} below the paid amount {:.2}",
                    item.id, tab.id, tab.total_amount, tab.paid_amount
                )));
            }

            tracing::info!(tenant = %tenant, item_id = item.id, tab_id = tab.id, "Item voided");
            Ok(item)
        })
    }

    // ========== Payment ==========

    /// Register a pending payment against an open tab
    pub fn create_payment(
        &self,
        tenant: &TenantId,
        req: CreatePaymentRequest,
    ) -> LedgerResult<Payment> {
        validate_amount(req.amount)?;

        self.mutate(tenant, "create_payment", |txn| {
            let tab: Tab = txn.require(req.tab_id)?;
            if !tab.is_open() {
                return Err(LedgerError::TabClosed(tab.id));
            }

            let tab = recalculate(txn, tab.id)?;
            ensure_within_due(req.amount, &tab)?;

            let payment = txn.insert(|id| Payment {
                id,
                tenant_id: tenant.to_string(),
                tab_id: tab.id,
                amount: req.amount,
                method: req.method,
                status: PaymentStatus::Pending,
                paid_at: None,
            })?;
            txn.link_child(tab.id, &payment)?;

            tracing::info!(
                tenant = %tenant,
                payment_id = payment.id,
                tab_id = tab.id,
                amount = payment.amount,
                "Payment created"
            );
            Ok(payment)
        })
    }

    /// Mark a payment as paid
    ///
    /// Confirming an already paid payment returns it unchanged. The amount is
    /// checked again against the fresh due amount so the paid sum never
    /// exceeds the tab total.
    pub fn confirm_payment(&self, tenant: &TenantId, payment_id: u64) -> LedgerResult<Payment> {
        self.mutate(tenant, "confirm_payment", |txn| {
            let mut payment: Payment = txn.require(payment_id)?;
            if payment.status == PaymentStatus::Paid {
                return Ok(payment);
            }

            let tab = recalculate(txn, payment.tab_id)?;
            ensure_within_due(payment.amount, &tab)?;

            payment.status = PaymentStatus::Paid;
            payment.paid_at = Some(now_millis());
            txn.put(&payment)?;
            let tab = recalculate(txn, tab.id)?;

            tracing::info!(
                tenant = %tenant,
                payment_id = payment.id,
                tab_id = tab.id,
                due = tab.due_amount,
                "Payment confirmed"
            );
            Ok(payment)
        })
    }

    // ========== Reads ==========

    /// Fetch one ledger row
    pub fn get<R: Record>(&self, tenant: &TenantId, id: u64) -> LedgerResult<R> {
        self.store.snapshot(tenant, |view| Ok(view.require(id)?))
    }

    /// All ledger rows of one kind, ordered by id
    pub fn list<R: Record>(&self, tenant: &TenantId) -> LedgerResult<Vec<R>> {
        self.store.snapshot(tenant, |view| Ok(view.list()?))
    }
}

fn validate_quantity(quantity: i64) -> LedgerResult<u32> {
    if !(1..=MAX_QUANTITY).contains(&quantity) {
        return Err(LedgerError::Validation(format!(
            "quantity must be between 1 and {MAX_QUANTITY}, got {quantity}"
        )));
    }
    u32::try_from(quantity)
        .map_err(|_| LedgerError::Validation(format!("quantity out of range: {quantity}")))
}

fn validate_amount(amount: f64) -> LedgerResult<()> {
    if !amount.is_finite() {
        return Err(LedgerError::Validation(format!(
            "amount must be a finite number, got {amount}"
        )));
    }
    if amount <= 0.0 {
        return Err(LedgerError::Validation(format!(
            "amount must be positive, got {amount}"
        )));
    }
    if amount > MAX_PAYMENT_AMOUNT {
        return Err(LedgerError::Validation(format!(
            "amount exceeds maximum allowed ({MAX_PAYMENT_AMOUNT}), got {amount}"
        )));
    }
    // Sub-cent amounts would be counted as paid after rounding
    let exact = to_decimal(amount);
    if round_money(exact) != exact {
        return Err(LedgerError::Validation(format!(
            "amount must have at most 2 decimal places, got {amount}"
        )));
    }
    Ok(())
}

fn ensure_within_due(amount: f64, tab: &Tab) -> LedgerResult<()> {
    if to_decimal(amount) > to_decimal(tab.due_amount) {
        return Err(LedgerError::PaymentExceedsDue {
            amount,
            due: tab.due_amount,
        });
    }
    Ok(())
}

fn orders_of(txn: &TenantTxn<'_>, tab_id: u64) -> LedgerResult<Vec<Order>> {
    Ok(txn.children::<Order>(tab_id)?)
}

/// Recompute and persist a tab's snapshot from its rows in this transaction
fn recalculate(txn: &mut TenantTxn<'_>, tab_id: u64) -> LedgerResult<Tab> {
    let mut tab: Tab = txn.require(tab_id)?;
    let unit: Unit = txn.require(tab.unit_id)?;

    let orders = orders_of(txn, tab.id)?;
    let mut items: Vec<OrderItem> = Vec::new();
    for order in orders.iter().filter(|o| o.status == OrderStatus::Sent) {
        items.extend(txn.children::<OrderItem>(order.id)?);
    }
    let payments: Vec<Payment> = txn.children(tab.id)?;

    compute_totals(&unit, &orders, &items, &payments).apply_to(&mut tab);
    txn.put(&tab)?;
    Ok(tab)
}

#[cfg(test)]
mod tests;
