use super::*;
use shared::models::{Area, Category, DiningTable, PaymentMethod, Product, TableStatus, Unit};

mod test_concurrency;
mod test_isolation;

fn create_test_ledger() -> (LedgerService, TenantStore) {
    let store = TenantStore::open_in_memory().unwrap();
    (LedgerService::new(store.clone()), store)
}

fn tenant(id: &str) -> TenantId {
    TenantId::parse(id).unwrap()
}

/// Catalog rows a tab needs
struct Fixture {
    unit: Unit,
    table: DiningTable,
    product: Product,
}

fn seed_catalog(store: &TenantStore, t: &TenantId, fee_percent: Option<f64>, price: f64) -> Fixture {
    store
        .transaction(t, |txn| {
            let unit = txn.insert(|id| Unit {
                id,
                tenant_id: t.to_string(),
                name: "Centro".into(),
                timezone: "America/Sao_Paulo".into(),
                service_fee_enabled: fee_percent.is_some(),
                service_fee_percent: fee_percent.unwrap_or(0.0),
            })?;
            let area = txn.insert(|id| Area {
                id,
                tenant_id: t.to_string(),
                unit_id: unit.id,
                name: "Salão".into(),
                sort_order: 0,
            })?;
            let table = txn.insert(|id| DiningTable {
                id,
                tenant_id: t.to_string(),
                unit_id: unit.id,
                area_id: area.id,
                name: "M1".into(),
                capacity: 4,
                status: TableStatus::Available,
            })?;
            let category = txn.insert(|id| Category {
                id,
                tenant_id: t.to_string(),
                name: "Pratos".into(),
            })?;
            let product = txn.insert(|id| Product {
                id,
                tenant_id: t.to_string(),
                name: "Feijoada".into(),
                price,
                category_id: category.id,
            })?;
            Ok::<_, StorageError>(Fixture {
                unit,
                table,
                product,
            })
        })
        .unwrap()
}

fn add_table(store: &TenantStore, t: &TenantId, fixture: &Fixture, name: &str) -> DiningTable {
    store
        .transaction(t, |txn| {
            txn.insert(|id| DiningTable {
                id,
                tenant_id: t.to_string(),
                unit_id: fixture.unit.id,
                area_id: fixture.table.area_id,
                name: name.into(),
                capacity: 2,
                status: TableStatus::Available,
            })
        })
        .unwrap()
}

fn open_tab(ledger: &LedgerService, t: &TenantId, fixture: &Fixture) -> Tab {
    ledger
        .open_tab(
            t,
            OpenTabRequest {
                unit_id: fixture.unit.id,
                table_id: fixture.table.id,
            },
        )
        .unwrap()
}

fn add_item(ledger: &LedgerService, t: &TenantId, order_id: u64, product_id: u64, quantity: i64) -> LedgerResult<OrderItem> {
    ledger.add_item(
        t,
        AddItemRequest {
            order_id,
            product_id,
            quantity,
        },
    )
}

/// Create and send an order holding one item per quantity
fn send_order_with_items(
    ledger: &LedgerService,
    t: &TenantId,
    tab_id: u64,
    product_id: u64,
    quantities: &[i64],
) -> (Order, Vec<OrderItem>) {
    let order = ledger
        .create_order(t, CreateOrderRequest { tab_id })
        .unwrap();
    let items = quantities
        .iter()
        .map(|&q| add_item(ledger, t, order.id, product_id, q).unwrap())
        .collect();
    let order = ledger.send_order(t, order.id).unwrap();
    (order, items)
}

fn pay(ledger: &LedgerService, t: &TenantId, tab_id: u64, amount: f64) -> LedgerResult<Payment> {
    ledger.create_payment(
        t,
        CreatePaymentRequest {
            tab_id,
            amount,
            method: PaymentMethod::Card,
        },
    )
}
