use super::*;

#[test]
fn test_ledger_rows_invisible_to_other_tenant() {
    let (ledger, store) = create_test_ledger();
    let a = tenant("tenant-a");
    let b = tenant("tenant-b");
    let fixture = seed_catalog(&store, &a, None, 10.0);
    let tab = open_tab(&ledger, &a, &fixture);
    let (order, items) = send_order_with_items(&ledger, &a, tab.id, fixture.product.id, &[1]);
    let payment = pay(&ledger, &a, tab.id, 5.0).unwrap();

    assert!(matches!(
        ledger.get::<Tab>(&b, tab.id),
        Err(LedgerError::Storage(StorageError::NotFound(..)))
    ));
    assert!(ledger.get::<Order>(&b, order.id).is_err());
    assert!(ledger.get::<OrderItem>(&b, items[0].id).is_err());
    assert!(ledger.get::<Payment>(&b, payment.id).is_err());

    assert!(ledger.list::<Tab>(&b).unwrap().is_empty());
    assert!(ledger.list::<Order>(&b).unwrap().is_empty());
    assert!(ledger.list::<OrderItem>(&b).unwrap().is_empty());
    assert!(ledger.list::<Payment>(&b).unwrap().is_empty());
    assert_eq!(ledger.list::<Tab>(&a).unwrap().len(), 1);
}

#[test]
fn test_cross_tenant_mutations_are_not_found() {
    let (ledger, store) = create_test_ledger();
    let a = tenant("tenant-a");
    let b = tenant("tenant-b");
    let fixture = seed_catalog(&store, &a, None, 10.0);
    let tab = open_tab(&ledger, &a, &fixture);
    let (order, items) = send_order_with_items(&ledger, &a, tab.id, fixture.product.id, &[1]);
    let payment = pay(&ledger, &a, tab.id, 10.0).unwrap();

    let not_found = |result: LedgerResult<()>| {
        matches!(result, Err(LedgerError::Storage(StorageError::NotFound(..))))
    };

    assert!(not_found(
        ledger
            .open_tab(
                &b,
                OpenTabRequest {
                    unit_id: fixture.unit.id,
                    table_id: fixture.table.id,
                },
            )
            .map(drop)
    ));
    assert!(not_found(
        ledger
            .create_order(&b, CreateOrderRequest { tab_id: tab.id })
            .map(drop)
    ));
    assert!(not_found(
        add_item(&ledger, &b, order.id, fixture.product.id, 1).map(drop)
    ));
    assert!(not_found(ledger.send_order(&b, order.id).map(drop)));
    assert!(not_found(ledger.void_item(&b, items[0].id).map(drop)));
    assert!(not_found(ledger.recalculate_tab(&b, tab.id).map(drop)));
    assert!(not_found(pay(&ledger, &b, tab.id, 1.0).map(drop)));
    assert!(not_found(ledger.confirm_payment(&b, payment.id).map(drop)));
    assert!(not_found(ledger.close_tab(&b, tab.id).map(drop)));

    // Tenant A's state is untouched
    let item: OrderItem = ledger.get(&a, items[0].id).unwrap();
    assert_eq!(item.status, ItemStatus::Active);
    let payment: Payment = ledger.get(&a, payment.id).unwrap();
    assert_eq!(payment.status, PaymentStatus::Pending);
}

#[test]
fn test_product_of_other_tenant_cannot_be_ordered() {
    let (ledger, store) = create_test_ledger();
    let a = tenant("tenant-a");
    let b = tenant("tenant-b");
    let fixture_a = seed_catalog(&store, &a, None, 10.0);
    let fixture_b = seed_catalog(&store, &b, None, 10.0);
    let tab = open_tab(&ledger, &b, &fixture_b);
    let order = ledger
        .create_order(&b, CreateOrderRequest { tab_id: tab.id })
        .unwrap();

    let err = add_item(&ledger, &b, order.id, fixture_a.product.id, 1).unwrap_err();
    assert!(matches!(err, LedgerError::Storage(StorageError::NotFound(..))));
}
