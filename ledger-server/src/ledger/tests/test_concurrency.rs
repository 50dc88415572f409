use super::*;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_concurrent_open_on_same_table() {
    let (ledger, store) = create_test_ledger();
    let t = tenant("acme");
    let fixture = seed_catalog(&store, &t, None, 10.0);
    let (unit_id, table_id) = (fixture.unit.id, fixture.table.id);

    const THREADS: usize = 8;
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let ledger = ledger.clone();
            let barrier = barrier.clone();
            let t = t.clone();
            thread::spawn(move || {
                barrier.wait();
                ledger.open_tab(&t, OpenTabRequest { unit_id, table_id })
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let opened = results.iter().filter(|r| r.is_ok()).count();
    let rejected = results
        .iter()
        .filter(|r| matches!(r, Err(LedgerError::TabAlreadyOpen(_))))
        .count();

    assert_eq!(opened, 1);
    assert_eq!(rejected, THREADS - 1);
    assert_eq!(ledger.list::<Tab>(&t).unwrap().len(), 1);
}

#[test]
fn test_concurrent_payments_never_exceed_total() {
    let (ledger, store) = create_test_ledger();
    let t = tenant("acme");
    let fixture = seed_catalog(&store, &t, Some(10.0), 10.0);
    let tab = open_tab(&ledger, &t, &fixture);
    send_order_with_items(&ledger, &t, tab.id, fixture.product.id, &[2]);

    const THREADS: usize = 6;
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let ledger = ledger.clone();
            let barrier = barrier.clone();
            let t = t.clone();
            let tab_id = tab.id;
            thread::spawn(move || {
                barrier.wait();
                let payment = pay(&ledger, &t, tab_id, 10.0)?;
                ledger.confirm_payment(&t, payment.id)
            })
        })
        .collect();

    let confirmed = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|r| r.is_ok())
        .count();

    // 22.00 due fits two payments of 10.00
    assert_eq!(confirmed, 2);
    let tab: Tab = ledger.get(&t, tab.id).unwrap();
    assert_eq!(tab.paid_amount, 20.0);
    assert_eq!(tab.due_amount, 2.0);
}
