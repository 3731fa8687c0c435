//! Cash register session machine.

mod common;

use std::rc::Rc;

use common::{dec, TestRig};
use storefront_core::models::SessionStatus;
use storefront_core::services::{CashRegister, DataStore, SyncManager};
use storefront_core::{StateConflict, StoreError};

#[test]
fn open_then_close_stamps_both_ends() {
    let rig = TestRig::seeded();
    let register = CashRegister::new(rig.store.clone());

    let session = register.open(dec("150.00")).unwrap();
    assert_eq!(session.status, SessionStatus::Open);
    assert_eq!(session.starting_balance, dec("150.00"));
    assert!(session.closing_time.is_none());
    assert_eq!(register.active_session().unwrap().id, session.id);

    let closed = register.close().unwrap();
    assert_eq!(closed.id, session.id);
    assert_eq!(closed.status, SessionStatus::Closed);
    assert!(closed.closing_time.is_some());
    assert!(register.active_session().is_none());
}

#[test]
fn second_open_is_refused_while_a_session_runs() {
    let rig = TestRig::seeded();
    let register = CashRegister::new(rig.store.clone());

    register.open(dec("100.00")).unwrap();
    let err = register.open(dec("999.00")).unwrap_err();
    assert!(matches!(
        err,
        StoreError::StateConflict(StateConflict::AlreadyOpen)
    ));
    // The running session is untouched.
    assert_eq!(
        register.active_session().unwrap().starting_balance,
        dec("100.00")
    );
}

#[test]
fn close_without_a_session_is_refused() {
    let rig = TestRig::seeded();
    let register = CashRegister::new(rig.store.clone());

    let err = register.close().unwrap_err();
    assert!(matches!(
        err,
        StoreError::StateConflict(StateConflict::NoneOpen)
    ));
}

#[test]
fn closing_allows_a_fresh_session_and_keeps_history() {
    let rig = TestRig::seeded();
    let register = CashRegister::new(rig.store.clone());

    register.open(dec("100.00")).unwrap();
    register.close().unwrap();
    let second = register.open(dec("80.00")).unwrap();

    let history = rig.store.cash_register_history.get();
    assert_eq!(history.len(), 2);
    assert_eq!(history.iter().filter(|s| s.is_open()).count(), 1);
    assert_eq!(register.active_session().unwrap().id, second.id);
}

#[test]
fn sessions_survive_a_restart() {
    let rig = TestRig::seeded();
    let register = CashRegister::new(rig.store.clone());
    let session = register.open(dec("60.00")).unwrap();

    // Same namespace, fresh store: the open session hydrates back.
    let store = Rc::new(DataStore::new(rig.ns.clone()));
    SyncManager::new(store.clone(), rig.ns.clone()).hydrate();
    let register = CashRegister::new(store);
    assert_eq!(register.active_session().unwrap().id, session.id);
}
