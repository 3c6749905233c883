//! End-to-end notification flow: WiFi monitor → characteristic → GATT.

use std::sync::Arc;

use eyespy_ble::adapters::wifi::WifiMonitor;
use eyespy_ble::app::events::{DeviceState, StateReason};
use eyespy_ble::gatt::{CharFlag, Characteristic, CharacteristicContext};
use eyespy_ble::payload::{self, StatusPayload};
use eyespy_ble::{ConnStatusCharacteristic, NotifyError, TransportError, CONN_STATUS_UUID};

use crate::mock_gatt::MockGatt;

const SERVICE_PATH: &str = "/org/bluez/eyespy/service0";

fn setup() -> (Arc<MockGatt>, WifiMonitor, ConnStatusCharacteristic<Arc<MockGatt>>) {
    let gatt = Arc::new(MockGatt::new());
    let mut wifi = WifiMonitor::new();
    let ctx = CharacteristicContext::new(SERVICE_PATH, Arc::clone(&gatt), 1).unwrap();
    let chr = ConnStatusCharacteristic::new(ctx, &mut wifi).unwrap();
    (gatt, wifi, chr)
}

fn decoded(gatt: &MockGatt) -> Vec<StatusPayload> {
    gatt.emissions()
        .iter()
        .map(|e| payload::decode(e.value().expect("single Value entry")).unwrap())
        .collect()
}

// ── Construction ──────────────────────────────────────────────

#[test]
fn registers_once_with_fixed_identity() {
    let (gatt, wifi, chr) = setup();
    let reg = gatt.registered.lock().unwrap();
    assert_eq!(reg.len(), 1);
    assert_eq!(reg[0].uuid, CONN_STATUS_UUID);
    assert!(reg[0].has_flag(CharFlag::Notify));
    assert!(!reg[0].has_flag(CharFlag::Read));
    assert!(!reg[0].has_flag(CharFlag::Write));
    assert_eq!(chr.path(), "/org/bluez/eyespy/service0/char1");
    assert_eq!(wifi.callback_count(), 1);
    assert!(!chr.is_notifying());
}

// ── Scenarios ─────────────────────────────────────────────────

#[test]
fn subscribed_peer_receives_connected() {
    let (gatt, mut wifi, chr) = setup();
    chr.start_notify().unwrap();
    wifi.observe(DeviceState::Connected, StateReason::NONE).unwrap();

    let emissions = gatt.emissions();
    assert_eq!(emissions.len(), 1);
    assert_eq!(emissions[0].value(), Some(&br#"{"State":1,"Reason":0}"#[..]));
    assert_eq!(emissions[0].interface, "org.bluez.GattCharacteristic1");
    assert_eq!(emissions[0].path, "/org/bluez/eyespy/service0/char1");
    assert!(emissions[0].invalidated.is_empty());
}

#[test]
fn unsubscribed_peer_receives_nothing() {
    let (gatt, mut wifi, _chr) = setup();
    wifi.observe(DeviceState::Disconnected, StateReason::AUTH_FAILED).unwrap();
    assert_eq!(gatt.emission_count(), 0);
}

#[test]
fn stop_after_start_suppresses() {
    let (gatt, mut wifi, chr) = setup();
    chr.start_notify().unwrap();
    chr.stop_notify().unwrap();
    wifi.observe(DeviceState::Connecting, StateReason::NONE).unwrap();
    assert_eq!(gatt.emission_count(), 0);
}

#[test]
fn only_active_windows_are_forwarded_in_order() {
    let (gatt, mut wifi, chr) = setup();

    chr.start_notify().unwrap();
    wifi.observe(DeviceState::Connecting, StateReason::NONE).unwrap(); // A
    chr.stop_notify().unwrap();
    wifi.observe(DeviceState::Failed, StateReason::SUPPLICANT_TIMEOUT).unwrap(); // B
    chr.start_notify().unwrap();
    wifi.observe(DeviceState::Connected, StateReason::NONE).unwrap(); // C

    assert_eq!(
        decoded(&gatt),
        vec![
            StatusPayload { state: 3, reason: 0 },
            StatusPayload { state: 1, reason: 0 },
        ]
    );
}

#[test]
fn no_replay_on_subscribe() {
    let (gatt, mut wifi, chr) = setup();
    wifi.observe(DeviceState::Connected, StateReason::NONE).unwrap();
    chr.start_notify().unwrap();
    assert_eq!(gatt.emission_count(), 0);
}

#[test]
fn start_and_stop_are_idempotent() {
    let (gatt, mut wifi, chr) = setup();
    chr.start_notify().unwrap();
    chr.start_notify().unwrap();
    assert!(chr.is_notifying());
    wifi.observe(DeviceState::Connected, StateReason::NONE).unwrap();
    assert_eq!(gatt.emission_count(), 1);

    chr.stop_notify().unwrap();
    chr.stop_notify().unwrap();
    assert!(!chr.is_notifying());
    wifi.observe(DeviceState::Disconnected, StateReason::USER_REQUESTED).unwrap();
    assert_eq!(gatt.emission_count(), 1);
}

// ── Failure propagation ───────────────────────────────────────

#[test]
fn transport_failure_reaches_wifi_caller_unchanged() {
    let (gatt, mut wifi, chr) = setup();
    chr.start_notify().unwrap();
    gatt.set_fail_emit(Some(TransportError::Unavailable));

    let err = wifi.observe(DeviceState::Connected, StateReason::NONE).unwrap_err();
    assert!(matches!(err, NotifyError::Transport(TransportError::Unavailable)));

    // No retry: recovering the transport does not resend the lost value.
    gatt.set_fail_emit(None);
    assert_eq!(gatt.emission_count(), 0);
    assert!(chr.is_notifying());
}

#[test]
fn transport_failure_while_idle_is_invisible() {
    let (gatt, mut wifi, _chr) = setup();
    gatt.set_fail_emit(Some(TransportError::Unavailable));
    assert!(wifi.observe(DeviceState::Connected, StateReason::NONE).is_ok());
}

// ── Threading ─────────────────────────────────────────────────

#[test]
fn toggles_from_another_thread() {
    let (gatt, mut wifi, chr) = setup();
    let chr = Arc::new(chr);

    let remote = Arc::clone(&chr);
    std::thread::spawn(move || remote.start_notify().unwrap())
        .join()
        .unwrap();
    wifi.observe(DeviceState::Connected, StateReason::NONE).unwrap();

    let remote = Arc::clone(&chr);
    std::thread::spawn(move || remote.stop_notify().unwrap())
        .join()
        .unwrap();
    wifi.observe(DeviceState::Disconnected, StateReason::CARRIER).unwrap();

    assert_eq!(gatt.emission_count(), 1);
}
