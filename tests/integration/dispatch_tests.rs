//! Peer requests routed through the transport-boundary dispatcher.

use std::sync::Arc;

use eyespy_ble::adapters::wifi::WifiMonitor;
use eyespy_ble::gatt::{dispatch, CharacteristicContext, GattReply, GattRequest};
use eyespy_ble::ConnStatusCharacteristic;

use crate::mock_gatt::MockGatt;

fn characteristic() -> ConnStatusCharacteristic<Arc<MockGatt>> {
    let mut wifi = WifiMonitor::new();
    let ctx = CharacteristicContext::new("/org/bluez/eyespy/service0", Arc::new(MockGatt::new()), 0)
        .unwrap();
    ConnStatusCharacteristic::new(ctx, &mut wifi).unwrap()
}

#[test]
fn notify_toggles_always_succeed() {
    let chr = characteristic();
    assert_eq!(dispatch(&chr, GattRequest::StartNotify), GattReply::Done);
    assert!(chr.is_notifying());
    assert_eq!(dispatch(&chr, GattRequest::StartNotify), GattReply::Done);
    assert_eq!(dispatch(&chr, GattRequest::StopNotify), GattReply::Done);
    assert!(!chr.is_notifying());
    assert_eq!(dispatch(&chr, GattRequest::StopNotify), GattReply::Done);
}

#[test]
fn read_is_rejected_as_not_supported() {
    let chr = characteristic();
    match dispatch(&chr, GattRequest::ReadValue { offset: 0 }) {
        GattReply::Error { name, .. } => assert_eq!(name, "org.bluez.Error.NotSupported"),
        other => panic!("expected error reply, got {other:?}"),
    }
}

#[test]
fn write_is_rejected_as_not_supported() {
    let chr = characteristic();
    let reply = dispatch(
        &chr,
        GattRequest::WriteValue {
            value: br#"{"State":1}"#.to_vec(),
            offset: 0,
        },
    );
    assert!(matches!(
        reply,
        GattReply::Error { name: "org.bluez.Error.NotSupported", .. }
    ));
    assert!(!chr.is_notifying());
}
