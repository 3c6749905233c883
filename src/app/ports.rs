//! Port traits — the boundary between the characteristics and the outside world.
//!
//! ```text
//!   WiFi manager ──▶ WifiStatePort ──▶ ConnStatusCharacteristic ──▶ GattPort ──▶ BlueZ
//! ```
//!
//! The GATT transport and the WiFi manager are external collaborators.
//! Adapters in [`crate::adapters`] implement these traits for the host;
//! tests supply recording mocks.

use std::sync::Arc;

use crate::error::{NotifyError, SetupError, TransportError};
use crate::gatt::{CharacteristicSpec, PropertyValue};

use super::events::ConnectionStateEvent;

// ───────────────────────────────────────────────────────────────
// GATT transport port (driven adapter: characteristic → BlueZ)
// ───────────────────────────────────────────────────────────────

/// The two primitives the characteristics need from the GATT layer.
///
/// Implementations take `&self`: one transport handle (a bus connection)
/// is shared by every characteristic of the service and must tolerate
/// calls from the WiFi manager's thread.
pub trait GattPort {
    /// Export a characteristic object.
    fn register_characteristic(&self, spec: &CharacteristicSpec) -> Result<(), TransportError>;

    /// Emit `org.freedesktop.DBus.Properties.PropertiesChanged` on `path`.
    fn emit_property_changed(
        &self,
        path: &str,
        interface: &str,
        changed: &[(&str, PropertyValue)],
        invalidated: &[&str],
    ) -> Result<(), TransportError>;
}

impl<T: GattPort + ?Sized> GattPort for Arc<T> {
    fn register_characteristic(&self, spec: &CharacteristicSpec) -> Result<(), TransportError> {
        (**self).register_characteristic(spec)
    }

    fn emit_property_changed(
        &self,
        path: &str,
        interface: &str,
        changed: &[(&str, PropertyValue)],
        invalidated: &[&str],
    ) -> Result<(), TransportError> {
        (**self).emit_property_changed(path, interface, changed, invalidated)
    }
}

// ───────────────────────────────────────────────────────────────
// WiFi state port (driving adapter: WiFi manager → characteristic)
// ───────────────────────────────────────────────────────────────

/// Callback invoked synchronously on every WiFi transition.
///
/// An `Err` is a delivery fault and is returned to whoever drove the
/// transition; the source must not swallow it.
pub type StateCallback = Box<dyn FnMut(ConnectionStateEvent) -> Result<(), NotifyError> + Send>;

/// A source of WiFi connection-state transitions.
///
/// Registrations last for the lifetime of the source; there is no
/// unregister.
pub trait WifiStatePort {
    fn register_state_callback(&mut self, callback: StateCallback) -> Result<(), SetupError>;
}
