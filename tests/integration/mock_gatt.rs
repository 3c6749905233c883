//! Mock GATT transport for integration tests.
//!
//! Records every registration and property change so tests can assert on
//! the full emission history without a D-Bus connection.

use std::sync::Mutex;

use eyespy_ble::app::ports::GattPort;
use eyespy_ble::gatt::{CharacteristicSpec, PropertyValue};
use eyespy_ble::TransportError;

// ── Emission record ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    pub path: String,
    pub interface: String,
    pub changed: Vec<(String, PropertyValue)>,
    pub invalidated: Vec<String>,
}

impl Emission {
    /// The `"Value"` bytes, if this emission carries exactly that property.
    pub fn value(&self) -> Option<&[u8]> {
        match self.changed.as_slice() {
            [(name, PropertyValue::Bytes(b))] if name == "Value" => Some(b),
            _ => None,
        }
    }
}

// ── MockGatt ──────────────────────────────────────────────────

#[derive(Default)]
pub struct MockGatt {
    pub registered: Mutex<Vec<CharacteristicSpec>>,
    pub emissions: Mutex<Vec<Emission>>,
    /// When set, `emit_property_changed` fails with this error.
    pub fail_emit: Mutex<Option<TransportError>>,
}

#[allow(dead_code)]
impl MockGatt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emissions(&self) -> Vec<Emission> {
        self.emissions.lock().unwrap().clone()
    }

    pub fn emission_count(&self) -> usize {
        self.emissions.lock().unwrap().len()
    }

    pub fn set_fail_emit(&self, err: Option<TransportError>) {
        *self.fail_emit.lock().unwrap() = err;
    }
}

impl GattPort for MockGatt {
    fn register_characteristic(&self, spec: &CharacteristicSpec) -> Result<(), TransportError> {
        self.registered.lock().unwrap().push(spec.clone());
        Ok(())
    }

    fn emit_property_changed(
        &self,
        path: &str,
        interface: &str,
        changed: &[(&str, PropertyValue)],
        invalidated: &[&str],
    ) -> Result<(), TransportError> {
        if let Some(err) = self.fail_emit.lock().unwrap().clone() {
            return Err(err);
        }
        self.emissions.lock().unwrap().push(Emission {
            path: path.to_owned(),
            interface: interface.to_owned(),
            changed: changed
                .iter()
                .map(|(k, v)| ((*k).to_owned(), v.clone()))
                .collect(),
            invalidated: invalidated.iter().map(|s| (*s).to_owned()).collect(),
        });
        Ok(())
    }
}
