//! Log-backed GATT transport adapter.
//!
//! Implements [`GattPort`] by writing every registration and property
//! change to the `log` facade.  Used by the host binary and for bench
//! bring-up before the camera's BlueZ service is attached.

use std::collections::HashSet;
use std::sync::Mutex;

use log::info;

use crate::app::ports::GattPort;
use crate::error::TransportError;
use crate::gatt::{self, CharacteristicSpec, PropertyValue};

/// Transport that logs instead of talking to BlueZ.
pub struct LogGatt {
    adapter: String,
    paths: Mutex<HashSet<String>>,
}

impl LogGatt {
    pub fn new(adapter: &str) -> Self {
        Self {
            adapter: adapter.to_owned(),
            paths: Mutex::new(HashSet::new()),
        }
    }

    fn is_registered(&self, path: &str) -> bool {
        self.paths.lock().is_ok_and(|p| p.contains(path))
    }
}

impl GattPort for LogGatt {
    fn register_characteristic(&self, spec: &CharacteristicSpec) -> Result<(), TransportError> {
        let mut paths = self.paths.lock().map_err(|_| TransportError::Unavailable)?;
        if !paths.insert(spec.path.as_str().to_owned()) {
            return Err(TransportError::PathInUse);
        }
        let flags: Vec<&str> = spec.flags.iter().map(|f| f.as_str()).collect();
        info!(
            "GATT[{}] | register {} uuid={} flags={:?} index={}",
            self.adapter,
            spec.path,
            gatt::format_uuid(spec.uuid),
            flags,
            spec.index,
        );
        Ok(())
    }

    fn emit_property_changed(
        &self,
        path: &str,
        interface: &str,
        changed: &[(&str, PropertyValue)],
        invalidated: &[&str],
    ) -> Result<(), TransportError> {
        if !self.is_registered(path) {
            return Err(TransportError::Rejected("no object at path"));
        }
        for (name, value) in changed {
            match value {
                PropertyValue::Bytes(b) => info!(
                    "GATT[{}] | {} {}.{} = {}",
                    self.adapter,
                    path,
                    interface,
                    name,
                    String::from_utf8_lossy(b),
                ),
                PropertyValue::Bool(v) => {
                    info!("GATT[{}] | {} {}.{} = {}", self.adapter, path, interface, name, v);
                }
            }
        }
        if !invalidated.is_empty() {
            info!("GATT[{}] | {} invalidated {:?}", self.adapter, path, invalidated);
        }
        Ok(())
    }
}
