//! WiFi connection-status characteristic.
//!
//! Notify-only characteristic `136670fb-f95b-4ee8-bc3b-81eadb234268`.
//! While a peer is subscribed, every WiFi transition reported by the WiFi
//! manager is pushed out as
//!
//! ```text
//! {"State": <DeviceState code>, "Reason": <NMDeviceStateReason code>}
//! ```
//!
//! ## State machine
//!
//! ```text
//!            StartNotify              StartNotify
//!   ┌──────┐ ──────────▶ ┌────────┐ ◀──────────┐
//!   │ Idle │             │ Active │ ───────────┘
//!   └──────┘ ◀────────── └────────┘
//!      ▲ │   StopNotify /
//!      └─┘   session closed
//!  StopNotify
//! ```
//!
//! Transitions arriving in `Idle` are dropped silently; there is no queue
//! and nothing is replayed on subscribe.
//!
//! ## Locking
//!
//! The notify flag is touched from two call paths: BlueZ request dispatch
//! and the WiFi manager's thread.  A single mutex guards it and is held
//! across the emit, so once `stop_notify` returns no further notification
//! leaves this characteristic.  The transport must not re-enter the
//! characteristic from inside `emit_property_changed`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};

use crate::app::events::ConnectionStateEvent;
use crate::app::ports::{GattPort, WifiStatePort};
use crate::error::{AdapterError, NotifyError, SetupError};
use crate::gatt::{
    self, CharFlag, Characteristic, CharacteristicContext, CharacteristicSpec, ObjectPath,
    PropertyValue, GATT_CHARACTERISTIC_IFACE, PROP_VALUE,
};
use crate::payload;

// ───────────────────────────────────────────────────────────────
// Constants
// ───────────────────────────────────────────────────────────────

pub const CONN_STATUS_UUID: u128 = 0x1366_70fb_f95b_4ee8_bc3b_81ea_db23_4268;

const CONN_STATUS_FLAGS: &[CharFlag] = &[CharFlag::Notify];

// ───────────────────────────────────────────────────────────────
// Shared state
// ───────────────────────────────────────────────────────────────

struct Shared<G> {
    notifying: Mutex<bool>,
    gatt: G,
    path: ObjectPath,
}

impl<G> Shared<G> {
    fn flag(&self) -> MutexGuard<'_, bool> {
        // A panic elsewhere cannot leave a bool half-written.
        self.notifying.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<G: GattPort> Shared<G> {
    fn on_state_change(&self, ev: ConnectionStateEvent) -> Result<(), NotifyError> {
        let notifying = self.flag();
        if !*notifying {
            debug!("ConnStatus: {:?}/{} dropped (not notifying)", ev.state, ev.reason);
            return Ok(());
        }

        let value = payload::encode(&ev)?;
        debug!(
            "ConnStatus: notify {}",
            core::str::from_utf8(&value).unwrap_or("<non-utf8>")
        );
        let changed = [(PROP_VALUE, PropertyValue::Bytes(value))];
        self.gatt
            .emit_property_changed(&self.path, GATT_CHARACTERISTIC_IFACE, &changed, &[])
            .inspect_err(|e| warn!("ConnStatus: emit failed — {}", e))?;
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Characteristic
// ───────────────────────────────────────────────────────────────

/// Bridges WiFi state transitions to GATT notifications.
///
/// Construct once per process: the WiFi manager keeps the callback for
/// its whole lifetime.
pub struct ConnStatusCharacteristic<G> {
    shared: Arc<Shared<G>>,
    spec: CharacteristicSpec,
}

impl<G> ConnStatusCharacteristic<G>
where
    G: GattPort + Send + Sync + 'static,
{
    /// Register the characteristic with the transport and subscribe to
    /// `wifi`.  Starts in the `Idle` state.
    pub fn new<W>(ctx: CharacteristicContext<G>, wifi: &mut W) -> Result<Self, SetupError>
    where
        W: WifiStatePort + ?Sized,
    {
        let path = gatt::characteristic_path(&ctx.service_path, ctx.index)?;
        let spec = CharacteristicSpec {
            uuid: CONN_STATUS_UUID,
            flags: CONN_STATUS_FLAGS,
            index: ctx.index,
            path: path.clone(),
        };
        ctx.transport.register_characteristic(&spec)?;

        let shared = Arc::new(Shared {
            notifying: Mutex::new(false),
            gatt: ctx.transport,
            path,
        });
        let cb = Arc::clone(&shared);
        wifi.register_state_callback(Box::new(move |ev| cb.on_state_change(ev)))?;

        info!(
            "ConnStatus: registered {} at {}",
            gatt::format_uuid(CONN_STATUS_UUID),
            spec.path
        );
        Ok(Self { shared, spec })
    }
}

impl<G> ConnStatusCharacteristic<G> {
    pub fn spec(&self) -> &CharacteristicSpec {
        &self.spec
    }

    pub fn path(&self) -> &str {
        &self.spec.path
    }

    pub fn is_notifying(&self) -> bool {
        *self.shared.flag()
    }

    /// The peer's session went away; behave as if it unsubscribed.
    pub fn on_session_closed(&self) {
        let mut notifying = self.shared.flag();
        if *notifying {
            info!("ConnStatus: session closed, notifications off");
        }
        *notifying = false;
    }
}

impl<G> Characteristic for ConnStatusCharacteristic<G> {
    fn uuid(&self) -> u128 {
        CONN_STATUS_UUID
    }

    fn flags(&self) -> &'static [CharFlag] {
        CONN_STATUS_FLAGS
    }

    /// Always succeeds; repeated calls are no-ops.
    fn start_notify(&self) -> Result<(), AdapterError> {
        info!("ConnStatus: start notification");
        *self.shared.flag() = true;
        Ok(())
    }

    /// Always succeeds; repeated calls are no-ops.
    fn stop_notify(&self) -> Result<(), AdapterError> {
        info!("ConnStatus: stop notification");
        *self.shared.flag() = false;
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
