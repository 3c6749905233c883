//! GATT characteristic vocabulary shared by every EyeSpy characteristic.
//!
//! BlueZ exposes a peripheral's GATT database as D-Bus objects.  Each
//! characteristic lives at `<service_path>/char<index>`, implements
//! `org.bluez.GattCharacteristic1`, and reports value changes through
//! `PropertiesChanged`.  This module owns the pieces of that contract that
//! do not depend on a particular bus binding:
//!
//! - [`CharFlag`] — capability flags as BlueZ spells them.
//! - [`CharacteristicContext`] / [`CharacteristicSpec`] — registration data.
//! - [`Characteristic`] — the method surface, with rejecting defaults.
//! - [`dispatch`] — turns a peer request into a reply, mapping
//!   [`AdapterError`] onto its D-Bus error name.

use core::fmt::Write;

use crate::error::{AdapterError, SetupError};

// ───────────────────────────────────────────────────────────────
// Constants
// ───────────────────────────────────────────────────────────────

/// D-Bus interface every characteristic object implements.
pub const GATT_CHARACTERISTIC_IFACE: &str = "org.bluez.GattCharacteristic1";

/// Property carrying the characteristic value in `PropertiesChanged`.
pub const PROP_VALUE: &str = "Value";

const MAX_PATH_LEN: usize = 96;

/// A D-Bus object path in a fixed-capacity buffer.
pub type ObjectPath = heapless::String<MAX_PATH_LEN>;

// ───────────────────────────────────────────────────────────────
// Flags
// ───────────────────────────────────────────────────────────────

/// Characteristic capability flags (subset of the BlueZ `Flags` property).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharFlag {
    Read,
    Write,
    WriteWithoutResponse,
    Notify,
    Indicate,
    EncryptRead,
    EncryptWrite,
}

impl CharFlag {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::WriteWithoutResponse => "write-without-response",
            Self::Notify => "notify",
            Self::Indicate => "indicate",
            Self::EncryptRead => "encrypt-read",
            Self::EncryptWrite => "encrypt-write",
        }
    }
}

// ───────────────────────────────────────────────────────────────
// UUID / path helpers
// ───────────────────────────────────────────────────────────────

/// Render a 128-bit UUID in canonical lowercase 8-4-4-4-12 form.
pub fn format_uuid(uuid: u128) -> heapless::String<36> {
    let mut out = heapless::String::new();
    let b = uuid.to_be_bytes();
    for (i, byte) in b.iter().enumerate() {
        if matches!(i, 4 | 6 | 8 | 10) {
            let _ = out.push('-');
        }
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Build `<service_path>/char<index>`.
pub fn characteristic_path(service_path: &str, index: u16) -> Result<ObjectPath, SetupError> {
    let mut path = ObjectPath::new();
    write!(path, "{service_path}/char{index}").map_err(|_| SetupError::PathTooLong)?;
    Ok(path)
}

// ───────────────────────────────────────────────────────────────
// Registration data
// ───────────────────────────────────────────────────────────────

/// What a host service hands a characteristic at construction.
#[derive(Debug, Clone)]
pub struct CharacteristicContext<G> {
    /// Object path of the owning GATT service.
    pub service_path: ObjectPath,
    /// Transport handle used for registration and signal emission.
    pub transport: G,
    /// Position among sibling characteristics of the same service.
    pub index: u16,
}

impl<G> CharacteristicContext<G> {
    pub fn new(service_path: &str, transport: G, index: u16) -> Result<Self, SetupError> {
        let service_path = ObjectPath::try_from(service_path).map_err(|()| SetupError::PathTooLong)?;
        Ok(Self {
            service_path,
            transport,
            index,
        })
    }
}

/// The record a transport needs to export one characteristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacteristicSpec {
    pub uuid: u128,
    pub flags: &'static [CharFlag],
    pub index: u16,
    pub path: ObjectPath,
}

impl CharacteristicSpec {
    pub fn has_flag(&self, flag: CharFlag) -> bool {
        self.flags.contains(&flag)
    }
}

/// A property value inside a `PropertiesChanged` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Bytes(Vec<u8>),
    Bool(bool),
}

// ───────────────────────────────────────────────────────────────
// Characteristic trait
// ───────────────────────────────────────────────────────────────

/// The `org.bluez.GattCharacteristic1` method surface.
///
/// Every operation defaults to `NotSupported`; implementors override only
/// what their flags advertise.
pub trait Characteristic {
    fn uuid(&self) -> u128;

    fn flags(&self) -> &'static [CharFlag];

    fn read_value(&self, _offset: u16) -> Result<Vec<u8>, AdapterError> {
        Err(AdapterError::not_supported())
    }

    fn write_value(&self, _value: &[u8], _offset: u16) -> Result<(), AdapterError> {
        Err(AdapterError::not_supported())
    }

    fn start_notify(&self) -> Result<(), AdapterError> {
        Err(AdapterError::not_supported())
    }

    fn stop_notify(&self) -> Result<(), AdapterError> {
        Err(AdapterError::not_supported())
    }
}

// ───────────────────────────────────────────────────────────────
// Transport-boundary dispatch
// ───────────────────────────────────────────────────────────────

/// A method call arriving from the remote peer via BlueZ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GattRequest {
    ReadValue { offset: u16 },
    WriteValue { value: Vec<u8>, offset: u16 },
    StartNotify,
    StopNotify,
}

/// What the transport sends back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GattReply {
    Value(Vec<u8>),
    Done,
    /// D-Bus error reply: error name plus message body.
    Error { name: &'static str, message: String },
}

impl From<AdapterError> for GattReply {
    fn from(e: AdapterError) -> Self {
        let message = e.message().map_or_else(|| e.kind().to_string(), str::to_owned);
        Self::Error {
            name: e.dbus_name(),
            message,
        }
    }
}

/// Run `req` against `chr` and translate the outcome for the wire.
pub fn dispatch<C: Characteristic + ?Sized>(chr: &C, req: GattRequest) -> GattReply {
    let result = match req {
        GattRequest::ReadValue { offset } => chr.read_value(offset).map(GattReply::Value),
        GattRequest::WriteValue { value, offset } => {
            chr.write_value(&value, offset).map(|()| GattReply::Done)
        }
        GattRequest::StartNotify => chr.start_notify().map(|()| GattReply::Done),
        GattRequest::StopNotify => chr.stop_notify().map(|()| GattReply::Done),
    };
    result.unwrap_or_else(|e| {
        log::debug!("GATT {}: rejected with {}", format_uuid(chr.uuid()), e.dbus_name());
        GattReply::from(e)
    })
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
