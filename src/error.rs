//! Error types for the EyeSpy BLE characteristics.
//!
//! Two families live here:
//!
//! - [`AdapterError`] — the closed BlueZ rejection vocabulary.  Any
//!   characteristic handler (read, write, notify toggle) returns one of
//!   these to refuse a request from the remote peer.  The transport turns
//!   the kind's D-Bus error name into the wire-level error reply.
//! - [`NotifyError`] / [`TransportError`] — failures while pushing a
//!   notification out through the GATT transport.  These are environment
//!   faults, not peer rejections, and are never mapped onto an
//!   [`AdapterError`].

use core::fmt;

// ───────────────────────────────────────────────────────────────
// Adapter error taxonomy
// ───────────────────────────────────────────────────────────────

/// The fixed set of BlueZ rejection reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterErrorKind {
    /// The operation is already running.
    InProgress,
    /// The characteristic does not support the operation.
    NotSupported,
    /// Policy forbids the operation.
    NotPermitted,
    /// The caller lacks authorisation.
    NotAuthorized,
    /// The written value has the wrong length.
    InvalidValueLength,
    /// Generic failure (ATT "unlikely error", 0x80).
    Failed,
}

impl AdapterErrorKind {
    pub const ALL: [Self; 6] = [
        Self::InProgress,
        Self::NotSupported,
        Self::NotPermitted,
        Self::NotAuthorized,
        Self::InvalidValueLength,
        Self::Failed,
    ];

    /// D-Bus error name BlueZ expects in the method error reply.
    pub const fn dbus_name(self) -> &'static str {
        match self {
            Self::InProgress => "org.bluez.Error.InProgress",
            Self::NotSupported => "org.bluez.Error.NotSupported",
            Self::NotPermitted => "org.bluez.Error.NotPermitted",
            Self::NotAuthorized => "org.bluez.Error.NotAuthorized",
            Self::InvalidValueLength => "org.bluez.Error.InvalidValueLength",
            Self::Failed => "org.bluez.Error.Failed(0x80)",
        }
    }

    /// Reverse lookup, used when a transport hands back a raw error name.
    pub fn from_dbus_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.dbus_name() == name)
    }
}

impl fmt::Display for AdapterErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "operation in progress"),
            Self::NotSupported => write!(f, "operation not supported"),
            Self::NotPermitted => write!(f, "operation not permitted"),
            Self::NotAuthorized => write!(f, "not authorized"),
            Self::InvalidValueLength => write!(f, "invalid value length"),
            Self::Failed => write!(f, "operation failed"),
        }
    }
}

/// A rejection raised by a characteristic operation.
///
/// Carries the kind (which fixes the protocol identifier) and an optional
/// human-readable message for the error reply body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterError {
    kind: AdapterErrorKind,
    message: Option<String>,
}

impl AdapterError {
    pub const fn new(kind: AdapterErrorKind) -> Self {
        Self { kind, message: None }
    }

    pub fn with_message(kind: AdapterErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
        }
    }

    pub const fn in_progress() -> Self {
        Self::new(AdapterErrorKind::InProgress)
    }

    pub const fn not_supported() -> Self {
        Self::new(AdapterErrorKind::NotSupported)
    }

    pub const fn not_permitted() -> Self {
        Self::new(AdapterErrorKind::NotPermitted)
    }

    pub const fn not_authorized() -> Self {
        Self::new(AdapterErrorKind::NotAuthorized)
    }

    pub const fn invalid_value_length() -> Self {
        Self::new(AdapterErrorKind::InvalidValueLength)
    }

    pub const fn failed() -> Self {
        Self::new(AdapterErrorKind::Failed)
    }

    pub const fn kind(&self) -> AdapterErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Shorthand for `self.kind().dbus_name()`.
    pub const fn dbus_name(&self) -> &'static str {
        self.kind.dbus_name()
    }
}

impl From<AdapterErrorKind> for AdapterError {
    fn from(kind: AdapterErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {} ({})", self.kind.dbus_name(), self.kind, msg),
            None => write!(f, "{}: {}", self.kind.dbus_name(), self.kind),
        }
    }
}

impl std::error::Error for AdapterError {}

// ───────────────────────────────────────────────────────────────
// Transport errors
// ───────────────────────────────────────────────────────────────

/// Failure reported by the GATT transport collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The bus connection is gone or was never established.
    Unavailable,
    /// Another object is already registered at the requested path.
    PathInUse,
    /// The transport refused the call for a stack-specific reason.
    Rejected(&'static str),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "GATT transport unavailable"),
            Self::PathInUse => write!(f, "object path already registered"),
            Self::Rejected(why) => write!(f, "GATT transport rejected call: {why}"),
        }
    }
}

impl std::error::Error for TransportError {}

// ───────────────────────────────────────────────────────────────
// Notification errors
// ───────────────────────────────────────────────────────────────

/// Failure to deliver a state-change notification.
#[derive(Debug)]
pub enum NotifyError {
    /// The payload could not be serialised.
    Encode(serde_json::Error),
    /// The transport could not emit the property change.
    Transport(TransportError),
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode(e) => write!(f, "payload encode: {e}"),
            Self::Transport(e) => write!(f, "transport: {e}"),
        }
    }
}

impl std::error::Error for NotifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encode(e) => Some(e),
            Self::Transport(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for NotifyError {
    fn from(e: serde_json::Error) -> Self {
        Self::Encode(e)
    }
}

impl From<TransportError> for NotifyError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

// ───────────────────────────────────────────────────────────────
// Setup errors
// ───────────────────────────────────────────────────────────────

/// Failure while wiring a characteristic to its collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// `<service_path>/char<index>` does not fit the path buffer.
    PathTooLong,
    /// The GATT transport refused the registration.
    Transport(TransportError),
    /// The WiFi state source has no room for another callback.
    CallbackTableFull,
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathTooLong => write!(f, "characteristic object path too long"),
            Self::Transport(e) => write!(f, "register characteristic: {e}"),
            Self::CallbackTableFull => write!(f, "WiFi state callback table full"),
        }
    }
}

impl std::error::Error for SetupError {}

impl From<TransportError> for SetupError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}
