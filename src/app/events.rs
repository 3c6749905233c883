//! WiFi connection-state events.
//!
//! The WiFi manager constructs a [`ConnectionStateEvent`] at the moment it
//! detects a transition and hands it to every registered callback by value.
//! Both halves are defined outside this crate; only their numeric codes
//! cross the BLE link.

use core::fmt;

/// Connection state as published by the camera's WiFi manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DeviceState {
    /// No state has been observed yet.
    Unknown = 0,
    /// Associated and holding an IP configuration.
    Connected = 1,
    /// Not associated with any access point.
    Disconnected = 2,
    /// Association or IP configuration in progress.
    Connecting = 3,
    /// The last connection attempt failed.
    Failed = 4,
}

impl DeviceState {
    /// Numeric code carried in the `"State"` field.
    pub const fn code(self) -> u32 {
        self as u32
    }

    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Unknown),
            1 => Some(Self::Connected),
            2 => Some(Self::Disconnected),
            3 => Some(Self::Connecting),
            4 => Some(Self::Failed),
            _ => None,
        }
    }
}

/// Why a transition happened.
///
/// Values mirror NetworkManager's `NMDeviceStateReason`, which has dozens
/// of members and grows between releases, so unknown codes are carried
/// through untouched rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateReason(pub u32);

impl StateReason {
    pub const NONE: Self = Self(0);
    pub const UNKNOWN: Self = Self(1);
    pub const NOW_MANAGED: Self = Self(2);
    pub const NOW_UNMANAGED: Self = Self(3);
    pub const CONFIG_FAILED: Self = Self(4);
    pub const IP_CONFIG_UNAVAILABLE: Self = Self(5);
    pub const IP_CONFIG_EXPIRED: Self = Self(6);
    /// Secrets were required but rejected or missing (bad password).
    pub const AUTH_FAILED: Self = Self(7);
    pub const SUPPLICANT_DISCONNECT: Self = Self(8);
    pub const SUPPLICANT_CONFIG_FAILED: Self = Self(9);
    pub const SUPPLICANT_FAILED: Self = Self(10);
    pub const SUPPLICANT_TIMEOUT: Self = Self(11);
    pub const DHCP_FAILED: Self = Self(17);
    pub const USER_REQUESTED: Self = Self(39);
    pub const CARRIER: Self = Self(40);
    pub const SSID_NOT_FOUND: Self = Self(53);

    /// Numeric code carried in the `"Reason"` field.
    pub const fn code(self) -> u32 {
        self.0
    }
}

impl fmt::Display for StateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::NONE => "none",
            Self::UNKNOWN => "unknown",
            Self::NOW_MANAGED => "now-managed",
            Self::NOW_UNMANAGED => "now-unmanaged",
            Self::CONFIG_FAILED => "config-failed",
            Self::IP_CONFIG_UNAVAILABLE => "ip-config-unavailable",
            Self::IP_CONFIG_EXPIRED => "ip-config-expired",
            Self::AUTH_FAILED => "auth-failed",
            Self::SUPPLICANT_DISCONNECT => "supplicant-disconnect",
            Self::SUPPLICANT_CONFIG_FAILED => "supplicant-config-failed",
            Self::SUPPLICANT_FAILED => "supplicant-failed",
            Self::SUPPLICANT_TIMEOUT => "supplicant-timeout",
            Self::DHCP_FAILED => "dhcp-failed",
            Self::USER_REQUESTED => "user-requested",
            Self::CARRIER => "carrier",
            Self::SSID_NOT_FOUND => "ssid-not-found",
            Self(code) => return write!(f, "reason#{code}"),
        };
        f.write_str(name)
    }
}

/// One observed WiFi transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionStateEvent {
    pub state: DeviceState,
    pub reason: StateReason,
}

impl ConnectionStateEvent {
    pub const fn new(state: DeviceState, reason: StateReason) -> Self {
        Self { state, reason }
    }
}
