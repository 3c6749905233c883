//! Application core — events and port traits, zero I/O.
//!
//! Everything the characteristics touch outside this crate goes through
//! the traits in [`ports`], keeping the notification logic testable
//! without a Bluetooth adapter or a WiFi radio.

pub mod events;
pub mod ports;
