//! EyeSpy camera BLE library.
//!
//! Exposes the WiFi connection-status characteristic, the BlueZ error
//! vocabulary shared by every characteristic, and the port traits the
//! host binds to its GATT transport and WiFi manager.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod conn_status;
pub mod error;
pub mod gatt;
pub mod payload;

pub use conn_status::{ConnStatusCharacteristic, CONN_STATUS_UUID};
pub use error::{AdapterError, AdapterErrorKind, NotifyError, SetupError, TransportError};
