//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  All tests run on the host with no Bluetooth
//! adapter or WiFi radio required.

mod dispatch_tests;
mod mock_gatt;
mod notify_scenarios;
