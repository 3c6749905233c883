//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter    | Implements    | Connects to                   |
//! |------------|---------------|-------------------------------|
//! | `log_gatt` | GattPort      | Log output (bench / host run) |
//! | `wifi`     | WifiStatePort | Network supervisor / stdin    |

pub mod log_gatt;
pub mod wifi;
