//! EyeSpy BLE — host entry point.
//!
//! Wires the connection-status characteristic between a WiFi monitor and a
//! GATT transport, then drives both from stdin so the notification path
//! can be exercised without a radio:
//!
//! ```text
//! <state> <reason>   WiFi observation, e.g. `1 0` (connected, none)
//! start | stop       peer StartNotify / StopNotify
//! read | write <v>   peer ReadValue / WriteValue (rejected: notify-only)
//! close              peer session closed
//! ```
//!
//! ```text
//!  stdin ──▶ WifiMonitor ──▶ ConnStatusCharacteristic ──▶ LogGatt
//!    └──────── GattRequest ──────────▲
//! ```

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};

use eyespy_ble::adapters::log_gatt::LogGatt;
use eyespy_ble::adapters::wifi::WifiMonitor;
use eyespy_ble::app::events::{DeviceState, StateReason};
use eyespy_ble::config::BridgeConfig;
use eyespy_ble::gatt::{self, CharacteristicContext, GattReply, GattRequest};
use eyespy_ble::ConnStatusCharacteristic;

const DEFAULT_CONFIG_PATH: &str = "/etc/eyespy/ble.json";

enum Command {
    Observe(DeviceState, StateReason),
    Request(GattRequest),
    SessionClosed,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let first = words.next()?;
    let cmd = match first {
        "start" => Command::Request(GattRequest::StartNotify),
        "stop" => Command::Request(GattRequest::StopNotify),
        "read" => Command::Request(GattRequest::ReadValue { offset: 0 }),
        "write" => Command::Request(GattRequest::WriteValue {
            value: words.next().unwrap_or_default().as_bytes().to_vec(),
            offset: 0,
        }),
        "close" => Command::SessionClosed,
        code => {
            let state = DeviceState::from_code(code.parse().ok()?)?;
            let reason = StateReason(words.next()?.parse().ok()?);
            Command::Observe(state, reason)
        }
    };
    Some(cmd)
}

fn main() -> Result<()> {
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = BridgeConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("EyeSpy BLE v{} on {}", env!("CARGO_PKG_VERSION"), config.adapter);

    let transport = Arc::new(LogGatt::new(&config.adapter));
    let mut wifi = WifiMonitor::new();
    let ctx = CharacteristicContext::new(&config.service_path, transport, config.characteristic_index)?;
    let conn_status = ConnStatusCharacteristic::new(ctx, &mut wifi)?;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Some(Command::Observe(state, reason)) => {
                // A delivery fault here is an environment error: stop.
                wifi.observe(state, reason)
                    .with_context(|| format!("delivering {state:?}/{reason}"))?;
            }
            Some(Command::Request(req)) => match gatt::dispatch(&conn_status, req) {
                GattReply::Error { name, message } => warn!("peer request rejected: {name} ({message})"),
                reply => info!("peer request ok: {reply:?}"),
            },
            Some(Command::SessionClosed) => conn_status.on_session_closed(),
            None => warn!("unrecognised input: {line:?}"),
        }
    }

    info!("stdin closed after {} WiFi transitions", wifi.transitions());
    Ok(())
}
