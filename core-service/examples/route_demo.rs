//! Audio route detection demonstration
//!
//! Drives the module through a simulated host: lifecycle transitions, wired
//! and Bluetooth connections, and an adapter power-off.
//!
//! Run with:
//! ```bash
//! # Pretty format (default in debug)
//! cargo run -p core-service --example route_demo
//!
//! # JSON format
//! cargo run -p core-service --example route_demo -- json
//!
//! # With custom filter
//! cargo run -p core-service --example route_demo -- compact "core_detect=trace"
//! ```

use bridge_traits::broadcast::{actions, extras, BroadcastIntent};
use bridge_traits::{AudioDeviceType, HostLifecycleListener, LogLevel};
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use core_service::bootstrap_simulated;
use std::env;
use tracing::{info, span, Level};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: Vec<String> = env::args().collect();

    let format = match args.get(1).map(String::as_str) {
        Some("json") => LogFormat::Json,
        Some("compact") => LogFormat::Compact,
        Some("pretty") => LogFormat::Pretty,
        _ => LogFormat::default(),
    };

    let mut config = LoggingConfig::default()
        .with_format(format)
        .with_level(LogLevel::Debug)
        .with_spans(true);

    if let Some(filter) = args.get(2) {
        config = config.with_filter(filter.clone());
    }

    init_logging(config).expect("Failed to initialize logging");

    let (module, host) = bootstrap_simulated().expect("Failed to bootstrap module");
    info!(module = module.name(), constants = ?module.constants(), "=== Route Demo ===");

    module.initialize();

    {
        let span = span!(Level::INFO, "wired");
        let _enter = span.enter();

        host.audio.connect(1, AudioDeviceType::WiredHeadset);
        host.broadcasts.send_broadcast(
            &BroadcastIntent::new(actions::HEADSET_PLUG)
                .with_int_extra(extras::HEADSET_STATE, 1)
                .with_string_extra(extras::HEADSET_NAME, "h2w"),
        );
    }

    {
        let span = span!(Level::INFO, "bluetooth");
        let _enter = span.enter();

        host.audio.connect(2, AudioDeviceType::BluetoothA2dp);
        host.broadcasts.send_broadcast(
            &BroadcastIntent::new(actions::BLUETOOTH_ACL_CONNECTED)
                .with_string_extra(extras::BLUETOOTH_DEVICE_ADDRESS, "00:1A:7D:DA:71:13"),
        );

        host.bluetooth.set_enabled(false);
        host.broadcasts.send_broadcast(
            &BroadcastIntent::new(actions::BLUETOOTH_ADAPTER_STATE_CHANGED)
                .with_int_extra(extras::BLUETOOTH_ADAPTER_STATE, 10),
        );
    }

    module.on_host_pause();
    host.broadcasts
        .send_broadcast(&BroadcastIntent::new(actions::AUDIO_BECOMING_NOISY));

    let state = module.is_audio_device_connected().await;
    info!(
        audio_jack = state.audio_jack,
        bluetooth = state.bluetooth,
        notifications = host.emitter.events().len(),
        "=== Demo Complete ==="
    );

    module.on_host_destroy();
}
