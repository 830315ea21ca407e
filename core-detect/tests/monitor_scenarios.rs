//! End-to-end monitor scenarios against the simulated host

use bridge_sim::SimulatedHost;
use bridge_traits::broadcast::{actions, extras, BroadcastIntent};
use bridge_traits::AudioDeviceType;
use core_detect::{DeviceState, DeviceStateMonitor, MonitorState};
use core_runtime::config::{MonitorConfig, AUDIO_DEVICE_CHANGED_NOTIFICATION};
use core_runtime::events::{CoreEvent, MonitorEvent, RouteEvent};
use serde_json::json;

fn setup() -> (SimulatedHost, DeviceStateMonitor) {
    let host = SimulatedHost::new();
    let config = MonitorConfig::builder()
        .audio_manager(host.audio.clone())
        .bluetooth_adapter(host.bluetooth.clone())
        .broadcast_registry(host.broadcasts.clone())
        .event_emitter(host.emitter.clone())
        .build()
        .expect("complete config");

    let monitor = DeviceStateMonitor::new(config).expect("valid config");
    (host, monitor)
}

fn headset_plug(state: i64) -> BroadcastIntent {
    BroadcastIntent::new(actions::HEADSET_PLUG).with_int_extra(extras::HEADSET_STATE, state)
}

#[test]
fn test_no_matching_devices_reports_nothing() {
    let (host, monitor) = setup();
    assert_eq!(monitor.query_state(), DeviceState::DISCONNECTED);

    host.audio.connect(1, AudioDeviceType::BuiltinSpeaker);
    host.audio.connect(2, AudioDeviceType::Hdmi);
    host.audio.connect(3, AudioDeviceType::UsbDevice);

    assert_eq!(monitor.query_state(), DeviceState::DISCONNECTED);
}

#[test]
fn test_adapter_off_overrides_bluetooth_devices() {
    let (host, monitor) = setup();
    host.audio.connect(1, AudioDeviceType::BluetoothA2dp);
    host.audio.connect(2, AudioDeviceType::BluetoothSco);
    host.audio.connect(3, AudioDeviceType::BleHeadset);
    host.bluetooth.set_enabled(false);

    assert!(!monitor.query_state().bluetooth);
}

#[test]
fn test_each_wired_type_sets_audio_jack() {
    let (host, monitor) = setup();

    for device_type in [
        AudioDeviceType::WiredHeadphones,
        AudioDeviceType::WiredHeadset,
        AudioDeviceType::UsbHeadset,
    ] {
        host.audio.set_devices(Vec::new());
        assert!(!monitor.query_state().audio_jack);

        host.audio.connect(7, device_type);
        assert!(monitor.query_state().audio_jack, "{:?}", device_type);
    }
}

#[test]
fn test_each_bluetooth_type_sets_bluetooth_when_enabled() {
    let (host, monitor) = setup();

    for device_type in [
        AudioDeviceType::BluetoothA2dp,
        AudioDeviceType::BluetoothSco,
        AudioDeviceType::BleHeadset,
    ] {
        host.audio.set_devices(Vec::new());
        host.audio.connect(9, device_type);

        assert_eq!(
            monitor.query_state(),
            DeviceState::new(false, true),
            "{:?}",
            device_type
        );
    }
}

#[test]
fn test_wired_and_bluetooth_together() {
    let (host, monitor) = setup();
    host.audio.connect(1, AudioDeviceType::WiredHeadset);
    host.audio.connect(2, AudioDeviceType::BluetoothA2dp);

    assert_eq!(monitor.query_state(), DeviceState::new(true, true));
}

#[test]
fn test_activation_is_idempotent() {
    let (host, monitor) = setup();

    monitor.activate();
    let first = monitor.receiver_id();
    monitor.activate();

    assert_eq!(monitor.receiver_id(), first);
    assert_eq!(host.broadcasts.registration_count(), 1);

    let delivered = host.broadcasts.send_broadcast(&headset_plug(1));
    assert_eq!(delivered, 1);
    assert_eq!(host.emitter.events().len(), 1);
}

#[test]
fn test_deactivate_without_activation_is_noop() {
    let (host, monitor) = setup();
    let mut events = monitor.subscribe_events();

    monitor.deactivate();
    monitor.deactivate();

    assert_eq!(monitor.state(), MonitorState::Inactive);
    assert_eq!(host.broadcasts.registration_count(), 0);
    assert!(events.try_recv().is_none());
}

#[test]
fn test_headset_plug_emits_one_fresh_snapshot() {
    let (host, monitor) = setup();
    monitor.activate();

    host.audio.connect(1, AudioDeviceType::WiredHeadset);
    host.broadcasts.send_broadcast(&headset_plug(1));

    let events = host.emitter.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, AUDIO_DEVICE_CHANGED_NOTIFICATION);
    assert_eq!(
        events[0].payload,
        json!({ "audioJack": true, "bluetooth": false })
    );
}

#[test]
fn test_signal_payload_is_not_trusted() {
    let (host, monitor) = setup();
    monitor.activate();

    // Intent claims a plug, but no wired device is enumerated
    host.broadcasts.send_broadcast(&headset_plug(1));

    assert_eq!(
        host.emitter.last_event().unwrap().payload,
        json!({ "audioJack": false, "bluetooth": false })
    );
}

#[test]
fn test_no_notification_after_deactivate() {
    let (host, monitor) = setup();
    monitor.activate();
    monitor.deactivate();

    host.audio.connect(1, AudioDeviceType::WiredHeadphones);
    let delivered = host.broadcasts.send_broadcast(&headset_plug(1));

    assert_eq!(delivered, 0);
    assert!(host.emitter.events().is_empty());
    assert!(!monitor.is_active());
}

#[test]
fn test_reactivation_after_pause() {
    let (host, monitor) = setup();
    monitor.activate();
    let first = monitor.receiver_id().unwrap();
    monitor.deactivate();
    monitor.activate();

    let second = monitor.receiver_id().unwrap();
    assert_ne!(first, second);
    assert_eq!(host.broadcasts.registration_count(), 1);
}

#[test]
fn test_every_monitored_signal_notifies() {
    let (host, monitor) = setup();
    monitor.activate();

    let intents = [
        headset_plug(0),
        BroadcastIntent::new(actions::BLUETOOTH_ADAPTER_STATE_CHANGED)
            .with_int_extra(extras::BLUETOOTH_ADAPTER_STATE, 12),
        BroadcastIntent::new(actions::BLUETOOTH_CONNECTION_STATE_CHANGED),
        BroadcastIntent::new(actions::BLUETOOTH_ACL_CONNECTED)
            .with_string_extra(extras::BLUETOOTH_DEVICE_ADDRESS, "AA:BB:CC:DD:EE:FF"),
        BroadcastIntent::new(actions::BLUETOOTH_ACL_DISCONNECTED),
        BroadcastIntent::new(actions::SCO_AUDIO_STATE_UPDATED)
            .with_int_extra(extras::SCO_AUDIO_STATE, 1),
        BroadcastIntent::new(actions::AUDIO_BECOMING_NOISY),
    ];

    for intent in &intents {
        host.broadcasts.send_broadcast(intent);
    }

    assert_eq!(
        host.emitter
            .events_named(AUDIO_DEVICE_CHANGED_NOTIFICATION)
            .len(),
        intents.len()
    );
}

#[test]
fn test_bluetooth_connect_flow() {
    let (host, monitor) = setup();
    monitor.activate();

    host.audio.connect(4, AudioDeviceType::BluetoothA2dp);
    host.broadcasts.send_broadcast(
        &BroadcastIntent::new(actions::BLUETOOTH_ACL_CONNECTED)
            .with_string_extra(extras::BLUETOOTH_DEVICE_ADDRESS, "00:11:22:33:44:55"),
    );

    host.bluetooth.set_enabled(false);
    host.broadcasts.send_broadcast(
        &BroadcastIntent::new(actions::BLUETOOTH_ADAPTER_STATE_CHANGED)
            .with_int_extra(extras::BLUETOOTH_ADAPTER_STATE, 10),
    );

    let payloads: Vec<_> = host.emitter.events().into_iter().map(|e| e.payload).collect();
    assert_eq!(
        payloads,
        vec![
            json!({ "audioJack": false, "bluetooth": true }),
            json!({ "audioJack": false, "bluetooth": false }),
        ]
    );
}

#[test]
fn test_emitter_failure_is_swallowed() {
    let (host, monitor) = setup();
    let mut events = monitor
        .subscribe_events()
        .filter(|e| matches!(e, CoreEvent::Monitor(_)));
    monitor.activate();
    host.emitter.set_failing(true);

    host.broadcasts.send_broadcast(&headset_plug(1));

    assert!(monitor.is_active());
    assert!(matches!(
        events.try_recv(),
        Some(Ok(CoreEvent::Monitor(MonitorEvent::Activated { .. })))
    ));
    assert!(matches!(
        events.try_recv(),
        Some(Ok(CoreEvent::Monitor(MonitorEvent::NotificationFailed { .. })))
    ));
}

#[tokio::test]
async fn test_route_events_published_on_bus() {
    let (host, monitor) = setup();
    let mut routes = monitor
        .subscribe_events()
        .filter(|e| matches!(e, CoreEvent::Route(_)));
    monitor.activate();

    host.audio.connect(1, AudioDeviceType::UsbHeadset);
    host.broadcasts
        .send_broadcast(&BroadcastIntent::new(actions::AUDIO_BECOMING_NOISY));

    let event = routes.recv().await.unwrap();
    assert_eq!(
        event,
        CoreEvent::Route(RouteEvent::Changed {
            audio_jack: true,
            bluetooth: false,
            signal: "AUDIO_BECOMING_NOISY".to_string(),
        })
    );
}
