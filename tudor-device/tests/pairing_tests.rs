use std::sync::Arc;
use tudor_device::{DeviceError, DeviceSession, PairingData, SessionConfig};
use tudor_ipc::{IpcError, MockHost, LOAD_PAIRING_DATA_METHOD, STORE_PAIRING_DATA_METHOD};
use tudor_types::{Value, ValueError};

const SENSOR: &str = "synaTudor0";

fn session(host: &Arc<MockHost>) -> DeviceSession {
    DeviceSession::new(host.clone(), SessionConfig::for_sensor(SENSOR))
}

// ── Load ─────────────────────────────────────────────────────────

#[tokio::test]
async fn load_without_stored_data_is_none() {
    let host = Arc::new(MockHost::new());
    let loaded = session(&host).load_pairing_data().await.unwrap();

    assert!(loaded.is_none());
    assert_eq!(host.called_methods(), vec![LOAD_PAIRING_DATA_METHOD]);
    assert_eq!(
        host.last_call_args(),
        Some(Value::Tuple(vec![Value::from(SENSOR)]))
    );
}

#[tokio::test]
async fn load_ignores_payload_when_host_has_no_data() {
    let host = Arc::new(MockHost::new());
    host.reply_next_call_with(Value::Tuple(vec![
        Value::Bool(false),
        Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef]),
    ]));

    let loaded = session(&host).load_pairing_data().await.unwrap();
    assert!(loaded.is_none());
}

#[tokio::test]
async fn load_returns_stored_bytes() {
    let host = Arc::new(MockHost::new().with_pairing_data(SENSOR, vec![5, 4, 3]));
    let loaded = session(&host).load_pairing_data().await.unwrap().unwrap();
    assert_eq!(loaded.as_bytes(), &[5, 4, 3]);
}

#[tokio::test]
async fn load_is_keyed_by_sensor_name() {
    let host = Arc::new(MockHost::new().with_pairing_data("otherSensor", vec![1]));
    assert!(session(&host).load_pairing_data().await.unwrap().is_none());
}

#[tokio::test]
async fn load_rejects_malformed_reply() {
    let host = Arc::new(MockHost::new());
    host.reply_next_call_with(Value::Tuple(vec![Value::Byte(1), Value::Bytes(vec![1])]));

    let err = session(&host).load_pairing_data().await.unwrap_err();
    match err {
        DeviceError::Io(IpcError::UnexpectedReply { expected, got }) => {
            assert_eq!(expected, "(bay)");
            assert_eq!(got, "(yay)");
        }
        other => panic!("expected UnexpectedReply, got {other:?}"),
    }
}

#[tokio::test]
async fn load_transport_failure_is_io() {
    let host = Arc::new(MockHost::new());
    host.fail_next(IpcError::ChannelClosed);
    let err = session(&host).load_pairing_data().await.unwrap_err();
    assert!(matches!(err, DeviceError::Io(IpcError::ChannelClosed)));
}

#[tokio::test]
async fn load_from_dead_host_is_io() {
    let host = Arc::new(MockHost::new());
    host.kill();
    let err = session(&host).load_pairing_data().await.unwrap_err();
    assert!(matches!(err, DeviceError::Io(IpcError::HostDied)));
}

#[tokio::test]
async fn sensor_name_with_nul_is_not_sent() {
    let host = Arc::new(MockHost::new());
    let session = DeviceSession::new(host.clone(), SessionConfig::for_sensor("sensor\0x"));

    let err = session.load_pairing_data().await.unwrap_err();
    assert!(matches!(err, DeviceError::Io(IpcError::Value(ValueError::InteriorNul))));

    let err = session
        .store_pairing_data(&PairingData::from_bytes(vec![1]))
        .await
        .unwrap_err();
    assert!(matches!(err, DeviceError::Io(IpcError::Value(ValueError::InteriorNul))));
    assert!(host.called_methods().is_empty());
}

// ── Store ────────────────────────────────────────────────────────

#[tokio::test]
async fn store_sends_sensor_name_and_payload() {
    let host = Arc::new(MockHost::new());
    let data = PairingData::from_bytes(vec![9, 8, 7]);

    session(&host).store_pairing_data(&data).await.unwrap();

    assert_eq!(host.called_methods(), vec![STORE_PAIRING_DATA_METHOD]);
    let args = host.last_call_args().unwrap();
    assert_eq!(args.signature(), "(say)");
    assert_eq!(args, Value::Tuple(vec![Value::from(SENSOR), Value::Bytes(vec![9, 8, 7])]));
    assert_eq!(host.pairing_data(SENSOR), Some(vec![9, 8, 7]));
}

#[tokio::test]
async fn store_failure_keeps_previous_data() {
    let host = Arc::new(MockHost::new().with_pairing_data(SENSOR, vec![1, 1]));
    host.fail_next(IpcError::Transport("host busy".into()));

    let err = session(&host)
        .store_pairing_data(&PairingData::from(vec![2, 2]))
        .await
        .unwrap_err();

    assert!(matches!(err, DeviceError::Io(IpcError::Transport(_))));
    assert_eq!(host.pairing_data(SENSOR), Some(vec![1, 1]));
}

#[tokio::test]
async fn store_then_load_roundtrip() {
    let host = Arc::new(MockHost::new());
    let session = session(&host);
    let payload: Vec<u8> = (0..=255).cycle().take(4096).collect();
    let data = PairingData::from_bytes(payload.clone());

    session.store_pairing_data(&data).await.unwrap();
    let loaded = session.load_pairing_data().await.unwrap().unwrap();

    assert_eq!(loaded, data);
    assert_eq!(loaded.as_bytes(), payload.as_slice());
}

#[tokio::test]
async fn empty_pairing_data_roundtrips_as_present() {
    let host = Arc::new(MockHost::new());
    let session = session(&host);

    session.store_pairing_data(&PairingData::from_bytes(vec![])).await.unwrap();
    let loaded = session.load_pairing_data().await.unwrap().unwrap();

    assert!(loaded.is_empty());
}

// ── PairingData ──────────────────────────────────────────────────

#[test]
fn pairing_data_debug_is_redacted() {
    let data = PairingData::from_bytes(vec![0x41; 8]);
    let debug = format!("{data:?}");
    assert!(debug.contains("REDACTED"));
    assert!(debug.contains("len: 8"));
    assert!(!debug.contains("65"));
}
