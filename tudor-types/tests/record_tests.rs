use tudor_types::{
    FingerTag, Print, PrintIdentity, PrintMetadata, Record, RecordGuid, Value, RECORD_SIGNATURE,
};

const DRIVER: &str = "tudor";

fn guid() -> RecordGuid {
    RecordGuid::from_bytes([0x42; 16])
}

fn record_value(reserved: Vec<u8>, finger: u8, guid: Vec<u8>) -> Value {
    Value::Tuple(vec![Value::Bytes(reserved), Value::Byte(finger), Value::Bytes(guid)])
}

// ── Decoding ─────────────────────────────────────────────────────

#[test]
fn decodes_well_formed_value() {
    let value = record_value(vec![], 6, vec![0x42; 16]);
    let identity = PrintIdentity::from_value(&value).unwrap();
    assert_eq!(identity.guid, guid());
    assert_eq!(identity.finger, FingerTag::RIGHT_THUMB);
}

#[test]
fn reserved_bytes_are_ignored() {
    let value = record_value(vec![9, 9, 9, 9], 2, vec![0x42; 16]);
    let identity = PrintIdentity::from_value(&value).unwrap();
    assert_eq!(identity.guid, guid());
    assert_eq!(identity.finger, FingerTag::LEFT_INDEX);
}

#[test]
fn rejects_malformed_shapes() {
    let shapes = [
        Value::Byte(1),
        Value::Bytes(vec![0x42; 16]),
        Value::Tuple(vec![]),
        Value::Tuple(vec![Value::Byte(1), Value::Bytes(vec![0x42; 16])]),
        Value::Tuple(vec![
            Value::Bytes(vec![]),
            Value::Bool(true),
            Value::Bytes(vec![0x42; 16]),
        ]),
        Value::Tuple(vec![
            Value::Bytes(vec![]),
            Value::Byte(1),
            Value::Str("not-a-guid".into()),
        ]),
        Value::Tuple(vec![
            Value::Bytes(vec![]),
            Value::Byte(1),
            Value::Bytes(vec![0x42; 16]),
            Value::Byte(0),
        ]),
    ];
    for shape in &shapes {
        assert!(
            PrintIdentity::from_value(shape).is_none(),
            "accepted {}",
            shape.signature()
        );
    }
}

#[test]
fn rejects_wrong_guid_length() {
    for len in [0, 1, 15, 17, 32] {
        let value = record_value(vec![], 1, vec![0x42; len]);
        assert!(PrintIdentity::from_value(&value).is_none(), "len {len}");
    }
}

#[test]
fn encode_matches_decode() {
    let identity = PrintIdentity {
        guid: guid(),
        finger: FingerTag::LEFT_LITTLE,
    };
    let value = identity.to_value(&[1, 2]);
    assert_eq!(value.signature(), RECORD_SIGNATURE);
    assert_eq!(PrintIdentity::from_value(&value), Some(identity));
}

#[test]
fn decodes_from_serialized_blob() {
    let mut blob = vec![0x01, 8];
    blob.extend([0x42; 16]);
    blob.push(1);

    let value = Value::parse_bytes(RECORD_SIGNATURE, &blob).unwrap();
    let identity = PrintIdentity::from_value(&value).unwrap();
    assert_eq!(identity.finger, FingerTag::RIGHT_MIDDLE);
    assert_eq!(identity.guid, guid());
}

// ── Driver / residency gate ──────────────────────────────────────

#[test]
fn print_of_other_driver_is_rejected() {
    let print = Print::new("synaptics")
        .with_device_stored(true)
        .with_data(record_value(vec![], 1, vec![0x42; 16]));
    assert!(PrintIdentity::from_print(&print, DRIVER).is_none());
}

#[test]
fn print_not_device_stored_is_rejected() {
    let print = Print::new(DRIVER).with_data(record_value(vec![], 1, vec![0x42; 16]));
    assert!(!print.is_device_stored());
    assert!(PrintIdentity::from_print(&print, DRIVER).is_none());
}

#[test]
fn print_without_data_is_rejected() {
    let print = Print::new(DRIVER).with_device_stored(true);
    assert!(print.identity(DRIVER).is_none());
}

#[test]
fn gate_runs_before_decode() {
    struct Panicking;

    impl PrintMetadata for Panicking {
        fn driver(&self) -> &str {
            "other"
        }
        fn is_device_stored(&self) -> bool {
            true
        }
        fn data(&self) -> Option<&Value> {
            panic!("metadata must not be read for a foreign print")
        }
    }

    assert!(PrintIdentity::from_print(&Panicking, DRIVER).is_none());
}

#[test]
fn print_for_record_roundtrip() {
    let record = Record::new(guid(), FingerTag::RIGHT_RING);
    let print = Print::for_record(DRIVER, &record, &[]);
    assert!(print.is_device_stored());
    assert_eq!(print.identity(DRIVER), Some(record.identity()));
}

// ── Record ───────────────────────────────────────────────────────

#[test]
fn record_matches_identity() {
    let record = Record::new(guid(), FingerTag::LEFT_THUMB);
    assert!(record == record.identity());

    let other = PrintIdentity {
        guid: guid(),
        finger: FingerTag::LEFT_INDEX,
    };
    assert!(record != other);
    assert_eq!(Record::from(other).finger, FingerTag::LEFT_INDEX);
}

#[test]
fn record_display() {
    let record = Record::new(guid(), FingerTag::LEFT_THUMB);
    assert!(record.to_string().ends_with("(left-thumb)"));
}
