use schem_convert::{
    BigEndian, Compound, Document, Error, List, Tag, Value, read_document, write_document,
};

// ==================== Helper Functions ====================

fn push_str(data: &mut Vec<u8>, s: &str) {
    data.extend_from_slice(&(s.len() as u16).to_be_bytes());
    data.extend_from_slice(s.as_bytes());
}

/// Root compound header: kind byte 10 plus the root name.
fn document_header(root_name: &str) -> Vec<u8> {
    let mut data = vec![0x0a];
    push_str(&mut data, root_name);
    data
}

fn list(element_tag: Tag, items: Vec<Value>) -> Value {
    Value::List(List { element_tag, items })
}

fn sample_document() -> Document {
    let mut item = Compound::new();
    item.push("id", Value::String("minecraft:chest".into()));
    item.push("damage", Value::Short(-3));

    let mut nested = Compound::new();
    nested.push("inner", Value::Compound(item));
    nested.push("flags", Value::ByteArray(vec![-128, 0, 127]));

    let mut root = Compound::new();
    root.push("byte", Value::Byte(-1));
    root.push("short", Value::Short(i16::MIN));
    root.push("int", Value::Int(123_456_789));
    root.push("long", Value::Long(i64::MAX));
    root.push("float", Value::Float(1.5));
    root.push("double", Value::Double(-0.25));
    root.push("bytes", Value::ByteArray(vec![1, 2, 3]));
    root.push("text", Value::String("héllo wörld".into()));
    root.push("", Value::String(String::new()));
    root.push("empty_list", list(Tag::End, vec![]));
    root.push(
        "strings",
        list(
            Tag::String,
            vec![Value::String("a".into()), Value::String("".into())],
        ),
    );
    root.push(
        "compounds",
        list(
            Tag::Compound,
            vec![Value::Compound(Compound::new()), Value::Compound(nested)],
        ),
    );
    root.push("ints", Value::IntArray(vec![i32::MIN, 0, i32::MAX]));
    root.push("longs", Value::LongArray(vec![i64::MIN, 0, i64::MAX]));

    Document {
        root_name: "root".into(),
        root,
    }
}

// ==================== Round Trips ====================

#[test]
fn round_trip_every_kind() {
    let document = sample_document();
    let bytes = write_document::<BigEndian>(&document);
    let decoded = read_document::<BigEndian>(&bytes).unwrap();
    assert_eq!(decoded, document);

    // Byte-level: re-encoding the decoded tree reproduces the buffer.
    let reencoded = write_document::<BigEndian>(&decoded);
    assert_eq!(reencoded, bytes);
}

#[test]
fn encode_matches_hand_built_bytes() {
    let mut root = Compound::new();
    root.push("num", Value::Int(0x0102_0304));
    let document = Document {
        root_name: "hello".into(),
        root,
    };

    let mut expected = document_header("hello");
    expected.push(0x03);
    push_str(&mut expected, "num");
    expected.extend_from_slice(&[0x01, 0x02, 0x03, 0x04]);
    expected.push(0x00);

    assert_eq!(write_document::<BigEndian>(&document), expected);
    assert_eq!(read_document::<BigEndian>(&expected).unwrap(), document);
}

#[test]
fn empty_list_element_kind_survives() {
    // An empty list may record any element kind; the recorded kind is
    // written back, never re-derived.
    let mut data = document_header("");
    data.push(0x09);
    push_str(&mut data, "empty_ints");
    data.push(0x03); // element kind Int
    data.extend_from_slice(&0i32.to_be_bytes());
    data.push(0x00);

    let document = read_document::<BigEndian>(&data).unwrap();
    match document.root.get("empty_ints") {
        Some(Value::List(l)) => {
            assert_eq!(l.element_tag, Tag::Int);
            assert!(l.is_empty());
        }
        other => panic!("expected empty Int list, got {other:?}"),
    }
    assert_eq!(write_document::<BigEndian>(&document), data);
}

#[test]
fn duplicate_names_preserved_in_order() {
    let mut root = Compound::new();
    root.push("x", Value::Int(1));
    root.push("x", Value::Int(2));
    let document = Document {
        root_name: String::new(),
        root,
    };

    let bytes = write_document::<BigEndian>(&document);
    let decoded = read_document::<BigEndian>(&bytes).unwrap();
    assert_eq!(decoded.root.len(), 2);
    // Lookups are first-match.
    assert_eq!(decoded.root.get("x"), Some(&Value::Int(1)));
    assert_eq!(write_document::<BigEndian>(&decoded), bytes);
}

#[test]
fn negative_list_count_decodes_empty() {
    let mut data = document_header("");
    data.push(0x09);
    push_str(&mut data, "l");
    data.push(0x01); // element kind Byte
    data.extend_from_slice(&(-5i32).to_be_bytes());
    data.push(0x00);

    let document = read_document::<BigEndian>(&data).unwrap();
    match document.root.get("l") {
        Some(Value::List(l)) => assert!(l.is_empty()),
        other => panic!("expected list, got {other:?}"),
    }
}

// ==================== Decode Errors ====================

#[test]
fn empty_input_is_end_of_file() {
    match read_document::<BigEndian>(&[]) {
        Err(Error::EndOfFile) => {}
        other => panic!("expected EndOfFile, got {other:?}"),
    }
}

#[test]
fn truncated_payload_is_end_of_file() {
    let mut data = document_header("");
    data.push(0x03);
    push_str(&mut data, "n");
    data.extend_from_slice(&[0x00, 0x01]); // Int needs 4 bytes
    match read_document::<BigEndian>(&data) {
        Err(Error::EndOfFile) => {}
        other => panic!("expected EndOfFile, got {other:?}"),
    }
}

#[test]
fn truncated_string_is_end_of_file() {
    let mut data = document_header("");
    data.push(0x08);
    push_str(&mut data, "s");
    data.extend_from_slice(&10u16.to_be_bytes());
    data.extend_from_slice(b"abc");
    match read_document::<BigEndian>(&data) {
        Err(Error::EndOfFile) => {}
        other => panic!("expected EndOfFile, got {other:?}"),
    }
}

#[test]
fn oversized_array_length_is_end_of_file() {
    let mut data = document_header("");
    data.push(0x0b); // IntArray
    push_str(&mut data, "a");
    data.extend_from_slice(&i32::MAX.to_be_bytes());
    match read_document::<BigEndian>(&data) {
        Err(Error::EndOfFile) => {}
        other => panic!("expected EndOfFile, got {other:?}"),
    }
}

#[test]
fn invalid_tag_in_compound() {
    let mut data = document_header("");
    data.push(0xff);
    match read_document::<BigEndian>(&data) {
        Err(Error::InvalidTagType(0xff)) => {}
        other => panic!("expected InvalidTagType(0xff), got {other:?}"),
    }
}

#[test]
fn invalid_list_element_kind() {
    let mut data = document_header("");
    data.push(0x09);
    push_str(&mut data, "l");
    data.push(0x0d); // 13 is out of range
    data.extend_from_slice(&0i32.to_be_bytes());
    match read_document::<BigEndian>(&data) {
        Err(Error::InvalidTagType(0x0d)) => {}
        other => panic!("expected InvalidTagType(0x0d), got {other:?}"),
    }
}

#[test]
fn end_kind_list_with_elements_is_invalid() {
    let mut data = document_header("");
    data.push(0x09);
    push_str(&mut data, "l");
    data.push(0x00); // element kind End
    data.extend_from_slice(&3i32.to_be_bytes());
    match read_document::<BigEndian>(&data) {
        Err(Error::InvalidTagType(0)) => {}
        other => panic!("expected InvalidTagType(0), got {other:?}"),
    }
}

#[test]
fn non_compound_root_is_rejected() {
    let mut data = vec![0x03];
    push_str(&mut data, "n");
    data.extend_from_slice(&7i32.to_be_bytes());
    match read_document::<BigEndian>(&data) {
        Err(Error::TagMismatch(0x0a, 0x03)) => {}
        other => panic!("expected TagMismatch, got {other:?}"),
    }
}

#[test]
fn trailing_bytes_are_rejected() {
    let document = Document {
        root_name: String::new(),
        root: Compound::new(),
    };
    let mut bytes = write_document::<BigEndian>(&document);
    bytes.extend_from_slice(&[1, 2, 3]);
    match read_document::<BigEndian>(&bytes) {
        Err(Error::TrailingData(3)) => {}
        other => panic!("expected TrailingData(3), got {other:?}"),
    }
}

#[test]
fn compound_nesting_beyond_limit_is_rejected() {
    // 600 unterminated nested compounds; the depth check fires before the
    // decoder ever needs the missing terminators.
    let mut data = document_header("");
    for _ in 0..600 {
        data.push(0x0a);
        push_str(&mut data, "");
    }
    match read_document::<BigEndian>(&data) {
        Err(Error::DepthLimitExceeded) => {}
        other => panic!("expected DepthLimitExceeded, got {other:?}"),
    }
}

#[test]
fn list_nesting_beyond_limit_is_rejected() {
    let mut data = document_header("");
    data.push(0x09);
    push_str(&mut data, "l");
    for _ in 0..600 {
        data.push(0x09); // element kind List
        data.extend_from_slice(&1i32.to_be_bytes());
    }
    match read_document::<BigEndian>(&data) {
        Err(Error::DepthLimitExceeded) => {}
        other => panic!("expected DepthLimitExceeded, got {other:?}"),
    }
}

#[test]
fn deep_but_legal_nesting_round_trips() {
    let mut value = Value::Compound(Compound::new());
    for _ in 0..100 {
        let mut outer = Compound::new();
        outer.push("c", value);
        value = Value::Compound(outer);
    }
    let mut root = Compound::new();
    root.push("nested", value);
    let document = Document {
        root_name: String::new(),
        root,
    };
    let bytes = write_document::<BigEndian>(&document);
    assert_eq!(read_document::<BigEndian>(&bytes).unwrap(), document);
}
