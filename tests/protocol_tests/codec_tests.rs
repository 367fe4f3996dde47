//! Codec Tests
//!
//! Tests for request encoding, line classification and response
//! interpretation.

use memclient::protocol::{
    decode_delete, decode_get, decode_set, encode_command, encode_command_into, validate_key,
    validate_value, Command, CommandKind, Item, Response, ResponseLine, MAX_KEY_LENGTH,
};
use memclient::ClientError;

fn item(key: &[u8], flags: u32, data: &[u8]) -> Item {
    Item {
        key: key.to_vec(),
        flags,
        data: data.to_vec(),
    }
}

// =============================================================================
// Request Encoding Tests
// =============================================================================

#[test]
fn test_encode_set() {
    let cmd = Command::Set {
        key: b"key",
        value: b"value",
        flags: 0,
        expiration: 0,
    };
    assert_eq!(encode_command(&cmd), b"set key 0 0 5\r\nvalue\r\n");
}

#[test]
fn test_encode_set_with_flags_and_expiration() {
    let cmd = Command::Set {
        key: b"session:42",
        value: b"data",
        flags: 7,
        expiration: 3600,
    };
    assert_eq!(encode_command(&cmd), b"set session:42 7 3600 4\r\ndata\r\n");
}

#[test]
fn test_encode_set_counts_bytes_not_chars() {
    let value = "héllo".as_bytes();
    let cmd = Command::Set {
        key: b"k",
        value,
        flags: 0,
        expiration: 0,
    };
    let encoded = encode_command(&cmd);
    assert!(encoded.starts_with(b"set k 0 0 6\r\n"));
}

#[test]
fn test_encode_set_binary_value() {
    let value = b"\x00\xff\r\nEND\r\n";
    let cmd = Command::Set {
        key: b"bin",
        value,
        flags: 0,
        expiration: 0,
    };

    let mut expected = b"set bin 0 0 9\r\n".to_vec();
    expected.extend_from_slice(value);
    expected.extend_from_slice(b"\r\n");
    assert_eq!(encode_command(&cmd), expected);
}

#[test]
fn test_encode_set_empty_value() {
    let cmd = Command::Set {
        key: b"empty",
        value: b"",
        flags: 0,
        expiration: 0,
    };
    assert_eq!(encode_command(&cmd), b"set empty 0 0 0\r\n\r\n");
}

#[test]
fn test_encode_get() {
    assert_eq!(encode_command(&Command::Get { key: b"hello" }), b"get hello\r\n");
}

#[test]
fn test_encode_delete() {
    assert_eq!(
        encode_command(&Command::Delete { key: b"todelete" }),
        b"delete todelete\r\n"
    );
}

#[test]
fn test_encode_into_appends() {
    let mut buf = b"prefix|".to_vec();
    encode_command_into(&Command::Get { key: b"a" }, &mut buf);
    assert_eq!(buf, b"prefix|get a\r\n");
}

#[test]
fn test_command_kind() {
    let set = Command::Set {
        key: b"k",
        value: b"v",
        flags: 0,
        expiration: 0,
    };
    assert_eq!(set.kind(), CommandKind::Set);
    assert_eq!(Command::Get { key: b"k" }.kind(), CommandKind::Get);
    assert_eq!(Command::Delete { key: b"k" }.kind(), CommandKind::Delete);
    assert_eq!(CommandKind::Delete.verb(), "delete");
    assert_eq!(set.key(), b"k");
}

// =============================================================================
// Line Classification Tests
// =============================================================================

#[test]
fn test_parse_control_lines() {
    assert_eq!(ResponseLine::parse(b"STORED").unwrap(), ResponseLine::Stored);
    assert_eq!(ResponseLine::parse(b"NOT_STORED").unwrap(), ResponseLine::NotStored);
    assert_eq!(ResponseLine::parse(b"DELETED").unwrap(), ResponseLine::Deleted);
    assert_eq!(ResponseLine::parse(b"NOT_FOUND").unwrap(), ResponseLine::NotFound);
    assert_eq!(ResponseLine::parse(b"END").unwrap(), ResponseLine::End);
    assert_eq!(ResponseLine::parse(b"ERROR").unwrap(), ResponseLine::Error);
}

#[test]
fn test_parse_error_lines_keep_message() {
    assert_eq!(
        ResponseLine::parse(b"CLIENT_ERROR bad data chunk").unwrap(),
        ResponseLine::ClientError("bad data chunk".to_string())
    );
    assert_eq!(
        ResponseLine::parse(b"SERVER_ERROR out of memory").unwrap(),
        ResponseLine::ServerError("out of memory".to_string())
    );
}

#[test]
fn test_parse_error_words_need_separator() {
    assert_eq!(
        ResponseLine::parse(b"CLIENT_ERROR").unwrap(),
        ResponseLine::ClientError(String::new())
    );
    assert_eq!(
        ResponseLine::parse(b"SERVER_ERROR").unwrap(),
        ResponseLine::ServerError(String::new())
    );
    assert_eq!(
        ResponseLine::parse(b"CLIENT_ERRORX bad").unwrap(),
        ResponseLine::Unknown("CLIENT_ERRORX bad".to_string())
    );
    assert_eq!(
        ResponseLine::parse(b"SERVER_ERRORS").unwrap(),
        ResponseLine::Unknown("SERVER_ERRORS".to_string())
    );
}

#[test]
fn test_parse_unknown_line() {
    assert_eq!(
        ResponseLine::parse(b"EXISTS").unwrap(),
        ResponseLine::Unknown("EXISTS".to_string())
    );
    // Case matters on the wire
    assert_eq!(
        ResponseLine::parse(b"stored").unwrap(),
        ResponseLine::Unknown("stored".to_string())
    );
}

#[test]
fn test_parse_value_header() {
    assert_eq!(
        ResponseLine::parse(b"VALUE k 12 5").unwrap(),
        ResponseLine::ValueHeader {
            key: b"k".to_vec(),
            flags: 12,
            length: 5
        }
    );
}

#[test]
fn test_parse_value_header_with_cas() {
    assert_eq!(
        ResponseLine::parse(b"VALUE k 0 3 998877").unwrap(),
        ResponseLine::ValueHeader {
            key: b"k".to_vec(),
            flags: 0,
            length: 3
        }
    );
}

#[test]
fn test_parse_value_header_malformed() {
    for line in [
        &b"VALUE k 0"[..],
        b"VALUE k x 5",
        b"VALUE k 0 -1",
        b"VALUE k 0 five",
        b"VALUE k 99999999999 1",
        b"VALUE k 0 1 2 3",
    ] {
        let err = ResponseLine::parse(line).unwrap_err();
        assert!(err.is_protocol(), "{:?} -> {:?}", String::from_utf8_lossy(line), err);
    }
}

#[test]
fn test_display_round_trips_wire_text() {
    assert_eq!(ResponseLine::NotFound.to_string(), "NOT_FOUND");
    assert_eq!(
        ResponseLine::ServerError("busy".to_string()).to_string(),
        "SERVER_ERROR busy"
    );
    let header = ResponseLine::ValueHeader {
        key: b"k".to_vec(),
        flags: 1,
        length: 2,
    };
    assert_eq!(header.to_string(), "VALUE k 1 2");
}

// =============================================================================
// Response Interpretation Tests
// =============================================================================

#[test]
fn test_decode_set() {
    assert!(decode_set(Response::Line(ResponseLine::Stored)).unwrap());
    assert!(!decode_set(Response::Line(ResponseLine::NotStored)).unwrap());

    for line in [
        ResponseLine::Error,
        ResponseLine::ClientError("bad".to_string()),
        ResponseLine::ServerError("oom".to_string()),
        ResponseLine::Deleted,
        ResponseLine::Unknown("???".to_string()),
    ] {
        assert!(decode_set(Response::Line(line)).unwrap_err().is_protocol());
    }
}

#[test]
fn test_decode_set_error_mentions_server_text() {
    let err = decode_set(Response::Line(ResponseLine::ServerError("out of memory".to_string())))
        .unwrap_err();
    assert!(err.to_string().contains("SERVER_ERROR out of memory"));
}

#[test]
fn test_decode_delete() {
    assert!(decode_delete(Response::Line(ResponseLine::Deleted)).unwrap());
    assert!(!decode_delete(Response::Line(ResponseLine::NotFound)).unwrap());
    assert!(decode_delete(Response::Line(ResponseLine::Stored))
        .unwrap_err()
        .is_protocol());
    assert!(decode_delete(Response::Line(ResponseLine::Error))
        .unwrap_err()
        .is_protocol());
}

#[test]
fn test_decode_line_rejects_value_blocks() {
    assert!(decode_delete(Response::Values(vec![])).unwrap_err().is_protocol());
    assert!(decode_set(Response::Values(vec![])).unwrap_err().is_protocol());
}

#[test]
fn test_decode_get_hit() {
    let response = Response::Values(vec![item(b"k", 3, b"hello")]);
    assert_eq!(decode_get(response, b"k").unwrap(), Some(item(b"k", 3, b"hello")));
}

#[test]
fn test_decode_get_miss() {
    assert_eq!(decode_get(Response::Values(vec![]), b"k").unwrap(), None);
}

#[test]
fn test_decode_get_key_mismatch() {
    let response = Response::Values(vec![item(b"other", 0, b"hello")]);
    let err = decode_get(response, b"k").unwrap_err();
    assert!(matches!(err, ClientError::Protocol(_)));
}

#[test]
fn test_decode_get_multiple_blocks() {
    let response = Response::Values(vec![item(b"k", 0, b"a"), item(b"k", 0, b"b")]);
    assert!(decode_get(response, b"k").unwrap_err().is_protocol());
}

#[test]
fn test_decode_get_rejects_control_line() {
    let response = Response::Line(ResponseLine::Stored);
    assert!(decode_get(response, b"k").unwrap_err().is_protocol());
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_validate_key_accepts_printable() {
    validate_key(b"user:1234").unwrap();
    validate_key(b"a").unwrap();
    validate_key("ключ".as_bytes()).unwrap();
    validate_key(&vec![b'x'; MAX_KEY_LENGTH]).unwrap();
}

#[test]
fn test_validate_key_rejects_bad_keys() {
    let too_long = vec![b'x'; MAX_KEY_LENGTH + 1];
    for key in [
        &b""[..],
        b"key with spaces",
        b" leading",
        b"trailing ",
        b"cr\rkey",
        b"lf\nkey",
        b"crlf\r\nget other",
        b"tab\tkey",
        b"nul\0key",
        b"del\x7fkey",
        too_long.as_slice(),
    ] {
        let err = validate_key(key).unwrap_err();
        assert!(err.is_validation(), "{:?}", key);
    }
}

#[test]
fn test_validate_key_space_message() {
    let err = validate_key(b"key with spaces").unwrap_err();
    assert!(err.to_string().contains("Key should not contain spaces"));
}

#[test]
fn test_validate_value() {
    validate_value(b"", 10).unwrap();
    validate_value(&[0u8; 10], 10).unwrap();

    let err = validate_value(&[0u8; 11], 10).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("Value is too large"));
}
