use std::fs;
use std::path::Path;
use stcli::savefile::{decode_token, load_token, registration_path, resolve_save_path, write_registration};
use stcli::ClientError;
use tempfile::tempdir;

#[test]
fn test_decode_token_round_trip() {
    let envelope = serde_json::json!({"data": {"token": "abc123"}});
    let bytes = serde_json::to_vec(&envelope).expect("encode");
    assert_eq!(decode_token(&bytes).expect("token"), "abc123");
}

#[test]
fn test_decode_token_ignores_other_fields_and_nul_padding() {
    let mut bytes = br#"{"data":{"agent":{"symbol":"BOB"},"token":"t0k3n"}}"#.to_vec();
    bytes.extend_from_slice(&[0, 0, 0]);
    assert_eq!(decode_token(&bytes).expect("token"), "t0k3n");
}

#[test]
fn test_decode_token_rejects_malformed_envelopes() {
    let cases: [&[u8]; 8] = [
        b"",
        b"not json",
        br#"{"token":"abc"}"#,
        br#"{"data":"abc"}"#,
        br#"{"data":{}}"#,
        br#"{"data":{"token":42}}"#,
        br#"{"data":{"token":null}}"#,
        br#"{"data":{"token":""}}"#,
    ];
    for case in cases {
        let result = decode_token(case);
        assert!(
            matches!(result, Err(ClientError::Decode(_))),
            "{:?} -> {:?}",
            String::from_utf8_lossy(case),
            result
        );
    }
}

#[test]
fn test_resolve_prefers_path_as_given() {
    let dir = tempdir().expect("tempdir");
    let direct = dir.path().join("BOB.json");
    fs::write(&direct, "{}").expect("write");

    let resolved = resolve_save_path(&direct, Path::new("does-not-matter")).expect("resolve");
    assert_eq!(resolved, direct);
}

#[test]
fn test_resolve_falls_back_to_save_dir() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("BOB.json"), "{}").expect("write");

    let resolved = resolve_save_path(Path::new("BOB.json"), dir.path()).expect("resolve");
    assert_eq!(resolved, dir.path().join("BOB.json"));
}

#[test]
fn test_resolve_missing_file_names_both_candidates() {
    let dir = tempdir().expect("tempdir");
    let err = resolve_save_path(Path::new("GHOST.json"), dir.path()).expect_err("missing");
    match err {
        ClientError::Io(e) => {
            assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
            assert!(e.to_string().contains("GHOST.json"));
        }
        other => panic!("expected io error, got {:?}", other),
    }
}

#[test]
fn test_write_registration_then_load_token() {
    let dir = tempdir().expect("tempdir");
    let save_dir = dir.path().join("savefiles");
    let body = br#"{"data":{"token":"fresh"}}"#;

    let path = write_registration(&save_dir, "BOB", body).expect("write");
    assert_eq!(path, registration_path(&save_dir, "BOB"));
    assert_eq!(path, save_dir.join("BOB.json"));

    let stored = fs::read(&path).expect("read back");
    assert_eq!(stored.last(), Some(&b'\n'));
    assert_eq!(&stored[..stored.len() - 1], &body[..]);

    assert_eq!(load_token(&path).expect("token"), "fresh");
}

#[test]
fn test_load_token_missing_file_is_io_error() {
    let dir = tempdir().expect("tempdir");
    let result = load_token(&dir.path().join("nope.json"));
    assert!(matches!(result, Err(ClientError::Io(_))));
}
