use params_editor::{Field, Session};
use tempfile::NamedTempFile;

const CRLF_DOC: &[u8] = b"{\r\n    \"Parameters\": [\r\n        {\r\n            \"Id\": \"A\",\r\n            \"IsDisabledForSpawning\": false,\r\n            \"AllowedLocations\": [],\r\n            \"CooldownGroup\": \"\",\r\n            \"Variations\": [],\r\n            \"ShouldOverrideInitialAndRandomUsage\": false\r\n        }\r\n    ]\r\n}";

fn assert_all_lf_are_crlf(bytes: &[u8]) {
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'\n' {
            assert!(i > 0 && bytes[i - 1] == b'\r', "found bare LF at {i}");
        }
    }
}

#[test]
fn modified_save_preserves_crlf() {
    let mut tmp = NamedTempFile::new().expect("tempfile");
    std::io::Write::write_all(&mut tmp, CRLF_DOC).expect("write");

    let mut session = Session::new();
    session.load_path(tmp.path()).expect("load");
    session
        .commit_edit(0, Field::CooldownGroup, "changed")
        .expect("commit");
    session.save().expect("save");

    let bytes = std::fs::read(tmp.path()).expect("read back");
    assert_all_lf_are_crlf(&bytes);
    // Absent integer fields are written out with their default.
    let text = String::from_utf8(bytes).expect("utf8");
    assert!(text.contains("\"CooldownPerSquadMemberMin\": 0,\r\n"));
}

#[test]
fn modified_save_preserves_lf() {
    let mut tmp = NamedTempFile::new().expect("tempfile");
    let input = String::from_utf8(CRLF_DOC.to_vec())
        .expect("utf8")
        .replace("\r\n", "\n");
    std::io::Write::write_all(&mut tmp, input.as_bytes()).expect("write");

    let mut session = Session::new();
    session.load_path(tmp.path()).expect("load");
    session
        .commit_edit(0, Field::IsDisabledForSpawning, "true")
        .expect("commit");
    session.save().expect("save");

    let bytes = std::fs::read(tmp.path()).expect("read back");
    assert!(
        !bytes.contains(&b'\r'),
        "expected no CR characters in LF output"
    );
}
