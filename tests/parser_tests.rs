use call_trace_studio::parser::{parse_trace_log, CallKey};
use call_trace_studio::utils::error::ReadError;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

fn write_gz(path: &Path, text: &str) {
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

fn set(values: &[&str]) -> HashSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_parse_simple_log() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("calls.gz");
    write_gz(&path, "> foo in a/b.py\n< foo returned: 42\n");

    let aggregates = parse_trace_log(&path).unwrap();

    assert_eq!(aggregates.call_frequency[&CallKey::new("a/b.py", "foo")], 1);
    assert_eq!(aggregates.return_values["foo"], set(&["42"]));
}

#[test]
fn test_parse_multiline_return() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("calls.gz");
    write_gz(
        &path,
        "< foo returned: Class <Foo object>\n  x=1\n  y=2\n> next in a.py\n",
    );

    let aggregates = parse_trace_log(&path).unwrap();

    assert!(aggregates.return_values["foo"].contains("Class <Foo object>\nx=1\ny=2"));
    assert_eq!(aggregates.call_frequency[&CallKey::new("a.py", "next")], 1);
}

#[test]
fn test_parse_crlf_lines() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("calls.gz");
    write_gz(&path, "> foo in a.py\r\n< foo returned: 1\r\n");

    let aggregates = parse_trace_log(&path).unwrap();

    assert_eq!(aggregates.return_values["foo"], set(&["1"]));
}

#[test]
fn test_parse_is_idempotent() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("calls.gz");
    write_gz(
        &path,
        "> a in x.py\n>> b in y.py\n< b returned: Class <B>\n  v=1\n a returned: [1, 2]\n",
    );

    let first = parse_trace_log(&path).unwrap();
    let second = parse_trace_log(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_multi_member_gzip() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("calls.gz");

    let mut bytes = Vec::new();
    for chunk in ["> a in x.py\n", "> a in x.py\n"] {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(chunk.as_bytes()).unwrap();
        bytes.extend(encoder.finish().unwrap());
    }
    std::fs::write(&path, bytes).unwrap();

    let aggregates = parse_trace_log(&path).unwrap();

    assert_eq!(aggregates.call_frequency[&CallKey::new("x.py", "a")], 2);
}

#[test]
fn test_missing_log_is_soft() {
    let temp_dir = tempfile::tempdir().unwrap();

    let err = parse_trace_log(temp_dir.path().join("missing.gz")).unwrap_err();

    assert!(matches!(err, ReadError::NotFound(_)));
    assert!(err.is_soft());
}

#[test]
fn test_zero_byte_log_is_soft() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("calls.gz");
    std::fs::write(&path, b"").unwrap();

    let err = parse_trace_log(&path).unwrap_err();

    assert!(matches!(err, ReadError::Empty(_)));
}

#[test]
fn test_empty_gzip_has_no_data() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("calls.gz");
    write_gz(&path, "");

    let aggregates = parse_trace_log(&path).unwrap();

    assert!(aggregates.is_empty());
}

#[test]
fn test_corrupt_log_is_hard_failure() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("calls.gz");
    std::fs::write(&path, b"this is not gzip data at all").unwrap();

    let err = parse_trace_log(&path).unwrap_err();

    assert!(matches!(err, ReadError::Corrupt { .. }));
    assert!(!err.is_soft());
}

fn truncated_log(dir: &Path, keep: impl Fn(usize) -> usize) -> std::path::PathBuf {
    let path = dir.join("calls.gz");
    let text: String = (0..500)
        .map(|i| format!("> f{} in pkg/m{}.py\n< f{} returned: {}\n", i, i % 7, i, i * 31))
        .collect();
    write_gz(&path, &text);

    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..keep(bytes.len())]).unwrap();
    path
}

#[test]
fn test_missing_gzip_trailer_is_hard_failure() {
    let temp_dir = tempfile::tempdir().unwrap();

    // Whole trailer gone, then only part of it
    for cut in [8, 4] {
        let path = truncated_log(temp_dir.path(), |len| len - cut);

        let err = parse_trace_log(&path).unwrap_err();

        assert!(matches!(err, ReadError::Corrupt { .. }), "cut {}: {:?}", cut, err);
        assert!(!err.is_soft());
    }
}

#[test]
fn test_half_written_log_is_hard_failure() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = truncated_log(temp_dir.path(), |len| len / 2);

    let err = parse_trace_log(&path).unwrap_err();

    assert!(matches!(err, ReadError::Corrupt { .. }));
    assert!(!err.is_soft());
}
