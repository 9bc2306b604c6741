use anyhow::Result;
use flowkit::{dump, fs_read, fs_write, load_value, ErrorCategory, SdkError, Value};
use tempfile::TempDir;

const TEST_WRITE_FILE_NAME: &str = "nipyapi_test_write_file.txt";

#[test]
fn test_fs_write_returns_content() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let sub_dir = temp_dir.path().join("sub");
    std::fs::create_dir(&sub_dir)?;
    let file_path = sub_dir.join(TEST_WRITE_FILE_NAME);

    let written = fs_write(TEST_WRITE_FILE_NAME, &file_path)?;

    assert_eq!(written, TEST_WRITE_FILE_NAME);
    assert_eq!(std::fs::read_to_string(&file_path)?, TEST_WRITE_FILE_NAME);
    Ok(())
}

#[test]
fn test_fs_write_rejects_non_string_objects() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let file_path = temp_dir.path().join(TEST_WRITE_FILE_NAME);

    for obj in [
        Value::Map(Default::default()),
        Value::Seq(vec![]),
        Value::Int(1),
        Value::Null,
    ] {
        let err = fs_write(obj, &file_path).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Type);
    }
    assert!(!file_path.exists());
    Ok(())
}

// 沒有寫入權限位的 sysctl 項目即使是 root 也無法寫入
#[cfg(target_os = "linux")]
#[test]
fn test_fs_write_to_protected_location_is_permission_error() {
    let err = fs_write("x", "/proc/sys/kernel/ostype").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Permission);
    assert!(matches!(err, SdkError::Permission { .. }));
}

#[test]
fn test_fs_write_missing_directory_is_not_found() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let file_path = temp_dir.path().join("no").join("such").join("dir.txt");

    let err = fs_write("x", &file_path).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NotFound);
    Ok(())
}

#[test]
fn test_fs_read_round_trips_dumped_text() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let file_path = temp_dir.path().join("graph.yaml");
    let graph = Value::from_iter([("name", Value::from("flow")), ("version", Value::from(3))]);

    let text = dump(graph.clone(), "yaml")?;
    fs_write(text.clone(), &file_path)?;

    let read_back = fs_read(&file_path)?;
    assert_eq!(read_back, text);
    assert_eq!(load_value(&read_back)?, graph);
    Ok(())
}

#[test]
fn test_fs_read_unreachable_file_is_not_found() {
    let err = fs_read("/dev/AlmostCertainlyNotAValidDevice").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NotFound);
}
