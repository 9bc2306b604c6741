use crate::core::value::Value;
use crate::utils::error::{Result, SdkError};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

/// 將字串內容寫入 `file_path`，覆蓋既有檔案
///
/// 只接受 `Value::Str`，其他型別在存取檔案系統前即失敗；不會建立上層目錄。
/// 回傳寫入的內容。
pub fn fs_write(obj: impl Into<Value>, file_path: impl AsRef<Path>) -> Result<String> {
    let content = match obj.into() {
        Value::Str(s) => s,
        other => {
            return Err(SdkError::type_error(format!(
                "fs_write expects a string, got {}",
                other.kind()
            )))
        }
    };

    let path = file_path.as_ref();
    tracing::debug!("Writing {} bytes to {}", content.len(), path.display());

    let mut file = File::create(path).map_err(|e| map_io_error(e, path))?;
    file.write_all(content.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| map_io_error(e, path))?;

    Ok(content)
}

/// 以 UTF-8 讀取一般檔案的全部內容
pub fn fs_read(file_path: impl AsRef<Path>) -> Result<String> {
    let path = file_path.as_ref();

    let metadata = fs::metadata(path).map_err(|e| map_io_error(e, path))?;
    if !metadata.is_file() {
        return Err(SdkError::NotFound {
            path: path.display().to_string(),
        });
    }

    let mut file = File::open(path).map_err(|e| map_io_error(e, path))?;
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| map_io_error(e, path))?;

    tracing::debug!("Read {} bytes from {}", content.len(), path.display());
    Ok(content)
}

fn map_io_error(err: io::Error, path: &Path) -> SdkError {
    match err.kind() {
        io::ErrorKind::PermissionDenied | io::ErrorKind::ReadOnlyFilesystem => {
            SdkError::Permission {
                path: path.display().to_string(),
                source: err,
            }
        }
        io::ErrorKind::NotFound => SdkError::NotFound {
            path: path.display().to_string(),
        },
        _ => SdkError::Io(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("flow.json");

        assert_eq!(fs_write("{}", &path).unwrap(), "{}");
        assert_eq!(fs_read(&path).unwrap(), "{}");

        // 覆寫而非附加
        fs_write("second", &path).unwrap();
        assert_eq!(fs_read(&path).unwrap(), "second");
    }

    #[test]
    fn test_write_rejects_non_string_before_touching_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("never.txt");

        let err = fs_write(Value::Map(Default::default()), &path).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Type);
        assert!(!path.exists());
    }

    #[test]
    fn test_write_without_parent_is_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("name.txt");

        let err = fs_write("x", &path).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn test_read_directory_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = fs_read(dir.path()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let err = fs_read("/dev/AlmostCertainlyNotAValidDevice").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }
}
