use crate::core::codec::{dump_as, load, Mode};
use crate::domain::flow::VersionedFlowSnapshot;
use crate::domain::model::Model;
use crate::utils::error::Result;
use crate::utils::fs::{fs_read, fs_write};
use std::path::Path;

/// 序列化 flow 快照，指定 `file_path` 時一併寫入檔案
pub fn export_flow_snapshot(
    snapshot: &VersionedFlowSnapshot,
    mode: &str,
    file_path: Option<&Path>,
) -> Result<String> {
    let mode = mode.parse::<Mode>()?;
    let text = dump_as(&snapshot.clone().into_value(), mode)?;

    match file_path {
        Some(path) => {
            tracing::info!(
                "Exporting flow {} version {} to {}",
                snapshot.snapshot_metadata().flow_identifier(),
                snapshot.snapshot_metadata().version(),
                path.display()
            );
            fs_write(text, path)
        }
        None => Ok(text),
    }
}

pub fn import_flow_snapshot(file_path: impl AsRef<Path>) -> Result<VersionedFlowSnapshot> {
    let path = file_path.as_ref();
    tracing::info!("Importing flow snapshot from {}", path.display());
    let text = fs_read(path)?;
    import_flow_snapshot_str(&text)
}

pub fn import_flow_snapshot_str(text: &str) -> Result<VersionedFlowSnapshot> {
    load(text)
}
