pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::SdkConfig;

pub use crate::core::codec::{dump, dump_as, load, load_value, Mode, Source};
pub use crate::core::filter::{filter_obj, Filtered};
pub use crate::core::value::Value;
pub use crate::core::versioning::{export_flow_snapshot, import_flow_snapshot, import_flow_snapshot_str};
pub use crate::domain::{Mappable, Model};
pub use crate::utils::error::{ErrorCategory, Result, SdkError};
pub use crate::utils::fs::{fs_read, fs_write};
