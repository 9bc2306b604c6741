// 領域層：DTO 模型及其與物件圖之間的 trait

pub mod flow;
pub mod model;
pub mod process_group;

pub use flow::{
    Bucket, Link, Permissions, Position, VersionedFlow, VersionedFlowSnapshot,
    VersionedFlowSnapshotMetadata, VersionedProcessGroup, VersionedProcessor,
};
pub use model::{Mappable, Model};
pub use process_group::{ProcessGroupDto, ProcessGroupEntity, RevisionDto};
