use crate::domain::model::Model;
use crate::utils::error::Result;
use crate::utils::validation::{validate_allowed_value, validate_minimum, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const VERSIONED_FLOW_TYPES: &[&str] = &["Flow"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<BTreeMap<String, String>>,
}

impl Validate for Link {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl Model for Link {
    const TYPE_NAME: &'static str = "Link";
    const ATTRIBUTE_MAP: &'static [(&'static str, &'static str)] =
        &[("href", "href"), ("params", "params")];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_write: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_delete: Option<bool>,
}

impl Validate for Permissions {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl Model for Permissions {
    const TYPE_NAME: &'static str = "Permissions";
    const ATTRIBUTE_MAP: &'static [(&'static str, &'static str)] = &[
        ("can_read", "canRead"),
        ("can_write", "canWrite"),
        ("can_delete", "canDelete"),
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }
}

/// registry 中存放版本化 flow 的 bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<String>,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    permissions: Option<Permissions>,
}

impl Bucket {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            link: None,
            identifier: None,
            name: name.into(),
            created_timestamp: None,
            description: None,
            permissions: None,
        }
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn set_identifier(&mut self, identifier: Option<String>) {
        self.identifier = identifier;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn created_timestamp(&self) -> Option<i64> {
        self.created_timestamp
    }

    pub fn set_created_timestamp(&mut self, created_timestamp: Option<i64>) -> Result<()> {
        validate_minimum("created_timestamp", created_timestamp, 0)?;
        self.created_timestamp = created_timestamp;
        Ok(())
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn permissions(&self) -> Option<&Permissions> {
        self.permissions.as_ref()
    }

    pub fn set_permissions(&mut self, permissions: Option<Permissions>) {
        self.permissions = permissions;
    }
}

impl Validate for Bucket {
    fn validate(&self) -> Result<()> {
        validate_minimum("created_timestamp", self.created_timestamp, 0)
    }
}

impl Model for Bucket {
    const TYPE_NAME: &'static str = "Bucket";
    const ATTRIBUTE_MAP: &'static [(&'static str, &'static str)] = &[
        ("link", "link"),
        ("identifier", "identifier"),
        ("name", "name"),
        ("created_timestamp", "createdTimestamp"),
        ("description", "description"),
        ("permissions", "permissions"),
    ];
    const FILTER_KEYS: &'static [(&'static str, &'static str)] =
        &[("name", "name"), ("id", "identifier")];
    const REQUIRED: &'static [&'static str] = &["name"];
}

/// 存放在 bucket 中的 flow，`type` 固定為 `Flow`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedFlow {
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<String>,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    bucket_identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    bucket_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modified_timestamp: Option<i64>,
    r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    permissions: Option<Permissions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version_count: Option<i64>,
}

impl VersionedFlow {
    pub fn new(
        name: impl Into<String>,
        bucket_identifier: impl Into<String>,
        flow_type: impl Into<String>,
    ) -> Result<Self> {
        let flow = Self {
            link: None,
            identifier: None,
            name: name.into(),
            description: None,
            bucket_identifier: bucket_identifier.into(),
            bucket_name: None,
            created_timestamp: None,
            modified_timestamp: None,
            r#type: flow_type.into(),
            permissions: None,
            version_count: None,
        };
        flow.validate()?;
        Ok(flow)
    }

    pub fn link(&self) -> Option<&Link> {
        self.link.as_ref()
    }

    pub fn set_link(&mut self, link: Option<Link>) {
        self.link = link;
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn set_identifier(&mut self, identifier: Option<String>) {
        self.identifier = identifier;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn bucket_identifier(&self) -> &str {
        &self.bucket_identifier
    }

    pub fn set_bucket_identifier(&mut self, bucket_identifier: impl Into<String>) {
        self.bucket_identifier = bucket_identifier.into();
    }

    pub fn bucket_name(&self) -> Option<&str> {
        self.bucket_name.as_deref()
    }

    pub fn set_bucket_name(&mut self, bucket_name: Option<String>) {
        self.bucket_name = bucket_name;
    }

    pub fn created_timestamp(&self) -> Option<i64> {
        self.created_timestamp
    }

    pub fn set_created_timestamp(&mut self, created_timestamp: Option<i64>) -> Result<()> {
        validate_minimum("created_timestamp", created_timestamp, 1)?;
        self.created_timestamp = created_timestamp;
        Ok(())
    }

    pub fn modified_timestamp(&self) -> Option<i64> {
        self.modified_timestamp
    }

    pub fn set_modified_timestamp(&mut self, modified_timestamp: Option<i64>) -> Result<()> {
        validate_minimum("modified_timestamp", modified_timestamp, 1)?;
        self.modified_timestamp = modified_timestamp;
        Ok(())
    }

    pub fn flow_type(&self) -> &str {
        &self.r#type
    }

    pub fn set_flow_type(&mut self, flow_type: impl Into<String>) -> Result<()> {
        let flow_type = flow_type.into();
        validate_allowed_value("type", &flow_type, VERSIONED_FLOW_TYPES)?;
        self.r#type = flow_type;
        Ok(())
    }

    pub fn permissions(&self) -> Option<&Permissions> {
        self.permissions.as_ref()
    }

    pub fn set_permissions(&mut self, permissions: Option<Permissions>) {
        self.permissions = permissions;
    }

    pub fn version_count(&self) -> Option<i64> {
        self.version_count
    }

    pub fn set_version_count(&mut self, version_count: Option<i64>) -> Result<()> {
        validate_minimum("version_count", version_count, 0)?;
        self.version_count = version_count;
        Ok(())
    }
}

impl Validate for VersionedFlow {
    fn validate(&self) -> Result<()> {
        validate_allowed_value("type", &self.r#type, VERSIONED_FLOW_TYPES)?;
        validate_minimum("created_timestamp", self.created_timestamp, 1)?;
        validate_minimum("modified_timestamp", self.modified_timestamp, 1)?;
        validate_minimum("version_count", self.version_count, 0)
    }
}

impl Model for VersionedFlow {
    const TYPE_NAME: &'static str = "VersionedFlow";
    const ATTRIBUTE_MAP: &'static [(&'static str, &'static str)] = &[
        ("link", "link"),
        ("identifier", "identifier"),
        ("name", "name"),
        ("description", "description"),
        ("bucket_identifier", "bucketIdentifier"),
        ("bucket_name", "bucketName"),
        ("created_timestamp", "createdTimestamp"),
        ("modified_timestamp", "modifiedTimestamp"),
        ("type", "type"),
        ("permissions", "permissions"),
        ("version_count", "versionCount"),
    ];
    const FILTER_KEYS: &'static [(&'static str, &'static str)] =
        &[("name", "name"), ("id", "identifier")];
    const REQUIRED: &'static [&'static str] = &["name", "bucket_identifier", "type"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedFlowSnapshotMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<Link>,
    bucket_identifier: String,
    flow_identifier: String,
    version: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comments: Option<String>,
}

impl VersionedFlowSnapshotMetadata {
    pub fn new(
        bucket_identifier: impl Into<String>,
        flow_identifier: impl Into<String>,
        version: i64,
    ) -> Result<Self> {
        let metadata = Self {
            link: None,
            bucket_identifier: bucket_identifier.into(),
            flow_identifier: flow_identifier.into(),
            version,
            timestamp: None,
            author: None,
            comments: None,
        };
        metadata.validate()?;
        Ok(metadata)
    }

    pub fn bucket_identifier(&self) -> &str {
        &self.bucket_identifier
    }

    pub fn flow_identifier(&self) -> &str {
        &self.flow_identifier
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn set_version(&mut self, version: i64) -> Result<()> {
        validate_minimum("version", Some(version), -1)?;
        self.version = version;
        Ok(())
    }

    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    pub fn set_timestamp(&mut self, timestamp: Option<i64>) -> Result<()> {
        validate_minimum("timestamp", timestamp, 1)?;
        self.timestamp = timestamp;
        Ok(())
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn set_author(&mut self, author: Option<String>) {
        self.author = author;
    }

    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }

    pub fn set_comments(&mut self, comments: Option<String>) {
        self.comments = comments;
    }
}

impl Validate for VersionedFlowSnapshotMetadata {
    fn validate(&self) -> Result<()> {
        validate_minimum("version", Some(self.version), -1)?;
        validate_minimum("timestamp", self.timestamp, 1)
    }
}

impl Model for VersionedFlowSnapshotMetadata {
    const TYPE_NAME: &'static str = "VersionedFlowSnapshotMetadata";
    const ATTRIBUTE_MAP: &'static [(&'static str, &'static str)] = &[
        ("link", "link"),
        ("bucket_identifier", "bucketIdentifier"),
        ("flow_identifier", "flowIdentifier"),
        ("version", "version"),
        ("timestamp", "timestamp"),
        ("author", "author"),
        ("comments", "comments"),
    ];
    const FILTER_KEYS: &'static [(&'static str, &'static str)] =
        &[("version", "version"), ("flow_id", "flowIdentifier")];
    const REQUIRED: &'static [&'static str] =
        &["bucket_identifier", "flow_identifier", "version"];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedProcessor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduling_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_terminated_relationships: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
}

/// flow 內容：由 process group 與 processor 組成的樹
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedProcessGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processors: Option<Vec<VersionedProcessor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_groups: Option<Vec<VersionedProcessGroup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
}

impl VersionedProcessGroup {
    /// 本群組及所有巢狀群組中的 processor 數量
    pub fn processor_count(&self) -> usize {
        let own = self.processors.as_ref().map_or(0, Vec::len);
        let nested: usize = self
            .process_groups
            .iter()
            .flatten()
            .map(VersionedProcessGroup::processor_count)
            .sum();
        own + nested
    }

    /// 巢狀 process group 數量 (不含本身)
    pub fn group_count(&self) -> usize {
        self.process_groups
            .iter()
            .flatten()
            .map(|group| 1 + group.group_count())
            .sum()
    }
}

impl Validate for VersionedProcessGroup {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl Model for VersionedProcessGroup {
    const TYPE_NAME: &'static str = "VersionedProcessGroup";
    const ATTRIBUTE_MAP: &'static [(&'static str, &'static str)] = &[
        ("identifier", "identifier"),
        ("name", "name"),
        ("comments", "comments"),
        ("position", "position"),
        ("processors", "processors"),
        ("process_groups", "processGroups"),
        ("variables", "variables"),
        ("component_type", "componentType"),
    ];
    const FILTER_KEYS: &'static [(&'static str, &'static str)] =
        &[("name", "name"), ("id", "identifier")];
}

/// flow 的單一版本快照，用於匯出與匯入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedFlowSnapshot {
    snapshot_metadata: VersionedFlowSnapshotMetadata,
    flow_contents: VersionedProcessGroup,
    #[serde(skip_serializing_if = "Option::is_none")]
    flow: Option<VersionedFlow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bucket: Option<Bucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    latest: Option<bool>,
}

impl VersionedFlowSnapshot {
    pub fn new(
        snapshot_metadata: VersionedFlowSnapshotMetadata,
        flow_contents: VersionedProcessGroup,
    ) -> Self {
        Self {
            snapshot_metadata,
            flow_contents,
            flow: None,
            bucket: None,
            latest: None,
        }
    }

    pub fn snapshot_metadata(&self) -> &VersionedFlowSnapshotMetadata {
        &self.snapshot_metadata
    }

    pub fn set_snapshot_metadata(&mut self, snapshot_metadata: VersionedFlowSnapshotMetadata) {
        self.snapshot_metadata = snapshot_metadata;
    }

    pub fn flow_contents(&self) -> &VersionedProcessGroup {
        &self.flow_contents
    }

    pub fn set_flow_contents(&mut self, flow_contents: VersionedProcessGroup) {
        self.flow_contents = flow_contents;
    }

    pub fn flow(&self) -> Option<&VersionedFlow> {
        self.flow.as_ref()
    }

    pub fn set_flow(&mut self, flow: Option<VersionedFlow>) {
        self.flow = flow;
    }

    pub fn bucket(&self) -> Option<&Bucket> {
        self.bucket.as_ref()
    }

    pub fn set_bucket(&mut self, bucket: Option<Bucket>) {
        self.bucket = bucket;
    }

    pub fn latest(&self) -> Option<bool> {
        self.latest
    }

    pub fn set_latest(&mut self, latest: Option<bool>) {
        self.latest = latest;
    }
}

impl Validate for VersionedFlowSnapshot {
    fn validate(&self) -> Result<()> {
        self.snapshot_metadata.validate()?;
        self.flow_contents.validate()?;
        if let Some(flow) = &self.flow {
            flow.validate()?;
        }
        if let Some(bucket) = &self.bucket {
            bucket.validate()?;
        }
        Ok(())
    }
}

impl Model for VersionedFlowSnapshot {
    const TYPE_NAME: &'static str = "VersionedFlowSnapshot";
    const ATTRIBUTE_MAP: &'static [(&'static str, &'static str)] = &[
        ("snapshot_metadata", "snapshotMetadata"),
        ("flow_contents", "flowContents"),
        ("flow", "flow"),
        ("bucket", "bucket"),
        ("latest", "latest"),
    ];
    const FILTER_KEYS: &'static [(&'static str, &'static str)] = &[
        ("version", "snapshotMetadata.version"),
        ("flow_name", "flow.name"),
    ];
    const REQUIRED: &'static [&'static str] = &["snapshot_metadata", "flow_contents"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Mappable;
    use crate::utils::error::SdkError;
    use crate::Value;

    #[test]
    fn test_versioned_flow_rejects_unknown_type() {
        let err = VersionedFlow::new("flow", "bucket-1", "Bucket").unwrap_err();
        assert!(matches!(err, SdkError::InvalidField { ref field, .. } if field == "type"));
    }

    #[test]
    fn test_failed_setter_keeps_previous_value() {
        let mut flow = VersionedFlow::new("flow", "bucket-1", "Flow").unwrap();
        flow.set_version_count(Some(3)).unwrap();

        assert!(flow.set_version_count(Some(-1)).is_err());
        assert_eq!(flow.version_count(), Some(3));

        assert!(flow.set_created_timestamp(Some(0)).is_err());
        assert_eq!(flow.created_timestamp(), None);

        assert!(flow.set_flow_type("Other").is_err());
        assert_eq!(flow.flow_type(), "Flow");
    }

    #[test]
    fn test_mapping_uses_wire_keys_and_skips_absent_fields() {
        let mut flow = VersionedFlow::new("flow", "bucket-1", "Flow").unwrap();
        flow.set_bucket_name(Some("bucket".to_string()));

        let mapping = flow.to_mapping().unwrap();
        let keys: Vec<&String> = mapping.as_map().unwrap().keys().collect();
        assert_eq!(keys, vec!["bucketIdentifier", "bucketName", "name", "type"]);
        assert_eq!(
            mapping.get_path("bucketIdentifier"),
            Some(&Value::from("bucket-1"))
        );
    }

    #[test]
    fn test_wire_key_lookup() {
        assert_eq!(
            VersionedFlow::wire_key("bucket_identifier"),
            Some("bucketIdentifier")
        );
        assert_eq!(VersionedFlow::wire_key("bucketIdentifier"), None);
    }

    #[test]
    fn test_snapshot_metadata_version_minimum() {
        assert!(VersionedFlowSnapshotMetadata::new("b", "f", -1).is_ok());
        assert!(VersionedFlowSnapshotMetadata::new("b", "f", -2).is_err());
    }

    #[test]
    fn test_process_group_counts() {
        let leaf = VersionedProcessGroup {
            processors: Some(vec![VersionedProcessor::default(); 2]),
            ..Default::default()
        };
        let root = VersionedProcessGroup {
            processors: Some(vec![VersionedProcessor::default()]),
            process_groups: Some(vec![leaf.clone(), leaf]),
            ..Default::default()
        };
        assert_eq!(root.processor_count(), 5);
        assert_eq!(root.group_count(), 2);
    }

    #[test]
    fn test_equality_is_full_state() {
        let a = VersionedFlow::new("flow", "bucket-1", "Flow").unwrap();
        let mut b = a.clone();
        assert_eq!(a, b);
        b.set_description(Some("changed".to_string()));
        assert_ne!(a, b);
    }
}
