use crate::domain::flow::{Permissions, Position};
use crate::domain::model::Model;
use crate::utils::error::Result;
use crate::utils::validation::{validate_minimum, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modifier: Option<String>,
}

impl Validate for RevisionDto {
    fn validate(&self) -> Result<()> {
        validate_minimum("version", self.version, 0)
    }
}

impl Model for RevisionDto {
    const TYPE_NAME: &'static str = "RevisionDTO";
    const ATTRIBUTE_MAP: &'static [(&'static str, &'static str)] = &[
        ("client_id", "clientId"),
        ("version", "version"),
        ("last_modifier", "lastModifier"),
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessGroupDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// flow API 回傳的 process group，附帶 revision 與權限
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessGroupEntity {
    #[serde(skip_serializing_if = "Option::is_none")]
    revision: Option<RevisionDto>,
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    permissions: Option<Permissions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    component: Option<ProcessGroupDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    running_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stopped_count: Option<i32>,
}

impl ProcessGroupEntity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            revision: None,
            id: id.into(),
            uri: None,
            position: None,
            permissions: None,
            component: None,
            running_count: None,
            stopped_count: None,
        }
    }

    /// 建立 component 帶有相同 id 與指定名稱的 entity
    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        let mut entity = Self::new(id.clone());
        entity.component = Some(ProcessGroupDto {
            id: Some(id),
            name: Some(name.into()),
            ..Default::default()
        });
        entity
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn name(&self) -> Option<&str> {
        self.component.as_ref()?.name.as_deref()
    }

    pub fn revision(&self) -> Option<&RevisionDto> {
        self.revision.as_ref()
    }

    pub fn set_revision(&mut self, revision: Option<RevisionDto>) -> Result<()> {
        if let Some(revision) = &revision {
            revision.validate()?;
        }
        self.revision = revision;
        Ok(())
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    pub fn set_uri(&mut self, uri: Option<String>) {
        self.uri = uri;
    }

    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }

    pub fn permissions(&self) -> Option<&Permissions> {
        self.permissions.as_ref()
    }

    pub fn set_permissions(&mut self, permissions: Option<Permissions>) {
        self.permissions = permissions;
    }

    pub fn component(&self) -> Option<&ProcessGroupDto> {
        self.component.as_ref()
    }

    pub fn set_component(&mut self, component: Option<ProcessGroupDto>) {
        self.component = component;
    }

    pub fn running_count(&self) -> Option<i32> {
        self.running_count
    }

    pub fn set_running_count(&mut self, running_count: Option<i32>) -> Result<()> {
        validate_minimum("running_count", running_count, 0)?;
        self.running_count = running_count;
        Ok(())
    }

    pub fn stopped_count(&self) -> Option<i32> {
        self.stopped_count
    }

    pub fn set_stopped_count(&mut self, stopped_count: Option<i32>) -> Result<()> {
        validate_minimum("stopped_count", stopped_count, 0)?;
        self.stopped_count = stopped_count;
        Ok(())
    }
}

impl Validate for ProcessGroupEntity {
    fn validate(&self) -> Result<()> {
        if let Some(revision) = &self.revision {
            revision.validate()?;
        }
        validate_minimum("running_count", self.running_count, 0)?;
        validate_minimum("stopped_count", self.stopped_count, 0)
    }
}

impl Model for ProcessGroupEntity {
    const TYPE_NAME: &'static str = "ProcessGroupEntity";
    const ATTRIBUTE_MAP: &'static [(&'static str, &'static str)] = &[
        ("revision", "revision"),
        ("id", "id"),
        ("uri", "uri"),
        ("position", "position"),
        ("permissions", "permissions"),
        ("component", "component"),
        ("running_count", "runningCount"),
        ("stopped_count", "stoppedCount"),
    ];
    const FILTER_KEYS: &'static [(&'static str, &'static str)] =
        &[("name", "component.name"), ("id", "id")];
    const REQUIRED: &'static [&'static str] = &["id"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn test_name_filter_key_reads_component_name() {
        let entity = ProcessGroupEntity::named("pg-1", "nipyapi");
        assert_eq!(entity.attribute("name").unwrap(), Value::from("nipyapi"));
        assert_eq!(entity.attribute("id").unwrap(), Value::from("pg-1"));
    }

    #[test]
    fn test_attribute_name_falls_back_to_wire_key() {
        let mut entity = ProcessGroupEntity::new("pg-1");
        entity.set_running_count(Some(4)).unwrap();
        assert_eq!(entity.attribute("running_count").unwrap(), Value::from(4));
        assert_eq!(entity.attribute("uri").unwrap(), Value::Null);
    }

    #[test]
    fn test_unknown_attribute_is_invalid_argument() {
        let entity = ProcessGroupEntity::new("pg-1");
        assert!(entity.attribute("pie").is_err());
    }

    #[test]
    fn test_revision_version_is_validated() {
        let mut entity = ProcessGroupEntity::new("pg-1");
        let bad = RevisionDto {
            version: Some(-1),
            ..Default::default()
        };
        assert!(entity.set_revision(Some(bad)).is_err());
        assert!(entity.revision().is_none());
    }
}
