use crate::core::value::Value;
use crate::domain::model::Model;
use crate::utils::error::{Result, SdkError};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Json,
    Yaml,
}

impl FromStr for Mode {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Mode::Json),
            "yaml" => Ok(Mode::Yaml),
            other => Err(SdkError::invalid_argument(format!(
                "unsupported serialization mode '{}', expected 'json' or 'yaml'",
                other
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Json => write!(f, "json"),
            Mode::Yaml => write!(f, "yaml"),
        }
    }
}

/// `load` 的輸入：原始文字或已解析的物件圖
#[derive(Debug, Clone)]
pub enum Source<'a> {
    Text(&'a str),
    Parsed(Value),
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Source::Text(text)
    }
}

impl<'a> From<&'a String> for Source<'a> {
    fn from(text: &'a String) -> Self {
        Source::Text(text)
    }
}

impl From<Value> for Source<'_> {
    fn from(value: Value) -> Self {
        Source::Parsed(value)
    }
}

/// 將 `obj` 編碼為 JSON 或 YAML，`mode` 只接受 `"json"` 或 `"yaml"`
pub fn dump(obj: impl Into<Value>, mode: &str) -> Result<String> {
    let mode = mode.parse::<Mode>()?;
    dump_as(&obj.into(), mode)
}

/// 模型先展開為純 mapping，兩種模式的內容相同且鍵依序排列
pub fn dump_as(obj: &Value, mode: Mode) -> Result<String> {
    let plain = obj.to_plain()?;
    tracing::debug!("Dumping {} as {}", obj.kind(), mode);

    match mode {
        Mode::Json => {
            let mut buf = Vec::new();
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
            plain
                .serialize(&mut serializer)
                .map_err(|e| SdkError::type_error(format!("JSON encoding failed: {}", e)))?;
            String::from_utf8(buf)
                .map_err(|e| SdkError::type_error(format!("JSON output is not UTF-8: {}", e)))
        }
        Mode::Yaml => serde_yaml::to_string(&plain)
            .map_err(|e| SdkError::type_error(format!("YAML encoding failed: {}", e))),
    }
}

/// 不指定目標型別，解析為通用物件圖
pub fn load_value<'a>(obj: impl Into<Source<'a>>) -> Result<Value> {
    parse(obj.into()).map(Value::from)
}

/// 解析 `obj` 並重建為 `T` (含巢狀模型)，再進行驗證
pub fn load<'a, T: Model>(obj: impl Into<Source<'a>>) -> Result<T> {
    let plain = parse(obj.into())?;
    check_required::<T>(&plain)?;
    let model: T = serde_json::from_value(plain).map_err(|e| {
        SdkError::stream_format(format!("input does not describe a {}: {}", T::TYPE_NAME, e))
    })?;
    model.validate()?;
    tracing::debug!("Loaded {}", T::TYPE_NAME);
    Ok(model)
}

fn check_required<T: Model>(plain: &serde_json::Value) -> Result<()> {
    let Some(map) = plain.as_object() else {
        return Ok(());
    };
    for &attribute in T::REQUIRED {
        let wire = T::wire_key(attribute).unwrap_or(attribute);
        if map.get(wire).map_or(true, serde_json::Value::is_null) {
            return Err(SdkError::invalid_field(attribute, "must not be `None`"));
        }
    }
    Ok(())
}

// YAML 是 JSON 的超集，一個解析器即可處理兩種格式
fn parse(source: Source<'_>) -> Result<serde_json::Value> {
    let plain = match source {
        Source::Text(text) => {
            if text.trim().is_empty() {
                return Err(SdkError::stream_format("input stream is empty"));
            }
            serde_yaml::from_str::<serde_json::Value>(text)
                .map_err(|e| SdkError::stream_format(format!("unparseable input: {}", e)))?
        }
        Source::Parsed(value) => value
            .to_plain()
            .map_err(|e| SdkError::stream_format(format!("unloadable structure: {}", e)))?,
    };

    match &plain {
        serde_json::Value::Null => Err(SdkError::stream_format("input holds no document")),
        serde_json::Value::Object(map) if map.is_empty() => {
            Err(SdkError::stream_format("input is an empty mapping"))
        }
        _ => Ok(plain),
    }
}
