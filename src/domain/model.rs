use crate::core::value::Value;
use crate::utils::error::{Result, SdkError};
use crate::utils::validation::Validate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// DTO 的物件安全視圖：可轉為純 mapping 的任何物件
pub trait Mappable: fmt::Debug + Send + Sync {
    fn type_name(&self) -> &'static str;
    fn to_mapping(&self) -> Result<Value>;
}

/// REST 資源 DTO
///
/// 序列化透過 serde 使用 wire key；`ATTRIBUTE_MAP` 保存屬性名到 wire key 的對照，
/// `FILTER_KEYS` 將過濾鍵對應到以點分隔的 wire 路徑 (供 `filter_obj` 使用)，
/// `REQUIRED` 列出載入時必須存在且不為 null 的屬性。
pub trait Model: Serialize + DeserializeOwned + Validate + Clone + fmt::Debug + Send + Sync + 'static {
    const TYPE_NAME: &'static str;
    const ATTRIBUTE_MAP: &'static [(&'static str, &'static str)];
    const FILTER_KEYS: &'static [(&'static str, &'static str)] = &[];
    const REQUIRED: &'static [&'static str] = &[];

    fn wire_key(attribute: &str) -> Option<&'static str> {
        Self::ATTRIBUTE_MAP
            .iter()
            .find(|(attr, _)| *attr == attribute)
            .map(|(_, wire)| *wire)
    }

    /// 讀取 `key` 指定的屬性；未設定的可選欄位回傳 `Null`
    fn attribute(&self, key: &str) -> Result<Value> {
        let path = Self::FILTER_KEYS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, path)| *path)
            .or_else(|| Self::wire_key(key))
            .ok_or_else(|| {
                SdkError::invalid_argument(format!(
                    "{} has no attribute or filter key '{}'",
                    Self::TYPE_NAME,
                    key
                ))
            })?;

        let mapping = model_to_mapping(self)?;
        Ok(mapping.get_path(path).cloned().unwrap_or(Value::Null))
    }

    fn into_value(self) -> Value {
        Value::model(self)
    }
}

impl<T: Model> Mappable for T {
    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn to_mapping(&self) -> Result<Value> {
        model_to_mapping(self)
    }
}

fn model_to_mapping<T: Serialize>(model: &T) -> Result<Value> {
    serde_json::to_value(model)
        .map(Value::from)
        .map_err(|e| SdkError::type_error(format!("model is not serializable: {}", e)))
}
