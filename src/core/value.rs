use crate::domain::model::Mappable;
use crate::utils::error::{Result, SdkError};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// 動態型別的物件圖，作為 `dump` 的輸入與 `load_value` 的輸出
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    /// 超出 i64 範圍的正整數
    UInt(u64),
    Float(f64),
    Str(String),
    Seq(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// 無序集合，無法以 JSON 或 YAML 表示
    Set(Vec<Value>),
    Model(Arc<dyn Mappable>),
}

impl Value {
    pub fn model<M: Mappable + 'static>(model: M) -> Self {
        Value::Model(Arc::new(model))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::UInt(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "mapping",
            Value::Set(_) => "set",
            Value::Model(m) => m.type_name(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// 沿著點分隔路徑 (例如 `component.name`) 逐層取值
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(self, |node, segment| node.as_map()?.get(segment))
    }

    /// 轉為純 JSON 資料，模型以深度優先展開
    pub fn to_plain(&self) -> Result<serde_json::Value> {
        Ok(match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::UInt(u) => serde_json::Value::Number((*u).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .ok_or_else(|| {
                    SdkError::type_error(format!("float value {} is not representable", f))
                })?,
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Seq(items) => serde_json::Value::Array(
                items.iter().map(Value::to_plain).collect::<Result<Vec<_>>>()?,
            ),
            Value::Map(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), v.to_plain()?)))
                    .collect::<Result<serde_json::Map<_, _>>>()?,
            ),
            Value::Set(_) => {
                return Err(SdkError::type_error(
                    "object of type set is not JSON or YAML serializable",
                ))
            }
            Value::Model(m) => m.to_mapping()?.to_plain()?,
        })
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => {
                a.len() == b.len() && a.iter().all(|x| b.contains(x)) && b.iter().all(|y| a.contains(y))
            }
            (Value::Model(a), Value::Model(b)) => match (a.to_mapping(), b.to_mapping()) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            },
            (Value::Model(m), map @ Value::Map(_)) | (map @ Value::Map(_), Value::Model(m)) => {
                m.to_mapping().map_or(false, |mapping| &mapping == map)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_plain() {
            Ok(plain) => write!(f, "{}", plain),
            Err(_) => write!(f, "<{}>", self.kind()),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Value::Int(i),
                (None, Some(u)) => Value::UInt(u),
                _ => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::Seq(items.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Str(value.clone())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Value::UInt(value), Value::Int)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Seq(value)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Value::Map(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        Value::from_iter([
            ("name", Value::from("flow")),
            ("count", Value::from(3)),
            (
                "component",
                Value::from_iter([("name", Value::from("inner"))]),
            ),
        ])
    }

    #[test]
    fn test_get_path_walks_nested_maps() {
        let value = sample();
        assert_eq!(value.get_path("component.name"), Some(&Value::from("inner")));
        assert_eq!(value.get_path("name"), Some(&Value::from("flow")));
        assert!(value.get_path("component.missing").is_none());
        assert!(value.get_path("name.deeper").is_none());
    }

    #[test]
    fn test_map_equality_ignores_insertion_order() {
        let a = Value::from_iter([("a", Value::from(1)), ("b", Value::from(2))]);
        let b = Value::from_iter([("b", Value::from(2)), ("a", Value::from(1))]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_set_equality_ignores_order() {
        let a = Value::Set(vec![Value::from(1), Value::from("x")]);
        let b = Value::Set(vec![Value::from("x"), Value::from(1)]);
        assert_eq!(a, b);
        assert_ne!(a, Value::Seq(vec![Value::from(1), Value::from("x")]));
    }

    #[test]
    fn test_set_is_not_plain() {
        let nested = Value::Seq(vec![Value::Set(vec![Value::Null])]);
        let err = nested.to_plain().unwrap_err();
        assert!(matches!(err, SdkError::TypeError { .. }));
    }

    #[test]
    fn test_non_finite_float_is_not_plain() {
        assert!(Value::Float(f64::NAN).to_plain().is_err());
        assert!(Value::Float(f64::INFINITY).to_plain().is_err());
    }

    #[test]
    fn test_integers_beyond_i64_stay_exact() {
        let plain = serde_json::json!({"a": u64::MAX, "b": i64::MIN});
        let value = Value::from(plain.clone());
        assert_eq!(value.get_path("a"), Some(&Value::UInt(u64::MAX)));
        assert_eq!(value.get_path("b"), Some(&Value::Int(i64::MIN)));
        assert_eq!(value.to_plain().unwrap(), plain);
        assert_eq!(Value::from(7_u64), Value::Int(7));
    }

    #[derive(Debug)]
    struct Fixed;

    impl Mappable for Fixed {
        fn type_name(&self) -> &'static str {
            "Fixed"
        }

        fn to_mapping(&self) -> Result<Value> {
            Ok(Value::from_iter([("name", Value::from("fixed"))]))
        }
    }

    #[test]
    fn test_model_equals_its_plain_mapping() {
        let model = Value::model(Fixed);
        let plain = Value::from_iter([("name", Value::from("fixed"))]);
        assert_eq!(model, plain);
        assert_eq!(plain, model);
        assert_ne!(model, Value::from_iter([("name", Value::from("other"))]));
        assert_ne!(model, Value::from("fixed"));
    }

    #[test]
    fn test_plain_conversion_preserves_content() {
        let value = sample();
        let plain = value.to_plain().unwrap();
        assert_eq!(
            plain,
            serde_json::json!({"name": "flow", "count": 3, "component": {"name": "inner"}})
        );
        assert_eq!(Value::from(plain), value);
    }
}
