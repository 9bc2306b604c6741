use crate::core::value::Value;
use crate::domain::model::Model;
use crate::utils::error::{Result, SdkError};

/// `filter_obj` 的結果：單一元素，或依輸入順序排列的所有符合元素
#[derive(Debug, PartialEq)]
pub enum Filtered<'a, T> {
    One(&'a T),
    Many(Vec<&'a T>),
}

impl<'a, T> Filtered<'a, T> {
    pub fn len(&self) -> usize {
        match self {
            Filtered::One(_) => 1,
            Filtered::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_vec(self) -> Vec<&'a T> {
        match self {
            Filtered::One(item) => vec![item],
            Filtered::Many(items) => items,
        }
    }

    pub fn one(&self) -> Option<&'a T> {
        match self {
            Filtered::One(item) => Some(*item),
            Filtered::Many(_) => None,
        }
    }
}

/// 篩選 `list_in` 中 `key_name` 屬性等於 `value` 的元素
///
/// 空列表直接回傳 `Ok(None)`，不檢查 key；否則 key 不可為空且必須是 `T` 認得的鍵。
pub fn filter_obj<'a, T: Model>(
    list_in: &'a [T],
    value: impl Into<Value>,
    key_name: &str,
) -> Result<Option<Filtered<'a, T>>> {
    if list_in.is_empty() {
        return Ok(None);
    }
    if key_name.is_empty() {
        return Err(SdkError::invalid_argument(format!(
            "a filter key is required to filter {} objects",
            T::TYPE_NAME
        )));
    }

    let value = value.into();
    let mut matches = Vec::new();
    for item in list_in {
        if item.attribute(key_name)? == value {
            matches.push(item);
        }
    }

    tracing::debug!(
        "Filtered {} {} by {}={}: {} match(es)",
        list_in.len(),
        T::TYPE_NAME,
        key_name,
        value,
        matches.len()
    );

    Ok(match matches.len() {
        0 => None,
        1 => Some(Filtered::One(matches[0])),
        _ => Some(Filtered::Many(matches)),
    })
}
