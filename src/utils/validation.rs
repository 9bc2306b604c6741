use crate::utils::error::{Result, SdkError};
use std::fmt::Display;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 可選數值欄位：`None` 直接通過，有值時必須 `>= min`
pub fn validate_minimum<T: PartialOrd + Display + Copy>(
    field_name: &str,
    value: Option<T>,
    min: T,
) -> Result<()> {
    match value {
        Some(v) if v < min => Err(SdkError::invalid_field(
            field_name,
            format!("must be a value greater than or equal to `{}`", min),
        )),
        _ => Ok(()),
    }
}

pub fn validate_allowed_value(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(SdkError::invalid_field(
        field_name,
        format!("({}) must be one of {:?}", value, allowed),
    ))
}
