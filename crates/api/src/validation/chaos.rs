use std::borrow::Cow;
use std::str::FromStr;

use sentinel_core::models::ExperimentType;
use validator::ValidationError;

/// 验证混沌实验类型
pub fn validate_experiment_type(experiment_type: &str) -> Result<(), ValidationError> {
    if ExperimentType::from_str(experiment_type).is_ok() {
        return Ok(());
    }

    let allowed: Vec<&str> = ExperimentType::ALL.iter().map(|t| t.as_str()).collect();
    Err(ValidationError::new("experiment_type").with_message(Cow::Owned(format!(
        "Invalid experiment type, expected one of: {}",
        allowed.join(", ")
    ))))
}

/// 验证名称类字段不能只包含空白
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("Value cannot be blank")));
    }
    Ok(())
}
