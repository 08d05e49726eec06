//! Validation of inbound lock/unlock parameters
//!
//! Parameters arrive as JSON bodies with the target repeated in the request
//! path. Validation resolves the target, checks every field and turns the
//! TTL literal into a [`Duration`] before anything reaches the lock manager.

use std::borrow::Cow;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::duration::parse_duration;
use crate::error::{FieldViolation, ValidationError};

/// Body of `POST /{target}/lock`
#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate)]
pub struct LockParams {
    #[serde(default)]
    #[validate(length(min = 1, message = "target is required"))]
    pub target: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "user is required"))]
    pub user: String,
    #[serde(default)]
    #[validate(custom(function = "validate_ttl"))]
    pub ttl: String,
}

/// Body of `POST /{target}/unlock`
#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate)]
pub struct UnlockParams {
    #[serde(default)]
    #[validate(length(min = 1, message = "target is required"))]
    pub target: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "user is required"))]
    pub user: String,
}

/// Validated acquisition request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockCommand {
    pub target: String,
    pub owner: String,
    pub ttl: Duration,
}

/// Validated release request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnlockCommand {
    pub target: String,
    pub owner: String,
}

/// TTL must be a positive duration literal
pub fn validate_ttl(ttl: &str) -> Result<(), validator::ValidationError> {
    if ttl.is_empty() {
        return Err(validator::ValidationError::new("ttl_required")
            .with_message(Cow::Borrowed("ttl is required")));
    }
    match parse_duration(ttl) {
        Ok(d) if d.is_zero() => Err(validator::ValidationError::new("ttl_not_positive")
            .with_message(Cow::Borrowed("ttl must be greater than zero"))),
        Ok(_) => Ok(()),
        Err(e) => Err(validator::ValidationError::new("ttl_invalid")
            .with_message(Cow::Owned(format!("ttl is invalid: {e}")))),
    }
}

/// Fill an omitted body target from the path, reject a conflicting one
fn resolve_target(body_target: &mut String, path_target: &str) -> Result<(), ValidationError> {
    if path_target.is_empty() {
        return Ok(());
    }
    if body_target.is_empty() {
        *body_target = path_target.to_string();
        return Ok(());
    }
    if body_target != path_target {
        return Err(ValidationError::single(
            "target",
            "target_mismatch",
            format!("target {body_target} does not match path target {path_target}"),
        ));
    }
    Ok(())
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut violations: Vec<FieldViolation> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldViolation {
                    field: field.to_string(),
                    code: e.code.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid")),
                })
            })
            .collect();
        violations.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError { violations }
    }
}

impl LockParams {
    /// Validate against the `{target}` path segment
    pub fn into_command(mut self, path_target: &str) -> Result<LockCommand, ValidationError> {
        resolve_target(&mut self.target, path_target)?;
        LockCommand::try_from(self)
    }
}

impl UnlockParams {
    /// Validate against the `{target}` path segment
    pub fn into_command(mut self, path_target: &str) -> Result<UnlockCommand, ValidationError> {
        resolve_target(&mut self.target, path_target)?;
        UnlockCommand::try_from(self)
    }
}

impl TryFrom<LockParams> for LockCommand {
    type Error = ValidationError;

    fn try_from(params: LockParams) -> Result<Self, Self::Error> {
        params.validate()?;
        let ttl = parse_duration(&params.ttl)
            .map_err(|e| ValidationError::single("ttl", "ttl_invalid", format!("ttl is invalid: {e}")))?;

        Ok(LockCommand {
            target: params.target,
            owner: params.user,
            ttl,
        })
    }
}

impl TryFrom<UnlockParams> for UnlockCommand {
    type Error = ValidationError;

    fn try_from(params: UnlockParams) -> Result<Self, Self::Error> {
        params.validate()?;

        Ok(UnlockCommand {
            target: params.target,
            owner: params.user,
        })
    }
}
