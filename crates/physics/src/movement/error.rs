//! Controller construction errors.

use std::borrow::Cow;

use thiserror::Error;

/// Why a controller could not be built.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("no character body was supplied")]
    MissingBody,

    #[error("no camera pivot was supplied")]
    MissingCameraPivot,

    #[error("invalid configuration value `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: Cow<'static, str>,
    },
}

impl ControllerError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
