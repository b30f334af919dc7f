// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Errors for the fallible setup paths (config, logging, CLI). The per keystroke
//! suggestion pipeline never returns these: it absorbs terminal failures and logs them.

use std::{error::Error,
          fmt::{Debug, Display, Formatter, Result}};

/// Type alias to make it easy to work with [`miette::Result`] and [`miette::Report`],
/// which wrap any [`std::error::Error`].
///
/// # Example
///
/// ```
/// use r3bl_suggest::{CommonError, CommonErrorType, CommonResult};
///
/// fn parse_rank(it: &str) -> CommonResult<i64> {
///     match it.parse::<i64>() {
///         Ok(rank) => Ok(rank),
///         Err(_) => CommonError::new_error_result(
///             CommonErrorType::InvalidValue,
///             &format!("Invalid rank: {it}"),
///         ),
///     }
/// }
///
/// assert!(parse_rank("12").is_ok());
/// assert!(parse_rank("twelve").is_err());
/// ```
pub type CommonResult<T> = miette::Result<T>;

/// Error carried inside a [`miette::Report`] when there is no typed error for it.
#[derive(Debug, Clone)]
pub struct CommonError {
    pub error_type: CommonErrorType,
    pub error_message: Option<String>,
}

#[non_exhaustive]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommonErrorType {
    #[default]
    General,
    InvalidArguments,
    InvalidValue,
    NotFound,
}

impl Error for CommonError {}

/// Same as the derived [`Debug`], so the type shows up in the report.
impl Display for CommonError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result { Debug::fmt(self, f) }
}

impl CommonError {
    /// # Errors
    ///
    /// Always returns an error, that's the point.
    pub fn new_error_result<T>(err_type: CommonErrorType, msg: &str) -> CommonResult<T> {
        Err(miette::miette!(CommonError {
            error_type: err_type,
            error_message: Some(msg.to_string()),
        }))
    }
}
