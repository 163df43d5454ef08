//! Native result codes and the error they turn into.

use std::fmt;

use purrr_sys as sys;
use thiserror::Error;

/// Result type for purrr operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the wrapper types.
///
/// Every failure comes from the native library: a call returned a negative
/// result code. The code is carried verbatim so callers can decide whether it
/// is worth retrying.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum Error {
    #[error("native call `{op}` failed: {code}")]
    NativeCall {
        /// Name of the `purrr_` function that failed.
        op: &'static str,
        code: ResultCode,
    },
}

impl Error {
    /// The native result code behind this error.
    pub fn code(&self) -> ResultCode {
        match self {
            Error::NativeCall { code, .. } => *code,
        }
    }
}

/// Raw result code returned by every fallible native call.
///
/// Zero and positive values are successes; `TRUE` additionally answers a
/// yes/no query positively. Negative values are failures.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ResultCode(pub i32);

impl ResultCode {
    pub const SUCCESS: Self = Self(sys::PURRR_SUCCESS);
    pub const TRUE: Self = Self(sys::PURRR_TRUE);
    pub const INVALID_ARGS: Self = Self(sys::PURRR_INVALID_ARGS_ERROR);
    pub const INTERNAL: Self = Self(sys::PURRR_INTERNAL_ERROR);
    pub const OUT_OF_MEMORY: Self = Self(sys::PURRR_OUT_OF_MEMORY);
    pub const NOT_IMPLEMENTED: Self = Self(sys::PURRR_NOT_IMPLEMENTED);

    #[inline]
    pub fn is_failure(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub fn is_true(self) -> bool {
        self == Self::TRUE
    }

    /// Turns a failure code into [`Error::NativeCall`]; passes successes through.
    pub fn check(self, op: &'static str) -> Result<Self> {
        if self.is_failure() {
            log::debug!("{op} returned {self}");
            return Err(Error::NativeCall { op, code: self });
        }
        Ok(self)
    }

    fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::SUCCESS => "success",
            Self::TRUE => "true",
            Self::INVALID_ARGS => "invalid arguments",
            Self::INTERNAL => "internal error",
            Self::OUT_OF_MEMORY => "out of memory",
            Self::NOT_IMPLEMENTED => "not implemented",
            _ => return None,
        })
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} ({})", self.0),
            None if self.is_failure() => write!(f, "unknown error ({})", self.0),
            None => write!(f, "unknown success ({})", self.0),
        }
    }
}

impl From<i32> for ResultCode {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_and_true_pass_check() {
        assert_eq!(ResultCode::SUCCESS.check("op").unwrap(), ResultCode::SUCCESS);
        assert!(ResultCode::TRUE.check("op").unwrap().is_true());
    }

    #[test]
    fn failure_carries_code_and_op() {
        let err = ResultCode::INTERNAL.check("purrr_create_window").unwrap_err();
        assert_eq!(err.code(), ResultCode::INTERNAL);
        assert_eq!(
            err.to_string(),
            "native call `purrr_create_window` failed: internal error (-2)"
        );
    }

    #[test]
    fn unknown_negative_codes_are_failures() {
        let code = ResultCode(-77);
        assert!(code.is_failure());
        assert_eq!(code.to_string(), "unknown error (-77)");
        assert_eq!(code.check("op").unwrap_err().code(), code);
    }

    #[test]
    fn unknown_positive_codes_are_successes() {
        assert!(ResultCode(9).check("op").is_ok());
        assert!(!ResultCode(9).is_true());
    }
}
