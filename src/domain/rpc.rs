//! RPC status model - error codes, statuses and warnings produced by validation
//!
//! Every rejection the engine produces is a [`Status`]: a code drawn from a
//! closed set plus an optional message. Codes are split between the ones the
//! ledger protocol defines ([`ProtocolError`]) and the ones this server adds
//! on top ([`ServerError`]).

use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;

/// Error codes defined by the ledger protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolError {
    BadSyntax,
    InvalidParams,
    UnknownCommand,
    ActMalformed,
    DstAmtMalformed,
    DstIsrMalformed,
    SrcCurMalformed,
    SrcIsrMalformed,
    StreamMalformed,
    Internal,
    NotSupported,
    ReportingUnsupported,
    IssueMalformed,
}

impl ProtocolError {
    /// Numeric code as sent on the wire
    pub fn code(self) -> i32 {
        match self {
            ProtocolError::BadSyntax => 1,
            ProtocolError::InvalidParams => 31,
            ProtocolError::UnknownCommand => 32,
            ProtocolError::ActMalformed => 35,
            ProtocolError::DstAmtMalformed => 51,
            ProtocolError::DstIsrMalformed => 53,
            ProtocolError::SrcCurMalformed => 69,
            ProtocolError::SrcIsrMalformed => 70,
            ProtocolError::StreamMalformed => 71,
            ProtocolError::Internal => 73,
            ProtocolError::NotSupported => 75,
            ProtocolError::ReportingUnsupported => 91,
            ProtocolError::IssueMalformed => 93,
        }
    }

    /// Short machine-readable token
    pub fn token(self) -> &'static str {
        match self {
            ProtocolError::BadSyntax => "badSyntax",
            ProtocolError::InvalidParams => "invalidParams",
            ProtocolError::UnknownCommand => "unknownCmd",
            ProtocolError::ActMalformed => "actMalformed",
            ProtocolError::DstAmtMalformed => "dstAmtMalformed",
            ProtocolError::DstIsrMalformed => "dstIsrMalformed",
            ProtocolError::SrcCurMalformed => "srcCurMalformed",
            ProtocolError::SrcIsrMalformed => "srcIsrMalformed",
            ProtocolError::StreamMalformed => "malformedStream",
            ProtocolError::Internal => "internal",
            ProtocolError::NotSupported => "notSupported",
            ProtocolError::ReportingUnsupported => "reportingUnsupported",
            ProtocolError::IssueMalformed => "issueMalformed",
        }
    }

    /// Human-readable message used when a status carries none
    pub fn default_message(self) -> &'static str {
        match self {
            ProtocolError::BadSyntax => "Syntax error.",
            ProtocolError::InvalidParams => "Invalid parameters.",
            ProtocolError::UnknownCommand => "Unknown method.",
            ProtocolError::ActMalformed => "Account malformed.",
            ProtocolError::DstAmtMalformed => "Destination amount/currency/issuer is malformed.",
            ProtocolError::DstIsrMalformed => "Destination issuer is malformed.",
            ProtocolError::SrcCurMalformed => "Source currency is malformed.",
            ProtocolError::SrcIsrMalformed => "Source issuer is malformed.",
            ProtocolError::StreamMalformed => "Stream malformed.",
            ProtocolError::Internal => "Internal error.",
            ProtocolError::NotSupported => "Operation not supported.",
            ProtocolError::ReportingUnsupported => {
                "Requested operation not supported by reporting mode server"
            }
            ProtocolError::IssueMalformed => "Issue is malformed.",
        }
    }
}

/// Error codes specific to this server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerError {
    MalformedCurrency,
    MalformedRequest,
    MalformedAddress,
    InvalidApiVersion,
    CommandIsMissing,
    CommandNotString,
    CommandIsEmpty,
    ParamsUnparseable,
}

impl ServerError {
    pub fn code(self) -> i32 {
        match self {
            ServerError::MalformedCurrency => 5000,
            ServerError::MalformedRequest => 5001,
            ServerError::MalformedAddress => 5003,
            // system errors start at 6000
            ServerError::InvalidApiVersion => 6000,
            ServerError::CommandIsMissing => 6001,
            ServerError::CommandNotString => 6002,
            ServerError::CommandIsEmpty => 6003,
            ServerError::ParamsUnparseable => 6004,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            ServerError::MalformedCurrency => "malformedCurrency",
            ServerError::MalformedRequest => "malformedRequest",
            ServerError::MalformedAddress => "malformedAddress",
            ServerError::InvalidApiVersion => "invalid_API_version",
            ServerError::CommandIsMissing => "missingCommand",
            ServerError::CommandNotString => "commandNotString",
            ServerError::CommandIsEmpty => "emptyCommand",
            ServerError::ParamsUnparseable => "paramsUnparseable",
        }
    }

    pub fn default_message(self) -> &'static str {
        match self {
            ServerError::MalformedCurrency => "Malformed currency.",
            ServerError::MalformedRequest => "Malformed request.",
            ServerError::MalformedAddress => "Malformed address.",
            ServerError::InvalidApiVersion => "Invalid API version.",
            ServerError::CommandIsMissing => "Method is not specified or is not a string.",
            ServerError::CommandNotString => "Method is not a string.",
            ServerError::CommandIsEmpty => "Method is an empty string.",
            ServerError::ParamsUnparseable => "Params must be an array holding exactly one object.",
        }
    }
}

/// Any error code the engine can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Protocol(ProtocolError),
    Server(ServerError),
}

impl ErrorCode {
    pub fn code(self) -> i32 {
        match self {
            ErrorCode::Protocol(err) => err.code(),
            ErrorCode::Server(err) => err.code(),
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            ErrorCode::Protocol(err) => err.token(),
            ErrorCode::Server(err) => err.token(),
        }
    }

    pub fn default_message(self) -> &'static str {
        match self {
            ErrorCode::Protocol(err) => err.default_message(),
            ErrorCode::Server(err) => err.default_message(),
        }
    }
}

impl From<ProtocolError> for ErrorCode {
    fn from(err: ProtocolError) -> Self {
        ErrorCode::Protocol(err)
    }
}

impl From<ServerError> for ErrorCode {
    fn from(err: ServerError) -> Self {
        ErrorCode::Server(err)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A terminal validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub code: ErrorCode,
    pub message: Option<String>,
    field_path: Option<Box<FieldPath>>,
}

/// Where inside a nested object a failure was raised
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldPath {
    pub segments: Vec<String>,
    pub message: String,
}

impl Status {
    /// Create a status carrying only a code
    pub fn new(code: impl Into<ErrorCode>) -> Self {
        Self {
            code: code.into(),
            message: None,
            field_path: None,
        }
    }

    /// Create a status with a custom message
    pub fn with_message(code: impl Into<ErrorCode>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: Some(message.into()),
            field_path: None,
        }
    }

    /// Report this failure at `segments`, rendered as `a.b.c: msg`.
    ///
    /// The message is taken from the innermost failure, so re-nesting an
    /// already nested status never repeats its path.
    pub(crate) fn nested_at(self, segments: Vec<String>) -> Self {
        let message = match self.field_path {
            Some(path) => path.message,
            None => self.message().to_string(),
        };
        Self {
            code: self.code,
            message: Some(format!("{}: {}", segments.join("."), message)),
            field_path: Some(Box::new(FieldPath { segments, message })),
        }
    }

    pub(crate) fn field_path(&self) -> Option<&FieldPath> {
        self.field_path.as_deref()
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::with_message(ProtocolError::InvalidParams, message)
    }

    pub fn internal() -> Self {
        Self::new(ProtocolError::Internal)
    }

    /// The message to show, falling back to the code's default text
    pub fn message(&self) -> &str {
        self.message
            .as_deref()
            .unwrap_or_else(|| self.code.default_message())
    }

    /// Render the error fields expected by the response composer
    pub fn to_json(&self) -> Value {
        json!({
            "error": self.code.token(),
            "error_code": self.code.code(),
            "error_message": self.message(),
            "status": "error",
            "type": "response",
        })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message())
    }
}

impl std::error::Error for Status {}

impl From<ProtocolError> for Status {
    fn from(err: ProtocolError) -> Self {
        Status::new(err)
    }
}

impl From<ServerError> for Status {
    fn from(err: ServerError) -> Self {
        Status::new(err)
    }
}

/// Warning codes attached to otherwise successful responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WarningCode {
    /// Response was produced by this server rather than a full node
    Clio,
    /// Response is based on a ledger the server considers outdated
    Outdated,
    RateLimit,
    /// A deprecated field or field value was present and ignored
    Deprecated,
}

impl WarningCode {
    pub fn id(self) -> i32 {
        match self {
            WarningCode::Clio => 2001,
            WarningCode::Outdated => 2002,
            WarningCode::RateLimit => 2003,
            WarningCode::Deprecated => 2004,
        }
    }
}

/// Advisory annotation; never blocks a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub code: WarningCode,
    pub message: String,
}

impl Warning {
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "id": self.code.id(),
            "message": self.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_falls_back_to_default_message() {
        let status = Status::new(ProtocolError::InvalidParams);
        assert_eq!(status.message(), "Invalid parameters.");
        assert_eq!(status.to_string(), "invalidParams: Invalid parameters.");
    }

    #[test]
    fn test_status_json_uses_custom_message() {
        let status = Status::with_message(ProtocolError::ActMalformed, "accountMalformed");
        let rendered = status.to_json();
        assert_eq!(rendered["error"], "actMalformed");
        assert_eq!(rendered["error_code"], 35);
        assert_eq!(rendered["error_message"], "accountMalformed");
        assert_eq!(rendered["status"], "error");
        assert_eq!(rendered["type"], "response");
    }

    #[test]
    fn test_server_codes_live_above_protocol_range() {
        assert_eq!(ErrorCode::from(ServerError::MalformedCurrency).code(), 5000);
        assert_eq!(ErrorCode::from(ServerError::ParamsUnparseable).code(), 6004);
        assert_eq!(ServerError::InvalidApiVersion.token(), "invalid_API_version");
    }

    #[test]
    fn test_warning_renders_id_and_message() {
        let warning = Warning::new(WarningCode::Deprecated, "Field 'strict' is deprecated");
        let rendered = warning.to_json();
        assert_eq!(rendered["id"], 2004);
        assert_eq!(rendered["message"], "Field 'strict' is deprecated");
    }
}
