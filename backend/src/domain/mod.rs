//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed user values shared by the HTTP and
//! persistence layers, plus the transport agnostic error payload.
//!
//! Public surface:
//! - Error / ErrorCode: error payload and stable identifiers.
//! - TraceId: request correlation identifier.
//! - User, UserDraft, NewUserRecord and their field types.
//! - UserService: implementation of the driving ports.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Age, EmailAddress, NewUserRecord, Password, PasswordDigest, User, UserDraft, UserId,
    UserName, UserValidationError,
};
pub use self::user_service::UserService;
