//! Session transport: single-endpoint request/response with session
//! continuity carried in headers.

mod http;

pub use http::{HttpTransport, Session, SESSION_HEADER, USER_HEADER};
