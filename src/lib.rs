#![warn(missing_docs)]
//! # Kunalink-Core
//!
//! Kunalink-Core is a rust library for speaking the Kuna video proxy
//! protocol: the tagged binary message format used over the websocket
//! tunnel to the vendor's RTSP relay service.
//!
//! The low level message formats live in the [`proxy`] module. An open
//! session request can be built with
//!
//! ```
//! use kunalink_core::proxy::model::OpenSession;
//! let request = OpenSession {
//!     cookie: 1,
//!     camera_serial: "ABC123".to_string(),
//!     auth_token: "a-bearer-token".to_string(),
//! };
//! let wire_bytes = request.serialize(vec![]).unwrap();
//! ```
//!
//! For performing the full request/response exchange over an established
//! transport see [`session::open_session`].

/// Contains low level structures and formats of the proxy protocol
pub mod proxy;
/// Contains the high level request/response exchange
pub mod session;

mod errors;

/// This is the top level error structure of the library
///
/// Most operations will either return their `Ok(result)` or this `Err(Error)`
pub use errors::Error;

pub(crate) use errors::Result;

lazy_static::lazy_static! {
    /// This is a high level timeout for the single request/response exchange.
    /// Not the lowlevel io ones
    ///
    /// This is used to timeout when the proxy service does not reply to an
    /// open session request. The service replies promptly when reachable so
    /// anything longer than this is a dead tunnel
    pub(crate) static ref TIMEOUT: tokio::time::Duration = tokio::time::Duration::from_secs(60);
}

/// A convience future to timeout with the default timeout specified in [`TIMEOUT`]
pub(crate) fn timeout<F>(future: F) -> tokio::time::Timeout<F>
where
    F: std::future::Future,
{
    tokio::time::timeout(*TIMEOUT, future)
}
