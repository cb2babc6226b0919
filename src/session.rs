//! The single request/response exchange with the proxy service
//!
//! After the secured transport is established the service expects a short
//! greeting, then one open session header, and replies with exactly one
//! event. Everything on the stream after that is the relayed RTSP data
//! which this crate does not interpret.
//!
//! There is no retry here. If the exchange fails the caller must tear the
//! transport down and establish a new one.

use crate::proxy::codex::ProxyCodex;
use crate::proxy::model::*;
use crate::{Error, Result};
use futures::{SinkExt, StreamExt};
use log::*;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::Framed;

// Sent raw on the transport before any event
const GREETING: &[u8] = b"hello";

/// Perform the open session exchange over an established transport
///
/// Sends the greeting and the request then awaits the service's single
/// reply, bounded by the crate wide timeout. The reply is returned as is:
/// the caller must handle an [`Event::Unrecognized`] or a [`CookieReport`]
/// with a non zero error code itself.
///
/// On success the framed transport is returned alongside the event so that
/// the caller can continue with the relayed RTSP stream.
pub async fn open_session<T>(
    transport: T,
    request: &OpenSession,
) -> Result<(Event, Framed<T, ProxyCodex>)>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    let mut transport = transport;
    transport.write_all(GREETING).await?;

    let mut framed = Framed::new(transport, ProxyCodex::new());
    debug!(
        "Sending open session for camera {} with cookie {}",
        request.camera_serial, request.cookie
    );
    framed.send(request).await?;

    debug!("Awaiting cookie report");
    let event = match crate::timeout(framed.next()).await {
        Err(_) => return Err(Error::Timeout),
        Ok(None) => return Err(Error::DroppedConnection),
        Ok(Some(event)) => event?,
    };

    if let Event::CookieReport(ref report) = event {
        if report.for_cookie != request.cookie {
            warn!(
                "Cookie report responds to cookie {} not this request's {}",
                report.for_cookie, request.cookie
            );
        }
    }

    Ok((event, framed))
}
