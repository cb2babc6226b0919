//! Handles sending and recieving messages as complete packets
//!
//! ProxyCodex is used with a `[tokio_util::codec::Framed]` to form complete packets
//!
use crate::proxy::{de, model::*};
use crate::{Error, Result};
use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// Encodes [`OpenSession`] requests and decodes [`Event`] replies on a
/// framed transport
///
/// The transport must deliver whole messages. An [`Event::Unrecognized`]
/// has no self describing payload length so the rest of the buffered
/// message is discarded with it
#[derive(Debug)]
pub struct ProxyCodex {}

impl ProxyCodex {
    /// Create a new codex
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for ProxyCodex {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder<&OpenSession> for ProxyCodex {
    type Error = Error;

    fn encode(&mut self, item: &OpenSession, dst: &mut BytesMut) -> Result<()> {
        let buf: Vec<u8> = Default::default();
        let buf = item.serialize(buf)?;
        dst.reserve(buf.len());
        dst.extend_from_slice(buf.as_slice());
        Ok(())
    }
}

impl Decoder for ProxyCodex {
    type Item = Event;
    type Error = Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        let (consumed, event) = match de::event(&src[..]) {
            Ok((remaining, event)) => (src.len() - remaining.len(), event),
            Err(nom::Err::Incomplete(_)) => return Ok(None),
            Err(e) => return Err(de::Error::from(e).into()),
        };
        match event {
            // The rest of the message belongs to the unknown payload
            Event::Unrecognized { .. } => src.clear(),
            _ => src.advance(consumed),
        }
        Ok(Some(event))
    }
}
