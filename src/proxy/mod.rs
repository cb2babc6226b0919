//! This module contains the control protocol of the video proxy tunnel.
//!
//! Messages are tagged binary events. Every multi byte integer is big
//! endian and every string is a 4 byte length prefix followed by that many
//! UTF-8 bytes with no terminator.
//!
//! An event starts with a 4 byte wire id which is the logical event id
//! adjusted down by one. Two events are known to this crate:
//!
//! - **OpenSession** (logical id 8): sent by the client to request an RTSP
//!   relay for one camera
//!
//! - **CookieReport** (logical id 9): sent by the service in reply, carrying
//!   the correlation cookies, an error code and message, and the channel
//!   assignment for the relay
//!
//! Any other wire id decodes to an explicit unrecognised outcome.

/// Contains code related to the deserialisation of proxy events
pub mod de;
/// Contains the model describing the top level structures
pub mod model;
/// Contains code related to the serialisation of proxy events
pub mod ser;

/// Contains the codec for use with framed transports
pub mod codex;
