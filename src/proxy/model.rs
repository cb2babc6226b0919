//! The proxy event model
//!

/// Top level proxy event
#[derive(Debug, PartialEq, Eq)]
pub enum Event {
    /// The service's reply to an [`OpenSession`] request
    CookieReport(CookieReport),
    /// An event with a wire id this crate has no decoding for
    ///
    /// This is a distinct outcome rather than an error. The payload cannot
    /// be interpreted because its length is not self describing
    Unrecognized {
        /// The raw 4 byte id as it appeared on the wire
        wire_id: u32,
    },
}

/// Logical id of the open session request
///
/// Logical ids are stored on the wire adjusted down by one
pub const EVENT_OPEN_SESSION: u32 = 8;

/// The request that opens an RTSP relay session for one camera
#[derive(Debug, PartialEq, Eq)]
pub struct OpenSession {
    // 4 Bytes wire id (EVENT_OPEN_SESSION - 1)
    /// A caller chosen correlation id
    ///
    /// The service echoes this back in the for_cookie field of the
    /// [`CookieReport`] it replies with so it should be unique per request
    pub cookie: u32,
    /// The serial number of the camera to relay, as reported by the
    /// account API
    pub camera_serial: String,
    /// The bearer token from the account API, embedded verbatim
    pub auth_token: String,
}

/// Logical id of the cookie report reply
pub const EVENT_COOKIE_REPORT: u32 = 9;

/// The reply to an [`OpenSession`] request
#[derive(Debug, PartialEq, Eq)]
pub struct CookieReport {
    /// The correlation id of this message
    pub cookie: u32,
    /// The cookie of the request this message responds to
    pub for_cookie: u32,
    /// The service's error code, zero when the relay was opened
    pub error_code: u32,
    // 4 Byte signed message length, <= 0 means no message bytes follow
    /// The service's error message, empty when the wire length is
    /// non positive
    pub error_message: String,
    /// The channel assigned to the relay
    pub channel_id: u32,
    /// The local port of the relay on the service side
    pub local_port: u32,
    // 4 Byte channel id count
    /// Further channel ids, observed empty on single camera accounts
    pub channel_ids: Vec<u32>,
}
