use super::model::*;
use cookie_factory::bytes::be_u32;
use cookie_factory::combinator::string;
use cookie_factory::sequence::tuple;
use cookie_factory::{gen, GenError, SerializeFn};
use err_derive::Error;
use std::io::Write;

/// The error types used during serialisation
#[derive(Debug, Error)]
pub enum Error {
    /// A Cookie Factory GenError
    #[error(display = "Cookie GenError")]
    GenError(#[error(source)] GenError),

    /// The logical event id cannot be represented on the wire
    #[error(display = "Invalid logical event id: {}", logical_id)]
    InvalidEventId {
        /// The offending id, logical ids start at one
        logical_id: u32,
    },
}

impl OpenSession {
    /// Serialize the open session header to its wire bytes
    pub fn serialize<W: Write>(&self, buf: W) -> Result<W, Error> {
        let id = event_id(EVENT_OPEN_SESSION)?;
        let (buf, _) = gen(
            tuple((
                id,
                be_u32(self.cookie),
                length_prefixed_string(&self.camera_serial),
                length_prefixed_string(&self.auth_token),
            )),
            buf,
        )?;

        Ok(buf)
    }
}

/// Serializer for a wire event id
///
/// Logical ids start at one and are stored on the wire adjusted down by one
pub fn event_id<W: Write>(logical_id: u32) -> Result<impl SerializeFn<W>, Error> {
    if logical_id < 1 {
        return Err(Error::InvalidEventId { logical_id });
    }
    Ok(be_u32(logical_id - 1))
}

/// Serializer for a length prefixed string
///
/// A 4 byte big endian byte length then the UTF-8 bytes, no terminator and
/// no padding
pub fn length_prefixed_string<'a, W: 'a + Write>(s: &'a str) -> impl SerializeFn<W> + 'a {
    tuple((be_u32(s.len() as u32), string(s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookie_factory::multi::all;
    use env_logger::Env;
    use nom::bytes::complete::take;
    use nom::multi::count;
    use nom::number::complete::be_u32 as parse_be_u32;

    type TestResult<'a, O> = nom::IResult<&'a [u8], O>;

    fn init() {
        let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
            .is_test(true)
            .try_init();
    }

    // Pins nom's error parameter so the parser can be called directly
    fn read_u32(buf: &[u8]) -> TestResult<u32> {
        parse_be_u32(buf)
    }

    fn read_string(buf: &[u8]) -> TestResult<String> {
        let (buf, len) = read_u32(buf)?;
        let (buf, raw) = take(len as usize)(buf)?;
        Ok((buf, String::from_utf8(raw.to_vec()).unwrap()))
    }

    #[test]
    // The open session header has a fixed documented byte layout
    fn test_open_session_literal() {
        init();

        let msg = OpenSession {
            cookie: 1,
            camera_serial: "ABC123".to_string(),
            auth_token: "tok".to_string(),
        };
        let buf = msg.serialize(vec![]).unwrap();

        assert_eq!(
            buf,
            vec![
                0x00, 0x00, 0x00, 0x07, // wire id, logical 8
                0x00, 0x00, 0x00, 0x01, // cookie
                0x00, 0x00, 0x00, 0x06, b'A', b'B', b'C', b'1', b'2', b'3',
                0x00, 0x00, 0x00, 0x03, b't', b'o', b'k',
            ]
        );
    }

    #[test]
    // Reading the header fields back recovers the cookie, serial and token
    // exactly, including non ASCII text and the empty string
    fn test_header_roundtrip() {
        init();

        let msg = OpenSession {
            cookie: 0xdeadbeef,
            camera_serial: "Türgerät-01".to_string(),
            auth_token: "".to_string(),
        };
        let buf = msg.serialize(vec![]).unwrap();

        let (rest, wire_id) = read_u32(buf.as_slice()).unwrap();
        let (rest, cookie) = read_u32(rest).unwrap();
        let (rest, serial) = read_string(rest).unwrap();
        let (rest, token) = read_string(rest).unwrap();

        assert_eq!(wire_id + 1, EVENT_OPEN_SESSION);
        assert_eq!(cookie, 0xdeadbeef);
        assert_eq!(serial, "Türgerät-01");
        assert_eq!(token, "");
        assert!(rest.is_empty());
    }

    #[test]
    // A count prefixed list of 4 byte integers round trips in order
    fn test_channel_list_roundtrip() {
        init();

        let ids = vec![1u32, 0, 42, u32::MAX];
        let (buf, _) = gen(
            tuple((
                be_u32(ids.len() as u32),
                all(ids.iter().copied().map(be_u32)),
            )),
            vec![],
        )
        .unwrap();

        let (rest, n) = read_u32(buf.as_slice()).unwrap();
        let (rest, decoded) = count(read_u32, n as usize)(rest).unwrap();

        assert_eq!(decoded, ids);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_empty_string() {
        init();

        let (buf, _) = gen(length_prefixed_string(""), vec![]).unwrap();
        assert_eq!(buf, vec![0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    // Logical ids below one would underflow the wire adjustment
    fn test_invalid_event_id() {
        init();

        match event_id::<Vec<u8>>(0) {
            Err(Error::InvalidEventId { logical_id: 0 }) => {}
            _ => panic!("expected InvalidEventId"),
        }
    }
}
