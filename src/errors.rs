use err_derive::Error;

/// This is the primary error type of the library
#[derive(Debug, Error)]
pub enum Error {
    /// Error raised during deserialisation
    #[error(display = "Deserialization error")]
    Deserialization(#[error(source)] crate::proxy::de::Error),

    /// Error raised during serialisation
    #[error(display = "Serialization error")]
    Serialization(#[error(source)] crate::proxy::ser::Error),

    /// An IO error such as the transport being dropped mid write
    #[error(display = "I/O error")]
    Io(#[error(source)] std::sync::Arc<std::io::Error>),

    /// Raised when the proxy service does not reply within the timeout
    #[error(display = "Timeout")]
    Timeout,

    /// Raised when the transport closes before the reply arrives
    #[error(display = "Dropped connection")]
    DroppedConnection,
}

impl From<std::io::Error> for Error {
    fn from(k: std::io::Error) -> Self {
        Error::Io(std::sync::Arc::new(k))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
