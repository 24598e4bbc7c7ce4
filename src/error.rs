use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Floor outside `[1, n_floors]` while bounds are enforced.
    InvalidFloor { floor: i32, n_floors: i32 },
    NoCars,
    InvalidConfig(String),
    Config(String),
    Spawn(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidFloor { floor, n_floors } => {
                write!(f, "floor {} is outside the building (1..={})", floor, n_floors)
            }
            Error::NoCars => write!(f, "no car available to take the call"),
            Error::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
            Error::Config(reason) => write!(f, "failed to load configuration: {}", reason),
            Error::Spawn(e) => write!(f, "failed to start car thread: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Spawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
