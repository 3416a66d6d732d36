use crate::Error;
use std::{error, fmt};

impl<E: core::fmt::Debug> error::Error for Error<E> {}

impl<E: core::fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "bus error: {:?}", e),
            Error::Sensor(e) => write!(f, "sensor reported {:?}", e),
            Error::UnknownResponse(code) => write!(f, "sensor reported unknown error {}", code),
            Error::NullPointer => write!(f, "required argument missing"),
            Error::InvalidFilterMode(mode) => write!(f, "invalid filter mode {}", mode),
        }
    }
}
