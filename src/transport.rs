use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::Error;

/// Error codes the VN-100 reports in its response header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[repr(u8)]
pub enum SensorError {
    HardFault = 1,
    SerialBufferOverflow = 2,
    InvalidChecksum = 3,
    InvalidCommand = 4,
    NotEnoughParameters = 5,
    TooManyParameters = 6,
    InvalidParameter = 7,
    InvalidRegister = 8,
    UnauthorizedAccess = 9,
    WatchdogReset = 10,
    OutputBufferOverflow = 11,
    InsufficientBaudRate = 12,
    ErrorBufferOverflow = 255,
}

/// Maps the error byte of a response header onto a result.
///
/// Meant for [`RegisterTransport`] implementations: `0` is success, a known code
/// becomes [`Error::Sensor`] and anything else [`Error::UnknownResponse`].
pub fn response_status<E>(code: u8) -> Result<(), Error<E>> {
    if code == 0 {
        return Ok(());
    }

    match SensorError::from_u8(code) {
        Some(err) => Err(Error::Sensor(err)),
        None => Err(Error::UnknownResponse(code)),
    }
}

/// Register-level link to the sensor.
///
/// Implementations own the physical exchange: command framing, checksums,
/// inter-command timing and timeouts. Every call blocks until the exchange
/// completes.
pub trait RegisterTransport {
    /// Bus error
    type Error;

    /// Brings up the physical link.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Reads register `id` into `buf`, which is sized to the register's payload.
    /// `buf` contents are unspecified on failure.
    fn read_register(&mut self, id: u8, buf: &mut [u8]) -> Result<(), Error<Self::Error>>;

    /// Writes `data` to register `id`.
    fn write_register(&mut self, id: u8, data: &[u8]) -> Result<(), Error<Self::Error>>;

    /// Persists the current configuration to non-volatile memory.
    fn write_settings(&mut self) -> Result<(), Error<Self::Error>>;

    /// Reboots the sensor.
    fn reset(&mut self) -> Result<(), Error<Self::Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_status() {
        assert!(response_status::<()>(0).is_ok());
        assert!(matches!(
            response_status::<()>(8),
            Err(Error::Sensor(SensorError::InvalidRegister))
        ));
        assert!(matches!(
            response_status::<()>(255),
            Err(Error::Sensor(SensorError::ErrorBufferOverflow))
        ));
        assert!(matches!(
            response_status::<()>(42),
            Err(Error::UnknownResponse(42))
        ));
    }
}
