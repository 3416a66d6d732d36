use libfuzzer_sys::arbitrary::Unstructured;
use vn100::{response_status, Error, RegisterTransport};

/// Transport whose responses are taken from the fuzzer input:
/// one response code byte per exchange, then payload bytes for reads.
pub struct FuzzTransport<'a> {
    u: Unstructured<'a>,
}

impl<'a> FuzzTransport<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        FuzzTransport {
            u: Unstructured::new(data),
        }
    }

    fn status(&mut self) -> Result<(), Error<()>> {
        let code: u8 = self.u.arbitrary().map_err(|_| Error::Bus(()))?;
        response_status(code)
    }
}

impl<'a> RegisterTransport for FuzzTransport<'a> {
    type Error = ();

    fn init(&mut self) -> Result<(), ()> {
        Ok(())
    }

    fn read_register(&mut self, _id: u8, buf: &mut [u8]) -> Result<(), Error<()>> {
        self.status()?;
        self.u.fill_buffer(buf).map_err(|_| Error::Bus(()))
    }

    fn write_register(&mut self, _id: u8, _data: &[u8]) -> Result<(), Error<()>> {
        self.status()
    }

    fn write_settings(&mut self) -> Result<(), Error<()>> {
        self.status()
    }

    fn reset(&mut self) -> Result<(), Error<()>> {
        self.status()
    }
}
