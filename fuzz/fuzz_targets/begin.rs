#![no_main]
use libfuzzer_sys::fuzz_target;

#[path = "../common/transport.rs"]
mod transport;

use transport::FuzzTransport;

fuzz_target!(|data: &[u8]| {
    let mut imu = vn100::Vn100::new(FuzzTransport::new(data));

    // Discard the result as we only care whether it crashes, not if there
    // is an error.
    let _ = imu.begin();
    let _ = imu.serial_number();
});
