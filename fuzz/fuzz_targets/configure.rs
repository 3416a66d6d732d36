#![no_main]
// Drives every driver operation against arbitrary sensor responses.
use libfuzzer_sys::fuzz_target;

#[path = "../common/transport.rs"]
mod transport;

use transport::FuzzTransport;
use vn100::{mint, DrdyMode, FilterChannel, FilterMode, Vn100};

fuzz_target!(|data: &[u8]| {
    let mut imu = Vn100::new(FuzzTransport::new(data));

    let _ = imu.begin();
    let _ = imu.enable_drdy_int(DrdyMode::ImuReady, 10);

    for channel in FilterChannel::ALL {
        let _ = imu.set_filter(channel, FilterMode::Both, 16);
        let _ = imu.filter(channel);
    }

    let identity = mint::RowMatrix3 {
        x: mint::Vector3::from([1.0, 0.0, 0.0]),
        y: mint::Vector3::from([0.0, 1.0, 0.0]),
        z: mint::Vector3::from([0.0, 0.0, 1.0]),
    };
    let _ = imu.apply_rotation(identity);
    let _ = imu.rotation();

    let _ = imu.velocity_compensation(3.5);

    if imu.read().is_ok() {
        let _ = imu.mag_ut();
        let _ = imu.uncomp_mag_ut();
        let _ = imu.pressure_pa();
        let _ = imu.yaw_rad();
    }

    let _ = imu.disable_drdy_int();
    let _ = imu.error_code();
});
