//! Register identifiers and payload layouts.
//!
//! Every payload is packed little-endian, floats are IEEE-754 `f32`.
use byteorder::{ByteOrder, LittleEndian};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub(crate) const VN100_SERIAL_NUMBER: u8 = 3;
pub(crate) const VN100_REFERENCE_FRAME_ROTATION: u8 = 26;
pub(crate) const VN100_YPR_MAG_ACCEL_GYRO: u8 = 27;
pub(crate) const VN100_SYNC_CONTROL: u8 = 32;
pub(crate) const VN100_VELOCITY_COMPENSATION: u8 = 50;
pub(crate) const VN100_IMU_MEASUREMENTS: u8 = 54;
pub(crate) const VN100_IMU_FILTERING_CONFIG: u8 = 85;

/// Largest payload of any register this crate exchanges.
pub(crate) const MAX_PAYLOAD_SIZE: usize = 48;

/// A fixed-layout register that can be read from the device.
pub trait Register: Sized {
    /// Register ID as addressed by read/write commands.
    const ID: u8;

    /// Payload size in bytes.
    const SIZE: usize;

    /// Decodes the payload from `buf`, which holds exactly `SIZE` bytes.
    fn decode(buf: &[u8]) -> Self;
}

/// A register that also accepts writes.
pub trait WritableRegister: Register {
    /// Encodes the payload into `buf`, which holds exactly `SIZE` bytes.
    fn encode(&self, buf: &mut [u8]);
}

/// Serial number register, read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct SerialNumber {
    pub serial: u32,
}

impl Register for SerialNumber {
    const ID: u8 = VN100_SERIAL_NUMBER;
    const SIZE: usize = 4;

    fn decode(buf: &[u8]) -> Self {
        SerialNumber {
            serial: LittleEndian::read_u32(&buf[0..4]),
        }
    }
}

/// Reference frame rotation, a row-major direction cosine matrix.
/// The device applies it only after the settings are persisted and it is reset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct ReferenceFrameRotation {
    pub c: [[f32; 3]; 3],
}

impl Register for ReferenceFrameRotation {
    const ID: u8 = VN100_REFERENCE_FRAME_ROTATION;
    const SIZE: usize = 36;

    fn decode(buf: &[u8]) -> Self {
        let mut c = [[0f32; 3]; 3];
        for (row, chunk) in c.iter_mut().zip(buf[..Self::SIZE].chunks_exact(12)) {
            LittleEndian::read_f32_into(chunk, row);
        }

        ReferenceFrameRotation { c }
    }
}

impl WritableRegister for ReferenceFrameRotation {
    fn encode(&self, buf: &mut [u8]) {
        for (row, chunk) in self.c.iter().zip(buf[..Self::SIZE].chunks_exact_mut(12)) {
            LittleEndian::write_f32_into(row, chunk);
        }
    }
}

/// Yaw, pitch, roll, magnetic, acceleration and angular rates.
/// Compensated outputs of the attitude filter, read-only.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Attitude {
    /// Degrees
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,

    /// Gauss
    pub mag_x: f32,
    pub mag_y: f32,
    pub mag_z: f32,

    /// m/s^2
    pub accel_x: f32,
    pub accel_y: f32,
    pub accel_z: f32,

    /// rad/s
    pub gyro_x: f32,
    pub gyro_y: f32,
    pub gyro_z: f32,
}

impl Register for Attitude {
    const ID: u8 = VN100_YPR_MAG_ACCEL_GYRO;
    const SIZE: usize = 48;

    fn decode(buf: &[u8]) -> Self {
        let mut f = [0f32; 12];
        LittleEndian::read_f32_into(&buf[..Self::SIZE], &mut f);

        Attitude {
            yaw: f[0],
            pitch: f[1],
            roll: f[2],
            mag_x: f[3],
            mag_y: f[4],
            mag_z: f[5],
            accel_x: f[6],
            accel_y: f[7],
            accel_z: f[8],
            gyro_x: f[9],
            gyro_y: f[10],
            gyro_z: f[11],
        }
    }
}

/// Synchronization control. Only the sync output half is driven by this crate;
/// the sync input fields and the reserved words are carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct SyncControl {
    pub sync_in_mode: u8,
    pub sync_in_edge: u8,
    pub sync_in_skip_factor: u16,
    pub reserved_1: u32,
    pub sync_out_mode: u8,
    pub sync_out_polarity: u8,
    pub sync_out_skip_factor: u16,
    pub sync_out_pulse_width: u32,
    pub reserved_2: u32,
}

impl Register for SyncControl {
    const ID: u8 = VN100_SYNC_CONTROL;
    const SIZE: usize = 20;

    fn decode(buf: &[u8]) -> Self {
        SyncControl {
            sync_in_mode: buf[0],
            sync_in_edge: buf[1],
            sync_in_skip_factor: LittleEndian::read_u16(&buf[2..4]),
            reserved_1: LittleEndian::read_u32(&buf[4..8]),
            sync_out_mode: buf[8],
            sync_out_polarity: buf[9],
            sync_out_skip_factor: LittleEndian::read_u16(&buf[10..12]),
            sync_out_pulse_width: LittleEndian::read_u32(&buf[12..16]),
            reserved_2: LittleEndian::read_u32(&buf[16..20]),
        }
    }
}

impl WritableRegister for SyncControl {
    fn encode(&self, buf: &mut [u8]) {
        buf[0] = self.sync_in_mode;
        buf[1] = self.sync_in_edge;
        LittleEndian::write_u16(&mut buf[2..4], self.sync_in_skip_factor);
        LittleEndian::write_u32(&mut buf[4..8], self.reserved_1);
        buf[8] = self.sync_out_mode;
        buf[9] = self.sync_out_polarity;
        LittleEndian::write_u16(&mut buf[10..12], self.sync_out_skip_factor);
        LittleEndian::write_u32(&mut buf[12..16], self.sync_out_pulse_width);
        LittleEndian::write_u32(&mut buf[16..20], self.reserved_2);
    }
}

/// Velocity compensation measurement, m/s in the body frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct VelocityCompensation {
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub velocity_z: f32,
}

impl Register for VelocityCompensation {
    const ID: u8 = VN100_VELOCITY_COMPENSATION;
    const SIZE: usize = 12;

    fn decode(buf: &[u8]) -> Self {
        VelocityCompensation {
            velocity_x: LittleEndian::read_f32(&buf[0..4]),
            velocity_y: LittleEndian::read_f32(&buf[4..8]),
            velocity_z: LittleEndian::read_f32(&buf[8..12]),
        }
    }
}

impl WritableRegister for VelocityCompensation {
    fn encode(&self, buf: &mut [u8]) {
        LittleEndian::write_f32(&mut buf[0..4], self.velocity_x);
        LittleEndian::write_f32(&mut buf[4..8], self.velocity_y);
        LittleEndian::write_f32(&mut buf[8..12], self.velocity_z);
    }
}

/// Uncompensated IMU measurements, read-only.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct ImuMeasurements {
    /// Gauss
    pub mag_x: f32,
    pub mag_y: f32,
    pub mag_z: f32,

    /// m/s^2
    pub accel_x: f32,
    pub accel_y: f32,
    pub accel_z: f32,

    /// rad/s
    pub gyro_x: f32,
    pub gyro_y: f32,
    pub gyro_z: f32,

    /// Degrees Celsius
    pub temp: f32,

    /// kPa
    pub pressure: f32,
}

impl Register for ImuMeasurements {
    const ID: u8 = VN100_IMU_MEASUREMENTS;
    const SIZE: usize = 44;

    fn decode(buf: &[u8]) -> Self {
        let mut f = [0f32; 11];
        LittleEndian::read_f32_into(&buf[..Self::SIZE], &mut f);

        ImuMeasurements {
            mag_x: f[0],
            mag_y: f[1],
            mag_z: f[2],
            accel_x: f[3],
            accel_y: f[4],
            accel_z: f[5],
            gyro_x: f[6],
            gyro_y: f[7],
            gyro_z: f[8],
            temp: f[9],
            pressure: f[10],
        }
    }
}

/// IMU filtering configuration. One register holds the settings of all five
/// filter channels, see [`FilterChannel`](crate::FilterChannel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct ImuFilteringConfig {
    pub mag_window_size: u16,
    pub accel_window_size: u16,
    pub gyro_window_size: u16,
    pub temp_window_size: u16,
    pub pres_window_size: u16,
    pub mag_filter_mode: u8,
    pub accel_filter_mode: u8,
    pub gyro_filter_mode: u8,
    pub temp_filter_mode: u8,
    pub pres_filter_mode: u8,
}

impl Register for ImuFilteringConfig {
    const ID: u8 = VN100_IMU_FILTERING_CONFIG;
    const SIZE: usize = 15;

    fn decode(buf: &[u8]) -> Self {
        ImuFilteringConfig {
            mag_window_size: LittleEndian::read_u16(&buf[0..2]),
            accel_window_size: LittleEndian::read_u16(&buf[2..4]),
            gyro_window_size: LittleEndian::read_u16(&buf[4..6]),
            temp_window_size: LittleEndian::read_u16(&buf[6..8]),
            pres_window_size: LittleEndian::read_u16(&buf[8..10]),
            mag_filter_mode: buf[10],
            accel_filter_mode: buf[11],
            gyro_filter_mode: buf[12],
            temp_filter_mode: buf[13],
            pres_filter_mode: buf[14],
        }
    }
}

impl WritableRegister for ImuFilteringConfig {
    fn encode(&self, buf: &mut [u8]) {
        LittleEndian::write_u16(&mut buf[0..2], self.mag_window_size);
        LittleEndian::write_u16(&mut buf[2..4], self.accel_window_size);
        LittleEndian::write_u16(&mut buf[4..6], self.gyro_window_size);
        LittleEndian::write_u16(&mut buf[6..8], self.temp_window_size);
        LittleEndian::write_u16(&mut buf[8..10], self.pres_window_size);
        buf[10] = self.mag_filter_mode;
        buf[11] = self.accel_filter_mode;
        buf[12] = self.gyro_filter_mode;
        buf[13] = self.temp_filter_mode;
        buf[14] = self.pres_filter_mode;
    }
}
