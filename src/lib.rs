#![doc(html_root_url = "https://docs.rs/vn100/0.1.0")]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! VectorNav VN-100 IMU/AHRS driver.
//!
//! The driver talks to the sensor through a [`RegisterTransport`], which owns
//! the physical exchange (SPI or serial framing, checksums, timing). On top of
//! it, each operation reads, patches and writes back one fixed-layout register.
//!
//! The driver keeps a copy of the last payload read from each register. A copy
//! reflects the device only after a successful read; a failed read leaves the
//! previous copy in place.
//!
//! Configuration calls must be serialized by the caller: the five filter
//! channels share one register, so interleaved read-modify-write sequences
//! overwrite each other's fields.
use log::{debug, trace, warn};
pub use mint;
use num_traits::FromPrimitive;

mod filter;
mod regs;
#[cfg(feature = "std")]
mod std_error;
mod sync;
mod transport;

#[cfg(test)]
mod mock;

pub use filter::{FilterChannel, FilterMode};
pub use regs::{
    Attitude, ImuFilteringConfig, ImuMeasurements, ReferenceFrameRotation, Register,
    SerialNumber, SyncControl, VelocityCompensation, WritableRegister,
};
pub use sync::{DrdyInterrupt, DrdyMode, SYNC_OUT_PULSE_WIDTH};
pub use transport::{response_status, RegisterTransport, SensorError};

use sync::{SYNC_OUT_DISABLED, SYNC_OUT_POSITIVE_PULSE};

/// 1 Gauss = 100 uT
pub const GAUSS_TO_MICROTESLA: f32 = 100.0;
/// 1 kPa = 1000 Pa
pub const KPA_TO_PA: f32 = 1000.0;

const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;

/// All possible errors in this crate
#[derive(Debug)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Error<E> {
    /// Bus error
    Bus(E),

    /// The sensor answered with an error code
    Sensor(SensorError),

    /// The sensor answered with an error code this crate does not know
    UnknownResponse(u8),

    /// A required argument was not supplied
    NullPointer,

    /// A filter mode outside of [`FilterMode`] was read from the device
    InvalidFilterMode(u8),
}

impl<E> Error<E> {
    /// Bus-independent code of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Bus(_) => ErrorCode::Bus,
            Error::Sensor(err) => ErrorCode::Sensor(*err),
            Error::UnknownResponse(code) => ErrorCode::UnknownResponse(*code),
            Error::NullPointer => ErrorCode::NullPointer,
            Error::InvalidFilterMode(mode) => ErrorCode::InvalidFilterMode(*mode),
        }
    }
}

/// Outcome of the last driver operation, see [`Vn100::error_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum ErrorCode {
    /// The operation succeeded
    #[default]
    Success,
    /// See [`Error::NullPointer`]
    NullPointer,
    /// The transport reported a bus error
    Bus,
    /// See [`Error::Sensor`]
    Sensor(SensorError),
    /// See [`Error::UnknownResponse`]
    UnknownResponse(u8),
    /// See [`Error::InvalidFilterMode`]
    InvalidFilterMode(u8),
}

pub struct Vn100<T> {
    transport: T,
    error_code: ErrorCode,
    serial_num: SerialNumber,
    sync_cntrl: SyncControl,
    filter: ImuFilteringConfig,
    rotation: ReferenceFrameRotation,
    vel_comp: VelocityCompensation,
    attitude: Attitude,
    imu: ImuMeasurements,
}

impl<T, E> Vn100<T>
where
    T: RegisterTransport<Error = E>,
{
    /// Side-effect-free constructor.
    /// Nothing will be read or written before `begin()` call.
    pub fn new(transport: T) -> Self {
        Vn100 {
            transport,
            error_code: ErrorCode::Success,
            serial_num: SerialNumber::default(),
            sync_cntrl: SyncControl::default(),
            filter: ImuFilteringConfig::default(),
            rotation: ReferenceFrameRotation::default(),
            vel_comp: VelocityCompensation::default(),
            attitude: Attitude::default(),
            imu: ImuMeasurements::default(),
        }
    }

    /// Destroy driver instance, return the transport.
    pub fn destroy(self) -> T {
        self.transport
    }

    /// Outcome of the most recent operation.
    pub fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    /// Brings up the transport and reads the serial number.
    ///
    /// The outcome of the transport's `init` is not checked; a dead link shows
    /// up as a failed serial number read.
    ///
    /// # Usage Example
    ///
    /// ```rust
    /// use vn100::{Error, RegisterTransport, Vn100};
    /// #
    /// # struct Spi {}
    /// # impl RegisterTransport for Spi {
    /// #     type Error = ();
    /// #     fn init(&mut self) -> Result<(), ()> { Ok(()) }
    /// #     fn read_register(&mut self, _id: u8, buf: &mut [u8]) -> Result<(), Error<()>> {
    /// #         buf.fill(0);
    /// #         Ok(())
    /// #     }
    /// #     fn write_register(&mut self, _id: u8, _data: &[u8]) -> Result<(), Error<()>> { Ok(()) }
    /// #     fn write_settings(&mut self) -> Result<(), Error<()>> { Ok(()) }
    /// #     fn reset(&mut self) -> Result<(), Error<()>> { Ok(()) }
    /// # }
    /// let spi = Spi { /* ... */ };
    /// let mut imu = Vn100::new(spi);
    /// imu.begin()?;
    /// println!("VN-100 serial number: {}", imu.serial_number());
    /// # Result::<(), Error<()>>::Ok(())
    /// ```
    pub fn begin(&mut self) -> Result<(), Error<E>> {
        if self.transport.init().is_err() {
            warn!("transport init reported an error");
        }

        self.serial_num = self.read_reg()?;
        debug!("VN-100 serial number {}", self.serial_num.serial);

        Ok(())
    }

    /// Enables the data-ready (sync out) signal as a positive pulse of
    /// [`SYNC_OUT_PULSE_WIDTH`], fired on `mode` events.
    /// `srd` is the number of events skipped between pulses.
    pub fn enable_drdy_int(&mut self, mode: DrdyMode, srd: u16) -> Result<(), Error<E>> {
        self.sync_cntrl = self.read_reg()?;

        self.sync_cntrl.sync_out_mode = mode as u8;
        self.sync_cntrl.sync_out_polarity = SYNC_OUT_POSITIVE_PULSE;
        self.sync_cntrl.sync_out_pulse_width = SYNC_OUT_PULSE_WIDTH;
        self.sync_cntrl.sync_out_skip_factor = srd;

        self.write_reg(self.sync_cntrl)?;
        debug!("data ready enabled, mode {:?}, skip factor {}", mode, srd);

        Ok(())
    }

    /// Turns the data-ready signal off.
    pub fn disable_drdy_int(&mut self) -> Result<(), Error<E>> {
        self.sync_cntrl = self.read_reg()?;
        self.sync_cntrl.sync_out_mode = SYNC_OUT_DISABLED;
        self.write_reg(self.sync_cntrl)
    }

    /// Configures `pin` as an input and attaches `handler` to its rising edge.
    ///
    /// Returns [`Error::NullPointer`] without touching `irq` when no handler is given.
    /// `handler` runs in the platform's interrupt context, see [`DrdyInterrupt`].
    pub fn drdy_callback<I: DrdyInterrupt>(
        &mut self,
        irq: &mut I,
        pin: u8,
        handler: Option<fn()>,
    ) -> Result<(), Error<E>> {
        let Some(handler) = handler else {
            return self.fail(Error::NullPointer);
        };

        irq.configure_input(pin);
        irq.attach_rising_edge(pin, handler);
        self.error_code = ErrorCode::Success;

        Ok(())
    }

    /// Writes the reference frame rotation `c`, then persists the settings and
    /// resets the sensor so the rotation takes effect.
    ///
    /// Persist and reset are issued even when the register write fails, and their
    /// outcome is not reported. The result is the outcome of the register write.
    pub fn apply_rotation(&mut self, c: mint::RowMatrix3<f32>) -> Result<(), Error<E>> {
        self.rotation.c = [
            [c.x.x, c.x.y, c.x.z],
            [c.y.x, c.y.y, c.y.z],
            [c.z.x, c.z.y, c.z.z],
        ];

        let res = self.write_reg(self.rotation);

        if let Err(e) = self.transport.write_settings() {
            warn!("persisting settings failed: {:?}", e.code());
        }
        if let Err(e) = self.transport.reset() {
            warn!("reset failed: {:?}", e.code());
        }

        res
    }

    /// Reads the reference frame rotation from the device.
    pub fn rotation(&mut self) -> Result<mint::RowMatrix3<f32>, Error<E>> {
        self.rotation = self.read_reg()?;

        let c = self.rotation.c;
        Ok(mint::RowMatrix3 {
            x: mint::Vector3::from(c[0]),
            y: mint::Vector3::from(c[1]),
            z: mint::Vector3::from(c[2]),
        })
    }

    /// Sets the mode and window size of one filter channel.
    ///
    /// The other four channels are written back as last read from the device.
    pub fn set_filter(
        &mut self,
        channel: FilterChannel,
        mode: FilterMode,
        window: u16,
    ) -> Result<(), Error<E>> {
        self.filter = self.read_reg()?;
        self.filter.set_channel(channel, mode, window);
        self.write_reg(self.filter)?;
        debug!("{:?} filter set to {:?}, window {}", channel, mode, window);

        Ok(())
    }

    /// Reads the mode and window size of one filter channel from the device.
    pub fn filter(&mut self, channel: FilterChannel) -> Result<(FilterMode, u16), Error<E>> {
        self.filter = self.read_reg()?;

        let (mode, window) = self.filter.channel(channel);
        match FilterMode::from_u8(mode) {
            Some(mode) => Ok((mode, window)),
            None => self.fail(Error::InvalidFilterMode(mode)),
        }
    }

    /// Sets the magnetometer filter, see [`Vn100::set_filter`].
    pub fn set_mag_filter(&mut self, mode: FilterMode, window: u16) -> Result<(), Error<E>> {
        self.set_filter(FilterChannel::Mag, mode, window)
    }

    /// Reads the magnetometer filter, see [`Vn100::filter`].
    pub fn mag_filter(&mut self) -> Result<(FilterMode, u16), Error<E>> {
        self.filter(FilterChannel::Mag)
    }

    /// Sets the accelerometer filter, see [`Vn100::set_filter`].
    pub fn set_accel_filter(&mut self, mode: FilterMode, window: u16) -> Result<(), Error<E>> {
        self.set_filter(FilterChannel::Accel, mode, window)
    }

    /// Reads the accelerometer filter, see [`Vn100::filter`].
    pub fn accel_filter(&mut self) -> Result<(FilterMode, u16), Error<E>> {
        self.filter(FilterChannel::Accel)
    }

    /// Sets the gyro filter, see [`Vn100::set_filter`].
    pub fn set_gyro_filter(&mut self, mode: FilterMode, window: u16) -> Result<(), Error<E>> {
        self.set_filter(FilterChannel::Gyro, mode, window)
    }

    /// Reads the gyro filter, see [`Vn100::filter`].
    pub fn gyro_filter(&mut self) -> Result<(FilterMode, u16), Error<E>> {
        self.filter(FilterChannel::Gyro)
    }

    /// Sets the temperature filter, see [`Vn100::set_filter`].
    pub fn set_temperature_filter(
        &mut self,
        mode: FilterMode,
        window: u16,
    ) -> Result<(), Error<E>> {
        self.set_filter(FilterChannel::Temperature, mode, window)
    }

    /// Reads the temperature filter, see [`Vn100::filter`].
    pub fn temperature_filter(&mut self) -> Result<(FilterMode, u16), Error<E>> {
        self.filter(FilterChannel::Temperature)
    }

    /// Sets the pressure filter, see [`Vn100::set_filter`].
    pub fn set_pressure_filter(&mut self, mode: FilterMode, window: u16) -> Result<(), Error<E>> {
        self.set_filter(FilterChannel::Pressure, mode, window)
    }

    /// Reads the pressure filter, see [`Vn100::filter`].
    pub fn pressure_filter(&mut self) -> Result<(FilterMode, u16), Error<E>> {
        self.filter(FilterChannel::Pressure)
    }

    /// Feeds the forward speed (m/s, body X axis) to the attitude filter.
    /// Y and Z are sent as zero.
    pub fn velocity_compensation(&mut self, speed_mps: f32) -> Result<(), Error<E>> {
        self.vel_comp = VelocityCompensation {
            velocity_x: speed_mps,
            velocity_y: 0.0,
            velocity_z: 0.0,
        };

        self.write_reg(self.vel_comp)
    }

    /// Reads the attitude solution, then the uncompensated IMU measurements.
    /// Stops at the first failed read.
    pub fn read(&mut self) -> Result<(), Error<E>> {
        self.attitude = self.read_reg()?;
        self.imu = self.read_reg()?;

        Ok(())
    }

    /// Serial number read by `begin()`.
    pub fn serial_number(&self) -> u32 {
        self.serial_num.serial
    }

    /// Compensated acceleration in m/s^2, from the last `read()`.
    pub fn accel_mps2(&self) -> mint::Vector3<f32> {
        mint::Vector3::from([
            self.attitude.accel_x,
            self.attitude.accel_y,
            self.attitude.accel_z,
        ])
    }

    /// Compensated angular rate in rad/s, from the last `read()`.
    pub fn gyro_radps(&self) -> mint::Vector3<f32> {
        mint::Vector3::from([
            self.attitude.gyro_x,
            self.attitude.gyro_y,
            self.attitude.gyro_z,
        ])
    }

    /// Compensated magnetic field in uT, from the last `read()`.
    pub fn mag_ut(&self) -> mint::Vector3<f32> {
        mint::Vector3::from([
            self.attitude.mag_x * GAUSS_TO_MICROTESLA,
            self.attitude.mag_y * GAUSS_TO_MICROTESLA,
            self.attitude.mag_z * GAUSS_TO_MICROTESLA,
        ])
    }

    /// Uncompensated acceleration in m/s^2, from the last `read()`.
    pub fn uncomp_accel_mps2(&self) -> mint::Vector3<f32> {
        mint::Vector3::from([self.imu.accel_x, self.imu.accel_y, self.imu.accel_z])
    }

    /// Uncompensated angular rate in rad/s, from the last `read()`.
    pub fn uncomp_gyro_radps(&self) -> mint::Vector3<f32> {
        mint::Vector3::from([self.imu.gyro_x, self.imu.gyro_y, self.imu.gyro_z])
    }

    /// Uncompensated magnetic field in uT, from the last `read()`.
    pub fn uncomp_mag_ut(&self) -> mint::Vector3<f32> {
        mint::Vector3::from([
            self.imu.mag_x * GAUSS_TO_MICROTESLA,
            self.imu.mag_y * GAUSS_TO_MICROTESLA,
            self.imu.mag_z * GAUSS_TO_MICROTESLA,
        ])
    }

    /// Yaw in radians, from the last `read()`.
    pub fn yaw_rad(&self) -> f32 {
        self.attitude.yaw * DEG_TO_RAD
    }

    /// Pitch in radians, from the last `read()`.
    pub fn pitch_rad(&self) -> f32 {
        self.attitude.pitch * DEG_TO_RAD
    }

    /// Roll in radians, from the last `read()`.
    pub fn roll_rad(&self) -> f32 {
        self.attitude.roll * DEG_TO_RAD
    }

    /// Die temperature in degrees Celsius.
    pub fn die_temp_c(&self) -> f32 {
        self.imu.temp
    }

    /// Barometric pressure in Pa.
    pub fn pressure_pa(&self) -> f32 {
        self.imu.pressure * KPA_TO_PA
    }

    /// Last synchronization control payload read or written.
    pub fn sync_control(&self) -> &SyncControl {
        &self.sync_cntrl
    }

    /// Last filtering configuration payload read or written.
    pub fn filter_config(&self) -> &ImuFilteringConfig {
        &self.filter
    }

    /// Last reference frame rotation payload read or written.
    pub fn rotation_config(&self) -> &ReferenceFrameRotation {
        &self.rotation
    }

    /// Last velocity compensation payload written.
    pub fn velocity_config(&self) -> &VelocityCompensation {
        &self.vel_comp
    }

    /// Records `err` as the last outcome and returns it.
    fn fail<R>(&mut self, err: Error<E>) -> Result<R, Error<E>> {
        self.error_code = err.code();
        Err(err)
    }

    /// Reads a register. The payload is decoded only when the transport succeeds.
    fn read_reg<R: Register>(&mut self) -> Result<R, Error<E>> {
        let mut buf = [0u8; regs::MAX_PAYLOAD_SIZE];
        let buf = &mut buf[..R::SIZE];

        match self.transport.read_register(R::ID, buf) {
            Ok(()) => {
                trace!("read register {}: {:?}", R::ID, buf);
                self.error_code = ErrorCode::Success;
                Ok(R::decode(buf))
            }
            Err(e) => {
                warn!("reading register {} failed: {:?}", R::ID, e.code());
                self.fail(e)
            }
        }
    }

    fn write_reg<R: WritableRegister>(&mut self, reg: R) -> Result<(), Error<E>> {
        let mut buf = [0u8; regs::MAX_PAYLOAD_SIZE];
        let buf = &mut buf[..R::SIZE];
        reg.encode(buf);

        trace!("write register {}: {:?}", R::ID, buf);
        match self.transport.write_register(R::ID, buf) {
            Ok(()) => {
                self.error_code = ErrorCode::Success;
                Ok(())
            }
            Err(e) => {
                warn!("writing register {} failed: {:?}", R::ID, e.code());
                self.fail(e)
            }
        }
    }
}
