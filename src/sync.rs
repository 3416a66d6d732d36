#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Event that fires the data-ready (sync out) signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[repr(u8)]
pub enum DrdyMode {
    /// Pulse when IMU sampling starts.
    ImuStart = 1,
    /// Pulse when IMU measurements are available.
    ImuReady = 2,
    /// Pulse when the attitude solution is available.
    Ahrs = 3,
}

/// Sync out mode value that turns the signal off.
pub(crate) const SYNC_OUT_DISABLED: u8 = 0;

/// Sync out polarity value for a positive (active high) pulse.
pub(crate) const SYNC_OUT_POSITIVE_PULSE: u8 = 1;

/// Width of the sync out pulse, in nanoseconds.
pub const SYNC_OUT_PULSE_WIDTH: u32 = 500_000;

/// Platform hook for edge-triggered interrupts on the data-ready line.
///
/// Handlers run on whatever context the platform dispatches interrupts on,
/// possibly concurrently with calls on the driver. They must not assume
/// exclusive access to driver state.
pub trait DrdyInterrupt {
    /// Configures `pin` as a digital input.
    fn configure_input(&mut self, pin: u8);

    /// Invokes `handler` on each rising edge of `pin`.
    fn attach_rising_edge(&mut self, pin: u8, handler: fn());
}
