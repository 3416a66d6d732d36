use num_derive::FromPrimitive;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::regs::ImuFilteringConfig;

/// Which outputs a filter channel's moving-average window applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[repr(u8)]
pub enum FilterMode {
    NoFiltering = 0,
    UncompensatedOnly = 1,
    CompensatedOnly = 2,
    Both = 3,
}

/// The five filter channels multiplexed into the filtering configuration register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum FilterChannel {
    Mag,
    Accel,
    Gyro,
    Temperature,
    Pressure,
}

impl FilterChannel {
    pub const ALL: [FilterChannel; 5] = [
        FilterChannel::Mag,
        FilterChannel::Accel,
        FilterChannel::Gyro,
        FilterChannel::Temperature,
        FilterChannel::Pressure,
    ];
}

impl ImuFilteringConfig {
    /// Raw `(mode, window_size)` of one channel.
    pub fn channel(&self, channel: FilterChannel) -> (u8, u16) {
        match channel {
            FilterChannel::Mag => (self.mag_filter_mode, self.mag_window_size),
            FilterChannel::Accel => (self.accel_filter_mode, self.accel_window_size),
            FilterChannel::Gyro => (self.gyro_filter_mode, self.gyro_window_size),
            FilterChannel::Temperature => (self.temp_filter_mode, self.temp_window_size),
            FilterChannel::Pressure => (self.pres_filter_mode, self.pres_window_size),
        }
    }

    /// Overwrites one channel, other channels are left as they are.
    pub fn set_channel(&mut self, channel: FilterChannel, mode: FilterMode, window: u16) {
        let (m, w) = match channel {
            FilterChannel::Mag => (&mut self.mag_filter_mode, &mut self.mag_window_size),
            FilterChannel::Accel => (&mut self.accel_filter_mode, &mut self.accel_window_size),
            FilterChannel::Gyro => (&mut self.gyro_filter_mode, &mut self.gyro_window_size),
            FilterChannel::Temperature => {
                (&mut self.temp_filter_mode, &mut self.temp_window_size)
            }
            FilterChannel::Pressure => (&mut self.pres_filter_mode, &mut self.pres_window_size),
        };

        *m = mode as u8;
        *w = window;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    #[test]
    fn test_filter_mode_from_u8() {
        assert_eq!(FilterMode::from_u8(0), Some(FilterMode::NoFiltering));
        assert_eq!(FilterMode::from_u8(3), Some(FilterMode::Both));
        assert_eq!(FilterMode::from_u8(4), None);
    }

    #[test]
    fn test_set_channel_is_isolated() {
        let mut cfg = ImuFilteringConfig::default();
        cfg.set_channel(FilterChannel::Temperature, FilterMode::Both, 128);

        assert_eq!(cfg.channel(FilterChannel::Temperature), (3, 128));
        for ch in FilterChannel::ALL {
            if ch != FilterChannel::Temperature {
                assert_eq!(cfg.channel(ch), (0, 0));
            }
        }
    }
}
