//! Hardware access seams
//!
//! The engines in this crate never touch a peripheral directly. Emitters,
//! the button and the settle delay go through `embedded-hal` traits, the
//! photodetector ADC goes through [`AnalogSource`] because `embedded-hal` 1.0
//! has no analog input trait.

/// Photodetector channels, one per emitter/detector pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorChannel {
    /// Left diagonal detector
    Left,
    /// Right diagonal detector
    Right,
    /// Left front detector
    FrontLeft,
    /// Right front detector
    FrontRight,
}

impl SensorChannel {
    /// All channels in sampling order
    pub const ALL: [SensorChannel; 4] = [
        SensorChannel::Left,
        SensorChannel::Right,
        SensorChannel::FrontLeft,
        SensorChannel::FrontRight,
    ];
}

/// Blocking single-shot analog reads
///
/// Implementations must return within a few microseconds; the acquisition
/// cycle calls this eight times per update. There is no error path, an
/// adapter that fails to convert reports 0.
pub trait AnalogSource {
    /// Sample one photodetector channel
    fn read(&mut self, channel: SensorChannel) -> u16;
}

impl<T: AnalogSource + ?Sized> AnalogSource for &mut T {
    fn read(&mut self, channel: SensorChannel) -> u16 {
        T::read(self, channel)
    }
}

/// Electrical level at which the button counts as active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Pulled up, shorted to ground when pressed
    #[default]
    Low,
    /// Pulled down, driven high when pressed
    High,
}
