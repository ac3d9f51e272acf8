//! Raw sample domain entity
//!
//! One complete RGBC reading as captured from the sensor. It has no
//! knowledge of how the channels were read or what they will be used for.

/// A raw RGBC reading.
///
/// Channel counts come straight from the sensor's 16-bit data registers.
/// A sample is captured in one go and never modified afterwards; the next
/// capture supersedes it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// Red channel count
    pub red: u16,
    /// Green channel count
    pub green: u16,
    /// Blue channel count
    pub blue: u16,
    /// Clear (unfiltered) channel count
    pub clear: u16,
}

impl RawSample {
    /// Create a sample from its four channel counts
    pub const fn new(red: u16, green: u16, blue: u16, clear: u16) -> Self {
        Self {
            red,
            green,
            blue,
            clear,
        }
    }

    /// Channels as an array in capture order: clear, red, green, blue
    pub const fn channels(&self) -> [u16; 4] {
        [self.clear, self.red, self.green, self.blue]
    }

    /// Channel names matching [`RawSample::channels`]
    pub const CHANNEL_NAMES: [&'static str; 4] = ["Clear", "Red", "Green", "Blue"];
}

/// One of the four sensor channels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Clear,
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Order in which a capture reads the channels
    pub const CAPTURE_ORDER: [Channel; 4] =
        [Channel::Clear, Channel::Red, Channel::Green, Channel::Blue];
}
