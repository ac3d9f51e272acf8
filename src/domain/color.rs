//! Colour category and indicator colour types

use crate::domain::RawSample;

/// The discrete colours the sorter distinguishes
///
/// `Unknown` is only the value before the first classification; the
/// classifier itself never produces it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ColorCategory {
    #[default]
    Unknown = 0,
    Red = 1,
    Green = 2,
    Blue = 3,
    Yellow = 4,
    Black = 5,
}

impl ColorCategory {
    /// Categories the classifier can return
    pub const CLASSIFIED: [ColorCategory; 5] = [
        ColorCategory::Red,
        ColorCategory::Green,
        ColorCategory::Blue,
        ColorCategory::Yellow,
        ColorCategory::Black,
    ];

    /// Display name
    pub const fn as_str(&self) -> &'static str {
        match self {
            ColorCategory::Unknown => "unknown",
            ColorCategory::Red => "red",
            ColorCategory::Green => "green",
            ColorCategory::Blue => "blue",
            ColorCategory::Yellow => "yellow",
            ColorCategory::Black => "black",
        }
    }

    /// Fixed indicator colour shown for this category
    pub const fn indicator_color(&self) -> Rgb {
        match self {
            ColorCategory::Red => Rgb::RED,
            ColorCategory::Green => Rgb::GREEN,
            ColorCategory::Blue => Rgb::BLUE,
            ColorCategory::Yellow => Rgb::YELLOW,
            ColorCategory::Black | ColorCategory::Unknown => Rgb::OFF,
        }
    }
}

/// Indicator brightness per channel, 0-255
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Rgb = Rgb::new(0, 0, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const YELLOW: Rgb = Rgb::new(255, 120, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale the red, green and blue channels of a sample against its clear
    /// channel, for showing the measured colour directly
    ///
    /// A dark sample (clear of zero) maps to off.
    pub fn proportional(sample: &RawSample) -> Self {
        if sample.clear == 0 {
            return Rgb::OFF;
        }

        let scale = |channel: u16| -> u8 {
            let level = channel as u32 * 255 / sample.clear as u32;
            level.min(255) as u8
        };

        Rgb::new(scale(sample.red), scale(sample.green), scale(sample.blue))
    }
}
