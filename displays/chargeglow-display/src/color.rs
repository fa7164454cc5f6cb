//! Color palette
//!
//! The grid stores one of eight palette entries per cell. Physical output
//! uses packed 24-bit `0xRRGGBB` values, the format addressable strips take.

/// Amount subtracted from each channel of the highlighted cell
pub const DEFAULT_HIGHLIGHT_STEP: u8 = 50;

/// Palette entries a grid cell can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Color {
    #[default]
    Black = 0,
    White,
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
}

impl Color {
    /// All palette entries in index order
    pub const ALL: [Color; 8] = [
        Color::Black,
        Color::White,
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Cyan,
        Color::Magenta,
    ];

    /// Palette entry for a raw index
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Parse a color name, ignoring case
    ///
    /// Unknown names map to `Black` so a typo blanks a pixel instead of
    /// failing the command that carried it.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or(Color::Black)
    }

    /// Canonical upper-case name
    pub const fn name(self) -> &'static str {
        match self {
            Color::Black => "BLACK",
            Color::White => "WHITE",
            Color::Red => "RED",
            Color::Green => "GREEN",
            Color::Blue => "BLUE",
            Color::Yellow => "YELLOW",
            Color::Cyan => "CYAN",
            Color::Magenta => "MAGENTA",
        }
    }

    /// Full-intensity RGB value of this entry
    pub const fn rgb(self) -> Rgb {
        match self {
            Color::Black => Rgb::new(0, 0, 0),
            Color::White => Rgb::new(255, 255, 255),
            Color::Red => Rgb::new(255, 0, 0),
            Color::Green => Rgb::new(0, 255, 0),
            Color::Blue => Rgb::new(0, 0, 255),
            Color::Yellow => Rgb::new(255, 255, 0),
            Color::Cyan => Rgb::new(0, 255, 255),
            Color::Magenta => Rgb::new(255, 0, 255),
        }
    }
}

/// A 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack from `0xRRGGBB` (upper byte ignored)
    pub const fn from_u32(packed: u32) -> Self {
        Self {
            r: (packed >> 16) as u8,
            g: (packed >> 8) as u8,
            b: packed as u8,
        }
    }

    /// Pack as `0xRRGGBB`
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Darken every channel by `step`, flooring at zero
    pub const fn dimmed(self, step: u8) -> Self {
        Self {
            r: self.r.saturating_sub(step),
            g: self.g.saturating_sub(step),
            b: self.b.saturating_sub(step),
        }
    }
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        color.rgb()
    }
}
