//! Motor ports and wiring direction.

use serde::Deserialize;

use crate::error::ConfigError;

/// Motor port on the controller hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "char")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    /// Port A
    A,
    /// Port B
    B,
    /// Port C
    C,
    /// Port D
    D,
    /// Port E
    E,
    /// Port F
    F,
}

impl Port {
    /// Number of motor ports.
    pub const COUNT: usize = 6;

    /// All ports in index order.
    pub const ALL: [Port; Port::COUNT] = [Port::A, Port::B, Port::C, Port::D, Port::E, Port::F];

    /// Zero-based port index.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Port letter, as printed on the hub.
    #[inline]
    pub const fn letter(self) -> char {
        (b'A' + self as u8) as char
    }
}

impl TryFrom<u8> for Port {
    type Error = ConfigError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Port::ALL
            .get(index as usize)
            .copied()
            .ok_or(ConfigError::InvalidPort(index))
    }
}

impl TryFrom<char> for Port {
    type Error = ConfigError;

    fn try_from(letter: char) -> Result<Self, Self::Error> {
        match letter.to_ascii_uppercase() {
            c @ 'A'..='F' => Port::try_from(c as u8 - b'A'),
            // Letters outside the byte range are all reported as 255.
            c => Err(ConfigError::InvalidPort(u8::try_from(c).unwrap_or(u8::MAX))),
        }
    }
}

/// Rotation that counts as positive for an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Positive voltage turns the shaft clockwise.
    #[default]
    Clockwise,
    /// Positive voltage turns the shaft counterclockwise.
    CounterClockwise,
}

impl Direction {
    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}
