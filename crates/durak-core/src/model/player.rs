use core::fmt;
use serde::{Deserialize, Serialize};

/// Seat identity for the two players of a game. Who attacks and who defends
/// is a per-round role, tracked by the round itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    One = 0,
    Two = 1,
}

impl Seat {
    pub const BOTH: [Seat; 2] = [Seat::One, Seat::Two];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::One),
            1 => Some(Seat::Two),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn other(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seat::One => "Player 1",
            Seat::Two => "Player 2",
        };
        f.write_str(label)
    }
}
