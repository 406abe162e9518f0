// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/crop/handle.rs
//
// Resize handles and drag modes.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::CropError;

/// One of the eight compass-direction resize grips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragHandle {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

/// Rectangle edges a handle drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

impl DragHandle {
    /// All handles, corners first (corners win hit-testing over edges).
    pub const ALL: [DragHandle; 8] = [
        DragHandle::NorthWest,
        DragHandle::NorthEast,
        DragHandle::SouthWest,
        DragHandle::SouthEast,
        DragHandle::North,
        DragHandle::South,
        DragHandle::West,
        DragHandle::East,
    ];

    pub fn edges(self) -> Edges {
        let (north, east, south, west) = match self {
            Self::North => (true, false, false, false),
            Self::NorthEast => (true, true, false, false),
            Self::East => (false, true, false, false),
            Self::SouthEast => (false, true, true, false),
            Self::South => (false, false, true, false),
            Self::SouthWest => (false, false, true, true),
            Self::West => (false, false, false, true),
            Self::NorthWest => (true, false, false, true),
        };
        Edges {
            north,
            east,
            south,
            west,
        }
    }

    /// Position of the handle relative to the rectangle, as fractions of its size.
    pub fn anchor_fraction(self) -> (f32, f32) {
        match self {
            Self::NorthWest => (0.0, 0.0),
            Self::North => (0.5, 0.0),
            Self::NorthEast => (1.0, 0.0),
            Self::East => (1.0, 0.5),
            Self::SouthEast => (1.0, 1.0),
            Self::South => (0.5, 1.0),
            Self::SouthWest => (0.0, 1.0),
            Self::West => (0.0, 0.5),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::North => "n",
            Self::NorthEast => "ne",
            Self::East => "e",
            Self::SouthEast => "se",
            Self::South => "s",
            Self::SouthWest => "sw",
            Self::West => "w",
            Self::NorthWest => "nw",
        }
    }

    /// CSS-style cursor name for the handle.
    pub fn cursor(self) -> &'static str {
        match self {
            Self::North => "n-resize",
            Self::NorthEast => "ne-resize",
            Self::East => "e-resize",
            Self::SouthEast => "se-resize",
            Self::South => "s-resize",
            Self::SouthWest => "sw-resize",
            Self::West => "w-resize",
            Self::NorthWest => "nw-resize",
        }
    }
}

impl fmt::Display for DragHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DragHandle {
    type Err = CropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "n" => Ok(Self::North),
            "ne" => Ok(Self::NorthEast),
            "e" => Ok(Self::East),
            "se" => Ok(Self::SouthEast),
            "s" => Ok(Self::South),
            "sw" => Ok(Self::SouthWest),
            "w" => Ok(Self::West),
            "nw" => Ok(Self::NorthWest),
            _ => Err(CropError::UnknownHandle(s.to_string())),
        }
    }
}

/// What a drag does to the rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Move,
    Resize(DragHandle),
}

impl DragMode {
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Move => "grabbing",
            Self::Resize(handle) => handle.cursor(),
        }
    }
}

impl fmt::Display for DragMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move => f.write_str("move"),
            Self::Resize(handle) => write!(f, "resize:{handle}"),
        }
    }
}

impl FromStr for DragMode {
    type Err = CropError;

    /// `move` or a handle name (`n`, `ne`, ... `nw`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("move") {
            return Ok(Self::Move);
        }
        s.parse().map(Self::Resize)
    }
}
