//! Cue binding table: which channels a note or lighting cue drives

use super::{left, rear, right, Channel};
use std::fmt;

/// Saber hand a note belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    /// Map a raw note type (0 = red/left, 1 = blue/right). Bombs and any
    /// other type have no hand.
    pub fn from_note_type(note_type: i32) -> Option<Self> {
        match note_type {
            0 => Some(Hand::Left),
            1 => Some(Hand::Right),
            _ => None,
        }
    }
}

/// Vertical row of the note grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Bottom,
    Middle,
    Top,
}

/// Horizontal column of the note grid, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    FarLeft,
    Left,
    Right,
    FarRight,
}

/// A cell of the standard 3x4 note grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub layer: Layer,
    pub lane: Lane,
}

impl GridPosition {
    /// Build from raw `_lineLayer` / `_lineIndex` values. Positions outside
    /// the standard grid (mapping extensions, noodle maps) give `None`.
    pub fn new(layer: i64, index: i64) -> Option<Self> {
        let layer = match layer {
            0 => Layer::Bottom,
            1 => Layer::Middle,
            2 => Layer::Top,
            _ => return None,
        };
        let lane = match index {
            0 => Lane::FarLeft,
            1 => Lane::Left,
            2 => Lane::Right,
            3 => Lane::FarRight,
            _ => return None,
        };
        Some(Self { layer, lane })
    }
}

impl fmt::Display for GridPosition {
    /// Two-digit layer/index key, e.g. "12"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layer = match self.layer {
            Layer::Bottom => 0,
            Layer::Middle => 1,
            Layer::Top => 2,
        };
        let index = match self.lane {
            Lane::FarLeft => 0,
            Lane::Left => 1,
            Lane::Right => 2,
            Lane::FarRight => 3,
        };
        write!(f, "{}{}", layer, index)
    }
}

/// Intensity bucket of a lighting cue value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CueColor {
    /// Values 1..=3
    Blue,
    /// Values 5..=7
    Red,
}

impl CueColor {
    /// 0 (off), 4 (unused) and anything past 7 fall in neither bucket
    pub fn from_value(value: i32) -> Option<Self> {
        if value > 0 && value < 4 {
            Some(CueColor::Blue)
        } else if value > 4 && value < 8 {
            Some(CueColor::Red)
        } else {
            None
        }
    }
}

/// Rear light groups a cue can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RearGroup {
    Brake,
    Tail,
    Repeater,
    RearTurn,
    LicensePlate,
}

impl RearGroup {
    /// Route a cue. Type 1 drives brake/tail, type 0 drives repeaters and
    /// rear turn signals; other types have no rear binding.
    pub fn for_cue(cue_type: i32, value: i32) -> Option<Self> {
        let color = CueColor::from_value(value)?;
        match (cue_type, color) {
            (1, CueColor::Blue) => Some(RearGroup::Brake),
            (1, CueColor::Red) => Some(RearGroup::Tail),
            (0, CueColor::Blue) => Some(RearGroup::Repeater),
            (0, CueColor::Red) => Some(RearGroup::RearTurn),
            _ => None,
        }
    }
}

/// Immutable binding table handed to the translators
#[derive(Debug, Clone)]
pub struct CueBindings {
    note: fn(Hand, GridPosition) -> &'static [Channel],
    rear: fn(RearGroup) -> &'static [Channel],
}

impl CueBindings {
    /// Bindings for the stock vehicle layout
    pub fn vehicle() -> Self {
        Self {
            note: vehicle_note_channels,
            rear: vehicle_rear_channels,
        }
    }

    /// Channels lit by a note at `position` for `hand`, in binding order
    pub fn note_channels(&self, hand: Hand, position: GridPosition) -> &'static [Channel] {
        (self.note)(hand, position)
    }

    /// Channels lit by a rear group
    pub fn rear_channels(&self, group: RearGroup) -> &'static [Channel] {
        (self.rear)(group)
    }
}

impl Default for CueBindings {
    fn default() -> Self {
        Self::vehicle()
    }
}

fn vehicle_note_channels(hand: Hand, position: GridPosition) -> &'static [Channel] {
    use Lane::*;
    use Layer::*;

    match hand {
        Hand::Left => match (position.layer, position.lane) {
            (Bottom, FarLeft) => &[left::FRONT_TURN, left::FRONT_FOG],
            (Bottom, Left) => &[left::FRONT_TURN, left::FRONT_FOG, left::AUX_PARK],
            (Bottom, Right) => &[left::FRONT_TURN, left::SIDE_MARKER, left::AUX_PARK],
            (Bottom, FarRight) => &[left::FRONT_TURN, left::SIDE_MARKER],
            (Middle, FarLeft) => &[left::OUTER_MAIN_BEAM],
            (Middle, Left) => &[left::OUTER_MAIN_BEAM, left::SIGNATURE],
            (Middle, Right) => &[left::INNER_MAIN_BEAM, left::SIGNATURE],
            (Middle, FarRight) => &[left::INNER_MAIN_BEAM],
            (Top, FarLeft) => &[left::CHANNEL_4],
            (Top, Left) => &[left::CHANNEL_5],
            (Top, Right) => &[left::CHANNEL_5],
            (Top, FarRight) => &[left::CHANNEL_6],
        },
        // Mirrored: the outer edge of the grid maps to the outer lights
        Hand::Right => match (position.layer, position.lane) {
            (Bottom, FarLeft) => &[right::FRONT_TURN, right::SIDE_MARKER],
            (Bottom, Left) => &[right::FRONT_TURN, right::SIDE_MARKER, right::AUX_PARK],
            (Bottom, Right) => &[right::FRONT_TURN, right::FRONT_FOG, right::AUX_PARK],
            (Bottom, FarRight) => &[right::FRONT_TURN, right::FRONT_FOG],
            (Middle, FarLeft) => &[right::INNER_MAIN_BEAM],
            (Middle, Left) => &[right::INNER_MAIN_BEAM, right::SIGNATURE],
            (Middle, Right) => &[right::OUTER_MAIN_BEAM, right::SIGNATURE],
            (Middle, FarRight) => &[right::OUTER_MAIN_BEAM],
            (Top, FarLeft) => &[right::CHANNEL_6],
            (Top, Left) => &[right::CHANNEL_5],
            (Top, Right) => &[right::CHANNEL_5],
            (Top, FarRight) => &[right::CHANNEL_4],
        },
    }
}

fn vehicle_rear_channels(group: RearGroup) -> &'static [Channel] {
    match group {
        RearGroup::Brake => &[rear::BRAKE_LIGHTS],
        RearGroup::Tail => &[rear::LEFT_TAIL, rear::RIGHT_TAIL],
        RearGroup::Repeater => &[rear::LEFT_SIDE_REPEATER, rear::RIGHT_SIDE_REPEATER],
        RearGroup::RearTurn => &[rear::LEFT_REAR_TURN, rear::RIGHT_REAR_TURN],
        RearGroup::LicensePlate => &[rear::LICENSE_PLATE],
    }
}
