//! Light channel registry
//!
//! The channel bank is fixed: ten channels on each front side and eight on
//! the rear. Names must match the node names of the xLights vehicle model.

pub mod bindings;

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fmt;

pub use bindings::{CueBindings, CueColor, GridPosition, Hand, Lane, Layer, RearGroup};

/// Physical bank a channel belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bank {
    Left,
    Right,
    Rear,
}

/// One addressable light output on the vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Channel {
    bank: Bank,
    index: u8,
    name: &'static str,
}

impl Channel {
    pub const fn new(bank: Bank, index: u8, name: &'static str) -> Self {
        Self { bank, index, name }
    }

    pub fn bank(&self) -> Bank {
        self.bank
    }

    /// 1-based position inside the bank
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Display name, also the node name in the output template
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Left front bank
pub mod left {
    use super::{Bank, Channel};

    pub const OUTER_MAIN_BEAM: Channel = Channel::new(Bank::Left, 1, "Left Outer Main Beam");
    pub const INNER_MAIN_BEAM: Channel = Channel::new(Bank::Left, 2, "Left Inner Main Beam");
    pub const SIGNATURE: Channel = Channel::new(Bank::Left, 3, "Left Signature");
    pub const CHANNEL_4: Channel = Channel::new(Bank::Left, 4, "Left Channel 4");
    pub const CHANNEL_5: Channel = Channel::new(Bank::Left, 5, "Left Channel 5");
    pub const CHANNEL_6: Channel = Channel::new(Bank::Left, 6, "Left Channel 6");
    pub const FRONT_TURN: Channel = Channel::new(Bank::Left, 7, "Left Front Turn");
    pub const FRONT_FOG: Channel = Channel::new(Bank::Left, 8, "Left Front Fog");
    pub const AUX_PARK: Channel = Channel::new(Bank::Left, 9, "Left Aux Park");
    pub const SIDE_MARKER: Channel = Channel::new(Bank::Left, 10, "Left Side Marker");

    pub const ALL: [Channel; 10] = [
        OUTER_MAIN_BEAM,
        INNER_MAIN_BEAM,
        SIGNATURE,
        CHANNEL_4,
        CHANNEL_5,
        CHANNEL_6,
        FRONT_TURN,
        FRONT_FOG,
        AUX_PARK,
        SIDE_MARKER,
    ];
}

/// Right front bank
pub mod right {
    use super::{Bank, Channel};

    pub const OUTER_MAIN_BEAM: Channel = Channel::new(Bank::Right, 1, "Right Outer Main Beam");
    pub const INNER_MAIN_BEAM: Channel = Channel::new(Bank::Right, 2, "Right Inner Main Beam");
    pub const SIGNATURE: Channel = Channel::new(Bank::Right, 3, "Right Signature");
    pub const CHANNEL_4: Channel = Channel::new(Bank::Right, 4, "Right Channel 4");
    pub const CHANNEL_5: Channel = Channel::new(Bank::Right, 5, "Right Channel 5");
    pub const CHANNEL_6: Channel = Channel::new(Bank::Right, 6, "Right Channel 6");
    pub const FRONT_TURN: Channel = Channel::new(Bank::Right, 7, "Right Front Turn");
    pub const FRONT_FOG: Channel = Channel::new(Bank::Right, 8, "Right Front Fog");
    pub const AUX_PARK: Channel = Channel::new(Bank::Right, 9, "Right Aux Park");
    pub const SIDE_MARKER: Channel = Channel::new(Bank::Right, 10, "Right Side Marker");

    pub const ALL: [Channel; 10] = [
        OUTER_MAIN_BEAM,
        INNER_MAIN_BEAM,
        SIGNATURE,
        CHANNEL_4,
        CHANNEL_5,
        CHANNEL_6,
        FRONT_TURN,
        FRONT_FOG,
        AUX_PARK,
        SIDE_MARKER,
    ];
}

/// Rear bank
pub mod rear {
    use super::{Bank, Channel};

    pub const LEFT_SIDE_REPEATER: Channel = Channel::new(Bank::Rear, 1, "Left Side Repeater");
    pub const LEFT_REAR_TURN: Channel = Channel::new(Bank::Rear, 2, "Left Rear Turn");
    pub const LEFT_TAIL: Channel = Channel::new(Bank::Rear, 3, "Left Tail");
    pub const RIGHT_SIDE_REPEATER: Channel = Channel::new(Bank::Rear, 4, "Right Side Repeater");
    pub const RIGHT_REAR_TURN: Channel = Channel::new(Bank::Rear, 5, "Right Rear Turn");
    pub const RIGHT_TAIL: Channel = Channel::new(Bank::Rear, 6, "Right Tail");
    pub const BRAKE_LIGHTS: Channel = Channel::new(Bank::Rear, 7, "Brake Lights");
    pub const LICENSE_PLATE: Channel = Channel::new(Bank::Rear, 8, "License Plate");

    pub const ALL: [Channel; 8] = [
        LEFT_SIDE_REPEATER,
        LEFT_REAR_TURN,
        LEFT_TAIL,
        RIGHT_SIDE_REPEATER,
        RIGHT_REAR_TURN,
        RIGHT_TAIL,
        BRAKE_LIGHTS,
        LICENSE_PLATE,
    ];
}

/// Catalog of every channel the vehicle exposes
#[derive(Debug, Clone)]
pub struct ChannelRegistry {
    channels: Vec<Channel>,
}

impl ChannelRegistry {
    /// Build a registry, rejecting duplicate display names
    pub fn new(channels: impl IntoIterator<Item = Channel>) -> Result<Self> {
        let channels: Vec<Channel> = channels.into_iter().collect();
        let mut seen = HashSet::new();
        for channel in &channels {
            if !seen.insert(channel.name) {
                return Err(Error::DuplicateChannel(channel.name));
            }
        }
        Ok(Self { channels })
    }

    /// The stock vehicle layout
    pub fn vehicle() -> Self {
        let channels = left::ALL
            .into_iter()
            .chain(right::ALL)
            .chain(rear::ALL)
            .collect();
        Self { channels }
    }

    /// Look up a channel by its display name
    pub fn find(&self, name: &str) -> Option<Channel> {
        self.channels.iter().copied().find(|c| c.name == name)
    }

    /// Channels of one bank, in index order
    pub fn bank(&self, bank: Bank) -> impl Iterator<Item = Channel> + '_ {
        self.channels.iter().copied().filter(move |c| c.bank == bank)
    }

    pub fn iter(&self) -> impl Iterator<Item = Channel> + '_ {
        self.channels.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::vehicle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_bank_sizes() {
        let registry = ChannelRegistry::vehicle();
        assert_eq!(registry.len(), 28);
        assert_eq!(registry.bank(Bank::Left).count(), 10);
        assert_eq!(registry.bank(Bank::Right).count(), 10);
        assert_eq!(registry.bank(Bank::Rear).count(), 8);
    }

    #[test]
    fn test_vehicle_names_unique() {
        let registry = ChannelRegistry::vehicle();
        assert!(ChannelRegistry::new(registry.iter()).is_ok());
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = ChannelRegistry::new([left::FRONT_FOG, left::FRONT_FOG]);
        assert!(matches!(result, Err(Error::DuplicateChannel("Left Front Fog"))));
    }

    #[test]
    fn test_find_by_name() {
        let registry = ChannelRegistry::vehicle();
        assert_eq!(registry.find("Brake Lights"), Some(rear::BRAKE_LIGHTS));
        assert_eq!(registry.find("Right Aux Park"), Some(right::AUX_PARK));
        assert_eq!(registry.find("Hazard"), None);
    }

    #[test]
    fn test_bank_order_follows_index() {
        let registry = ChannelRegistry::vehicle();
        let indices: Vec<u8> = registry.bank(Bank::Rear).map(|c| c.index()).collect();
        assert_eq!(indices, (1..=8).collect::<Vec<u8>>());
    }
}
