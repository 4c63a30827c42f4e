//! Bitmap field schemas.
//!
//! Boolean channel/attribute maps are `bitflags` types. The capability
//! bitmaps (2-bit "control present / read-only / host programmable" pairs)
//! are described by declarative `(name, mask)` tables consumed by one
//! generic extraction routine, so a new bitmap is a table, not a routine.

use bitflags::bitflags;

bitflags! {
    /// wChannelConfig, version 1 (spatial location bits).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ChannelConfigV1: u16 {
        const LEFT_FRONT = 0x0001;
        const RIGHT_FRONT = 0x0002;
        const CENTER_FRONT = 0x0004;
        const LOW_FREQUENCY_ENHANCEMENT = 0x0008;
        const LEFT_SURROUND = 0x0010;
        const RIGHT_SURROUND = 0x0020;
        const LEFT_OF_CENTER = 0x0040;
        const RIGHT_OF_CENTER = 0x0080;
        const SURROUND = 0x0100;
        const SIDE_LEFT = 0x0200;
        const SIDE_RIGHT = 0x0400;
        const TOP = 0x0800;
        const _ = !0;
    }
}

bitflags! {
    /// bmChannelConfig, version 2.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ChannelConfigV2: u32 {
        const FRONT_LEFT = 0x0000_0001;
        const FRONT_RIGHT = 0x0000_0002;
        const FRONT_CENTER = 0x0000_0004;
        const LOW_FREQUENCY_EFFECTS = 0x0000_0008;
        const BACK_LEFT = 0x0000_0010;
        const BACK_RIGHT = 0x0000_0020;
        const FRONT_LEFT_OF_CENTER = 0x0000_0040;
        const FRONT_RIGHT_OF_CENTER = 0x0000_0080;
        const BACK_CENTER = 0x0000_0100;
        const SIDE_LEFT = 0x0000_0200;
        const SIDE_RIGHT = 0x0000_0400;
        const TOP_CENTER = 0x0000_0800;
        const TOP_FRONT_LEFT = 0x0000_1000;
        const TOP_FRONT_CENTER = 0x0000_2000;
        const TOP_FRONT_RIGHT = 0x0000_4000;
        const TOP_BACK_LEFT = 0x0000_8000;
        const TOP_BACK_CENTER = 0x0001_0000;
        const TOP_BACK_RIGHT = 0x0002_0000;
        const TOP_FRONT_LEFT_OF_CENTER = 0x0004_0000;
        const TOP_FRONT_RIGHT_OF_CENTER = 0x0008_0000;
        const LEFT_LOW_FREQUENCY_EFFECTS = 0x0010_0000;
        const RIGHT_LOW_FREQUENCY_EFFECTS = 0x0020_0000;
        const TOP_SIDE_LEFT = 0x0040_0000;
        const TOP_SIDE_RIGHT = 0x0080_0000;
        const BOTTOM_CENTER = 0x0100_0000;
        const BACK_LEFT_OF_CENTER = 0x0200_0000;
        const BACK_RIGHT_OF_CENTER = 0x0400_0000;
        const RAW_DATA = 0x8000_0000;
        const _ = !0;
    }
}

bitflags! {
    /// bmAttributes of the version 1 streaming endpoint descriptor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct EndpointAttributesV1: u8 {
        const SAMPLING_FREQUENCY_CONTROL = 0x01;
        const PITCH_CONTROL = 0x02;
        const MAX_PACKETS_ONLY = 0x80;
        const _ = !0;
    }
}

bitflags! {
    /// Per-channel feature unit controls (first two bmaControls bytes).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FeatureControls: u16 {
        const MUTE = 0x0001;
        const VOLUME = 0x0002;
        const BASS = 0x0004;
        const MID = 0x0008;
        const TREBLE = 0x0010;
        const GRAPHIC_EQUALIZER = 0x0020;
        const AUTOMATIC_GAIN = 0x0040;
        const DELAY = 0x0080;
        const BASS_BOOST = 0x0100;
        const LOUDNESS = 0x0200;
        const _ = !0;
    }
}

/// One named field within a bitmap. Multi-bit fields carry a contiguous
/// mask; the extracted value is shifted down to bit 0.
#[derive(Debug, Clone, Copy)]
pub struct BitField {
    pub name: &'static str,
    pub mask: u32,
}

impl BitField {
    pub const fn new(name: &'static str, mask: u32) -> Self {
        BitField { name, mask }
    }

    pub fn extract(&self, value: u32) -> u32 {
        (value & self.mask) >> self.mask.trailing_zeros()
    }
}

/// Split `value` into `(name, field value)` pairs per the table.
pub fn split_fields(value: u32, fields: &[BitField]) -> Vec<(&'static str, u32)> {
    fields.iter().map(|f| (f.name, f.extract(value))).collect()
}

/// bmControls of the version 2 AC header descriptor.
pub const AC_HEADER_CONTROLS: &[BitField] = &[
    BitField::new("Latency Control", 0x03),
    BitField::new("Reserved", 0xFC),
];

/// bmControls of the version 2 input terminal descriptor.
pub const INPUT_TERMINAL_CONTROLS: &[BitField] = &[
    BitField::new("Copy Protect Control", 0x0003),
    BitField::new("Connector Control", 0x000C),
    BitField::new("Overload Control", 0x0030),
    BitField::new("Cluster Control", 0x00C0),
    BitField::new("Underflow Control", 0x0300),
    BitField::new("Overflow Control", 0x0C00),
    BitField::new("Reserved", 0xF000),
];

/// bmControls of the version 2 output terminal descriptor.
pub const OUTPUT_TERMINAL_CONTROLS: &[BitField] = &[
    BitField::new("Copy Protect Control", 0x0003),
    BitField::new("Connector Control", 0x000C),
    BitField::new("Overload Control", 0x0030),
    BitField::new("Underflow Control", 0x00C0),
    BitField::new("Overflow Control", 0x0300),
    BitField::new("Reserved", 0xFC00),
];

/// bmAttributes of the clock source descriptor.
pub const CLOCK_SOURCE_ATTRIBUTES: &[BitField] = &[
    BitField::new("Type", 0x03),
    BitField::new("Synchronization", 0x04),
    BitField::new("Reserved", 0xF8),
];

/// bmControls of the clock source descriptor.
pub const CLOCK_SOURCE_CONTROLS: &[BitField] = &[
    BitField::new("Clock Frequency Control", 0x03),
    BitField::new("Clock Validity Control", 0x0C),
    BitField::new("Reserved", 0xF0),
];

/// bmControls of the clock selector descriptor.
pub const CLOCK_SELECTOR_CONTROLS: &[BitField] = &[
    BitField::new("Clock Selector Control", 0x03),
    BitField::new("Reserved", 0xFC),
];

/// bmControls of the version 2 AS general interface descriptor.
pub const AS_GENERAL_CONTROLS: &[BitField] = &[
    BitField::new("Active Alternate Setting Control", 0x03),
    BitField::new("Valid Alternate Settings Control", 0x0C),
    BitField::new("Reserved", 0xF0),
];

/// bmControls of the version 2 streaming endpoint descriptor.
pub const ENDPOINT_CONTROLS: &[BitField] = &[
    BitField::new("Pitch Control", 0x03),
    BitField::new("Data Overrun Control", 0x0C),
    BitField::new("Valid Alternate Settings Control", 0x30),
    BitField::new("Reserved", 0xC0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_bit_fields_shift_down() {
        let f = BitField::new("Connector Control", 0x000C);
        assert_eq!(f.extract(0x0008), 2);
        assert_eq!(f.extract(0x0004), 1);
        assert_eq!(f.extract(0x0003), 0);
    }

    #[test]
    fn split_covers_every_field() {
        let fields = split_fields(0x05, AC_HEADER_CONTROLS);
        assert_eq!(fields, vec![("Latency Control", 1), ("Reserved", 1)]);
    }

    #[test]
    fn channel_config_retains_reserved_bits() {
        let cfg = ChannelConfigV1::from_bits_retain(0xF001);
        assert!(cfg.contains(ChannelConfigV1::LEFT_FRONT));
        assert_eq!(cfg.bits(), 0xF001);
    }
}
