//! AudioControl interface descriptor bodies.
//!
//! Most bodies changed layout between the 1.0 and 2.0 class releases, so
//! the decoders here branch on the major version the conversation's header
//! descriptor announced. A body decoder that cannot commit to a layout
//! returns `Entity::Undecoded` with zero bytes consumed and lets the
//! dispatcher flag the remainder.

use crate::bitfield::{ChannelConfigV1, ChannelConfigV2};
use crate::conversation::{bcd44_to_dec, Conversation};
use crate::descriptor::{Entity, BODY_OFFSET};
use crate::diag::{Diagnostic, DiagnosticKind};
use crate::reader::{ReadError, Reader};

/// AudioControl interface descriptor subtypes, sections A.5 (v1) and A.9 (v2).
pub const SUBTYPE_HEADER: u8 = 0x01;
pub const SUBTYPE_INPUT_TERMINAL: u8 = 0x02;
pub const SUBTYPE_OUTPUT_TERMINAL: u8 = 0x03;
pub const SUBTYPE_MIXER_UNIT: u8 = 0x04;
pub const SUBTYPE_SELECTOR_UNIT: u8 = 0x05;
pub const SUBTYPE_FEATURE_UNIT: u8 = 0x06;
pub const SUBTYPE_EFFECT_UNIT: u8 = 0x07;
pub const SUBTYPE_PROCESSING_UNIT: u8 = 0x08;
pub const SUBTYPE_EXTENSION_UNIT: u8 = 0x09;
pub const SUBTYPE_CLOCK_SOURCE: u8 = 0x0A;
pub const SUBTYPE_CLOCK_SELECTOR: u8 = 0x0B;
pub const SUBTYPE_CLOCK_MULTIPLIER: u8 = 0x0C;
pub const SUBTYPE_SAMPLE_RATE_CONVERTER: u8 = 0x0D;

/// Spatial channel layout, width depends on the class release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelConfig {
    V1(ChannelConfigV1),
    V2(ChannelConfigV2),
}

/// AudioControl header body. The release-specific tail follows the shared
/// bcdADC field.
#[derive(Debug, Clone, PartialEq)]
pub struct AcHeader {
    pub bcd_release: u16,
    pub body: AcHeaderBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AcHeaderBody {
    V1 {
        total_length: u16,
        /// Interface numbers of the streaming interfaces under this control
        /// interface, one per bInCollection entry.
        interface_numbers: Vec<u8>,
    },
    V2 {
        category: u8,
        total_length: u16,
        controls: u8,
    },
    /// Release the library does not know a layout for.
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputTerminal {
    pub terminal_id: u8,
    pub terminal_type: u16,
    pub assoc_terminal: u8,
    /// v2 only.
    pub clock_source_id: Option<u8>,
    pub nr_channels: u8,
    pub channel_config: ChannelConfig,
    pub channel_names: u8,
    /// v2 only, bitmap split with [`crate::bitfield::INPUT_TERMINAL_CONTROLS`].
    pub controls: Option<u16>,
    pub terminal_name: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputTerminal {
    pub terminal_id: u8,
    pub terminal_type: u16,
    pub assoc_terminal: u8,
    pub source_id: u8,
    /// v2 only.
    pub clock_source_id: Option<u8>,
    /// v2 only, bitmap split with [`crate::bitfield::OUTPUT_TERMINAL_CONTROLS`].
    pub controls: Option<u16>,
    pub terminal_name: u8,
}

/// Mixer unit body. Only the 1.0 layout is decoded; 2.0 mixers are rare
/// enough in the wild that devices still ship the v1 shape.
#[derive(Debug, Clone, PartialEq)]
pub struct MixerUnit {
    pub unit_id: u8,
    pub source_ids: Vec<u8>,
    pub nr_channels: u8,
    pub channel_config: ChannelConfigV1,
    pub channel_names: u8,
    pub controls: u8,
    pub mixer_name: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorUnit {
    pub unit_id: u8,
    pub source_ids: Vec<u8>,
    pub selector_name: u8,
}

/// Feature unit body. `bma_controls` holds one raw entry of
/// `control_size` bytes per channel, master channel first.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureUnit {
    pub unit_id: u8,
    pub source_id: u8,
    pub control_size: u8,
    pub bma_controls: Vec<Vec<u8>>,
    pub feature_name: u8,
}

impl FeatureUnit {
    /// Controls of channel `channel` (0 is the master channel) as a typed
    /// bitmap. Only the low 16 bits carry named controls.
    pub fn controls(&self, channel: usize) -> Option<crate::bitfield::FeatureControls> {
        let raw = self.bma_controls.get(channel)?;
        let lo = raw.first().copied().unwrap_or(0) as u16;
        let hi = raw.get(1).copied().unwrap_or(0) as u16;
        Some(crate::bitfield::FeatureControls::from_bits_retain(lo | hi << 8))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClockSource {
    pub clock_id: u8,
    /// Split with [`crate::bitfield::CLOCK_SOURCE_ATTRIBUTES`].
    pub attributes: u8,
    /// Split with [`crate::bitfield::CLOCK_SOURCE_CONTROLS`].
    pub controls: u8,
    pub assoc_terminal: u8,
    pub clock_name: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClockSelector {
    pub clock_id: u8,
    pub source_ids: Vec<u8>,
    /// Split with [`crate::bitfield::CLOCK_SELECTOR_CONTROLS`].
    pub controls: u8,
    pub selector_name: u8,
}

pub(super) fn decode_header(
    body: &[u8],
    conv: &mut Conversation,
) -> Result<(Entity, usize), ReadError> {
    let mut r = Reader::new(body);
    let bcd_release = r.le_u16()?;
    let major = bcd44_to_dec((bcd_release >> 8) as u8);

    // A conversation already claimed by another class means this header is
    // not ours to interpret.
    let Some(proto) = conv.claim_audio() else {
        return Ok((Entity::Undecoded, 0));
    };
    proto.audio_major = major;

    let header_body = match major {
        1 => {
            let total_length = r.le_u16()?;
            let in_collection = r.u8()?;
            let mut interface_numbers = Vec::with_capacity(in_collection as usize);
            for _ in 0..in_collection {
                interface_numbers.push(r.u8()?);
            }
            AcHeaderBody::V1 {
                total_length,
                interface_numbers,
            }
        }
        2 => AcHeaderBody::V2 {
            category: r.u8()?,
            total_length: r.le_u16()?,
            controls: r.u8()?,
        },
        _ => AcHeaderBody::Unknown,
    };

    Ok((
        Entity::AcHeader(AcHeader {
            bcd_release,
            body: header_body,
        }),
        r.position(),
    ))
}

pub(super) fn decode_input_terminal(
    body: &[u8],
    conv: &mut Conversation,
) -> Result<(Entity, usize), ReadError> {
    let Some(proto) = conv.audio_protocol() else {
        return Ok((Entity::Undecoded, 0));
    };
    let major = proto.audio_major;
    if major != 1 && major != 2 {
        return Ok((Entity::Undecoded, 0));
    }

    let mut r = Reader::new(body);
    let terminal_id = r.u8()?;
    let terminal_type = r.le_u16()?;
    let assoc_terminal = r.u8()?;
    let clock_source_id = if major == 2 { Some(r.u8()?) } else { None };
    let nr_channels = r.u8()?;
    let channel_config = if major == 1 {
        ChannelConfig::V1(ChannelConfigV1::from_bits_retain(r.le_u16()?))
    } else {
        ChannelConfig::V2(ChannelConfigV2::from_bits_retain(r.le_u32()?))
    };
    let channel_names = r.u8()?;
    let controls = if major == 2 { Some(r.le_u16()?) } else { None };
    let terminal_name = r.u8()?;

    Ok((
        Entity::InputTerminal(InputTerminal {
            terminal_id,
            terminal_type,
            assoc_terminal,
            clock_source_id,
            nr_channels,
            channel_config,
            channel_names,
            controls,
            terminal_name,
        }),
        r.position(),
    ))
}

pub(super) fn decode_output_terminal(
    body: &[u8],
    conv: &mut Conversation,
) -> Result<(Entity, usize), ReadError> {
    let Some(proto) = conv.audio_protocol() else {
        return Ok((Entity::Undecoded, 0));
    };
    let major = proto.audio_major;
    if major != 1 && major != 2 {
        return Ok((Entity::Undecoded, 0));
    }

    let mut r = Reader::new(body);
    let terminal_id = r.u8()?;
    let terminal_type = r.le_u16()?;
    let assoc_terminal = r.u8()?;
    let source_id = r.u8()?;
    let (clock_source_id, controls) = if major == 2 {
        (Some(r.u8()?), Some(r.le_u16()?))
    } else {
        (None, None)
    };
    let terminal_name = r.u8()?;

    Ok((
        Entity::OutputTerminal(OutputTerminal {
            terminal_id,
            terminal_type,
            assoc_terminal,
            source_id,
            clock_source_id,
            controls,
            terminal_name,
        }),
        r.position(),
    ))
}

pub(super) fn decode_mixer_unit(body: &[u8]) -> Result<(Entity, usize), ReadError> {
    let mut r = Reader::new(body);
    let unit_id = r.u8()?;
    let nr_in_pins = r.u8()?;
    let mut source_ids = Vec::with_capacity(nr_in_pins as usize);
    for _ in 0..nr_in_pins {
        source_ids.push(r.u8()?);
    }
    let nr_channels = r.u8()?;
    let channel_config = ChannelConfigV1::from_bits_retain(r.le_u16()?);
    let channel_names = r.u8()?;
    let controls = r.u8()?;
    let mixer_name = r.u8()?;

    Ok((
        Entity::MixerUnit(MixerUnit {
            unit_id,
            source_ids,
            nr_channels,
            channel_config,
            channel_names,
            controls,
            mixer_name,
        }),
        r.position(),
    ))
}

pub(super) fn decode_selector_unit(body: &[u8]) -> Result<(Entity, usize), ReadError> {
    let mut r = Reader::new(body);
    let unit_id = r.u8()?;
    let nr_in_pins = r.u8()?;
    let mut source_ids = Vec::with_capacity(nr_in_pins as usize);
    for _ in 0..nr_in_pins {
        source_ids.push(r.u8()?);
    }
    let selector_name = r.u8()?;

    Ok((
        Entity::SelectorUnit(SelectorUnit {
            unit_id,
            source_ids,
            selector_name,
        }),
        r.position(),
    ))
}

/// The channel count of a feature unit is not stored in the descriptor; it
/// must be reconstructed from the declared length and bControlSize, and the
/// reconstruction has to reproduce the declared length exactly.
pub(super) fn decode_feature_unit(
    body: &[u8],
    declared_length: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(Entity, usize), ReadError> {
    let mut r = Reader::new(body);
    let unit_id = r.u8()?;
    let source_id = r.u8()?;
    let control_size = r.u8()? as usize;

    let channels_plus_master = if control_size > 0 && declared_length >= 7 {
        let tail = declared_length - 7;
        if tail % control_size == 0 {
            tail / control_size
        } else {
            0
        }
    } else {
        0
    };
    if channels_plus_master == 0 {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::InvalidFeatureUnitLength,
            BODY_OFFSET + r.position()..declared_length,
        ));
        // Skip the rest of the body rather than misread it.
        return Ok((Entity::Undecoded, declared_length.saturating_sub(BODY_OFFSET)));
    }

    let mut bma_controls = Vec::with_capacity(channels_plus_master);
    for _ in 0..channels_plus_master {
        bma_controls.push(r.bytes(control_size)?.to_vec());
    }
    let feature_name = r.u8()?;

    Ok((
        Entity::FeatureUnit(FeatureUnit {
            unit_id,
            source_id,
            control_size: control_size as u8,
            bma_controls,
            feature_name,
        }),
        r.position(),
    ))
}

pub(super) fn decode_clock_source(body: &[u8]) -> Result<(Entity, usize), ReadError> {
    let mut r = Reader::new(body);
    let clock_id = r.u8()?;
    let attributes = r.u8()?;
    let controls = r.u8()?;
    let assoc_terminal = r.u8()?;
    let clock_name = r.u8()?;

    Ok((
        Entity::ClockSource(ClockSource {
            clock_id,
            attributes,
            controls,
            assoc_terminal,
            clock_name,
        }),
        r.position(),
    ))
}

pub(super) fn decode_clock_selector(body: &[u8]) -> Result<(Entity, usize), ReadError> {
    let mut r = Reader::new(body);
    let clock_id = r.u8()?;
    let nr_in_pins = r.u8()?;
    let mut source_ids = Vec::with_capacity(nr_in_pins as usize);
    for _ in 0..nr_in_pins {
        source_ids.push(r.u8()?);
    }
    let controls = r.u8()?;
    let selector_name = r.u8()?;

    Ok((
        Entity::ClockSelector(ClockSelector {
            clock_id,
            source_ids,
            controls,
            selector_name,
        }),
        r.position(),
    ))
}
