//! AudioStreaming interface and endpoint descriptor bodies.

use crate::conversation::Conversation;
use crate::descriptor::{Entity, BODY_OFFSET};
use crate::diag::{Diagnostic, DiagnosticKind};
use crate::reader::{ReadError, Reader};

/// AudioStreaming interface descriptor subtypes, sections A.6 (v1) and
/// A.10 (v2).
pub const SUBTYPE_GENERAL: u8 = 0x01;
pub const SUBTYPE_FORMAT_TYPE: u8 = 0x02;
pub const SUBTYPE_ENCODER: u8 = 0x03;

/// AudioStreaming endpoint descriptor subtype.
pub const EP_SUBTYPE_GENERAL: u8 = 0x01;

#[derive(Debug, Clone, PartialEq)]
pub enum AsGeneral {
    V1 {
        terminal_link: u8,
        delay: u8,
        format_tag: u16,
    },
    V2 {
        terminal_link: u8,
        /// Split with [`crate::bitfield::AS_GENERAL_CONTROLS`].
        controls: u8,
        format_type: u8,
        formats: u32,
        nr_channels: u8,
        channel_config: u32,
        channel_names: u8,
    },
}

/// Audio sample rates. A bSamFreqType of zero declares a continuous range,
/// anything else a list of discrete rates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleRates {
    Continuous { lower: u32, upper: u32 },
    Discrete(Vec<u32>),
}

/// Format-specific payload of a 1.0 format type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatV1Payload {
    TypeI {
        nr_channels: u8,
        subframe_size: u8,
        bit_resolution: u8,
        sample_rates: SampleRates,
    },
    TypeII {
        max_bit_rate: u16,
        samples_per_frame: u16,
        sample_rates: SampleRates,
    },
    /// Type III reuses the Type I layout with fixed values. Deviations are
    /// reported as diagnostics but do not stop the decode.
    TypeIII {
        nr_channels: u8,
        subframe_size: u8,
        bit_resolution: u8,
        sample_rates: SampleRates,
    },
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormatType {
    V1 {
        format_type: u8,
        payload: FormatV1Payload,
    },
    V2 {
        format_type: u8,
        /// Only present for format type 1.
        subslot_size: Option<u8>,
        bit_resolution: Option<u8>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsEndpointGeneral {
    V1 {
        /// Split with [`crate::bitfield::EndpointAttributesV1`].
        attributes: crate::bitfield::EndpointAttributesV1,
        lock_delay_units: u8,
        lock_delay: u16,
    },
    V2 {
        attributes: u8,
        /// Split with [`crate::bitfield::ENDPOINT_CONTROLS`].
        controls: u8,
        lock_delay_units: u8,
        lock_delay: u16,
    },
}

fn read_sample_rates(r: &mut Reader<'_>) -> Result<SampleRates, ReadError> {
    let sam_freq_type = r.u8()?;
    if sam_freq_type == 0 {
        Ok(SampleRates::Continuous {
            lower: r.le_u24()?,
            upper: r.le_u24()?,
        })
    } else {
        let mut rates = Vec::with_capacity(sam_freq_type as usize);
        for _ in 0..sam_freq_type {
            rates.push(r.le_u24()?);
        }
        Ok(SampleRates::Discrete(rates))
    }
}

pub(super) fn decode_general(
    body: &[u8],
    conv: &mut Conversation,
) -> Result<(Entity, usize), ReadError> {
    let Some(proto) = conv.audio_protocol() else {
        return Ok((Entity::Undecoded, 0));
    };
    let major = proto.audio_major;

    let mut r = Reader::new(body);
    let general = match major {
        1 => AsGeneral::V1 {
            terminal_link: r.u8()?,
            delay: r.u8()?,
            format_tag: r.le_u16()?,
        },
        2 => AsGeneral::V2 {
            terminal_link: r.u8()?,
            controls: r.u8()?,
            format_type: r.u8()?,
            formats: r.le_u32()?,
            nr_channels: r.u8()?,
            channel_config: r.le_u32()?,
            channel_names: r.u8()?,
        },
        _ => return Ok((Entity::Undecoded, 0)),
    };

    Ok((Entity::AsGeneral(general), r.position()))
}

pub(super) fn decode_format_type(
    body: &[u8],
    conv: &mut Conversation,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(Entity, usize), ReadError> {
    let Some(proto) = conv.audio_protocol() else {
        return Ok((Entity::Undecoded, 0));
    };
    match proto.audio_major {
        1 => decode_format_type_v1(body, diagnostics),
        2 => decode_format_type_v2(body),
        _ => Ok((Entity::Undecoded, 0)),
    }
}

fn decode_format_type_v1(
    body: &[u8],
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(Entity, usize), ReadError> {
    let mut r = Reader::new(body);
    let format_type = r.u8()?;

    let payload = match format_type {
        1 => FormatV1Payload::TypeI {
            nr_channels: r.u8()?,
            subframe_size: r.u8()?,
            bit_resolution: r.u8()?,
            sample_rates: read_sample_rates(&mut r)?,
        },
        2 => FormatV1Payload::TypeII {
            max_bit_rate: r.le_u16()?,
            samples_per_frame: r.le_u16()?,
            sample_rates: read_sample_rates(&mut r)?,
        },
        3 => {
            // Type III mandates two 16-bit channels. Real devices get this
            // wrong, so flag and carry on.
            let pos = BODY_OFFSET + r.position();
            let nr_channels = r.u8()?;
            if nr_channels != 2 {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::InvalidTypeIiiChannels(nr_channels),
                    pos..pos + 1,
                ));
            }
            let pos = BODY_OFFSET + r.position();
            let subframe_size = r.u8()?;
            if subframe_size != 2 {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::InvalidTypeIiiSubframeSize(subframe_size),
                    pos..pos + 1,
                ));
            }
            let pos = BODY_OFFSET + r.position();
            let bit_resolution = r.u8()?;
            if bit_resolution != 16 {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::InvalidTypeIiiBitResolution(bit_resolution),
                    pos..pos + 1,
                ));
            }
            FormatV1Payload::TypeIII {
                nr_channels,
                subframe_size,
                bit_resolution,
                sample_rates: read_sample_rates(&mut r)?,
            }
        }
        _ => FormatV1Payload::Unknown,
    };

    Ok((
        Entity::FormatType(FormatType::V1 {
            format_type,
            payload,
        }),
        r.position(),
    ))
}

fn decode_format_type_v2(body: &[u8]) -> Result<(Entity, usize), ReadError> {
    let mut r = Reader::new(body);
    let format_type = r.u8()?;
    let (subslot_size, bit_resolution) = if format_type == 1 {
        (Some(r.u8()?), Some(r.u8()?))
    } else {
        (None, None)
    };

    Ok((
        Entity::FormatType(FormatType::V2 {
            format_type,
            subslot_size,
            bit_resolution,
        }),
        r.position(),
    ))
}

pub(super) fn decode_endpoint_general(
    body: &[u8],
    conv: &mut Conversation,
) -> Result<(Entity, usize), ReadError> {
    let Some(proto) = conv.audio_protocol() else {
        return Ok((Entity::Undecoded, 0));
    };
    let major = proto.audio_major;

    let mut r = Reader::new(body);
    let general = match major {
        1 => AsEndpointGeneral::V1 {
            attributes: crate::bitfield::EndpointAttributesV1::from_bits_retain(r.u8()?),
            lock_delay_units: r.u8()?,
            lock_delay: r.le_u16()?,
        },
        2 => AsEndpointGeneral::V2 {
            attributes: r.u8()?,
            controls: r.u8()?,
            lock_delay_units: r.u8()?,
            lock_delay: r.le_u16()?,
        },
        _ => return Ok((Entity::Undecoded, 0)),
    };

    Ok((Entity::AsEndpointGeneral(general), r.position()))
}
