//! Class-specific descriptor dispatch.
//!
//! The outer enumeration hands us a byte region it has identified as a
//! class-specific descriptor, together with the conversation's interface
//! class/subclass. We read the declared length, tag and subtype, route to
//! the matching body decoder and reconcile what the decoder understood
//! against the declared length. The declared length is always what we
//! report as consumed; callers rely on it to step past descriptors we
//! only partially understand.

pub mod control;
pub mod midi;
pub mod streaming;

use tracing::trace;

use crate::conversation::{Conversation, Subclass, IF_CLASS_AUDIO};
use crate::diag::{Diagnostic, DiagnosticKind};
use crate::reader::ReadError;

/// Descriptor type tags, USB audio specification section A.8.
pub const CS_INTERFACE: u8 = 0x24;
pub const CS_ENDPOINT: u8 = 0x25;

/// Offset of the first body byte, after bLength, bDescriptorType and
/// bDescriptorSubtype.
pub(crate) const BODY_OFFSET: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorTag {
    Interface,
    Endpoint,
}

impl DescriptorTag {
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            CS_INTERFACE => Some(DescriptorTag::Interface),
            CS_ENDPOINT => Some(DescriptorTag::Endpoint),
            _ => None,
        }
    }

    pub fn raw(self) -> u8 {
        match self {
            DescriptorTag::Interface => CS_INTERFACE,
            DescriptorTag::Endpoint => CS_ENDPOINT,
        }
    }
}

/// The decoded body of one class-specific descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    AcHeader(control::AcHeader),
    InputTerminal(control::InputTerminal),
    OutputTerminal(control::OutputTerminal),
    MixerUnit(control::MixerUnit),
    SelectorUnit(control::SelectorUnit),
    FeatureUnit(control::FeatureUnit),
    ClockSource(control::ClockSource),
    ClockSelector(control::ClockSelector),
    AsGeneral(streaming::AsGeneral),
    FormatType(streaming::FormatType),
    AsEndpointGeneral(streaming::AsEndpointGeneral),
    MsHeader(midi::MsHeader),
    MidiInJack(midi::MidiInJack),
    MidiOutJack(midi::MidiOutJack),
    MsEndpointGeneral(midi::MsEndpointGeneral),
    /// Recognized container whose subtype or negotiated version this library
    /// does not interpret. Length skip-over still applies.
    Undecoded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedDescriptor {
    /// bLength as read from the wire. Always reported as consumed.
    pub declared_length: usize,
    pub tag: DescriptorTag,
    pub subtype: u8,
    pub entity: Entity,
    pub diagnostics: Vec<Diagnostic>,
}

impl DecodedDescriptor {
    /// Total bytes this descriptor occupies in the buffer.
    pub fn consumed(&self) -> usize {
        self.declared_length
    }
}

/// Decode one class-specific descriptor starting at `buf[0]`.
///
/// Returns `None` when the descriptor does not belong to this protocol
/// family (wrong interface class, or a tag/subclass combination we do not
/// recognize) so another decoder can try.
pub fn decode_descriptor(buf: &[u8], conv: &mut Conversation) -> Option<DecodedDescriptor> {
    if conv.interface_class != IF_CLASS_AUDIO {
        return None;
    }
    if buf.len() < BODY_OFFSET {
        return None;
    }

    let declared_length = buf[0] as usize;
    let tag = DescriptorTag::from_raw(buf[1])?;
    let subtype = buf[2];

    // There are no class-specific endpoint descriptors for audio control.
    match (tag, conv.interface_subclass) {
        (DescriptorTag::Interface, Subclass::AudioControl)
        | (DescriptorTag::Interface, Subclass::AudioStreaming)
        | (DescriptorTag::Interface, Subclass::MidiStreaming)
        | (DescriptorTag::Endpoint, Subclass::AudioStreaming)
        | (DescriptorTag::Endpoint, Subclass::MidiStreaming) => {}
        _ => return None,
    }

    trace!(declared_length, ?tag, subtype, "class-specific audio descriptor");

    let mut diagnostics = Vec::new();
    if declared_length > buf.len() {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::TruncatedBody {
                needed: declared_length,
                actual: buf.len(),
            },
            buf.len()..declared_length,
        ));
    }
    let body_end = declared_length.min(buf.len());
    let body = if body_end > BODY_OFFSET {
        &buf[BODY_OFFSET..body_end]
    } else {
        &[][..]
    };

    let decoded: Result<(Entity, usize), ReadError> = match (tag, conv.interface_subclass) {
        (DescriptorTag::Interface, Subclass::AudioControl) => match subtype {
            control::SUBTYPE_HEADER => control::decode_header(body, conv),
            control::SUBTYPE_INPUT_TERMINAL => control::decode_input_terminal(body, conv),
            control::SUBTYPE_OUTPUT_TERMINAL => control::decode_output_terminal(body, conv),
            control::SUBTYPE_MIXER_UNIT => control::decode_mixer_unit(body),
            control::SUBTYPE_SELECTOR_UNIT => control::decode_selector_unit(body),
            control::SUBTYPE_FEATURE_UNIT => {
                control::decode_feature_unit(body, declared_length, &mut diagnostics)
            }
            control::SUBTYPE_CLOCK_SOURCE => control::decode_clock_source(body),
            control::SUBTYPE_CLOCK_SELECTOR => control::decode_clock_selector(body),
            _ => Ok((Entity::Undecoded, 0)),
        },
        (DescriptorTag::Interface, Subclass::AudioStreaming) => match subtype {
            streaming::SUBTYPE_GENERAL => streaming::decode_general(body, conv),
            streaming::SUBTYPE_FORMAT_TYPE => {
                streaming::decode_format_type(body, conv, &mut diagnostics)
            }
            _ => Ok((Entity::Undecoded, 0)),
        },
        (DescriptorTag::Endpoint, Subclass::AudioStreaming) => match subtype {
            streaming::EP_SUBTYPE_GENERAL => streaming::decode_endpoint_general(body, conv),
            _ => Ok((Entity::Undecoded, 0)),
        },
        (DescriptorTag::Interface, Subclass::MidiStreaming) => match subtype {
            midi::SUBTYPE_HEADER => midi::decode_header(body, conv),
            midi::SUBTYPE_MIDI_IN_JACK => midi::decode_midi_in_jack(body),
            midi::SUBTYPE_MIDI_OUT_JACK => midi::decode_midi_out_jack(body),
            _ => Ok((Entity::Undecoded, 0)),
        },
        (DescriptorTag::Endpoint, Subclass::MidiStreaming) => match subtype {
            midi::EP_SUBTYPE_GENERAL => midi::decode_endpoint_general(body),
            _ => Ok((Entity::Undecoded, 0)),
        },
        _ => return None,
    };

    let entity = match decoded {
        Ok((entity, body_consumed)) => {
            let understood = BODY_OFFSET + body_consumed;
            if understood < declared_length && declared_length <= buf.len() {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::UndecodedTrailingBytes,
                    understood..declared_length,
                ));
            }
            entity
        }
        Err(ReadError::Truncated { needed, actual }) => {
            // The body slice is capped at the declared length, so running out
            // of bytes means the descriptor lies about its size.
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::TruncatedBody {
                    needed: BODY_OFFSET + needed,
                    actual: BODY_OFFSET + actual,
                },
                BODY_OFFSET..declared_length.max(BODY_OFFSET),
            ));
            Entity::Undecoded
        }
    };

    Some(DecodedDescriptor {
        declared_length,
        tag,
        subtype,
        entity,
        diagnostics,
    })
}
