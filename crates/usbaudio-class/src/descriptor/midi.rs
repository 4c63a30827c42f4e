//! MIDIStreaming interface and endpoint descriptor bodies.
//!
//! These layouts never changed between class releases; the header's
//! bcdMSC version is recorded on the conversation but does not gate any
//! of the decoders.

use crate::conversation::{bcd44_to_dec, Conversation};
use crate::descriptor::Entity;
use crate::reader::{ReadError, Reader};

/// MIDIStreaming interface descriptor subtypes, USB MIDI section A.1.
pub const SUBTYPE_HEADER: u8 = 0x01;
pub const SUBTYPE_MIDI_IN_JACK: u8 = 0x02;
pub const SUBTYPE_MIDI_OUT_JACK: u8 = 0x03;
pub const SUBTYPE_ELEMENT: u8 = 0x04;

/// MIDIStreaming endpoint descriptor subtype.
pub const EP_SUBTYPE_GENERAL: u8 = 0x01;

pub const JACK_TYPE_EMBEDDED: u8 = 0x01;
pub const JACK_TYPE_EXTERNAL: u8 = 0x02;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsHeader {
    pub bcd_release: u16,
    pub total_length: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiInJack {
    pub jack_type: u8,
    pub jack_id: u8,
    pub jack_name: u8,
}

/// One input pin connection of a MIDI OUT jack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JackPin {
    pub source_id: u8,
    pub source_pin: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiOutJack {
    pub jack_type: u8,
    pub jack_id: u8,
    pub sources: Vec<JackPin>,
    pub jack_name: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsEndpointGeneral {
    /// Jack IDs of the embedded jacks this endpoint serves.
    pub jack_ids: Vec<u8>,
}

pub(super) fn decode_header(
    body: &[u8],
    conv: &mut Conversation,
) -> Result<(Entity, usize), ReadError> {
    let mut r = Reader::new(body);
    let bcd_release = r.le_u16()?;

    let Some(proto) = conv.claim_audio() else {
        return Ok((Entity::Undecoded, 0));
    };
    proto.midi_major = bcd44_to_dec((bcd_release >> 8) as u8);

    let total_length = r.le_u16()?;
    Ok((
        Entity::MsHeader(MsHeader {
            bcd_release,
            total_length,
        }),
        r.position(),
    ))
}

pub(super) fn decode_midi_in_jack(body: &[u8]) -> Result<(Entity, usize), ReadError> {
    let mut r = Reader::new(body);
    let jack_type = r.u8()?;
    let jack_id = r.u8()?;
    let jack_name = r.u8()?;

    Ok((
        Entity::MidiInJack(MidiInJack {
            jack_type,
            jack_id,
            jack_name,
        }),
        r.position(),
    ))
}

pub(super) fn decode_midi_out_jack(body: &[u8]) -> Result<(Entity, usize), ReadError> {
    let mut r = Reader::new(body);
    let jack_type = r.u8()?;
    let jack_id = r.u8()?;
    let nr_input_pins = r.u8()?;
    let mut sources = Vec::with_capacity(nr_input_pins as usize);
    for _ in 0..nr_input_pins {
        sources.push(JackPin {
            source_id: r.u8()?,
            source_pin: r.u8()?,
        });
    }
    let jack_name = r.u8()?;

    Ok((
        Entity::MidiOutJack(MidiOutJack {
            jack_type,
            jack_id,
            sources,
            jack_name,
        }),
        r.position(),
    ))
}

pub(super) fn decode_endpoint_general(body: &[u8]) -> Result<(Entity, usize), ReadError> {
    let mut r = Reader::new(body);
    let num_jacks = r.u8()?;
    let mut jack_ids = Vec::with_capacity(num_jacks as usize);
    for _ in 0..num_jacks {
        jack_ids.push(r.u8()?);
    }

    Ok((
        Entity::MsEndpointGeneral(MsEndpointGeneral { jack_ids }),
        r.position(),
    ))
}
