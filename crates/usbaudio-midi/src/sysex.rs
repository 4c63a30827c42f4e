//! Bulk transfer decoding and sysex reassembly.
//!
//! System-exclusive messages arrive chopped into 4-byte event frames, one
//! fragment group per virtual cable. A group opens on the first 0x4 frame
//! for its cable, grows with each fragment in arrival order, and closes
//! when a terminating code (0x5/0x6/0x7) arrives for that cable.
//!
//! Delivery order matters when one bulk buffer packs several frames:
//! a message completed mid-buffer is held back until the last sysex frame
//! of the buffer has been processed, so messages always reach the sink in
//! completion order. The lookahead that decides "last sysex frame" is
//! strictly buffer-local; frames in a later transfer never influence it.
//! Open groups, by contrast, do survive across transfers, which is what
//! lets a long sysex message span many bulk buffers.

use tracing::trace;

use usbaudio_class::conversation::{Conversation, Subclass};
use usbaudio_class::diag::{Diagnostic, DiagnosticKind};

use crate::event::{is_sysex_code, EventPacket, EVENT_FRAME_LEN};

/// Reassembly role of one event frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysexStatus {
    /// Not a sysex frame.
    None,
    /// Part of a sysex message that is not delivered at this frame.
    Fragment,
    /// Final fragment; the complete message is delivered at this frame.
    Reassembled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiEvent {
    /// Byte offset of the frame within the decoded buffer.
    pub offset: usize,
    pub packet: EventPacket,
    pub sysex: SysexStatus,
}

/// One complete reassembled system-exclusive message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysexMessage {
    pub cable: u8,
    /// Concatenated fragment payloads in arrival order.
    pub data: Vec<u8>,
    /// Number of event frames the message was split across.
    pub fragments: u32,
}

#[derive(Debug, Default)]
struct FragmentGroup {
    data: Vec<u8>,
    fragments: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulkDecoded {
    /// Bytes of the buffer accounted for (always the whole buffer).
    pub consumed: usize,
    pub events: Vec<MidiEvent>,
    /// Messages delivered during this call, in completion order. Empty
    /// when a sink was supplied instead.
    pub messages: Vec<SysexMessage>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Per-conversation decoder state: the open fragment group of each
/// virtual cable. Completed messages never persist here; every message
/// finished during a call is delivered before that call returns.
#[derive(Debug, Default)]
pub struct MidiStreamDecoder {
    open: [Option<FragmentGroup>; 16],
}

/// True when a frame at or after `from` carries a sysex code. Cables are
/// deliberately not compared; any later sysex frame defers delivery.
fn later_sysex_frame(buf: &[u8], from: usize) -> bool {
    buf.get(from..)
        .map(|rest| {
            rest.chunks_exact(EVENT_FRAME_LEN)
                .any(|frame| is_sysex_code(frame[0] & 0x0F))
        })
        .unwrap_or(false)
}

impl MidiStreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one bulk transfer, collecting delivered messages.
    pub fn decode_bulk(&mut self, conv: &Conversation, buf: &[u8]) -> BulkDecoded {
        let mut messages = Vec::new();
        let mut decoded = self.decode_bulk_with(conv, buf, &mut |msg| messages.push(msg));
        decoded.messages = messages;
        decoded
    }

    /// Decode one bulk transfer, handing each completed message to `sink`
    /// the moment its delivery gate clears.
    pub fn decode_bulk_with(
        &mut self,
        conv: &Conversation,
        buf: &[u8],
        sink: &mut dyn FnMut(SysexMessage),
    ) -> BulkDecoded {
        let mut decoded = BulkDecoded {
            consumed: buf.len(),
            events: Vec::new(),
            messages: Vec::new(),
            diagnostics: Vec::new(),
        };

        if conv.interface_subclass != Subclass::MidiStreaming {
            if !buf.is_empty() {
                decoded.diagnostics.push(Diagnostic::new(
                    DiagnosticKind::UndecodedPayload,
                    0..buf.len(),
                ));
            }
            return decoded;
        }

        // Messages completed at a frame with a later sysex frame still in
        // this buffer wait here; they flush, in completion order, at the
        // buffer's last sysex frame. That frame always exists once this
        // vector is non-empty, so nothing survives the call.
        let mut held_back: Vec<SysexMessage> = Vec::new();

        let frames = buf.chunks_exact(EVENT_FRAME_LEN);
        let remainder = frames.remainder();
        for (index, frame) in frames.enumerate() {
            let offset = index * EVENT_FRAME_LEN;
            let packet = EventPacket::new([frame[0], frame[1], frame[2], frame[3]]);
            trace!(
                offset,
                cable = packet.cable(),
                code = packet.code_index(),
                "midi event frame"
            );

            let sysex = if packet.is_sysex() {
                let cable = packet.cable() as usize;
                let mut group = self.open[cable].take().unwrap_or_default();
                group.data.extend_from_slice(packet.payload());
                group.fragments += 1;

                let last_in_buffer = !later_sysex_frame(buf, offset + EVENT_FRAME_LEN);
                if packet.is_sysex_terminator() {
                    let message = SysexMessage {
                        cable: packet.cable(),
                        data: group.data,
                        fragments: group.fragments,
                    };
                    if last_in_buffer {
                        for held in held_back.drain(..) {
                            sink(held);
                        }
                        sink(message);
                        SysexStatus::Reassembled
                    } else {
                        held_back.push(message);
                        SysexStatus::Fragment
                    }
                } else {
                    self.open[cable] = Some(group);
                    if last_in_buffer {
                        for held in held_back.drain(..) {
                            sink(held);
                        }
                    }
                    SysexStatus::Fragment
                }
            } else {
                SysexStatus::None
            };

            decoded.events.push(MidiEvent {
                offset,
                packet,
                sysex,
            });
        }

        debug_assert!(held_back.is_empty());

        if !remainder.is_empty() {
            let start = buf.len() - remainder.len();
            decoded.diagnostics.push(Diagnostic::new(
                DiagnosticKind::UndecodedTrailingBytes,
                start..buf.len(),
            ));
        }

        decoded
    }

    /// Whether a fragment group is currently open for `cable`.
    pub fn has_open_group(&self, cable: u8) -> bool {
        self.open
            .get(cable as usize)
            .map(Option::is_some)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use usbaudio_class::conversation::{AUDIO_IF_SUBCLASS_MIDISTREAMING, IF_CLASS_AUDIO};

    fn midi_conv() -> Conversation {
        Conversation::new(IF_CLASS_AUDIO, AUDIO_IF_SUBCLASS_MIDISTREAMING)
    }

    #[test]
    fn plain_events_pass_through() {
        let conv = midi_conv();
        let mut dec = MidiStreamDecoder::new();
        let out = dec.decode_bulk(&conv, &[0x09, 0x90, 0x3C, 0x40, 0x08, 0x80, 0x3C, 0x00]);
        assert_eq!(out.consumed, 8);
        assert_eq!(out.events.len(), 2);
        assert!(out
            .events
            .iter()
            .all(|ev| ev.sysex == SysexStatus::None));
        assert!(out.messages.is_empty());
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn single_frame_sysex_delivers_immediately() {
        let conv = midi_conv();
        let mut dec = MidiStreamDecoder::new();
        let out = dec.decode_bulk(&conv, &[0x07, 0xF0, 0x01, 0xF7]);
        assert_eq!(out.events[0].sysex, SysexStatus::Reassembled);
        assert_eq!(out.messages.len(), 1);
        assert_eq!(out.messages[0].data, vec![0xF0, 0x01, 0xF7]);
        assert_eq!(out.messages[0].fragments, 1);
        assert!(!dec.has_open_group(0));
    }

    #[test]
    fn held_back_message_flushes_at_trailing_start_frame() {
        // A message completed before a later 0x4 frame must still be
        // delivered in this call even though that frame leaves its own
        // group open.
        let conv = midi_conv();
        let mut dec = MidiStreamDecoder::new();
        let out = dec.decode_bulk(
            &conv,
            &[
                0x06, 0xF0, 0xF7, 0x00, // cable 0 completes "F0 F7"
                0x14, 0xF0, 0x11, 0x22, // cable 1 starts a new message
            ],
        );
        assert_eq!(out.messages.len(), 1);
        assert_eq!(out.messages[0].cable, 0);
        assert_eq!(out.messages[0].data, vec![0xF0, 0xF7]);
        assert_eq!(out.events[0].sysex, SysexStatus::Fragment);
        assert!(dec.has_open_group(1));
    }

    #[test]
    fn non_midi_subclass_leaves_payload_undecoded() {
        let conv = Conversation::new(IF_CLASS_AUDIO, 0x02);
        let mut dec = MidiStreamDecoder::new();
        let out = dec.decode_bulk(&conv, &[0x09, 0x90, 0x3C, 0x40]);
        assert!(out.events.is_empty());
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(
            out.diagnostics[0].kind,
            DiagnosticKind::UndecodedPayload
        );
        assert_eq!(out.diagnostics[0].range, 0..4);
    }

    #[test]
    fn short_tail_is_flagged() {
        let conv = midi_conv();
        let mut dec = MidiStreamDecoder::new();
        let out = dec.decode_bulk(&conv, &[0x09, 0x90, 0x3C, 0x40, 0x09, 0x90]);
        assert_eq!(out.events.len(), 1);
        assert_eq!(out.consumed, 6);
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(
            out.diagnostics[0].kind,
            DiagnosticKind::UndecodedTrailingBytes
        );
        assert_eq!(out.diagnostics[0].range, 4..6);
    }
}
