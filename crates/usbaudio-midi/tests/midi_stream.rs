//! Bulk transfer reassembly scenarios.

use usbaudio_class::conversation::{
    Conversation, AUDIO_IF_SUBCLASS_MIDISTREAMING, IF_CLASS_AUDIO,
};
use usbaudio_midi::{MidiStreamDecoder, SysexStatus};

fn midi_conv() -> Conversation {
    Conversation::new(IF_CLASS_AUDIO, AUDIO_IF_SUBCLASS_MIDISTREAMING)
}

/// Build one event frame for `cable`/`code` with up to 3 MIDI bytes.
fn frame(cable: u8, code: u8, midi: &[u8]) -> [u8; 4] {
    let mut f = [cable << 4 | code, 0, 0, 0];
    f[1..1 + midi.len()].copy_from_slice(midi);
    f
}

#[test]
fn multi_frame_message_delivers_in_order() {
    let conv = midi_conv();
    let mut dec = MidiStreamDecoder::new();

    let mut buf = Vec::new();
    buf.extend_from_slice(&frame(0, 0x4, b"abc"));
    buf.extend_from_slice(&frame(0, 0x4, b"def"));
    buf.extend_from_slice(&frame(0, 0x6, b"gh"));
    buf.extend_from_slice(&frame(0, 0x5, b"i"));

    let out = dec.decode_bulk(&conv, &buf);
    assert_eq!(out.consumed, 16);
    assert_eq!(out.events.len(), 4);

    // The 0x6 frame completes the first message, but a later sysex frame
    // exists in the buffer, so delivery waits for the 0x5 frame.
    assert_eq!(out.events[0].sysex, SysexStatus::Fragment);
    assert_eq!(out.events[1].sysex, SysexStatus::Fragment);
    assert_eq!(out.events[2].sysex, SysexStatus::Fragment);
    assert_eq!(out.events[3].sysex, SysexStatus::Reassembled);

    assert_eq!(out.messages.len(), 2);
    assert_eq!(out.messages[0].data, b"abcdefgh".to_vec());
    assert_eq!(out.messages[0].fragments, 3);
    assert_eq!(out.messages[1].data, b"i".to_vec());
    assert_eq!(out.messages[1].fragments, 1);
    assert!(!dec.has_open_group(0));
}

#[test]
fn open_group_survives_across_transfers() {
    let conv = midi_conv();
    let mut dec = MidiStreamDecoder::new();

    let out = dec.decode_bulk(&conv, &frame(2, 0x4, b"abc"));
    assert!(out.messages.is_empty());
    assert_eq!(out.events[0].sysex, SysexStatus::Fragment);
    assert!(dec.has_open_group(2));

    let out = dec.decode_bulk(&conv, &frame(2, 0x5, b"d"));
    assert_eq!(out.events[0].sysex, SysexStatus::Reassembled);
    assert_eq!(out.messages.len(), 1);
    assert_eq!(out.messages[0].cable, 2);
    assert_eq!(out.messages[0].data, b"abcd".to_vec());
    assert_eq!(out.messages[0].fragments, 2);
    assert!(!dec.has_open_group(2));
}

#[test]
fn cables_reassemble_independently() {
    let conv = midi_conv();
    let mut dec = MidiStreamDecoder::new();

    let mut buf = Vec::new();
    buf.extend_from_slice(&frame(0, 0x4, b"abc"));
    buf.extend_from_slice(&frame(1, 0x4, b"xyz"));
    buf.extend_from_slice(&frame(0, 0x6, b"de"));
    buf.extend_from_slice(&frame(1, 0x7, b"uvw"));

    let out = dec.decode_bulk(&conv, &buf);
    assert_eq!(out.messages.len(), 2);
    assert_eq!(out.messages[0].cable, 0);
    assert_eq!(out.messages[0].data, b"abcde".to_vec());
    assert_eq!(out.messages[1].cable, 1);
    assert_eq!(out.messages[1].data, b"xyzuvw".to_vec());
}

#[test]
fn non_sysex_frames_interleave_without_disturbing_groups() {
    let conv = midi_conv();
    let mut dec = MidiStreamDecoder::new();

    let mut buf = Vec::new();
    buf.extend_from_slice(&frame(0, 0x4, b"abc"));
    buf.extend_from_slice(&frame(0, 0x9, &[0x90, 0x3C, 0x40]));
    buf.extend_from_slice(&frame(0, 0x5, b"d"));

    let out = dec.decode_bulk(&conv, &buf);
    assert_eq!(out.events[1].sysex, SysexStatus::None);
    assert_eq!(out.messages.len(), 1);
    assert_eq!(out.messages[0].data, b"abcd".to_vec());
}

#[test]
fn reserved_codes_are_three_byte_events() {
    // Codes 0x0 and 0x1 have no defined size; the decoder assumes they
    // fill the frame and treats them as plain events.
    let conv = midi_conv();
    let mut dec = MidiStreamDecoder::new();

    let mut buf = Vec::new();
    buf.extend_from_slice(&frame(0, 0x0, &[0xAA, 0xBB, 0xCC]));
    buf.extend_from_slice(&frame(0, 0x1, &[0xDD, 0xEE, 0xFF]));

    let out = dec.decode_bulk(&conv, &buf);
    assert_eq!(out.events.len(), 2);
    for ev in &out.events {
        assert_eq!(ev.sysex, SysexStatus::None);
        assert_eq!(ev.packet.payload().len(), 3);
    }
    assert!(out.messages.is_empty());
    assert!(out.diagnostics.is_empty());
}

#[test]
fn completed_message_never_outlives_its_call() {
    // A terminator followed by an unterminated 0x4 frame: the finished
    // message must come out of this call, while the new group stays open.
    let conv = midi_conv();
    let mut dec = MidiStreamDecoder::new();

    let mut buf = Vec::new();
    buf.extend_from_slice(&frame(0, 0x6, &[0xF0, 0xF7]));
    buf.extend_from_slice(&frame(0, 0x4, b"abc"));

    let out = dec.decode_bulk(&conv, &buf);
    assert_eq!(out.messages.len(), 1);
    assert_eq!(out.messages[0].data, vec![0xF0, 0xF7]);
    assert!(dec.has_open_group(0));

    let out = dec.decode_bulk(&conv, &frame(0, 0x7, b"def"));
    assert_eq!(out.messages.len(), 1);
    assert_eq!(out.messages[0].data, b"abcdef".to_vec());
}

#[test]
fn sink_receives_messages_as_they_complete() {
    let conv = midi_conv();
    let mut dec = MidiStreamDecoder::new();

    let mut buf = Vec::new();
    buf.extend_from_slice(&frame(0, 0x6, b"ab"));
    buf.extend_from_slice(&frame(0, 0x5, b"c"));

    let mut seen = Vec::new();
    let out = dec.decode_bulk_with(&conv, &buf, &mut |msg| seen.push(msg.data));
    assert!(out.messages.is_empty());
    assert_eq!(seen, vec![b"ab".to_vec(), b"c".to_vec()]);
}

#[test]
fn event_offsets_step_by_frame() {
    let conv = midi_conv();
    let mut dec = MidiStreamDecoder::new();

    let mut buf = Vec::new();
    buf.extend_from_slice(&frame(0, 0x9, &[0x90, 0x3C, 0x40]));
    buf.extend_from_slice(&frame(0, 0x8, &[0x80, 0x3C, 0x00]));
    buf.extend_from_slice(&frame(0, 0xC, &[0xC0, 0x05]));

    let out = dec.decode_bulk(&conv, &buf);
    let offsets: Vec<usize> = out.events.iter().map(|ev| ev.offset).collect();
    assert_eq!(offsets, vec![0, 4, 8]);
}
