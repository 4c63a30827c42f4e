//! USB-MIDI bulk stream decoding.
//!
//! A MIDI streaming endpoint moves fixed 4-byte event frames
//! ([`EventPacket`]): cable number and code index in the head byte, up to
//! three MIDI bytes behind it. Most frames are self-contained; the sysex
//! codes (0x4..=0x7) instead carry fragments of a system-exclusive
//! message that [`MidiStreamDecoder`] reassembles per virtual cable,
//! across bulk transfers when necessary.

pub mod event;
pub mod sysex;

pub use event::EventPacket;
pub use sysex::{BulkDecoded, MidiEvent, MidiStreamDecoder, SysexMessage, SysexStatus};
