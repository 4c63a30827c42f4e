//! USB-MIDI 4-byte event packets.

/// Every USB-MIDI bulk transfer is a sequence of fixed 4-byte frames.
pub const EVENT_FRAME_LEN: usize = 4;

/// Code index numbers with sysex reassembly semantics.
pub const CODE_SYSEX_START: u8 = 0x4;
pub const CODE_SYSEX_END_1: u8 = 0x5;
pub const CODE_SYSEX_END_2: u8 = 0x6;
pub const CODE_SYSEX_END_3: u8 = 0x7;

/// MIDI payload bytes per code index number. The USB MIDI specification
/// does not define a size for the reserved codes 0x0 and 0x1; they are
/// assumed to fill the frame (3 bytes).
const EVENT_SIZES: [usize; 16] = [3, 3, 2, 3, 3, 1, 2, 3, 3, 3, 3, 3, 2, 2, 3, 1];

pub(crate) fn is_sysex_code(code: u8) -> bool {
    (CODE_SYSEX_START..=CODE_SYSEX_END_3).contains(&code)
}

/// One 4-byte event frame: cable number and code index in the first byte,
/// up to three MIDI bytes after it, zero-padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventPacket {
    raw: [u8; 4],
}

impl EventPacket {
    pub fn new(raw: [u8; 4]) -> Self {
        EventPacket { raw }
    }

    /// Virtual cable number, 0..=15.
    pub fn cable(&self) -> u8 {
        self.raw[0] >> 4
    }

    /// Code index number, 0..=15.
    pub fn code_index(&self) -> u8 {
        self.raw[0] & 0x0F
    }

    /// Number of MIDI bytes this frame carries.
    pub fn event_size(&self) -> usize {
        EVENT_SIZES[self.code_index() as usize]
    }

    /// The MIDI bytes, without the frame padding.
    pub fn payload(&self) -> &[u8] {
        &self.raw[1..1 + self.event_size()]
    }

    /// Unused tail bytes of the frame.
    pub fn padding(&self) -> &[u8] {
        &self.raw[1 + self.event_size()..]
    }

    pub fn is_sysex(&self) -> bool {
        is_sysex_code(self.code_index())
    }

    /// True for the codes that close a sysex fragment group (0x5/0x6/0x7).
    pub fn is_sysex_terminator(&self) -> bool {
        (CODE_SYSEX_END_1..=CODE_SYSEX_END_3).contains(&self.code_index())
    }

    pub fn raw(&self) -> &[u8; 4] {
        &self.raw
    }
}
