//! Value-to-name lookups for rendered output.
//!
//! Unknown values return `None`; callers decide whether to print the raw
//! number. These tables are data only; no decoding logic consults them.

use crate::descriptor::{control, midi, streaming};

pub fn subclass_name(subclass: u8) -> Option<&'static str> {
    Some(match subclass {
        0x00 => "Undefined",
        0x01 => "Audio Control",
        0x02 => "Audio Streaming",
        0x03 => "MIDI Streaming",
        _ => return None,
    })
}

pub fn ac_subtype_name(subtype: u8) -> Option<&'static str> {
    Some(match subtype {
        control::SUBTYPE_HEADER => "Header Descriptor",
        control::SUBTYPE_INPUT_TERMINAL => "Input terminal descriptor",
        control::SUBTYPE_OUTPUT_TERMINAL => "Output terminal descriptor",
        control::SUBTYPE_MIXER_UNIT => "Mixer unit descriptor",
        control::SUBTYPE_SELECTOR_UNIT => "Selector unit descriptor",
        control::SUBTYPE_FEATURE_UNIT => "Feature unit descriptor",
        control::SUBTYPE_EFFECT_UNIT => "Effect unit descriptor",
        control::SUBTYPE_PROCESSING_UNIT => "Processing unit descriptor",
        control::SUBTYPE_EXTENSION_UNIT => "Extension unit descriptor",
        control::SUBTYPE_CLOCK_SOURCE => "Clock source descriptor",
        control::SUBTYPE_CLOCK_SELECTOR => "Clock selector descriptor",
        control::SUBTYPE_CLOCK_MULTIPLIER => "Clock multiplier descriptor",
        control::SUBTYPE_SAMPLE_RATE_CONVERTER => "Sample rate converter descriptor",
        _ => return None,
    })
}

pub fn as_subtype_name(subtype: u8) -> Option<&'static str> {
    Some(match subtype {
        streaming::SUBTYPE_GENERAL => "General AS Descriptor",
        streaming::SUBTYPE_FORMAT_TYPE => "Format type descriptor",
        streaming::SUBTYPE_ENCODER => "Encoder descriptor",
        _ => return None,
    })
}

pub fn as_ep_subtype_name(subtype: u8) -> Option<&'static str> {
    match subtype {
        streaming::EP_SUBTYPE_GENERAL => Some("General Descriptor"),
        _ => None,
    }
}

pub fn ms_subtype_name(subtype: u8) -> Option<&'static str> {
    Some(match subtype {
        midi::SUBTYPE_HEADER => "Header Descriptor",
        midi::SUBTYPE_MIDI_IN_JACK => "MIDI IN Jack descriptor",
        midi::SUBTYPE_MIDI_OUT_JACK => "MIDI OUT Jack descriptor",
        midi::SUBTYPE_ELEMENT => "MIDI Element descriptor",
        _ => return None,
    })
}

pub fn ms_ep_subtype_name(subtype: u8) -> Option<&'static str> {
    match subtype {
        midi::EP_SUBTYPE_GENERAL => Some("General Descriptor"),
        _ => None,
    }
}

pub fn jack_type_name(jack_type: u8) -> Option<&'static str> {
    match jack_type {
        0x01 => Some("Embedded"),
        0x02 => Some("External"),
        _ => None,
    }
}

/// Table A-7 of the audio class specification (function categories).
pub fn function_category_name(category: u8) -> Option<&'static str> {
    Some(match category {
        0x00 => "Undefined",
        0x01 => "Desktop speaker",
        0x02 => "Home theater",
        0x03 => "Microphone",
        0x04 => "Headset",
        0x05 => "Telephone",
        0x06 => "Converter",
        0x07 => "Voice/Sound recorder",
        0x08 => "I/O box",
        0x09 => "Musical instrument",
        0x0A => "Pro-audio",
        0x0B => "Audio/Video",
        0x0C => "Control panel",
        0xFF => "Other",
        _ => return None,
    })
}

pub fn clock_type_name(clock_type: u8) -> Option<&'static str> {
    Some(match clock_type {
        0x00 => "External clock",
        0x01 => "Internal fixed clock",
        0x02 => "Internal variable clock",
        0x03 => "Internal programmable clock",
        _ => return None,
    })
}

pub fn lock_delay_unit_name(units: u8) -> Option<&'static str> {
    Some(match units {
        0 => "Undefined",
        1 => "Milliseconds",
        2 => "Decoded PCM samples",
        _ => return None,
    })
}

/// Terminal type codes (termt10.pdf).
pub fn terminal_type_name(terminal_type: u16) -> Option<&'static str> {
    Some(match terminal_type {
        0x0100 => "USB Undefined",
        0x0101 => "USB Streaming",
        0x01FF => "USB vendor specific",
        0x0200 => "Input Undefined",
        0x0201 => "Microphone",
        0x0202 => "Desktop Microphone",
        0x0203 => "Personal microphone",
        0x0204 => "Omni-directional microphone",
        0x0205 => "Microphone array",
        0x0206 => "Processing microphone array",
        0x0300 => "Output Undefined",
        0x0301 => "Speaker",
        0x0302 => "Headphones",
        0x0303 => "Head Mounted Display Audio",
        0x0304 => "Desktop speaker",
        0x0305 => "Room speaker",
        0x0306 => "Communication speaker",
        0x0307 => "Low frequency effects speaker",
        0x0400 => "Bi-directional Undefined",
        0x0401 => "Handset",
        0x0402 => "Headset",
        0x0403 => "Speakerphone, no echo reduction",
        0x0404 => "Echo-suppressing speakerphone",
        0x0405 => "Echo-canceling speakerphone",
        0x0500 => "Telephony Undefined",
        0x0501 => "Phone line",
        0x0502 => "Telephone",
        0x0503 => "Down Line Phone",
        0x0600 => "External Undefined",
        0x0601 => "Analog connector",
        0x0602 => "Digital audio interface",
        0x0603 => "Line connector",
        0x0604 => "Legacy audio connector",
        0x0605 => "S/PDIF interface",
        0x0606 => "1394 DA stream",
        0x0607 => "1394 DV stream soundtrack",
        0x0700 => "Embedded Undefined",
        0x0701 => "Level Calibration Noise Source",
        0x0702 => "Equalization Noise",
        0x0703 => "CD player",
        0x0704 => "DAT",
        0x0705 => "DCC",
        0x0706 => "MiniDisk",
        0x0707 => "Analog Tape",
        0x0708 => "Phonograph",
        0x0709 => "VCR Audio",
        0x070A => "Video Disc Audio",
        0x070B => "DVD Audio",
        0x070C => "TV Tuner Audio",
        0x070D => "Satellite Receiver Audio",
        0x070E => "Cable Tuner Audio",
        0x070F => "DSS Audio",
        0x0710 => "Radio Receiver",
        0x0711 => "Radio Transmitter",
        0x0712 => "Multi-track Recorder",
        0x0713 => "Synthesizer",
        _ => return None,
    })
}

/// wFormatTag codes (frmts10.pdf).
pub fn format_tag_name(tag: u16) -> Option<&'static str> {
    Some(match tag {
        0x0000 => "Type I Undefined",
        0x0001 => "PCM",
        0x0002 => "PCM8",
        0x0003 => "IEEE Float",
        0x0004 => "ALAW",
        0x0005 => "MULAW",
        0x1000 => "Type II Undefined",
        0x1001 => "MPEG",
        0x1002 => "AC-3",
        0x2000 => "Type III Undefined",
        0x2001 => "IEC1937 AC-3",
        0x2002 => "IEC1937 MPEG-1 Layer1",
        0x2003 => "IEC1937 MPEG-1 Layer2/3 or IEC1937 MPEG-2 NOEXT",
        0x2004 => "IEC1937 MPEG-2 EXT",
        0x2005 => "IEC1937 MPEG-2 Layer1 LS",
        0x2006 => "IEC1937 MPEG-2 Layer2/3 LS",
        _ => return None,
    })
}

/// USB-MIDI event packet code index numbers.
pub fn code_index_name(code: u8) -> Option<&'static str> {
    Some(match code {
        0x0 => "Miscellaneous (Reserved)",
        0x1 => "Cable events (Reserved)",
        0x2 => "Two-byte System Common message",
        0x3 => "Three-byte System Common message",
        0x4 => "SysEx starts or continues",
        0x5 => "SysEx ends with following single byte/Single-byte System Common Message",
        0x6 => "SysEx ends with following two bytes",
        0x7 => "SysEx ends with following three bytes",
        0x8 => "Note-off",
        0x9 => "Note-on",
        0xA => "Poly-KeyPress",
        0xB => "Control Change",
        0xC => "Program Change",
        0xD => "Channel Pressure",
        0xE => "PitchBend Change",
        0xF => "Single Byte",
        _ => return None,
    })
}
