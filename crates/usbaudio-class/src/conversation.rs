//! Per-conversation protocol state.
//!
//! The host's conversation table owns one [`Conversation`] per logical USB
//! interface/session and passes it (mutably) into every decode call. The
//! class state is a typed enum: once a conversation is claimed by another
//! class family the audio decoders decline instead of reinterpreting it.

/// bInterfaceClass for the audio class.
pub const IF_CLASS_AUDIO: u8 = 0x01;

pub const AUDIO_IF_SUBCLASS_UNDEFINED: u8 = 0x00;
pub const AUDIO_IF_SUBCLASS_AUDIOCONTROL: u8 = 0x01;
pub const AUDIO_IF_SUBCLASS_AUDIOSTREAMING: u8 = 0x02;
pub const AUDIO_IF_SUBCLASS_MIDISTREAMING: u8 = 0x03;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subclass {
    Undefined,
    AudioControl,
    AudioStreaming,
    MidiStreaming,
    Other(u8),
}

impl Subclass {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            AUDIO_IF_SUBCLASS_UNDEFINED => Subclass::Undefined,
            AUDIO_IF_SUBCLASS_AUDIOCONTROL => Subclass::AudioControl,
            AUDIO_IF_SUBCLASS_AUDIOSTREAMING => Subclass::AudioStreaming,
            AUDIO_IF_SUBCLASS_MIDISTREAMING => Subclass::MidiStreaming,
            other => Subclass::Other(other),
        }
    }
}

/// Negotiated major versions, taken from the class-specific header
/// descriptors. 0 means "not seen yet". The audio (control/streaming) and
/// MIDI versions are negotiated independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioProtocol {
    pub audio_major: u8,
    pub midi_major: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClassState {
    #[default]
    Unclaimed,
    Audio(AudioProtocol),
    /// Some other USB class already owns this conversation.
    OtherClass,
}

#[derive(Debug, Clone)]
pub struct Conversation {
    pub interface_class: u8,
    pub interface_subclass: Subclass,
    pub class_state: ClassState,
}

impl Conversation {
    pub fn new(interface_class: u8, interface_subclass: u8) -> Self {
        Conversation {
            interface_class,
            interface_subclass: Subclass::from_raw(interface_subclass),
            class_state: ClassState::Unclaimed,
        }
    }

    /// Claim this conversation for the audio class, or return the existing
    /// audio state. `None` means another class already owns it; the caller
    /// must decode nothing.
    pub(crate) fn claim_audio(&mut self) -> Option<&mut AudioProtocol> {
        if matches!(self.class_state, ClassState::Unclaimed) {
            self.class_state = ClassState::Audio(AudioProtocol::default());
        }
        match &mut self.class_state {
            ClassState::Audio(proto) => Some(proto),
            _ => None,
        }
    }

    /// Audio state, if this conversation has been claimed for audio.
    pub fn audio_protocol(&self) -> Option<AudioProtocol> {
        match self.class_state {
            ClassState::Audio(proto) => Some(proto),
            _ => None,
        }
    }
}

/// Decimal value of one BCD 4/4 byte (0x20 -> 20). Version fields on the
/// wire are BCD-coded (bcdADC, bcdMSC); the layout is selected by the major
/// part alone.
pub(crate) fn bcd44_to_dec(byte: u8) -> u8 {
    (byte >> 4) * 10 + (byte & 0x0F)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_is_idempotent_for_audio() {
        let mut conv = Conversation::new(IF_CLASS_AUDIO, AUDIO_IF_SUBCLASS_AUDIOCONTROL);
        conv.claim_audio().unwrap().audio_major = 2;
        let proto = conv.claim_audio().unwrap();
        assert_eq!(proto.audio_major, 2);
    }

    #[test]
    fn other_class_is_never_reclaimed() {
        let mut conv = Conversation::new(IF_CLASS_AUDIO, AUDIO_IF_SUBCLASS_AUDIOCONTROL);
        conv.class_state = ClassState::OtherClass;
        assert!(conv.claim_audio().is_none());
        assert_eq!(conv.class_state, ClassState::OtherClass);
    }

    #[test]
    fn bcd_majors() {
        assert_eq!(bcd44_to_dec(0x01), 1);
        assert_eq!(bcd44_to_dec(0x02), 2);
        assert_eq!(bcd44_to_dec(0x10), 10);
    }
}
