#![cfg(not(target_arch = "wasm32"))]

use proptest::prelude::*;

use usbaudio_class::conversation::{
    AudioProtocol, ClassState, Conversation, AUDIO_IF_SUBCLASS_AUDIOCONTROL, IF_CLASS_AUDIO,
};
use usbaudio_class::descriptor::decode_descriptor;
use usbaudio_class::diag::DiagnosticKind;
use usbaudio_class::Entity;

fn control_conv() -> Conversation {
    let mut conv = Conversation::new(IF_CLASS_AUDIO, AUDIO_IF_SUBCLASS_AUDIOCONTROL);
    conv.class_state = ClassState::Audio(AudioProtocol {
        audio_major: 1,
        midi_major: 0,
    });
    conv
}

fn feature_unit_bytes(control_size: u8, channels: usize, fill: u8) -> Vec<u8> {
    let declared = 7 + (channels + 1) * control_size as usize;
    let mut buf = vec![declared as u8, 0x24, 0x06, 1, 2, control_size];
    buf.extend(std::iter::repeat(fill).take((channels + 1) * control_size as usize));
    buf.push(0);
    buf
}

proptest! {
    #[test]
    fn well_formed_lengths_decode_every_channel(
        control_size in 1u8..=4,
        channels in 0usize..=8,
        fill in any::<u8>(),
    ) {
        let buf = feature_unit_bytes(control_size, channels, fill);
        let mut conv = control_conv();
        let d = decode_descriptor(&buf, &mut conv).unwrap();
        prop_assert_eq!(d.consumed(), buf.len());
        prop_assert!(d.diagnostics.is_empty());
        match d.entity {
            Entity::FeatureUnit(f) => {
                prop_assert_eq!(f.control_size, control_size);
                prop_assert_eq!(f.bma_controls.len(), channels + 1);
                for entry in &f.bma_controls {
                    prop_assert_eq!(entry.len(), control_size as usize);
                    prop_assert!(entry.iter().all(|&b| b == fill));
                }
            }
            other => prop_assert!(false, "unexpected entity: {:?}", other),
        }
    }

    #[test]
    fn lengths_that_do_not_reconstruct_are_rejected(
        control_size in 2u8..=4,
        channels in 0usize..=8,
    ) {
        // Shrink the declared length by one so the channel equation cannot
        // hold for any control size above one.
        let mut buf = feature_unit_bytes(control_size, channels, 0);
        let declared = buf[0] as usize - 1;
        buf[0] = declared as u8;
        buf.truncate(declared);
        let mut conv = control_conv();
        let d = decode_descriptor(&buf, &mut conv).unwrap();
        prop_assert_eq!(d.consumed(), declared);
        prop_assert!(d
            .diagnostics
            .iter()
            .any(|diag| diag.kind == DiagnosticKind::InvalidFeatureUnitLength));
    }
}
