//! Decoders for USB audio class-specific descriptors.
//!
//! The audio class squeezes three different functions (audio control,
//! audio streaming and MIDI streaming) into one interface class and
//! revised most descriptor layouts between the 1.0 and 2.0 releases
//! without bumping any version field in the descriptors themselves. The
//! negotiated version only appears in the class-specific header
//! descriptor, so decoding is stateful: a [`Conversation`] tracks the
//! class release per interface and every later descriptor on that
//! conversation is decoded against it.
//!
//! [`decode_descriptor`] is the entry point. It never reads past the
//! length a descriptor declares, and it reports everything suspicious it
//! finds (truncation, undecoded bytes, impossible lengths) as
//! [`Diagnostic`]s on the result instead of failing the decode.

pub mod bitfield;
pub mod conversation;
pub mod descriptor;
pub mod diag;
pub mod reader;
pub mod vals;

pub use conversation::{AudioProtocol, ClassState, Conversation, Subclass};
pub use descriptor::{decode_descriptor, DecodedDescriptor, DescriptorTag, Entity};
pub use diag::{Diagnostic, DiagnosticKind, Severity};
