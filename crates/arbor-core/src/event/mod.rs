//! Keyboard input: the key model, terminal profiles, and the decoder.

pub mod decoder;
pub mod key;
pub mod profile;

pub use decoder::{DecodeResult, Decoder, decode};
pub use key::Key;
pub use profile::{Cap, MatchKind, Pattern, Profile, TermCaps};
