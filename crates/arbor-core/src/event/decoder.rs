//! The state machine turning raw input into keys using a profile.
//!
//! The decoder cannot know whether more bytes are coming, so resolution of
//! an ambiguous prefix (a buffer that fully matches one pattern but could
//! still extend into a longer one) is driven by the caller: pass
//! `quiescent = true` to [`decode`], or call [`Decoder::flush`], once the
//! transport reports no pending input. No timeout lives in the core.

use tracing::trace;

use crate::event::{key::Key, profile::Profile};

/// Outcome of matching the pending buffer against a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeResult {
    /// A complete sequence was recognized, consuming this many characters.
    Matched(Key, usize),
    /// The buffer is a strict prefix of at least one longer sequence; hold
    /// the characters and wait for more input or quiescence.
    NeedMoreInput,
    /// The leading character participates in no pattern; consume one
    /// character and decode it literally.
    NoMatch,
}

/// Match the pending buffer against a profile.
///
/// Among all patterns whose sequence is a prefix of the buffer, the longest
/// full match wins. While any longer pattern could still extend the buffer
/// the decoder reports [`DecodeResult::NeedMoreInput`] rather than
/// committing a shorter match; `quiescent` releases that hold.
pub fn decode(profile: &Profile, buf: &[char], quiescent: bool) -> DecodeResult {
    if buf.is_empty() {
        return DecodeResult::NeedMoreInput;
    }

    let mut best: Option<(Key, usize)> = None;
    let mut extendable = false;
    for pattern in profile.patterns() {
        let seq = pattern.sequence();
        if seq.len() <= buf.len() {
            if buf[..seq.len()] == *seq && best.is_none_or(|(_, len)| seq.len() > len) {
                best = Some((pattern.key(), seq.len()));
            }
        } else if seq[..buf.len()] == *buf {
            extendable = true;
        }
    }

    if extendable && !quiescent {
        return DecodeResult::NeedMoreInput;
    }
    match best {
        Some((key, len)) => {
            trace!(?key, len, "decode commit");
            DecodeResult::Matched(key, len)
        }
        None => DecodeResult::NoMatch,
    }
}

/// Consumes a live character stream against a profile and yields keys.
///
/// Characters that might begin a longer sequence are buffered across calls
/// to [`Decoder::push`]; the caller signals input quiescence with
/// [`Decoder::flush`], which resolves anything still pending. Unknown or
/// garbled sequences never abort decoding: they degrade to literal
/// [`Key::Char`] values or [`Key::Unknown`] and decoding resumes at the
/// next boundary.
#[derive(Debug)]
pub struct Decoder {
    /// The composed profile to match against.
    profile: Profile,
    /// Characters held while a sequence may still extend.
    pending: Vec<char>,
}

impl Decoder {
    /// Construct a decoder over a profile.
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            pending: Vec::new(),
        }
    }

    /// Number of characters currently held.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Feed one character, returning any keys that became unambiguous.
    pub fn push(&mut self, c: char) -> Vec<Key> {
        self.pending.push(c);
        self.drain(false)
    }

    /// Feed a run of characters.
    pub fn feed(&mut self, input: &str) -> Vec<Key> {
        let mut out = Vec::new();
        for c in input.chars() {
            out.append(&mut self.push(c));
        }
        out
    }

    /// Resolve everything still pending. Call when the transport reports
    /// that no more input is available right now.
    pub fn flush(&mut self) -> Vec<Key> {
        self.drain(true)
    }

    /// Decode as much of the pending buffer as the policy allows.
    fn drain(&mut self, quiescent: bool) -> Vec<Key> {
        let mut out = Vec::new();
        while !self.pending.is_empty() {
            match decode(&self.profile, &self.pending, quiescent) {
                DecodeResult::Matched(key, len) => {
                    self.pending.drain(..len);
                    out.push(key);
                }
                DecodeResult::NeedMoreInput => break,
                DecodeResult::NoMatch => {
                    let c = self.pending.remove(0);
                    out.push(literal(c));
                }
            }
        }
        out
    }
}

/// Decode a single unmatched character.
fn literal(c: char) -> Key {
    if c.is_control() {
        Key::Unknown
    } else {
        Key::Char(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::profile::Pattern;

    fn arrow_profile() -> Profile {
        let mut p = Profile::new();
        p.push(Pattern::new("\u{1b}[A", Key::Up));
        p
    }

    #[test]
    fn prefix_correctness() {
        let p = arrow_profile();
        let buf: Vec<char> = "\u{1b}".chars().collect();
        assert_eq!(decode(&p, &buf, false), DecodeResult::NeedMoreInput);
        let buf: Vec<char> = "\u{1b}[".chars().collect();
        assert_eq!(decode(&p, &buf, false), DecodeResult::NeedMoreInput);
        let buf: Vec<char> = "\u{1b}[A".chars().collect();
        assert_eq!(decode(&p, &buf, false), DecodeResult::Matched(Key::Up, 3));
    }

    #[test]
    fn ambiguous_prefix_resolution() {
        let mut p = Profile::new();
        p.push(Pattern::new("\u{1b}[1~", Key::Home));
        p.push(Pattern::new("\u{1b}[A", Key::Up));

        let buf: Vec<char> = "\u{1b}[".chars().collect();
        assert_eq!(decode(&p, &buf, false), DecodeResult::NeedMoreInput);

        let buf: Vec<char> = "\u{1b}[1~".chars().collect();
        assert_eq!(decode(&p, &buf, false), DecodeResult::Matched(Key::Home, 4));
    }

    #[test]
    fn shorter_match_waits_for_quiescence() {
        let mut p = Profile::new();
        p.push(Pattern::new("\u{1b}[1~", Key::Home));
        p.push(Pattern::new("\u{1b}[1", Key::Unknown));

        let buf: Vec<char> = "\u{1b}[1".chars().collect();
        assert_eq!(decode(&p, &buf, false), DecodeResult::NeedMoreInput);
        assert_eq!(
            decode(&p, &buf, true),
            DecodeResult::Matched(Key::Unknown, 3)
        );
    }

    #[test]
    fn longest_full_match_wins() {
        let mut p = Profile::new();
        p.push(Pattern::new("\u{1b}[1", Key::Unknown));
        p.push(Pattern::new("\u{1b}[1~", Key::Home));

        let buf: Vec<char> = "\u{1b}[1~x".chars().collect();
        assert_eq!(decode(&p, &buf, false), DecodeResult::Matched(Key::Home, 4));
    }

    #[test]
    fn decoder_buffers_and_emits() {
        let mut d = Decoder::new(arrow_profile());
        assert!(d.push('\u{1b}').is_empty());
        assert!(d.push('[').is_empty());
        assert_eq!(d.pending(), 2);
        assert_eq!(d.push('A'), vec![Key::Up]);
        assert_eq!(d.pending(), 0);
    }

    #[test]
    fn literal_text_passes_through() {
        let mut d = Decoder::new(Profile::common());
        assert_eq!(
            d.feed("hi"),
            vec![Key::Char('h'), Key::Char('i')]
        );
    }

    #[test]
    fn bare_escape_flushes_to_unknown() {
        let mut d = Decoder::new(Profile::common());
        assert!(d.push('\u{1b}').is_empty());
        assert_eq!(d.flush(), vec![Key::Unknown]);
        assert_eq!(d.pending(), 0);
    }

    #[test]
    fn garbled_sequence_degrades_and_resumes() {
        let mut d = Decoder::new(Profile::common());
        // ESC [ does not extend into any pattern with 'q'; the held prefix
        // degrades character by character and decoding resumes.
        let keys = d.feed("\u{1b}[qa");
        assert_eq!(
            keys,
            vec![Key::Unknown, Key::Char('['), Key::Char('q'), Key::Char('a')]
        );
    }

    #[test]
    fn control_input_decodes_to_unknown() {
        let mut d = Decoder::new(Profile::common());
        assert_eq!(d.feed("\u{1}"), vec![Key::Unknown]);
    }

    #[test]
    fn putty_home_end() {
        let mut d = Decoder::new(Profile::putty());
        assert_eq!(d.feed("\u{1b}[1~"), vec![Key::Home]);
        assert_eq!(d.feed("\u{1b}[4~"), vec![Key::End]);
    }

    #[test]
    fn interleaved_text_and_sequences() {
        let mut d = Decoder::new(Profile::common());
        let mut keys = d.feed("a\u{1b}[Ab\t");
        keys.append(&mut d.flush());
        assert_eq!(
            keys,
            vec![Key::Char('a'), Key::Up, Key::Char('b'), Key::Tab]
        );
    }
}
