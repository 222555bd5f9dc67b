//! Terminal profiles: ordered, composable sets of raw-sequence patterns.
//!
//! A [`Profile`] maps raw character sequences to [`Key`] values for one
//! terminal capability family. Profiles compose by pushing patterns in
//! order: a later pattern with an identical sequence replaces the earlier
//! one, which is how a capability-derived profile supersedes a generic
//! default. Profiles are immutable once handed to a decoder.

use tracing::debug;

use crate::event::key::Key;

/// The escape control character.
pub const ESC: char = '\u{1b}';

/// How a pattern participates in ambiguity resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// No other pattern extends this sequence; a full match commits.
    Exact,
    /// Some longer pattern starts with this sequence; a full match must
    /// wait for quiescence before committing.
    PrefixSensitive,
}

/// One raw character sequence mapped to one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// Raw characters, in arrival order.
    sequence: Vec<char>,
    /// Key produced on a match.
    key: Key,
    /// Match discipline. Maintained by [`Profile`] composition.
    kind: MatchKind,
}

impl Pattern {
    /// Construct a pattern for a raw sequence.
    pub fn new(sequence: &str, key: Key) -> Self {
        Self {
            sequence: sequence.chars().collect(),
            key,
            kind: MatchKind::Exact,
        }
    }

    /// The raw sequence.
    pub fn sequence(&self) -> &[char] {
        &self.sequence
    }

    /// The key this pattern produces.
    pub fn key(&self) -> Key {
        self.key
    }

    /// The match discipline after profile composition.
    pub fn kind(&self) -> MatchKind {
        self.kind
    }
}

/// Logical key capabilities a terminal database can supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cap {
    /// Cursor up.
    CursorUp,
    /// Cursor down.
    CursorDown,
    /// Cursor left.
    CursorLeft,
    /// Cursor right.
    CursorRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Insert.
    Insert,
    /// Delete.
    Delete,
    /// Shift-tab.
    ReverseTab,
}

/// Lookup from a logical capability to its raw escape string.
///
/// Escape strings use the two-character `\E` placeholder for the escape
/// control character; [`Profile::from_caps`] decodes it before pattern
/// construction. Implementations live outside the core.
pub trait TermCaps {
    /// The raw escape string for `cap`, or `None` if the terminal lacks it.
    fn sequence(&self, cap: Cap) -> Option<String>;
}

/// Replace the `\E` placeholder with the escape control character.
fn decode_placeholders(raw: &str) -> Vec<char> {
    raw.replace("\\E", "\u{1b}").chars().collect()
}

/// An ordered, composable set of patterns for a terminal type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    /// Patterns in composition order. Sequences are unique.
    patterns: Vec<Pattern>,
}

impl Profile {
    /// An empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// The composed pattern list.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Add a pattern, replacing any earlier pattern with the same sequence.
    pub fn push(&mut self, pattern: Pattern) {
        if let Some(existing) = self
            .patterns
            .iter_mut()
            .find(|p| p.sequence == pattern.sequence)
        {
            debug!(sequence = ?pattern.sequence, "pattern override");
            existing.key = pattern.key;
        } else {
            self.patterns.push(pattern);
        }
        self.retag();
    }

    /// Add a sequence/key mapping.
    pub fn add(&mut self, sequence: &str, key: Key) {
        self.push(Pattern::new(sequence, key));
    }

    /// Compose another profile on top of this one.
    pub fn extend(&mut self, other: Self) {
        for pattern in other.patterns {
            self.push(pattern);
        }
    }

    /// Recompute match disciplines so the tags stay truthful: a pattern is
    /// prefix-sensitive exactly when another pattern strictly extends it.
    fn retag(&mut self) {
        let sequences: Vec<Vec<char>> = self.patterns.iter().map(|p| p.sequence.clone()).collect();
        for pattern in &mut self.patterns {
            let extended = sequences.iter().any(|s| {
                s.len() > pattern.sequence.len() && s.starts_with(&pattern.sequence)
            });
            pattern.kind = if extended {
                MatchKind::PrefixSensitive
            } else {
                MatchKind::Exact
            };
        }
    }

    /// The shared xterm-ish base profile: CSI and SS3 cursor keys,
    /// tilde-coded editing keys, and the single-character controls.
    pub fn common() -> Self {
        let mut p = Self::new();
        p.add("\u{1b}[A", Key::Up);
        p.add("\u{1b}[B", Key::Down);
        p.add("\u{1b}[C", Key::Right);
        p.add("\u{1b}[D", Key::Left);
        p.add("\u{1b}OA", Key::Up);
        p.add("\u{1b}OB", Key::Down);
        p.add("\u{1b}OC", Key::Right);
        p.add("\u{1b}OD", Key::Left);
        p.add("\u{1b}[H", Key::Home);
        p.add("\u{1b}[F", Key::End);
        p.add("\u{1b}OH", Key::Home);
        p.add("\u{1b}OF", Key::End);
        p.add("\u{1b}[Z", Key::BackTab);
        p.add("\u{1b}[2~", Key::Insert);
        p.add("\u{1b}[3~", Key::Delete);
        p.add("\u{1b}[5~", Key::PageUp);
        p.add("\u{1b}[6~", Key::PageDown);
        p.add("\t", Key::Tab);
        p.add("\r", Key::Enter);
        p.add("\n", Key::Enter);
        p.add("\u{7f}", Key::Backspace);
        p
    }

    /// The common profile plus PuTTY's Home/End recognition.
    pub fn putty() -> Self {
        let mut p = Self::common();
        p.add("\u{1b}[1~", Key::Home);
        p.add("\u{1b}[4~", Key::End);
        p
    }

    /// Build a profile from a terminal capability lookup.
    ///
    /// Capabilities the terminal lacks are skipped. Tab, Enter, and
    /// Backspace are not in the capability database and are added
    /// statically.
    pub fn from_caps(caps: &dyn TermCaps) -> Self {
        const KEYS: &[(Cap, Key)] = &[
            (Cap::CursorUp, Key::Up),
            (Cap::CursorDown, Key::Down),
            (Cap::CursorRight, Key::Right),
            (Cap::CursorLeft, Key::Left),
            (Cap::ReverseTab, Key::BackTab),
            (Cap::Insert, Key::Insert),
            (Cap::Delete, Key::Delete),
            (Cap::Home, Key::Home),
            (Cap::End, Key::End),
            (Cap::PageUp, Key::PageUp),
            (Cap::PageDown, Key::PageDown),
        ];

        let mut p = Self::new();
        for &(cap, key) in KEYS {
            if let Some(raw) = caps.sequence(cap) {
                p.push(Pattern {
                    sequence: decode_placeholders(&raw),
                    key,
                    kind: MatchKind::Exact,
                });
            }
        }
        p.add("\t", Key::Tab);
        p.add("\r", Key::Enter);
        p.add("\n", Key::Enter);
        p.add("\u{7f}", Key::Backspace);
        p
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn later_pattern_overrides_earlier() {
        let mut p = Profile::new();
        p.add("\u{1b}[H", Key::Home);
        p.add("\u{1b}[H", Key::End);
        assert_eq!(p.patterns().len(), 1);
        assert_eq!(p.patterns()[0].key(), Key::End);
    }

    #[test]
    fn composed_profiles_have_unique_sequences() {
        let mut p = Profile::common();
        p.extend(Profile::putty());
        let mut seen = HashSet::new();
        for pattern in p.patterns() {
            assert!(
                seen.insert(pattern.sequence().to_vec()),
                "duplicate sequence {:?}",
                pattern.sequence()
            );
        }
    }

    #[test]
    fn prefix_sensitivity_is_derived() {
        let mut p = Profile::new();
        p.add("\u{1b}[1~", Key::Home);
        p.add("\u{1b}[1", Key::Unknown);
        let short = p
            .patterns()
            .iter()
            .find(|pat| pat.sequence().len() == 3)
            .unwrap();
        assert_eq!(short.kind(), MatchKind::PrefixSensitive);
        let long = p
            .patterns()
            .iter()
            .find(|pat| pat.sequence().len() == 4)
            .unwrap();
        assert_eq!(long.kind(), MatchKind::Exact);
    }

    #[test]
    fn putty_overrides_home_and_end() {
        let p = Profile::putty();
        let home: Vec<char> = "\u{1b}[1~".chars().collect();
        assert!(
            p.patterns()
                .iter()
                .any(|pat| pat.sequence() == home && pat.key() == Key::Home)
        );
    }

    struct FakeCaps;

    impl TermCaps for FakeCaps {
        fn sequence(&self, cap: Cap) -> Option<String> {
            match cap {
                Cap::CursorUp => Some("\\E[A".into()),
                Cap::Home => Some("\\EOH".into()),
                _ => None,
            }
        }
    }

    #[test]
    fn caps_placeholder_is_decoded() {
        let p = Profile::from_caps(&FakeCaps);
        let up: Vec<char> = "\u{1b}[A".chars().collect();
        assert!(
            p.patterns()
                .iter()
                .any(|pat| pat.sequence() == up && pat.key() == Key::Up)
        );
        // Tab/Enter/Backspace statics are always present.
        let tab: Vec<char> = "\t".chars().collect();
        assert!(p.patterns().iter().any(|pat| pat.sequence() == tab));
    }
}
