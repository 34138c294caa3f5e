use std::cmp::Ordering;

use bitflags::bitflags;

bitflags! {
    /// Which special version markers a [`VersionComparator`] recognizes.
    ///
    /// Tilde (~) is used for denoting pre-releases and forces a version to sort as less than the
    /// same version without it, e.g. 0.5.0~rc1 < 0.5.0. Caret (^) is used for denoting snapshots
    /// not directly associated with an upstream release and sorts higher than the bare version,
    /// e.g. 0.5.0 < 0.5.0^deadbeef.
    ///
    /// A marker that is switched off is treated like any other separator character.
    #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
    pub struct CompareFlags: u8 {
        const TILDE = 1;
        const CARET = 1 << 1;
    }
}

impl Default for CompareFlags {
    fn default() -> Self {
        CompareFlags::all()
    }
}

/// The classification of a run of bytes in a version string.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    /// ASCII `0-9`
    Digits,
    /// ASCII `a-z` and `A-Z`
    Letters,
    Tilde,
    Caret,
    /// Everything else, including every byte of a non-ASCII character.
    Separator,
    /// Input exhausted.
    End,
}

/// A maximal run of bytes sharing one [`TokenKind`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VersionToken<'a> {
    pub kind: TokenKind,
    pub bytes: &'a [u8],
}

impl<'a> VersionToken<'a> {
    const END: Self = VersionToken {
        kind: TokenKind::End,
        bytes: &[],
    };

    fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// Splits a version string into maximal runs of [`TokenKind`]s.
///
/// The runs cover the whole input without gaps, and two neighbouring runs never share a kind.
/// Classification is done byte by byte, so a multi-byte UTF-8 character becomes part of a
/// `Separator` run.
#[derive(Clone, Debug)]
pub struct Tokenizer<'a> {
    rest: &'a [u8],
    flags: CompareFlags,
}

impl<'a> Tokenizer<'a> {
    pub fn new(version: &'a str, flags: CompareFlags) -> Self {
        Self::from_bytes(version.as_bytes(), flags)
    }

    pub fn from_bytes(version: &'a [u8], flags: CompareFlags) -> Self {
        Tokenizer {
            rest: version,
            flags,
        }
    }

    fn classify(&self, byte: u8) -> TokenKind {
        match byte {
            b'0'..=b'9' => TokenKind::Digits,
            b'a'..=b'z' | b'A'..=b'Z' => TokenKind::Letters,
            b'~' if self.flags.contains(CompareFlags::TILDE) => TokenKind::Tilde,
            b'^' if self.flags.contains(CompareFlags::CARET) => TokenKind::Caret,
            _ => TokenKind::Separator,
        }
    }

    /// Take the next run, or the `End` sentinel once the input is exhausted.
    fn next_token(&mut self) -> VersionToken<'a> {
        let Some(&first) = self.rest.first() else {
            return VersionToken::END;
        };

        let kind = self.classify(first);
        let len = self
            .rest
            .iter()
            .position(|&b| self.classify(b) != kind)
            .unwrap_or(self.rest.len());
        let (bytes, rest) = self.rest.split_at(len);
        self.rest = rest;

        VersionToken { kind, bytes }
    }

    /// Take the next run that takes part in a comparison. Separator runs are dropped unexamined.
    fn next_significant(&mut self) -> VersionToken<'a> {
        let token = self.next_token();
        if token.is(TokenKind::Separator) {
            // runs are maximal, so a separator is never followed by another one
            return self.next_token();
        }
        token
    }

    /// Drop the first `count` bytes of a tilde or caret run, moving on to the next run when the
    /// current one is used up.
    fn consume(&mut self, token: VersionToken<'a>, count: usize) -> VersionToken<'a> {
        if token.bytes.len() > count {
            VersionToken {
                kind: token.kind,
                bytes: &token.bytes[count..],
            }
        } else {
            self.next_significant()
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = VersionToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        (!token.is(TokenKind::End)).then_some(token)
    }
}

/// Compares version and release strings the way `rpmvercmp` does.
///
/// Each string is split into runs of digits, ASCII letters, tildes, carets and "everything
/// else". The "everything else" runs only serve to split the others and are never compared.
/// The remaining runs are compared pairwise from the left:
///
/// * a tilde run sorts before anything, including the end of the string
/// * a caret run sorts after the end of the string, but before anything else
/// * a numeric run sorts after an alphabetic one, and the end of the string sorts before both
/// * numeric runs are compared by magnitude, ignoring leading zeroes
/// * alphabetic runs are compared bytewise
///
/// Non-ASCII bytes are treated as separators one byte at a time, so two versions which only
/// differ in their non-ASCII characters compare as equal. This matches rpm and is kept for
/// compatibility.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct VersionComparator {
    flags: CompareFlags,
}

impl VersionComparator {
    pub fn new(flags: CompareFlags) -> Self {
        VersionComparator { flags }
    }

    pub fn flags(&self) -> CompareFlags {
        self.flags
    }

    /// Compare two version (or release) strings
    pub fn compare(&self, version1: &str, version2: &str) -> Ordering {
        self.compare_bytes(version1.as_bytes(), version2.as_bytes())
    }

    pub fn compare_bytes(&self, version1: &[u8], version2: &[u8]) -> Ordering {
        if version1 == version2 {
            return Ordering::Equal;
        }

        let mut tokens1 = Tokenizer::from_bytes(version1, self.flags);
        let mut tokens2 = Tokenizer::from_bytes(version2, self.flags);
        let mut part1 = tokens1.next_significant();
        let mut part2 = tokens2.next_significant();

        loop {
            if part1.is(TokenKind::End) && part2.is(TokenKind::End) {
                return Ordering::Equal;
            }

            // Tilde parses as "older" or lesser version, even compared to the end of the string
            match (part1.is(TokenKind::Tilde), part2.is(TokenKind::Tilde)) {
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                (true, true) => {
                    let common = part1.bytes.len().min(part2.bytes.len());
                    part1 = tokens1.consume(part1, common);
                    part2 = tokens2.consume(part2, common);
                    continue;
                }
                (false, false) => (),
            }

            // Caret sorts above the end of the string, but below anything else
            match (part1.is(TokenKind::Caret), part2.is(TokenKind::Caret)) {
                (true, false) => {
                    return match part2.is(TokenKind::End) {
                        true => Ordering::Greater,
                        false => Ordering::Less,
                    };
                }
                (false, true) => {
                    return match part1.is(TokenKind::End) {
                        true => Ordering::Less,
                        false => Ordering::Greater,
                    };
                }
                (true, true) => {
                    let common = part1.bytes.len().min(part2.bytes.len());
                    part1 = tokens1.consume(part1, common);
                    part2 = tokens2.consume(part2, common);
                    continue;
                }
                (false, false) => (),
            }

            if part1.kind != part2.kind {
                return match (part1.kind, part2.kind) {
                    (TokenKind::End, _) => Ordering::Less,
                    (_, TokenKind::End) => Ordering::Greater,
                    (TokenKind::Digits, _) => Ordering::Greater,
                    (_, TokenKind::Digits) => Ordering::Less,
                    (TokenKind::Separator, _) => Ordering::Less,
                    _ => Ordering::Greater,
                };
            }

            let ordering = match part1.kind {
                TokenKind::Digits => compare_numeric(part1.bytes, part2.bytes),
                _ => part1.bytes.cmp(part2.bytes),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }

            part1 = tokens1.next_significant();
            part2 = tokens2.next_significant();
        }
    }
}

/// Sequences of leading zeroes are ignored, after that the longer run is the larger number.
/// It's not *actually* parsed as a number, so there is no overflow on long date stamps.
fn compare_numeric(digits1: &[u8], digits2: &[u8]) -> Ordering {
    let strip = |digits: &[u8]| -> usize { digits.iter().take_while(|&&b| b == b'0').count() };
    let digits1 = &digits1[strip(digits1)..];
    let digits2 = &digits2[strip(digits2)..];

    digits1
        .len()
        .cmp(&digits2.len())
        .then_with(|| digits1.cmp(digits2))
}

/// Compare two version (or release) strings with tilde and caret handling enabled
pub fn rpmvercmp(version1: &str, version2: &str) -> Ordering {
    VersionComparator::default().compare(version1, version2)
}

/// Split an `[epoch:]version[-release]` string into its three parts. A missing epoch is `""`.
pub fn parse_evr(evr: &str) -> (&str, &str, &str) {
    let (epoch, vr) = evr.split_once(':').unwrap_or(("", evr));
    let (version, release) = vr.split_once('-').unwrap_or((vr, ""));

    (epoch, version, release)
}

/// Compare two strings as RPM EVR values
///
/// A package having no epoch value is equivalent to having an epoch of zero.
pub fn rpm_evr_compare(evr1: &str, evr2: &str) -> Ordering {
    let (epoch1, version1, release1) = parse_evr(evr1);
    let (epoch2, version2, release2) = parse_evr(evr2);
    let epoch1 = if epoch1.is_empty() { "0" } else { epoch1 };
    let epoch2 = if epoch2.is_empty() { "0" } else { epoch2 };

    rpmvercmp(epoch1, epoch2)
        .then_with(|| rpmvercmp(version1, version2))
        .then_with(|| rpmvercmp(release1, release2))
}
