use std::iter::Peekable;

use globset::{GlobBuilder, GlobMatcher};

use crate::errors::*;
use crate::package::Package;

/// The forms a user might type a package as, tried in this order.
const MATCH_FORMS: [fn(&Package) -> String; 6] = [
    Package::ui_nevra,
    Package::ui_envra,
    Package::nvra,
    Package::nvr,
    Package::na,
    name_form,
];

fn name_form(package: &Package) -> String {
    package.name().to_string()
}

/// A shell style glob (`*`, `?`, `[...]`) matched against the common textual forms of a package.
///
/// This is the dialect yum style tools accept, not globset's own: a class is negated with `[^...]`
/// only and `!` is an ordinary character. Braces have no meaning, and `\` escapes the next
/// character. As with path globs, `*` and `?` never match a `/`.
#[derive(Clone, Debug)]
pub struct Pattern {
    text: String,
    // None for patterns which can't match anything
    matcher: Option<GlobMatcher>,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        };

        let matcher = match translate(pattern).map_err(|reason| invalid(reason.to_string()))? {
            Some(glob) if !pattern.is_empty() => {
                let glob = GlobBuilder::new(&glob)
                    .literal_separator(true)
                    .backslash_escape(true)
                    .build()
                    .map_err(|e| invalid(e.to_string()))?;
                Some(glob.compile_matcher())
            }
            _ => None,
        };

        Ok(Pattern {
            text: pattern.to_string(),
            matcher,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Does the pattern match any of `name-[epoch:]version-release.arch`,
    /// `[epoch:]name-version-release.arch`, `name-version-release.arch`,
    /// `name-version-release`, `name.arch` or `name`. The epoch is only written when non-zero.
    ///
    /// An empty pattern matches nothing.
    pub fn matches(&self, package: &Package) -> bool {
        let Some(matcher) = &self.matcher else {
            return false;
        };
        MATCH_FORMS
            .iter()
            .any(|form| matcher.is_match(form(package)))
    }
}

type Chars<'a> = Peekable<std::str::Chars<'a>>;

/// Rewrite a pattern into globset syntax. `Ok(None)` means the pattern is valid but can never
/// match, which happens with a class like `[z-a]`.
fn translate(pattern: &str) -> std::result::Result<Option<String>, &'static str> {
    let mut glob = String::with_capacity(pattern.len());
    let mut satisfiable = true;
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' => {
                while chars.next_if_eq(&'*').is_some() {}
                glob.push('*');
            }
            '?' => glob.push('?'),
            '[' => satisfiable &= push_class(&mut glob, &mut chars)?,
            '\\' => push_literal(&mut glob, chars.next().ok_or("trailing backslash")?),
            c => push_literal(&mut glob, c),
        }
    }

    Ok(satisfiable.then_some(glob))
}

fn push_literal(glob: &mut String, c: char) {
    if matches!(c, '*' | '?' | '[' | ']' | '{' | '}' | '\\') {
        glob.push('\\');
    }
    glob.push(c);
}

fn class_char(chars: &mut Chars<'_>) -> std::result::Result<char, &'static str> {
    match chars.next() {
        None => Err("unclosed character class"),
        Some('-' | ']') => Err("unescaped '-' or ']' in character class"),
        Some('\\') => chars.next().ok_or("unclosed character class"),
        Some(c) => Ok(c),
    }
}

/// Parse the rest of a class after its `[` and write it out in globset syntax. Returns false if
/// the class matches no character at all.
fn push_class(glob: &mut String, chars: &mut Chars<'_>) -> std::result::Result<bool, &'static str> {
    let negated = chars.next_if_eq(&'^').is_some();

    let mut ranges = Vec::new();
    loop {
        if !ranges.is_empty() && chars.next_if_eq(&']').is_some() {
            break;
        }
        let lo = class_char(chars)?;
        let hi = match chars.next_if_eq(&'-') {
            Some(_) => class_char(chars)?,
            None => lo,
        };
        ranges.push((lo, hi));
    }

    // globset gives these meaning depending on their position, so they are split out of the
    // ranges and placed where they are literal
    let mut plain = Vec::new();
    let mut special = Vec::new();
    for (mut lo, hi) in ranges.into_iter().filter(|(lo, hi)| lo <= hi) {
        for c in CLASS_SPECIALS {
            if lo <= c && c <= hi {
                if lo < c {
                    plain.push((lo, ascii_step(c, -1)));
                }
                if !special.contains(&c) {
                    special.push(c);
                }
                lo = ascii_step(c, 1);
            }
        }
        if lo <= hi {
            plain.push((lo, hi));
        }
    }

    if plain.is_empty() && special.is_empty() {
        if negated {
            glob.push('?');
        }
        return Ok(negated);
    }

    let has = |c: char| special.contains(&c);
    if !negated && plain.is_empty() && !has(']') && !has('-') {
        // only '!' and '^' left, neither can open a class
        match (has('!'), has('^')) {
            (true, true) => glob.push_str("{!,^}"),
            (true, false) => glob.push('!'),
            _ => glob.push('^'),
        }
        return Ok(true);
    }

    glob.push('[');
    if negated {
        glob.push('!');
    }
    let mut dash = has('-');
    if has(']') {
        glob.push(']');
    } else if !negated && plain.is_empty() {
        // a leading '-' is literal
        glob.push('-');
        dash = false;
    }
    for (lo, hi) in plain {
        glob.push(lo);
        if lo != hi {
            glob.push('-');
            glob.push(hi);
        }
    }
    for c in ['!', '^'] {
        if has(c) {
            glob.push(c);
        }
    }
    // so is a trailing one
    if dash {
        glob.push('-');
    }
    glob.push(']');
    Ok(true)
}

/// Characters with a positional meaning inside a globset class, in ascending order
const CLASS_SPECIALS: [char; 4] = ['!', '-', ']', '^'];

fn ascii_step(c: char, step: i8) -> char {
    char::from((c as u8).wrapping_add_signed(step))
}

impl Package {
    /// Match this package against a glob pattern, see [`Pattern::matches`].
    ///
    /// A pattern which doesn't parse matches nothing.
    pub fn matches(&self, pattern: &str) -> bool {
        Pattern::new(pattern).is_ok_and(|pattern| pattern.matches(self))
    }
}
