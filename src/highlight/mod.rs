//! Line-oriented syntax highlighting.
//!
//! [`classify`] maps every byte of a line's display form to a [`Highlight`]
//! category using a [`LanguageProfile`]. Lines are classified independently:
//! strings and comments never carry over to the next line.

mod syntax;

pub use syntax::{HighlightFlags, LANGUAGES, LanguageProfile, SECONDARY_MARKER, profile_for_path};

/// Highlight category of one display byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Highlight {
    #[default]
    Normal,
    Number,
    String,
    Comment,
    /// Primary keyword (control flow, declarations).
    Keyword1,
    /// Secondary keyword (types).
    Keyword2,
    /// Current search match. Only ever applied as a temporary overlay.
    Match,
}

const SEPARATORS: &[u8] = b",.()+-/*=~%<>[];";

/// Whether `byte` ends a word for number and keyword detection.
pub fn is_separator(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == b'\0' || SEPARATORS.contains(&byte)
}

/// Classify every byte of `line`.
///
/// Without a profile the whole line is [`Highlight::Normal`]. The result
/// always has the same length as `line`.
pub fn classify(profile: Option<&LanguageProfile>, line: &[u8]) -> Vec<Highlight> {
    let mut hl = vec![Highlight::Normal; line.len()];
    let Some(profile) = profile else {
        return hl;
    };

    let comment = profile.line_comment.map(str::as_bytes).filter(|c| !c.is_empty());
    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut i = 0;

    while i < line.len() {
        let byte = line[i];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };

        if in_string.is_none()
            && let Some(comment) = comment
            && line[i..].starts_with(comment)
        {
            hl[i..].fill(Highlight::Comment);
            break;
        }

        if profile.flags.strings {
            if let Some(delim) = in_string {
                hl[i] = Highlight::String;
                if byte == b'\\' && i + 1 < line.len() {
                    hl[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if byte == delim {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            }
            if byte == b'"' || byte == b'\'' {
                in_string = Some(byte);
                hl[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if profile.flags.numbers
            && ((byte.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (byte == b'.' && prev_hl == Highlight::Number))
        {
            hl[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep && let Some((len, category)) = match_keyword(profile, &line[i..]) {
            hl[i..i + len].fill(category);
            i += len;
            prev_sep = false;
            continue;
        }

        prev_sep = is_separator(byte);
        i += 1;
    }

    hl
}

/// Longest keyword that starts `rest` and is followed by a separator or the
/// end of the line.
fn match_keyword(profile: &LanguageProfile, rest: &[u8]) -> Option<(usize, Highlight)> {
    profile
        .keywords
        .iter()
        .filter_map(|keyword| {
            let keyword = keyword.as_bytes();
            let (word, category) = match keyword.split_last() {
                Some((&SECONDARY_MARKER, word)) => (word, Highlight::Keyword2),
                _ => (keyword, Highlight::Keyword1),
            };
            let bounded = rest.get(word.len()).is_none_or(|&next| is_separator(next));
            (!word.is_empty() && rest.starts_with(word) && bounded).then_some((word.len(), category))
        })
        .max_by_key(|(len, _)| *len)
}
