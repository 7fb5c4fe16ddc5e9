//! Built-in language profiles and selection by file name.

use std::path::Path;

/// Marker suffix that makes a keyword "secondary" (types, in most profiles).
pub const SECONDARY_MARKER: u8 = b'|';

/// Which lexical classes a profile highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighlightFlags {
    pub numbers: bool,
    pub strings: bool,
}

/// Immutable description of how to highlight one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageProfile {
    /// Human-readable language name.
    pub name: &'static str,
    /// File patterns. A pattern starting with `.` matches the extension,
    /// anything else matches as a substring of the file name.
    pub patterns: &'static [&'static str],
    /// Single-line comment delimiter, if the language has one.
    pub line_comment: Option<&'static str>,
    /// Keywords in match order. A trailing [`SECONDARY_MARKER`] marks a
    /// secondary keyword.
    pub keywords: &'static [&'static str],
    pub flags: HighlightFlags,
}

const ALL_FLAGS: HighlightFlags = HighlightFlags {
    numbers: true,
    strings: true,
};

const C_KEYWORDS: &[&str] = &[
    "switch", "if", "while", "for", "break", "continue", "return", "else", "struct", "union",
    "typedef", "static", "enum", "class", "case", "sizeof", "const", "goto", "default", "do",
    "int|", "long|", "double|", "float|", "char|", "unsigned|", "signed|", "void|", "short|",
    "bool|",
];

const RUST_KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "fn", "for", "if",
    "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "self",
    "Self", "static", "struct", "super", "trait", "type", "unsafe", "use", "where", "while",
    "i8|", "i16|", "i32|", "i64|", "i128|", "isize|", "u8|", "u16|", "u32|", "u64|", "u128|",
    "usize|", "f32|", "f64|", "bool|", "char|", "str|", "String|", "Vec|", "Option|",
    "Result|", "Box|",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "and", "as", "assert", "break", "class", "continue", "def", "del", "elif", "else", "except",
    "finally", "for", "from", "global", "if", "import", "in", "is", "lambda", "nonlocal", "not",
    "or", "pass", "raise", "return", "try", "while", "with", "yield", "None|", "True|",
    "False|", "int|", "float|", "str|", "list|", "dict|", "set|", "tuple|", "bytes|",
];

const MAKE_KEYWORDS: &[&str] = &[
    "ifeq", "ifneq", "ifdef", "ifndef", "else", "endif", "include", "define", "endef",
    "export", "override", ".PHONY|",
];

/// Every profile the editor knows about, in selection priority order.
pub const LANGUAGES: &[LanguageProfile] = &[
    LanguageProfile {
        name: "c",
        patterns: &[".c", ".h", ".cpp", ".hpp", ".cc"],
        line_comment: Some("//"),
        keywords: C_KEYWORDS,
        flags: ALL_FLAGS,
    },
    LanguageProfile {
        name: "rust",
        patterns: &[".rs"],
        line_comment: Some("//"),
        keywords: RUST_KEYWORDS,
        flags: ALL_FLAGS,
    },
    LanguageProfile {
        name: "python",
        patterns: &[".py"],
        line_comment: Some("#"),
        keywords: PYTHON_KEYWORDS,
        flags: ALL_FLAGS,
    },
    LanguageProfile {
        name: "make",
        patterns: &["Makefile", "makefile", ".mk"],
        line_comment: Some("#"),
        keywords: MAKE_KEYWORDS,
        flags: HighlightFlags {
            numbers: false,
            strings: true,
        },
    },
];

impl LanguageProfile {
    /// Whether this profile claims the given file name.
    pub fn matches(&self, file_name: &str) -> bool {
        let extension = file_name.rfind('.').map(|idx| &file_name[idx..]);
        self.patterns.iter().any(|pattern| {
            if pattern.starts_with('.') {
                extension == Some(*pattern)
            } else {
                file_name.contains(pattern)
            }
        })
    }
}

/// Pick the profile for a path, looking only at its final component.
pub fn profile_for_path(path: &Path) -> Option<&'static LanguageProfile> {
    let file_name = path.file_name()?.to_string_lossy();
    let profile = LANGUAGES.iter().find(|lang| lang.matches(&file_name));
    if let Some(profile) = profile {
        tracing::debug!(language = profile.name, path = %path.display(), "selected language profile");
    }
    profile
}
