// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Backslash escaping for names that are inserted into a command line. The set of
//! characters that need a backslash matches what readline style shells treat as word
//! breakers or special.

/// Characters that must be preceded by a backslash when a file name is typed unquoted.
pub const SHELL_SPECIAL_CHARS: &str = " \t\n\"\\'`@$><=;|&{([*?!#";

#[must_use]
pub fn is_shell_special(ch: char) -> bool { SHELL_SPECIAL_CHARS.contains(ch) }

/// Backslash escape every shell special char in `input`.
///
/// ```
/// use r3bl_suggest::escape_str;
/// assert_eq!(escape_str("my file (1).txt"), r"my\ file\ \(1).txt");
/// ```
#[must_use]
pub fn escape_str(input: &str) -> String {
    let mut acc = String::with_capacity(input.len());
    for ch in input.chars() {
        if is_shell_special(ch) {
            acc.push('\\');
        }
        acc.push(ch);
    }
    acc
}

/// Turn a word as typed into the literal text it stands for: backslash escapes are
/// resolved and quotes are removed. Unterminated quotes run to the end of the word.
///
/// ```
/// use r3bl_suggest::unescape_word;
/// assert_eq!(unescape_word(r"my\ fi"), "my fi");
/// assert_eq!(unescape_word("'my fi"), "my fi");
/// assert_eq!(unescape_word(r#""a\"b""#), r#"a"b"#);
/// ```
#[must_use]
pub fn unescape_word(word: &str) -> String {
    let mut acc = String::with_capacity(word.len());
    let mut open_quote: Option<char> = None;
    let mut chars = word.chars().peekable();

    while let Some(ch) = chars.next() {
        match (open_quote, ch) {
            // Everything inside single quotes is literal.
            (Some('\''), '\'') => open_quote = None,
            (Some('\''), _) => acc.push(ch),
            // Inside double quotes, a backslash only escapes a few chars.
            (Some('"'), '"') => open_quote = None,
            (Some('"'), '\\') => match chars.peek() {
                Some(next @ ('"' | '\\' | '$' | '`')) => {
                    acc.push(*next);
                    chars.next();
                }
                _ => acc.push('\\'),
            },
            (Some(_), _) => acc.push(ch),
            (None, '\'' | '"') => open_quote = Some(ch),
            (None, '\\') => match chars.next() {
                Some(next) => acc.push(next),
                None => acc.push('\\'),
            },
            (None, _) => acc.push(ch),
        }
    }

    acc
}
