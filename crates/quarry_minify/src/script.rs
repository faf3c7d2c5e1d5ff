//! Conservative JavaScript minification.
//!
//! A single-pass scanner that removes comments and collapses whitespace
//! while copying string, template, and regular-expression literals
//! verbatim. Newlines are preserved (one per run) so automatic semicolon
//! insertion is never disturbed; a space survives only where removing it
//! would join two tokens (`var a`, `+ +`).

use std::iter::Peekable;
use std::str::Chars;

use crate::error::MinifyError;

/// Minifies JavaScript source.
///
/// Removes `//` and `/* */` comments, collapses horizontal whitespace,
/// and collapses newline runs to a single newline. Literal content is
/// never rewritten. Fails on unterminated strings, comments, template
/// literals, or regex literals.
pub fn minify_script(source: &str) -> Result<String, MinifyError> {
    Scanner::new(source).run()
}

/// Returns `true` for characters that can be part of an identifier or
/// numeric token, where removing an adjacent space would join tokens.
fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Decides whether a `/` after `last` starts a regex literal rather
/// than a division. Mirrors the classic JSMin predecessor-character
/// heuristic.
fn regex_can_follow(last: Option<char>) -> bool {
    matches!(
        last,
        None | Some('(' | ',' | '=' | ':' | '[' | '!' | '&' | '|' | '?' | '{' | '}' | ';' | '\n')
    )
}

struct Scanner<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    out: String,
    last: Option<char>,
    pending_space: bool,
    pending_newline: bool,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            out: String::with_capacity(source.len()),
            last: None,
            pending_space: false,
            pending_newline: false,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    fn run(mut self) -> Result<String, MinifyError> {
        while let Some(c) = self.bump() {
            match c {
                ' ' | '\t' | '\r' => self.pending_space = true,
                '\n' => self.pending_newline = true,
                '\'' | '"' => self.string(c)?,
                '`' => self.template()?,
                '/' => match self.chars.peek() {
                    Some('/') => {
                        self.bump();
                        self.line_comment();
                    }
                    Some('*') => {
                        self.bump();
                        self.block_comment()?;
                    }
                    _ => {
                        if regex_can_follow(self.last) {
                            self.regex()?;
                        } else {
                            self.emit('/');
                        }
                    }
                },
                _ => self.emit(c),
            }
        }
        Ok(self.out)
    }

    /// Emits pending whitespace (if it must survive) followed by `c`.
    fn emit(&mut self, c: char) {
        self.flush_whitespace(c);
        self.out.push(c);
        self.last = Some(c);
    }

    fn flush_whitespace(&mut self, next: char) {
        if self.pending_newline {
            if !self.out.is_empty() {
                self.out.push('\n');
                self.last = Some('\n');
            }
        } else if self.pending_space {
            if let Some(last) = self.last {
                let joins_words = is_word(last) && is_word(next);
                let joins_operator = last == next && (last == '+' || last == '-');
                if joins_words || joins_operator {
                    self.out.push(' ');
                }
            }
        }
        self.pending_space = false;
        self.pending_newline = false;
    }

    /// Copies a quoted string verbatim. The opening quote has already
    /// been consumed.
    fn string(&mut self, quote: char) -> Result<(), MinifyError> {
        let start_line = self.line;
        self.flush_whitespace(quote);
        self.out.push(quote);
        loop {
            match self.bump() {
                None | Some('\n') => {
                    return Err(MinifyError::UnterminatedString { line: start_line })
                }
                Some('\\') => {
                    self.out.push('\\');
                    match self.bump() {
                        None => return Err(MinifyError::UnterminatedString { line: start_line }),
                        Some(escaped) => self.out.push(escaped),
                    }
                }
                Some(c) if c == quote => {
                    self.out.push(quote);
                    self.last = Some(quote);
                    return Ok(());
                }
                Some(c) => self.out.push(c),
            }
        }
    }

    /// Copies a template literal verbatim, newlines included. Nested
    /// backticks inside `${}` substitutions are not tracked.
    fn template(&mut self) -> Result<(), MinifyError> {
        let start_line = self.line;
        self.flush_whitespace('`');
        self.out.push('`');
        loop {
            match self.bump() {
                None => return Err(MinifyError::UnterminatedTemplate { line: start_line }),
                Some('\\') => {
                    self.out.push('\\');
                    match self.bump() {
                        None => {
                            return Err(MinifyError::UnterminatedTemplate { line: start_line })
                        }
                        Some(escaped) => self.out.push(escaped),
                    }
                }
                Some('`') => {
                    self.out.push('`');
                    self.last = Some('`');
                    return Ok(());
                }
                Some(c) => self.out.push(c),
            }
        }
    }

    /// Skips a `//` comment up to (but not including) the newline.
    fn line_comment(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    /// Skips a `/* */` comment. A comment spanning lines leaves a
    /// newline behind, one on a single line leaves a space.
    fn block_comment(&mut self) -> Result<(), MinifyError> {
        let start_line = self.line;
        let mut spans_lines = false;
        loop {
            match self.bump() {
                None => return Err(MinifyError::UnterminatedComment { line: start_line }),
                Some('\n') => spans_lines = true,
                Some('*') => {
                    if self.chars.peek() == Some(&'/') {
                        self.bump();
                        if spans_lines {
                            self.pending_newline = true;
                        } else {
                            self.pending_space = true;
                        }
                        return Ok(());
                    }
                }
                Some(_) => {}
            }
        }
    }

    /// Copies a regex literal verbatim, including trailing flags. The
    /// opening `/` has already been consumed.
    fn regex(&mut self) -> Result<(), MinifyError> {
        let start_line = self.line;
        self.flush_whitespace('/');
        self.out.push('/');
        let mut in_class = false;
        loop {
            match self.bump() {
                None | Some('\n') => {
                    return Err(MinifyError::UnterminatedRegex { line: start_line })
                }
                Some('\\') => {
                    self.out.push('\\');
                    match self.bump() {
                        None | Some('\n') => {
                            return Err(MinifyError::UnterminatedRegex { line: start_line })
                        }
                        Some(escaped) => self.out.push(escaped),
                    }
                }
                Some('[') => {
                    in_class = true;
                    self.out.push('[');
                }
                Some(']') => {
                    in_class = false;
                    self.out.push(']');
                }
                Some('/') if !in_class => {
                    self.out.push('/');
                    self.last = Some('/');
                    while let Some(&flag) = self.chars.peek() {
                        if !flag.is_ascii_alphabetic() {
                            break;
                        }
                        self.bump();
                        self.out.push(flag);
                        self.last = Some(flag);
                    }
                    return Ok(());
                }
                Some(c) => self.out.push(c),
            }
        }
    }
}
