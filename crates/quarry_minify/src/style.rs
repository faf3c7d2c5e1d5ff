//! Conservative CSS minification.
//!
//! Removes `/* */` comments, collapses whitespace to single spaces, and
//! drops spaces where CSS grammar does not need them (after `{` `}` `;`
//! `:` `,` `>`, before `{` `}` `;` `,` `>`). A space before `:` is kept
//! so selector combinators like `a :hover` are not rewritten. Trailing
//! semicolons before `}` are removed. String literals are copied
//! verbatim.

use crate::error::MinifyError;

/// Minifies CSS source.
pub fn minify_style(source: &str) -> Result<String, MinifyError> {
    let mut chars = source.chars().peekable();
    let mut out = String::with_capacity(source.len());
    let mut line = 1usize;
    let mut pending_space = false;

    while let Some(c) = bump(&mut chars, &mut line) {
        match c {
            c if c.is_whitespace() => pending_space = true,
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                skip_comment(&mut chars, &mut line)?;
                pending_space = true;
            }
            '"' | '\'' => {
                flush_space(&mut out, &mut pending_space, c);
                copy_string(&mut chars, &mut line, &mut out, c)?;
            }
            ';' => {
                pending_space = false;
                if !out.is_empty() && !out.ends_with(';') && !out.ends_with('{') {
                    out.push(';');
                }
            }
            '}' => {
                pending_space = false;
                if out.ends_with(';') {
                    out.pop();
                }
                out.push('}');
            }
            _ => {
                flush_space(&mut out, &mut pending_space, c);
                out.push(c);
            }
        }
    }

    Ok(out)
}

fn bump(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, line: &mut usize) -> Option<char> {
    let c = chars.next();
    if c == Some('\n') {
        *line += 1;
    }
    c
}

/// No space is needed after these characters.
fn no_space_after(c: char) -> bool {
    matches!(c, '{' | '}' | ';' | ':' | ',' | '>')
}

/// No space is needed before these characters. `:` is deliberately
/// absent: `a :hover` and `a:hover` select differently.
fn no_space_before(c: char) -> bool {
    matches!(c, '{' | '}' | ';' | ',' | '>')
}

fn flush_space(out: &mut String, pending: &mut bool, next: char) {
    if *pending && !out.is_empty() {
        if let Some(last) = out.chars().last() {
            if !no_space_after(last) && !no_space_before(next) {
                out.push(' ');
            }
        }
    }
    *pending = false;
}

fn skip_comment(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    line: &mut usize,
) -> Result<(), MinifyError> {
    let start_line = *line;
    loop {
        match bump(chars, line) {
            None => return Err(MinifyError::UnterminatedComment { line: start_line }),
            Some('*') => {
                if chars.peek() == Some(&'/') {
                    chars.next();
                    return Ok(());
                }
            }
            Some(_) => {}
        }
    }
}

fn copy_string(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    line: &mut usize,
    out: &mut String,
    quote: char,
) -> Result<(), MinifyError> {
    let start_line = *line;
    out.push(quote);
    loop {
        match bump(chars, line) {
            None | Some('\n') => return Err(MinifyError::UnterminatedString { line: start_line }),
            Some('\\') => {
                out.push('\\');
                match bump(chars, line) {
                    None => return Err(MinifyError::UnterminatedString { line: start_line }),
                    Some(escaped) => out.push(escaped),
                }
            }
            Some(c) if c == quote => {
                out.push(quote);
                return Ok(());
            }
            Some(c) => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_rule() {
        let out = minify_style("body { color: red; }").unwrap();
        assert_eq!(out, "body{color:red}");
    }

    #[test]
    fn strips_comments() {
        let out = minify_style("/* header */ a { b: c } /* footer */").unwrap();
        assert_eq!(out, "a{b:c}");
    }

    #[test]
    fn collapses_multiline_rules() {
        let out = minify_style("a {\n  color: red;\n  margin: 0;\n}\n").unwrap();
        assert_eq!(out, "a{color:red;margin:0}");
    }

    #[test]
    fn keeps_space_in_descendant_selector() {
        let out = minify_style("ul li { margin: 0 }").unwrap();
        assert_eq!(out, "ul li{margin:0}");
    }

    #[test]
    fn drops_space_around_combinator() {
        let out = minify_style("ul > li { margin: 0 }").unwrap();
        assert_eq!(out, "ul>li{margin:0}");
    }

    #[test]
    fn keeps_space_before_colon_in_selector() {
        let out = minify_style("a :hover { color: red }").unwrap();
        assert_eq!(out, "a :hover{color:red}");
    }

    #[test]
    fn drops_space_after_comma() {
        let out = minify_style("h1, h2 { margin: 0 }").unwrap();
        assert_eq!(out, "h1,h2{margin:0}");
    }

    #[test]
    fn preserves_string_content() {
        let out = minify_style("a::before { content: \"} ; /*x*/\"; }").unwrap();
        assert_eq!(out, "a::before{content:\"} ; /*x*/\"}");
    }

    #[test]
    fn collapses_duplicate_semicolons() {
        let out = minify_style("a { b: c;; d: e }").unwrap();
        assert_eq!(out, "a{b:c;d:e}");
    }

    #[test]
    fn shorthand_values_keep_spaces() {
        let out = minify_style("a { margin: 1px 2px 3px 4px }").unwrap();
        assert_eq!(out, "a{margin:1px 2px 3px 4px}");
    }

    #[test]
    fn empty_input() {
        assert_eq!(minify_style("").unwrap(), "");
    }

    #[test]
    fn unterminated_comment_errors() {
        let err = minify_style("a { b: c }\n/* open").unwrap_err();
        assert_eq!(err, MinifyError::UnterminatedComment { line: 2 });
    }

    #[test]
    fn unterminated_string_errors() {
        let err = minify_style("a { content: \"oops\n}").unwrap_err();
        assert_eq!(err, MinifyError::UnterminatedString { line: 1 });
    }

    #[test]
    fn deterministic() {
        let src = "nav ul { list-style: none; } /* reset */";
        assert_eq!(minify_style(src).unwrap(), minify_style(src).unwrap());
    }
}
