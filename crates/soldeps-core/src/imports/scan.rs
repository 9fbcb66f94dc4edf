//! Import-statement scanner.
//!
//! Scans Solidity source for import path strings without full parsing.
//! Handles the three statement shapes (`import "p";`,
//! `import {A, b as c} from "p";`, `import * as N from "p";`) and skips
//! comments and unrelated string literals.

use std::collections::HashSet;

/// An import path found in source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// The path exactly as written between the quotes.
    pub raw: String,
    /// Line of the `import` keyword (1-indexed).
    pub line: u32,
}

/// Scan source code for import paths.
///
/// Returns discovered imports in first-appearance order, deduplicated by
/// `raw`.
#[must_use]
pub fn scan_imports(source: &str) -> Vec<ImportSpec> {
    let mut results = Vec::new();
    let mut seen = HashSet::new();
    let chars: Vec<char> = source.chars().collect();
    let len = chars.len();
    let mut line: u32 = 1;
    let mut i = 0;

    while i < len {
        match chars[i] {
            '\n' => {
                line += 1;
                i += 1;
            }
            '/' if i + 1 < len && chars[i + 1] == '/' => {
                while i < len && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if i + 1 < len && chars[i + 1] == '*' => {
                i += 2;
                while i + 1 < len && !(chars[i] == '*' && chars[i + 1] == '/') {
                    if chars[i] == '\n' {
                        line += 1;
                    }
                    i += 1;
                }
                i = (i + 2).min(len);
            }
            '"' | '\'' => {
                // A string outside an import statement; skip it whole.
                i = skip_string(&chars, i, &mut line);
            }
            _ if matches_keyword(&chars, i, "import") => {
                let keyword_line = line;
                if let Some((path, end)) = scan_import_statement(&chars, i + 6, &mut line) {
                    if !path.is_empty() && seen.insert(path.clone()) {
                        results.push(ImportSpec {
                            raw: path,
                            line: keyword_line,
                        });
                    }
                    i = end;
                } else {
                    i += 6;
                }
            }
            _ => i += 1,
        }
    }

    results
}

/// Check for an ASCII `keyword` at `i` with identifier boundaries on both
/// sides.
fn matches_keyword(chars: &[char], i: usize, keyword: &str) -> bool {
    let len = keyword.len();
    if i + len > chars.len() {
        return false;
    }
    if !chars[i..i + len]
        .iter()
        .zip(keyword.chars())
        .all(|(a, b)| *a == b)
    {
        return false;
    }
    if i > 0 && is_ident_char(chars[i - 1]) {
        return false;
    }
    match chars.get(i + len) {
        Some(&c) => !is_ident_char(c),
        None => true,
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// From just past the `import` keyword, find the path string before the
/// statement's `;`.
fn scan_import_statement(
    chars: &[char],
    start: usize,
    line: &mut u32,
) -> Option<(String, usize)> {
    let mut i = start;

    while i < chars.len() {
        match chars[i] {
            '\n' => {
                *line += 1;
                i += 1;
            }
            '/' if i + 1 < chars.len() && chars[i + 1] == '/' => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if i + 1 < chars.len() && chars[i + 1] == '*' => {
                i += 2;
                while i + 1 < chars.len() && !(chars[i] == '*' && chars[i + 1] == '/') {
                    if chars[i] == '\n' {
                        *line += 1;
                    }
                    i += 1;
                }
                i = (i + 2).min(chars.len());
            }
            '"' | '\'' => {
                let quote = chars[i];
                let mut path = String::new();
                let mut j = i + 1;
                while j < chars.len() && chars[j] != quote {
                    if chars[j] == '\\' && j + 1 < chars.len() {
                        path.push(chars[j + 1]);
                        j += 2;
                    } else {
                        if chars[j] == '\n' {
                            *line += 1;
                        }
                        path.push(chars[j]);
                        j += 1;
                    }
                }
                return Some((path, (j + 1).min(chars.len())));
            }
            ';' => return None,
            _ => i += 1,
        }
    }

    None
}

/// Skip a complete string literal starting at `i`; returns the index just
/// past the closing quote.
fn skip_string(chars: &[char], i: usize, line: &mut u32) -> usize {
    let quote = chars[i];
    let mut j = i + 1;
    while j < chars.len() && chars[j] != quote {
        if chars[j] == '\\' {
            j += 1;
        } else if chars[j] == '\n' {
            *line += 1;
        }
        j += 1;
    }
    (j + 1).min(chars.len())
}
