//! Reads the import section of a Go source file.
//!
//! Only the header is scanned: the `package` clause followed by any number
//! of `import` declarations. Scanning stops at the first other declaration,
//! so syntax problems in function bodies never affect the result.

use thiserror::Error;

/// The header of a Go file could not be scanned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ImportScanError {
    pub line: usize,
    pub message: String,
}

/// Return every import path declared in `source`, in declaration order.
///
/// Supports single and grouped declarations, named, dot and blank imports,
/// interpreted and raw string literals, and line/block comments.
pub fn scan_imports(source: &str) -> Result<Vec<String>, ImportScanError> {
    let mut scanner = Scanner::new(source);
    scanner.package_clause()?;

    let mut imports = Vec::new();
    loop {
        scanner.skip_separators()?;
        if scanner.at_end() || !scanner.eat_keyword("import") {
            break;
        }
        scanner.skip_trivia()?;
        if scanner.eat(b'(') {
            loop {
                scanner.skip_separators()?;
                if scanner.eat(b')') {
                    break;
                }
                if scanner.at_end() {
                    return Err(scanner.error("unterminated import group"));
                }
                imports.push(scanner.import_spec()?);
            }
        } else {
            imports.push(scanner.import_spec()?);
        }
    }

    Ok(imports)
}

struct Scanner<'a> {
    src: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        Self {
            src: source.as_bytes(),
            pos: 0,
            line: 1,
        }
    }

    fn error(&self, message: impl Into<String>) -> ImportScanError {
        ImportScanError {
            line: self.line,
            message: message.into(),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        if byte == b'\n' {
            self.line += 1;
        }
        Some(byte)
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) -> Result<(), ImportScanError> {
        while let Some(byte) = self.peek() {
            match byte {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.bump();
                }
                b'/' if self.src.get(self.pos + 1) == Some(&b'/') => {
                    while let Some(b) = self.peek() {
                        if b == b'\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                b'/' if self.src.get(self.pos + 1) == Some(&b'*') => {
                    let start = self.line;
                    self.pos += 2;
                    loop {
                        match self.bump() {
                            Some(b'*') if self.peek() == Some(b'/') => {
                                self.bump();
                                break;
                            }
                            Some(_) => {}
                            None => {
                                return Err(ImportScanError {
                                    line: start,
                                    message: "unterminated block comment".into(),
                                });
                            }
                        }
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip trivia and any explicit `;` separators.
    fn skip_separators(&mut self) -> Result<(), ImportScanError> {
        loop {
            self.skip_trivia()?;
            if !self.eat(b';') {
                return Ok(());
            }
        }
    }

    fn ident(&mut self) -> Option<&'a str> {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            let continues = if self.pos == start {
                is_ident_start(byte)
            } else {
                is_ident_start(byte) || byte.is_ascii_digit()
            };
            if !continues {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            None
        } else {
            std::str::from_utf8(&self.src[start..self.pos]).ok()
        }
    }

    /// Consume `keyword` if it is the next whole identifier.
    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let start = self.pos;
        match self.ident() {
            Some(word) if word == keyword => true,
            _ => {
                self.pos = start;
                false
            }
        }
    }

    fn package_clause(&mut self) -> Result<(), ImportScanError> {
        self.skip_trivia()?;
        if !self.eat_keyword("package") {
            return Err(self.error("expected 'package' clause"));
        }
        self.skip_trivia()?;
        if self.ident().is_none() {
            return Err(self.error("expected package name"));
        }
        Ok(())
    }

    /// `[ "." | identifier ] string_lit`
    fn import_spec(&mut self) -> Result<String, ImportScanError> {
        self.skip_trivia()?;
        if !self.eat(b'.') {
            // Optional alias, including the blank identifier.
            let _ = self.ident();
        }
        self.skip_trivia()?;
        self.string_literal()
    }

    fn string_literal(&mut self) -> Result<String, ImportScanError> {
        match self.peek() {
            Some(b'"') => {
                self.bump();
                let mut out = Vec::new();
                loop {
                    match self.bump() {
                        Some(b'"') => break,
                        Some(b'\\') => match self.bump() {
                            Some(b'\n') | None => {
                                return Err(self.error("unterminated import path"));
                            }
                            Some(escaped) => out.push(escaped),
                        },
                        Some(b'\n') | None => {
                            return Err(self.error("unterminated import path"));
                        }
                        Some(byte) => out.push(byte),
                    }
                }
                String::from_utf8(out).map_err(|_| self.error("import path is not valid UTF-8"))
            }
            Some(b'`') => {
                self.bump();
                let start = self.pos;
                loop {
                    match self.bump() {
                        Some(b'`') => break,
                        Some(_) => {}
                        None => return Err(self.error("unterminated raw import path")),
                    }
                }
                std::str::from_utf8(&self.src[start..self.pos - 1])
                    .map(str::to_owned)
                    .map_err(|_| self.error("import path is not valid UTF-8"))
            }
            _ => Err(self.error("expected import path string")),
        }
    }
}

fn is_ident_start(byte: u8) -> bool {
    byte == b'_' || byte.is_ascii_alphabetic() || byte >= 0x80
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_grouped_imports_with_aliases() {
        let src = r#"// Package user holds the user entity.
package user

import (
	"context"
	"errors" // trailing comment

	db "example.com/app/internal/adapters/secondary/database"
	_ "example.com/app/internal/config"
	. "example.com/app/pkg/testing"
)

func New() {}
"#;
        let imports = scan_imports(src).unwrap();
        assert_eq!(
            imports,
            vec![
                "context",
                "errors",
                "example.com/app/internal/adapters/secondary/database",
                "example.com/app/internal/config",
                "example.com/app/pkg/testing",
            ]
        );
    }

    #[test]
    fn reads_multiple_single_declarations() {
        let src = "package main; import \"fmt\"; import os `os`\nimport /* x */ \"strings\"\nvar x = 1";
        assert_eq!(scan_imports(src).unwrap(), vec!["fmt", "os", "strings"]);
    }

    #[test]
    fn stops_at_first_declaration() {
        let src = "package main\n\nfunc main() { this is not go }\nimport \"late\"\n";
        assert!(scan_imports(src).unwrap().is_empty());
    }

    #[test]
    fn body_errors_do_not_matter() {
        let src = "package svc\nimport \"example.com/app/internal/core/domain\"\nfunc broken( {";
        assert_eq!(
            scan_imports(src).unwrap(),
            vec!["example.com/app/internal/core/domain"]
        );
    }

    #[test]
    fn missing_package_clause_is_error() {
        let err = scan_imports("import \"fmt\"").unwrap_err();
        assert!(err.message.contains("package"));
    }

    #[test]
    fn unterminated_group_is_error() {
        let err = scan_imports("package a\nimport (\n\t\"fmt\"\n").unwrap_err();
        assert_eq!(err.message, "unterminated import group");
    }

    #[test]
    fn unterminated_block_comment_reports_start_line() {
        let err = scan_imports("package a\n/* never closed\n\n").unwrap_err();
        assert_eq!(err.line, 2);
    }
}
