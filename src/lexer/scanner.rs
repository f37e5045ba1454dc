//! Character-level scanner for tokenizing letpoly source.

use super::token::{Span, Spanned, Token};
use crate::error::{LexError, Result};

/// The lexer/scanner for letpoly source code.
pub struct Scanner<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
        }
    }

    /// Tokenize the entire source, ending with a single `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Spanned<Token>>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = token.value == Token::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        Ok(tokens)
    }

    /// Get the next token from the source.
    pub fn next_token(&mut self) -> Result<Spanned<Token>> {
        self.skip_whitespace_and_comments()?;

        let start = self.current_pos;

        let Some((pos, ch)) = self.peek() else {
            return Ok(Spanned::new(Token::Eof, Span::new(start, start)));
        };

        let token = match ch {
            '(' => self.single(Token::LParen),
            ')' => self.single(Token::RParen),
            '{' => self.single(Token::LBrace),
            '}' => self.single(Token::RBrace),
            '[' => self.single(Token::LBracket),
            ']' => self.single(Token::RBracket),
            ',' => self.single(Token::Comma),
            ';' => self.single(Token::Semicolon),
            '=' => self.single(Token::Eq),

            '0'..='9' => self.scan_number()?,

            'a'..='z' | 'A'..='Z' | '_' => self.scan_identifier(),

            // Unicode identifier start
            _ if ch.is_alphabetic() => self.scan_identifier(),

            _ => {
                self.advance();
                return Err(LexError::UnexpectedCharacter {
                    ch,
                    span: Span::new(pos, self.current_pos),
                }
                .into());
            }
        };

        Ok(Spanned::new(token, Span::new(start, self.current_pos)))
    }

    fn single(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    fn peek(&mut self) -> Option<(usize, char)> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        let result = self.chars.next();
        if let Some((pos, ch)) = result {
            self.current_pos = pos + ch.len_utf8();
        }
        result
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.chars.clone();
        iter.next();
        iter.next().map(|(_, c)| c)
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<()> {
        loop {
            match self.peek() {
                Some((_, ch)) if ch.is_whitespace() => {
                    self.advance();
                }
                Some((_, '/')) => match self.peek_next() {
                    Some('/') => {
                        // Single-line comment
                        while let Some((_, ch)) = self.peek() {
                            if ch == '\n' {
                                break;
                            }
                            self.advance();
                        }
                    }
                    Some('*') => {
                        let start = self.current_pos;
                        self.advance(); // /
                        self.advance(); // *
                        loop {
                            match self.advance() {
                                Some((_, '*')) if self.peek().map(|(_, c)| c) == Some('/') => {
                                    self.advance();
                                    break;
                                }
                                Some(_) => {}
                                None => {
                                    return Err(LexError::UnterminatedComment {
                                        span: Span::new(start, self.current_pos),
                                    }
                                    .into());
                                }
                            }
                        }
                    }
                    // A lone '/' is reported by next_token
                    _ => break,
                },
                _ => break,
            }
        }
        Ok(())
    }

    fn scan_number(&mut self) -> Result<Token> {
        let start = self.current_pos;

        while let Some((_, ch)) = self.peek() {
            if ch.is_ascii_digit() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let digits: String = self.source[start..self.current_pos]
            .chars()
            .filter(|c| *c != '_')
            .collect();

        digits
            .parse::<i64>()
            .map(Token::Int)
            .map_err(|_| {
                LexError::InvalidNumber {
                    span: Span::new(start, self.current_pos),
                }
                .into()
            })
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.current_pos;

        while let Some((_, ch)) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let ident = &self.source[start..self.current_pos];

        Token::keyword(ident).unwrap_or_else(|| Token::Ident(ident.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LetpolyError;

    fn tokenize(source: &str) -> Vec<Token> {
        Scanner::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|s| s.value)
            .collect()
    }

    #[test]
    fn test_keywords() {
        assert_eq!(tokenize("let"), vec![Token::Let, Token::Eof]);
        assert_eq!(
            tokenize("fn return"),
            vec![Token::Fn, Token::Return, Token::Eof]
        );
        assert_eq!(
            tokenize("letter"),
            vec![Token::Ident("letter".to_string()), Token::Eof]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(tokenize("42"), vec![Token::Int(42), Token::Eof]);
        assert_eq!(tokenize("1_000"), vec![Token::Int(1000), Token::Eof]);
        assert_eq!(tokenize("0"), vec![Token::Int(0), Token::Eof]);
    }

    #[test]
    fn test_number_out_of_range() {
        let err = Scanner::new("99999999999999999999").tokenize().unwrap_err();
        assert!(matches!(
            err,
            LetpolyError::Lex(LexError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            tokenize("let f = fn(x, y) { return (x, y); };"),
            vec![
                Token::Let,
                Token::Ident("f".to_string()),
                Token::Eq,
                Token::Fn,
                Token::LParen,
                Token::Ident("x".to_string()),
                Token::Comma,
                Token::Ident("y".to_string()),
                Token::RParen,
                Token::LBrace,
                Token::Return,
                Token::LParen,
                Token::Ident("x".to_string()),
                Token::Comma,
                Token::Ident("y".to_string()),
                Token::RParen,
                Token::Semicolon,
                Token::RBrace,
                Token::Semicolon,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(tokenize("// comment\n42"), vec![Token::Int(42), Token::Eof]);
        assert_eq!(tokenize("/* a * b */ 42"), vec![Token::Int(42), Token::Eof]);
    }

    #[test]
    fn test_unterminated_comment() {
        let err = Scanner::new("/* never closed").tokenize().unwrap_err();
        assert!(matches!(
            err,
            LetpolyError::Lex(LexError::UnterminatedComment { .. })
        ));
    }

    #[test]
    fn test_unexpected_character() {
        let err = Scanner::new("let x = 1 + 2").tokenize().unwrap_err();
        match err {
            LetpolyError::Lex(LexError::UnexpectedCharacter { ch, span }) => {
                assert_eq!(ch, '+');
                assert_eq!(span, Span::new(10, 11));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_spans() {
        let tokens = Scanner::new("  foo 12").tokenize().unwrap();
        assert_eq!(tokens[0].span, Span::new(2, 5));
        assert_eq!(tokens[1].span, Span::new(6, 8));
        assert_eq!(tokens[2].span, Span::new(8, 8));
    }
}
