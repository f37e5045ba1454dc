//! Parser module for letpoly source code.

pub mod ast;
pub mod pretty;

#[cfg(test)]
mod proptests;

use crate::error::{ParseError, Result};
use crate::lexer::{Scanner, Span, Spanned, Token};
use ast::*;

/// The parser for letpoly source code.
pub struct Parser {
    tokens: Vec<Spanned<Token>>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Spanned<Token>>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse the entire program into a top-level block.
    pub fn parse_program(&mut self) -> Result<Node> {
        let start = self.current_span().start;
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        let end = statements.last().map(|s| s.span.end).unwrap_or(start);

        Ok(Node::new(
            NodeKind::Block(statements),
            Span::new(start, end),
        ))
    }

    // ========== Statement Parsing ==========

    fn parse_statement(&mut self) -> Result<Node> {
        let stmt = match self.current() {
            Token::Let => self.parse_declaration()?,
            Token::Return => self.parse_return()?,
            Token::Ident(_) if self.peek_is(&Token::Eq) => self.parse_assignment()?,
            _ => self.parse_expression()?,
        };
        self.consume_semicolon();
        Ok(stmt)
    }

    fn parse_declaration(&mut self) -> Result<Node> {
        let start = self.current_span().start;
        self.expect(&Token::Let)?;

        let name = self.expect_ident()?;
        self.expect(&Token::Eq)?;
        let value = self.parse_expression()?;

        let span = Span::new(start, value.span.end);
        Ok(Node::new(
            NodeKind::Decl {
                name,
                value: Box::new(value),
            },
            span,
        ))
    }

    fn parse_assignment(&mut self) -> Result<Node> {
        let start = self.current_span().start;
        let name = self.expect_ident()?;
        self.expect(&Token::Eq)?;
        let value = self.parse_expression()?;

        let span = Span::new(start, value.span.end);
        Ok(Node::new(
            NodeKind::Assign {
                name,
                value: Box::new(value),
            },
            span,
        ))
    }

    fn parse_return(&mut self) -> Result<Node> {
        let start = self.current_span().start;
        self.expect(&Token::Return)?;
        let value = self.parse_expression()?;

        let span = Span::new(start, value.span.end);
        Ok(Node::new(NodeKind::Return(Box::new(value)), span))
    }

    fn parse_block(&mut self) -> Result<Node> {
        let start = self.current_span().start;
        self.expect(&Token::LBrace)?;

        let mut statements = Vec::new();
        while !self.check(&Token::RBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        let end_span = self.current_span();
        self.expect(&Token::RBrace)?;

        Ok(Node::new(
            NodeKind::Block(statements),
            Span::new(start, end_span.end),
        ))
    }

    // ========== Expression Parsing ==========

    fn parse_expression(&mut self) -> Result<Node> {
        self.parse_call_expression()
    }

    fn parse_call_expression(&mut self) -> Result<Node> {
        let start = self.current_span().start;
        let mut expr = self.parse_primary_expression()?;

        while self.check(&Token::LParen) {
            let args_start = self.current_span().start;
            self.advance();
            let args = self.parse_comma_list(&Token::RParen)?;
            let end = self.prev_span().end;

            // Arguments are always passed as one tuple
            let arg = Node::new(NodeKind::Tuple(args), Span::new(args_start, end));
            expr = Node::new(
                NodeKind::Apply {
                    fun: Box::new(expr),
                    arg: Box::new(arg),
                },
                Span::new(start, end),
            );
        }

        Ok(expr)
    }

    fn parse_primary_expression(&mut self) -> Result<Node> {
        let start = self.current_span().start;

        match self.current().clone() {
            Token::Int(value) => {
                self.advance();
                Ok(Node::new(NodeKind::Int(value), self.prev_span()))
            }

            Token::Ident(name) => {
                self.advance();
                Ok(Node::new(NodeKind::Var(name), self.prev_span()))
            }

            Token::LParen => self.parse_parenthesized(),

            Token::LBracket => {
                self.advance();
                let elements = self.parse_comma_list(&Token::RBracket)?;
                Ok(Node::new(
                    NodeKind::Array(elements),
                    Span::new(start, self.prev_span().end),
                ))
            }

            Token::Fn => self.parse_function(),

            Token::LBrace => self.parse_block(),

            Token::Eof => Err(ParseError::UnexpectedEof {
                span: self.current_span(),
            }
            .into()),

            other => Err(ParseError::UnexpectedToken {
                found: format!("{}", other),
                expected: "expression".to_string(),
                span: self.current_span(),
            }
            .into()),
        }
    }

    /// Parse `()`, `(e)`, or a tuple `(e1, e2, ...)` with optional trailing comma.
    fn parse_parenthesized(&mut self) -> Result<Node> {
        let start = self.current_span().start;
        self.expect(&Token::LParen)?;

        if self.consume_if(&Token::RParen) {
            return Ok(Node::new(
                NodeKind::Tuple(Vec::new()),
                Span::new(start, self.prev_span().end),
            ));
        }

        let first = self.parse_expression()?;

        if self.consume_if(&Token::RParen) {
            // Plain grouping
            return Ok(first);
        }

        self.expect(&Token::Comma)?;
        let mut elements = vec![first];
        elements.extend(self.parse_comma_list(&Token::RParen)?);

        Ok(Node::new(
            NodeKind::Tuple(elements),
            Span::new(start, self.prev_span().end),
        ))
    }

    fn parse_function(&mut self) -> Result<Node> {
        let start = self.current_span().start;
        self.expect(&Token::Fn)?;
        self.expect(&Token::LParen)?;

        let params = self.parse_parameters()?;
        let body = self.parse_expression()?;

        let span = Span::new(start, body.span.end);
        Ok(Node::new(
            NodeKind::Fn {
                params,
                body: Box::new(body),
            },
            span,
        ))
    }

    fn parse_parameters(&mut self) -> Result<Vec<String>> {
        let mut params = Vec::new();

        if !self.check(&Token::RParen) {
            loop {
                params.push(self.expect_ident()?);
                if !self.consume_if(&Token::Comma) {
                    break;
                }
            }
        }

        self.expect(&Token::RParen)?;
        Ok(params)
    }

    /// Parse expressions separated by commas up to and including `close`.
    /// A trailing comma is allowed.
    fn parse_comma_list(&mut self, close: &Token) -> Result<Vec<Node>> {
        let mut items = Vec::new();

        while !self.check(close) {
            items.push(self.parse_expression()?);
            if !self.consume_if(&Token::Comma) {
                break;
            }
        }

        self.expect(close)?;
        Ok(items)
    }

    // ========== Token Helpers ==========

    fn current(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .map(|s| &s.value)
            .unwrap_or(&Token::Eof)
    }

    fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map(|s| s.span)
            .unwrap_or_default()
    }

    fn prev_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens
                .get(self.pos - 1)
                .map(|s| s.span)
                .unwrap_or_default()
        } else {
            Span::default()
        }
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.current() == &Token::Eof
    }

    fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.current()) == std::mem::discriminant(token)
    }

    fn peek_is(&self, token: &Token) -> bool {
        self.tokens
            .get(self.pos + 1)
            .map(|s| std::mem::discriminant(&s.value) == std::mem::discriminant(token))
            .unwrap_or(false)
    }

    fn consume_if(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token) -> Result<()> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(format!("{}", token)))
        }
    }

    fn expect_ident(&mut self) -> Result<String> {
        if let Token::Ident(name) = self.current().clone() {
            self.advance();
            Ok(name)
        } else {
            Err(self.unexpected("identifier".to_string()))
        }
    }

    fn unexpected(&self, expected: String) -> crate::error::LetpolyError {
        if self.is_at_end() {
            ParseError::UnexpectedEof {
                span: self.current_span(),
            }
            .into()
        } else {
            ParseError::UnexpectedToken {
                found: format!("{}", self.current()),
                expected,
                span: self.current_span(),
            }
            .into()
        }
    }

    fn consume_semicolon(&mut self) {
        // Semicolons are separators, not terminators: optional everywhere
        self.consume_if(&Token::Semicolon);
    }
}

/// Parse source code into an AST
pub fn parse(source: &str) -> Result<Node> {
    let tokens = Scanner::new(source).tokenize()?;

    let mut parser = Parser::new(tokens);
    parser.parse_program()
}
