//! Error types for the letpoly type checker.

use crate::lexer::Span;
use thiserror::Error;

/// Result type for letpoly operations.
pub type Result<T> = std::result::Result<T, LetpolyError>;

/// Main error type for letpoly.
#[derive(Debug, Error)]
pub enum LetpolyError {
    #[error("Lexer error: {0}")]
    Lex(#[from] LexError),

    #[error("Parser error: {0}")]
    Parse(#[from] ParseError),

    #[error("Type error: {0}")]
    Type(#[from] TypeError),
}

impl LetpolyError {
    /// Get the primary span of the underlying error.
    pub fn span(&self) -> Span {
        match self {
            LetpolyError::Lex(e) => e.span(),
            LetpolyError::Parse(e) => e.span(),
            LetpolyError::Type(e) => e.span(),
        }
    }
}

/// Lexer errors.
#[derive(Debug, Error)]
pub enum LexError {
    #[error("Unexpected character '{ch}'")]
    UnexpectedCharacter { ch: char, span: Span },

    #[error("Unterminated comment")]
    UnterminatedComment { span: Span },

    #[error("Invalid integer literal")]
    InvalidNumber { span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedCharacter { span, .. } => *span,
            LexError::UnterminatedComment { span } => *span,
            LexError::InvalidNumber { span } => *span,
        }
    }
}

/// Parser errors.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unexpected token '{found}', expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: String,
        span: Span,
    },

    #[error("Unexpected end of input")]
    UnexpectedEof { span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::UnexpectedEof { span } => *span,
        }
    }
}

/// Type checking errors.
///
/// `ApplicationMismatch` and `UnboundVariable` are never returned by the
/// inference pass itself: a failed application is recorded as a `!Fail!`
/// type and the pass keeps going. The driver turns those, and any names
/// left unresolved at the top level, into these variants for reporting.
/// Every other variant aborts inference.
#[derive(Debug, Error)]
pub enum TypeError {
    #[error("Cannot unify types: expected {expected}, found {found}")]
    UnificationError {
        expected: String,
        found: String,
        span: Span,
        context: Option<String>,
    },

    #[error("Infinite type: {var} occurs in {ty}")]
    OccursCheck {
        var: String,
        ty: String,
        span: Span,
        context: Option<String>,
    },

    #[error("Array literals are not supported")]
    UnsupportedArrayLiteral { span: Span },

    #[error("Assignment to '{name}' is not supported")]
    UnsupportedAssignment { name: String, span: Span },

    #[error("Declaration '{name}' refers to itself")]
    RecursiveDeclaration { name: String, span: Span },

    #[error("Cannot apply {function} to {argument}")]
    ApplicationMismatch {
        function: String,
        argument: String,
        span: Span,
    },

    #[error("Undefined variable '{name}'")]
    UnboundVariable { name: String, span: Span },
}

impl TypeError {
    pub fn span(&self) -> Span {
        match self {
            TypeError::UnificationError { span, .. } => *span,
            TypeError::OccursCheck { span, .. } => *span,
            TypeError::UnsupportedArrayLiteral { span } => *span,
            TypeError::UnsupportedAssignment { span, .. } => *span,
            TypeError::RecursiveDeclaration { span, .. } => *span,
            TypeError::ApplicationMismatch { span, .. } => *span,
            TypeError::UnboundVariable { span, .. } => *span,
        }
    }

    /// Attach a description of what was being unified, keeping any
    /// description that is already present.
    pub fn with_context(mut self, description: impl Into<String>) -> Self {
        match &mut self {
            TypeError::UnificationError { context, .. } | TypeError::OccursCheck { context, .. } => {
                if context.is_none() {
                    *context = Some(description.into());
                }
            }
            _ => {}
        }
        self
    }
}
