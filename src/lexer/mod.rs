//! Lexer module for tokenizing letpoly source code.

mod scanner;
mod token;

pub use scanner::Scanner;
pub use token::{Span, Spanned, Token};
