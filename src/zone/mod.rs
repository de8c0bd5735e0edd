pub mod errors;
pub mod parser;
pub mod tokenizer;

pub use errors::{Result, ZoneError};
pub use parser::ZoneParser;
pub use tokenizer::{Token, TokenKind, Tokenizer};
