use std::fmt::Display;

pub type Error = String;

#[derive(Debug)]
pub enum ErrorMsg {
    // Parse errors
    InvalidIdent,
    InvalidInteger,
    MissingEqual,
    NoPrefixRule,
    MissingOpeningParen,
    MissingClosingParen,
    MissingOpeningBrace,
    MissingClosingBrace,
}

impl Display for ErrorMsg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::InvalidIdent => "expected identifier, found",
            Self::InvalidInteger => "integer literal out of range:",
            Self::MissingEqual => "expected `=`, found",
            Self::NoPrefixRule => "no parse rule for token",
            Self::MissingOpeningParen => "expected opening parenthesis, found",
            Self::MissingClosingParen => "expected closing parenthesis, found",
            Self::MissingOpeningBrace => "expected opening brace, found",
            Self::MissingClosingBrace => "expected closing brace, found",
        })
    }
}
