use crate::token::{TextRange, Token, TokenKind};
use std::{iter::Peekable, str::Chars};

#[derive(Debug)]
pub struct Lexer<'a> {
    source: &'a str,
    stream: Peekable<Chars<'a>>,
    line: usize,
    start: usize,
    current: usize,
    exhausted: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            stream: source.chars().peekable(),
            line: 0,
            start: 0,
            current: 0,
            exhausted: false,
        }
    }

    /// Consumes the lexer and returns every token in
    /// the source, terminated by a single `EOF` token.
    pub fn lex_all(self) -> Vec<Token> {
        self.collect()
    }

    /// Returns the next token in the source. Once the source is
    /// exhausted, every subsequent call returns an `EOF` token.
    pub fn lex(&mut self) -> Token {
        self.skip_whitespace();
        self.start = self.current;
        match self.advance() {
            Some(c) => match c {
                '=' => self.lookahead_for_token('=', TokenKind::EQUAL_EQUAL, TokenKind::EQUAL),
                '!' => self.lookahead_for_token('=', TokenKind::BANG_EQUAL, TokenKind::BANG),
                _ => {
                    if let Some(t) = TokenKind::from_char(c) {
                        self.make_token(t)
                    } else if is_ident_char(c) {
                        self.lex_ident()
                    } else if c.is_ascii_digit() {
                        self.lex_number()
                    } else {
                        self.make_token(TokenKind::ILLEGAL)
                    }
                }
            },
            None => Token::new(
                TokenKind::EOF,
                TextRange {
                    start: self.current,
                    end: self.current,
                },
                self.line,
                "end of file".to_string(),
            ),
        }
    }

    fn lex_ident(&mut self) -> Token {
        self.advance_while(is_ident_char);
        if let Some(t) = TokenKind::from_keyword(self.lexeme_from_range()) {
            self.make_token(t)
        } else {
            self.make_token(TokenKind::IDENT)
        }
    }

    fn lex_number(&mut self) -> Token {
        self.advance_while(|c| c.is_ascii_digit());
        self.make_token(TokenKind::INT)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.advance_if(char::is_whitespace) {
            if c == '\n' {
                self.line += 1;
            }
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(
            kind,
            self.text_range(),
            self.line,
            self.lexeme_from_range().to_string(),
        )
    }

    fn lexeme_from_range(&self) -> &'a str {
        &self.source[self.start..self.current]
    }

    fn text_range(&self) -> TextRange {
        TextRange {
            start: self.start,
            end: self.current,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.stream.next()?;
        self.current += c.len_utf8();
        Some(c)
    }

    fn advance_if<F>(&mut self, cond: F) -> Option<char>
    where
        F: FnOnce(char) -> bool,
    {
        if self.stream.peek().filter(|&&c| cond(c)).is_some() {
            self.advance()
        } else {
            None
        }
    }

    fn advance_while<F>(&mut self, cond: F) -> Option<usize>
    where
        F: Fn(char) -> bool,
    {
        let mut count: usize = 0;
        while self.stream.peek().filter(|&&c| cond(c)).is_some() {
            count += 1;
            self.advance();
        }
        count.ne(&0).then_some(count)
    }

    fn lookahead_for_token(
        &mut self,
        match_char: char,
        if_match: TokenKind,
        no_match: TokenKind,
    ) -> Token {
        if self.advance_if(|c| c == match_char).is_some() {
            self.make_token(if_match)
        } else {
            self.make_token(no_match)
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let token = self.lex();
        self.exhausted = token.kind == TokenKind::EOF;
        Some(token)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lex_test(input: &str, expected: Vec<(TokenKind, &str)>) {
        let tokens = Lexer::new(input)
            .lex_all()
            .into_iter()
            .map(|t| (t.kind, t.lexeme))
            .collect::<Vec<_>>();
        let expected = expected
            .into_iter()
            .map(|(kind, lexeme)| (kind, lexeme.to_string()))
            .collect::<Vec<_>>();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn put_stmt() {
        lex_test(
            "put five = 5;",
            vec![
                (TokenKind::PUT, "put"),
                (TokenKind::IDENT, "five"),
                (TokenKind::EQUAL, "="),
                (TokenKind::INT, "5"),
                (TokenKind::SEMICOLON, ";"),
                (TokenKind::EOF, "end of file"),
            ],
        );
    }

    #[test]
    fn operators() {
        lex_test(
            "= + - * / == != < > !",
            vec![
                (TokenKind::EQUAL, "="),
                (TokenKind::PLUS, "+"),
                (TokenKind::MINUS, "-"),
                (TokenKind::STAR, "*"),
                (TokenKind::SLASH, "/"),
                (TokenKind::EQUAL_EQUAL, "=="),
                (TokenKind::BANG_EQUAL, "!="),
                (TokenKind::LESS, "<"),
                (TokenKind::GREATER, ">"),
                (TokenKind::BANG, "!"),
                (TokenKind::EOF, "end of file"),
            ],
        );
    }

    #[test]
    fn box_literal() {
        lex_test(
            "box(a, b) { unbox a; }",
            vec![
                (TokenKind::BOX, "box"),
                (TokenKind::LPAREN, "("),
                (TokenKind::IDENT, "a"),
                (TokenKind::COMMA, ","),
                (TokenKind::IDENT, "b"),
                (TokenKind::RPAREN, ")"),
                (TokenKind::LBRACE, "{"),
                (TokenKind::UNBOX, "unbox"),
                (TokenKind::IDENT, "a"),
                (TokenKind::SEMICOLON, ";"),
                (TokenKind::RBRACE, "}"),
                (TokenKind::EOF, "end of file"),
            ],
        );
    }

    #[test]
    fn keyword_prefix_is_ident() {
        lex_test(
            "boxes putter",
            vec![
                (TokenKind::IDENT, "boxes"),
                (TokenKind::IDENT, "putter"),
                (TokenKind::EOF, "end of file"),
            ],
        );
    }

    #[test]
    fn illegal_char() {
        lex_test(
            "5 @ 3",
            vec![
                (TokenKind::INT, "5"),
                (TokenKind::ILLEGAL, "@"),
                (TokenKind::INT, "3"),
                (TokenKind::EOF, "end of file"),
            ],
        );
    }

    #[test]
    fn lines_and_ranges() {
        let tokens = Lexer::new("put x = 10;\nx").lex_all();
        assert_eq!(tokens[3].range, TextRange { start: 8, end: 10 });
        assert_eq!(tokens[5].line, 1);
        assert_eq!(tokens[5].lexeme, "x");
        assert_eq!(tokens[6].kind, TokenKind::EOF);
    }

    #[test]
    fn eof_repeats() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.lex().kind, TokenKind::EOF);
        assert_eq!(lexer.lex().kind, TokenKind::EOF);
    }

    #[test]
    fn iterator_stops_after_eof() {
        let mut lexer = Lexer::new("1");
        assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::INT));
        assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::EOF));
        assert_eq!(lexer.next(), None);
    }
}
