use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{BinOp, Expr, Ident, Program, Stmt, UnaryOp},
    error::{Error, ErrorMsg},
    token::{Token, TokenKind},
};

/// Binding strength of an infix operator. A higher variant
/// binds tighter than every variant declared before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Sum,
    Equals,
    LessGreater,
    Product,
    Prefix,
    Call,
}

impl Precedence {
    fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::PLUS | TokenKind::MINUS => Self::Sum,
            TokenKind::EQUAL_EQUAL | TokenKind::BANG_EQUAL => Self::Equals,
            TokenKind::LESS | TokenKind::GREATER => Self::LessGreater,
            TokenKind::STAR | TokenKind::SLASH => Self::Product,
            TokenKind::LPAREN => Self::Call,
            _ => Self::Lowest,
        }
    }
}

#[derive(Debug)]
pub struct Parser<I: Iterator<Item = Token>> {
    stream: Peekable<I>,
    errors: Vec<Error>,
    // Number of `box` bodies currently open
    depth: usize,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn new<T>(tokens: T) -> Self
    where
        T: IntoIterator<Item = Token, IntoIter = I>,
    {
        Self {
            stream: tokens.into_iter().peekable(),
            errors: Vec::default(),
            depth: 0,
        }
    }

    /// Parses every statement in the stream. A statement that fails
    /// to parse is dropped from the program (or from the `box` body
    /// holding it), its error is recorded, and parsing resumes at the
    /// next statement boundary of the same block.
    pub fn parse_program(mut self) -> (Program, Vec<Error>) {
        let mut stmts: Vec<Stmt> = Vec::default();
        while self.peek_kind() != TokenKind::EOF {
            if let Some(stmt) = self.parse_stmt_or_sync() {
                stmts.push(stmt);
            }
        }

        (Program { stmts }, self.errors)
    }

    pub fn parse_all(self) -> Result<Program, Vec<Error>> {
        let (program, errors) = self.parse_program();
        errors.is_empty().then_some(program).ok_or(errors)
    }

    fn parse_stmt_or_sync(&mut self) -> Option<Stmt> {
        match self.parse_stmt() {
            Ok(stmt) => Some(stmt),
            Err(e) => {
                self.errors.push(e);
                self.sync();
                None
            }
        }
    }

    fn parse_stmt(&mut self) -> Result<Stmt, Error> {
        let stmt = match self.peek_kind() {
            TokenKind::PUT => self.parse_put_stmt()?,
            TokenKind::UNBOX => self.parse_unbox_stmt()?,
            _ => Stmt::Expr(self.parse_expr(Precedence::Lowest)?),
        };
        // The trailing semicolon is optional
        self.advance_if(|t| t.kind == TokenKind::SEMICOLON);
        Ok(stmt)
    }

    fn parse_put_stmt(&mut self) -> Result<Stmt, Error> {
        // Consume the `put` keyword
        self.advance();
        let ident = Ident::new(
            self.advance_or_err(TokenKind::IDENT, ErrorMsg::InvalidIdent)?
                .lexeme,
        );
        self.advance_or_err(TokenKind::EQUAL, ErrorMsg::MissingEqual)?;
        let value = self.parse_expr(Precedence::Lowest)?;

        Ok(Stmt::Put { ident, value })
    }

    fn parse_unbox_stmt(&mut self) -> Result<Stmt, Error> {
        // Consume the `unbox` keyword
        self.advance();
        Ok(Stmt::Unbox(self.parse_expr(Precedence::Lowest)?))
    }

    fn parse_expr(&mut self, precedence: Precedence) -> Result<Expr, Error> {
        let mut lhs = self.parse_prefix()?;
        loop {
            let kind = self.peek_kind();
            let next = Precedence::of(kind);
            if precedence >= next {
                break;
            }
            lhs = if kind == TokenKind::LPAREN {
                // Consume the opening parenthesis
                self.advance();
                Expr::Call {
                    func: Box::new(lhs),
                    args: self.parse_call_args()?,
                }
            } else if let Some(op) = BinOp::from_token(kind) {
                self.advance();
                Expr::Binary {
                    lhs: Box::new(lhs),
                    op,
                    rhs: Box::new(self.parse_expr(next)?),
                }
            } else {
                break;
            };
        }

        Ok(lhs)
    }

    fn parse_prefix(&mut self) -> Result<Expr, Error> {
        let kind = self.peek_kind();
        if let Some(op) = UnaryOp::from_token(kind) {
            self.advance();
            return Ok(Expr::Unary {
                op,
                expr: Box::new(self.parse_expr(Precedence::Prefix)?),
            });
        }
        match kind {
            TokenKind::IDENT | TokenKind::INT | TokenKind::LPAREN | TokenKind::BOX => {}
            // The offending token is left in the stream for `sync`
            _ => return Err(self.error_at_peek(ErrorMsg::NoPrefixRule)),
        }
        let Some(t) = self.advance() else {
            return Err(Self::eof_error(ErrorMsg::NoPrefixRule));
        };
        match t.kind {
            TokenKind::IDENT => Ok(Expr::Ident(Ident::new(t.lexeme))),
            TokenKind::INT => t
                .lexeme
                .parse::<i64>()
                .map(Expr::Integer)
                .map_err(|_| Self::error(&t, ErrorMsg::InvalidInteger)),
            TokenKind::LPAREN => self.parse_group(),
            _ => self.parse_function(),
        }
    }

    fn parse_group(&mut self) -> Result<Expr, Error> {
        let expr = self.parse_expr(Precedence::Lowest)?;
        self.advance_or_err(TokenKind::RPAREN, ErrorMsg::MissingClosingParen)?;
        Ok(expr)
    }

    fn parse_function(&mut self) -> Result<Expr, Error> {
        self.advance_or_err(TokenKind::LPAREN, ErrorMsg::MissingOpeningParen)?;
        let mut params = vec![];
        while self.peek_kind() != TokenKind::RPAREN {
            params.push(Ident::new(
                self.advance_or_err(TokenKind::IDENT, ErrorMsg::InvalidIdent)?
                    .lexeme,
            ));
            if self.advance_if(|t| t.kind == TokenKind::COMMA).is_none() {
                break;
            }
        }
        self.advance_or_err(TokenKind::RPAREN, ErrorMsg::MissingClosingParen)?;
        self.advance_or_err(TokenKind::LBRACE, ErrorMsg::MissingOpeningBrace)?;
        let body = self.parse_block()?;

        Ok(Expr::Function {
            params,
            body: Rc::new(body),
        })
    }

    fn parse_block(&mut self) -> Result<Vec<Stmt>, Error> {
        let mut stmts = Vec::default();
        self.depth += 1;
        let res = loop {
            match self.peek_kind() {
                TokenKind::RBRACE => {
                    // Consume the closing brace
                    self.advance();
                    break Ok(stmts);
                }
                TokenKind::EOF => break Err(self.error_at_peek(ErrorMsg::MissingClosingBrace)),
                _ => stmts.extend(self.parse_stmt_or_sync()),
            }
        };
        self.depth -= 1;
        res
    }

    fn parse_call_args(&mut self) -> Result<Vec<Expr>, Error> {
        let mut args = vec![];
        if self.advance_if(|t| t.kind == TokenKind::RPAREN).is_some() {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr(Precedence::Lowest)?);
            if self.advance_if(|t| t.kind == TokenKind::COMMA).is_none() {
                break;
            }
        }
        // Consume the closing parenthesis
        self.advance_or_err(TokenKind::RPAREN, ErrorMsg::MissingClosingParen)?;

        Ok(args)
    }

    fn peek_kind(&mut self) -> TokenKind {
        self.stream.peek().map_or(TokenKind::EOF, |t| t.kind)
    }

    fn advance(&mut self) -> Option<Token> {
        self.stream.next()
    }

    fn advance_if<F>(&mut self, cond: F) -> Option<Token>
    where
        F: FnOnce(&Token) -> bool,
    {
        self.stream.next_if(cond)
    }

    fn advance_or_err(&mut self, kind: TokenKind, msg: ErrorMsg) -> Result<Token, Error> {
        match self.advance_if(|t| t.kind == kind) {
            Some(t) => Ok(t),
            None => Err(self.error_at_peek(msg)),
        }
    }

    /// Skips past the broken statement: up to and including the next
    /// semicolon, or up to the next statement keyword, or up to the
    /// brace closing the enclosing `box` body. Braces opened while
    /// skipping are skipped as a whole.
    fn sync(&mut self) {
        let mut nested: usize = 0;
        while let Some(t) = self.stream.peek() {
            match t.kind {
                TokenKind::EOF => return,
                TokenKind::SEMICOLON if nested == 0 => {
                    self.advance();
                    return;
                }
                TokenKind::PUT | TokenKind::UNBOX if nested == 0 => return,
                TokenKind::RBRACE if nested == 0 && self.depth > 0 => return,
                TokenKind::LBRACE => nested += 1,
                TokenKind::RBRACE => nested = nested.saturating_sub(1),
                _ => (),
            }
            self.advance();
        }
    }

    fn error_at_peek(&mut self, msg: ErrorMsg) -> Error {
        match self.stream.peek() {
            Some(t) => Self::error(t, msg),
            None => Self::eof_error(msg),
        }
    }

    fn error(token: &Token, msg: ErrorMsg) -> Error {
        format!("Parse error at line {}: {} {}", token.line + 1, msg, token)
    }

    fn eof_error(msg: ErrorMsg) -> Error {
        format!("Parse error: {} end of file", msg)
    }
}
