//! Recursive-descent parser with one token of lookahead (spec §4.3).
//!
//! Binary expressions are parsed with precedence climbing rather than the
//! source's flat "always recurse right" scheme, which the spec (§4.3, §9)
//! explicitly calls out as producing ambiguous right-leaning trees; this
//! is the "tighten the grammar" resolution the spec offers as one of the
//! two acceptable fixes.

use octo_lex::{Payload, Token, TokenKind};
use octo_util::diagnostic::{Error, ErrorKind, Handler};
use octo_util::symbol::SharedInterner;
use octo_util::Span;

use crate::ast::{Ast, BinOp, CompoundMember, Expr, ExprKind, Param, UnOp};

/// Statement-starting token kinds (spec §4.3's implicit
/// `TOKENKIND_EXPRESSION_STARTERS`), used to decide when a compound body
/// has ended and, during error recovery, where the next statement begins.
const STATEMENT_STARTERS: &[TokenKind] = &[
    TokenKind::Let,
    TokenKind::Func,
    TokenKind::Extern,
    TokenKind::Return,
    TokenKind::If,
    TokenKind::While,
    TokenKind::For,
    TokenKind::Type,
    TokenKind::Identifier,
    TokenKind::LeftBrace,
];

pub struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    handler: &'a Handler,
    interner: &'a SharedInterner,
}

/// Parses a complete token stream (bracketed by the tokenizer's synthetic
/// `{`/`}`/`Eof`) into a flat top-level statement list. Errors accumulate
/// in `handler`; callers must check `handler.has_errors()` before handing
/// the result to the semantic analyzer.
pub fn parse(tokens: Vec<Token>, handler: &Handler, interner: &SharedInterner) -> Ast {
    tracing::debug!(tokens = tokens.len(), "parsing");
    let mut parser = Parser {
        tokens,
        pos: 0,
        handler,
        interner,
    };
    let ast = parser.parse_program();
    tracing::debug!(statements = ast.len(), "parsed");
    ast
}

impl<'a> Parser<'a> {
    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn next_token(&self) -> &Token {
        &self.tokens[(self.pos + 1).min(self.tokens.len() - 1)]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    /// EOF is sticky: once reached, `advance` is a no-op (spec §4.3,
    /// grounded in the original source's `advance()`).
    fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if self.pos + 1 < self.tokens.len() && self.current().kind != TokenKind::Eof {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if kinds.contains(&self.current().kind) {
            Some(self.advance())
        } else {
            let expected = kinds
                .iter()
                .map(|k| k.describe())
                .collect::<Vec<_>>()
                .join(" or ");
            self.handler.report(Error::new(
                ErrorKind::UnexpectedSymbol {
                    expected,
                    found: self.current().lexeme.clone(),
                },
                self.current().span,
            ));
            None
        }
    }

    /// Skips tokens until the next plausible statement boundary, so one
    /// bad statement doesn't prevent diagnosing the rest of the file
    /// (spec §7: "parser subtree-by-subtree" error accumulation).
    fn synchronize(&mut self) {
        loop {
            if self.check(TokenKind::Eof) || self.check(TokenKind::RightBrace) {
                return;
            }
            if self.check(TokenKind::Semicolon) {
                self.advance();
                return;
            }
            if STATEMENT_STARTERS.contains(&self.current().kind) {
                return;
            }
            self.advance();
        }
    }

    fn parse_program(&mut self) -> Ast {
        self.expect(&[TokenKind::LeftBrace]);
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.check(TokenKind::Eof) {
            match self.parse_statement() {
                Some(stmt) => stmts.push(stmt),
                None => self.synchronize(),
            }
        }
        self.expect(&[TokenKind::RightBrace]);
        self.expect(&[TokenKind::Eof]);
        stmts
    }

    fn parse_statement(&mut self) -> Option<Expr> {
        match self.current().kind {
            TokenKind::Let => self.parse_variable_declaration(),
            TokenKind::Func => self.parse_function_declaration(),
            TokenKind::Extern => self.parse_extern(),
            TokenKind::Return => self.parse_return(),
            TokenKind::If => self.parse_conditional(false),
            TokenKind::While => self.parse_conditional(true),
            TokenKind::For => self.parse_for_loop(),
            TokenKind::Type => self.parse_type_declaration(),
            TokenKind::LeftBrace => self.parse_compound(),
            TokenKind::Identifier => self.parse_identifier_statement(),
            _ => {
                self.expect(&STATEMENT_STARTERS.to_vec());
                None
            }
        }
    }

    fn parse_compound(&mut self) -> Option<Expr> {
        let start = self.current().span;
        self.expect(&[TokenKind::LeftBrace])?;
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.check(TokenKind::Eof) {
            match self.parse_statement() {
                Some(stmt) => stmts.push(stmt),
                None => self.synchronize(),
            }
        }
        self.expect(&[TokenKind::RightBrace]);
        Some(Expr::new(start, ExprKind::Compound(stmts)))
    }

    fn parse_variable_declaration(&mut self) -> Option<Expr> {
        let start = self.current().span;
        self.expect(&[TokenKind::Let])?;
        let name_tok = self.expect(&[TokenKind::Identifier])?;
        let name = name_tok.lexeme.clone();
        let name_span = name_tok.span;

        let declared_type = if self.check(TokenKind::Colon) {
            self.advance();
            Some(Box::new(self.parse_type_rvalue()?))
        } else {
            None
        };

        let init = if self.check(TokenKind::Equal) {
            self.advance();
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };

        if declared_type.is_none() && init.is_none() {
            self.handler.report(Error::new(
                ErrorKind::UnexpectedSymbol {
                    expected: "':' or '='".into(),
                    found: self.current().lexeme.clone(),
                },
                self.current().span,
            ));
            return None;
        }

        self.expect(&[TokenKind::Semicolon]);
        Some(Expr::new(
            start,
            ExprKind::VariableDeclaration {
                name,
                name_span,
                declared_type,
                init,
                resolved_type: None,
            },
        ))
    }

    fn parse_params(&mut self) -> Option<(Vec<Param>, bool)> {
        let mut params = Vec::new();
        let mut is_variadic = false;
        if self.check(TokenKind::Identifier) {
            loop {
                let name_tok = self.expect(&[TokenKind::Identifier])?;
                self.expect(&[TokenKind::Colon])?;
                let type_rvalue = Box::new(self.parse_type_rvalue()?);
                params.push(Param {
                    name: name_tok.lexeme.clone(),
                    name_span: name_tok.span,
                    type_rvalue,
                });
                if self.check(TokenKind::Comma) {
                    self.advance();
                    if self.check(TokenKind::DoublePeriod) {
                        self.advance();
                        is_variadic = true;
                        break;
                    }
                    continue;
                }
                break;
            }
        }
        Some((params, is_variadic))
    }

    fn parse_function_declaration(&mut self) -> Option<Expr> {
        let start = self.current().span;
        self.expect(&[TokenKind::Func])?;
        let name_tok = self.expect(&[TokenKind::Identifier])?;
        self.expect(&[TokenKind::LeftParen])?;
        let (params, is_variadic) = self.parse_params()?;
        self.expect(&[TokenKind::RightParen])?;
        self.expect(&[TokenKind::Arrow])?;
        let return_type_rvalue = Box::new(self.parse_type_rvalue()?);

        let body = if self.check(TokenKind::LeftBrace) {
            Some(Box::new(self.parse_compound()?))
        } else {
            self.expect(&[TokenKind::Semicolon]);
            None
        };

        Some(Expr::new(
            start,
            ExprKind::FunctionDeclaration {
                name: name_tok.lexeme.clone(),
                name_span: name_tok.span,
                params,
                return_type_rvalue,
                is_variadic,
                body,
                resolved_type: None,
            },
        ))
    }

    fn parse_extern(&mut self) -> Option<Expr> {
        let start = self.current().span;
        self.expect(&[TokenKind::Extern])?;
        let func_decl = self.parse_function_declaration()?;
        Some(Expr::new(start, ExprKind::Extern(Box::new(func_decl))))
    }

    fn parse_return(&mut self) -> Option<Expr> {
        let start = self.current().span;
        self.expect(&[TokenKind::Return])?;
        let value = if !self.check(TokenKind::Semicolon) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect(&[TokenKind::Semicolon]);
        Some(Expr::new(start, ExprKind::Return(value)))
    }

    fn parse_conditional(&mut self, is_loop: bool) -> Option<Expr> {
        let start = self.current().span;
        if is_loop {
            self.expect(&[TokenKind::While])?;
        } else {
            self.expect(&[TokenKind::If])?;
        }
        let condition = Box::new(self.parse_expr()?);
        let true_body = Box::new(self.parse_compound()?);
        let false_body = if self.check(TokenKind::Else) {
            self.advance();
            if self.check(TokenKind::If) {
                Some(Box::new(self.parse_conditional(false)?))
            } else {
                Some(Box::new(self.parse_compound()?))
            }
        } else {
            None
        };
        Some(Expr::new(
            start,
            ExprKind::Conditional {
                is_loop,
                condition,
                true_body,
                false_body,
            },
        ))
    }

    fn parse_for_loop(&mut self) -> Option<Expr> {
        let start = self.current().span;
        self.expect(&[TokenKind::For])?;
        let iter_tok = self.expect(&[TokenKind::Identifier])?;
        self.expect(&[TokenKind::In])?;
        let iterable = Box::new(self.parse_expr()?);
        let body = Box::new(self.parse_compound()?);
        Some(Expr::new(
            start,
            ExprKind::ForLoop {
                iterator_name: iter_tok.lexeme.clone(),
                iterator_span: iter_tok.span,
                iterable,
                body,
            },
        ))
    }

    fn parse_type_declaration(&mut self) -> Option<Expr> {
        let start = self.current().span;
        self.expect(&[TokenKind::Type])?;
        let name_tok = self.expect(&[TokenKind::Identifier])?;
        self.expect(&[TokenKind::Equal])?;
        let type_rvalue = Box::new(self.parse_type_rvalue()?);
        self.expect(&[TokenKind::Semicolon]);
        Some(Expr::new(
            start,
            ExprKind::TypeDeclaration {
                name: name_tok.lexeme.clone(),
                name_span: name_tok.span,
                type_rvalue,
            },
        ))
    }

    /// Disambiguates a statement starting with an identifier: `(` is a
    /// call statement, `=` is an assignment, `[`/`.` begin a postfix
    /// lvalue chain used on the LHS of `=` (spec §4.3).
    fn parse_identifier_statement(&mut self) -> Option<Expr> {
        let expr = self.parse_postfix()?;
        if self.check(TokenKind::Equal) {
            let span = self.current().span;
            self.advance();
            let rvalue = Box::new(self.parse_expr()?);
            self.expect(&[TokenKind::Semicolon]);
            return Some(Expr::new(
                span,
                ExprKind::Assignment {
                    lvalue: Box::new(expr),
                    rvalue,
                },
            ));
        }
        self.expect(&[TokenKind::Semicolon]);
        Some(expr)
    }

    fn parse_expr(&mut self) -> Option<Expr> {
        self.parse_binary(0)
    }

    fn peek_binop(&self) -> Option<BinOp> {
        Some(match self.current().kind {
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Star => BinOp::Mul,
            TokenKind::ForwardSlash => BinOp::Div,
            TokenKind::Modulo => BinOp::Mod,
            TokenKind::DoubleEqual => BinOp::Eq,
            TokenKind::NotEqual => BinOp::Ne,
            TokenKind::Greater => BinOp::Gt,
            TokenKind::Less => BinOp::Lt,
            TokenKind::GreaterEqual => BinOp::Ge,
            TokenKind::LessEqual => BinOp::Le,
            TokenKind::And => BinOp::And,
            TokenKind::Or => BinOp::Or,
            _ => return None,
        })
    }

    fn parse_binary(&mut self, min_prec: u8) -> Option<Expr> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.peek_binop() {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            let op_span = self.current().span;
            self.advance();
            let right = self.parse_binary(prec + 1)?;
            left = Expr::new(
                op_span,
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
            );
        }
        Some(left)
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        let start = self.current().span;
        let op = match self.current().kind {
            TokenKind::Minus => Some(UnOp::Neg),
            TokenKind::Bang => Some(UnOp::Not),
            TokenKind::Star => Some(UnOp::Deref),
            TokenKind::Ampersand => Some(UnOp::AddressOf),
            _ => None,
        };
        match op {
            Some(op) => {
                self.advance();
                let operand = Box::new(self.parse_unary()?);
                Some(Expr::new(start, ExprKind::Unary { op, operand }))
            }
            None => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) -> Option<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.check(TokenKind::LeftBracket) {
                let span = self.current().span;
                self.advance();
                let index = Box::new(self.parse_expr()?);
                self.expect(&[TokenKind::RightBracket]);
                expr = Expr::new(
                    span,
                    ExprKind::ArraySubscript {
                        object: Box::new(expr),
                        index,
                    },
                );
            } else if self.check(TokenKind::Period) {
                let span = self.current().span;
                self.advance();
                let member_tok = self.expect(&[TokenKind::Identifier])?;
                expr = Expr::new(
                    span,
                    ExprKind::MemberAccess {
                        object: Box::new(expr),
                        member: member_tok.lexeme.clone(),
                        member_span: member_tok.span,
                    },
                );
            } else {
                break;
            }
        }
        Some(expr)
    }

    fn parse_primary(&mut self) -> Option<Expr> {
        let tok = self.current().clone();
        match tok.kind {
            TokenKind::Integer => {
                self.advance();
                let Payload::Integer(v) = tok.payload else {
                    unreachable!()
                };
                Some(Expr::new(tok.span, ExprKind::Integer(v)))
            }
            TokenKind::Float => {
                self.advance();
                let Payload::Float(v) = tok.payload else {
                    unreachable!()
                };
                Some(Expr::new(tok.span, ExprKind::Float(v)))
            }
            TokenKind::String => {
                self.advance();
                let Payload::String(sym) = tok.payload else {
                    unreachable!()
                };
                Some(Expr::new(
                    tok.span,
                    ExprKind::Str(self.interner.resolve(sym)),
                ))
            }
            TokenKind::Character => {
                self.advance();
                let Payload::Character(v) = tok.payload else {
                    unreachable!()
                };
                Some(Expr::new(tok.span, ExprKind::Character(v)))
            }
            TokenKind::Boolean => {
                self.advance();
                let Payload::Boolean(v) = tok.payload else {
                    unreachable!()
                };
                Some(Expr::new(tok.span, ExprKind::Boolean(v)))
            }
            TokenKind::Identifier => self.parse_identifier_primary(),
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&[TokenKind::RightParen]);
                Some(inner)
            }
            TokenKind::LeftBracket => self.parse_array_literal(),
            _ => {
                self.handler.report(Error::new(
                    ErrorKind::UnexpectedSymbol {
                        expected: "an expression".into(),
                        found: tok.lexeme.clone(),
                    },
                    tok.span,
                ));
                None
            }
        }
    }

    fn parse_identifier_primary(&mut self) -> Option<Expr> {
        let name_tok = self.advance();
        let name = name_tok.lexeme.clone();

        if self.check(TokenKind::LeftParen) {
            self.advance();
            let mut args = Vec::new();
            if !self.check(TokenKind::RightParen) {
                loop {
                    args.push(self.parse_expr()?);
                    if self.check(TokenKind::Comma) {
                        self.advance();
                        continue;
                    }
                    break;
                }
            }
            self.expect(&[TokenKind::RightParen]);
            return Some(Expr::new(
                name_tok.span,
                ExprKind::FunctionCall {
                    callee: name,
                    callee_span: name_tok.span,
                    args,
                },
            ));
        }

        if self.check(TokenKind::LeftBrace) {
            return self.parse_compound_literal(name, name_tok.span);
        }

        Some(Expr::new(
            name_tok.span,
            ExprKind::Identifier {
                name,
                resolved_type: None,
            },
        ))
    }

    fn parse_compound_literal(&mut self, type_name: String, type_name_span: Span) -> Option<Expr> {
        self.expect(&[TokenKind::LeftBrace])?;
        let mut members = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.check(TokenKind::Eof) {
            self.expect(&[TokenKind::Period])?;
            let member_tok = self.expect(&[TokenKind::Identifier])?;
            self.expect(&[TokenKind::Equal])?;
            let value = Box::new(self.parse_expr()?);
            members.push(CompoundMember {
                name: member_tok.lexeme.clone(),
                name_span: member_tok.span,
                value,
            });
            if self.check(TokenKind::Comma) {
                self.advance();
                continue;
            }
            break;
        }
        self.expect(&[TokenKind::RightBrace]);
        Some(Expr::new(
            type_name_span,
            ExprKind::CompoundLiteral {
                type_name,
                type_name_span,
                members,
                resolved_type: None,
            },
        ))
    }

    fn parse_array_literal(&mut self) -> Option<Expr> {
        let start = self.current().span;
        self.expect(&[TokenKind::LeftBracket])?;
        let mut elements = Vec::new();
        if !self.check(TokenKind::RightBracket) {
            loop {
                elements.push(self.parse_expr()?);
                if self.check(TokenKind::Comma) {
                    self.advance();
                    continue;
                }
                break;
            }
        }
        self.expect(&[TokenKind::RightBracket]);
        Some(Expr::new(
            start,
            ExprKind::ArrayLiteral {
                elements,
                resolved_type: None,
            },
        ))
    }

    fn parse_type_rvalue(&mut self) -> Option<Expr> {
        let tok = self.current().clone();
        match tok.kind {
            TokenKind::Identifier => {
                self.advance();
                Some(Expr::new(tok.span, ExprKind::TypeIdentifier(tok.lexeme)))
            }
            TokenKind::Ampersand => {
                self.advance();
                let inner = Box::new(self.parse_type_rvalue()?);
                Some(Expr::new(tok.span, ExprKind::PointerType(inner)))
            }
            TokenKind::LeftBracket => {
                self.advance();
                let length = if self.check(TokenKind::Integer) {
                    let len_tok = self.advance();
                    let Payload::Integer(n) = len_tok.payload else {
                        unreachable!()
                    };
                    Some(n as usize)
                } else {
                    None
                };
                self.expect(&[TokenKind::RightBracket]);
                let element_type = Box::new(self.parse_type_rvalue()?);
                Some(Expr::new(
                    tok.span,
                    ExprKind::ArrayType {
                        length,
                        element_type,
                    },
                ))
            }
            TokenKind::Struct | TokenKind::Union => {
                self.advance();
                let is_struct = tok.kind == TokenKind::Struct;
                self.expect(&[TokenKind::LeftBrace])?;
                let mut members = Vec::new();
                while !self.check(TokenKind::RightBrace) && !self.check(TokenKind::Eof) {
                    let member_tok = self.expect(&[TokenKind::Identifier])?;
                    self.expect(&[TokenKind::Colon])?;
                    let value = Box::new(self.parse_type_rvalue()?);
                    self.expect(&[TokenKind::Semicolon]);
                    members.push(CompoundMember {
                        name: member_tok.lexeme.clone(),
                        name_span: member_tok.span,
                        value,
                    });
                }
                self.expect(&[TokenKind::RightBrace]);
                Some(Expr::new(
                    tok.span,
                    ExprKind::CompoundDefinition { is_struct, members },
                ))
            }
            _ => {
                self.handler.report(Error::new(
                    ErrorKind::UnexpectedSymbol {
                        expected: "a type".into(),
                        found: tok.lexeme.clone(),
                    },
                    tok.span,
                ));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octo_util::SourceMap;

    fn parse_source(src: &str) -> (Ast, Handler) {
        let source = SourceMap::from_source("t.oc", src);
        let interner = SharedInterner::new();
        let lex_handler = Handler::new();
        let tokens = octo_lex::tokenize(&source, &interner, &lex_handler);
        assert!(!lex_handler.has_errors(), "lex errors: {:?}", lex_handler.errors());
        let handler = Handler::new();
        let ast = parse(tokens, &handler, &interner);
        (ast, handler)
    }

    #[test]
    fn variable_declaration_with_both_annotation_and_init() {
        let (ast, handler) = parse_source("let x: i32 = 5;");
        assert!(!handler.has_errors());
        assert_eq!(ast.len(), 1);
        match &ast[0].kind {
            ExprKind::VariableDeclaration { name, declared_type, init, .. } => {
                assert_eq!(name, "x");
                assert!(declared_type.is_some());
                assert!(init.is_some());
            }
            other => panic!("expected variable declaration, got {other:?}"),
        }
    }

    #[test]
    fn missing_annotation_and_init_is_parse_error() {
        let (_, handler) = parse_source("let x;");
        assert!(handler.has_errors());
    }

    #[test]
    fn binary_precedence_is_standard_left_associative() {
        let (ast, handler) = parse_source("let x = 1 + 2 * 3;");
        assert!(!handler.has_errors());
        let ExprKind::VariableDeclaration { init: Some(init), .. } = &ast[0].kind else {
            panic!("expected var decl")
        };
        // 1 + (2 * 3): top node must be Add, right side Mul
        match &init.kind {
            ExprKind::Binary { op: BinOp::Add, right, .. } => {
                assert!(matches!(right.kind, ExprKind::Binary { op: BinOp::Mul, .. }));
            }
            other => panic!("expected Add at top, got {other:?}"),
        }
    }

    #[test]
    fn left_associative_same_precedence() {
        let (ast, _) = parse_source("let x = 1 - 2 - 3;");
        let ExprKind::VariableDeclaration { init: Some(init), .. } = &ast[0].kind else {
            panic!("expected var decl")
        };
        // (1 - 2) - 3: top node's LEFT side is the nested Sub.
        match &init.kind {
            ExprKind::Binary { op: BinOp::Sub, left, .. } => {
                assert!(matches!(left.kind, ExprKind::Binary { op: BinOp::Sub, .. }));
            }
            other => panic!("expected Sub at top, got {other:?}"),
        }
    }

    #[test]
    fn function_declaration_with_variadic() {
        let (ast, handler) =
            parse_source("extern func printf(fmt: &char, ..) -> i32;");
        assert!(!handler.has_errors());
        match &ast[0].kind {
            ExprKind::Extern(inner) => match &inner.kind {
                ExprKind::FunctionDeclaration { is_variadic, body, .. } => {
                    assert!(*is_variadic);
                    assert!(body.is_none());
                }
                other => panic!("expected function declaration, got {other:?}"),
            },
            other => panic!("expected extern, got {other:?}"),
        }
    }

    #[test]
    fn while_with_else_parses_for_semantic_stage_to_reject() {
        let (ast, handler) = parse_source("while x { } else { }");
        assert!(!handler.has_errors());
        match &ast[0].kind {
            ExprKind::Conditional { is_loop: true, false_body: Some(_), .. } => {}
            other => panic!("expected while with else body, got {other:?}"),
        }
    }

    #[test]
    fn array_length_mismatch_source_parses_cleanly() {
        let (ast, handler) = parse_source("let a: [3]i32 = [1, 2];");
        assert!(!handler.has_errors());
        assert_eq!(ast.len(), 1);
    }

    #[test]
    fn struct_type_declaration() {
        let (ast, handler) =
            parse_source("type Point = struct { x: i32; y: i32; };");
        assert!(!handler.has_errors());
        match &ast[0].kind {
            ExprKind::TypeDeclaration { type_rvalue, .. } => {
                assert!(matches!(
                    type_rvalue.kind,
                    ExprKind::CompoundDefinition { is_struct: true, .. }
                ));
            }
            other => panic!("expected type declaration, got {other:?}"),
        }
    }

    #[test]
    fn unexpected_symbol_recovers_and_keeps_parsing() {
        let (ast, handler) = parse_source("let ; let y: i32 = 1;");
        assert!(handler.has_errors());
        assert!(ast
            .iter()
            .any(|e| matches!(e.kind, ExprKind::VariableDeclaration { ref name, .. } if name == "y")));
    }
}
