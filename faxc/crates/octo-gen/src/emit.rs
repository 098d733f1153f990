//! The emitter (spec §6): a mechanical, one-pass walk of the analyzed tree
//! that writes C source. This stage does no checking of its own — it trusts
//! that the caller only hands it a tree for which `Handler::has_errors()`
//! was `false` after analysis, so every `resolved_type` slot it reads is
//! filled in and every construct is well-formed.
//!
//! Variable/function declaration types come straight off the tree's
//! `resolved_type` fields; the only thing this stage needs beyond the tree
//! itself is [`SemanticContext::named_types`], to emit one C `typedef` per
//! user-declared name in declaration order.

use std::io::Write;

use octo_par::{Ast, Expr, ExprKind, UnOp};
use octo_sem::SemanticContext;
use octo_util::Type;

use crate::error::{EmitError, Result};
use crate::types::declare;

/// Runs the emitter over an analyzed tree, writing standalone C source to
/// `out`. Include lines cover the fixed-width integer and bool spellings
/// the type mapping produces; callers that need more from the C standard
/// library append it themselves.
pub fn emit_c<W: Write>(ast: &Ast, context: &SemanticContext, out: &mut W) -> Result<()> {
    tracing::debug!(
        statements = ast.len(),
        named_types = context.named_types.len(),
        "emitting C"
    );
    writeln!(out, "#include <stdint.h>")?;
    writeln!(out, "#include <stdbool.h>")?;
    writeln!(out)?;

    for (name, ty) in &context.named_types {
        writeln!(out, "typedef {};", declare(ty, name)?)?;
    }
    if !context.named_types.is_empty() {
        writeln!(out)?;
    }

    let mut emitter = Emitter { out };
    for stmt in ast {
        emitter.emit_top_level(stmt)?;
    }
    Ok(())
}

struct Emitter<'a, W: Write> {
    out: &'a mut W,
}

impl<'a, W: Write> Emitter<'a, W> {
    fn emit_top_level(&mut self, expr: &Expr) -> Result<()> {
        match &expr.kind {
            ExprKind::FunctionDeclaration { .. } => self.emit_function(expr),
            ExprKind::Extern(inner) => self.emit_function(inner),
            ExprKind::TypeDeclaration { .. } => Ok(()),
            _ => self.emit_statement(expr, 0),
        }
    }

    fn emit_function(&mut self, expr: &Expr) -> Result<()> {
        let ExprKind::FunctionDeclaration {
            name,
            params,
            body,
            resolved_type,
            ..
        } = &expr.kind
        else {
            unreachable!("emit_function called on a non-function node")
        };
        let Some(Type::Function {
            params: param_types,
            return_type,
            variadic,
        }) = resolved_type
        else {
            return Err(EmitError::UnresolvedType {
                what: format!("function '{name}'"),
            });
        };

        let mut param_list = String::new();
        for (i, (param, ty)) in params.iter().zip(param_types.iter()).enumerate() {
            if i > 0 {
                param_list.push_str(", ");
            }
            param_list.push_str(&declare(ty, &param.name)?);
        }
        if *variadic {
            if !params.is_empty() {
                param_list.push_str(", ");
            }
            param_list.push_str("...");
        }
        if param_list.is_empty() {
            param_list.push_str("void");
        }

        let signature = declare(return_type, &format!("{name}({param_list})"))?;
        match body {
            Some(body) => {
                writeln!(self.out, "{signature} {{")?;
                self.emit_block_statements(body, 1)?;
                writeln!(self.out, "}}")?;
                writeln!(self.out)?;
            }
            None => writeln!(self.out, "{signature};")?,
        }
        Ok(())
    }

    fn emit_block_statements(&mut self, body: &Expr, indent: usize) -> Result<()> {
        let ExprKind::Compound(stmts) = &body.kind else {
            unreachable!("function/conditional/loop body is always a Compound")
        };
        for stmt in stmts {
            self.emit_statement(stmt, indent)?;
        }
        Ok(())
    }

    fn emit_statement(&mut self, expr: &Expr, indent: usize) -> Result<()> {
        let pad = "    ".repeat(indent);
        match &expr.kind {
            ExprKind::VariableDeclaration {
                name,
                init,
                resolved_type,
                ..
            } => {
                let ty = resolved_type.as_ref().ok_or_else(|| EmitError::UnresolvedType {
                    what: format!("variable '{name}'"),
                })?;
                let decl = declare(ty, name)?;
                match init {
                    Some(value) => writeln!(self.out, "{pad}{decl} = {};", self.emit_expr(value)?)?,
                    None => writeln!(self.out, "{pad}{decl};")?,
                }
            }
            ExprKind::Compound(_) => {
                writeln!(self.out, "{pad}{{")?;
                self.emit_block_statements(expr, indent + 1)?;
                writeln!(self.out, "{pad}}}")?;
            }
            ExprKind::Return(value) => match value {
                Some(v) => writeln!(self.out, "{pad}return {};", self.emit_expr(v)?)?,
                None => writeln!(self.out, "{pad}return;")?,
            },
            ExprKind::Assignment { lvalue, rvalue } => {
                writeln!(
                    self.out,
                    "{pad}{} = {};",
                    self.emit_expr(lvalue)?,
                    self.emit_expr(rvalue)?
                )?;
            }
            ExprKind::Conditional { .. } => self.emit_conditional(expr, indent, true)?,
            ExprKind::ForLoop {
                iterator_name,
                iterable,
                body,
                ..
            } => {
                let it = self.emit_expr(iterable)?;
                writeln!(
                    self.out,
                    "{pad}for (size_t __i = 0; __i < sizeof({it}) / sizeof(({it})[0]); __i++) {{"
                )?;
                writeln!(
                    self.out,
                    "{pad}    __typeof__(({it})[0]) {iterator_name} = ({it})[__i];"
                )?;
                self.emit_block_statements(body, indent + 1)?;
                writeln!(self.out, "{pad}}}")?;
            }
            ExprKind::TypeDeclaration { .. } => {}
            ExprKind::FunctionDeclaration { .. } => self.emit_function(expr)?,
            ExprKind::Extern(inner) => self.emit_function(inner)?,
            _ => writeln!(self.out, "{pad}{};", self.emit_expr(expr)?)?,
        }
        Ok(())
    }

    /// Emits an `if`/`while` and, for `if`, a trailing `else` or `else if`
    /// chain. `leading_pad` is `false` when called for the `if` half of an
    /// `else if`, since the caller already wrote `"} else "`.
    fn emit_conditional(&mut self, expr: &Expr, indent: usize, leading_pad: bool) -> Result<()> {
        let ExprKind::Conditional {
            is_loop,
            condition,
            true_body,
            false_body,
        } = &expr.kind
        else {
            unreachable!()
        };
        let pad = "    ".repeat(indent);
        let keyword = if *is_loop { "while" } else { "if" };
        let cond = self.emit_expr(condition)?;
        if leading_pad {
            write!(self.out, "{pad}")?;
        }
        writeln!(self.out, "{keyword} ({cond}) {{")?;
        self.emit_block_statements(true_body, indent + 1)?;
        match false_body {
            Some(fb) if matches!(fb.kind, ExprKind::Conditional { .. }) => {
                write!(self.out, "{pad}}} else ")?;
                self.emit_conditional(fb, indent, false)?;
            }
            Some(fb) => {
                writeln!(self.out, "{pad}}} else {{")?;
                self.emit_block_statements(fb, indent + 1)?;
                writeln!(self.out, "{pad}}}")?;
            }
            None => writeln!(self.out, "{pad}}}")?,
        }
        Ok(())
    }

    fn emit_expr(&mut self, expr: &Expr) -> Result<String> {
        Ok(match &expr.kind {
            ExprKind::Integer(v) => v.to_string(),
            ExprKind::Float(v) => format!("{v}"),
            ExprKind::Str(s) => format!("{s:?}"),
            ExprKind::Character(c) => format!("'{}'", escape_char(*c)),
            ExprKind::Boolean(b) => b.to_string(),
            ExprKind::Binary { op, left, right } => {
                format!("({} {op} {})", self.emit_expr(left)?, self.emit_expr(right)?)
            }
            ExprKind::Unary { op, operand } => {
                format!("({op}{})", self.emit_expr(operand)?)
            }
            ExprKind::FunctionCall { callee, args, .. } => {
                let mut rendered = Vec::with_capacity(args.len());
                for arg in args {
                    rendered.push(self.emit_expr(arg)?);
                }
                format!("{callee}({})", rendered.join(", "))
            }
            ExprKind::ArrayLiteral { elements, resolved_type } => {
                let ty = resolved_type.as_ref().ok_or_else(|| EmitError::UnresolvedType {
                    what: "array literal".into(),
                })?;
                let mut rendered = Vec::with_capacity(elements.len());
                for element in elements {
                    rendered.push(self.emit_expr(element)?);
                }
                format!("({}){{{}}}", declare(ty, "")?, rendered.join(", "))
            }
            ExprKind::CompoundLiteral { type_name, members, .. } => {
                let mut rendered = Vec::with_capacity(members.len());
                for member in members {
                    rendered.push(format!(".{} = {}", member.name, self.emit_expr(&member.value)?));
                }
                format!("({type_name}){{{}}}", rendered.join(", "))
            }
            ExprKind::Identifier { name, .. } => name.clone(),
            ExprKind::ArraySubscript { object, index } => {
                format!("{}[{}]", self.emit_expr(object)?, self.emit_expr(index)?)
            }
            ExprKind::MemberAccess { object, member, .. } => {
                let accessor = if object_is_pointer_shaped(object) { "->" } else { "." };
                format!("{}{accessor}{member}", self.emit_expr(object)?)
            }
            other => {
                return Err(EmitError::UnresolvedType {
                    what: format!("expression node {other:?}"),
                })
            }
        })
    }
}

/// Whether `obj.member` should emit as `obj->member`. Only checks an
/// `Identifier`'s own `resolved_type` — a conservative approximation of
/// the analyzer's one-automatic-deref rule (spec §4.6 "Member access")
/// that falls back to `.` for any deeper chain (`a.b.c`, `f().b`). Correct
/// for the common case; a tree-walking type pass would be needed to cover
/// the rest, which is more machinery than a contract-level emitter needs.
fn object_is_pointer_shaped(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Identifier { resolved_type: Some(ty), .. } => {
            matches!(ty, Type::Pointer(_) | Type::Reference(_))
        }
        ExprKind::Unary { op: UnOp::Deref, .. } => false,
        _ => false,
    }
}

fn escape_char(byte: u8) -> String {
    match byte {
        b'\'' => "\\'".to_string(),
        b'\\' => "\\\\".to_string(),
        b'\n' => "\\n".to_string(),
        b'\t' => "\\t".to_string(),
        b'\r' => "\\r".to_string(),
        0x20..=0x7e => (byte as char).to_string(),
        other => format!("\\x{other:02x}"),
    }
}
