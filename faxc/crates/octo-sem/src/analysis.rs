//! The semantic analyzer (spec §4.6): walks the parser's tree in place,
//! filling every `resolved_type` slot and reporting every contract
//! violation it finds. Ownership matches the spec's transfer model: the
//! analyzer borrows the tree `&mut` rather than rebuilding it, since every
//! mutation is a field assignment, not a structural change.

use indexmap::IndexMap;

use octo_par::{Ast, BinOp, CompoundMember, Expr, ExprKind, Param, UnOp};
use octo_util::diagnostic::{Error, ErrorKind, Handler};
use octo_util::{NumericLiteralKind, Span, Type};

use crate::symtab::SymbolTable;

/// Everything the code emitter needs beyond the analyzed tree itself (spec
/// §6's `emit_c(AST, SemanticContext, Writer)`). Every other piece of
/// per-node semantic information (identifier/declaration types) already
/// lives on the tree's `resolved_type` slots, so this is deliberately thin:
/// just the declared named types, in declaration order, so the emitter can
/// emit one C `struct`/`union` per name without re-deriving the order by
/// re-walking the tree.
pub struct SemanticContext {
    pub named_types: Vec<(String, Type)>,
}

pub struct Analyzer<'a> {
    handler: &'a Handler,
    symtab: SymbolTable,
    /// The type namespace, separate from the value namespace `symtab`
    /// owns: `type Point = struct { .. };` never collides with a variable
    /// named `Point`. Keyed by declared name; value is `(type, span)` so
    /// redeclaration can point at the first declaration. Insertion-ordered
    /// so `SemanticContext::named_types` can hand the emitter a stable,
    /// declaration order without a separate sort pass.
    types: IndexMap<String, (Type, Span)>,
    return_type_stack: Vec<Type>,
}

/// Runs the analyzer over `ast` in place. Callers must check
/// `handler.has_errors()` before handing the tree to a code emitter — a
/// tree with errors may have `Type::ToInfer` standing in for slots the
/// analyzer could not resolve.
pub fn analyze(ast: &mut Ast, handler: &Handler) -> SemanticContext {
    tracing::debug!(statements = ast.len(), "analyzing");
    let mut analyzer = Analyzer {
        handler,
        symtab: SymbolTable::new(),
        types: IndexMap::new(),
        return_type_stack: Vec::new(),
    };
    for stmt in ast.iter_mut() {
        analyzer.analyze_statement(stmt);
    }
    tracing::debug!(
        named_types = analyzer.types.len(),
        errors = handler.error_count(),
        "analyzed"
    );
    SemanticContext {
        named_types: analyzer
            .types
            .into_iter()
            .map(|(name, (ty, _))| (name, ty))
            .collect(),
    }
}

fn builtin_type(name: &str) -> Option<Type> {
    Some(match name {
        "void" => Type::Void,
        "bool" => Type::Bool,
        "char" => Type::Char,
        "i8" => Type::Integer { bits: 8, signed: true },
        "u8" => Type::Integer { bits: 8, signed: false },
        "i16" => Type::Integer { bits: 16, signed: true },
        "u16" => Type::Integer { bits: 16, signed: false },
        "i32" => Type::Integer { bits: 32, signed: true },
        "u32" => Type::Integer { bits: 32, signed: false },
        "i64" => Type::Integer { bits: 64, signed: true },
        "u64" => Type::Integer { bits: 64, signed: false },
        "f32" => Type::Float { bits: 32 },
        "f64" => Type::Float { bits: 64 },
        _ => return None,
    })
}

/// Concretizes a bare numeric literal to its default concrete type when no
/// annotation or other operand pins it down (spec §4.4 rule 2).
fn concretize(ty: Type) -> Type {
    match ty {
        Type::NumericLiteral(NumericLiteralKind::IntegerIsh) => Type::i32(),
        Type::NumericLiteral(NumericLiteralKind::FloatIsh) => Type::f64(),
        other => other,
    }
}

fn is_lvalue_shaped(expr: &Expr) -> bool {
    matches!(
        expr.kind,
        ExprKind::Identifier { .. }
            | ExprKind::ArraySubscript { .. }
            | ExprKind::MemberAccess { .. }
    ) || matches!(&expr.kind, ExprKind::Unary { op: UnOp::Deref, .. })
}

/// Peels `Pointer`/`Reference`/`Named` wrappers until it finds a
/// `Compound`, for member access through pointers and aliases alike.
fn underlying_compound(ty: &Type) -> Option<&Type> {
    match ty {
        Type::Compound { .. } => Some(ty),
        Type::Pointer(inner) | Type::Reference(inner) => underlying_compound(inner),
        Type::Named { definition, .. } => underlying_compound(definition),
        _ => None,
    }
}

impl<'a> Analyzer<'a> {
    fn report(&self, kind: ErrorKind, span: Span) {
        self.handler.report(Error::new(kind, span));
    }

    /// Reports an incompatible assignment/initialization. Array-to-array
    /// mismatches where only the length disagrees get the more specific
    /// `array-length-mismatch` diagnostic (spec §8's literal scenario for
    /// `let a: [3]i32 = [1, 2];`) rather than a generic type mismatch.
    fn report_incompatible(&self, target: &Type, value: &Type, span: Span) {
        if let (
            Type::Array { length: Some(tl), element: te },
            Type::Array { length: Some(vl), element: ve },
        ) = (target, value)
        {
            if te.structurally_eq(ve) && tl != vl {
                self.report(
                    ErrorKind::ArrayLengthMismatch {
                        expected: *tl,
                        found: *vl,
                    },
                    span,
                );
                return;
            }
        }
        self.report(
            ErrorKind::TypeMismatch {
                expected: target.to_string(),
                found: value.to_string(),
            },
            span,
        );
    }

    // ---- type-rvalues ----

    fn resolve_type_rvalue(&mut self, expr: &Expr) -> Type {
        match &expr.kind {
            ExprKind::TypeIdentifier(name) => {
                if let Some(builtin) = builtin_type(name) {
                    return builtin;
                }
                if let Some((ty, _)) = self.types.get(name) {
                    return Type::Named {
                        name: name.clone(),
                        definition: Box::new(ty.clone()),
                    };
                }
                self.report(ErrorKind::NotAType { name: name.clone() }, expr.span);
                Type::ToInfer
            }
            ExprKind::PointerType(inner) => {
                Type::Pointer(Box::new(self.resolve_type_rvalue(inner)))
            }
            ExprKind::ArrayType { length, element_type } => Type::Array {
                element: Box::new(self.resolve_type_rvalue(element_type)),
                length: *length,
            },
            ExprKind::CompoundDefinition { is_struct, members } => {
                let members = members
                    .iter()
                    .map(|m| (m.name.clone(), self.resolve_type_rvalue(&m.value)))
                    .collect();
                Type::Compound {
                    is_struct: *is_struct,
                    members,
                }
            }
            _ => {
                self.report(
                    ErrorKind::NotAType {
                        name: "<expression>".into(),
                    },
                    expr.span,
                );
                Type::ToInfer
            }
        }
    }

    // ---- statements ----

    fn analyze_statement(&mut self, expr: &mut Expr) {
        match &expr.kind {
            ExprKind::VariableDeclaration { .. } => self.analyze_variable_declaration(expr),
            ExprKind::FunctionDeclaration { .. } => self.analyze_function_declaration(expr, false),
            ExprKind::Extern(_) => self.analyze_extern(expr),
            ExprKind::Compound(_) => self.analyze_compound(expr),
            ExprKind::Return(_) => self.analyze_return(expr),
            ExprKind::Assignment { .. } => self.analyze_assignment(expr),
            ExprKind::Conditional { .. } => self.analyze_conditional(expr),
            ExprKind::ForLoop { .. } => self.analyze_for_loop(expr),
            ExprKind::TypeDeclaration { .. } => self.analyze_type_declaration(expr),
            _ => {
                self.analyze_expr(expr);
            }
        }
    }

    /// Analyzes a `Compound`'s statements in the *current* scope, for
    /// callers that already pushed one (function bodies over their
    /// parameters, for-loop bodies over their iterator variable).
    fn analyze_block_in_current_scope(&mut self, body: &mut Expr) {
        let ExprKind::Compound(stmts) = &mut body.kind else {
            unreachable!("function/for-loop body is always a Compound")
        };
        for stmt in stmts.iter_mut() {
            self.analyze_statement(stmt);
        }
    }

    fn analyze_compound(&mut self, expr: &mut Expr) {
        let ExprKind::Compound(stmts) = &mut expr.kind else {
            unreachable!()
        };
        self.symtab.push_scope();
        for stmt in stmts.iter_mut() {
            self.analyze_statement(stmt);
        }
        self.symtab.pop_scope();
    }

    fn analyze_variable_declaration(&mut self, expr: &mut Expr) {
        let span = expr.span;
        let ExprKind::VariableDeclaration {
            name,
            name_span,
            declared_type,
            init,
            resolved_type,
        } = &mut expr.kind
        else {
            unreachable!()
        };

        let declared = declared_type.as_ref().map(|t| self.resolve_type_rvalue(t));
        let init_ty = init.as_mut().map(|e| self.analyze_expr(e));

        let resolved = match (&declared, &init_ty) {
            (Some(d), Some(i)) => {
                if !d.accepts(i) {
                    self.report_incompatible(d, i, span);
                }
                d.clone()
            }
            (Some(d), None) => d.clone(),
            (None, Some(i)) => concretize(i.clone()),
            (None, None) => Type::ToInfer,
        };

        if matches!(resolved, Type::Void) {
            self.report(ErrorKind::VoidVariable, *name_span);
        }

        if let Err(e) = self.symtab.declare(name.clone(), *name_span, resolved.clone()) {
            self.handler.report(e);
        }
        *resolved_type = Some(resolved);
    }

    fn analyze_function_declaration(&mut self, expr: &mut Expr, is_extern: bool) {
        let ExprKind::FunctionDeclaration {
            name,
            name_span,
            params,
            return_type_rvalue,
            is_variadic,
            body,
            resolved_type,
        } = &mut expr.kind
        else {
            unreachable!()
        };

        let return_type = self.resolve_type_rvalue(return_type_rvalue);
        let param_types: Vec<Type> = params
            .iter()
            .map(|p: &Param| self.resolve_type_rvalue(&p.type_rvalue))
            .collect();

        let fn_type = Type::Function {
            params: param_types.clone(),
            return_type: Box::new(return_type.clone()),
            variadic: *is_variadic,
        };

        if let Err(e) = self.symtab.declare(name.clone(), *name_span, fn_type.clone()) {
            self.handler.report(e);
        }

        if is_extern && body.is_some() {
            self.report(
                ErrorKind::ExternWithBody { name: name.clone() },
                *name_span,
            );
        }
        if !is_extern && body.is_none() {
            self.report(
                ErrorKind::MissingFunctionBody { name: name.clone() },
                *name_span,
            );
        }

        self.symtab.push_scope();
        for (param, ty) in params.iter().zip(param_types.iter()) {
            if matches!(ty, Type::Void) {
                self.report(ErrorKind::VoidVariable, param.name_span);
            }
            if let Err(e) = self.symtab.declare(param.name.clone(), param.name_span, ty.clone()) {
                self.handler.report(e);
            }
        }
        if let Some(body) = body {
            self.return_type_stack.push(return_type.clone());
            self.analyze_block_in_current_scope(body);
            self.return_type_stack.pop();
        }
        self.symtab.pop_scope();

        *resolved_type = Some(fn_type);
    }

    fn analyze_extern(&mut self, expr: &mut Expr) {
        let ExprKind::Extern(inner) = &mut expr.kind else {
            unreachable!()
        };
        if matches!(inner.kind, ExprKind::FunctionDeclaration { .. }) {
            self.analyze_function_declaration(inner, true);
        }
    }

    fn analyze_return(&mut self, expr: &mut Expr) {
        let span = expr.span;
        let ExprKind::Return(value) = &mut expr.kind else {
            unreachable!()
        };
        let value_ty = value.as_mut().map(|v| self.analyze_expr(v));
        if let Some(expected) = self.return_type_stack.last().cloned() {
            let found = value_ty.unwrap_or(Type::Void);
            if !expected.accepts(&found) {
                self.report(
                    ErrorKind::TypeMismatch {
                        expected: expected.to_string(),
                        found: found.to_string(),
                    },
                    span,
                );
            }
        }
    }

    fn analyze_assignment(&mut self, expr: &mut Expr) {
        let span = expr.span;
        let ExprKind::Assignment { lvalue, rvalue } = &mut expr.kind else {
            unreachable!()
        };
        if !is_lvalue_shaped(lvalue) {
            self.report(ErrorKind::InvalidLvalue, lvalue.span);
        }
        let lt = self.analyze_expr(lvalue);
        let rt = self.analyze_expr(rvalue);
        if !lt.accepts(&rt) {
            self.report(
                ErrorKind::TypeMismatch {
                    expected: lt.to_string(),
                    found: rt.to_string(),
                },
                span,
            );
        }
    }

    fn analyze_conditional(&mut self, expr: &mut Expr) {
        let ExprKind::Conditional {
            is_loop,
            condition,
            true_body,
            false_body,
        } = &mut expr.kind
        else {
            unreachable!()
        };
        let cond_ty = self.analyze_expr(condition);
        if !matches!(cond_ty, Type::Bool) {
            self.report(
                ErrorKind::TypeMismatch {
                    expected: "bool".into(),
                    found: cond_ty.to_string(),
                },
                condition.span,
            );
        }
        self.analyze_statement(true_body);
        if let Some(false_body) = false_body {
            self.analyze_statement(false_body);
        }
        if *is_loop && false_body.is_some() {
            self.report(ErrorKind::WhileWithElse, expr.span);
        }
    }

    fn analyze_for_loop(&mut self, expr: &mut Expr) {
        let ExprKind::ForLoop {
            iterator_name,
            iterator_span,
            iterable,
            body,
        } = &mut expr.kind
        else {
            unreachable!()
        };
        let iterable_ty = self.analyze_expr(iterable);
        let element_ty = match iterable_ty.auto_deref() {
            Type::Array { element, .. } => (**element).clone(),
            other => {
                self.report(
                    ErrorKind::NotAnIterator {
                        ty: other.to_string(),
                    },
                    iterable.span,
                );
                Type::ToInfer
            }
        };
        self.symtab.push_scope();
        if let Err(e) = self.symtab.declare(iterator_name.clone(), *iterator_span, element_ty) {
            self.handler.report(e);
        }
        self.analyze_block_in_current_scope(body);
        self.symtab.pop_scope();
    }

    fn analyze_type_declaration(&mut self, expr: &mut Expr) {
        let span = expr.span;
        let ExprKind::TypeDeclaration {
            name,
            name_span,
            type_rvalue,
        } = &mut expr.kind
        else {
            unreachable!()
        };
        let ty = self.resolve_type_rvalue(type_rvalue);
        if let Some((_, first_span)) = self.types.get(name) {
            self.handler.report(
                Error::new(ErrorKind::SymbolRedeclaration { name: name.clone() }, span)
                    .with_note("first declared here", *first_span),
            );
            return;
        }
        self.types.insert(name.clone(), (ty, *name_span));
    }

    // ---- expressions ----

    fn analyze_expr(&mut self, expr: &mut Expr) -> Type {
        let span = expr.span;
        match &mut expr.kind {
            ExprKind::Integer(_) => Type::NumericLiteral(NumericLiteralKind::IntegerIsh),
            ExprKind::Float(_) => Type::NumericLiteral(NumericLiteralKind::FloatIsh),
            ExprKind::Str(_) => Type::Pointer(Box::new(Type::Char)),
            ExprKind::Character(_) => Type::Char,
            ExprKind::Boolean(_) => Type::Bool,
            ExprKind::Binary { op, left, right } => {
                let op = *op;
                self.analyze_binary(op, left, right, span)
            }
            ExprKind::Unary { op, operand } => {
                let op = *op;
                self.analyze_unary(op, operand, span)
            }
            ExprKind::FunctionCall {
                callee,
                callee_span,
                args,
            } => {
                let callee = callee.clone();
                let callee_span = *callee_span;
                self.analyze_call(callee, callee_span, args, span)
            }
            ExprKind::ArrayLiteral { elements, resolved_type } => {
                let ty = self.analyze_array_literal(elements, span);
                *resolved_type = Some(ty.clone());
                ty
            }
            ExprKind::CompoundLiteral {
                type_name,
                type_name_span,
                members,
                resolved_type,
            } => {
                let type_name = type_name.clone();
                let type_name_span = *type_name_span;
                let ty = self.analyze_compound_literal(type_name, type_name_span, members, span);
                *resolved_type = Some(ty.clone());
                ty
            }
            ExprKind::Identifier { name, resolved_type } => {
                let ty = self.analyze_identifier(name, span);
                *resolved_type = Some(ty.clone());
                ty
            }
            ExprKind::ArraySubscript { object, index } => self.analyze_subscript(object, index, span),
            ExprKind::MemberAccess {
                object,
                member,
                member_span,
            } => {
                let member = member.clone();
                let member_span = *member_span;
                self.analyze_member_access(object, member, member_span)
            }
            _ => {
                self.report(
                    ErrorKind::InvalidLvalue,
                    span,
                );
                Type::ToInfer
            }
        }
    }

    fn analyze_binary(&mut self, op: BinOp, left: &mut Expr, right: &mut Expr, span: Span) -> Type {
        let lt = self.analyze_expr(left);
        let rt = self.analyze_expr(right);
        use BinOp::*;
        match op {
            Add | Sub | Mul | Div | Mod => {
                if !lt.is_numeric() || !rt.is_numeric() {
                    self.report(
                        ErrorKind::InvalidBinaryOperation {
                            op: op.to_string(),
                            left: lt.to_string(),
                            right: rt.to_string(),
                        },
                        span,
                    );
                    return Type::ToInfer;
                }
                binary_numeric_result(&lt, &rt)
            }
            Eq | Ne | Gt | Lt | Ge | Le => {
                if !lt.accepts(&rt) && !rt.accepts(&lt) {
                    self.report(
                        ErrorKind::InvalidBinaryOperation {
                            op: op.to_string(),
                            left: lt.to_string(),
                            right: rt.to_string(),
                        },
                        span,
                    );
                }
                Type::Bool
            }
            And | Or => {
                if !matches!(lt, Type::Bool) || !matches!(rt, Type::Bool) {
                    self.report(
                        ErrorKind::InvalidBinaryOperation {
                            op: op.to_string(),
                            left: lt.to_string(),
                            right: rt.to_string(),
                        },
                        span,
                    );
                }
                Type::Bool
            }
        }
    }

    fn analyze_unary(&mut self, op: UnOp, operand: &mut Expr, span: Span) -> Type {
        match op {
            UnOp::Neg => {
                let t = self.analyze_expr(operand);
                if !t.is_numeric() {
                    self.report(
                        ErrorKind::InvalidUnaryOperation {
                            op: op.to_string(),
                            operand: t.to_string(),
                        },
                        span,
                    );
                    return Type::ToInfer;
                }
                t
            }
            UnOp::Not => {
                let t = self.analyze_expr(operand);
                if !matches!(t, Type::Bool) {
                    self.report(
                        ErrorKind::InvalidUnaryOperation {
                            op: op.to_string(),
                            operand: t.to_string(),
                        },
                        span,
                    );
                }
                Type::Bool
            }
            UnOp::AddressOf => {
                if !is_lvalue_shaped(operand) {
                    self.report(ErrorKind::InvalidAddressOf, operand.span);
                    self.analyze_expr(operand);
                    return Type::ToInfer;
                }
                let t = self.analyze_expr(operand);
                Type::Pointer(Box::new(t))
            }
            UnOp::Deref => {
                let t = self.analyze_expr(operand);
                match t {
                    Type::Pointer(inner) | Type::Reference(inner) => *inner,
                    other => {
                        self.report(
                            ErrorKind::InvalidUnaryOperation {
                                op: op.to_string(),
                                operand: other.to_string(),
                            },
                            span,
                        );
                        Type::ToInfer
                    }
                }
            }
        }
    }

    fn analyze_call(
        &mut self,
        callee: String,
        callee_span: Span,
        args: &mut [Expr],
        span: Span,
    ) -> Type {
        let fn_type = match self.symtab.lookup(&callee) {
            Some(entry) => entry.ty.clone(),
            None => {
                self.report(ErrorKind::UndeclaredSymbol { name: callee }, callee_span);
                for arg in args.iter_mut() {
                    self.analyze_expr(arg);
                }
                return Type::ToInfer;
            }
        };
        let Type::Function {
            params,
            return_type,
            variadic,
        } = fn_type
        else {
            self.report(
                ErrorKind::TypeMismatch {
                    expected: "a function".into(),
                    found: fn_type.to_string(),
                },
                callee_span,
            );
            for arg in args.iter_mut() {
                self.analyze_expr(arg);
            }
            return Type::ToInfer;
        };

        let arg_types: Vec<Type> = args.iter_mut().map(|a| self.analyze_expr(a)).collect();
        let arity_ok = if variadic {
            arg_types.len() >= params.len()
        } else {
            arg_types.len() == params.len()
        };
        if !arity_ok {
            self.report(
                ErrorKind::InvalidArgumentCount {
                    expected: params.len(),
                    found: arg_types.len(),
                },
                span,
            );
        }
        for (param_ty, arg_ty) in params.iter().zip(arg_types.iter()) {
            if !param_ty.accepts(arg_ty) {
                self.report(
                    ErrorKind::TypeMismatch {
                        expected: param_ty.to_string(),
                        found: arg_ty.to_string(),
                    },
                    span,
                );
            }
        }
        *return_type
    }

    fn analyze_array_literal(&mut self, elements: &mut [Expr], span: Span) -> Type {
        if elements.is_empty() {
            self.report(ErrorKind::ZeroLengthArray, span);
            return Type::Array {
                element: Box::new(Type::ToInfer),
                length: Some(0),
            };
        }
        let elem_types: Vec<Type> = elements.iter_mut().map(|e| self.analyze_expr(e)).collect();
        let first = elem_types[0].clone();
        for (t, elem) in elem_types[1..].iter().zip(&elements[1..]) {
            if !first.accepts(t) && !t.accepts(&first) {
                self.report(
                    ErrorKind::TypeMismatch {
                        expected: first.to_string(),
                        found: t.to_string(),
                    },
                    elem.span,
                );
            }
        }
        Type::Array {
            element: Box::new(concretize(first)),
            length: Some(elements.len()),
        }
    }

    fn analyze_compound_literal(
        &mut self,
        type_name: String,
        type_name_span: Span,
        members: &mut [CompoundMember],
        span: Span,
    ) -> Type {
        let declared = match self.types.get(&type_name) {
            Some((ty, _)) => ty.clone(),
            None => {
                self.report(ErrorKind::NotAType { name: type_name }, type_name_span);
                return Type::ToInfer;
            }
        };
        let Type::Compound { members: decl_members, .. } = &declared else {
            self.report(
                ErrorKind::NotCompound {
                    ty: declared.to_string(),
                },
                type_name_span,
            );
            return Type::ToInfer;
        };
        let decl_members = decl_members.clone();
        for member in members.iter_mut() {
            let val_ty = self.analyze_expr(&mut member.value);
            match decl_members.iter().find(|(n, _)| *n == member.name) {
                Some((_, expected)) => {
                    if !expected.accepts(&val_ty) {
                        self.report(
                            ErrorKind::TypeMismatch {
                                expected: expected.to_string(),
                                found: val_ty.to_string(),
                            },
                            member.name_span,
                        );
                    }
                }
                None => {
                    self.report(
                        ErrorKind::MissingMember {
                            member: member.name.clone(),
                            ty: type_name.clone(),
                        },
                        member.name_span,
                    );
                }
            }
        }
        let _ = span;
        Type::Named {
            name: type_name,
            definition: Box::new(declared),
        }
    }

    fn analyze_identifier(&mut self, name: &str, span: Span) -> Type {
        match self.symtab.lookup(name) {
            Some(entry) => entry.ty.clone(),
            None => {
                if self.types.contains_key(name) {
                    self.report(
                        ErrorKind::CannotUseTypeAsValue { name: name.into() },
                        span,
                    );
                } else {
                    self.report(ErrorKind::UndeclaredSymbol { name: name.into() }, span);
                }
                Type::ToInfer
            }
        }
    }

    fn analyze_subscript(&mut self, object: &mut Expr, index: &mut Expr, span: Span) -> Type {
        let obj_ty = self.analyze_expr(object);
        let idx_ty = self.analyze_expr(index);
        if !idx_ty.is_integer_like() {
            self.report(
                ErrorKind::InvalidArraySubscript {
                    ty: idx_ty.to_string(),
                },
                index.span,
            );
        }
        match obj_ty.auto_deref() {
            Type::Array { element, .. } => (**element).clone(),
            other => {
                self.report(
                    ErrorKind::NotAnArray {
                        ty: other.to_string(),
                    },
                    span,
                );
                Type::ToInfer
            }
        }
    }

    fn analyze_member_access(&mut self, object: &mut Expr, member: String, member_span: Span) -> Type {
        let obj_ty = self.analyze_expr(object);
        match underlying_compound(&obj_ty) {
            Some(Type::Compound { members, .. }) => {
                match members.iter().find(|(n, _)| *n == member) {
                    Some((_, t)) => t.clone(),
                    None => {
                        self.report(
                            ErrorKind::MissingMember {
                                member,
                                ty: obj_ty.to_string(),
                            },
                            member_span,
                        );
                        Type::ToInfer
                    }
                }
            }
            _ => {
                self.report(
                    ErrorKind::NotCompound {
                        ty: obj_ty.to_string(),
                    },
                    member_span,
                );
                Type::ToInfer
            }
        }
    }
}

fn binary_numeric_result(lt: &Type, rt: &Type) -> Type {
    if !matches!(lt, Type::NumericLiteral(_)) {
        return lt.clone();
    }
    if !matches!(rt, Type::NumericLiteral(_)) {
        return rt.clone();
    }
    if matches!(lt, Type::NumericLiteral(NumericLiteralKind::FloatIsh))
        || matches!(rt, Type::NumericLiteral(NumericLiteralKind::FloatIsh))
    {
        return Type::NumericLiteral(NumericLiteralKind::FloatIsh);
    }
    Type::NumericLiteral(NumericLiteralKind::IntegerIsh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use octo_util::diagnostic::Handler;
    use octo_util::symbol::SharedInterner;
    use octo_util::SourceMap;

    fn analyze_source(src: &str) -> (Ast, Handler) {
        let source = SourceMap::from_source("t.oc", src);
        let interner = SharedInterner::new();
        let lex_handler = Handler::new();
        let tokens = octo_lex::tokenize(&source, &interner, &lex_handler);
        assert!(!lex_handler.has_errors());
        let parse_handler = Handler::new();
        let mut ast = octo_par::parse(tokens, &parse_handler, &interner);
        assert!(!parse_handler.has_errors(), "{:?}", parse_handler.errors());
        let handler = Handler::new();
        analyze(&mut ast, &handler);
        (ast, handler)
    }

    #[test]
    fn well_typed_declaration_resolves_type() {
        let (ast, handler) = analyze_source("let x: i32 = 5;");
        assert!(!handler.has_errors());
        match &ast[0].kind {
            ExprKind::VariableDeclaration { resolved_type: Some(t), .. } => {
                assert!(matches!(t, Type::Integer { bits: 32, .. }));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn integer_literal_init_concretizes_to_i32() {
        let (ast, handler) = analyze_source("let x = 5;");
        assert!(!handler.has_errors());
        match &ast[0].kind {
            ExprKind::VariableDeclaration { resolved_type: Some(Type::Integer { bits: 32, .. }), .. } => {}
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn type_mismatch_between_annotation_and_init() {
        let (_, handler) = analyze_source("let x: bool = 5;");
        assert!(handler.has_errors());
        assert!(matches!(
            handler.errors()[0].kind,
            ErrorKind::TypeMismatch { .. }
        ));
    }

    #[test]
    fn redeclaration_in_same_scope_is_reported() {
        let (_, handler) = analyze_source("let x: i32 = 1; let x: i32 = 2;");
        assert!(handler.has_errors());
        assert!(matches!(
            handler.errors()[0].kind,
            ErrorKind::SymbolRedeclaration { .. }
        ));
    }

    #[test]
    fn shadowing_in_nested_scope_is_allowed() {
        let (_, handler) = analyze_source("let x: i32 = 1; { let x: bool = true; }");
        assert!(!handler.has_errors());
    }

    #[test]
    fn undeclared_symbol_use_is_reported() {
        let (_, handler) = analyze_source("let x: i32 = y;");
        assert!(handler.has_errors());
        assert!(matches!(
            handler.errors()[0].kind,
            ErrorKind::UndeclaredSymbol { .. }
        ));
    }

    #[test]
    fn extern_function_with_body_is_rejected() {
        let (_, handler) = analyze_source("extern func f() -> void { }");
        assert!(handler.has_errors());
        assert!(handler
            .errors()
            .iter()
            .any(|e| matches!(e.kind, ErrorKind::ExternWithBody { .. })));
    }

    #[test]
    fn non_extern_function_without_body_is_rejected() {
        let (_, handler) = analyze_source("func f() -> void;");
        assert!(handler.has_errors());
        assert!(handler
            .errors()
            .iter()
            .any(|e| matches!(e.kind, ErrorKind::MissingFunctionBody { .. })));
    }

    #[test]
    fn while_with_else_is_rejected() {
        let (_, handler) = analyze_source("let x: bool = true; while x { } else { }");
        assert!(handler.has_errors());
        assert!(handler
            .errors()
            .iter()
            .any(|e| matches!(e.kind, ErrorKind::WhileWithElse)));
    }

    #[test]
    fn if_with_else_is_fine() {
        let (_, handler) = analyze_source("let x: bool = true; if x { } else { }");
        assert!(!handler.has_errors());
    }

    #[test]
    fn zero_length_array_is_rejected() {
        let (_, handler) = analyze_source("let a = [];");
        assert!(handler.has_errors());
        assert!(matches!(handler.errors()[0].kind, ErrorKind::ZeroLengthArray));
    }

    #[test]
    fn function_call_argument_count_mismatch() {
        let (_, handler) =
            analyze_source("func f(a: i32) -> i32 { return a; } let x = f(1, 2);");
        assert!(handler.has_errors());
        assert!(handler
            .errors()
            .iter()
            .any(|e| matches!(e.kind, ErrorKind::InvalidArgumentCount { .. })));
    }

    #[test]
    fn recursive_function_call_resolves() {
        let (_, handler) = analyze_source(
            "func fib(n: i32) -> i32 { return fib(n); }",
        );
        assert!(!handler.has_errors());
    }

    #[test]
    fn for_loop_over_non_array_is_rejected() {
        let (_, handler) = analyze_source("let n: i32 = 1; for x in n { }");
        assert!(handler.has_errors());
        assert!(handler
            .errors()
            .iter()
            .any(|e| matches!(e.kind, ErrorKind::NotAnIterator { .. })));
    }

    #[test]
    fn struct_member_access_resolves() {
        let (_, handler) = analyze_source(
            "type Point = struct { x: i32; y: i32; }; let p = Point { .x = 1, .y = 2 }; let a = p.x;",
        );
        assert!(!handler.has_errors());
    }

    #[test]
    fn missing_struct_member_is_rejected() {
        let (_, handler) = analyze_source(
            "type Point = struct { x: i32; }; let p = Point { .z = 1 };",
        );
        assert!(handler.has_errors());
        assert!(handler
            .errors()
            .iter()
            .any(|e| matches!(e.kind, ErrorKind::MissingMember { .. })));
    }

    #[test]
    fn array_length_mismatch_reports_specific_kind() {
        let (_, handler) = analyze_source("let a: [3]i32 = [1, 2];");
        assert!(handler.has_errors());
        assert!(matches!(
            handler.errors()[0].kind,
            ErrorKind::ArrayLengthMismatch { expected: 3, found: 2 }
        ));
    }

    #[test]
    fn void_variable_is_rejected() {
        let (_, handler) = analyze_source("let x: void = 1;");
        assert!(handler.has_errors());
        assert!(handler
            .errors()
            .iter()
            .any(|e| matches!(e.kind, ErrorKind::VoidVariable)));
    }
}
