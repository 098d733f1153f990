//! The type model (spec §3 Type, §4.4). Lives in `octo-util`, not
//! `octo-sem`, so that `octo-par`'s AST nodes can carry a resolved `Type`
//! slot without `octo-par` depending on the semantic-analysis crate (which
//! itself depends on `octo-par` for the tree it walks).

use std::fmt;

/// Whether a `numeric-literal` type originated from an integer or float
/// surface literal, which governs what it may coerce to (spec §4.4 rule 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericLiteralKind {
    IntegerIsh,
    FloatIsh,
}

/// A member of a `compound` type: name plus type, in declaration order.
pub type Member = (String, Type);

#[derive(Debug, Clone)]
pub enum Type {
    Void,
    Bool,
    Char,
    Integer { bits: u8, signed: bool },
    Float { bits: u8 },
    NumericLiteral(NumericLiteralKind),
    Pointer(Box<Type>),
    Reference(Box<Type>),
    /// `None` length means "to be inferred" (the source's `-1`).
    Array { element: Box<Type>, length: Option<usize> },
    Function {
        params: Vec<Type>,
        return_type: Box<Type>,
        variadic: bool,
    },
    Compound { is_struct: bool, members: Vec<Member> },
    /// A user-declared alias. Compares by `name` only (spec §4.4 rule 5),
    /// never by structurally walking `definition`.
    Named { name: String, definition: Box<Type> },
    /// The type of a type-rvalue expression.
    TypeOfType(Box<Type>),
    ToInfer,
}

impl Type {
    pub fn i32() -> Type {
        Type::Integer { bits: 32, signed: true }
    }

    pub fn f64() -> Type {
        Type::Float { bits: 64 }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Type::Integer { .. } | Type::Float { .. } | Type::NumericLiteral(_)
        )
    }

    pub fn is_integer_like(&self) -> bool {
        matches!(self, Type::Integer { .. })
            || matches!(self, Type::NumericLiteral(NumericLiteralKind::IntegerIsh))
    }

    /// One automatic dereference through pointer/reference, used by member
    /// access (spec §4.6 "Member access").
    pub fn auto_deref(&self) -> &Type {
        match self {
            Type::Pointer(inner) | Type::Reference(inner) => inner,
            other => other,
        }
    }

    /// Structural equality, except `Named`, which compares by declared
    /// name only (spec §4.4 rule 5) — two `Named` values with the same
    /// name are equal even if their `definition`s differ in representation
    /// (they shouldn't, since the analyzer interns one canonical `Named`
    /// per declared name, but equality must not recurse into `definition`
    /// regardless).
    pub fn structurally_eq(&self, other: &Type) -> bool {
        use Type::*;
        match (self, other) {
            (Named { name: a, .. }, Named { name: b, .. }) => a == b,
            (Void, Void) | (Bool, Bool) | (Char, Char) | (ToInfer, ToInfer) => true,
            (Integer { bits: b1, signed: s1 }, Integer { bits: b2, signed: s2 }) => {
                b1 == b2 && s1 == s2
            }
            (Float { bits: b1 }, Float { bits: b2 }) => b1 == b2,
            (NumericLiteral(a), NumericLiteral(b)) => a == b,
            (Pointer(a), Pointer(b)) => a.structurally_eq(b),
            (Reference(a), Reference(b)) => a.structurally_eq(b),
            (
                Array { element: e1, length: l1 },
                Array { element: e2, length: l2 },
            ) => e1.structurally_eq(e2) && l1 == l2,
            (
                Function { params: p1, return_type: r1, variadic: v1 },
                Function { params: p2, return_type: r2, variadic: v2 },
            ) => {
                v1 == v2
                    && r1.structurally_eq(r2)
                    && p1.len() == p2.len()
                    && p1.iter().zip(p2).all(|(a, b)| a.structurally_eq(b))
            }
            (
                Compound { is_struct: s1, members: m1 },
                Compound { is_struct: s2, members: m2 },
            ) => {
                s1 == s2
                    && m1.len() == m2.len()
                    && m1
                        .iter()
                        .zip(m2)
                        .all(|((n1, t1), (n2, t2))| n1 == n2 && t1.structurally_eq(t2))
            }
            (TypeOfType(a), TypeOfType(b)) => a.structurally_eq(b),
            _ => false,
        }
    }

    /// Is `other` assignable to a slot of type `self` (spec §4.4
    /// compatibility rules)? Not symmetric: `numeric-literal` only coerces
    /// one way.
    pub fn accepts(&self, other: &Type) -> bool {
        use Type::*;
        match (self, other) {
            (target, NumericLiteral(NumericLiteralKind::IntegerIsh))
                if matches!(target, Integer { .. } | Float { .. }) =>
            {
                true
            }
            (target, NumericLiteral(NumericLiteralKind::FloatIsh))
                if matches!(target, Float { .. }) =>
            {
                true
            }
            (Array { element: e1, length: l1 }, Array { element: e2, length: l2 }) => {
                e1.structurally_eq(e2) && (l1 == l2 || l2.is_none() || l1.is_none())
            }
            _ => self.structurally_eq(other),
        }
    }

    /// Unifies an `array(T, N)` target length against the inferred-or-fixed
    /// length of a value being assigned to it (spec §4.4 rule 3). Returns
    /// the resolved length, or `None` if both sides are to-infer.
    pub fn unify_array_length(target: Option<usize>, value: Option<usize>) -> Option<usize> {
        target.or(value)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::Bool => write!(f, "bool"),
            Type::Char => write!(f, "char"),
            Type::Integer { bits, signed } => {
                write!(f, "{}{}", if *signed { "i" } else { "u" }, bits)
            }
            Type::Float { bits } => write!(f, "f{bits}"),
            Type::NumericLiteral(NumericLiteralKind::IntegerIsh) => write!(f, "{{integer}}"),
            Type::NumericLiteral(NumericLiteralKind::FloatIsh) => write!(f, "{{float}}"),
            Type::Pointer(inner) => write!(f, "&{inner}"),
            Type::Reference(inner) => write!(f, "ref {inner}"),
            Type::Array { element, length } => match length {
                Some(n) => write!(f, "[{n}]{element}"),
                None => write!(f, "[]{element}"),
            },
            Type::Function { params, return_type, variadic } => {
                write!(f, "func(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{p}")?;
                }
                if *variadic {
                    if !params.is_empty() {
                        write!(f, ", ")?;
                    }
                    write!(f, "..")?;
                }
                write!(f, ") -> {return_type}")
            }
            Type::Compound { is_struct, .. } => {
                write!(f, "{}", if *is_struct { "struct" } else { "union" })
            }
            Type::Named { name, .. } => write!(f, "{name}"),
            Type::TypeOfType(inner) => write!(f, "type({inner})"),
            Type::ToInfer => write!(f, "<to infer>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_literal_coerces_to_concrete_integer_and_float() {
        let lit = Type::NumericLiteral(NumericLiteralKind::IntegerIsh);
        assert!(Type::i32().accepts(&lit));
        assert!(Type::f64().accepts(&lit));
    }

    #[test]
    fn float_literal_does_not_coerce_to_integer() {
        let lit = Type::NumericLiteral(NumericLiteralKind::FloatIsh);
        assert!(!Type::i32().accepts(&lit));
        assert!(Type::f64().accepts(&lit));
    }

    #[test]
    fn differing_width_integers_are_incompatible() {
        let i32_ = Type::Integer { bits: 32, signed: true };
        let i64_ = Type::Integer { bits: 64, signed: true };
        assert!(!i32_.accepts(&i64_));
    }

    #[test]
    fn array_length_to_infer_unifies_with_fixed() {
        let fixed = Type::Array { element: Box::new(Type::i32()), length: Some(3) };
        let inferred = Type::Array { element: Box::new(Type::i32()), length: None };
        assert!(fixed.accepts(&inferred));
    }

    #[test]
    fn named_types_compare_by_name_not_definition() {
        let a = Type::Named { name: "Point".into(), definition: Box::new(Type::Void) };
        let b = Type::Named {
            name: "Point".into(),
            definition: Box::new(Type::Compound { is_struct: true, members: vec![] }),
        };
        assert!(a.structurally_eq(&b));
    }

    #[test]
    fn pointer_and_reference_are_distinct() {
        let p = Type::Pointer(Box::new(Type::i32()));
        let r = Type::Reference(Box::new(Type::i32()));
        assert!(!p.structurally_eq(&r));
    }

    #[test]
    fn display_matches_spec_examples() {
        assert_eq!(Type::Integer { bits: 32, signed: true }.to_string(), "i32");
        let arr = Type::Array {
            element: Box::new(Type::Integer { bits: 8, signed: true }),
            length: Some(4),
        };
        assert_eq!(Type::Pointer(Box::new(arr)).to_string(), "&[4]i8");
        let func = Type::Function {
            params: vec![Type::i32()],
            return_type: Box::new(Type::Void),
            variadic: true,
        };
        assert_eq!(func.to_string(), "func(i32, ..) -> void");
    }
}
