//! Mapping from the language's [`Type`] to C type spellings and declarators
//! (spec §6: `int → int32_t`, `float → double`/`float` by declared width,
//! arrays to `T[N]`, compounds to `struct`/`union`).
//!
//! C declarators read inside-out: a pointer-to-array needs parentheses a
//! plain array-of-pointers does not (`int8_t (*p)[4]` vs `int8_t *p[4]`).
//! [`declare`] builds the declarator from the name outward through any
//! pointer/array wrapping so both shapes come out right, instead of
//! guessing at a flat "type name" string.

use octo_util::Type;

use crate::error::{EmitError, Result};

/// The left-of-declarator spelling for a type with no pointer/array
/// wrapping of its own. `Compound` without a `Named` wrapper — an inline
/// `struct { .. }`/`union { .. }` type-rvalue — is spelled out in full; this
/// spec doesn't mandate a C identifier for it (§6), so there is none to
/// invent.
fn base_type_name(ty: &Type) -> Result<String> {
    Ok(match ty {
        Type::Void => "void".to_string(),
        Type::Bool => "bool".to_string(),
        Type::Char => "char".to_string(),
        Type::Integer { bits, signed } => {
            format!("{}int{bits}_t", if *signed { "" } else { "u" })
        }
        Type::Float { bits: 32 } => "float".to_string(),
        Type::Float { .. } => "double".to_string(),
        Type::Named { name, .. } => name.clone(),
        Type::Compound { is_struct, members } => {
            let tag = if *is_struct { "struct" } else { "union" };
            let mut body = String::new();
            for (name, member_ty) in members {
                body.push_str(&declare(member_ty, name)?);
                body.push_str("; ");
            }
            format!("{tag} {{ {body}}}")
        }
        other => {
            return Err(EmitError::UnresolvedType {
                what: format!("'{other}'"),
            })
        }
    })
}

fn build_declarator(ty: &Type, decl: String) -> Result<(String, String)> {
    match ty {
        Type::Pointer(inner) | Type::Reference(inner) => {
            build_declarator(inner, format!("*{decl}"))
        }
        Type::Array { element, length } => {
            let len = length.map(|n| n.to_string()).unwrap_or_default();
            let wrapped = if decl.starts_with('*') {
                format!("({decl})")
            } else {
                decl
            };
            build_declarator(element, format!("{wrapped}[{len}]"))
        }
        base => Ok((base_type_name(base)?, decl)),
    }
}

/// Builds a full C declaration of `name` as `ty`: `int32_t x`,
/// `int8_t (*p)[4]`, `int8_t *xs[4]`. Also doubles as a C function
/// declarator when `name` already includes a parenthesized parameter list
/// (`add(int32_t a, int32_t b)`), and as an abstract declarator for casts
/// and compound-literal type-names when `name` is empty.
pub fn declare(ty: &Type, name: &str) -> Result<String> {
    let (base, declarator) = build_declarator(ty, name.to_string())?;
    Ok(format!("{base} {declarator}"))
}
