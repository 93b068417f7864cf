//! Type-node emission (§4.4): the primitive name table, array/reference/
//! function composition, and the parameter-position defaulting rule.

use ivyc_par::ast::{ReferenceKind, Type};

/// Maps a primitive name to its target-language spelling; user-defined
/// names (classes, enums, generic parameters) pass through unchanged.
fn primitive_target(name: &str) -> String {
    match name {
        "int" => "int",
        "i8" => "int8_t",
        "i16" => "int16_t",
        "i32" => "int32_t",
        "i64" => "int64_t",
        "u8" => "uint8_t",
        "u16" => "uint16_t",
        "u32" => "uint32_t",
        "u64" => "uint64_t",
        "float" => "float",
        "double" => "double",
        "long_double" => "long double",
        "char" => "char",
        "bool" => "bool",
        "string" => "std::string",
        "void" => "void",
        other => other,
    }
    .to_string()
}

/// The fixed primitive-name set from §3; anything else is a user-defined
/// name, which the translator must be able to resolve to a declaration
/// (§7's `UnknownType`) before it's safe to assume it was written correctly.
const BUILTIN_PRIMITIVES: &[&str] = &[
    "int", "i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64", "float", "double", "long_double",
    "char", "bool", "string", "void",
];

pub(crate) fn is_builtin_primitive(name: &str) -> bool {
    BUILTIN_PRIMITIVES.contains(&name)
}

/// Emits a type-node in an ordinary (non-parameter) position: a local
/// variable's declared type, a return type, a field type, and so on.
pub fn lower_type(ty: &Type) -> String {
    match ty {
        Type::Primitive(name) => primitive_target(name.as_str()),
        Type::Array(inner) => format!("std::vector<{}>", lower_type(inner)),
        Type::Reference(inner, kind) => {
            let inner_s = lower_type(inner);
            match kind {
                ReferenceKind::Immutable => format!("const {inner_s}&"),
                ReferenceKind::Mutable => format!("{inner_s}&"),
                ReferenceKind::Move => format!("{inner_s}&&"),
                ReferenceKind::Copy => inner_s,
            }
        }
        Type::Function(params, ret) => {
            let params_s = params.iter().map(lower_type).collect::<Vec<_>>().join(", ");
            format!("std::function<{}({})>", lower_type(ret), params_s)
        }
    }
}

/// Emits a type-node in a function-signature parameter position, applying
/// the defaulting rule: a bare (non-reference) type other than
/// `int|float|double|bool|char` becomes an immutable reference; those five
/// primitives and any type the source already wrapped in `&`/`&&`/`*` are
/// passed through as-is.
pub fn lower_param_type(ty: &Type) -> String {
    match ty {
        Type::Reference(_, _) => lower_type(ty),
        Type::Primitive(name)
            if matches!(name.as_str(), "int" | "float" | "double" | "bool" | "char") =>
        {
            primitive_target(name.as_str())
        }
        other => format!("const {}&", lower_type(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ivyc_util::Symbol;

    fn prim(name: &str) -> Type {
        Type::Primitive(Symbol::intern(name))
    }

    #[test]
    fn primitive_width_types_map_to_stdint() {
        assert_eq!(lower_type(&prim("i8")), "int8_t");
        assert_eq!(lower_type(&prim("u64")), "uint64_t");
    }

    #[test]
    fn string_maps_to_std_string() {
        assert_eq!(lower_type(&prim("string")), "std::string");
    }

    #[test]
    fn user_defined_name_passes_through() {
        assert_eq!(lower_type(&prim("Account")), "Account");
    }

    #[test]
    fn array_wraps_in_vector() {
        assert_eq!(lower_type(&Type::Array(Box::new(prim("int")))), "std::vector<int>");
    }

    #[test]
    fn reference_kinds_map_per_table() {
        assert_eq!(
            lower_type(&Type::Reference(Box::new(prim("int")), ReferenceKind::Immutable)),
            "const int&"
        );
        assert_eq!(
            lower_type(&Type::Reference(Box::new(prim("int")), ReferenceKind::Mutable)),
            "int&"
        );
        assert_eq!(
            lower_type(&Type::Reference(Box::new(prim("int")), ReferenceKind::Move)),
            "int&&"
        );
        assert_eq!(
            lower_type(&Type::Reference(Box::new(prim("int")), ReferenceKind::Copy)),
            "int"
        );
    }

    #[test]
    fn bare_non_exempt_primitive_defaults_to_immutable_reference() {
        assert_eq!(lower_param_type(&prim("string")), "const std::string&");
    }

    #[test]
    fn bare_exempt_primitives_pass_by_value() {
        for name in ["int", "float", "double", "bool", "char"] {
            assert_eq!(lower_param_type(&prim(name)), primitive_target(name));
        }
    }

    #[test]
    fn explicit_reference_kinds_are_not_redefaulted() {
        assert_eq!(
            lower_param_type(&Type::Reference(Box::new(prim("int")), ReferenceKind::Mutable)),
            "int&"
        );
        assert_eq!(
            lower_param_type(&Type::Reference(Box::new(prim("int")), ReferenceKind::Move)),
            "int&&"
        );
        assert_eq!(
            lower_param_type(&Type::Reference(Box::new(prim("int")), ReferenceKind::Copy)),
            "int"
        );
    }

    #[test]
    fn bare_user_class_defaults_to_immutable_reference() {
        assert_eq!(lower_param_type(&prim("Account")), "const Account&");
    }
}
