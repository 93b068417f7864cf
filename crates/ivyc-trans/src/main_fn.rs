//! Main-function canonicalization (§4.4, §4.6): rewriting an explicit
//! `main` to the target entry-point signature, or synthesizing one around
//! the top-level executable statements when the source declares none
//! (legacy script mode).

use ivyc_par::ast::{FunctionDecl, Mutability, Type};
use ivyc_util::error::PipelineError;

use crate::translator::Translator;

impl<'a> Translator<'a> {
    /// Rewrites `f`'s signature to `int main(int argc, char* argv[])`. When
    /// the source declared a `string[]`-typed parameter, its name is bound
    /// to `std::vector<std::string> args(argv, argv + argc);` prepended to
    /// the body, rather than threaded through as an actual parameter.
    pub(crate) fn lower_main_function(&mut self, f: &FunctionDecl) -> Result<String, PipelineError> {
        self.env.enter_scope();
        let args_param = f.params.iter().find(|p| is_string_array(&p.ty));
        for p in &f.params {
            self.env.declare(p.name, Mutability::Mut, Some(p.ty.clone()));
        }
        let mut body = self.lower_block(&f.body)?;
        self.env.exit_scope();

        if let Some(p) = args_param {
            let prelude = format!(
                "std::vector<std::string> {}(argv, argv + argc);\n",
                p.name.as_str()
            );
            body = body.replacen("{\n", &format!("{{\n{prelude}"), 1);
        }
        Ok(format!("int main(int argc, char* argv[]) {body}"))
    }

    /// Wraps the already-lowered top-level executable statements in a
    /// synthesized entry point, appending `return 0;`.
    pub(crate) fn synthesize_main(&self, loose_statements: &[String]) -> String {
        let mut out = String::from("int main(int argc, char* argv[]) {\n");
        for stmt in loose_statements {
            out.push_str(stmt);
            out.push('\n');
        }
        out.push_str("return 0;\n}");
        out
    }
}

fn is_string_array(ty: &Type) -> bool {
    matches!(
        ty,
        Type::Array(inner) if matches!(&**inner, Type::Primitive(name) if name.as_str() == "string")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ivyc_util::Symbol;

    #[test]
    fn string_array_param_is_detected() {
        let ty = Type::Array(Box::new(Type::Primitive(Symbol::intern("string"))));
        assert!(is_string_array(&ty));
    }

    #[test]
    fn non_array_param_is_not_detected() {
        let ty = Type::Primitive(Symbol::intern("int"));
        assert!(!is_string_array(&ty));
    }
}
