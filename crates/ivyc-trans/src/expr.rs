//! Expression lowering (§4.4's expression-lowering table).

use ivyc_par::ast::{Expr, Literal, UnOp};
use ivyc_util::error::PipelineError;
use ivyc_util::Span;

use crate::translator::Translator;
use crate::types::lower_type;

impl<'a> Translator<'a> {
    pub(crate) fn lower_expr(&mut self, expr: &Expr) -> Result<String, PipelineError> {
        match expr {
            Expr::Literal(lit) => Ok(self.lower_literal(lit)),
            Expr::Variable(name) => Ok(name.as_str().to_string()),
            Expr::Grouping(inner) => Ok(format!("({})", self.lower_expr(inner)?)),
            Expr::Unary(op, operand) => self.lower_unary(*op, operand),
            Expr::Binary(l, op, r) => Ok(format!(
                "({} {} {})",
                self.lower_expr(l)?,
                op.lexeme(),
                self.lower_expr(r)?
            )),
            Expr::Logical(l, op, r) => Ok(format!(
                "({} {} {})",
                self.lower_expr(l)?,
                op.lexeme(),
                self.lower_expr(r)?
            )),
            Expr::Assign(target, op, value) => self.lower_assign(target, *op, value),
            Expr::Call(callee, args, type_args) => self.lower_call(callee, args, type_args),
            Expr::Subscript(collection, index) => Ok(format!(
                "{}[{}]",
                self.lower_expr(collection)?,
                self.lower_expr(index)?
            )),
            Expr::Scope(left, name) => {
                self.check_member_access(left, *name, false)?;
                Ok(format!("{}::{}", self.lower_expr(left)?, name.as_str()))
            }
            Expr::Get(object, name) => {
                self.check_member_access(object, *name, false)?;
                Ok(format!("{}.{}", self.lower_expr(object)?, name.as_str()))
            }
            Expr::Set(object, name, value) => {
                self.check_member_access(object, *name, true)?;
                Ok(format!(
                    "{}.{} = {}",
                    self.lower_expr(object)?,
                    name.as_str(),
                    self.lower_expr(value)?
                ))
            }
            Expr::This => Ok("this".to_string()),
            Expr::ArrayLiteral(elements) => self.lower_array_literal(elements),
            Expr::Lambda(params, ret, body) => self.lower_lambda(params, ret, body),
            Expr::TypeCast(ty, inner) => {
                self.check_type_known(ty);
                Ok(format!("static_cast<{}>({})", lower_type(ty), self.lower_expr(inner)?))
            }
            Expr::New(class_name, args) => {
                let args_s = self.lower_args(args)?;
                Ok(format!("std::make_unique<{}>({})", class_name.as_str(), args_s))
            }
        }
    }

    fn lower_literal(&self, lit: &Literal) -> String {
        match lit {
            Literal::Integer(n) => n.to_string(),
            Literal::Float(f) => format_float(*f),
            Literal::Str(s) => format!("\"{}\"", s.as_str()),
            Literal::Char(c) => format!("'{c}'"),
            Literal::Bool(b) => b.to_string(),
            Literal::Null => "nullptr".to_string(),
        }
    }

    /// `*a`/`&&a` rewrite to `a.clone()`/`a.move()` only when `a` is a
    /// binding whose declared type names a known user class; otherwise
    /// they stay C-style prefix operators, and postfix `++`/`--` append
    /// rather than prepend.
    fn lower_unary(&mut self, op: UnOp, operand: &Expr) -> Result<String, PipelineError> {
        let operand_is_user_class = matches!(operand, Expr::Variable(name) if self.env.is_user_class_binding(*name));
        let operand_text = self.lower_expr(operand)?;
        Ok(match op {
            UnOp::Deref if operand_is_user_class => format!("{operand_text}.clone()"),
            UnOp::RefRef if operand_is_user_class => format!("{operand_text}.move()"),
            UnOp::PostInc => format!("{operand_text}++"),
            UnOp::PostDec => format!("{operand_text}--"),
            UnOp::Neg => format!("-{operand_text}"),
            UnOp::Not => format!("!{operand_text}"),
            UnOp::PreInc => format!("++{operand_text}"),
            UnOp::PreDec => format!("--{operand_text}"),
            UnOp::Deref => format!("*{operand_text}"),
            UnOp::Ref => format!("&{operand_text}"),
            UnOp::RefRef => format!("&&{operand_text}"),
        })
    }

    fn lower_assign(
        &mut self,
        target: &Expr,
        op: ivyc_par::ast::AssignOp,
        value: &Expr,
    ) -> Result<String, PipelineError> {
        if let Expr::Variable(name) = target {
            if let Some(binding) = self.env.lookup(*name) {
                if binding.mutability == ivyc_par::ast::Mutability::Let {
                    return Err(PipelineError::ImmutableAssign(
                        Span::DUMMY,
                        name.as_str().to_string(),
                    ));
                }
            }
        }
        Ok(format!(
            "{} {} {}",
            self.lower_expr(target)?,
            op.lexeme(),
            self.lower_expr(value)?
        ))
    }

    fn lower_call(
        &mut self,
        callee: &Expr,
        args: &[Expr],
        type_args: &Option<Vec<ivyc_par::ast::Type>>,
    ) -> Result<String, PipelineError> {
        let callee_text = self.lower_expr(callee)?;
        let args_text = self.lower_args(args)?;
        match type_args {
            Some(types) => {
                for t in types {
                    self.check_type_known(t);
                }
                let types_text = types.iter().map(lower_type).collect::<Vec<_>>().join(",");
                Ok(format!("{callee_text}<{types_text}>({args_text})"))
            }
            None => Ok(format!("{callee_text}({args_text})")),
        }
    }

    fn lower_args(&mut self, args: &[Expr]) -> Result<String, PipelineError> {
        let mut parts = Vec::with_capacity(args.len());
        for arg in args {
            parts.push(self.lower_expr(arg)?);
        }
        Ok(parts.join(", "))
    }

    /// Checks the access rule for a `Get`/`Set`/`Scope` use site (§4.4,
    /// §4.6). Only fires when the object's owning class is determinable
    /// from declared-type annotations (see
    /// [`crate::env::Environment::infer_owner_class`]); an undeterminable
    /// object is left unchecked rather than guessed at.
    fn check_member_access(
        &mut self,
        object: &Expr,
        name: ivyc_util::Symbol,
        is_assignment: bool,
    ) -> Result<(), PipelineError> {
        let Some(owner) = self.env.infer_owner_class(object) else {
            return Ok(());
        };
        let Some(member) = self.env.classes.get(&owner).and_then(|c| c.members.get(&name)) else {
            return Ok(());
        };
        if member.access == ivyc_par::ast::Access::Private && self.env.current_class != Some(owner)
        {
            return Err(PipelineError::AccessViolation(
                Span::DUMMY,
                name.as_str().to_string(),
                owner.as_str().to_string(),
            ));
        }
        if is_assignment && member.mutability == Some(ivyc_par::ast::Mutability::Let) {
            return Err(PipelineError::ImmutableAssign(
                Span::DUMMY,
                name.as_str().to_string(),
            ));
        }
        Ok(())
    }

    fn lower_array_literal(&mut self, elements: &[Expr]) -> Result<String, PipelineError> {
        let element_type = self.infer_array_element_type(elements);
        let elements_text = self.lower_args(elements)?;
        Ok(format!("std::vector<{element_type}>({{{elements_text}}})"))
    }

    /// Infers the vector's element type from the first element, per the
    /// adopted resolution of the array-literal Open Question (§9):
    /// `std::vector<E>({...})` rather than `std::vector<auto>({...})`.
    fn infer_array_element_type(&self, elements: &[Expr]) -> String {
        match elements.first() {
            Some(Expr::Literal(Literal::Integer(_))) => "int".to_string(),
            Some(Expr::Literal(Literal::Float(_))) => "double".to_string(),
            Some(Expr::Literal(Literal::Bool(_))) => "bool".to_string(),
            Some(Expr::Literal(Literal::Str(_))) => "std::string".to_string(),
            Some(Expr::Literal(Literal::Char(_))) => "char".to_string(),
            Some(Expr::Variable(name)) => self
                .env
                .lookup(*name)
                .and_then(|b| b.declared_type.as_ref())
                .map(lower_type)
                .unwrap_or_else(|| "auto".to_string()),
            _ => "auto".to_string(),
        }
    }

    fn lower_lambda(
        &mut self,
        params: &[ivyc_par::ast::Param],
        ret: &Option<ivyc_par::ast::Type>,
        body: &ivyc_par::ast::Block,
    ) -> Result<String, PipelineError> {
        self.env.enter_scope();
        for p in params {
            self.check_type_known(&p.ty);
        }
        let params_text = self.lower_param_list(params);
        for p in params {
            self.env.declare(p.name, ivyc_par::ast::Mutability::Mut, Some(p.ty.clone()));
        }
        if let Some(t) = ret {
            self.check_type_known(t);
        }
        let ret_text = ret.as_ref().map(|t| format!(" -> {}", lower_type(t)));
        let body_text = self.lower_block(body)?;
        self.env.exit_scope();
        Ok(format!(
            "[]({}){} {}",
            params_text,
            ret_text.unwrap_or_default(),
            body_text
        ))
    }
}

/// Ensures a float literal always carries a decimal point, never the
/// integer-literal form (the normative resolution of §9's Open Question).
fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        let s = f.to_string();
        if s.contains('.') || s.contains('e') {
            s
        } else {
            format!("{s}.0")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_literal_has_no_decimal_point() {
        assert_eq!(super::format_float(1.0), "1.0");
    }

    #[test]
    fn fractional_literal_round_trips() {
        assert_eq!(super::format_float(1.5), "1.5");
    }
}
