//! Statement lowering (§4.4's statement-lowering table) and the
//! main-function canonicalization pass (§4.6).

use ivyc_par::ast::{
    AggregateDecl, Block, Case, EnumDecl, FunctionDecl, Member, MemberRole, Mutability, Param,
    Stmt,
};
use ivyc_util::error::PipelineError;

use crate::translator::Translator;
use crate::types::{lower_param_type, lower_type};

impl<'a> Translator<'a> {
    pub(crate) fn lower_block(&mut self, block: &Block) -> Result<String, PipelineError> {
        self.env.enter_scope();
        let mut out = String::from("{\n");
        for stmt in &block.stmts {
            let text = self.lower_stmt(stmt)?;
            for line in text.lines() {
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push('}');
        self.env.exit_scope();
        Ok(out)
    }

    pub(crate) fn lower_stmt(&mut self, stmt: &Stmt) -> Result<String, PipelineError> {
        match stmt {
            Stmt::ExprStmt(expr) => Ok(format!("{};", self.lower_expr(expr)?)),
            Stmt::VarStmt { name, ty, initializer, mutability, .. } => {
                self.lower_var_stmt(*name, ty, initializer, *mutability)
            }
            Stmt::Block(block) => self.lower_block(block),
            Stmt::If(cond, then, els) => self.lower_if(cond, then, els),
            Stmt::While(cond, body) => {
                let cond_s = self.lower_expr(cond)?;
                let body_s = self.lower_stmt(body)?;
                Ok(format!("while ({cond_s}) {body_s}"))
            }
            Stmt::For(init, cond, step, body) => self.lower_for(init, cond, step, body),
            Stmt::Switch(subject, cases) => self.lower_switch(subject, cases),
            Stmt::Break => Ok("break;".to_string()),
            Stmt::Fallthrough => Ok("[[fallthrough]];".to_string()),
            Stmt::Function(f) => self.lower_function(f, None::<(ivyc_util::Symbol, MemberRole)>),
            Stmt::Return(value) => match value {
                Some(expr) => Ok(format!("return {};", self.lower_expr(expr)?)),
                None => Ok("return;".to_string()),
            },
            Stmt::Class(decl) => self.lower_aggregate(decl, "class"),
            Stmt::Struct(decl) => self.lower_aggregate(decl, "struct"),
            Stmt::Enum(decl) => Ok(self.lower_enum(decl)),
            Stmt::Import { .. } => Ok(String::new()),
            Stmt::Package(_) => Ok(String::new()),
        }
    }

    fn lower_var_stmt(
        &mut self,
        name: ivyc_util::Symbol,
        ty: &Option<ivyc_par::ast::Type>,
        initializer: &Option<ivyc_par::ast::Expr>,
        mutability: Mutability,
    ) -> Result<String, PipelineError> {
        let init_text = match initializer {
            Some(expr) => Some(self.lower_expr(expr)?),
            None => None,
        };
        self.env.declare(name, mutability, ty.clone());
        let type_text = match ty {
            Some(t) => {
                self.check_type_known(t);
                lower_type(t)
            }
            None => match initializer {
                // `let v = new C(...);` binds to `std::unique_ptr<C>` rather
                // than `auto` (§4.4 VarStmt).
                Some(ivyc_par::ast::Expr::New(class_name, _)) => {
                    format!("std::unique_ptr<{}>", class_name.as_str())
                }
                _ => "auto".to_string(),
            },
        };
        let const_prefix = if mutability == Mutability::Let { "const " } else { "" };
        Ok(match init_text {
            Some(init) => format!("{const_prefix}{type_text} {} = {init};", name.as_str()),
            None => format!("{const_prefix}{type_text} {};", name.as_str()),
        })
    }

    fn lower_if(
        &mut self,
        cond: &ivyc_par::ast::Expr,
        then: &Stmt,
        els: &Option<Box<Stmt>>,
    ) -> Result<String, PipelineError> {
        let cond_s = self.lower_expr(cond)?;
        let then_s = self.lower_stmt(then)?;
        match els {
            Some(els) => {
                let els_s = self.lower_stmt(els)?;
                Ok(format!("if ({cond_s}) {then_s}\nelse {els_s}"))
            }
            None => Ok(format!("if ({cond_s}) {then_s}")),
        }
    }

    fn lower_for(
        &mut self,
        init: &Option<Box<Stmt>>,
        cond: &Option<ivyc_par::ast::Expr>,
        step: &Option<ivyc_par::ast::Expr>,
        body: &Stmt,
    ) -> Result<String, PipelineError> {
        self.env.enter_scope();
        let init_s = match init {
            Some(stmt) => self.lower_stmt(stmt)?,
            None => ";".to_string(),
        };
        let cond_s = match cond {
            Some(expr) => self.lower_expr(expr)?,
            None => String::new(),
        };
        let step_s = match step {
            Some(expr) => self.lower_expr(expr)?,
            None => String::new(),
        };
        let body_s = self.lower_stmt(body)?;
        self.env.exit_scope();
        Ok(format!("for ({init_s} {cond_s}; {step_s}) {body_s}"))
    }

    fn lower_switch(
        &mut self,
        subject: &ivyc_par::ast::Expr,
        cases: &[Case],
    ) -> Result<String, PipelineError> {
        let subject_s = self.lower_expr(subject)?;
        let mut out = format!("switch ({subject_s}) {{\n");
        for case in cases {
            let value_s = self.lower_expr(&case.value)?;
            let body_s = self.lower_block(&case.body)?;
            out.push_str(&format!("case {value_s}: {body_s}\n"));
        }
        out.push('}');
        Ok(out)
    }

    pub(crate) fn lower_param_list(&self, params: &[Param]) -> String {
        params
            .iter()
            .map(|p| format!("{} {}", lower_param_type(&p.ty), p.name.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn lower_function(
        &mut self,
        f: &FunctionDecl,
        owner: Option<(ivyc_util::Symbol, MemberRole)>,
    ) -> Result<String, PipelineError> {
        self.env.enter_scope();
        self.env.push_type_params(&f.type_params);
        let template_prefix = template_header(&f.type_params);
        for p in &f.params {
            self.check_type_known(&p.ty);
        }
        let params_s = self.lower_param_list(&f.params);
        for p in &f.params {
            self.env.declare(p.name, Mutability::Mut, Some(p.ty.clone()));
        }
        let prev_class = self.env.current_class;
        if let Some((owner_name, _)) = owner {
            self.env.current_class = Some(owner_name);
        }
        let body_s = self.lower_block(&f.body)?;
        self.env.current_class = prev_class;

        let suppresses_return_type =
            matches!(owner, Some((_, MemberRole::Constructor | MemberRole::Destructor)));
        let ret_s = if suppresses_return_type {
            String::new()
        } else {
            match &f.ret {
                Some(t) => {
                    self.check_type_known(t);
                    format!("{} ", lower_type(t))
                }
                None => "void ".to_string(),
            }
        };
        self.env.pop_type_params(f.type_params.len());
        self.env.exit_scope();
        let name_prefix = if matches!(owner, Some((_, MemberRole::Destructor))) {
            "~"
        } else {
            ""
        };
        Ok(format!(
            "{template_prefix}{ret_s}{name_prefix}{}({params_s}) {body_s}",
            f.name.as_str()
        ))
    }

    fn lower_aggregate(&mut self, decl: &AggregateDecl, keyword: &str) -> Result<String, PipelineError> {
        let prev_class = self.env.current_class;
        self.env.current_class = Some(decl.name);
        self.env.push_type_params(&decl.type_params);
        let template_prefix = template_header(&decl.type_params);
        let mut out = format!("{template_prefix}{keyword} {} {{\n", decl.name.as_str());
        let mut last_access = None;
        for member in &decl.members {
            if last_access != Some(member.access) {
                out.push_str(access_label(member.access));
                out.push('\n');
                last_access = Some(member.access);
            }
            out.push_str(&self.lower_member(member, decl.name)?);
            out.push('\n');
        }
        out.push_str("};");
        self.env.pop_type_params(decl.type_params.len());
        self.env.current_class = prev_class;
        Ok(out)
    }

    fn lower_member(
        &mut self,
        member: &Member,
        owner: ivyc_util::Symbol,
    ) -> Result<String, PipelineError> {
        let prefix = if member.is_static { "static " } else { "" };
        match &member.declaration {
            Stmt::Function(f) => {
                let body = self.lower_function(f, Some((owner, member.role)))?;
                Ok(format!("{prefix}{body}"))
            }
            Stmt::VarStmt { name, ty, initializer, mutability, .. } => {
                let type_text = match ty {
                    Some(t) => {
                        self.check_type_known(t);
                        lower_type(t)
                    }
                    None => "auto".to_string(),
                };
                let const_prefix = if *mutability == Mutability::Let { "const " } else { "" };
                let is_literal_init =
                    matches!(initializer, Some(ivyc_par::ast::Expr::Literal(_)));
                // Static immutable literal field: `inline static const T name = init;`
                // (§4.4) — the `inline` qualifier lets the in-class initializer stand
                // in for an out-of-line definition.
                let prefix = if member.is_static && *mutability == Mutability::Let && is_literal_init
                {
                    "inline static "
                } else {
                    prefix
                };
                match initializer {
                    Some(expr) => {
                        let init_s = self.lower_expr(expr)?;
                        Ok(format!(
                            "{prefix}{const_prefix}{type_text} {} = {init_s};",
                            name.as_str()
                        ))
                    }
                    None => Ok(format!("{prefix}{const_prefix}{type_text} {};", name.as_str())),
                }
            }
            other => self.lower_stmt(other),
        }
    }

    fn lower_enum(&self, decl: &EnumDecl) -> String {
        let members = decl
            .members
            .iter()
            .map(|m| m.as_str().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("enum class {} {{ {members} }};", decl.name.as_str())
    }
}

fn template_header(type_params: &[ivyc_util::Symbol]) -> String {
    if type_params.is_empty() {
        return String::new();
    }
    let params = type_params
        .iter()
        .map(|p| format!("typename {}", p.as_str()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("template<{params}>\n")
}

fn access_label(access: ivyc_par::ast::Access) -> &'static str {
    match access {
        ivyc_par::ast::Access::Public => "public:",
        ivyc_par::ast::Access::Private => "private:",
    }
}
