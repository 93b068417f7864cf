//! The translator's environment (§4.4, §4.6): a stack of lexical scopes
//! plus the whole-program class/struct member table, built before any
//! statement is emitted so a use site anywhere can resolve a member
//! regardless of declaration order.

use rustc_hash::{FxHashMap, FxHashSet};

use ivyc_par::ast::{Access, Block, Case, Member, MemberRole, Mutability, Stmt, Type};
use ivyc_util::Symbol;

/// What the translator knows about one class/struct member, keyed by name.
#[derive(Debug, Clone)]
pub struct MemberInfo {
    pub access: Access,
    pub is_static: bool,
    pub role: MemberRole,
    /// `Some` only for `MemberRole::Field`; methods/constructors/destructors
    /// have no mutability of their own.
    pub mutability: Option<Mutability>,
    pub declared_type: Option<Type>,
}

/// The member table for one `class`/`struct` declaration.
#[derive(Debug, Clone, Default)]
pub struct ClassInfo {
    pub members: FxHashMap<Symbol, MemberInfo>,
}

/// What the translator knows about one in-scope binding (a `let`/`mut`
/// variable, a parameter, or -- inside a method body -- a class member
/// reached bare, without `this.`).
#[derive(Debug, Clone)]
pub struct BindingInfo {
    pub mutability: Mutability,
    pub declared_type: Option<Type>,
    pub is_member: bool,
    pub class_owner: Option<Symbol>,
}

type Scope = FxHashMap<Symbol, BindingInfo>;

/// Owns the class table and the scope stack threaded through translation.
#[derive(Default)]
pub struct Environment {
    pub classes: FxHashMap<Symbol, ClassInfo>,
    pub enums: FxHashSet<Symbol>,
    scopes: Vec<Scope>,
    /// Set while lowering a method body; `None` at top level or inside a
    /// free function.
    pub current_class: Option<Symbol>,
    /// Generic parameters of every function/class declaration currently
    /// being lowered, innermost included -- a flat stack is enough since a
    /// type name only needs to be *some* enclosing declaration's parameter
    /// to count as known, not the innermost one's specifically.
    type_params: Vec<Symbol>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            classes: FxHashMap::default(),
            enums: FxHashSet::default(),
            scopes: vec![Scope::default()],
            current_class: None,
            type_params: Vec::new(),
        }
    }

    /// Pushes `params` onto the active generic-parameter stack for the
    /// duration of lowering the declaration that introduced them.
    pub fn push_type_params(&mut self, params: &[Symbol]) {
        self.type_params.extend_from_slice(params);
    }

    pub fn pop_type_params(&mut self, count: usize) {
        let new_len = self.type_params.len() - count;
        self.type_params.truncate(new_len);
    }

    pub fn is_type_param(&self, name: Symbol) -> bool {
        self.type_params.contains(&name)
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    pub fn exit_scope(&mut self) {
        self.scopes.pop();
        debug_assert!(!self.scopes.is_empty(), "the top-level scope is never popped");
    }

    pub fn declare(
        &mut self,
        name: Symbol,
        mutability: Mutability,
        declared_type: Option<Type>,
    ) {
        self.scopes.last_mut().expect("scope stack never empty").insert(
            name,
            BindingInfo {
                mutability,
                declared_type,
                is_member: false,
                class_owner: None,
            },
        );
    }

    pub fn declare_binding(&mut self, name: Symbol, binding: BindingInfo) {
        self.scopes
            .last_mut()
            .expect("scope stack never empty")
            .insert(name, binding);
    }

    /// Innermost-first lookup across the scope stack.
    pub fn lookup(&self, name: Symbol) -> Option<&BindingInfo> {
        self.scopes.iter().rev().find_map(|scope| scope.get(&name))
    }

    pub fn is_known_class(&self, name: Symbol) -> bool {
        self.classes.contains_key(&name)
    }

    /// Whether `name` is bound to a value whose declared type names a known
    /// user class -- the condition for the `*a`/`&&a` pseudo-operator
    /// rewrites.
    pub fn is_user_class_binding(&self, name: Symbol) -> bool {
        self.lookup(name)
            .and_then(|b| b.declared_type.as_ref())
            .and_then(Self::type_class_name)
            .is_some_and(|class| self.is_known_class(class))
    }

    /// Recovers the user-class name a type-node ultimately refers to, if
    /// any (peeling through reference wrappers).
    fn type_class_name(ty: &Type) -> Option<Symbol> {
        match ty {
            Type::Primitive(name) => Some(*name),
            Type::Reference(inner, _) => Self::type_class_name(inner),
            _ => None,
        }
    }

    /// Best-effort inference of the class an object expression's value
    /// belongs to, used by the access-violation check. Returns `None` when
    /// the object's type can't be determined from declared annotations
    /// alone -- full type inference is a declared Non-goal, so an
    /// undeterminable object is simply not checked.
    pub fn infer_owner_class(&self, expr: &ivyc_par::ast::Expr) -> Option<Symbol> {
        use ivyc_par::ast::Expr;
        match expr {
            Expr::This => self.current_class,
            // A bare class name used as the left side of `::` (e.g. the
            // `Account` in `Account::secret`). `is_known_class` only
            // consults `self.classes`, never `self.enums`, so `Color::Red`
            // still falls through to the binding lookup below and stays
            // unchecked.
            Expr::Variable(name) if self.is_known_class(*name) => Some(*name),
            Expr::Variable(name) => self
                .lookup(*name)
                .and_then(|b| b.declared_type.as_ref())
                .and_then(Self::type_class_name)
                .filter(|class| self.is_known_class(*class)),
            Expr::Get(object, field) => {
                let owner = self.infer_owner_class(object)?;
                let info = self.classes.get(&owner)?;
                let member = info.members.get(field)?;
                member
                    .declared_type
                    .as_ref()
                    .and_then(Self::type_class_name)
                    .filter(|class| self.is_known_class(*class))
            }
            Expr::Scope(left, _) => match &**left {
                Expr::Variable(name) if self.is_known_class(*name) => Some(*name),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Recursively scans `stmts` for `class`/`struct`/`enum` declarations,
/// including ones nested inside function bodies and control-flow blocks, and
/// populates `classes`/`enums`. Runs once, before any statement is lowered,
/// so every use site -- regardless of its declaration's position in source
/// order -- sees the complete member table (§4.4: "the translator sees all
/// declarations before emitting").
pub fn collect_classes(
    stmts: &[Stmt],
    classes: &mut FxHashMap<Symbol, ClassInfo>,
    enums: &mut FxHashSet<Symbol>,
) {
    for stmt in stmts {
        collect_classes_in_stmt(stmt, classes, enums);
    }
}

fn collect_classes_in_stmt(
    stmt: &Stmt,
    classes: &mut FxHashMap<Symbol, ClassInfo>,
    enums: &mut FxHashSet<Symbol>,
) {
    match stmt {
        Stmt::Class(decl) | Stmt::Struct(decl) => {
            let mut info = ClassInfo::default();
            for member in &decl.members {
                insert_member(&mut info, member);
                collect_classes_in_stmt(&member.declaration, classes, enums);
            }
            classes.insert(decl.name, info);
        }
        Stmt::Enum(decl) => {
            enums.insert(decl.name);
        }
        Stmt::Function(f) => collect_classes(&f.body.stmts, classes, enums),
        Stmt::Block(b) => collect_classes_block(b, classes, enums),
        Stmt::If(_, then, els) => {
            collect_classes_in_stmt(then, classes, enums);
            if let Some(els) = els {
                collect_classes_in_stmt(els, classes, enums);
            }
        }
        Stmt::While(_, body) => collect_classes_in_stmt(body, classes, enums),
        Stmt::For(init, _, _, body) => {
            if let Some(init) = init {
                collect_classes_in_stmt(init, classes, enums);
            }
            collect_classes_in_stmt(body, classes, enums);
        }
        Stmt::Switch(_, cases) => {
            for Case { body, .. } in cases {
                collect_classes_block(body, classes, enums);
            }
        }
        _ => {}
    }
}

fn collect_classes_block(
    block: &Block,
    classes: &mut FxHashMap<Symbol, ClassInfo>,
    enums: &mut FxHashSet<Symbol>,
) {
    collect_classes(&block.stmts, classes, enums);
}

fn insert_member(info: &mut ClassInfo, member: &Member) {
    let mutability = match &member.declaration {
        Stmt::VarStmt { mutability, .. } => Some(*mutability),
        _ => None,
    };
    let declared_type = match &member.declaration {
        Stmt::VarStmt { ty, .. } => ty.clone(),
        _ => None,
    };
    let name = match &member.declaration {
        Stmt::VarStmt { name, .. } => *name,
        Stmt::Function(f) => f.name,
        _ => return,
    };
    info.members.insert(
        name,
        MemberInfo {
            access: member.access,
            is_static: member.is_static,
            role: member.role,
            mutability,
            declared_type,
        },
    );
}
