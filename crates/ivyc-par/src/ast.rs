//! The closed AST: every node the parser can produce and the translator
//! must handle. Variants are exhaustive by design -- there is no node here
//! without a corresponding lowering rule in `ivyc-trans`.

use ivyc_util::{Span, Symbol};

/// A parsed program: the top-level statement list, in source order.
pub type Ast = Vec<Stmt>;

/// A type as written in source: primitives, one-dimensional arrays,
/// references, and function types. Recursive by composition (`int[][]` is
/// `Array(Array(Primitive("int")))`).
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Primitive(Symbol),
    Array(Box<Type>),
    Reference(Box<Type>, ReferenceKind),
    Function(Vec<Type>, Box<Type>),
}

/// The four reference kinds selectable via `T`/`&T`/`&&T`/`*T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Immutable,
    Mutable,
    Move,
    Copy,
}

/// `let` (immutable) or `mut` (mutable); a binding is never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    Let,
    Mut,
}

/// A typed parameter in a function signature or lambda.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: Symbol,
    pub ty: Type,
    pub span: Span,
}

/// A literal value. `Null` covers an absent value, emitted as `nullptr`.
#[derive(Debug, Clone)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    Str(Symbol),
    Char(char),
    Bool(bool),
    Null,
}

/// Binary operators reachable from the precedence ladder (equality,
/// comparison, additive, multiplicative). `&&`/`||` are modeled separately as
/// [`Expr::Logical`] since the source language treats them as short-circuit
/// control flow rather than ordinary binary arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinOp {
    pub fn lexeme(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
        }
    }
}

/// `&&` or `||`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn lexeme(self) -> &'static str {
        match self {
            LogicalOp::And => "&&",
            LogicalOp::Or => "||",
        }
    }
}

/// Prefix and postfix unary operators. `Deref`/`Ref`/`RefRef` are recorded
/// verbatim here; whether `*a`/`&&a` become `a.clone()`/`a.move()` or stay
/// C-style prefix operators is decided later, by the translator, once it
/// knows whether `a` names a user class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
    PreInc,
    PreDec,
    PostInc,
    PostDec,
    Deref,
    Ref,
    RefRef,
}

/// The assignment operator family: plain `=` plus the compound-assign forms
/// from the precedence table. Modeled as one field on [`Expr::Assign`]
/// rather than a sibling variant, since every form shares the same
/// target-validity rule (§ assignment target check).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
}

impl AssignOp {
    pub fn lexeme(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
            AssignOp::ModAssign => "%=",
        }
    }
}

/// An expression. Owning tree: every `Box`ed child is exclusively owned by
/// its parent, so a `Set` synthesized from a `Get` during assignment-target
/// rewriting simply takes ownership of the `Get`'s object sub-tree.
#[derive(Debug, Clone)]
pub enum Expr {
    Literal(Literal),
    Variable(Symbol),
    Grouping(Box<Expr>),
    Unary(UnOp, Box<Expr>),
    Binary(Box<Expr>, BinOp, Box<Expr>),
    Logical(Box<Expr>, LogicalOp, Box<Expr>),
    Assign(Box<Expr>, AssignOp, Box<Expr>),
    Call(Box<Expr>, Vec<Expr>, Option<Vec<Type>>),
    Subscript(Box<Expr>, Box<Expr>),
    Scope(Box<Expr>, Symbol),
    Get(Box<Expr>, Symbol),
    Set(Box<Expr>, Symbol, Box<Expr>),
    This,
    ArrayLiteral(Vec<Expr>),
    Lambda(Vec<Param>, Option<Type>, Box<Block>),
    TypeCast(Type, Box<Expr>),
    New(Symbol, Vec<Expr>),
}

/// A `{ … }` block: an ordered list of statements.
#[derive(Debug, Clone)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

/// One `case` arm of a `switch`. Its body is always a block (never a bare
/// statement), matching the "every `Case` body is a `Block`" invariant.
#[derive(Debug, Clone)]
pub struct Case {
    pub value: Expr,
    pub body: Block,
}

/// A function declaration: free function, method, constructor, or
/// destructor (distinguished at the use site by name, not by a separate
/// node kind).
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: Symbol,
    pub type_params: Vec<Symbol>,
    pub params: Vec<Param>,
    pub ret: Option<Type>,
    pub body: Block,
    pub span: Span,
}

/// Visibility of an aggregate member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Private,
}

/// What role a member plays inside its owning `class`/`struct`, resolved
/// once at parse time so the translator never has to re-derive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRole {
    Field,
    Method,
    Constructor,
    Destructor,
}

/// A single member of a `class`/`struct` body.
#[derive(Debug, Clone)]
pub struct Member {
    pub declaration: Stmt,
    pub access: Access,
    pub is_static: bool,
    pub role: MemberRole,
}

/// Shared shape of `class` and `struct` declarations; only emission differs
/// between the two (`class C { … };` vs `struct C { … };`), so the parser
/// keeps one payload type and two `Stmt` variants to carry the distinction.
#[derive(Debug, Clone)]
pub struct AggregateDecl {
    pub name: Symbol,
    pub type_params: Vec<Symbol>,
    pub members: Vec<Member>,
    pub span: Span,
}

/// An `enum` declaration: a name plus its unit-like member list.
#[derive(Debug, Clone)]
pub struct EnumDecl {
    pub name: Symbol,
    pub members: Vec<Symbol>,
    pub span: Span,
}

/// A statement.
#[derive(Debug, Clone)]
pub enum Stmt {
    ExprStmt(Expr),
    VarStmt {
        name: Symbol,
        ty: Option<Type>,
        initializer: Option<Expr>,
        mutability: Mutability,
        span: Span,
    },
    Block(Block),
    If(Expr, Box<Stmt>, Option<Box<Stmt>>),
    While(Expr, Box<Stmt>),
    For(Option<Box<Stmt>>, Option<Expr>, Option<Expr>, Box<Stmt>),
    Switch(Expr, Vec<Case>),
    Break,
    Fallthrough,
    Function(FunctionDecl),
    Return(Option<Expr>),
    Class(AggregateDecl),
    Struct(AggregateDecl),
    Enum(EnumDecl),
    Import {
        path: Symbol,
        alias: Option<Symbol>,
        is_stdlib: bool,
    },
    Package(Symbol),
}
