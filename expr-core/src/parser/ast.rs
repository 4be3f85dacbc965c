use std::fmt::Display;

use crate::utils::prelude::SrcSpan;

// expression -> <primitive> | <identifier> | <unary> | <binary> | <compare>
//             | <ternary> | <walrus> | <assign> | <tuple>
//
// `Display` renders every compound node fully parenthesized, so the grouping
// chosen by the parser is visible in the read-parse-print loop and testable
// by string comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Primitive(Primitive),
    Identifier(Identifier),
    Unary(Unary),
    Binary(Binary),
    Compare(Compare),
    Ternary(Ternary),
    Walrus(Walrus),
    Assign(Assign),
    Tuple(Tuple),
}

impl Expression {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Primitive(primitive) => primitive.location(),
            Self::Identifier(identifier) => identifier.location,
            Self::Unary(unary) => unary.location,
            Self::Binary(binary) => binary.location,
            Self::Compare(compare) => compare.location,
            Self::Ternary(ternary) => ternary.location,
            Self::Walrus(walrus) => walrus.location,
            Self::Assign(assign) => assign.location,
            Self::Tuple(tuple) => tuple.location,
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primitive(primitive) => write!(f, "{primitive}"),
            Self::Identifier(identifier) => write!(f, "{identifier}"),
            Self::Unary(unary) => write!(f, "{unary}"),
            Self::Binary(binary) => write!(f, "{binary}"),
            Self::Compare(compare) => write!(f, "{compare}"),
            Self::Ternary(ternary) => write!(f, "{ternary}"),
            Self::Walrus(walrus) => write!(f, "{walrus}"),
            Self::Assign(assign) => write!(f, "{assign}"),
            Self::Tuple(tuple) => write!(f, "{tuple}"),
        }
    }
}

// primitive -> <int> | <float> | <bool>
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Int {
        value: i64,
        location: SrcSpan
    },
    Float {
        value: f64,
        location: SrcSpan
    },
    Bool {
        value: bool,
        location: SrcSpan
    }
}

impl Primitive {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Int { location, .. }
            | Self::Float { location, .. }
            | Self::Bool { location, .. } => *location
        }
    }
}

impl Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int { value, .. } => write!(f, "{value}"),
            Self::Float { value, .. } => {
                if value.is_finite() && value.fract() == 0.0 {
                    write!(f, "{value:.1}")
                } else {
                    write!(f, "{value}")
                }
            },
            Self::Bool { value, .. } => {
                write!(f, "{}", if *value { "True" } else { "False" })
            }
        }
    }
}

// identifier -> (<letter> | _) { <letter> | <digit> | _ }
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub value: String,
    pub location: SrcSpan
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<(u32, String, u32)> for Identifier {
    fn from(value: (u32, String, u32)) -> Self {
        Identifier {
            value: value.1,
            location: SrcSpan { start: value.0, end: value.2 }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Pos,
    Neg,
    BitNot,
    Not,
}

impl UnaryOp {
    pub fn as_literal(&self) -> &'static str {
        match self {
            Self::Pos => "+",
            Self::Neg => "-",
            Self::BitNot => "~",
            Self::Not => "not",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Pow,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Add,
    Sub,
    Shl,
    Shr,
    BitAnd,
    BitXor,
    BitOr,
    And,
    Or,
}

impl BinaryOp {
    pub fn as_literal(&self) -> &'static str {
        match self {
            Self::Pow => "**",
            Self::Mul => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Mod => "%",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::BitOr => "|",
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Is,
    IsNot,
    In,
    NotIn,
}

impl CompareOp {
    pub fn as_literal(&self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Is => "is",
            Self::IsNot => "is not",
            Self::In => "in",
            Self::NotIn => "not in",
        }
    }
}

// unary -> <unary_op> <unary> | <power>
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub op: UnaryOp,
    pub operand: Box<Expression>,
    pub location: SrcSpan
}

impl Display for Unary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.op {
            UnaryOp::Not => write!(f, "(not {})", self.operand),
            _ => write!(f, "({}{})", self.op.as_literal(), self.operand)
        }
    }
}

// binary -> <expression> <binary_op> <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub op: BinaryOp,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl Display for Binary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.op.as_literal(), self.right)
    }
}

// compare -> <operand> <compare_op> <operand> { <compare_op> <operand> }
//
// A run of comparisons stays one node so shared operands are evaluated once
// and the chain can short-circuit; it is never desugared to nested binaries.
#[derive(Debug, Clone, PartialEq)]
pub struct Compare {
    pub first: Box<Expression>,
    pub comparisons: Vec<(CompareOp, Expression)>,
    pub location: SrcSpan
}

impl Display for Compare {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}", self.first)?;

        for (op, operand) in &self.comparisons {
            write!(f, " {} {}", op.as_literal(), operand)?;
        }

        write!(f, ")")
    }
}

// ternary -> <or> if <or> else <ternary>
#[derive(Debug, Clone, PartialEq)]
pub struct Ternary {
    pub condition: Box<Expression>,
    pub truthy: Box<Expression>,
    pub falsy: Box<Expression>,
    pub location: SrcSpan
}

impl Display for Ternary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} if {} else {})", self.truthy, self.condition, self.falsy)
    }
}

// walrus -> <identifier> := <walrus>
#[derive(Debug, Clone, PartialEq)]
pub struct Walrus {
    pub name: Identifier,
    pub value: Box<Expression>,
    pub location: SrcSpan
}

impl Display for Walrus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} := {})", self.name, self.value)
    }
}

// assign -> <identifier> = <assign>
//
// A chain `a = b = c` is flattened into one node; every target receives the
// same evaluated value.
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub targets: Vec<Identifier>,
    pub value: Box<Expression>,
    pub location: SrcSpan
}

impl Display for Assign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;

        for target in &self.targets {
            write!(f, "{target} = ")?;
        }

        write!(f, "{})", self.value)
    }
}

// tuple -> <assign> , { <assign> , } [ <assign> ]
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    pub elements: Vec<Expression>,
    pub location: SrcSpan
}

impl Display for Tuple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let elements = self.elements.iter()
            .map(|element| element.to_string())
            .collect::<Vec<String>>();

        match elements.as_slice() {
            [single] => write!(f, "({single},)"),
            _ => write!(f, "({})", elements.join(", "))
        }
    }
}
