//! NodeKind enum - every syntax category the parser can produce.

use serde::Serialize;
use std::fmt;

/// The kind of a syntax node.
///
/// Serialized in `SCREAMING_SNAKE_CASE` (`NAME_TYPE_INIT`, `MULTI_LINE_COMMENT`)
/// so the JSON handed to the code generator uses the grammar's own names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum NodeKind {
    // ========================================================================
    // Structure
    // ========================================================================
    Block,
    ParameterList,
    Parameter,
    Name,
    NameTypeInit,
    Init,
    Rest,
    MultiLineComment,

    // ========================================================================
    // Declarations
    // ========================================================================
    CompilationUnit,
    Package,
    Import,
    Class,
    Interface,
    Extends,
    Implements,
    Content,
    ModifierList,
    Modifier,
    Function,
    Get,
    Set,
    VarList,
    ConstList,

    // ========================================================================
    // Types
    // ========================================================================
    Type,
    Vector,

    // ========================================================================
    // Statements
    // ========================================================================
    If,
    While,
    For,
    Return,
    Break,
    Continue,
    Throw,
    ExpressionStatement,
    EmptyStatement,

    // ========================================================================
    // Expressions
    // ========================================================================
    Assignment,
    Conditional,
    Binary,
    Unary,
    Postfix,
    Call,
    Arguments,
    Dot,
    ArrayAccessor,
    New,
    Primary,
    Literal,
    Encapsulated,
    ArrayLiteral,
    ObjectLiteral,
    ObjectEntry,
    Lambda,
}

impl NodeKind {
    /// Kinds that carry their payload in `text` and never have children.
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            NodeKind::Name
                | NodeKind::MultiLineComment
                | NodeKind::Modifier
                | NodeKind::Import
                | NodeKind::Primary
                | NodeKind::Literal
                | NodeKind::EmptyStatement
        )
    }

    /// Kinds produced by the statement grammar.
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            NodeKind::Block
                | NodeKind::VarList
                | NodeKind::ConstList
                | NodeKind::Function
                | NodeKind::If
                | NodeKind::While
                | NodeKind::For
                | NodeKind::Return
                | NodeKind::Break
                | NodeKind::Continue
                | NodeKind::Throw
                | NodeKind::ExpressionStatement
                | NodeKind::EmptyStatement
        )
    }

    /// The grammar name of this kind, as used in dumps and JSON.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Block => "BLOCK",
            NodeKind::ParameterList => "PARAMETER_LIST",
            NodeKind::Parameter => "PARAMETER",
            NodeKind::Name => "NAME",
            NodeKind::NameTypeInit => "NAME_TYPE_INIT",
            NodeKind::Init => "INIT",
            NodeKind::Rest => "REST",
            NodeKind::MultiLineComment => "MULTI_LINE_COMMENT",
            NodeKind::CompilationUnit => "COMPILATION_UNIT",
            NodeKind::Package => "PACKAGE",
            NodeKind::Import => "IMPORT",
            NodeKind::Class => "CLASS",
            NodeKind::Interface => "INTERFACE",
            NodeKind::Extends => "EXTENDS",
            NodeKind::Implements => "IMPLEMENTS",
            NodeKind::Content => "CONTENT",
            NodeKind::ModifierList => "MODIFIER_LIST",
            NodeKind::Modifier => "MODIFIER",
            NodeKind::Function => "FUNCTION",
            NodeKind::Get => "GET",
            NodeKind::Set => "SET",
            NodeKind::VarList => "VAR_LIST",
            NodeKind::ConstList => "CONST_LIST",
            NodeKind::Type => "TYPE",
            NodeKind::Vector => "VECTOR",
            NodeKind::If => "IF",
            NodeKind::While => "WHILE",
            NodeKind::For => "FOR",
            NodeKind::Return => "RETURN",
            NodeKind::Break => "BREAK",
            NodeKind::Continue => "CONTINUE",
            NodeKind::Throw => "THROW",
            NodeKind::ExpressionStatement => "EXPRESSION_STATEMENT",
            NodeKind::EmptyStatement => "EMPTY_STATEMENT",
            NodeKind::Assignment => "ASSIGNMENT",
            NodeKind::Conditional => "CONDITIONAL",
            NodeKind::Binary => "BINARY",
            NodeKind::Unary => "UNARY",
            NodeKind::Postfix => "POSTFIX",
            NodeKind::Call => "CALL",
            NodeKind::Arguments => "ARGUMENTS",
            NodeKind::Dot => "DOT",
            NodeKind::ArrayAccessor => "ARRAY_ACCESSOR",
            NodeKind::New => "NEW",
            NodeKind::Primary => "PRIMARY",
            NodeKind::Literal => "LITERAL",
            NodeKind::Encapsulated => "ENCAPSULATED",
            NodeKind::ArrayLiteral => "ARRAY_LITERAL",
            NodeKind::ObjectLiteral => "OBJECT_LITERAL",
            NodeKind::ObjectEntry => "OBJECT_ENTRY",
            NodeKind::Lambda => "LAMBDA",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
