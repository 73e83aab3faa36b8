//! Node records, kind tags and structural slots.
//!
//! A node is a [`NodeData`] payload (one variant per syntactic kind) plus
//! bookkeeping shared by all kinds: an optional source range, the weak parent
//! link, the slot the node occupies in its parent, and the bindings the
//! upstream resolver attached to it.
//!
//! Child positions are identified by [`ChildSlot`]. A slot is either a
//! single-child property (possibly empty, stored as `NodeIndex::NONE`) or an
//! ordered child-list property.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::base::{NodeIndex, NodeList};
use crate::operators::{
    AssignmentOperator, CommentStyle, InfixOperator, PostfixOperator, PrefixOperator,
    PrimitiveTypeCode,
};
use javelin_common::{BindingId, ModifierKeyword, TextRange};

/// One element of the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub data: NodeData,
    /// `None` for synthesized nodes.
    pub range: Option<TextRange>,
    pub parent: NodeIndex,
    pub slot: Option<ChildSlot>,
    /// Resolved binding: the declared entity for declarations and names, the
    /// invoked method for calls, the implemented method for lambdas.
    pub binding: Option<BindingId>,
    /// Resolved static type for expressions and type references.
    pub type_binding: Option<BindingId>,
}

impl Node {
    pub fn new(data: NodeData) -> Self {
        Self {
            data,
            range: None,
            parent: NodeIndex::NONE,
            slot: None,
            binding: None,
            type_binding: None,
        }
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    /// Start offset, or `None` for synthesized nodes.
    #[inline]
    pub fn start(&self) -> Option<u32> {
        self.range.map(|r| r.start)
    }

    #[inline]
    pub fn end(&self) -> Option<u32> {
        self.range.map(|r| r.end())
    }
}

/// Kind-specific payload.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeData {
    // ---------------------------------------------------------------- names
    SimpleName {
        identifier: String,
    },
    QualifiedName {
        qualifier: NodeIndex,
        name: NodeIndex,
    },

    // ------------------------------------------------------------- literals
    NumberLiteral {
        token: String,
    },
    StringLiteral {
        escaped: String,
    },
    CharacterLiteral {
        escaped: String,
    },
    BooleanLiteral {
        value: bool,
    },
    NullLiteral,
    TypeLiteral {
        ty: NodeIndex,
    },

    // ---------------------------------------------------------- expressions
    ThisExpression {
        qualifier: NodeIndex,
    },
    FieldAccess {
        expression: NodeIndex,
        name: NodeIndex,
    },
    SuperFieldAccess {
        qualifier: NodeIndex,
        name: NodeIndex,
    },
    MethodInvocation {
        expression: NodeIndex,
        type_arguments: NodeList,
        name: NodeIndex,
        arguments: NodeList,
    },
    SuperMethodInvocation {
        qualifier: NodeIndex,
        name: NodeIndex,
        arguments: NodeList,
    },
    ClassInstanceCreation {
        expression: NodeIndex,
        ty: NodeIndex,
        arguments: NodeList,
        body: NodeIndex,
    },
    ArrayAccess {
        array: NodeIndex,
        index: NodeIndex,
    },
    ArrayCreation {
        ty: NodeIndex,
        dimensions: NodeList,
        initializer: NodeIndex,
    },
    ArrayInitializer {
        expressions: NodeList,
    },
    Infix {
        operator: InfixOperator,
        left: NodeIndex,
        right: NodeIndex,
        extended_operands: NodeList,
    },
    Prefix {
        operator: PrefixOperator,
        operand: NodeIndex,
    },
    Postfix {
        operator: PostfixOperator,
        operand: NodeIndex,
    },
    Conditional {
        condition: NodeIndex,
        then_expression: NodeIndex,
        else_expression: NodeIndex,
    },
    Assignment {
        operator: AssignmentOperator,
        left: NodeIndex,
        right: NodeIndex,
    },
    Cast {
        ty: NodeIndex,
        expression: NodeIndex,
    },
    InstanceOf {
        expression: NodeIndex,
        ty: NodeIndex,
    },
    Parenthesized {
        expression: NodeIndex,
    },
    Lambda {
        parameters: NodeList,
        body: NodeIndex,
        parenthesized: bool,
    },
    MethodReference {
        expression: NodeIndex,
        name: NodeIndex,
    },
    VariableDeclarationExpression {
        modifiers: NodeList,
        ty: NodeIndex,
        fragments: NodeList,
    },

    // ----------------------------------------------------------- statements
    Block {
        statements: NodeList,
    },
    EmptyStatement,
    ExpressionStatement {
        expression: NodeIndex,
    },
    VariableDeclarationStatement {
        modifiers: NodeList,
        ty: NodeIndex,
        fragments: NodeList,
    },
    TypeDeclarationStatement {
        declaration: NodeIndex,
    },
    If {
        condition: NodeIndex,
        then_statement: NodeIndex,
        else_statement: NodeIndex,
    },
    While {
        condition: NodeIndex,
        body: NodeIndex,
    },
    Do {
        body: NodeIndex,
        condition: NodeIndex,
    },
    For {
        initializers: NodeList,
        condition: NodeIndex,
        updaters: NodeList,
        body: NodeIndex,
    },
    EnhancedFor {
        parameter: NodeIndex,
        expression: NodeIndex,
        body: NodeIndex,
    },
    Return {
        expression: NodeIndex,
    },
    Throw {
        expression: NodeIndex,
    },
    Break {
        label: NodeIndex,
    },
    Continue {
        label: NodeIndex,
    },
    Labeled {
        label: NodeIndex,
        body: NodeIndex,
    },
    Switch {
        expression: NodeIndex,
        statements: NodeList,
    },
    /// `case expr:`; `expression` is NONE for `default:`.
    SwitchCase {
        expression: NodeIndex,
    },
    Synchronized {
        expression: NodeIndex,
        body: NodeIndex,
    },
    Try {
        resources: NodeList,
        body: NodeIndex,
        catch_clauses: NodeList,
        finally: NodeIndex,
    },
    CatchClause {
        exception: NodeIndex,
        body: NodeIndex,
    },
    Assert {
        expression: NodeIndex,
        message: NodeIndex,
    },
    ConstructorInvocation {
        arguments: NodeList,
    },
    SuperConstructorInvocation {
        expression: NodeIndex,
        arguments: NodeList,
    },

    // --------------------------------------------------------- declarations
    CompilationUnit {
        package: NodeIndex,
        imports: NodeList,
        types: NodeList,
    },
    PackageDeclaration {
        name: NodeIndex,
    },
    ImportDeclaration {
        name: NodeIndex,
        is_static: bool,
        on_demand: bool,
    },
    TypeDeclaration {
        modifiers: NodeList,
        is_interface: bool,
        name: NodeIndex,
        type_parameters: NodeList,
        superclass: NodeIndex,
        interfaces: NodeList,
        body_declarations: NodeList,
    },
    EnumDeclaration {
        modifiers: NodeList,
        name: NodeIndex,
        interfaces: NodeList,
        constants: NodeList,
        body_declarations: NodeList,
    },
    EnumConstantDeclaration {
        modifiers: NodeList,
        name: NodeIndex,
        arguments: NodeList,
        body: NodeIndex,
    },
    AnonymousClassDeclaration {
        body_declarations: NodeList,
    },
    FieldDeclaration {
        modifiers: NodeList,
        ty: NodeIndex,
        fragments: NodeList,
    },
    MethodDeclaration {
        modifiers: NodeList,
        type_parameters: NodeList,
        return_type: NodeIndex,
        name: NodeIndex,
        parameters: NodeList,
        thrown: NodeList,
        body: NodeIndex,
        is_constructor: bool,
    },
    Initializer {
        modifiers: NodeList,
        body: NodeIndex,
    },
    SingleVariableDeclaration {
        modifiers: NodeList,
        ty: NodeIndex,
        varargs: bool,
        name: NodeIndex,
        extra_dimensions: u32,
        initializer: NodeIndex,
    },
    VariableDeclarationFragment {
        name: NodeIndex,
        extra_dimensions: u32,
        initializer: NodeIndex,
    },
    TypeParameter {
        name: NodeIndex,
        bounds: NodeList,
    },

    // ---------------------------------------------------------------- types
    PrimitiveType {
        code: PrimitiveTypeCode,
    },
    SimpleType {
        name: NodeIndex,
    },
    ArrayType {
        element: NodeIndex,
        dimensions: u32,
    },
    ParameterizedType {
        ty: NodeIndex,
        arguments: NodeList,
    },
    WildcardType {
        bound: NodeIndex,
        upper: bool,
    },

    // ------------------------------------------------------------ modifiers
    Modifier {
        keyword: ModifierKeyword,
    },
    MarkerAnnotation {
        type_name: NodeIndex,
    },

    // ------------------------------------------------------------- comments
    Comment {
        style: CommentStyle,
        text: String,
    },
}

/// Fieldless tag of a [`NodeData`] variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    SimpleName,
    QualifiedName,
    NumberLiteral,
    StringLiteral,
    CharacterLiteral,
    BooleanLiteral,
    NullLiteral,
    TypeLiteral,
    ThisExpression,
    FieldAccess,
    SuperFieldAccess,
    MethodInvocation,
    SuperMethodInvocation,
    ClassInstanceCreation,
    ArrayAccess,
    ArrayCreation,
    ArrayInitializer,
    Infix,
    Prefix,
    Postfix,
    Conditional,
    Assignment,
    Cast,
    InstanceOf,
    Parenthesized,
    Lambda,
    MethodReference,
    VariableDeclarationExpression,
    Block,
    EmptyStatement,
    ExpressionStatement,
    VariableDeclarationStatement,
    TypeDeclarationStatement,
    If,
    While,
    Do,
    For,
    EnhancedFor,
    Return,
    Throw,
    Break,
    Continue,
    Labeled,
    Switch,
    SwitchCase,
    Synchronized,
    Try,
    CatchClause,
    Assert,
    ConstructorInvocation,
    SuperConstructorInvocation,
    CompilationUnit,
    PackageDeclaration,
    ImportDeclaration,
    TypeDeclaration,
    EnumDeclaration,
    EnumConstantDeclaration,
    AnonymousClassDeclaration,
    FieldDeclaration,
    MethodDeclaration,
    Initializer,
    SingleVariableDeclaration,
    VariableDeclarationFragment,
    TypeParameter,
    PrimitiveType,
    SimpleType,
    ArrayType,
    ParameterizedType,
    WildcardType,
    Modifier,
    MarkerAnnotation,
    Comment,
}

impl NodeKind {
    pub const fn is_name(self) -> bool {
        matches!(self, Self::SimpleName | Self::QualifiedName)
    }

    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::NumberLiteral
                | Self::StringLiteral
                | Self::CharacterLiteral
                | Self::BooleanLiteral
                | Self::NullLiteral
                | Self::TypeLiteral
        )
    }

    pub const fn is_expression(self) -> bool {
        self.is_name()
            || self.is_literal()
            || matches!(
                self,
                Self::ThisExpression
                    | Self::FieldAccess
                    | Self::SuperFieldAccess
                    | Self::MethodInvocation
                    | Self::SuperMethodInvocation
                    | Self::ClassInstanceCreation
                    | Self::ArrayAccess
                    | Self::ArrayCreation
                    | Self::ArrayInitializer
                    | Self::Infix
                    | Self::Prefix
                    | Self::Postfix
                    | Self::Conditional
                    | Self::Assignment
                    | Self::Cast
                    | Self::InstanceOf
                    | Self::Parenthesized
                    | Self::Lambda
                    | Self::MethodReference
                    | Self::VariableDeclarationExpression
            )
    }

    pub const fn is_statement(self) -> bool {
        matches!(
            self,
            Self::Block
                | Self::EmptyStatement
                | Self::ExpressionStatement
                | Self::VariableDeclarationStatement
                | Self::TypeDeclarationStatement
                | Self::If
                | Self::While
                | Self::Do
                | Self::For
                | Self::EnhancedFor
                | Self::Return
                | Self::Throw
                | Self::Break
                | Self::Continue
                | Self::Labeled
                | Self::Switch
                | Self::SwitchCase
                | Self::Synchronized
                | Self::Try
                | Self::Assert
                | Self::ConstructorInvocation
                | Self::SuperConstructorInvocation
        )
    }

    /// Members of a type body.
    pub const fn is_body_declaration(self) -> bool {
        matches!(
            self,
            Self::TypeDeclaration
                | Self::EnumDeclaration
                | Self::EnumConstantDeclaration
                | Self::FieldDeclaration
                | Self::MethodDeclaration
                | Self::Initializer
        )
    }

    pub const fn is_type_declaration(self) -> bool {
        matches!(self, Self::TypeDeclaration | Self::EnumDeclaration)
    }

    /// Nodes that introduce a type body: named and anonymous classes.
    pub const fn is_type_body_owner(self) -> bool {
        matches!(
            self,
            Self::TypeDeclaration | Self::EnumDeclaration | Self::AnonymousClassDeclaration
        )
    }

    pub const fn is_type_reference(self) -> bool {
        matches!(
            self,
            Self::PrimitiveType
                | Self::SimpleType
                | Self::ArrayType
                | Self::ParameterizedType
                | Self::WildcardType
        )
    }

    pub const fn is_variable_declaration(self) -> bool {
        matches!(
            self,
            Self::SingleVariableDeclaration | Self::VariableDeclarationFragment
        )
    }

    pub const fn is_modifier(self) -> bool {
        matches!(self, Self::Modifier | Self::MarkerAnnotation)
    }
}

/// Named property of a parent node that holds a child.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChildSlot {
    QualifiedNameQualifier,
    QualifiedNameName,
    TypeLiteralType,
    ThisQualifier,
    FieldAccessExpression,
    FieldAccessName,
    SuperFieldAccessQualifier,
    SuperFieldAccessName,
    MethodInvocationExpression,
    MethodInvocationTypeArguments,
    MethodInvocationName,
    MethodInvocationArguments,
    SuperMethodInvocationQualifier,
    SuperMethodInvocationName,
    SuperMethodInvocationArguments,
    ClassInstanceCreationExpression,
    ClassInstanceCreationType,
    ClassInstanceCreationArguments,
    ClassInstanceCreationBody,
    ArrayAccessArray,
    ArrayAccessIndex,
    ArrayCreationType,
    ArrayCreationDimensions,
    ArrayCreationInitializer,
    ArrayInitializerExpressions,
    InfixLeftOperand,
    InfixRightOperand,
    InfixExtendedOperands,
    PrefixOperand,
    PostfixOperand,
    ConditionalExpression,
    ConditionalThenExpression,
    ConditionalElseExpression,
    AssignmentLeftHandSide,
    AssignmentRightHandSide,
    CastType,
    CastExpression,
    InstanceOfExpression,
    InstanceOfType,
    ParenthesizedExpression,
    LambdaParameters,
    LambdaBody,
    MethodReferenceExpression,
    MethodReferenceName,
    VariableDeclarationExpressionModifiers,
    VariableDeclarationExpressionType,
    VariableDeclarationExpressionFragments,
    BlockStatements,
    ExpressionStatementExpression,
    VariableDeclarationStatementModifiers,
    VariableDeclarationStatementType,
    VariableDeclarationStatementFragments,
    TypeDeclarationStatementDeclaration,
    IfExpression,
    IfThenStatement,
    IfElseStatement,
    WhileExpression,
    WhileBody,
    DoBody,
    DoExpression,
    ForInitializers,
    ForExpression,
    ForUpdaters,
    ForBody,
    EnhancedForParameter,
    EnhancedForExpression,
    EnhancedForBody,
    ReturnExpression,
    ThrowExpression,
    BreakLabel,
    ContinueLabel,
    LabeledLabel,
    LabeledBody,
    SwitchExpression,
    SwitchStatements,
    SwitchCaseExpression,
    SynchronizedExpression,
    SynchronizedBody,
    TryResources,
    TryBody,
    TryCatchClauses,
    TryFinally,
    CatchClauseException,
    CatchClauseBody,
    AssertExpression,
    AssertMessage,
    ConstructorInvocationArguments,
    SuperConstructorInvocationExpression,
    SuperConstructorInvocationArguments,
    CompilationUnitPackage,
    CompilationUnitImports,
    CompilationUnitTypes,
    PackageDeclarationName,
    ImportDeclarationName,
    TypeDeclarationModifiers,
    TypeDeclarationName,
    TypeDeclarationTypeParameters,
    TypeDeclarationSuperclass,
    TypeDeclarationInterfaces,
    TypeDeclarationBodyDeclarations,
    EnumDeclarationModifiers,
    EnumDeclarationName,
    EnumDeclarationInterfaces,
    EnumDeclarationConstants,
    EnumDeclarationBodyDeclarations,
    EnumConstantModifiers,
    EnumConstantName,
    EnumConstantArguments,
    EnumConstantBody,
    AnonymousClassBodyDeclarations,
    FieldDeclarationModifiers,
    FieldDeclarationType,
    FieldDeclarationFragments,
    MethodDeclarationModifiers,
    MethodDeclarationTypeParameters,
    MethodDeclarationReturnType,
    MethodDeclarationName,
    MethodDeclarationParameters,
    MethodDeclarationThrown,
    MethodDeclarationBody,
    InitializerModifiers,
    InitializerBody,
    SingleVariableDeclarationModifiers,
    SingleVariableDeclarationType,
    SingleVariableDeclarationName,
    SingleVariableDeclarationInitializer,
    FragmentName,
    FragmentInitializer,
    TypeParameterName,
    TypeParameterBounds,
    SimpleTypeName,
    ArrayTypeElement,
    ParameterizedTypeType,
    ParameterizedTypeArguments,
    WildcardTypeBound,
    MarkerAnnotationTypeName,
}

impl ChildSlot {
    /// True for ordered child-list properties.
    pub const fn is_list(self) -> bool {
        matches!(
            self,
            Self::MethodInvocationTypeArguments
                | Self::MethodInvocationArguments
                | Self::SuperMethodInvocationArguments
                | Self::ClassInstanceCreationArguments
                | Self::ArrayCreationDimensions
                | Self::ArrayInitializerExpressions
                | Self::InfixExtendedOperands
                | Self::LambdaParameters
                | Self::VariableDeclarationExpressionModifiers
                | Self::VariableDeclarationExpressionFragments
                | Self::BlockStatements
                | Self::VariableDeclarationStatementModifiers
                | Self::VariableDeclarationStatementFragments
                | Self::ForInitializers
                | Self::ForUpdaters
                | Self::SwitchStatements
                | Self::TryResources
                | Self::TryCatchClauses
                | Self::ConstructorInvocationArguments
                | Self::SuperConstructorInvocationArguments
                | Self::CompilationUnitImports
                | Self::CompilationUnitTypes
                | Self::TypeDeclarationModifiers
                | Self::TypeDeclarationTypeParameters
                | Self::TypeDeclarationInterfaces
                | Self::TypeDeclarationBodyDeclarations
                | Self::EnumDeclarationModifiers
                | Self::EnumDeclarationInterfaces
                | Self::EnumDeclarationConstants
                | Self::EnumDeclarationBodyDeclarations
                | Self::EnumConstantModifiers
                | Self::EnumConstantArguments
                | Self::AnonymousClassBodyDeclarations
                | Self::FieldDeclarationModifiers
                | Self::FieldDeclarationFragments
                | Self::MethodDeclarationModifiers
                | Self::MethodDeclarationTypeParameters
                | Self::MethodDeclarationParameters
                | Self::MethodDeclarationThrown
                | Self::InitializerModifiers
                | Self::SingleVariableDeclarationModifiers
                | Self::TypeParameterBounds
                | Self::ParameterizedTypeArguments
        )
    }

    /// Modifier-list properties of declarations.
    pub const fn is_modifier_list(self) -> bool {
        matches!(
            self,
            Self::VariableDeclarationExpressionModifiers
                | Self::VariableDeclarationStatementModifiers
                | Self::TypeDeclarationModifiers
                | Self::EnumDeclarationModifiers
                | Self::EnumConstantModifiers
                | Self::FieldDeclarationModifiers
                | Self::MethodDeclarationModifiers
                | Self::InitializerModifiers
                | Self::SingleVariableDeclarationModifiers
        )
    }

    /// Body positions of `if`/`for`/enhanced `for`/`while`/`do` that hold a
    /// single statement.
    pub const fn is_control_statement_body(self) -> bool {
        matches!(
            self,
            Self::IfThenStatement
                | Self::IfElseStatement
                | Self::ForBody
                | Self::EnhancedForBody
                | Self::WhileBody
                | Self::DoBody
        )
    }

    /// Slots whose list holds the members of a type body.
    pub const fn is_body_declarations(self) -> bool {
        matches!(
            self,
            Self::TypeDeclarationBodyDeclarations
                | Self::EnumDeclarationBodyDeclarations
                | Self::AnonymousClassBodyDeclarations
        )
    }
}

/// Content of a slot as seen through [`NodeData::slots`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SlotValue<'a> {
    /// Single-child property; `NodeIndex::NONE` when empty.
    Single(NodeIndex),
    List(&'a NodeList),
}

pub type Slots<'a> = SmallVec<[(ChildSlot, SlotValue<'a>); 8]>;

macro_rules! slots {
    ($($slot:ident => $kind:ident($value:expr)),* $(,)?) => {{
        let mut out: Slots<'_> = SmallVec::new();
        $(out.push((ChildSlot::$slot, SlotValue::$kind($value)));)*
        out
    }};
}

impl NodeData {
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::SimpleName { .. } => NodeKind::SimpleName,
            Self::QualifiedName { .. } => NodeKind::QualifiedName,
            Self::NumberLiteral { .. } => NodeKind::NumberLiteral,
            Self::StringLiteral { .. } => NodeKind::StringLiteral,
            Self::CharacterLiteral { .. } => NodeKind::CharacterLiteral,
            Self::BooleanLiteral { .. } => NodeKind::BooleanLiteral,
            Self::NullLiteral => NodeKind::NullLiteral,
            Self::TypeLiteral { .. } => NodeKind::TypeLiteral,
            Self::ThisExpression { .. } => NodeKind::ThisExpression,
            Self::FieldAccess { .. } => NodeKind::FieldAccess,
            Self::SuperFieldAccess { .. } => NodeKind::SuperFieldAccess,
            Self::MethodInvocation { .. } => NodeKind::MethodInvocation,
            Self::SuperMethodInvocation { .. } => NodeKind::SuperMethodInvocation,
            Self::ClassInstanceCreation { .. } => NodeKind::ClassInstanceCreation,
            Self::ArrayAccess { .. } => NodeKind::ArrayAccess,
            Self::ArrayCreation { .. } => NodeKind::ArrayCreation,
            Self::ArrayInitializer { .. } => NodeKind::ArrayInitializer,
            Self::Infix { .. } => NodeKind::Infix,
            Self::Prefix { .. } => NodeKind::Prefix,
            Self::Postfix { .. } => NodeKind::Postfix,
            Self::Conditional { .. } => NodeKind::Conditional,
            Self::Assignment { .. } => NodeKind::Assignment,
            Self::Cast { .. } => NodeKind::Cast,
            Self::InstanceOf { .. } => NodeKind::InstanceOf,
            Self::Parenthesized { .. } => NodeKind::Parenthesized,
            Self::Lambda { .. } => NodeKind::Lambda,
            Self::MethodReference { .. } => NodeKind::MethodReference,
            Self::VariableDeclarationExpression { .. } => NodeKind::VariableDeclarationExpression,
            Self::Block { .. } => NodeKind::Block,
            Self::EmptyStatement => NodeKind::EmptyStatement,
            Self::ExpressionStatement { .. } => NodeKind::ExpressionStatement,
            Self::VariableDeclarationStatement { .. } => NodeKind::VariableDeclarationStatement,
            Self::TypeDeclarationStatement { .. } => NodeKind::TypeDeclarationStatement,
            Self::If { .. } => NodeKind::If,
            Self::While { .. } => NodeKind::While,
            Self::Do { .. } => NodeKind::Do,
            Self::For { .. } => NodeKind::For,
            Self::EnhancedFor { .. } => NodeKind::EnhancedFor,
            Self::Return { .. } => NodeKind::Return,
            Self::Throw { .. } => NodeKind::Throw,
            Self::Break { .. } => NodeKind::Break,
            Self::Continue { .. } => NodeKind::Continue,
            Self::Labeled { .. } => NodeKind::Labeled,
            Self::Switch { .. } => NodeKind::Switch,
            Self::SwitchCase { .. } => NodeKind::SwitchCase,
            Self::Synchronized { .. } => NodeKind::Synchronized,
            Self::Try { .. } => NodeKind::Try,
            Self::CatchClause { .. } => NodeKind::CatchClause,
            Self::Assert { .. } => NodeKind::Assert,
            Self::ConstructorInvocation { .. } => NodeKind::ConstructorInvocation,
            Self::SuperConstructorInvocation { .. } => NodeKind::SuperConstructorInvocation,
            Self::CompilationUnit { .. } => NodeKind::CompilationUnit,
            Self::PackageDeclaration { .. } => NodeKind::PackageDeclaration,
            Self::ImportDeclaration { .. } => NodeKind::ImportDeclaration,
            Self::TypeDeclaration { .. } => NodeKind::TypeDeclaration,
            Self::EnumDeclaration { .. } => NodeKind::EnumDeclaration,
            Self::EnumConstantDeclaration { .. } => NodeKind::EnumConstantDeclaration,
            Self::AnonymousClassDeclaration { .. } => NodeKind::AnonymousClassDeclaration,
            Self::FieldDeclaration { .. } => NodeKind::FieldDeclaration,
            Self::MethodDeclaration { .. } => NodeKind::MethodDeclaration,
            Self::Initializer { .. } => NodeKind::Initializer,
            Self::SingleVariableDeclaration { .. } => NodeKind::SingleVariableDeclaration,
            Self::VariableDeclarationFragment { .. } => NodeKind::VariableDeclarationFragment,
            Self::TypeParameter { .. } => NodeKind::TypeParameter,
            Self::PrimitiveType { .. } => NodeKind::PrimitiveType,
            Self::SimpleType { .. } => NodeKind::SimpleType,
            Self::ArrayType { .. } => NodeKind::ArrayType,
            Self::ParameterizedType { .. } => NodeKind::ParameterizedType,
            Self::WildcardType { .. } => NodeKind::WildcardType,
            Self::Modifier { .. } => NodeKind::Modifier,
            Self::MarkerAnnotation { .. } => NodeKind::MarkerAnnotation,
            Self::Comment { .. } => NodeKind::Comment,
        }
    }

    /// Equality of everything but child indices: kind, operators, literal
    /// text and flags.
    pub fn same_attributes(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::SimpleName { identifier: a }, Self::SimpleName { identifier: b }) => a == b,
            (Self::NumberLiteral { token: a }, Self::NumberLiteral { token: b }) => a == b,
            (Self::StringLiteral { escaped: a }, Self::StringLiteral { escaped: b })
            | (Self::CharacterLiteral { escaped: a }, Self::CharacterLiteral { escaped: b }) => {
                a == b
            }
            (Self::BooleanLiteral { value: a }, Self::BooleanLiteral { value: b }) => a == b,
            (Self::Infix { operator: a, .. }, Self::Infix { operator: b, .. }) => a == b,
            (Self::Prefix { operator: a, .. }, Self::Prefix { operator: b, .. }) => a == b,
            (Self::Postfix { operator: a, .. }, Self::Postfix { operator: b, .. }) => a == b,
            (Self::Assignment { operator: a, .. }, Self::Assignment { operator: b, .. }) => a == b,
            (
                Self::Lambda { parenthesized: a, .. },
                Self::Lambda { parenthesized: b, .. },
            ) => a == b,
            (
                Self::ImportDeclaration { is_static: a_static, on_demand: a_demand, .. },
                Self::ImportDeclaration { is_static: b_static, on_demand: b_demand, .. },
            ) => a_static == b_static && a_demand == b_demand,
            (
                Self::TypeDeclaration { is_interface: a, .. },
                Self::TypeDeclaration { is_interface: b, .. },
            ) => a == b,
            (
                Self::MethodDeclaration { is_constructor: a, .. },
                Self::MethodDeclaration { is_constructor: b, .. },
            ) => a == b,
            (
                Self::SingleVariableDeclaration { varargs: a_varargs, extra_dimensions: a_dims, .. },
                Self::SingleVariableDeclaration { varargs: b_varargs, extra_dimensions: b_dims, .. },
            ) => a_varargs == b_varargs && a_dims == b_dims,
            (
                Self::VariableDeclarationFragment { extra_dimensions: a, .. },
                Self::VariableDeclarationFragment { extra_dimensions: b, .. },
            ) => a == b,
            (Self::PrimitiveType { code: a }, Self::PrimitiveType { code: b }) => a == b,
            (Self::ArrayType { dimensions: a, .. }, Self::ArrayType { dimensions: b, .. }) => a == b,
            (Self::WildcardType { upper: a, .. }, Self::WildcardType { upper: b, .. }) => a == b,
            (Self::Modifier { keyword: a }, Self::Modifier { keyword: b }) => a == b,
            (
                Self::Comment { style: a_style, text: a_text },
                Self::Comment { style: b_style, text: b_text },
            ) => a_style == b_style && a_text == b_text,
            _ => self.kind() == other.kind(),
        }
    }

    /// All child slots of this node in source order.
    ///
    /// Empty single-child slots are reported as `SlotValue::Single(NONE)`.
    pub fn slots(&self) -> Slots<'_> {
        match self {
            Self::SimpleName { .. }
            | Self::NumberLiteral { .. }
            | Self::StringLiteral { .. }
            | Self::CharacterLiteral { .. }
            | Self::BooleanLiteral { .. }
            | Self::NullLiteral
            | Self::EmptyStatement
            | Self::PrimitiveType { .. }
            | Self::Modifier { .. }
            | Self::Comment { .. } => SmallVec::new(),
            Self::QualifiedName { qualifier, name } => slots![
                QualifiedNameQualifier => Single(*qualifier),
                QualifiedNameName => Single(*name),
            ],
            Self::TypeLiteral { ty } => slots![TypeLiteralType => Single(*ty)],
            Self::ThisExpression { qualifier } => slots![ThisQualifier => Single(*qualifier)],
            Self::FieldAccess { expression, name } => slots![
                FieldAccessExpression => Single(*expression),
                FieldAccessName => Single(*name),
            ],
            Self::SuperFieldAccess { qualifier, name } => slots![
                SuperFieldAccessQualifier => Single(*qualifier),
                SuperFieldAccessName => Single(*name),
            ],
            Self::MethodInvocation {
                expression,
                type_arguments,
                name,
                arguments,
            } => slots![
                MethodInvocationExpression => Single(*expression),
                MethodInvocationTypeArguments => List(type_arguments),
                MethodInvocationName => Single(*name),
                MethodInvocationArguments => List(arguments),
            ],
            Self::SuperMethodInvocation {
                qualifier,
                name,
                arguments,
            } => slots![
                SuperMethodInvocationQualifier => Single(*qualifier),
                SuperMethodInvocationName => Single(*name),
                SuperMethodInvocationArguments => List(arguments),
            ],
            Self::ClassInstanceCreation {
                expression,
                ty,
                arguments,
                body,
            } => slots![
                ClassInstanceCreationExpression => Single(*expression),
                ClassInstanceCreationType => Single(*ty),
                ClassInstanceCreationArguments => List(arguments),
                ClassInstanceCreationBody => Single(*body),
            ],
            Self::ArrayAccess { array, index } => slots![
                ArrayAccessArray => Single(*array),
                ArrayAccessIndex => Single(*index),
            ],
            Self::ArrayCreation {
                ty,
                dimensions,
                initializer,
            } => slots![
                ArrayCreationType => Single(*ty),
                ArrayCreationDimensions => List(dimensions),
                ArrayCreationInitializer => Single(*initializer),
            ],
            Self::ArrayInitializer { expressions } => {
                slots![ArrayInitializerExpressions => List(expressions)]
            }
            Self::Infix {
                left,
                right,
                extended_operands,
                ..
            } => slots![
                InfixLeftOperand => Single(*left),
                InfixRightOperand => Single(*right),
                InfixExtendedOperands => List(extended_operands),
            ],
            Self::Prefix { operand, .. } => slots![PrefixOperand => Single(*operand)],
            Self::Postfix { operand, .. } => slots![PostfixOperand => Single(*operand)],
            Self::Conditional {
                condition,
                then_expression,
                else_expression,
            } => slots![
                ConditionalExpression => Single(*condition),
                ConditionalThenExpression => Single(*then_expression),
                ConditionalElseExpression => Single(*else_expression),
            ],
            Self::Assignment { left, right, .. } => slots![
                AssignmentLeftHandSide => Single(*left),
                AssignmentRightHandSide => Single(*right),
            ],
            Self::Cast { ty, expression } => slots![
                CastType => Single(*ty),
                CastExpression => Single(*expression),
            ],
            Self::InstanceOf { expression, ty } => slots![
                InstanceOfExpression => Single(*expression),
                InstanceOfType => Single(*ty),
            ],
            Self::Parenthesized { expression } => {
                slots![ParenthesizedExpression => Single(*expression)]
            }
            Self::Lambda {
                parameters, body, ..
            } => slots![
                LambdaParameters => List(parameters),
                LambdaBody => Single(*body),
            ],
            Self::MethodReference { expression, name } => slots![
                MethodReferenceExpression => Single(*expression),
                MethodReferenceName => Single(*name),
            ],
            Self::VariableDeclarationExpression {
                modifiers,
                ty,
                fragments,
            } => slots![
                VariableDeclarationExpressionModifiers => List(modifiers),
                VariableDeclarationExpressionType => Single(*ty),
                VariableDeclarationExpressionFragments => List(fragments),
            ],
            Self::Block { statements } => slots![BlockStatements => List(statements)],
            Self::ExpressionStatement { expression } => {
                slots![ExpressionStatementExpression => Single(*expression)]
            }
            Self::VariableDeclarationStatement {
                modifiers,
                ty,
                fragments,
            } => slots![
                VariableDeclarationStatementModifiers => List(modifiers),
                VariableDeclarationStatementType => Single(*ty),
                VariableDeclarationStatementFragments => List(fragments),
            ],
            Self::TypeDeclarationStatement { declaration } => {
                slots![TypeDeclarationStatementDeclaration => Single(*declaration)]
            }
            Self::If {
                condition,
                then_statement,
                else_statement,
            } => slots![
                IfExpression => Single(*condition),
                IfThenStatement => Single(*then_statement),
                IfElseStatement => Single(*else_statement),
            ],
            Self::While { condition, body } => slots![
                WhileExpression => Single(*condition),
                WhileBody => Single(*body),
            ],
            Self::Do { body, condition } => slots![
                DoBody => Single(*body),
                DoExpression => Single(*condition),
            ],
            Self::For {
                initializers,
                condition,
                updaters,
                body,
            } => slots![
                ForInitializers => List(initializers),
                ForExpression => Single(*condition),
                ForUpdaters => List(updaters),
                ForBody => Single(*body),
            ],
            Self::EnhancedFor {
                parameter,
                expression,
                body,
            } => slots![
                EnhancedForParameter => Single(*parameter),
                EnhancedForExpression => Single(*expression),
                EnhancedForBody => Single(*body),
            ],
            Self::Return { expression } => slots![ReturnExpression => Single(*expression)],
            Self::Throw { expression } => slots![ThrowExpression => Single(*expression)],
            Self::Break { label } => slots![BreakLabel => Single(*label)],
            Self::Continue { label } => slots![ContinueLabel => Single(*label)],
            Self::Labeled { label, body } => slots![
                LabeledLabel => Single(*label),
                LabeledBody => Single(*body),
            ],
            Self::Switch {
                expression,
                statements,
            } => slots![
                SwitchExpression => Single(*expression),
                SwitchStatements => List(statements),
            ],
            Self::SwitchCase { expression } => {
                slots![SwitchCaseExpression => Single(*expression)]
            }
            Self::Synchronized { expression, body } => slots![
                SynchronizedExpression => Single(*expression),
                SynchronizedBody => Single(*body),
            ],
            Self::Try {
                resources,
                body,
                catch_clauses,
                finally,
            } => slots![
                TryResources => List(resources),
                TryBody => Single(*body),
                TryCatchClauses => List(catch_clauses),
                TryFinally => Single(*finally),
            ],
            Self::CatchClause { exception, body } => slots![
                CatchClauseException => Single(*exception),
                CatchClauseBody => Single(*body),
            ],
            Self::Assert {
                expression,
                message,
            } => slots![
                AssertExpression => Single(*expression),
                AssertMessage => Single(*message),
            ],
            Self::ConstructorInvocation { arguments } => {
                slots![ConstructorInvocationArguments => List(arguments)]
            }
            Self::SuperConstructorInvocation {
                expression,
                arguments,
            } => slots![
                SuperConstructorInvocationExpression => Single(*expression),
                SuperConstructorInvocationArguments => List(arguments),
            ],
            Self::CompilationUnit {
                package,
                imports,
                types,
            } => slots![
                CompilationUnitPackage => Single(*package),
                CompilationUnitImports => List(imports),
                CompilationUnitTypes => List(types),
            ],
            Self::PackageDeclaration { name } => slots![PackageDeclarationName => Single(*name)],
            Self::ImportDeclaration { name, .. } => {
                slots![ImportDeclarationName => Single(*name)]
            }
            Self::TypeDeclaration {
                modifiers,
                name,
                type_parameters,
                superclass,
                interfaces,
                body_declarations,
                ..
            } => slots![
                TypeDeclarationModifiers => List(modifiers),
                TypeDeclarationName => Single(*name),
                TypeDeclarationTypeParameters => List(type_parameters),
                TypeDeclarationSuperclass => Single(*superclass),
                TypeDeclarationInterfaces => List(interfaces),
                TypeDeclarationBodyDeclarations => List(body_declarations),
            ],
            Self::EnumDeclaration {
                modifiers,
                name,
                interfaces,
                constants,
                body_declarations,
            } => slots![
                EnumDeclarationModifiers => List(modifiers),
                EnumDeclarationName => Single(*name),
                EnumDeclarationInterfaces => List(interfaces),
                EnumDeclarationConstants => List(constants),
                EnumDeclarationBodyDeclarations => List(body_declarations),
            ],
            Self::EnumConstantDeclaration {
                modifiers,
                name,
                arguments,
                body,
            } => slots![
                EnumConstantModifiers => List(modifiers),
                EnumConstantName => Single(*name),
                EnumConstantArguments => List(arguments),
                EnumConstantBody => Single(*body),
            ],
            Self::AnonymousClassDeclaration { body_declarations } => {
                slots![AnonymousClassBodyDeclarations => List(body_declarations)]
            }
            Self::FieldDeclaration {
                modifiers,
                ty,
                fragments,
            } => slots![
                FieldDeclarationModifiers => List(modifiers),
                FieldDeclarationType => Single(*ty),
                FieldDeclarationFragments => List(fragments),
            ],
            Self::MethodDeclaration {
                modifiers,
                type_parameters,
                return_type,
                name,
                parameters,
                thrown,
                body,
                ..
            } => slots![
                MethodDeclarationModifiers => List(modifiers),
                MethodDeclarationTypeParameters => List(type_parameters),
                MethodDeclarationReturnType => Single(*return_type),
                MethodDeclarationName => Single(*name),
                MethodDeclarationParameters => List(parameters),
                MethodDeclarationThrown => List(thrown),
                MethodDeclarationBody => Single(*body),
            ],
            Self::Initializer { modifiers, body } => slots![
                InitializerModifiers => List(modifiers),
                InitializerBody => Single(*body),
            ],
            Self::SingleVariableDeclaration {
                modifiers,
                ty,
                name,
                initializer,
                ..
            } => slots![
                SingleVariableDeclarationModifiers => List(modifiers),
                SingleVariableDeclarationType => Single(*ty),
                SingleVariableDeclarationName => Single(*name),
                SingleVariableDeclarationInitializer => Single(*initializer),
            ],
            Self::VariableDeclarationFragment {
                name, initializer, ..
            } => slots![
                FragmentName => Single(*name),
                FragmentInitializer => Single(*initializer),
            ],
            Self::TypeParameter { name, bounds } => slots![
                TypeParameterName => Single(*name),
                TypeParameterBounds => List(bounds),
            ],
            Self::SimpleType { name } => slots![SimpleTypeName => Single(*name)],
            Self::ArrayType { element, .. } => slots![ArrayTypeElement => Single(*element)],
            Self::ParameterizedType { ty, arguments } => slots![
                ParameterizedTypeType => Single(*ty),
                ParameterizedTypeArguments => List(arguments),
            ],
            Self::WildcardType { bound, .. } => slots![WildcardTypeBound => Single(*bound)],
            Self::MarkerAnnotation { type_name } => {
                slots![MarkerAnnotationTypeName => Single(*type_name)]
            }
        }
    }

    /// Visit every present child index mutably, in source order.
    ///
    /// Used to remap children when a subtree is copied between arenas.
    pub fn for_each_child_mut(&mut self, f: &mut impl FnMut(&mut NodeIndex)) {
        fn one(idx: &mut NodeIndex, f: &mut impl FnMut(&mut NodeIndex)) {
            if idx.is_some() {
                f(idx);
            }
        }
        fn many(list: &mut NodeList, f: &mut impl FnMut(&mut NodeIndex)) {
            for idx in list.nodes.iter_mut() {
                f(idx);
            }
        }

        match self {
            Self::SimpleName { .. }
            | Self::NumberLiteral { .. }
            | Self::StringLiteral { .. }
            | Self::CharacterLiteral { .. }
            | Self::BooleanLiteral { .. }
            | Self::NullLiteral
            | Self::EmptyStatement
            | Self::PrimitiveType { .. }
            | Self::Modifier { .. }
            | Self::Comment { .. } => {}
            Self::QualifiedName { qualifier, name } => {
                one(qualifier, f);
                one(name, f);
            }
            Self::TypeLiteral { ty } => one(ty, f),
            Self::ThisExpression { qualifier } => one(qualifier, f),
            Self::FieldAccess { expression, name } => {
                one(expression, f);
                one(name, f);
            }
            Self::SuperFieldAccess { qualifier, name } => {
                one(qualifier, f);
                one(name, f);
            }
            Self::MethodInvocation {
                expression,
                type_arguments,
                name,
                arguments,
            } => {
                one(expression, f);
                many(type_arguments, f);
                one(name, f);
                many(arguments, f);
            }
            Self::SuperMethodInvocation {
                qualifier,
                name,
                arguments,
            } => {
                one(qualifier, f);
                one(name, f);
                many(arguments, f);
            }
            Self::ClassInstanceCreation {
                expression,
                ty,
                arguments,
                body,
            } => {
                one(expression, f);
                one(ty, f);
                many(arguments, f);
                one(body, f);
            }
            Self::ArrayAccess { array, index } => {
                one(array, f);
                one(index, f);
            }
            Self::ArrayCreation {
                ty,
                dimensions,
                initializer,
            } => {
                one(ty, f);
                many(dimensions, f);
                one(initializer, f);
            }
            Self::ArrayInitializer { expressions } => many(expressions, f),
            Self::Infix {
                left,
                right,
                extended_operands,
                ..
            } => {
                one(left, f);
                one(right, f);
                many(extended_operands, f);
            }
            Self::Prefix { operand, .. } | Self::Postfix { operand, .. } => one(operand, f),
            Self::Conditional {
                condition,
                then_expression,
                else_expression,
            } => {
                one(condition, f);
                one(then_expression, f);
                one(else_expression, f);
            }
            Self::Assignment { left, right, .. } => {
                one(left, f);
                one(right, f);
            }
            Self::Cast { ty, expression } => {
                one(ty, f);
                one(expression, f);
            }
            Self::InstanceOf { expression, ty } => {
                one(expression, f);
                one(ty, f);
            }
            Self::Parenthesized { expression } => one(expression, f),
            Self::Lambda {
                parameters, body, ..
            } => {
                many(parameters, f);
                one(body, f);
            }
            Self::MethodReference { expression, name } => {
                one(expression, f);
                one(name, f);
            }
            Self::VariableDeclarationExpression {
                modifiers,
                ty,
                fragments,
            }
            | Self::VariableDeclarationStatement {
                modifiers,
                ty,
                fragments,
            }
            | Self::FieldDeclaration {
                modifiers,
                ty,
                fragments,
            } => {
                many(modifiers, f);
                one(ty, f);
                many(fragments, f);
            }
            Self::Block { statements } => many(statements, f),
            Self::ExpressionStatement { expression } => one(expression, f),
            Self::TypeDeclarationStatement { declaration } => one(declaration, f),
            Self::If {
                condition,
                then_statement,
                else_statement,
            } => {
                one(condition, f);
                one(then_statement, f);
                one(else_statement, f);
            }
            Self::While { condition, body } => {
                one(condition, f);
                one(body, f);
            }
            Self::Do { body, condition } => {
                one(body, f);
                one(condition, f);
            }
            Self::For {
                initializers,
                condition,
                updaters,
                body,
            } => {
                many(initializers, f);
                one(condition, f);
                many(updaters, f);
                one(body, f);
            }
            Self::EnhancedFor {
                parameter,
                expression,
                body,
            } => {
                one(parameter, f);
                one(expression, f);
                one(body, f);
            }
            Self::Return { expression } | Self::Throw { expression } => one(expression, f),
            Self::Break { label } | Self::Continue { label } => one(label, f),
            Self::Labeled { label, body } => {
                one(label, f);
                one(body, f);
            }
            Self::Switch {
                expression,
                statements,
            } => {
                one(expression, f);
                many(statements, f);
            }
            Self::SwitchCase { expression } => one(expression, f),
            Self::Synchronized { expression, body } => {
                one(expression, f);
                one(body, f);
            }
            Self::Try {
                resources,
                body,
                catch_clauses,
                finally,
            } => {
                many(resources, f);
                one(body, f);
                many(catch_clauses, f);
                one(finally, f);
            }
            Self::CatchClause { exception, body } => {
                one(exception, f);
                one(body, f);
            }
            Self::Assert {
                expression,
                message,
            } => {
                one(expression, f);
                one(message, f);
            }
            Self::ConstructorInvocation { arguments } => many(arguments, f),
            Self::SuperConstructorInvocation {
                expression,
                arguments,
            } => {
                one(expression, f);
                many(arguments, f);
            }
            Self::CompilationUnit {
                package,
                imports,
                types,
            } => {
                one(package, f);
                many(imports, f);
                many(types, f);
            }
            Self::PackageDeclaration { name } | Self::ImportDeclaration { name, .. } => {
                one(name, f)
            }
            Self::TypeDeclaration {
                modifiers,
                name,
                type_parameters,
                superclass,
                interfaces,
                body_declarations,
                ..
            } => {
                many(modifiers, f);
                one(name, f);
                many(type_parameters, f);
                one(superclass, f);
                many(interfaces, f);
                many(body_declarations, f);
            }
            Self::EnumDeclaration {
                modifiers,
                name,
                interfaces,
                constants,
                body_declarations,
            } => {
                many(modifiers, f);
                one(name, f);
                many(interfaces, f);
                many(constants, f);
                many(body_declarations, f);
            }
            Self::EnumConstantDeclaration {
                modifiers,
                name,
                arguments,
                body,
            } => {
                many(modifiers, f);
                one(name, f);
                many(arguments, f);
                one(body, f);
            }
            Self::AnonymousClassDeclaration { body_declarations } => many(body_declarations, f),
            Self::MethodDeclaration {
                modifiers,
                type_parameters,
                return_type,
                name,
                parameters,
                thrown,
                body,
                ..
            } => {
                many(modifiers, f);
                many(type_parameters, f);
                one(return_type, f);
                one(name, f);
                many(parameters, f);
                many(thrown, f);
                one(body, f);
            }
            Self::Initializer { modifiers, body } => {
                many(modifiers, f);
                one(body, f);
            }
            Self::SingleVariableDeclaration {
                modifiers,
                ty,
                name,
                initializer,
                ..
            } => {
                many(modifiers, f);
                one(ty, f);
                one(name, f);
                one(initializer, f);
            }
            Self::VariableDeclarationFragment {
                name, initializer, ..
            } => {
                one(name, f);
                one(initializer, f);
            }
            Self::TypeParameter { name, bounds } => {
                one(name, f);
                many(bounds, f);
            }
            Self::SimpleType { name } => one(name, f),
            Self::ArrayType { element, .. } => one(element, f),
            Self::ParameterizedType { ty, arguments } => {
                one(ty, f);
                many(arguments, f);
            }
            Self::WildcardType { bound, .. } => one(bound, f),
            Self::MarkerAnnotation { type_name } => one(type_name, f),
        }
    }

    /// Present children paired with their slot, in source order.
    pub fn child_entries(&self) -> Vec<(ChildSlot, NodeIndex)> {
        let mut out = Vec::new();
        for (slot, value) in self.slots() {
            match value {
                SlotValue::Single(child) => {
                    if child.is_some() {
                        out.push((slot, child));
                    }
                }
                SlotValue::List(list) => out.extend(list.iter().map(|child| (slot, child))),
            }
        }
        out
    }

    /// Content of `slot` if this node kind has it.
    pub fn slot_value(&self, slot: ChildSlot) -> Option<SlotValue<'_>> {
        self.slots()
            .into_iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, value)| value)
    }

    /// The modifier list of a declaration kind, if it has one.
    pub fn modifier_slot(&self) -> Option<ChildSlot> {
        self.slots()
            .iter()
            .map(|(slot, _)| *slot)
            .find(|slot| slot.is_modifier_list())
    }
}
