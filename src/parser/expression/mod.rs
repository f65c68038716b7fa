mod operator;
mod tree;

pub use operator::{InfixOperator, Precedence};
pub use tree::{
    Expression, ExpressionAtom, ExpressionAtomKind, ExpressionNode, ExpressionNodeRef,
    IncompleteExpression,
};
