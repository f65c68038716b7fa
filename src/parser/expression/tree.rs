use compact_str::CompactString;

use super::InfixOperator;
use crate::{builtin::Builtin, lexer::Span, string::Ident};

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionAtomKind {
    Number(i64),
    StringLiteral(CompactString),
    Identifier(Ident),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionAtom {
    pub kind: ExpressionAtomKind,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpressionNodeRef(u32);

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionNode {
    Atom(ExpressionAtom),
    Infix {
        operator: InfixOperator,
        lhs: ExpressionNodeRef,
        rhs: ExpressionNodeRef,
    },
    Call {
        callee: Ident,
        /// `None` when the name is not a builtin; calling it fails at run time.
        builtin: Option<Builtin>,
        arguments: Vec<ExpressionNodeRef>,
    },
}

/// Expression arena under construction. Nodes can only refer to nodes pushed before them.
#[derive(Debug, Clone, Default)]
pub struct IncompleteExpression {
    nodes: Vec<ExpressionNode>,
    spans: Vec<Span>,
    /// Height of the subtree rooted at each node, counting the node itself.
    depths: Vec<u32>,
}

impl IncompleteExpression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: ExpressionNode, span: Span) -> ExpressionNodeRef {
        let child_depth = match &node {
            ExpressionNode::Atom(_) => 0,
            ExpressionNode::Infix { lhs, rhs, .. } => {
                self.depth_of(*lhs).max(self.depth_of(*rhs))
            }
            ExpressionNode::Call { arguments, .. } => arguments
                .iter()
                .map(|argument| self.depth_of(*argument))
                .max()
                .unwrap_or(0),
        };
        self.nodes.push(node);
        self.spans.push(span);
        self.depths.push(child_depth + 1);
        ExpressionNodeRef(self.nodes.len() as u32 - 1)
    }

    pub fn get_span(&self, node: ExpressionNodeRef) -> Option<Span> {
        self.spans.get(node.0 as usize).copied()
    }

    pub fn get_depth(&self, node: ExpressionNodeRef) -> Option<u32> {
        self.depths.get(node.0 as usize).copied()
    }

    fn depth_of(&self, node: ExpressionNodeRef) -> u32 {
        self.get_depth(node).unwrap_or(0)
    }

    pub fn finish(self, root: ExpressionNodeRef) -> Option<Expression> {
        if !(0..self.nodes.len()).contains(&(root.0 as usize)) {
            None
        } else {
            Some(Expression {
                nodes: self.nodes,
                spans: self.spans,
                root,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    nodes: Vec<ExpressionNode>,
    spans: Vec<Span>,
    root: ExpressionNodeRef,
}

impl Expression {
    pub fn get_root_ref(&self) -> ExpressionNodeRef {
        self.root
    }

    pub fn get_root(&self) -> &ExpressionNode {
        self.get_node(self.root)
            .expect("The root exists within the tree.")
    }

    pub fn get_node(&self, node: ExpressionNodeRef) -> Option<&ExpressionNode> {
        self.nodes.get(node.0 as usize)
    }

    pub fn get_node_span(&self, node: ExpressionNodeRef) -> Option<Span> {
        self.spans.get(node.0 as usize).copied()
    }

    /// Span of the whole expression.
    pub fn get_span(&self) -> Span {
        self.get_node_span(self.root)
            .expect("The root exists within the tree.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(tree: &mut IncompleteExpression, value: i64) -> ExpressionNodeRef {
        let span = Span::new(0.into(), 1.into());
        tree.push(
            ExpressionNode::Atom(ExpressionAtom {
                kind: ExpressionAtomKind::Number(value),
                span,
            }),
            span,
        )
    }

    #[test]
    fn depth_counts_the_longest_path() {
        let span = Span::new(0.into(), 1.into());
        let mut tree = IncompleteExpression::new();
        let one = atom(&mut tree, 1);
        let two = atom(&mut tree, 2);
        let sum = tree.push(
            ExpressionNode::Infix {
                operator: InfixOperator::Add,
                lhs: one,
                rhs: two,
            },
            span,
        );
        let three = atom(&mut tree, 3);
        let product = tree.push(
            ExpressionNode::Infix {
                operator: InfixOperator::Multiply,
                lhs: three,
                rhs: sum,
            },
            span,
        );
        assert_eq!(tree.get_depth(one), Some(1));
        assert_eq!(tree.get_depth(sum), Some(2));
        assert_eq!(tree.get_depth(product), Some(3));
    }
}
