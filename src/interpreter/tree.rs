use super::SystemContext;
use crate::environment::Environment;
use crate::lexer::Span;
use crate::parser::{
    expression::{Expression, ExpressionAtomKind, ExpressionNode, ExpressionNodeRef},
    statement::{ExpressionStatement, LetStatement, PrintStatement, Statement, WhileStatement},
    Program,
};
use crate::value::{
    error::{RuntimeError, RuntimeErrorKind},
    Value,
};

const NODE_MSG: &str = "Node ref came from the tree so it must exist.";

pub struct TreeWalkInterpreter<C: SystemContext> {
    environment: Environment,
    context: C,
}

impl<C> TreeWalkInterpreter<C>
where
    C: SystemContext,
{
    pub fn new(context: C) -> Self {
        Self {
            environment: Environment::new(),
            context,
        }
    }

    /// Runs every top-level statement in order, stopping at the first runtime error.
    pub fn execute(&mut self, program: &Program) -> Result<(), RuntimeError> {
        for stmt in program.iter() {
            self.interpret_statement(stmt)?;
        }
        tracing::debug!(bindings = self.environment.len(), "program finished");
        Ok(())
    }

    pub fn run(mut self, program: &Program) -> Result<C, RuntimeError> {
        self.execute(program)?;
        Ok(self.context)
    }

    pub fn get_environment(&self) -> &Environment {
        &self.environment
    }

    pub fn get_context(&self) -> &C {
        &self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }
}

// Statement interpreter
impl<C> TreeWalkInterpreter<C>
where
    C: SystemContext,
{
    fn interpret_statement(&mut self, statement: &Statement) -> Result<(), RuntimeError> {
        match statement {
            Statement::Let(stmt) => self.interpret_let_statement(stmt),
            Statement::Print(stmt) => self.interpret_print_statement(stmt),
            Statement::While(stmt) => self.interpret_while_statement(stmt),
            Statement::Expression(stmt) => self.interpret_expression_statement(stmt),
        }
    }

    fn interpret_let_statement(&mut self, stmt: &LetStatement) -> Result<(), RuntimeError> {
        let value = self.evaluate(&stmt.value)?;
        tracing::trace!(name = %stmt.name, %value, "bind");
        self.environment.declare(&stmt.name.name, value);
        Ok(())
    }

    fn interpret_print_statement(&mut self, stmt: &PrintStatement) -> Result<(), RuntimeError> {
        let value = self.evaluate(&stmt.expr)?;
        self.context.writeln(&value.to_string());
        Ok(())
    }

    fn interpret_while_statement(&mut self, stmt: &WhileStatement) -> Result<(), RuntimeError> {
        while self.evaluate(&stmt.condition)?.is_truthy() {
            for inner in stmt.body.iter() {
                self.interpret_statement(inner)?;
            }
        }
        Ok(())
    }

    fn interpret_expression_statement(
        &mut self,
        stmt: &ExpressionStatement,
    ) -> Result<(), RuntimeError> {
        self.evaluate(&stmt.expr)?;
        Ok(())
    }
}

// Expression evaluator
impl<C> TreeWalkInterpreter<C>
where
    C: SystemContext,
{
    pub fn evaluate(&mut self, expr: &Expression) -> Result<Value, RuntimeError> {
        self.evaluate_expression_node(expr, expr.get_root_ref())
    }

    fn evaluate_expression_node(
        &mut self,
        expr: &Expression,
        node: ExpressionNodeRef,
    ) -> Result<Value, RuntimeError> {
        let current_node = expr.get_node(node).expect(NODE_MSG);
        let span = expr.get_node_span(node).expect(NODE_MSG);

        match current_node {
            ExpressionNode::Atom(atom) => match &atom.kind {
                ExpressionAtomKind::Number(v) => Ok(Value::Integer(*v)),
                ExpressionAtomKind::StringLiteral(v) => Ok(Value::Text(v.clone())),
                ExpressionAtomKind::Identifier(ident) => self
                    .environment
                    .access(&ident.name)
                    .cloned()
                    .ok_or_else(|| RuntimeError {
                        kind: RuntimeErrorKind::UndefinedVariable(ident.name.clone()),
                        span: ident.span,
                    }),
            },
            ExpressionNode::Infix { operator, lhs, rhs } => {
                let lhs = self.evaluate_expression_node(expr, *lhs)?;
                let rhs = self.evaluate_expression_node(expr, *rhs)?;
                lhs.apply(*operator, &rhs)
                    .map_err(|kind| RuntimeError { kind, span })
            }
            ExpressionNode::Call {
                callee,
                builtin,
                arguments,
            } => {
                let Some(builtin) = builtin else {
                    return Err(RuntimeError {
                        kind: RuntimeErrorKind::UnknownFunction(callee.name.clone()),
                        span: callee.span,
                    });
                };
                if arguments.len() != builtin.arity() {
                    return Err(RuntimeError {
                        kind: RuntimeErrorKind::InvalidArgumentCount {
                            builtin: *builtin,
                            actual: arguments.len(),
                            expected: builtin.arity(),
                        },
                        span,
                    });
                }

                let values = arguments
                    .iter()
                    .map(|argument| self.evaluate_expression_node(expr, *argument))
                    .collect::<Result<Vec<_>, _>>()?;
                tracing::trace!(%builtin, arguments = values.len(), "call");
                builtin
                    .call(&values, &mut self.context)
                    .map_err(|kind| Self::argument_error(kind, expr, arguments, span))
            }
        }
    }

    /// Narrows an argument error down to the offending argument's span.
    fn argument_error(
        kind: RuntimeErrorKind,
        expr: &Expression,
        arguments: &[ExpressionNodeRef],
        call_span: Span,
    ) -> RuntimeError {
        let span = match kind {
            RuntimeErrorKind::InvalidArgument { position, .. } => arguments
                .get(position - 1)
                .and_then(|argument| expr.get_node_span(*argument))
                .unwrap_or(call_span),
            _ => call_span,
        };
        RuntimeError { kind, span }
    }
}
