pub mod error;
pub mod expression;
pub mod formatter;
pub mod statement;

use crate::{
    builtin::Builtin,
    lexer::{Span, Token, TokenKind},
    string::Ident,
};
pub use error::{ParserError, ParserErrorKind};
use expression::{
    Expression, ExpressionAtom, ExpressionAtomKind, ExpressionNode, ExpressionNodeRef,
    IncompleteExpression, InfixOperator, Precedence,
};
use statement::{ExpressionStatement, LetStatement, PrintStatement, Statement, WhileStatement};

/// Deepest allowed stack of brackets, call argument lists and `while` bodies.
const MAX_NESTING_DEPTH: usize = 256;
/// Tallest allowed expression tree, counted in nodes from root to leaf.
const MAX_EXPRESSION_DEPTH: u32 = 1024;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    pub fn get_statement(&self, index: usize) -> Option<&Statement> {
        self.statements.get(index)
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl Parser {
    /// Creates a parser over a lexed token stream. A missing trailing `Eof` is supplied.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(Token { kind: TokenKind::Eof, .. })) {
            let end = tokens
                .last()
                .map_or(0.into(), |token| token.span.end());
            tokens.push(Token::fixed(TokenKind::Eof, Span::new(end, end)));
        }
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    /// Looks `n` tokens past the current one, saturating at `Eof`.
    fn peek_nth(&self, n: usize) -> &Token {
        let index = (self.position + n).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    fn next_token(&mut self) -> Token {
        let token = self.peek().clone();
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
        token
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token, ParserError> {
        let next_token = self.next_token();
        if next_token.kind != expected {
            Err(ParserErrorKind::UnexpectedToken {
                actual: next_token,
                expected,
            }
            .into())
        } else {
            Ok(next_token)
        }
    }

    fn eat_if(&mut self, next: TokenKind) -> Option<Token> {
        if self.peek().kind != next {
            None
        } else {
            Some(self.next_token())
        }
    }

    /// Runs `parse` one nesting level down, failing at `opener` once the limit is reached.
    fn nested<T>(
        &mut self,
        opener: &Token,
        parse: impl FnOnce(&mut Self) -> Result<T, ParserError>,
    ) -> Result<T, ParserError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParserErrorKind::NestingTooDeep(opener.clone()).into());
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }
}

// Program/statements
impl Parser {
    pub fn parse(&mut self) -> Result<Program, ParserError> {
        let mut statements = Vec::new();
        while self.peek().kind != TokenKind::Eof {
            statements.push(self.parse_statement()?);
        }
        tracing::debug!(count = statements.len(), "parsed program");
        Ok(Program::new(statements))
    }

    fn parse_statement(&mut self) -> Result<Statement, ParserError> {
        match self.peek().kind {
            TokenKind::KeywordLet => self.parse_let_statement(),
            TokenKind::KeywordPrint => self.parse_print_statement(),
            TokenKind::KeywordWhile => self.parse_while_statement(),
            TokenKind::Ident if self.peek_nth(1).kind == TokenKind::Equal => {
                self.parse_assignment()
            }
            _ => {
                let expr = self.parse_expression_tree()?;
                let end = self.expect(TokenKind::Semicolon)?;
                let span = expr.get_span().merge(&end.span);
                Ok(Statement::Expression(ExpressionStatement { expr, span }))
            }
        }
    }

    fn parse_let_statement(&mut self) -> Result<Statement, ParserError> {
        let keyword = self.expect(TokenKind::KeywordLet)?;
        let name = self.expect(TokenKind::Ident)?;
        self.expect(TokenKind::Equal)?;
        let value = self.parse_expression_tree()?;
        let end = self.expect(TokenKind::Semicolon)?;
        Ok(Statement::Let(LetStatement {
            name: Ident {
                name: name.text,
                span: name.span,
            },
            value,
            span: keyword.span.merge(&end.span),
        }))
    }

    fn parse_assignment(&mut self) -> Result<Statement, ParserError> {
        let name = self.expect(TokenKind::Ident)?;
        self.expect(TokenKind::Equal)?;
        let value = self.parse_expression_tree()?;
        let end = self.expect(TokenKind::Semicolon)?;
        let span = name.span.merge(&end.span);
        Ok(Statement::Let(LetStatement {
            name: Ident {
                name: name.text,
                span: name.span,
            },
            value,
            span,
        }))
    }

    fn parse_print_statement(&mut self) -> Result<Statement, ParserError> {
        let keyword = self.expect(TokenKind::KeywordPrint)?;
        self.expect(TokenKind::LeftParenthesis)?;
        let expr = self.parse_expression_tree()?;
        self.expect(TokenKind::RightParenthesis)?;
        let end = self.expect(TokenKind::Semicolon)?;
        Ok(Statement::Print(PrintStatement {
            expr,
            span: keyword.span.merge(&end.span),
        }))
    }

    fn parse_while_statement(&mut self) -> Result<Statement, ParserError> {
        let keyword = self.expect(TokenKind::KeywordWhile)?;
        self.expect(TokenKind::LeftParenthesis)?;
        let condition = self.parse_expression_tree()?;
        self.expect(TokenKind::RightParenthesis)?;
        let brace = self.expect(TokenKind::LeftBrace)?;

        let (body, end) = self.nested(&brace, |parser| {
            let mut body = Vec::new();
            loop {
                if let Some(end) = parser.eat_if(TokenKind::RightBrace) {
                    return Ok((body, end));
                }
                if parser.peek().kind == TokenKind::Eof {
                    return Err(ParserErrorKind::UnexpectedToken {
                        actual: parser.next_token(),
                        expected: TokenKind::RightBrace,
                    }
                    .into());
                }
                body.push(parser.parse_statement()?);
            }
        })?;

        Ok(Statement::While(WhileStatement {
            condition,
            body,
            span: keyword.span.merge(&end.span),
        }))
    }
}

// Expressions
impl Parser {
    /// Parses a single expression that must span the whole token stream.
    pub fn parse_expression(&mut self) -> Result<Expression, ParserError> {
        let expr = self.parse_expression_tree()?;
        self.expect(TokenKind::Eof)?;
        Ok(expr)
    }

    fn parse_expression_tree(&mut self) -> Result<Expression, ParserError> {
        let mut tree = IncompleteExpression::new();
        let root = self.parse_infix(Precedence::Additive, &mut tree)?;
        Ok(tree
            .finish(root)
            .expect("Root was obtained from the tree itself so it must be valid."))
    }

    fn peek_infix_operator(&self, precedence: Precedence) -> Option<InfixOperator> {
        InfixOperator::from_token_kind(self.peek().kind)
            .filter(|operator| operator.get_precedence() == precedence)
    }

    /// Parses a left-associative chain of operators at `precedence` over operands of the
    /// next tighter tier.
    fn parse_infix(
        &mut self,
        precedence: Precedence,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let mut lhs = self.parse_operand(precedence, tree)?;
        while let Some(operator) = self.peek_infix_operator(precedence) {
            let operator_token = self.next_token();
            let rhs = self.parse_operand(precedence, tree)?;
            let span = Self::node_span(tree, lhs).merge(&Self::node_span(tree, rhs));
            let node = tree.push(ExpressionNode::Infix { operator, lhs, rhs }, span);
            lhs = Self::check_depth(tree, node, operator_token)?;
        }
        Ok(lhs)
    }

    /// Rejects `node` if its subtree is too tall to evaluate safely.
    fn check_depth(
        tree: &IncompleteExpression,
        node: ExpressionNodeRef,
        token: Token,
    ) -> Result<ExpressionNodeRef, ParserError> {
        match tree.get_depth(node) {
            Some(depth) if depth > MAX_EXPRESSION_DEPTH => {
                Err(ParserErrorKind::NestingTooDeep(token).into())
            }
            _ => Ok(node),
        }
    }

    fn parse_operand(
        &mut self,
        precedence: Precedence,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        match precedence {
            Precedence::Additive => self.parse_infix(Precedence::Multiplicative, tree),
            Precedence::Multiplicative => self.parse_factor(tree),
        }
    }

    fn node_span(tree: &IncompleteExpression, node: ExpressionNodeRef) -> Span {
        tree.get_span(node)
            .expect("Node ref came from the tree so it must exist.")
    }

    fn parse_factor(
        &mut self,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let token = self.next_token();

        let node = match token.kind {
            TokenKind::IntegerLiteral => {
                let Ok(value) = token.text.parse::<i64>() else {
                    return Err(ParserErrorKind::IntegerOverflow(token).into());
                };
                tree.push(
                    ExpressionNode::Atom(ExpressionAtom {
                        kind: ExpressionAtomKind::Number(value),
                        span: token.span,
                    }),
                    token.span,
                )
            }
            TokenKind::StringLiteral => tree.push(
                ExpressionNode::Atom(ExpressionAtom {
                    kind: ExpressionAtomKind::StringLiteral(token.text),
                    span: token.span,
                }),
                token.span,
            ),
            TokenKind::Ident if self.peek().kind == TokenKind::LeftParenthesis => {
                self.parse_call(token, tree)?
            }
            TokenKind::Ident => tree.push(
                ExpressionNode::Atom(ExpressionAtom {
                    kind: ExpressionAtomKind::Identifier(Ident {
                        name: token.text,
                        span: token.span,
                    }),
                    span: token.span,
                }),
                token.span,
            ),
            // Bracketed expression
            TokenKind::LeftParenthesis => self.nested(&token, |parser| {
                let inner = parser.parse_infix(Precedence::Additive, tree)?;
                parser.expect(TokenKind::RightParenthesis)?;
                Ok(inner)
            })?,
            _ => return Err(ParserErrorKind::NonExpression(token).into()),
        };
        Ok(node)
    }

    fn parse_call(
        &mut self,
        name: Token,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let open = self.expect(TokenKind::LeftParenthesis)?;
        let arguments = self.nested(&open, |parser| {
            let mut arguments = Vec::new();
            if parser.peek().kind != TokenKind::RightParenthesis {
                loop {
                    arguments.push(parser.parse_infix(Precedence::Additive, tree)?);
                    if parser.eat_if(TokenKind::Comma).is_none() {
                        break;
                    }
                }
            }
            Ok(arguments)
        })?;
        let end = self.expect(TokenKind::RightParenthesis)?;

        let builtin = Builtin::from_name(&name.text);
        let span = name.span.merge(&end.span);
        let node = tree.push(
            ExpressionNode::Call {
                callee: Ident {
                    name: name.text,
                    span: name.span,
                },
                builtin,
                arguments,
            },
            span,
        );
        Self::check_depth(tree, node, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse(source: &str) -> Result<Program, ParserError> {
        let tokens = Lexer::new(source).tokenize().expect("Source is lexically valid.");
        Parser::new(tokens).parse()
    }

    #[test]
    fn bare_assignment_parses_as_let() {
        let program = parse("x = 1;").expect("Valid program.");
        let Some(Statement::Let(stmt)) = program.get_statement(0) else {
            panic!("Expected a let statement.");
        };
        assert_eq!(stmt.name.name, "x");
    }

    #[test]
    fn identifier_without_equal_is_an_expression_statement() {
        let program = parse("read();").expect("Valid program.");
        assert!(matches!(
            program.get_statement(0),
            Some(Statement::Expression(_))
        ));
    }

    #[test]
    fn calls_resolve_builtins() {
        let program = parse("len(\"a\"); substr(\"a\", 0, 1); foo();").expect("Valid program.");
        let builtins: Vec<_> = program
            .iter()
            .map(|stmt| match stmt {
                Statement::Expression(stmt) => match stmt.expr.get_root() {
                    ExpressionNode::Call { builtin, .. } => *builtin,
                    node => panic!("Expected a call but got {node:?}."),
                },
                stmt => panic!("Expected an expression statement but got {stmt:?}."),
            })
            .collect();
        assert_eq!(
            builtins,
            vec![Some(Builtin::Len), Some(Builtin::Substring), None]
        );
    }

    #[test]
    fn missing_semicolon_reports_expected_token() {
        let error = parse("let x = 1").expect_err("Missing semicolon.");
        assert_eq!(
            error.kind,
            ParserErrorKind::UnexpectedToken {
                actual: Token::fixed(TokenKind::Eof, Span::new(9.into(), 9.into())),
                expected: TokenKind::Semicolon,
            }
        );
    }

    #[test]
    fn unclosed_while_body_is_an_error() {
        let error = parse("while (1) { print(1);").expect_err("Missing brace.");
        assert!(matches!(
            error.kind,
            ParserErrorKind::UnexpectedToken {
                expected: TokenKind::RightBrace,
                ..
            }
        ));
    }

    #[test]
    fn trailing_comma_in_arguments_is_rejected() {
        let error = parse("len(\"a\",);").expect_err("Trailing comma.");
        assert!(matches!(error.kind, ParserErrorKind::NonExpression(_)));
    }

    #[test]
    fn oversized_integer_literal_is_rejected() {
        let error = parse("print(99999999999999999999);").expect_err("Overflowing literal.");
        assert!(matches!(error.kind, ParserErrorKind::IntegerOverflow(_)));
        assert_eq!(error.span.range(), 6..26);
    }

    #[test]
    fn long_operator_chain_is_rejected() {
        let source = format!("print(1{});", "+1".repeat(100_000));
        let error = parse(&source).expect_err("Chain is too tall.");
        assert!(matches!(error.kind, ParserErrorKind::NestingTooDeep(_)));
        assert_eq!(error.code(), "PE004");
    }

    #[test]
    fn deep_brackets_are_rejected() {
        let source = format!("print({}1);", "(".repeat(100_000));
        let error = parse(&source).expect_err("Brackets nest too deeply.");
        assert!(matches!(
            error.kind,
            ParserErrorKind::NestingTooDeep(Token {
                kind: TokenKind::LeftParenthesis,
                ..
            })
        ));
    }

    #[test]
    fn deep_while_bodies_are_rejected() {
        let source = "while (0) {".repeat(1000);
        let error = parse(&source).expect_err("Loops nest too deeply.");
        assert!(matches!(error.kind, ParserErrorKind::NestingTooDeep(_)));
    }

    #[test]
    fn moderate_nesting_is_accepted() {
        let source = format!("print({}1{});", "(".repeat(200), ")".repeat(200));
        assert!(parse(&source).is_ok());
        let source = format!("print(1{});", "+1".repeat(1000));
        assert!(parse(&source).is_ok());
    }

    #[test]
    fn let_requires_an_identifier() {
        let error = parse("let 1 = 2;").expect_err("Invalid binding name.");
        assert!(matches!(
            error.kind,
            ParserErrorKind::UnexpectedToken {
                expected: TokenKind::Ident,
                ..
            }
        ));
    }
}
