use crate::ast::{BlockStatement, Expression, InfixOperator, PrefixOperator, Program, Statement};
use crate::lexer::Lexer;
use crate::token::Token;
use anyhow::{anyhow, bail, Result};

#[derive(PartialOrd, PartialEq, Clone, Copy, Debug)]
enum Precedence {
    LOWEST,
    EQUALS,
    LESSGREATER,
    SUM,
    PRODUCT,
    PREFIX,
    CALL,
    INDEX,
}

impl Token {
    fn precedence(&self) -> Precedence {
        use Precedence::*;
        use Token::*;
        match self {
            PLUS | MINUS => SUM,
            ASTERISK | SLASH => PRODUCT,
            LT | GT => LESSGREATER,
            EQ | NEQ => EQUALS,
            LPAREN => CALL,
            LBRACKET => INDEX,
            _ => LOWEST,
        }
    }
}

pub struct Parser<'a> {
    l: Lexer<'a>,
    cur: Token,
    peek: Token,
    errors: Vec<String>,
}

impl<'a> Parser<'a> {
    pub fn new(l: Lexer<'a>) -> Self {
        let mut parser = Parser {
            l,
            cur: Token::EOF,
            peek: Token::EOF,
            errors: Vec::new(),
        };
        parser.next_token();
        parser.next_token();
        parser
    }
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
    fn next_token(&mut self) {
        self.cur = std::mem::replace(&mut self.peek, self.l.next_token());
    }
    fn cur_token_is(&self, token: &Token) -> bool {
        self.cur.same_kind(token)
    }
    fn peek_token_is(&self, token: &Token) -> bool {
        self.peek.same_kind(token)
    }
    fn expect_peek(&mut self, token: Token) -> Result<()> {
        if !self.peek_token_is(&token) {
            bail!(
                "expected next token to be {}, got {} instead",
                token,
                self.peek
            );
        }
        self.next_token();
        Ok(())
    }
    /// Parses statements until end of input. A statement that fails to parse
    /// is dropped and its error recorded; parsing resumes at the next token.
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();
        while !self.cur_token_is(&Token::EOF) {
            if let Some(stmt) = self.parse_statement_or_record() {
                statements.push(stmt);
            }
            self.next_token();
        }
        Program { statements }
    }
    fn parse_statement_or_record(&mut self) -> Option<Statement> {
        match self.parse_statement() {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                tracing::debug!(error = %err, "dropping statement");
                self.errors.push(err.to_string());
                None
            }
        }
    }
    fn parse_statement(&mut self) -> Result<Statement> {
        match self.cur {
            Token::LET => self.parse_let_statement(),
            Token::RETURN => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }
    fn parse_let_statement(&mut self) -> Result<Statement> {
        self.expect_peek(Token::IDENT(String::new()))?;
        let name = self.cur.literal();
        self.expect_peek(Token::ASSIGN)?;
        self.next_token();
        let value = self.parse_expression(Precedence::LOWEST)?;
        if self.peek_token_is(&Token::SEMICOLON) {
            self.next_token();
        }
        Ok(Statement::LetStatement { name, value })
    }
    fn parse_return_statement(&mut self) -> Result<Statement> {
        use Token::*;
        if self.peek_token_is(&SEMICOLON)
            || self.peek_token_is(&RBRACE)
            || self.peek_token_is(&EOF)
        {
            if self.peek_token_is(&SEMICOLON) {
                self.next_token();
            }
            return Ok(Statement::ReturnStatement(None));
        }
        self.next_token();
        let value = self.parse_expression(Precedence::LOWEST)?;
        if self.peek_token_is(&SEMICOLON) {
            self.next_token();
        }
        Ok(Statement::ReturnStatement(Some(value)))
    }
    fn parse_expression_statement(&mut self) -> Result<Statement> {
        let exp = self.parse_expression(Precedence::LOWEST)?;
        if self.peek_token_is(&Token::SEMICOLON) {
            self.next_token();
        }
        Ok(Statement::ExpressionStatement(exp))
    }
    fn parse_expression(&mut self, precedence: Precedence) -> Result<Expression> {
        use Expression::*;
        use Token::*;
        let mut exp = match &self.cur {
            IDENT(name) => Identifier(name.clone()),
            INT(literal) => {
                let value = literal
                    .parse::<i64>()
                    .map_err(|_| anyhow!("could not parse {} as integer", literal))?;
                IntegerLiteral { value }
            }
            STRING(value) => StringLiteral {
                value: value.clone(),
            },
            MINUS | BANG => self.parse_prefix_expression()?,
            LPAREN => self.parse_grouped_expression()?,
            TRUE => Boolean { value: true },
            FALSE => Boolean { value: false },
            IF => self.parse_if_expression()?,
            FUNCTION => self.parse_function_literal()?,
            LBRACKET => ArrayLiteral {
                elements: self.parse_expression_list(RBRACKET)?,
            },
            LBRACE => self.parse_hash_literal()?,
            token => {
                bail!("no prefix parse function for {} found", token);
            }
        };
        while !self.peek_token_is(&SEMICOLON) && precedence < self.peek.precedence() {
            exp = match &self.peek {
                PLUS | MINUS | ASTERISK | SLASH | LT | GT | EQ | NEQ => {
                    self.next_token();
                    self.parse_infix_expression(exp)?
                }
                LPAREN => {
                    self.next_token();
                    CallExpression {
                        function: Box::new(exp),
                        arguments: self.parse_expression_list(RPAREN)?,
                    }
                }
                LBRACKET => {
                    self.next_token();
                    self.parse_index_expression(exp)?
                }
                _ => return Ok(exp),
            };
        }
        Ok(exp)
    }
    fn parse_grouped_expression(&mut self) -> Result<Expression> {
        self.next_token(); // (
        let exp = self.parse_expression(Precedence::LOWEST)?;
        self.expect_peek(Token::RPAREN)?;
        Ok(exp)
    }
    fn parse_prefix_expression(&mut self) -> Result<Expression> {
        let op = match &self.cur {
            Token::MINUS => PrefixOperator::MINUS,
            Token::BANG => PrefixOperator::BANG,
            token => {
                bail!("unexpected operator: {}", token);
            }
        };
        self.next_token();
        let right = self.parse_expression(Precedence::PREFIX)?;
        Ok(Expression::PrefixExpression {
            operator: op,
            right: Box::new(right),
        })
    }
    fn parse_infix_expression(&mut self, left: Expression) -> Result<Expression> {
        let op = match &self.cur {
            Token::PLUS => InfixOperator::PLUS,
            Token::MINUS => InfixOperator::MINUS,
            Token::ASTERISK => InfixOperator::ASTERISK,
            Token::SLASH => InfixOperator::SLASH,
            Token::LT => InfixOperator::LT,
            Token::GT => InfixOperator::GT,
            Token::EQ => InfixOperator::EQ,
            Token::NEQ => InfixOperator::NEQ,
            token => {
                bail!("unexpected operator: {}", token);
            }
        };
        let precedence = self.cur.precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Ok(Expression::InfixExpression {
            left: Box::new(left),
            operator: op,
            right: Box::new(right),
        })
    }
    fn parse_index_expression(&mut self, left: Expression) -> Result<Expression> {
        self.next_token(); // [
        let index = self.parse_expression(Precedence::LOWEST)?;
        self.expect_peek(Token::RBRACKET)?;
        Ok(Expression::IndexExpression {
            left: Box::new(left),
            index: Box::new(index),
        })
    }
    fn parse_if_expression(&mut self) -> Result<Expression> {
        self.expect_peek(Token::LPAREN)?;
        self.next_token();
        let condition = self.parse_expression(Precedence::LOWEST)?;
        self.expect_peek(Token::RPAREN)?;
        self.expect_peek(Token::LBRACE)?;
        let consequence = self.parse_block_statement();
        let alternative = if self.peek_token_is(&Token::ELSE) {
            self.next_token();
            self.expect_peek(Token::LBRACE)?;
            Some(self.parse_block_statement())
        } else {
            None
        };
        Ok(Expression::IfExpression {
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }
    fn parse_function_literal(&mut self) -> Result<Expression> {
        self.expect_peek(Token::LPAREN)?;
        let parameters = self.parse_function_parameters()?;
        self.expect_peek(Token::LBRACE)?;
        let body = self.parse_block_statement();
        Ok(Expression::FunctionLiteral { parameters, body })
    }
    fn parse_function_parameters(&mut self) -> Result<Vec<String>> {
        let mut parameters = Vec::new();
        if self.peek_token_is(&Token::RPAREN) {
            self.next_token();
            return Ok(parameters);
        }
        self.expect_peek(Token::IDENT(String::new()))?;
        parameters.push(self.cur.literal());
        while self.peek_token_is(&Token::COMMA) {
            self.next_token();
            self.expect_peek(Token::IDENT(String::new()))?;
            parameters.push(self.cur.literal());
        }
        self.expect_peek(Token::RPAREN)?;
        Ok(parameters)
    }
    /// Shared by call arguments and array elements.
    fn parse_expression_list(&mut self, end: Token) -> Result<Vec<Expression>> {
        let mut list = Vec::new();
        if self.peek_token_is(&end) {
            self.next_token();
            return Ok(list);
        }
        self.next_token();
        list.push(self.parse_expression(Precedence::LOWEST)?);
        while self.peek_token_is(&Token::COMMA) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::LOWEST)?);
        }
        self.expect_peek(end)?;
        Ok(list)
    }
    fn parse_hash_literal(&mut self) -> Result<Expression> {
        let mut pairs = Vec::new();
        while !self.peek_token_is(&Token::RBRACE) {
            self.next_token();
            let key = self.parse_expression(Precedence::LOWEST)?;
            self.expect_peek(Token::COLON)?;
            self.next_token();
            let value = self.parse_expression(Precedence::LOWEST)?;
            pairs.push((key, value));
            if !self.peek_token_is(&Token::RBRACE) {
                self.expect_peek(Token::COMMA)?;
            }
        }
        self.expect_peek(Token::RBRACE)?;
        Ok(Expression::HashLiteral { pairs })
    }
    // Errors inside a block are recorded and the block keeps going.
    fn parse_block_statement(&mut self) -> BlockStatement {
        self.next_token();
        let mut statements = Vec::new();
        while !self.cur_token_is(&Token::RBRACE) && !self.cur_token_is(&Token::EOF) {
            if let Some(stmt) = self.parse_statement_or_record() {
                statements.push(stmt);
            }
            self.next_token();
        }
        BlockStatement { statements }
    }
}
