use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub(crate) statements: Vec<Statement>,
}

impl Program {
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    LetStatement { name: String, value: Expression },
    ReturnStatement(Option<Expression>),
    ExpressionStatement(Expression),
    BlockStatement(BlockStatement),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(String),
    IntegerLiteral {
        value: i64,
    },
    Boolean {
        value: bool,
    },
    StringLiteral {
        value: String,
    },
    PrefixExpression {
        operator: PrefixOperator,
        right: Box<Expression>,
    },
    InfixExpression {
        left: Box<Expression>,
        operator: InfixOperator,
        right: Box<Expression>,
    },
    IfExpression {
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    FunctionLiteral {
        parameters: Vec<String>,
        body: BlockStatement,
    },
    CallExpression {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    ArrayLiteral {
        elements: Vec<Expression>,
    },
    IndexExpression {
        left: Box<Expression>,
        index: Box<Expression>,
    },
    HashLiteral {
        pairs: Vec<(Expression, Expression)>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InfixOperator {
    PLUS,
    MINUS,
    ASTERISK,
    SLASH,
    LT,
    GT,
    EQ,
    NEQ,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrefixOperator {
    MINUS,
    BANG,
}

fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// The canonical form is fully parenthesized and is not meant to be re-parsed.
impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?
        }
        Ok(())
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::LetStatement { name, value } => {
                write!(f, "let {} = {};", name, value)
            }
            Statement::ReturnStatement(Some(value)) => {
                write!(f, "return {};", value)
            }
            Statement::ReturnStatement(None) => {
                write!(f, "return;")
            }
            Statement::ExpressionStatement(exp) => {
                write!(f, "{}", exp)
            }
            Statement::BlockStatement(block) => {
                write!(f, "{}", block)
            }
        }
    }
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ ")?;
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        write!(f, " }}")
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use Expression::*;
        match self {
            Identifier(name) => {
                write!(f, "{}", name)
            }
            IntegerLiteral { value } => {
                write!(f, "{}", value)
            }
            Boolean { value } => {
                write!(f, "{}", value)
            }
            StringLiteral { value } => {
                write!(f, "{}", value)
            }
            PrefixExpression { operator, right } => {
                write!(f, "({}{})", operator, right)
            }
            InfixExpression {
                left,
                operator,
                right,
            } => {
                write!(f, "({} {} {})", left, operator, right)
            }
            IfExpression {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if {} {}", condition, consequence)?;
                if let Some(alt) = alternative {
                    write!(f, " else {}", alt)?;
                }
                Ok(())
            }
            FunctionLiteral { parameters, body } => {
                write!(f, "fn({}) {}", parameters.join(", "), body)
            }
            CallExpression {
                function,
                arguments,
            } => {
                write!(f, "{}({})", function, join(arguments))
            }
            ArrayLiteral { elements } => {
                write!(f, "[{}]", join(elements))
            }
            IndexExpression { left, index } => {
                write!(f, "({}[{}])", left, index)
            }
            HashLiteral { pairs } => {
                let pairs = pairs
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value))
                    .collect::<Vec<_>>();
                write!(f, "{{{}}}", pairs.join(", "))
            }
        }
    }
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use PrefixOperator::*;
        match self {
            MINUS => {
                write!(f, "-")
            }
            BANG => {
                write!(f, "!")
            }
        }
    }
}

impl Display for InfixOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use InfixOperator::*;
        match self {
            PLUS => {
                write!(f, "+")
            }
            MINUS => {
                write!(f, "-")
            }
            ASTERISK => {
                write!(f, "*")
            }
            SLASH => {
                write!(f, "/")
            }
            LT => {
                write!(f, "<")
            }
            GT => {
                write!(f, ">")
            }
            EQ => {
                write!(f, "==")
            }
            NEQ => {
                write!(f, "!=")
            }
        }
    }
}
