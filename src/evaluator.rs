use crate::ast::{BlockStatement, Expression, InfixOperator, PrefixOperator, Program, Statement};
use crate::builtins;
use crate::environment::{Env, Environment};
use crate::object::{Function, Object, FALSE, NULL, TRUE};
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::rc::Rc;

/// Evaluates a program. `None` means the last statement produced no value,
/// as with a trailing `let`. A top-level `return` ends the program early.
pub fn eval_program(program: &Program, env: &Env) -> Option<Object> {
    let mut result = None;
    for stmt in program.statements() {
        match eval_statement(stmt, env) {
            Some(Object::ReturnValue { value }) => return Some(*value),
            Some(err @ Object::Error { .. }) => return Some(err),
            obj => result = obj,
        }
    }
    result
}

// Return values are passed up unopened so they escape nested blocks.
fn eval_block_statement(block: &BlockStatement, env: &Env) -> Option<Object> {
    let mut result = None;
    for stmt in &block.statements {
        match eval_statement(stmt, env) {
            Some(obj @ Object::ReturnValue { .. }) | Some(obj @ Object::Error { .. }) => {
                return Some(obj)
            }
            obj => result = obj,
        }
    }
    result
}

fn eval_statement(statement: &Statement, env: &Env) -> Option<Object> {
    match statement {
        Statement::LetStatement { name, value } => {
            let value = eval_expression(value, env);
            if value.is_error() {
                return Some(value);
            }
            env.borrow_mut().set(name.as_str(), value);
            None
        }
        Statement::ReturnStatement(value) => {
            let value = match value {
                Some(exp) => eval_expression(exp, env),
                None => NULL,
            };
            if value.is_error() {
                return Some(value);
            }
            Some(Object::ReturnValue {
                value: Box::new(value),
            })
        }
        Statement::ExpressionStatement(exp) => Some(eval_expression(exp, env)),
        Statement::BlockStatement(block) => eval_block_statement(block, env),
    }
}

fn eval_expression(expression: &Expression, env: &Env) -> Object {
    use Expression::*;
    match expression {
        Identifier(name) => eval_identifier(name, env),
        IntegerLiteral { value } => Object::Integer { value: *value },
        Boolean { value } => Object::native_bool(*value),
        StringLiteral { value } => Object::String {
            value: value.clone(),
        },
        PrefixExpression { operator, right } => {
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix_expression(*operator, right)
        }
        InfixExpression {
            left,
            operator,
            right,
        } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_infix_expression(*operator, left, right)
        }
        IfExpression {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval_expression(condition, env);
            if condition.is_error() {
                return condition;
            }
            let branch = if condition.is_truthy() {
                Some(consequence)
            } else {
                alternative.as_ref()
            };
            branch
                .and_then(|block| eval_block_statement(block, env))
                .unwrap_or(NULL)
        }
        FunctionLiteral { parameters, body } => Object::Function(Rc::new(Function::new(
            parameters.clone(),
            body.clone(),
            Rc::clone(env),
        ))),
        CallExpression {
            function,
            arguments,
        } => {
            let function = eval_expression(function, env);
            if function.is_error() {
                return function;
            }
            match eval_expressions(arguments, env) {
                Ok(args) => apply_function(function, args, env),
                Err(err) => err,
            }
        }
        ArrayLiteral { elements } => match eval_expressions(elements, env) {
            Ok(elements) => Object::Array { elements },
            Err(err) => err,
        },
        IndexExpression { left, index } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let index = eval_expression(index, env);
            if index.is_error() {
                return index;
            }
            eval_index_expression(left, index)
        }
        HashLiteral { pairs } => eval_hash_literal(pairs, env),
    }
}

fn eval_identifier(name: &str, env: &Env) -> Object {
    if let Some(obj) = env.borrow().get(name) {
        return obj;
    }
    builtins::lookup(name)
        .unwrap_or_else(|| Object::error(format!("identifier not found: {}", name)))
}

/// Evaluates left to right, stopping at the first error.
fn eval_expressions(expressions: &[Expression], env: &Env) -> Result<Vec<Object>, Object> {
    let mut result = Vec::with_capacity(expressions.len());
    for exp in expressions {
        let evaluated = eval_expression(exp, env);
        if evaluated.is_error() {
            return Err(evaluated);
        }
        result.push(evaluated);
    }
    Ok(result)
}

fn eval_prefix_expression(operator: PrefixOperator, right: Object) -> Object {
    match operator {
        PrefixOperator::BANG => eval_bang_operator_expression(right),
        PrefixOperator::MINUS => match right {
            Object::Integer { value } => Object::Integer {
                value: value.wrapping_neg(),
            },
            right => Object::error(format!("unknown operator: -{}", right.r#type())),
        },
    }
}

// Unlike `if`, `!` treats 0 as falsy.
fn eval_bang_operator_expression(right: Object) -> Object {
    match right {
        Object::Boolean { value } => Object::native_bool(!value),
        Object::Null => TRUE,
        Object::Integer { value } => Object::native_bool(value == 0),
        _ => FALSE,
    }
}

fn eval_infix_expression(operator: InfixOperator, left: Object, right: Object) -> Object {
    match (&left, &right) {
        (Object::Integer { value: l }, Object::Integer { value: r }) => {
            eval_integer_infix_expression(operator, *l, *r)
        }
        (Object::String { value: l }, Object::String { value: r })
            if operator == InfixOperator::PLUS =>
        {
            Object::String {
                value: format!("{}{}", l, r),
            }
        }
        (Object::Boolean { value: l }, Object::Boolean { value: r }) => match operator {
            InfixOperator::EQ => Object::native_bool(l == r),
            InfixOperator::NEQ => Object::native_bool(l != r),
            _ => unknown_operator(operator, &left, &right),
        },
        _ if left.r#type() != right.r#type() => Object::error(format!(
            "type mismatch: {} {} {}",
            left.r#type(),
            operator,
            right.r#type()
        )),
        _ => unknown_operator(operator, &left, &right),
    }
}

fn unknown_operator(operator: InfixOperator, left: &Object, right: &Object) -> Object {
    Object::error(format!(
        "unknown operator: {} {} {}",
        left.r#type(),
        operator,
        right.r#type()
    ))
}

fn eval_integer_infix_expression(operator: InfixOperator, left: i64, right: i64) -> Object {
    use InfixOperator::*;
    let value = match operator {
        PLUS => left.wrapping_add(right),
        MINUS => left.wrapping_sub(right),
        ASTERISK => left.wrapping_mul(right),
        SLASH => {
            if right == 0 {
                return Object::error("division by zero: INTEGER / INTEGER");
            }
            left.wrapping_div(right)
        }
        LT => return Object::native_bool(left < right),
        GT => return Object::native_bool(left > right),
        EQ => return Object::native_bool(left == right),
        NEQ => return Object::native_bool(left != right),
    };
    Object::Integer { value }
}

fn eval_index_expression(left: Object, index: Object) -> Object {
    match (&left, &index) {
        (Object::Array { elements }, Object::Integer { value }) => {
            usize::try_from(*value)
                .ok()
                .and_then(|i| elements.get(i))
                .cloned()
                .unwrap_or(NULL)
        }
        (Object::Hash { pairs }, _) => match index.hash_key() {
            Some(key) => pairs.get(&key).cloned().unwrap_or(NULL),
            None => Object::error(format!("unusable as hash key: {}", index.r#type())),
        },
        _ => Object::error(format!(
            "index operator not supported: {}",
            left.r#type()
        )),
    }
}

fn eval_hash_literal(pairs: &[(Expression, Expression)], env: &Env) -> Object {
    let mut map = BTreeMap::new();
    for (key_exp, value_exp) in pairs {
        let key = eval_expression(key_exp, env);
        if key.is_error() {
            return key;
        }
        let value = eval_expression(value_exp, env);
        if value.is_error() {
            return value;
        }
        let hash_key = match key.hash_key() {
            Some(hash_key) => hash_key,
            None => return Object::error(format!("unusable as hash key: {}", key.r#type())),
        };
        map.insert(hash_key, value);
    }
    Object::Hash { pairs: map }
}

fn apply_function(function: Object, args: Vec<Object>, env: &Env) -> Object {
    match function {
        Object::Function(func) => {
            if func.parameters().len() != args.len() {
                return Object::error(format!(
                    "wrong number of arguments. got={}, want={}",
                    args.len(),
                    func.parameters().len()
                ));
            }
            tracing::trace!(params = ?func.parameters(), "applying function");
            let env = extend_function_env(&func, args);
            match eval_block_statement(func.body(), &env) {
                Some(Object::ReturnValue { value }) => *value,
                Some(obj) => obj,
                None => NULL,
            }
        }
        Object::Builtin(builtin) => {
            tracing::trace!(name = builtin.name, "applying builtin");
            let output = env.borrow().output();
            match output {
                Some(output) => (builtin.func)(args, &mut *output.borrow_mut()),
                None => (builtin.func)(args, &mut std::io::stdout()),
            }
        }
        other => Object::error(format!("not a function: {}", other.r#type())),
    }
}

fn extend_function_env(func: &Function, args: Vec<Object>) -> Env {
    let env = Environment::new_enclosed(func.env());
    {
        let mut scope = env.borrow_mut();
        for (param, arg) in func.parameters().iter().zip(args) {
            scope.set(param.as_str(), arg);
        }
    }
    env
}
