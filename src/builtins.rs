use crate::object::{Builtin, BuiltinFunction, Object, NULL};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::io::Write;

static BUILTINS: Lazy<HashMap<&'static str, BuiltinFunction>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, BuiltinFunction> = HashMap::new();
    map.insert("len", len);
    map.insert("first", first);
    map.insert("last", last);
    map.insert("rest", rest);
    map.insert("push", push);
    map.insert("puts", puts);
    map
});

pub fn lookup(name: &str) -> Option<Object> {
    BUILTINS.get_key_value(name).map(|(&name, &func)| {
        tracing::trace!(name, "resolved builtin");
        Object::Builtin(Builtin { name, func })
    })
}

fn wrong_number_of_arguments(got: usize, want: usize) -> Object {
    Object::error(format!(
        "wrong number of arguments. got={}, want={}",
        got, want
    ))
}

fn must_be_array(name: &str, got: &Object) -> Object {
    Object::error(format!(
        "argument to `{}` must be ARRAY, got {}",
        name,
        got.r#type()
    ))
}

fn len(args: Vec<Object>, _: &mut dyn Write) -> Object {
    if args.len() != 1 {
        return wrong_number_of_arguments(args.len(), 1);
    }
    match &args[0] {
        Object::String { value } => Object::Integer {
            value: value.chars().count() as i64,
        },
        Object::Array { elements } => Object::Integer {
            value: elements.len() as i64,
        },
        other => Object::error(format!(
            "argument to `len` not supported, got {}",
            other.r#type()
        )),
    }
}

fn first(args: Vec<Object>, _: &mut dyn Write) -> Object {
    if args.len() != 1 {
        return wrong_number_of_arguments(args.len(), 1);
    }
    match &args[0] {
        Object::Array { elements } => elements.first().cloned().unwrap_or(NULL),
        other => must_be_array("first", other),
    }
}

fn last(args: Vec<Object>, _: &mut dyn Write) -> Object {
    if args.len() != 1 {
        return wrong_number_of_arguments(args.len(), 1);
    }
    match &args[0] {
        Object::Array { elements } => elements.last().cloned().unwrap_or(NULL),
        other => must_be_array("last", other),
    }
}

fn rest(args: Vec<Object>, _: &mut dyn Write) -> Object {
    if args.len() != 1 {
        return wrong_number_of_arguments(args.len(), 1);
    }
    match &args[0] {
        Object::Array { elements } if elements.is_empty() => NULL,
        Object::Array { elements } => Object::Array {
            elements: elements[1..].to_vec(),
        },
        other => must_be_array("rest", other),
    }
}

fn push(args: Vec<Object>, _: &mut dyn Write) -> Object {
    if args.len() != 2 {
        return wrong_number_of_arguments(args.len(), 2);
    }
    match &args[0] {
        Object::Array { elements } => {
            let mut elements = elements.clone();
            elements.push(args[1].clone());
            Object::Array { elements }
        }
        other => must_be_array("push", other),
    }
}

fn puts(args: Vec<Object>, out: &mut dyn Write) -> Object {
    for arg in &args {
        if let Err(err) = writeln!(out, "{}", arg.inspect()) {
            return Object::error(format!("puts: {}", err));
        }
    }
    NULL
}
