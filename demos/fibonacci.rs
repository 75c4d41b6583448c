use monkey_interpreter::{eval, parse, Environment};
use std::time::Instant;

fn main() {
    let input = "
        let fib = fn(n) {
            if (n == 0) {
                return 0;
            } else {
                if (n == 1) {
                    return 1;
                } else {
                    return fib(n - 1) + fib(n - 2);
                }
            }
        };
        fib(25);
    ";
    let (program, errors) = parse(input);
    if !errors.is_empty() {
        for err in errors {
            eprintln!("\t{}", err);
        }
        return;
    }

    let start = Instant::now();
    let env = Environment::new();
    let result = eval(&program, &env);
    let end = Instant::now();

    println!("Program");
    println!("{}", input);
    println!("took {} seconds", end.duration_since(start).as_secs_f64());
    match result {
        Some(obj) => println!("result: {}", obj.inspect()),
        None => println!("result: NOTHING"),
    }
}
