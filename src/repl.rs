use crate::environment::Environment;
use crate::{eval, parse};
use anyhow::Result;
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

pub const PROMPT: &str = ">> ";

#[derive(Debug, Clone)]
pub struct ReplConfig {
    pub prompt: String,
    /// Print the canonical form of each program before its result.
    pub echo: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: PROMPT.to_string(),
            echo: false,
        }
    }
}

/// Reads one program per line until EOF. Bindings persist across lines.
/// `puts` writes to `output` as well, interleaved with the results.
pub fn start<R: BufRead, W: Write + 'static>(
    config: &ReplConfig,
    mut input: R,
    output: Rc<RefCell<W>>,
) -> Result<()> {
    let env = Environment::with_output(output.clone());
    loop {
        {
            let mut out = output.borrow_mut();
            write!(out, "{}", config.prompt)?;
            out.flush()?;
        }
        let mut line = String::new();
        let read = input.read_line(&mut line)?;
        if read == 0 {
            // EOF
            tracing::debug!("input closed");
            return Ok(());
        }
        let (program, errors) = parse(line.trim_end());
        if !errors.is_empty() {
            let mut out = output.borrow_mut();
            for err in &errors {
                writeln!(out, "\t{}", err)?;
            }
            continue;
        }
        if config.echo {
            writeln!(output.borrow_mut(), "{}", program)?;
        }
        let result = eval(&program, &env);
        let mut out = output.borrow_mut();
        match result {
            Some(obj) => writeln!(out, "{}", obj.inspect())?,
            None => writeln!(out, "NOTHING")?,
        }
        out.flush()?;
    }
}

#[cfg(test)]
mod tests {
    use crate::repl::{start, ReplConfig};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::io::Cursor;
    use std::rc::Rc;

    fn run(config: &ReplConfig, input: &str) -> String {
        let output = Rc::new(RefCell::new(Vec::new()));
        start(config, Cursor::new(input), output.clone()).unwrap();
        let bytes = output.borrow().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_bindings_persist_between_lines() {
        let out = run(&ReplConfig::default(), "let a = 2;\na * 21\n");
        assert_eq!(">> NOTHING\n>> 42\n>> ", out);
    }

    #[test]
    fn test_parse_errors_skip_evaluation() {
        let out = run(&ReplConfig::default(), "let = 1;\n");
        assert_eq!(
            ">> \texpected next token to be IDENT, got = instead\n\tno prefix parse function for = found\n>> ",
            out
        );
    }

    #[test]
    fn test_echo_and_prompt() {
        let config = ReplConfig {
            prompt: "$ ".to_string(),
            echo: true,
        };
        let out = run(&config, "1 + 2 * 3\n\"a\" + \"b\"\n");
        assert_eq!("$ (1 + (2 * 3))\n7\n$ (a + b)\n\"ab\"\n$ ", out);
    }

    #[test]
    fn test_runtime_errors_are_printed() {
        let out = run(&ReplConfig::default(), "5 + true\n");
        assert_eq!(">> type mismatch: INTEGER + BOOLEAN\n>> ", out);
    }

    #[test]
    fn test_puts_goes_to_the_same_output() {
        let out = run(
            &ReplConfig::default(),
            "let greet = fn(name) { puts(\"hi \" + name); };\ngreet(\"bob\")\n",
        );
        assert_eq!(">> NOTHING\n>> \"hi bob\"\nnull\n>> ", out);
    }

    #[test]
    fn test_hash_keys_print_in_a_stable_order() {
        let out = run(
            &ReplConfig::default(),
            "{\"b\": 2, 1: \"one\", \"a\": 1, false: 0}\n",
        );
        assert_eq!(">> {1: \"one\", false: 0, \"a\": 1, \"b\": 2}\n>> ", out);
    }
}
