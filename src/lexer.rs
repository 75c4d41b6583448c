use crate::token::{lookup_identifier, Token};
use std::str::Chars;

pub struct Lexer<'a> {
    input: Chars<'a>,
    cur: Option<char>,
    peek: Option<char>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Self {
            input: input.chars(),
            cur: None,
            peek: None,
        };
        lexer.read_char();
        lexer.read_char();
        lexer
    }
    /// Returns the next token, or `EOF` forever once the input is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.next().unwrap_or(Token::EOF)
    }
    /// Drains the lexer. The result always ends with exactly one `EOF`.
    pub fn read_all_tokens(&mut self) -> Vec<Token> {
        let mut tokens: Vec<Token> = self.by_ref().collect();
        tokens.push(Token::EOF);
        tokens
    }
    fn read_char(&mut self) {
        self.cur = self.peek;
        self.peek = self.input.next();
    }
    fn skip_whitespace(&mut self) {
        while matches!(self.cur, Some(' ') | Some('\t') | Some('\r') | Some('\n')) {
            self.read_char();
        }
    }
    fn read_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut res = String::new();
        while let Some(c) = self.cur.filter(|&c| pred(c)) {
            res.push(c);
            self.read_char();
        }
        res
    }
    fn read_number(&mut self) -> String {
        self.read_while(|c| c.is_ascii_digit())
    }
    fn read_identifier(&mut self) -> String {
        self.read_while(is_letter)
    }
    // unterminated strings run to end of input
    fn read_string(&mut self) -> String {
        self.read_char(); // "
        let res = self.read_while(|c| c != '"');
        if self.cur == Some('"') {
            self.read_char();
        }
        res
    }
    fn single(&mut self, token: Token) -> Token {
        self.read_char();
        token
    }
    fn either(&mut self, next: char, double: Token, single: Token) -> Token {
        if self.peek == Some(next) {
            self.read_char();
            self.read_char();
            double
        } else {
            self.read_char();
            single
        }
    }
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        use Token::*;
        self.skip_whitespace();
        let c = self.cur?;
        let token = match c {
            '=' => self.either('=', EQ, ASSIGN),
            '!' => self.either('=', NEQ, BANG),
            '+' => self.single(PLUS),
            '-' => self.single(MINUS),
            '*' => self.single(ASTERISK),
            '/' => self.single(SLASH),
            '<' => self.single(LT),
            '>' => self.single(GT),
            ',' => self.single(COMMA),
            ';' => self.single(SEMICOLON),
            ':' => self.single(COLON),
            '(' => self.single(LPAREN),
            ')' => self.single(RPAREN),
            '{' => self.single(LBRACE),
            '}' => self.single(RBRACE),
            '[' => self.single(LBRACKET),
            ']' => self.single(RBRACKET),
            '"' => STRING(self.read_string()),
            c if is_letter(c) => lookup_identifier(&self.read_identifier()),
            c if c.is_ascii_digit() => INT(self.read_number()),
            c => self.single(ILLEGAL(c)),
        };
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;
    use crate::token::Token;
    use crate::token::Token::*;

    fn ident(s: &str) -> Token {
        IDENT(s.to_string())
    }
    fn int(s: &str) -> Token {
        INT(s.to_string())
    }

    #[test]
    fn test_next_token() {
        let input = r#"let five = 5;
let add = fn(x, y) {
  x + y;
};
let result = add(five, 10);
!-/*5;
5 < 10 > 5;
if (5 < 10) {
    return true;
} else {
    return false;
}
10 == 10;
10 != 9;
"foobar"
"foo bar"
[1, 2];
{"foo": "bar"}
"#;
        let tests = vec![
            LET,
            ident("five"),
            ASSIGN,
            int("5"),
            SEMICOLON,
            LET,
            ident("add"),
            ASSIGN,
            FUNCTION,
            LPAREN,
            ident("x"),
            COMMA,
            ident("y"),
            RPAREN,
            LBRACE,
            ident("x"),
            PLUS,
            ident("y"),
            SEMICOLON,
            RBRACE,
            SEMICOLON,
            LET,
            ident("result"),
            ASSIGN,
            ident("add"),
            LPAREN,
            ident("five"),
            COMMA,
            int("10"),
            RPAREN,
            SEMICOLON,
            BANG,
            MINUS,
            SLASH,
            ASTERISK,
            int("5"),
            SEMICOLON,
            int("5"),
            LT,
            int("10"),
            GT,
            int("5"),
            SEMICOLON,
            IF,
            LPAREN,
            int("5"),
            LT,
            int("10"),
            RPAREN,
            LBRACE,
            RETURN,
            TRUE,
            SEMICOLON,
            RBRACE,
            ELSE,
            LBRACE,
            RETURN,
            FALSE,
            SEMICOLON,
            RBRACE,
            int("10"),
            EQ,
            int("10"),
            SEMICOLON,
            int("10"),
            NEQ,
            int("9"),
            SEMICOLON,
            STRING("foobar".to_string()),
            STRING("foo bar".to_string()),
            LBRACKET,
            int("1"),
            COMMA,
            int("2"),
            RBRACKET,
            SEMICOLON,
            LBRACE,
            STRING("foo".to_string()),
            COLON,
            STRING("bar".to_string()),
            RBRACE,
            EOF,
        ];
        let tokens = Lexer::new(input).read_all_tokens();
        assert_eq!(tests.len(), tokens.len());
        for (expected, actual) in tests.into_iter().zip(tokens.into_iter()) {
            assert_eq!(expected, actual);
        }
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("x");
        assert_eq!(ident("x"), lexer.next_token());
        for _ in 0..3 {
            assert_eq!(EOF, lexer.next_token());
        }
    }

    #[test]
    fn test_read_all_tokens_on_empty_input() {
        assert_eq!(vec![EOF], Lexer::new(" \t\r\n").read_all_tokens());
    }

    #[test]
    fn test_illegal_and_unterminated() {
        let tokens = Lexer::new(r#"a @ 1 "abc"#).read_all_tokens();
        assert_eq!(
            vec![ident("a"), ILLEGAL('@'), int("1"), STRING("abc".to_string()), EOF],
            tokens
        );
    }

    #[test]
    fn test_identifiers_stop_at_digits() {
        let tokens = Lexer::new("foo_bar1").read_all_tokens();
        assert_eq!(vec![ident("foo_bar"), int("1"), EOF], tokens);
    }
}
