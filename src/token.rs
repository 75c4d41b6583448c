use std::fmt::{Display, Formatter};

#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Token {
    ILLEGAL(char),
    EOF,

    IDENT(String), // foobar, x, y, ...
    INT(String),
    STRING(String),

    ASSIGN,   // =
    PLUS,     // +
    MINUS,    // -
    BANG,     // !
    ASTERISK, // *
    SLASH,    // /

    LT, // <
    GT, // >

    EQ,  // ==
    NEQ, // !=

    COMMA,     // ,
    SEMICOLON, // ;
    COLON,     // :

    LPAREN,   // (
    RPAREN,   // )
    LBRACE,   // {
    RBRACE,   // }
    LBRACKET, // [
    RBRACKET, // ]

    FUNCTION,
    LET,
    TRUE,
    FALSE,
    IF,
    ELSE,
    RETURN,
}

impl Token {
    /// Source text the token was scanned from.
    pub fn literal(&self) -> String {
        use Token::*;
        match self {
            ILLEGAL(c) => c.to_string(),
            EOF => String::new(),
            IDENT(s) | INT(s) | STRING(s) => s.clone(),
            FUNCTION => "fn".to_string(),
            LET => "let".to_string(),
            TRUE => "true".to_string(),
            FALSE => "false".to_string(),
            IF => "if".to_string(),
            ELSE => "else".to_string(),
            RETURN => "return".to_string(),
            punct => punct.kind().to_string(),
        }
    }

    /// Name of the token kind, independent of any payload.
    pub fn kind(&self) -> &'static str {
        use Token::*;
        match self {
            ILLEGAL(_) => "ILLEGAL",
            EOF => "EOF",
            IDENT(_) => "IDENT",
            INT(_) => "INT",
            STRING(_) => "STRING",
            ASSIGN => "=",
            PLUS => "+",
            MINUS => "-",
            BANG => "!",
            ASTERISK => "*",
            SLASH => "/",
            LT => "<",
            GT => ">",
            EQ => "==",
            NEQ => "!=",
            COMMA => ",",
            SEMICOLON => ";",
            COLON => ":",
            LPAREN => "(",
            RPAREN => ")",
            LBRACE => "{",
            RBRACE => "}",
            LBRACKET => "[",
            RBRACKET => "]",
            FUNCTION => "FUNCTION",
            LET => "LET",
            TRUE => "TRUE",
            FALSE => "FALSE",
            IF => "IF",
            ELSE => "ELSE",
            RETURN => "RETURN",
        }
    }

    pub fn same_kind(&self, other: &Token) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind())
    }
}

pub fn lookup_identifier(ident: &str) -> Token {
    use Token::*;
    match ident {
        "fn" => FUNCTION,
        "let" => LET,
        "true" => TRUE,
        "false" => FALSE,
        "if" => IF,
        "else" => ELSE,
        "return" => RETURN,
        _ => IDENT(ident.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use crate::token::{lookup_identifier, Token};

    #[test]
    fn test_lookup_identifier() {
        let tests = vec![
            ("fn", Token::FUNCTION),
            ("let", Token::LET),
            ("return", Token::RETURN),
            ("lets", Token::IDENT("lets".to_string())),
            ("_x", Token::IDENT("_x".to_string())),
        ];
        for (input, expected) in tests {
            assert_eq!(expected, lookup_identifier(input));
        }
    }

    #[test]
    fn test_literal_and_kind() {
        let tests = vec![
            (Token::EQ, "==", "=="),
            (Token::IDENT("foo".to_string()), "foo", "IDENT"),
            (Token::INT("10".to_string()), "10", "INT"),
            (Token::ILLEGAL('@'), "@", "ILLEGAL"),
            (Token::FUNCTION, "fn", "FUNCTION"),
            (Token::EOF, "", "EOF"),
        ];
        for (token, literal, kind) in tests {
            assert_eq!(literal, token.literal());
            assert_eq!(kind, token.kind());
        }
    }

    #[test]
    fn test_same_kind_ignores_payload() {
        assert!(Token::IDENT("a".to_string()).same_kind(&Token::IDENT("b".to_string())));
        assert!(!Token::IDENT("a".to_string()).same_kind(&Token::STRING("a".to_string())));
        assert_ne!(Token::IDENT("a".to_string()), Token::IDENT("b".to_string()));
    }
}
