//! Lexer for the `.qc` format.

use logos::Logos;

/// Tokens of the line-oriented `.qc` format.
///
/// Newlines are significant (they terminate header and gate lines), so they
/// are a token rather than skipped whitespace.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t]+")]
#[logos(skip r"#[^\r\n]*")]
pub enum Token {
    #[token(".v", priority = 10)]
    DeclWires,

    #[token(".i", priority = 10)]
    DeclInputs,

    #[token(".o", priority = 10)]
    DeclOutputs,

    #[token("BEGIN", priority = 10)]
    Begin,

    #[token("END", priority = 10)]
    End,

    #[token(";")]
    Semicolon,

    #[regex(r"[\r\n]+")]
    Newline,

    /// Any other whitespace-delimited word: a gate symbol (possibly with an
    /// `Rz(...)` argument baked in) or a wire name.
    #[regex(r"[^ \t\r\n;#]+", |lex| lex.slice().to_string())]
    Word(String),
}

/// Tokenize a `.qc` source, tracking the 1-based line of each token.
///
/// Invalid byte sequences are impossible (the `Word` rule accepts anything
/// non-delimiting), so the output is infallible.
pub fn tokenize(source: &str) -> Vec<(Token, usize)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    let mut line = 1;

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            let newlines = match &token {
                Token::Newline => lexer.slice().matches(['\n', '\r']).count()
                    - lexer.slice().matches("\r\n").count(),
                _ => 0,
            };
            tokens.push((token, line));
            line += newlines;
        }
    }

    tokens
}
