//! Parser for the `.qc` format.

use alsvin_ir::{Circuit, Gate, Rotation, WireId};

use crate::error::{ParseError, ParseResult};
use crate::lexer::{tokenize, Token};

/// Parse `.qc` source text into a [`Circuit`].
pub fn parse(source: &str) -> ParseResult<Circuit> {
    Parser::new(source).parse()
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl Parser {
    fn new(source: &str) -> Self {
        Parser {
            tokens: tokenize(source),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |(_, l)| *l)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(t, _)| t.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn skip_newlines(&mut self) {
        while matches!(self.peek(), Some(Token::Newline)) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, want: Token, expected: &'static str) -> ParseResult<()> {
        match self.bump() {
            Some(token) if token == want => Ok(()),
            Some(token) => Err(ParseError::Unexpected {
                line: self.line(),
                expected,
                found: describe(&token),
            }),
            None => Err(ParseError::UnexpectedEof(expected)),
        }
    }

    /// Read words up to the end of the line or a `;` terminator (which is
    /// consumed, so several `;`-separated gates may share a line).
    fn words(&mut self) -> Vec<(String, usize)> {
        let mut out = Vec::new();
        loop {
            match self.peek() {
                Some(Token::Word(_)) => {
                    let line = self.line();
                    if let Some(Token::Word(w)) = self.bump() {
                        out.push((w, line));
                    }
                }
                Some(Token::Semicolon) => {
                    self.pos += 1;
                    break;
                }
                _ => break,
            }
        }
        out
    }

    fn parse(&mut self) -> ParseResult<Circuit> {
        let mut circuit = Circuit::new();

        // .v: every wire, defaulting to ancilla until .i says otherwise.
        self.skip_newlines();
        self.expect(Token::DeclWires, ".v declaration")?;
        for (name, _) in self.words() {
            circuit.add_wire(name, false)?;
        }

        // .i: primary inputs.
        self.skip_newlines();
        self.expect(Token::DeclInputs, ".i declaration")?;
        for (name, line) in self.words() {
            let wire = self.resolve(&circuit, &name, line)?;
            circuit.set_primary(wire, true);
        }

        // .o: accepted, validated, not used.
        self.skip_newlines();
        if matches!(self.peek(), Some(Token::DeclOutputs)) {
            self.pos += 1;
            for (name, line) in self.words() {
                self.resolve(&circuit, &name, line)?;
            }
        }

        self.skip_newlines();
        self.expect(Token::Begin, "BEGIN")?;

        loop {
            self.skip_newlines();
            match self.peek() {
                Some(Token::End) => {
                    self.pos += 1;
                    break;
                }
                Some(Token::Semicolon) => {
                    self.pos += 1;
                }
                Some(Token::Word(_)) => {
                    let line = self.line();
                    let symbol = match self.bump() {
                        Some(Token::Word(w)) => w,
                        _ => unreachable!(),
                    };
                    let mut args = Vec::new();
                    for (name, arg_line) in self.words() {
                        args.push(self.resolve(&circuit, &name, arg_line)?);
                    }
                    let gate = build_gate(&symbol, args, line)?;
                    circuit.push(gate)?;
                }
                Some(token) => {
                    return Err(ParseError::Unexpected {
                        line: self.line(),
                        expected: "gate or END",
                        found: describe(&token.clone()),
                    });
                }
                None => return Err(ParseError::UnexpectedEof("END")),
            }
        }

        Ok(circuit)
    }

    fn resolve(&self, circuit: &Circuit, name: &str, line: usize) -> ParseResult<WireId> {
        circuit.wire(name).ok_or_else(|| ParseError::UnknownQubit {
            line,
            name: name.to_string(),
        })
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::DeclWires => ".v".into(),
        Token::DeclInputs => ".i".into(),
        Token::DeclOutputs => ".o".into(),
        Token::Begin => "BEGIN".into(),
        Token::End => "END".into(),
        Token::Semicolon => ";".into(),
        Token::Newline => "end of line".into(),
        Token::Word(w) => format!("'{w}'"),
    }
}

fn build_gate(symbol: &str, args: Vec<WireId>, line: usize) -> ParseResult<Gate> {
    let one = |args: Vec<WireId>, gate: fn(WireId) -> Gate| -> ParseResult<Gate> {
        match args.as_slice() {
            [q] => Ok(gate(*q)),
            _ => Err(ParseError::WrongArity {
                line,
                gate: symbol.to_string(),
                expected: "1",
                got: args.len(),
            }),
        }
    };

    match symbol {
        "H" => one(args, Gate::H),
        "X" => one(args, Gate::X),
        "Y" => one(args, Gate::Y),
        "P" => one(args, Gate::P),
        "P*" => one(args, Gate::Pdg),
        "T" => one(args, Gate::T),
        "T*" => one(args, Gate::Tdg),
        "Z" => {
            if args.is_empty() {
                return Err(ParseError::WrongArity {
                    line,
                    gate: symbol.to_string(),
                    expected: "at least 1",
                    got: 0,
                });
            }
            Ok(Gate::Z(args))
        }
        "tof" | "TOF" => match args.as_slice() {
            [] => Err(ParseError::WrongArity {
                line,
                gate: "tof".to_string(),
                expected: "at least 1",
                got: 0,
            }),
            [q] => Ok(Gate::X(*q)),
            [c, t] => Ok(Gate::cnot(*c, *t)),
            _ => Ok(Gate::Tof(args)),
        },
        _ if symbol.starts_with("Rz(") => {
            let rotation = parse_rotation(symbol, line)?;
            match args.as_slice() {
                [q] => Ok(Gate::Rz(rotation, *q)),
                _ => Err(ParseError::WrongArity {
                    line,
                    gate: symbol.to_string(),
                    expected: "1",
                    got: args.len(),
                }),
            }
        }
        _ => Err(ParseError::UnknownGate {
            line,
            symbol: symbol.to_string(),
        }),
    }
}

/// Parse `Rz(base^exp)`, tolerating an optional `/denominator` suffix.
fn parse_rotation(token: &str, line: usize) -> ParseResult<Rotation> {
    let malformed = || ParseError::MalformedRotation {
        line,
        token: token.to_string(),
    };

    let inner = token
        .strip_prefix("Rz(")
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(malformed)?;
    let inner = inner.split('/').next().unwrap_or(inner);

    let (base, exp) = inner.split_once('^').ok_or_else(malformed)?;
    if base.is_empty() || base == "-" {
        return Err(malformed());
    }
    let exp: u32 = exp.parse().map_err(|_| malformed())?;

    Ok(Rotation::new(base, exp))
}
