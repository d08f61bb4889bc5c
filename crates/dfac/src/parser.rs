// Parser for the textual automaton format, which is also what `Automaton`
// renders to:
//
// <file>       ::= { <automaton> }
// <automaton>  ::= <ident> '=' '{' { <item> ';' } '}'
// <item>       ::= 'initial' <state>
//               |  'final' <state>
//               |  <state> '|-' [ <symbol> ] '->' <state>
//
// <state> is a decimal u32, <symbol> any single non-whitespace character.
// `|-->` is an epsilon transition. `//` starts a comment running to end of line.

use thiserror::Error;

use crate::{Automaton, AutomatonBuilder, State, Transition};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{line}:{column}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("unexpected end of input, expected {0}")]
    UnexpectedEof(&'static str),
    #[error("unexpected character '{found}', expected {expected}")]
    Unexpected { found: char, expected: &'static str },
    #[error("state number '{0}' does not fit in a state identifier")]
    InvalidState(String),
    #[error("unknown keyword '{0}'")]
    UnknownKeyword(String),
}

struct Cursor {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Cursor {
    fn new(input: &str) -> Cursor {
        Cursor {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            line: self.line,
            column: self.column,
            kind,
        }
    }

    fn skip_blanks(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.next();
                }
                Some('/') if self.peek_nth(1) == Some('/') => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.next();
                    }
                }
                _ => break,
            }
        }
    }

    fn expect(&mut self, wanted: char, expected: &'static str) -> Result<(), ParseError> {
        self.skip_blanks();
        match self.peek() {
            Some(c) if c == wanted => {
                self.next();
                Ok(())
            }
            Some(found) => Err(self.error(ParseErrorKind::Unexpected { found, expected })),
            None => Err(self.error(ParseErrorKind::UnexpectedEof(expected))),
        }
    }

    // expects the literal without skipping blanks between its characters
    fn expect_literal(&mut self, literal: &str, expected: &'static str) -> Result<(), ParseError> {
        for wanted in literal.chars() {
            match self.peek() {
                Some(c) if c == wanted => {
                    self.next();
                }
                Some(found) => {
                    return Err(self.error(ParseErrorKind::Unexpected { found, expected }))
                }
                None => return Err(self.error(ParseErrorKind::UnexpectedEof(expected))),
            }
        }
        Ok(())
    }

    fn word(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                word.push(c);
                self.next();
            } else {
                break;
            }
        }
        word
    }
}

fn parse_identifier(cursor: &mut Cursor) -> Result<String, ParseError> {
    cursor.skip_blanks();
    match cursor.peek() {
        Some(c) if c.is_alphabetic() || c == '_' => Ok(cursor.word()),
        Some(found) => Err(cursor.error(ParseErrorKind::Unexpected {
            found,
            expected: "automaton name",
        })),
        None => Err(cursor.error(ParseErrorKind::UnexpectedEof("automaton name"))),
    }
}

fn parse_state(cursor: &mut Cursor) -> Result<State, ParseError> {
    cursor.skip_blanks();
    let (line, column) = (cursor.line, cursor.column);

    let mut digits = String::new();
    while let Some(c) = cursor.peek() {
        if c.is_ascii_digit() {
            digits.push(c);
            cursor.next();
        } else {
            break;
        }
    }

    if digits.is_empty() {
        return match cursor.peek() {
            Some(found) => Err(cursor.error(ParseErrorKind::Unexpected {
                found,
                expected: "state number",
            })),
            None => Err(cursor.error(ParseErrorKind::UnexpectedEof("state number"))),
        };
    }

    digits.parse::<State>().map_err(|_| ParseError {
        line,
        column,
        kind: ParseErrorKind::InvalidState(digits.clone()),
    })
}

// everything after a state number: ` |-a-> 1` or ` |--> 1`
fn parse_transition(cursor: &mut Cursor, start: State) -> Result<Transition, ParseError> {
    cursor.skip_blanks();
    cursor.expect_literal("|-", "'|-'")?;

    let label = match (cursor.peek(), cursor.peek_nth(1)) {
        (Some('-'), Some('>')) => None,
        (Some(c), _) if !c.is_whitespace() => {
            cursor.next();
            Some(c)
        }
        (Some(found), _) => {
            return Err(cursor.error(ParseErrorKind::Unexpected {
                found,
                expected: "transition symbol",
            }))
        }
        (None, _) => return Err(cursor.error(ParseErrorKind::UnexpectedEof("transition symbol"))),
    };
    cursor.expect_literal("->", "'->'")?;

    let end = parse_state(cursor)?;
    Ok(match label {
        Some(c) => Transition::new(start, c, end),
        None => Transition::epsilon(start, end),
    })
}

fn parse_item(cursor: &mut Cursor, builder: &mut AutomatonBuilder) -> Result<(), ParseError> {
    cursor.skip_blanks();
    match cursor.peek() {
        Some(c) if c.is_ascii_digit() => {
            let start = parse_state(cursor)?;
            let transition = parse_transition(cursor, start)?;
            builder.add_transition(transition);
        }
        Some(c) if c.is_alphabetic() => {
            let (line, column) = (cursor.line, cursor.column);
            let keyword = cursor.word();
            match keyword.as_str() {
                "initial" => builder.add_initial(parse_state(cursor)?),
                "final" => builder.add_final(parse_state(cursor)?),
                _ => {
                    return Err(ParseError {
                        line,
                        column,
                        kind: ParseErrorKind::UnknownKeyword(keyword),
                    })
                }
            }
        }
        Some(found) => {
            return Err(cursor.error(ParseErrorKind::Unexpected {
                found,
                expected: "'initial', 'final' or a transition",
            }))
        }
        None => return Err(cursor.error(ParseErrorKind::UnexpectedEof("'}'"))),
    }

    cursor.expect(';', "';'")
}

fn parse_automaton(cursor: &mut Cursor) -> Result<Automaton, ParseError> {
    let name = parse_identifier(cursor)?;
    cursor.expect('=', "'='")?;
    cursor.expect('{', "'{'")?;

    let mut builder = AutomatonBuilder::new(name);
    loop {
        cursor.skip_blanks();
        if cursor.peek() == Some('}') {
            cursor.next();
            break;
        }
        parse_item(cursor, &mut builder)?;
    }

    Ok(builder.build())
}

/// Parses every automaton definition in `input`, in order of appearance.
pub fn parse_automata(input: &str) -> Result<Vec<Automaton>, ParseError> {
    let mut cursor = Cursor::new(input);
    let mut automata = Vec::new();

    loop {
        cursor.skip_blanks();
        if cursor.peek().is_none() {
            break;
        }
        automata.push(parse_automaton(&mut cursor)?);
    }

    Ok(automata)
}
