//! DIMACS CNF parser and writer for the cdclsat SAT solver.

use std::{borrow::Borrow, io, mem::replace};

use cdclsat_formula::{CnfFormula, Lit, Var};

use anyhow::Error;
use thiserror::Error;

/// Malformed DIMACS CNF input.
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("line {line}: unexpected character {unexpected:?}")]
    UnexpectedInput { line: usize, unexpected: char },
    #[error("line {line}: variable number {number} is too large")]
    LiteralTooLarge { line: usize, number: usize },
    #[error("line {line}: malformed header {header:?}, expected 'p cnf <vars> <clauses>'")]
    InvalidHeader { line: usize, header: String },
    #[error("line {line}: clause is not terminated by 0")]
    UnterminatedClause { line: usize },
    #[error("header declares {header_var_count} variables, but variable {var_count} is used")]
    VarCount {
        var_count: usize,
        header_var_count: usize,
    },
    #[error("header declares {header_clause_count} clauses, but {clause_count} were found")]
    ClauseCount {
        clause_count: usize,
        header_clause_count: usize,
    },
    #[error("parser used again after reporting an error")]
    PreviousError,
}

/// Counts declared by a `p cnf` line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DimacsHeader {
    pub var_count: usize,
    pub clause_count: usize,
}

/// Position of the lexer within the current line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum LexState {
    /// Nothing but whitespace seen on this line.
    LineStart,
    /// Between tokens.
    Separator,
    /// Inside a comment, skipped until the end of the line.
    Comment,
    /// Inside the problem line, collected until the end of the line.
    Header,
    /// A minus sign was read, a digit has to follow.
    Minus,
    /// Inside the digits of a literal.
    Number,
}

/// Streaming DIMACS CNF parser.
///
/// Input is fed in arbitrary chunks, tokens may be split across chunk boundaries. Parsed clauses
/// accumulate until they are taken out with [`take_formula`](DimacsParser::take_formula), so large
/// inputs never need to be held in memory twice.
pub struct DimacsParser {
    formula: CnfFormula,
    partial_clause: Vec<Lit>,
    header: Option<DimacsHeader>,
    header_line: Vec<u8>,

    line_number: usize,
    clause_count: usize,

    state: LexState,
    number: usize,
    negative: bool,
    error: bool,
}

impl Default for DimacsParser {
    fn default() -> DimacsParser {
        DimacsParser::new()
    }
}

impl DimacsParser {
    /// A parser at the start of its input.
    pub fn new() -> DimacsParser {
        DimacsParser {
            formula: CnfFormula::new(),
            partial_clause: vec![],
            header: None,
            header_line: vec![],

            line_number: 1,
            clause_count: 0,

            state: LexState::LineStart,
            number: 0,
            negative: false,
            error: false,
        }
    }

    /// Read a complete formula and validate it against its header.
    pub fn parse(input: impl io::Read) -> Result<CnfFormula, Error> {
        Ok(Self::parse_incremental(input, |_| Ok(()))?.take_formula())
    }

    /// Read a formula, handing the parser to `callback` after every buffered chunk and once more
    /// at the end of the input.
    ///
    /// The callback usually moves the clauses parsed so far out of the parser using
    /// [`take_formula`](DimacsParser::take_formula). The header is validated after the last
    /// callback.
    pub fn parse_incremental(
        input: impl io::Read,
        mut callback: impl FnMut(&mut DimacsParser) -> Result<(), Error>,
    ) -> Result<DimacsParser, Error> {
        use io::BufRead;

        let mut buffer = io::BufReader::new(input);
        let mut parser = Self::new();

        loop {
            let data = buffer.fill_buf()?;
            if data.is_empty() {
                break;
            }
            parser.parse_chunk(data)?;
            let len = data.len();
            buffer.consume(len);

            callback(&mut parser)?;
        }
        parser.eof()?;
        callback(&mut parser)?;
        parser.check_header()?;

        Ok(parser)
    }

    /// Feed the next chunk of input.
    ///
    /// Call [`eof`](DimacsParser::eof) after the last chunk. Once an error was returned, every
    /// further call fails with [`ParserError::PreviousError`].
    pub fn parse_chunk(&mut self, chunk: &[u8]) -> Result<(), ParserError> {
        if self.error {
            return Err(ParserError::PreviousError);
        }
        for &byte in chunk.iter() {
            let result = self.parse_byte(byte);
            if byte == b'\n' {
                self.line_number += 1;
            }
            if result.is_err() {
                self.error = true;
                return result;
            }
        }
        Ok(())
    }

    fn parse_byte(&mut self, byte: u8) -> Result<(), ParserError> {
        let newline = byte == b'\n' || byte == b'\r';
        let whitespace = newline || byte == b' ' || byte == b'\t';

        match self.state {
            LexState::Comment => {
                if newline {
                    self.state = LexState::LineStart;
                }
            }
            LexState::Header => {
                if newline {
                    self.parse_header_line()?;
                    self.state = LexState::LineStart;
                } else {
                    self.header_line.push(byte);
                }
            }
            LexState::Number | LexState::Minus if byte.is_ascii_digit() => {
                self.push_digit(byte)?;
            }
            LexState::Number if whitespace => {
                self.finish_literal();
                self.state = if newline {
                    LexState::LineStart
                } else {
                    LexState::Separator
                };
            }
            LexState::Number | LexState::Minus => return Err(self.unexpected(byte)),
            LexState::LineStart | LexState::Separator => match byte {
                _ if newline => self.state = LexState::LineStart,
                _ if whitespace => self.state = LexState::Separator,
                b'0'..=b'9' => self.push_digit(byte)?,
                b'-' => {
                    self.negative = true;
                    self.state = LexState::Minus;
                }
                b'c' if self.state == LexState::LineStart => self.state = LexState::Comment,
                b'p' if self.state == LexState::LineStart && self.header.is_none() => {
                    self.header_line.push(byte);
                    self.state = LexState::Header;
                }
                _ => return Err(self.unexpected(byte)),
            },
        }
        Ok(())
    }

    fn unexpected(&self, byte: u8) -> ParserError {
        ParserError::UnexpectedInput {
            line: self.line_number,
            unexpected: byte as char,
        }
    }

    fn push_digit(&mut self, byte: u8) -> Result<(), ParserError> {
        // Bounded by `Var::max_count()` before each step, so this cannot overflow.
        self.number = self.number * 10 + (byte - b'0') as usize;
        if self.number > Var::max_count() {
            return Err(ParserError::LiteralTooLarge {
                line: self.line_number,
                number: self.number,
            });
        }
        self.state = LexState::Number;
        Ok(())
    }

    /// Signal the end of the input.
    ///
    /// Completes a pending header or literal and fails on an unterminated clause. The declared
    /// counts are checked separately by [`check_header`](DimacsParser::check_header).
    pub fn eof(&mut self) -> Result<(), ParserError> {
        if self.error {
            return Err(ParserError::PreviousError);
        }

        match self.state {
            LexState::Header => self.parse_header_line()?,
            LexState::Number => self.finish_literal(),
            LexState::Minus => {
                return Err(ParserError::UnterminatedClause {
                    line: self.line_number,
                })
            }
            _ => (),
        }
        self.state = LexState::LineStart;

        if !self.partial_clause.is_empty() {
            return Err(ParserError::UnterminatedClause {
                line: self.line_number,
            });
        }

        Ok(())
    }

    /// Compare the parsed variable and clause counts with the header.
    ///
    /// Input without a header always passes.
    pub fn check_header(&self) -> Result<(), ParserError> {
        if let Some(header) = self.header {
            let var_count = self.formula.var_count();
            if var_count != header.var_count {
                return Err(ParserError::VarCount {
                    var_count,
                    header_var_count: header.var_count,
                });
            }

            if self.clause_count != header.clause_count {
                return Err(ParserError::ClauseCount {
                    clause_count: self.clause_count,
                    header_clause_count: header.clause_count,
                });
            }
        }

        Ok(())
    }

    /// Move out the clauses completed since the previous call.
    ///
    /// The returned formula's variable count covers every variable seen so far, including the
    /// header's declaration.
    pub fn take_formula(&mut self) -> CnfFormula {
        let mut new_formula = CnfFormula::new();
        new_formula.set_var_count(self.formula.var_count());
        replace(&mut self.formula, new_formula)
    }

    /// The `p cnf` header, once it was read.
    pub fn header(&self) -> Option<DimacsHeader> {
        self.header
    }

    /// Number of completed clauses.
    pub fn clause_count(&self) -> usize {
        self.clause_count
    }

    /// Variable count over everything parsed so far.
    pub fn var_count(&self) -> usize {
        self.formula.var_count()
    }

    fn finish_literal(&mut self) {
        if self.number == 0 {
            self.formula.add_clause(&self.partial_clause);
            self.partial_clause.clear();
            self.clause_count += 1;
        } else {
            self.partial_clause
                .push(Var::from_dimacs(self.number as isize).lit(!self.negative));
        }
        self.number = 0;
        self.negative = false;
    }

    fn parse_header_line(&mut self) -> Result<(), ParserError> {
        let line = String::from_utf8_lossy(&self.header_line).into_owned();
        self.header_line.clear();

        let fields: Vec<&str> = line.split_whitespace().collect();
        let counts = match fields[..] {
            ["p", "cnf", vars, clauses] => vars.parse::<usize>().ok().zip(clauses.parse().ok()),
            _ => None,
        };

        let (var_count, clause_count) = match counts {
            Some(counts) => counts,
            None => {
                return Err(ParserError::InvalidHeader {
                    line: self.line_number,
                    header: line,
                })
            }
        };

        if var_count > Var::max_count() {
            return Err(ParserError::LiteralTooLarge {
                line: self.line_number,
                number: var_count,
            });
        }

        self.header = Some(DimacsHeader {
            var_count,
            clause_count,
        });
        self.formula.set_var_count(var_count);

        Ok(())
    }
}

/// Write a `p cnf` line.
///
/// Together with [`write_dimacs_clauses`] this allows writing a formula piece by piece.
pub fn write_dimacs_header(target: &mut impl io::Write, header: DimacsHeader) -> io::Result<()> {
    writeln!(
        target,
        "p cnf {var_count} {clause_count}",
        var_count = header.var_count,
        clause_count = header.clause_count
    )
}

/// Write clauses, one per line and terminated by 0, without a header.
pub fn write_dimacs_clauses(
    target: &mut impl io::Write,
    clauses: impl IntoIterator<Item = impl IntoIterator<Item = impl Borrow<Lit>>>,
) -> io::Result<()> {
    for clause in clauses.into_iter() {
        for lit in clause.into_iter() {
            itoa::write(&mut *target, lit.borrow().to_dimacs())?;
            target.write_all(b" ")?;
        }
        target.write_all(b"0\n")?;
    }
    Ok(())
}

/// Write a complete formula including its header.
pub fn write_dimacs(target: &mut impl io::Write, formula: &CnfFormula) -> io::Result<()> {
    write_dimacs_header(
        &mut *target,
        DimacsHeader {
            var_count: formula.var_count(),
            clause_count: formula.len(),
        },
    )?;
    write_dimacs_clauses(&mut *target, formula.iter())
}
