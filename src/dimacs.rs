//! DIMACS CNF reader.
//!
//! Comment lines start with `c`, the header is `p cnf <vars> <clauses>`, and
//! clauses are whitespace-separated signed integers terminated by `0`,
//! possibly spanning lines. A line starting with `%` ends the input (some
//! benchmark archives append it).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: malformed header '{header}'")]
    MalformedHeader { line: usize, header: String },

    #[error("line {line}: invalid literal '{token}'")]
    InvalidLiteral { line: usize, token: String },

    #[error("unterminated clause at end of input")]
    UnterminatedClause,
}

/// Counts announced by the `p cnf` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub var_count: usize,
    pub clause_count: usize,
}

/// A parsed DIMACS problem: raw signed clauses plus the header, if present.
#[derive(Debug, Default, Clone)]
pub struct Dimacs {
    pub header: Option<Header>,
    pub clauses: Vec<Vec<i32>>,
}

impl Dimacs {
    pub fn parse(input: &str) -> Result<Dimacs, ParseError> {
        let mut parsed = Dimacs::default();
        let mut current = Vec::new();

        for (line_no, line) in input.lines().enumerate() {
            let line_no = line_no + 1;
            let line = line.trim();

            if line.is_empty() || line.starts_with('c') {
                continue;
            }
            if line.starts_with('%') {
                break;
            }
            if line.starts_with('p') {
                parsed.header = Some(parse_header(line_no, line)?);
                continue;
            }

            for token in line.split_whitespace() {
                let lit: i32 = token.parse().map_err(|_| ParseError::InvalidLiteral {
                    line: line_no,
                    token: token.to_string(),
                })?;

                if lit == 0 {
                    parsed.clauses.push(std::mem::take(&mut current));
                } else {
                    current.push(lit);
                }
            }
        }

        if !current.is_empty() {
            return Err(ParseError::UnterminatedClause);
        }

        Ok(parsed)
    }
}

fn parse_header(line_no: usize, line: &str) -> Result<Header, ParseError> {
    let malformed = || ParseError::MalformedHeader {
        line: line_no,
        header: line.to_string(),
    };

    let mut fields = line.split_whitespace();
    if fields.next() != Some("p") || fields.next() != Some("cnf") {
        return Err(malformed());
    }

    let var_count = fields
        .next()
        .and_then(|f| f.parse().ok())
        .ok_or_else(|| malformed())?;
    let clause_count = fields
        .next()
        .and_then(|f| f.parse().ok())
        .ok_or_else(|| malformed())?;

    if fields.next().is_some() {
        return Err(malformed());
    }

    Ok(Header {
        var_count,
        clause_count,
    })
}
