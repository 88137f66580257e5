use std::fmt;
use std::num::ParseFloatError;

use thiserror::Error;

use crate::units::UnitError;

/// Which half of a flow row a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowSide {
    Input,
    Output,
}

impl fmt::Display for FlowSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowSide::Input => f.write_str("input"),
            FlowSide::Output => f.write_str("output"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("line {line}: unit '{symbol}' is not registered; see the unit catalog")]
    UnitNotRecognized { line: usize, symbol: String },

    #[error("unit family '{family}' has no conversion table")]
    UnsupportedUnitFamily { family: String },

    #[error("line {line}: output flow kind '{label}' not recognized")]
    FlowKindNotRecognized { line: usize, label: String },

    #[error("line {line}: failed to parse {column} '{value}' as a number: {source}")]
    InvalidNumericField {
        line: usize,
        column: &'static str,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("line {line}: quantity should not be 0 for {side} flow '{name}'")]
    ZeroQuantity {
        line: usize,
        side: FlowSide,
        name: String,
    },

    #[error("line {line}: expected at least {expected} fields but found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("delimiter '{delimiter}' must be a single-byte character")]
    InvalidDelimiter { delimiter: char },

    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },
}

impl ParserError {
    pub(crate) fn from_unit(line: usize, err: UnitError) -> Self {
        match err {
            UnitError::NotRecognized(symbol) => ParserError::UnitNotRecognized { line, symbol },
            UnitError::UnsupportedFamily(family) => ParserError::UnsupportedUnitFamily { family },
        }
    }

    /// 1-based line of the offending row, when the error is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParserError::UnitNotRecognized { line, .. }
            | ParserError::FlowKindNotRecognized { line, .. }
            | ParserError::InvalidNumericField { line, .. }
            | ParserError::ZeroQuantity { line, .. }
            | ParserError::MalformedRow { line, .. } => Some(*line),
            ParserError::UnsupportedUnitFamily { .. }
            | ParserError::InvalidDelimiter { .. }
            | ParserError::Csv { .. } => None,
        }
    }
}
