use thiserror::Error;

/// Coarse error category, for callers that branch on the failure class
/// rather than on the individual variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed grammar source.
    Format,
    /// The grammar is not LL(1): two productions claimed the same table cell.
    Conflict,
    /// The input stream does not belong to the grammar's language.
    Syntax,
    /// A token source could not be decoded.
    Adapter,
    /// A stack or table invariant was violated. Unreachable for grammars
    /// built through the public constructors.
    Internal,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("LL(1) conflict at table[{nonterminal}][{lookahead}]")]
    Conflict {
        nonterminal: String,
        lookahead: String,
    },

    #[error("syntax error at token {position}: expected {expected}, got {found}")]
    UnexpectedToken {
        position: usize,
        expected: String,
        found: String,
    },

    #[error("syntax error at token {position}: no production for ({nonterminal}, {lookahead})")]
    NoProduction {
        position: usize,
        nonterminal: String,
        lookahead: String,
    },

    #[error("line {line}: malformed coded token line: {content}")]
    TokenLine { line: usize, content: String },

    #[error("unknown token code {code}")]
    UnknownCode { code: u32 },

    #[error("cannot read {path}: {message}")]
    Read { path: String, message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Format { .. } => ErrorKind::Format,
            Error::Conflict { .. } => ErrorKind::Conflict,
            Error::UnexpectedToken { .. } | Error::NoProduction { .. } => ErrorKind::Syntax,
            Error::TokenLine { .. } | Error::UnknownCode { .. } | Error::Read { .. } => {
                ErrorKind::Adapter
            }
            Error::Internal { .. } => ErrorKind::Internal,
        }
    }

    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Error::Format {
            line,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }
}
