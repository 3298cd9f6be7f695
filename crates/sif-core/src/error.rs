use sif_data::TreeError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    #[error("Malformed time literal: {0:?}")]
    MalformedTimeLiteral(String),
    #[error("Unknown value kind: {0:?}")]
    UnknownValueKind(String),
    #[error("Vector has zero magnitude")]
    DegenerateVector,
    #[error("Incompatible operands: {left} and {right}")]
    IncompatibleOperands { left: String, right: String },
    #[error("Expected <{expected}>, found <{found}>")]
    UnexpectedNode { expected: String, found: String },
    #[error(transparent)]
    Tree(#[from] TreeError),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
