use thiserror::Error;

/// Fatal conditions of a single extraction call. Skipped rows are not errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("table body not found (no <tbody> in markup)")]
    StructureNotFound,
    #[error("table body is unterminated (no </tbody> after <tbody>)")]
    Unterminated,
    #[error("unrecognized traffic unit '{unit}' in '{input}' (source format changed?)")]
    FormatDrift { unit: String, input: String },
}
