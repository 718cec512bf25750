use std::path::PathBuf;

use thiserror::Error;

use crate::verb::FlatField;

/// Why a [`VerbWithContext`](crate::verb::VerbWithContext) could not be said.
///
/// `Err*` style variants are avoidable programming errors, `Invalid*` style
/// variants are well formed verbs that English has no way to say.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VerbSayError {
    // deep converter
    #[error("relative clauses can only contain finite verbs")]
    RelClausesCanOnlyContainFinite,

    // deep saying
    #[error("verb has unset fields")]
    HasUnsetFields,
    #[error("zero-relative clauses can't hold pro-verbs")]
    RelativeProVerbConflict,
    #[error("only finite verbs can be split")]
    CanOnlySplitFinite,
    #[error("non-finite verbs must have indicative modality")]
    NonFiniteModalityMustBeIndicative,

    // deep slicing
    #[error("no verb words to slice")]
    NoVerbWords,
    #[error("more than one `not` in the verb words")]
    MultipleNots,
    #[error("there is no conditional form of this modality")]
    ConditionalFormOfModalityDne,

    // surface converter
    #[error("can't have both a modal verb and a non-indicative mood")]
    CantHaveBothModalsAndNonInd,
    #[error("imperatives are 2nd person only")]
    ImperativesAre2ndPerson,
    #[error("surface tense doesn't go with the mood")]
    SurfaceTenseNotOkWithMood,
    #[error("non-finite verbs can't have moods or modals")]
    NonFinitesCantHaveMoodsOrModals,

    // surface saying
    #[error("modal `{0}` has no known past tense")]
    ModalIsUnknown(String),
    #[error("no conjugation pattern resolves for lemma `{0}`")]
    UnconjugatableLemma(String),
}

/// Errors from the whitespace grid table parser.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("a table needs a header line and at least one row, got {0} line(s)")]
    TooFewLines(usize),
    #[error("row {row} has {got} cells, expected {expected}")]
    Dimensions {
        row: usize,
        got: usize,
        expected: usize,
    },
    #[error("duplicate row key: {0}")]
    DuplicateRowKey(String),
    #[error("duplicate column key: {0}")]
    DuplicateColumnKey(String),
    #[error("row keys don't match\n  expected: {expected:?}\n  got: {got:?}")]
    RowKeys {
        expected: Vec<String>,
        got: Vec<String>,
    },
    #[error("column keys don't match\n  expected: {expected:?}\n  got: {got:?}")]
    ColumnKeys {
        expected: Vec<String>,
        got: Vec<String>,
    },
}

/// Everything that can keep a [`VerbManager`](crate::VerbManager) from coming up.
#[derive(Error, Debug)]
pub enum InitError {
    #[error("failed to read or write `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed table in `{path}`: {source}")]
    Table { path: PathBuf, source: TableError },
    #[error("malformed conjugation spec at {path}:{line}: {reason}")]
    ConjugationLine {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("the conjugation spec list is empty")]
    NoConjugations,
    #[error("bad modalities table: {0}")]
    Modalities(String),
    #[error("bad modal past tense table: {0}")]
    ModalPastTense(String),
    #[error("failed to (de)serialize lookup tables at `{path}`: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{field:?} has {count} options, at most 255 can be enumerated")]
    TooManyOptions { field: FlatField, count: usize },
    #[error("failed to conjugate an auxiliary: {0}")]
    UnconjugatableAuxiliary(#[from] VerbSayError),
}

impl InitError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| InitError::Io { path, source }
    }
}
