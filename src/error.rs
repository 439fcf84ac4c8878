use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("unknown node: {0}")]
    UnknownNode(String),
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("adjacency matrix is empty")]
    Empty,

    #[error("line {line}: expected {expected} fields, found {found}")]
    RowLength {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}, column {column}: edge marked in a column without a node name")]
    UnnamedColumn { line: usize, column: usize },

    #[error("line {line}: {source}")]
    Lookup {
        line: usize,
        #[source]
        source: GraphError,
    },

    #[error("pool line {line}: expected `node,node,label`, found {found} fields")]
    PoolRow { line: usize, found: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
