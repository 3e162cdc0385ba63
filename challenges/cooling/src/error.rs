use std::collections::TryReserveError;
use std::fmt;

/// One of the two distinguished cells of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::End => write!(f, "end"),
        }
    }
}

/// Error type for grid input, grid construction and search setup.
///
/// Dead branches during the search are not errors; they contribute zero paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Reading the input failed.
    Io(String),
    /// Input does not start with a width and a height.
    MissingDimensions,
    /// A token is not a non-negative integer.
    Parse { token: String, position: usize },
    /// A cell code outside `0..=3`.
    UnknownCode { code: u32, row: usize, col: usize },
    /// Input stopped before every cell was read.
    UnexpectedEnd { expected: usize, found: usize },
    /// Tokens remain after the last cell.
    TrailingInput { token: String },
    /// A second start or end cell.
    DuplicateEndpoint {
        endpoint: Endpoint,
        row: usize,
        col: usize,
    },
    /// Width or height is zero.
    EmptyGrid,
    /// Coordinates outside the `width x height` grid.
    OutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },
    MissingEndpoint(Endpoint),
    BlockedEndpoint(Endpoint),
    /// Start and end share a cell while other usable cells exist.
    CoincidentEndpoints,
    /// Scratch memory or search stack could not be obtained.
    ResourceExhausted(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
            Error::MissingDimensions => write!(f, "input must start with grid width and height"),
            Error::Parse { token, position } => {
                write!(f, "invalid number {:?} at token {}", token, position)
            }
            Error::UnknownCode { code, row, col } => write!(
                f,
                "unknown cell code {} at ({}, {}) (expected 0, 1, 2 or 3)",
                code, row, col
            ),
            Error::UnexpectedEnd { expected, found } => write!(
                f,
                "unexpected end of input: expected {} cells, found {}",
                expected, found
            ),
            Error::TrailingInput { token } => {
                write!(f, "unexpected trailing input {:?}", token)
            }
            Error::DuplicateEndpoint { endpoint, row, col } => {
                write!(f, "duplicate {} cell at ({}, {})", endpoint, row, col)
            }
            Error::EmptyGrid => write!(f, "grid width and height must be positive"),
            Error::OutOfBounds {
                row,
                col,
                width,
                height,
            } => write!(
                f,
                "cell ({}, {}) is outside the {}x{} grid",
                row, col, width, height
            ),
            Error::MissingEndpoint(endpoint) => write!(f, "grid has no {} cell", endpoint),
            Error::BlockedEndpoint(endpoint) => write!(f, "{} cell is blocked", endpoint),
            Error::CoincidentEndpoints => {
                write!(f, "start and end coincide but the grid has other usable cells")
            }
            Error::ResourceExhausted(msg) => write!(f, "resources exhausted: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Self {
        Error::ResourceExhausted(err.to_string())
    }
}
