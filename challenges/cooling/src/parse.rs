//! Reader for the cell-code input format.
//!
//! ```text
//! 4 3
//! 2 0 0 0
//! 0 0 0 0
//! 0 0 3 1
//! ```
//!
//! The first two numbers are the width and height, followed by one code per
//! cell in row-major order: `0` usable, `1` blocked, `2` start, `3` end. Line
//! breaks carry no meaning; any ASCII whitespace separates tokens.

use crate::error::{Endpoint, Error};
use crate::grid::Grid;

const USABLE: u32 = 0;
const BLOCKED: u32 = 1;
const START: u32 = 2;
const END: u32 = 3;

pub fn parse_grid(input: &str) -> Result<Grid, Error> {
    let mut tokens = input.split_ascii_whitespace().enumerate();

    let mut dimension = || match tokens.next() {
        Some((position, token)) => number::<usize>(position, token),
        None => Err(Error::MissingDimensions),
    };
    let width = dimension()?;
    let height = dimension()?;

    let cells = width.checked_mul(height).ok_or_else(|| {
        Error::ResourceExhausted(format!("{}x{} grid exceeds the index space", width, height))
    })?;

    let mut builder = Grid::builder(width, height);
    let mut seen_start = false;
    let mut seen_end = false;
    for i in 0..cells {
        let (position, token) = tokens.next().ok_or(Error::UnexpectedEnd {
            expected: cells,
            found: i,
        })?;
        let (row, col) = (i / width, i % width);
        match number::<u32>(position, token)? {
            USABLE => {}
            BLOCKED => {
                builder.block(row, col);
            }
            START => {
                if seen_start {
                    return Err(Error::DuplicateEndpoint {
                        endpoint: Endpoint::Start,
                        row,
                        col,
                    });
                }
                seen_start = true;
                builder.start(row, col);
            }
            END => {
                if seen_end {
                    return Err(Error::DuplicateEndpoint {
                        endpoint: Endpoint::End,
                        row,
                        col,
                    });
                }
                seen_end = true;
                builder.end(row, col);
            }
            code => return Err(Error::UnknownCode { code, row, col }),
        }
    }

    if let Some((_, token)) = tokens.next() {
        return Err(Error::TrailingInput {
            token: token.to_string(),
        });
    }

    builder.build()
}

fn number<T: std::str::FromStr>(position: usize, token: &str) -> Result<T, Error> {
    token.parse().map_err(|_| Error::Parse {
        token: token.to_string(),
        position,
    })
}
