//! Counts the ways to lay a cooling duct through a datacenter floor.
//!
//! The floor is a rectangular grid of rooms. Some rooms are not ours and are
//! blocked. The duct enters at a start room, leaves at an end room, and must
//! pass through every usable room exactly once. That makes each layout a
//! Hamiltonian path on the 4-connected grid, and [`count_paths`] returns how
//! many exist.
//!
//! ```
//! use cooling::{count_paths, parse_grid};
//!
//! let grid = parse_grid("4 3\n2 0 0 0\n0 0 0 0\n0 0 3 1").unwrap();
//! assert_eq!(count_paths(&grid).unwrap(), 2);
//! ```

use std::io::{BufRead, Read, Write};

use log::{debug, info};

pub mod bits;
pub mod error;
pub mod grid;
pub mod parse;
pub mod search;

pub use error::Error;
pub use grid::{Cell, Grid, GridBuilder};
pub use parse::parse_grid;
pub use search::{count_paths, count_paths_with, Pruning, Search, SearchStats};

/// Input reader over any buffered source.
pub struct Scanner {
    reader: Box<dyn BufRead>,
}

impl Scanner {
    pub fn new(reader: impl BufRead + 'static) -> Self {
        Self {
            reader: Box::new(reader),
        }
    }

    /// Reads everything that is left.
    pub fn read_all(&mut self) -> Result<String, Error> {
        let mut input = String::new();
        self.reader.read_to_string(&mut input)?;
        Ok(input)
    }
}

/// Output writer (writes to memory buffer)
pub struct Writer(Vec<u8>);

impl Writer {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn println<T: std::fmt::Display>(&mut self, value: T) {
        // writing into a Vec cannot fail
        let _ = writeln!(self.0, "{}", value);
    }

    pub fn into_string(self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.0)
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads one grid, counts its duct layouts with every pruning check on, and
/// prints the count.
pub fn solve(scan: &mut Scanner, out: &mut Writer) -> Result<(), Error> {
    solve_with(scan, out, Pruning::default()).map(|_| ())
}

pub fn solve_with(
    scan: &mut Scanner,
    out: &mut Writer,
    pruning: Pruning,
) -> Result<SearchStats, Error> {
    let grid = parse_grid(&scan.read_all()?)?;
    info!(
        "{}x{} floor, {} usable rooms",
        grid.width(),
        grid.height(),
        grid.target_length()
    );
    debug!("floor plan:\n{}", grid);

    let stats = search::search(&grid, pruning)?;
    out.println(stats.paths);
    Ok(stats)
}

/// Test utilities for running and verifying data cases
pub mod testing {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    fn case_dir(category: &str) -> PathBuf {
        PathBuf::from("data").join(category)
    }

    /// Discover all case numbers in `data/<category>`
    pub fn discover_tests(category: &str) -> Vec<usize> {
        let mut test_numbers = Vec::new();
        if let Ok(entries) = fs::read_dir(case_dir(category)) {
            for entry in entries.flatten() {
                if let Some(num) = entry
                    .file_name()
                    .to_str()
                    .and_then(|name| name.strip_suffix(".in"))
                    .and_then(|num| num.parse::<usize>().ok())
                {
                    test_numbers.push(num);
                }
            }
        }

        test_numbers.sort_unstable();
        test_numbers
    }

    /// Run a single case and return (expected, actual, duration) output
    pub fn run_test_case<F>(
        category: &str,
        test_num: usize,
        solve_fn: F,
    ) -> Result<(String, String, Duration), String>
    where
        F: FnOnce(&mut Scanner, &mut Writer) -> Result<(), Error>,
    {
        let dir = case_dir(category);
        let in_file = dir.join(format!("{}.in", test_num));
        let out_file = dir.join(format!("{}.out", test_num));

        let input = fs::read_to_string(&in_file)
            .map_err(|e| format!("Failed to read {}: {}", in_file.display(), e))?;
        let expected = fs::read_to_string(&out_file)
            .map_err(|e| format!("Failed to read {}: {}", out_file.display(), e))?;

        let mut scanner = Scanner::new(Cursor::new(input));
        let mut writer = Writer::new();

        let start = Instant::now();
        solve_fn(&mut scanner, &mut writer).map_err(|e| e.to_string())?;
        let duration = start.elapsed();

        let actual = writer
            .into_string()
            .map_err(|e| format!("Output is not valid UTF-8: {}", e))?;

        Ok((
            expected.trim().to_string(),
            actual.trim().to_string(),
            duration,
        ))
    }

    /// Verify all cases in a category
    pub fn verify_all_tests<F>(category: &str, solve_fn: F)
    where
        F: Fn(&mut Scanner, &mut Writer) -> Result<(), Error>,
    {
        let test_cases = discover_tests(category);
        assert!(!test_cases.is_empty(), "No test cases found for {}", category);

        let mut total_duration = Duration::ZERO;

        for test_num in test_cases {
            match run_test_case(category, test_num, &solve_fn) {
                Ok((expected, actual, duration)) => {
                    total_duration += duration;
                    assert_eq!(
                        actual,
                        expected,
                        "Test case {} failed (took {:.2}s)\nExpected:\n{}\nActual:\n{}",
                        test_num,
                        duration.as_secs_f64(),
                        expected,
                        actual
                    );
                }
                Err(e) => panic!("Test case {} error: {}", test_num, e),
            }
        }

        println!("Total time: {:.2}s", total_duration.as_secs_f64());
    }

    /// Run all cases and print results (for CLI usage). Returns the number
    /// of failed cases.
    pub fn run_all_tests<F>(category: &str, solve_fn: F) -> usize
    where
        F: Fn(&mut Scanner, &mut Writer) -> Result<(), Error>,
    {
        let test_cases = discover_tests(category);
        if test_cases.is_empty() {
            println!("No test cases found for {}", category);
            return 0;
        }

        println!("Running {} test cases for {}...", test_cases.len(), category);

        let mut passed = 0;
        let mut failed = 0;
        let mut total_duration = Duration::ZERO;

        for test_num in &test_cases {
            match run_test_case(category, *test_num, &solve_fn) {
                Ok((expected, actual, duration)) => {
                    total_duration += duration;
                    let secs = duration.as_secs_f64();
                    if actual == expected {
                        println!("✓ Test case {}: PASSED ({:.2}s)", test_num, secs);
                        passed += 1;
                    } else {
                        println!("✗ Test case {}: FAILED ({:.2}s)", test_num, secs);
                        println!("  Expected: {}", expected);
                        println!("  Actual:   {}", actual);
                        failed += 1;
                    }
                }
                Err(e) => {
                    println!("✗ Test case {}: ERROR - {}", test_num, e);
                    failed += 1;
                }
            }
        }

        println!("\nResults: {} passed, {} failed", passed, failed);
        println!("Total time: {:.2}s", total_duration.as_secs_f64());
        failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_data_cases() {
        testing::verify_all_tests("cooling", solve);
    }

    #[test]
    #[ignore = "takes seconds even in release builds"]
    fn test_reference_floor() {
        testing::verify_all_tests("reference", solve);
    }

    #[test]
    fn test_solve_reports_errors() {
        let mut scan = Scanner::new(Cursor::new("2 2 2 0 0 9"));
        let mut out = Writer::new();
        assert_eq!(
            solve(&mut scan, &mut out),
            Err(Error::UnknownCode {
                code: 9,
                row: 1,
                col: 1
            })
        );
        assert_eq!(out.into_string().unwrap(), "");
    }

    #[test]
    fn test_scanner_reads_rest() {
        let mut scan = Scanner::new(Cursor::new("4 3\n2 0 0 0\n"));
        assert_eq!(scan.read_all().unwrap(), "4 3\n2 0 0 0\n");
        assert_eq!(scan.read_all().unwrap(), "");
    }
}
