use crate::domain::{CompareError, CompareResult};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

static NUMERIC_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?[0-9]*\.?[0-9]+([eE][-+]?[0-9]+)?$")
        .expect("numeric token pattern should compile")
});

/// Signed decimal or scientific literal such as `-1.5`, `.25`, `+3e-7`.
/// Words, `inf`, `nan`, trailing dots and Fortran `D` exponents are rejected.
pub fn is_numeric_token(token: &str) -> bool {
    NUMERIC_TOKEN.is_match(token)
}

/// Unicode whitespace plus the ASCII information separators `\x1c`..`\x1f`,
/// which whitespace-delimited output also treats as token breaks.
fn is_token_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

pub fn extract_numeric_values(path: impl AsRef<Path>) -> CompareResult<Vec<f64>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CompareError::read_input(path, source))?;
    numeric_values_from_reader(BufReader::new(file), path)
}

/// Collects numeric tokens in document order: lines top to bottom, tokens
/// left to right. `path` is only used to label errors.
pub fn numeric_values_from_reader(
    reader: impl BufRead,
    path: impl AsRef<Path>,
) -> CompareResult<Vec<f64>> {
    let path = path.as_ref();
    let mut values = Vec::new();

    for (line_index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| CompareError::read_input(path, source))?;
        let tokens = line
            .split(is_token_separator)
            .filter(|token| !token.is_empty() && is_numeric_token(token));
        for token in tokens {
            let value = token
                .parse::<f64>()
                .map_err(|_| CompareError::NumericParse {
                    path: path.to_path_buf(),
                    line: line_index + 1,
                    token: token.to_string(),
                })?;
            values.push(value);
        }
    }

    tracing::debug!(path = %path.display(), values = values.len(), "extracted numeric values");
    Ok(values)
}
