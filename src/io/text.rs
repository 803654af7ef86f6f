//! Whitespace-delimited text, one matrix row per line.
//!
//! Values are written in scientific notation with a two-digit signed exponent
//! (`-2.5000000000000000e-03`). Infinities and NaN are written as `Inf`,
//! `-Inf` and `NaN`; on input `inf`, `-inf` and `nan` are accepted as well.
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::config::TextFormat;
use crate::error::{MatError, Result};
use crate::math::Mat;

/// Render one value the way [`Mat::save_to`] writes it, without padding.
pub fn format_value(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Inf" } else { "-Inf" }.to_string();
    }
    let formatted = format!("{:.*e}", precision, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => formatted,
    }
}

fn parse_token(token: &str, line: usize) -> Result<f64> {
    let value = match token {
        "Inf" | "inf" => return Ok(f64::INFINITY),
        "-Inf" | "-inf" => return Ok(f64::NEG_INFINITY),
        "NaN" | "nan" => return Ok(f64::NAN),
        _ => token.parse::<f64>(),
    };
    let parse_error = || MatError::Parse {
        line,
        token: token.to_string(),
    };
    match value {
        // Reject other spellings such as "infinity" that `f64::from_str` would take.
        Ok(v) if !v.is_finite() && token.chars().any(|c| c.is_alphabetic() && c != 'e' && c != 'E') => {
            Err(parse_error())
        }
        Ok(v) => Ok(v),
        Err(_) => Err(parse_error()),
    }
}

impl Mat {
    /// Replace the contents with a matrix read from `reader`.
    ///
    /// Blank lines are skipped. Returns `Ok(false)` and leaves the matrix empty
    /// if the input holds no values. On error the matrix is also left empty.
    pub fn load_from<R: BufRead>(&mut self, reader: R) -> Result<bool> {
        self.reset();

        let mut values = Vec::new();
        let mut n_rows = 0;
        let mut n_cols = 0;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = idx + 1;
            let row = line
                .split_whitespace()
                .map(|token| parse_token(token, line_number))
                .collect::<Result<Vec<f64>>>()?;
            if row.is_empty() {
                continue;
            }
            if n_rows == 0 {
                n_cols = row.len();
            } else if row.len() != n_cols {
                return Err(MatError::RaggedInput {
                    line: line_number,
                    expected: n_cols,
                    found: row.len(),
                });
            }
            values.extend(row);
            n_rows += 1;
        }

        if n_rows == 0 {
            log::debug!("no values found, matrix left empty");
            return Ok(false);
        }

        *self = Mat::from_row_major(n_rows, n_cols, values)?;
        log::debug!("loaded ({}, {}) matrix", n_rows, n_cols);
        Ok(true)
    }

    /// Load from the file at `path`. See [`Mat::load_from`].
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<bool> {
        let path = path.as_ref();
        log::info!("loading matrix from {}", path.display());
        let file = File::open(path).map_err(|source| MatError::File {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_from(BufReader::new(file))
    }

    /// Like [`Mat::load`], but logs failures and reports them as `false`.
    pub fn quiet_load<P: AsRef<Path>>(&mut self, path: P) -> bool {
        let path = path.as_ref();
        self.load(path).unwrap_or_else(|err| {
            log::warn!("failed to load matrix from {}: {}", path.display(), err);
            false
        })
    }

    pub fn quiet_load_from<R: BufRead>(&mut self, reader: R) -> bool {
        self.load_from(reader).unwrap_or_else(|err| {
            log::warn!("failed to load matrix: {}", err);
            false
        })
    }

    pub fn save_to<W: Write>(&self, writer: W) -> Result<()> {
        self.save_to_with(writer, &TextFormat::default())
    }

    pub fn save_to_with<W: Write>(&self, mut writer: W, format: &TextFormat) -> Result<()> {
        for i in 0..self.n_rows() {
            for j in 0..self.n_cols() {
                let value = format_value(self[(i, j)], format.precision);
                // Values wider than the field still need a separator.
                let width = format.width.max(value.len() + 1);
                write!(writer, "{:>width$}", value, width = width)?;
            }
            writeln!(writer)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_with(path, &TextFormat::default())
    }

    pub fn save_with<P: AsRef<Path>>(&self, path: P, format: &TextFormat) -> Result<()> {
        let path = path.as_ref();
        log::info!("saving ({}, {}) matrix to {}", self.n_rows(), self.n_cols(), path.display());
        let file = File::create(path).map_err(|source| MatError::File {
            path: path.to_path_buf(),
            source,
        })?;
        self.save_to_with(BufWriter::new(file), format)
    }

    pub fn quiet_save<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();
        match self.save(path) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("failed to save matrix to {}: {}", path.display(), err);
                false
            }
        }
    }

    pub fn quiet_save_to<W: Write>(&self, writer: W) -> bool {
        match self.save_to(writer) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("failed to save matrix: {}", err);
                false
            }
        }
    }

    /// Write the formatted matrix (its `Display` form) to `writer`, preceded
    /// by `header` on its own line unless it is empty.
    pub fn print_to<W: Write>(&self, mut writer: W, header: &str) -> Result<()> {
        if !header.is_empty() {
            writeln!(writer, "{}", header)?;
        }
        writeln!(writer, "{}", self)?;
        writer.flush()?;
        Ok(())
    }

    /// Like [`Mat::print_to`], but values are written unpadded at full precision.
    pub fn raw_print_to<W: Write>(&self, mut writer: W, header: &str) -> Result<()> {
        if !header.is_empty() {
            writeln!(writer, "{}", header)?;
        }
        writeln!(writer, "({}, {})-matrix: [", self.n_rows(), self.n_cols())?;
        for i in 0..self.n_rows() {
            for j in 0..self.n_cols() {
                let value = self[(i, j)];
                if value.is_infinite() {
                    let sign = if value < 0.0 { "-" } else { "" };
                    write!(writer, " {}Inf", sign)?;
                } else {
                    write!(writer, " {}", value)?;
                }
            }
            writeln!(writer)?;
        }
        writeln!(writer, "]")?;
        writer.flush()?;
        Ok(())
    }

    /// [`Mat::print_to`] on standard output.
    pub fn print(&self, header: &str) -> Result<()> {
        self.print_to(io::stdout().lock(), header)
    }

    /// [`Mat::raw_print_to`] on standard output.
    pub fn raw_print(&self, header: &str) -> Result<()> {
        self.raw_print_to(io::stdout().lock(), header)
    }
}
