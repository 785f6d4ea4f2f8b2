//! Arc/Info ASCII grid parsing.

use std::path::Path;

use crate::error::IoError;

/// Where the `xll`/`yll` header values sit within the lower-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Registration {
    Corner,
    Center,
}

/// A parsed ASCII grid with values in file order (north row first).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AsciiGrid {
    pub ncols: usize,
    pub nrows: usize,
    pub xll: f64,
    pub yll: f64,
    pub x_registration: Registration,
    pub y_registration: Registration,
    pub cellsize: f64,
    pub nodata: Option<f64>,
    pub values: Vec<f64>,
}

impl AsciiGrid {
    /// x coordinate of the first column's centre.
    pub(crate) fn first_x_center(&self) -> f64 {
        match self.x_registration {
            Registration::Corner => self.xll + 0.5 * self.cellsize,
            Registration::Center => self.xll,
        }
    }

    /// y coordinate of the top row's centre.
    pub(crate) fn top_y_center(&self) -> f64 {
        let bottom = match self.y_registration {
            Registration::Corner => self.yll + 0.5 * self.cellsize,
            Registration::Center => self.yll,
        };
        bottom + (self.nrows.saturating_sub(1)) as f64 * self.cellsize
    }
}

#[derive(Default)]
struct Header {
    ncols: Option<usize>,
    nrows: Option<usize>,
    xll: Option<(f64, Registration)>,
    yll: Option<(f64, Registration)>,
    cellsize: Option<f64>,
    nodata: Option<f64>,
}

/// Parse the text of an ASCII grid. `path` is used only for error messages.
pub(crate) fn parse(text: &str, path: &Path) -> Result<AsciiGrid, IoError> {
    let err = |line: usize, reason: String| IoError::ZoneParse {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut header = Header::default();
    let mut lines = text.lines().enumerate().peekable();

    while let Some(&(idx, line)) = lines.peek() {
        let mut tokens = line.split_whitespace();
        let Some(key) = tokens.next() else {
            lines.next();
            continue;
        };
        if !key.starts_with(|c: char| c.is_ascii_alphabetic()) {
            break;
        }
        let lineno = idx + 1;
        let value = tokens
            .next()
            .ok_or_else(|| err(lineno, format!("header '{key}' has no value")))?;
        let number = |v: &str| {
            v.parse::<f64>()
                .map_err(|_| err(lineno, format!("header '{key}' value '{v}' is not a number")))
        };
        let count = |v: &str| {
            v.parse::<usize>()
                .map_err(|_| err(lineno, format!("header '{key}' value '{v}' is not a count")))
        };
        match key.to_ascii_lowercase().as_str() {
            "ncols" => header.ncols = Some(count(value)?),
            "nrows" => header.nrows = Some(count(value)?),
            "xllcorner" => header.xll = Some((number(value)?, Registration::Corner)),
            "xllcenter" => header.xll = Some((number(value)?, Registration::Center)),
            "yllcorner" => header.yll = Some((number(value)?, Registration::Corner)),
            "yllcenter" => header.yll = Some((number(value)?, Registration::Center)),
            "cellsize" => header.cellsize = Some(number(value)?),
            "nodata_value" => header.nodata = Some(number(value)?),
            other => return Err(err(lineno, format!("unknown header key '{other}'"))),
        }
        lines.next();
    }

    let body_line = lines.peek().map_or(text.lines().count() + 1, |&(i, _)| i + 1);
    let missing = |name: &str| err(body_line, format!("missing header '{name}'"));
    let ncols = header.ncols.ok_or_else(|| missing("ncols"))?;
    let nrows = header.nrows.ok_or_else(|| missing("nrows"))?;
    let (xll, x_reg) = header.xll.ok_or_else(|| missing("xllcorner"))?;
    let (yll, y_reg) = header.yll.ok_or_else(|| missing("yllcorner"))?;
    let cellsize = header.cellsize.ok_or_else(|| missing("cellsize"))?;
    if cellsize <= 0.0 {
        return Err(err(body_line, format!("cellsize must be positive, got {cellsize}")));
    }

    let expected = ncols
        .checked_mul(nrows)
        .ok_or_else(|| err(body_line, format!("grid of {nrows} x {ncols} cells is too large")))?;

    let mut values = Vec::new();
    for (idx, line) in lines {
        for token in line.split_whitespace() {
            let v = token.parse::<f64>().map_err(|_| {
                err(idx + 1, format!("value '{token}' is not a number"))
            })?;
            values.push(v);
        }
    }
    if values.len() != expected {
        return Err(err(
            body_line,
            format!(
                "expected {expected} values ({nrows} rows x {ncols} cols), found {}",
                values.len()
            ),
        ));
    }

    Ok(AsciiGrid {
        ncols,
        nrows,
        xll,
        yll,
        x_registration: x_reg,
        y_registration: y_reg,
        cellsize,
        nodata: header.nodata,
        values,
    })
}
