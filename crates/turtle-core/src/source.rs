//! Point sources: suppliers of weighted multi-dimensional points
//!
//! A [`PointSource`] yields a finite stream of points, each a vector of
//! `dimension()` doubles with an associated weight. Sources are
//! one-shot: once drained they cannot be rewound, only re-acquired.
//!
//! Two implementations are provided: [`SliceSource`] over a flat
//! row-major buffer already in memory, and [`CsvSource`] over one or
//! more CSV files with named coordinate columns.

use std::collections::VecDeque;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A finite, one-shot supplier of weighted points
pub trait PointSource {
    /// Number of coordinates per point
    fn dimension(&self) -> usize;

    /// Write the next point's coordinates into `point` and return its
    /// weight, or `Ok(None)` when the source is exhausted.
    ///
    /// `point` must have length `dimension()`. Sources that carry no
    /// weight field return a weight of `1.0` for every point. Any
    /// malformed record aborts the stream with an error.
    fn next_into(&mut self, point: &mut [f64]) -> Result<Option<f64>>;
}

/// Point source over a flat row-major coordinate buffer
///
/// Row `i` occupies `data[i * dimension .. (i + 1) * dimension]`. An
/// optional parallel weight slice supplies per-point weights; without
/// one every weight is `1.0`.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [f64],
    dimension: usize,
    weights: Option<&'a [f64]>,
    cursor: usize,
    cap: Option<usize>,
}

impl<'a> SliceSource<'a> {
    /// Create a source over a flat row-major buffer
    pub fn new(data: &'a [f64], dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(Error::InvalidParameter(
                "dimension must be at least 1".to_string(),
            ));
        }
        if data.len() % dimension != 0 {
            return Err(Error::size_mismatch(
                (data.len() / dimension) * dimension,
                data.len(),
                "slice source buffer",
            ));
        }
        Ok(Self {
            data,
            dimension,
            weights: None,
            cursor: 0,
            cap: None,
        })
    }

    /// Attach a parallel weight slice (one entry per point)
    pub fn with_weights(mut self, weights: &'a [f64]) -> Result<Self> {
        let points = self.data.len() / self.dimension;
        if weights.len() != points {
            return Err(Error::size_mismatch(points, weights.len(), "weight slice"));
        }
        self.weights = Some(weights);
        Ok(self)
    }

    /// Yield at most `cap` points
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = Some(cap);
        self
    }

    /// Total points available (before any cap)
    pub fn len(&self) -> usize {
        self.data.len() / self.dimension
    }

    /// Whether the buffer holds no points
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl PointSource for SliceSource<'_> {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn next_into(&mut self, point: &mut [f64]) -> Result<Option<f64>> {
        if point.len() != self.dimension {
            return Err(Error::dimension_mismatch(
                self.dimension,
                point.len(),
                "slice source scratch buffer",
            ));
        }
        if let Some(cap) = self.cap {
            if self.cursor >= cap {
                return Ok(None);
            }
        }
        let start = self.cursor * self.dimension;
        if start + self.dimension > self.data.len() {
            return Ok(None);
        }
        point.copy_from_slice(&self.data[start..start + self.dimension]);
        let weight = match self.weights {
            Some(w) => w[self.cursor],
            None => 1.0,
        };
        self.cursor += 1;
        Ok(Some(weight))
    }
}

struct OpenCsv {
    path: String,
    reader: csv::Reader<File>,
    coord_idx: Vec<usize>,
    weight_idx: Option<usize>,
    record: csv::StringRecord,
}

/// Point source over one or more CSV files
///
/// Files are drained in the order given, so the overall record order
/// is stable. Coordinate columns are selected by header name; an
/// optional weight column supplies per-record weights. A missing
/// column or a non-numeric field aborts the whole acquisition.
pub struct CsvSource {
    pending: VecDeque<PathBuf>,
    columns: Vec<String>,
    weight_column: Option<String>,
    cap: Option<usize>,
    yielded: usize,
    current: Option<OpenCsv>,
}

impl CsvSource {
    /// Create a source over the given files and coordinate columns
    pub fn new<P, S>(paths: &[P], columns: &[S]) -> Result<Self>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        if paths.is_empty() {
            return Err(Error::InvalidParameter(
                "at least one source file is required".to_string(),
            ));
        }
        if columns.is_empty() {
            return Err(Error::InvalidParameter(
                "at least one coordinate column is required".to_string(),
            ));
        }
        Ok(Self {
            pending: paths.iter().map(|p| p.as_ref().to_path_buf()).collect(),
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            weight_column: None,
            cap: None,
            yielded: 0,
            current: None,
        })
    }

    /// Take per-record weights from the named column
    pub fn with_weight_column(mut self, name: &str) -> Self {
        self.weight_column = Some(name.to_string());
        self
    }

    /// Yield at most `cap` records across all files
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = Some(cap);
        self
    }

    fn open(&self, path: PathBuf) -> Result<OpenCsv> {
        let display = path.display().to_string();
        let mut reader = csv::Reader::from_path(&path)?;
        let headers = reader.headers()?.clone();
        let position = |name: &str| headers.iter().position(|h| h == name);

        let mut coord_idx = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            let idx = position(column).ok_or_else(|| Error::missing_column(column, &display))?;
            coord_idx.push(idx);
        }
        let weight_idx = match &self.weight_column {
            Some(name) => {
                Some(position(name).ok_or_else(|| Error::missing_column(name, &display))?)
            }
            None => None,
        };
        log::debug!("reading points from {display}");
        Ok(OpenCsv {
            path: display,
            reader,
            coord_idx,
            weight_idx,
            record: csv::StringRecord::new(),
        })
    }
}

fn parse_field(record: &csv::StringRecord, idx: usize, path: &str) -> Result<f64> {
    let raw = record
        .get(idx)
        .ok_or_else(|| Error::Source(format!("Record in '{path}' is missing field {idx}")))?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| Error::Source(format!("Non-numeric value '{raw}' in '{path}'")))
}

impl PointSource for CsvSource {
    fn dimension(&self) -> usize {
        self.columns.len()
    }

    fn next_into(&mut self, point: &mut [f64]) -> Result<Option<f64>> {
        if point.len() != self.columns.len() {
            return Err(Error::dimension_mismatch(
                self.columns.len(),
                point.len(),
                "csv source scratch buffer",
            ));
        }
        loop {
            if let Some(cap) = self.cap {
                if self.yielded >= cap {
                    return Ok(None);
                }
            }
            if self.current.is_none() {
                match self.pending.pop_front() {
                    Some(path) => self.current = Some(self.open(path)?),
                    None => return Ok(None),
                }
            }
            let file = self.current.as_mut().expect("current file just opened");
            if file.reader.read_record(&mut file.record)? {
                for (slot, &idx) in point.iter_mut().zip(&file.coord_idx) {
                    *slot = parse_field(&file.record, idx, &file.path)?;
                }
                let weight = match file.weight_idx {
                    Some(idx) => parse_field(&file.record, idx, &file.path)?,
                    None => 1.0,
                };
                self.yielded += 1;
                return Ok(Some(weight));
            }
            // file exhausted, move on to the next one
            self.current = None;
        }
    }
}
