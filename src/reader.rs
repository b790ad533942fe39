//! Input readers yielding `{id, place_name}` records.
//!
//! Readers are chosen by file extension through a [`ReaderRegistry`]. New
//! formats register a constructor; nothing is discovered implicitly.

use crate::error::{ResolveError, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceRecord {
    pub id: Option<String>,
    pub place_name: String,
}

impl PlaceRecord {
    pub fn new(place_name: impl Into<String>) -> Self {
        Self {
            id: None,
            place_name: place_name.into(),
        }
    }
}

pub type PlaceIter = Box<dyn Iterator<Item = Result<PlaceRecord>>>;

/// A finite, single-pass source of place records.
pub trait PlaceSource {
    fn read_places(self: Box<Self>) -> Result<PlaceIter>;
}

/// Column selection for tabular inputs.
#[derive(Debug, Clone, Default)]
pub struct ReaderOptions {
    pub id_column: Option<String>,
    pub place_column: Option<String>,
}

pub const DEFAULT_PLACE_COLUMN: &str = "place_name";
pub const DEFAULT_ID_COLUMN: &str = "id";

// ─── Plain text ─────────────────────────────────────────────────

/// One place name per line. Lines are trimmed, blank lines skipped.
pub struct TextReader {
    path: PathBuf,
}

impl TextReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PlaceSource for TextReader {
    fn read_places(self: Box<Self>) -> Result<PlaceIter> {
        let file = File::open(&self.path)?;
        // A read error ends the stream: some (EISDIR) repeat on every call.
        let lines = BufReader::new(file)
            .lines()
            .scan(false, |failed, line| {
                if *failed {
                    return None;
                }
                Some(match line {
                    Ok(line) => {
                        let name = line.trim();
                        (!name.is_empty()).then(|| Ok(PlaceRecord::new(name)))
                    }
                    Err(e) => {
                        *failed = true;
                        Some(Err(ResolveError::Io(e)))
                    }
                })
            })
            .flatten();
        Ok(Box::new(lines))
    }
}

// ─── CSV ────────────────────────────────────────────────────────

/// Comma-separated file with a header row.
///
/// The place column defaults to `place_name`. The id column defaults to `id`
/// when such a header exists; an explicitly named id column must exist.
pub struct CsvReader {
    path: PathBuf,
    options: ReaderOptions,
}

impl CsvReader {
    pub fn new(path: impl Into<PathBuf>, options: ReaderOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

impl PlaceSource for CsvReader {
    fn read_places(self: Box<Self>) -> Result<PlaceIter> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let headers = reader.headers()?.clone();

        let place_column = self
            .options
            .place_column
            .as_deref()
            .unwrap_or(DEFAULT_PLACE_COLUMN);
        let place_idx = column_index(&headers, place_column)
            .ok_or_else(|| ResolveError::MissingColumn(place_column.to_string()))?;

        let id_idx = match self.options.id_column.as_deref() {
            Some(name) => Some(
                column_index(&headers, name)
                    .ok_or_else(|| ResolveError::MissingColumn(name.to_string()))?,
            ),
            None => column_index(&headers, DEFAULT_ID_COLUMN),
        };

        let records = reader.into_records().filter_map(move |row| {
            let row = match row {
                Ok(row) => row,
                Err(e) => return Some(Err(ResolveError::Csv(e))),
            };
            let name = row.get(place_idx).unwrap_or("").trim();
            if name.is_empty() {
                return None;
            }
            let id = id_idx
                .and_then(|i| row.get(i))
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());
            Some(Ok(PlaceRecord {
                id,
                place_name: name.to_string(),
            }))
        });
        Ok(Box::new(records))
    }
}

// ─── Registry ───────────────────────────────────────────────────

pub type ReaderFactory = fn(&Path, &ReaderOptions) -> Box<dyn PlaceSource>;

pub struct ReaderRegistry {
    readers: BTreeMap<String, ReaderFactory>,
}

impl Default for ReaderRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("txt", |path, _| Box::new(TextReader::new(path)));
        registry.register("csv", |path, opts| Box::new(CsvReader::new(path, opts.clone())));
        registry
    }
}

impl ReaderRegistry {
    pub fn empty() -> Self {
        Self {
            readers: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, extension: &str, factory: ReaderFactory) {
        self.readers.insert(extension.to_lowercase(), factory);
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.readers.keys().map(String::as_str)
    }

    /// Pick a reader by the file's extension (case-insensitive).
    pub fn open(&self, path: &Path, options: &ReaderOptions) -> Result<Box<dyn PlaceSource>> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let factory = self
            .readers
            .get(&extension)
            .ok_or_else(|| ResolveError::UnknownFileFormat(extension.clone()))?;
        Ok(factory(path, options))
    }
}
