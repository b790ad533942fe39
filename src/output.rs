//! Output sinks for resolved places: JSON lines or CSV.

use crate::error::Result;
use crate::place::ResolvedPlace;
use std::io::Write;

pub const CSV_HEADER: [&str; 5] = [
    "place_name",
    "wikipedia_entry_title",
    "coordinates",
    "wikipedia_entry_url",
    "id",
];

pub trait ResultSink {
    fn write(&mut self, place: &ResolvedPlace) -> Result<()>;

    /// Flush buffered output. Called once after the last record.
    fn finish(&mut self) -> Result<()>;
}

/// One JSON object per line.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultSink for JsonLinesSink<W> {
    fn write(&mut self, place: &ResolvedPlace) -> Result<()> {
        serde_json::to_writer(&mut self.out, place)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// CSV with a fixed header. Coordinates are `;`-joined, blank when absent.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
}

impl<W: Write> CsvSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(out),
            header_written: false,
        }
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| crate::error::ResolveError::Io(e.into_error()))
    }
}

impl<W: Write> ResultSink for CsvSink<W> {
    fn write(&mut self, place: &ResolvedPlace) -> Result<()> {
        if !self.header_written {
            self.writer.write_record(CSV_HEADER)?;
            self.header_written = true;
        }
        let coordinates = place.coordinates.to_string();
        self.writer.write_record([
            place.place_name.as_str(),
            place.wikipedia_entry_title.as_str(),
            coordinates.as_str(),
            place.wikipedia_entry_url.as_str(),
            place.id.as_deref().unwrap_or(""),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if !self.header_written {
            self.writer.write_record(CSV_HEADER)?;
            self.header_written = true;
        }
        self.writer.flush()?;
        Ok(())
    }
}
