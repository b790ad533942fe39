//! Batch driver: resolves input records one at a time, in input order.

use crate::error::{ResolveError, Result};
use crate::output::ResultSink;
use crate::place::{PlaceResolver, ResolvedPlace, SearchIndex};
use crate::reader::PlaceRecord;
use tracing::error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub written: usize,
    pub failed: usize,
}

/// Resolve every record and write one result per readable record.
///
/// A failed lookup is logged and written as a blank record. Unparseable input
/// rows are skipped. Both count as failures. An I/O error on the input or
/// any error from the sink aborts the batch.
pub fn run_batch<I, S>(
    resolver: &PlaceResolver<I>,
    places: impl IntoIterator<Item = Result<PlaceRecord>>,
    sink: &mut S,
) -> Result<BatchReport>
where
    I: SearchIndex,
    S: ResultSink + ?Sized,
{
    let mut report = BatchReport::default();

    for record in places {
        let record = match record {
            Ok(record) => record,
            Err(e @ ResolveError::Io(_)) => return Err(e),
            Err(e) => {
                error!("Skipping unreadable input record: {}", e);
                report.failed += 1;
                continue;
            }
        };

        let place = resolver.resolve_record(&record).unwrap_or_else(|e| {
            error!("Lookup failed for '{}': {}", record.place_name, e);
            report.failed += 1;
            ResolvedPlace::blank(&record.place_name).with_id(record.id.clone())
        });

        sink.write(&place)?;
        report.written += 1;
    }

    sink.finish()?;
    Ok(report)
}
