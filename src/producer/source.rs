//! Candidate record sources

use crate::store::Record;

/// Supplies one candidate record per tick
///
/// Keys are expected to be fresh each time, but the store still rejects
/// duplicates if a source repeats itself.
pub trait RecordSource: Send + 'static {
    /// Build the candidate for the next tick
    fn next_record(&mut self) -> Record;
}

impl<F> RecordSource for F
where
    F: FnMut() -> Record + Send + 'static,
{
    fn next_record(&mut self) -> Record {
        self()
    }
}
