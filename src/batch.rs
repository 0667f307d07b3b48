use indicatif::ProgressBar;
use log::info;

use crate::error::GeocodeError;
use crate::models::{AddressInput, BatchRequest, GeocodeRequestRecord};

pub struct Batcher {
    pub batch_size: usize,
}

impl Batcher {
    pub fn new(batch_size: usize) -> Result<Self, GeocodeError> {
        if batch_size == 0 {
            return Err(GeocodeError::InvalidBatchSize);
        }
        Ok(Self { batch_size })
    }

    /// Splits the addresses into groups of `batch_size`, the last one possibly
    /// smaller. Yields nothing for empty input.
    pub fn split<'a>(
        &self,
        items: &'a [AddressInput],
    ) -> impl Iterator<Item = &'a [AddressInput]> + 'a {
        items.chunks(self.batch_size)
    }

    /// Number of requests needed to send `total` addresses.
    pub fn total_batches(&self, total: usize) -> usize {
        total.div_ceil(self.batch_size)
    }
}

impl BatchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: GeocodeRequestRecord) {
        self.locations.location.push(record);
    }

    pub fn from_chunk(chunk: &[AddressInput]) -> Self {
        let mut request = Self::new();
        for address in chunk {
            request.push(address.to_request_record());
        }
        request
    }

    pub fn len(&self) -> usize {
        self.locations.location.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.location.is_empty()
    }
}

/// Progress counters for a batch run
pub struct BatchProgress {
    pub total_batches: usize,
    pub batches_processed: usize,
    pub records_processed: usize,
    progress_bar: ProgressBar,
}

impl BatchProgress {
    pub fn new(total_records: usize, total_batches: usize) -> Self {
        Self {
            total_batches,
            batches_processed: 0,
            records_processed: 0,
            progress_bar: ProgressBar::new(total_records as u64),
        }
    }

    pub fn start_batch(&self) {
        info!("Processing batch {} / {}", self.batches_processed + 1, self.total_batches);
    }

    pub fn record(&mut self, batch_len: usize) {
        self.batches_processed += 1;
        self.records_processed += batch_len;
        self.progress_bar.inc(batch_len as u64);
    }

    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
        info!("Total records processed: {}", self.records_processed);
    }
}
