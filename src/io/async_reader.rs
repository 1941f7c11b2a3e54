//! Asynchronous CSV reader with batch interface
//!
//! Provides a streaming interface over operation records from a CSV
//! source. Supports batch reading for efficient async replay.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - tokio for async runtime and concurrency primitives
//! - Batch reading so the replay pipeline works in chunks
//!
//! # Architecture
//!
//! ```text
//! CSV source → AsyncReader → Batches of OperationRecords
//!                  ↓
//!           csv_format module
//!           (OpCsvRecord, convert_op_record)
//! ```

use crate::io::csv_format::{convert_op_record, OpCsvRecord};
use crate::types::OperationRecord;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous CSV reader
///
/// Provides a batch reading interface over operation records.
/// Maintains streaming behavior with constant memory usage.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader }
    }

    /// Read a batch of operation records
    ///
    /// Reads up to `batch_size` records, converting each to an
    /// OperationRecord. Invalid records are logged to stderr and skipped.
    /// Returns an empty vector at end of input.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<OperationRecord> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<OpCsvRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(csv_record)) => match convert_op_record(csv_record) {
                    Ok(operation_record) => batch.push(operation_record),
                    Err(e) => eprintln!("Record conversion error: {}", e),
                },
                Some(Err(e)) => eprintln!("CSV parse error: {}", e),
                None => break,
            }
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OperationType;
    use futures::io::Cursor;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_async_reader_read_batch() {
        let csv_content = "op,identity,name,coin,amount,email\n\
            login,1001,alice,,,\n\
            collect,1001,,,,\n\
            ad,1002,,,,\n";
        let reader = Cursor::new(csv_content.as_bytes());
        let mut async_reader = AsyncReader::new(reader);

        let batch = async_reader.read_batch(2).await;
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].op, OperationType::Login);
        assert_eq!(batch[0].identity, 1001);
        assert_eq!(batch[1].op, OperationType::Collect);

        let batch = async_reader.read_batch(2).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].identity, 1002);
    }

    #[tokio::test]
    async fn test_async_reader_empty_csv() {
        let csv_content = "op,identity,name,coin,amount,email\n";
        let reader = Cursor::new(csv_content.as_bytes());
        let mut async_reader = AsyncReader::new(reader);

        let batch = async_reader.read_batch(10).await;
        assert_eq!(batch.len(), 0);
    }

    #[tokio::test]
    async fn test_async_reader_skips_invalid_records() {
        let csv_content = "op,identity,name,coin,amount,email\n\
            transfer,1001,,,,\n\
            collect,1001,,,,\n";
        let reader = Cursor::new(csv_content.as_bytes());
        let mut async_reader = AsyncReader::new(reader);

        // The invalid operation is logged to stderr and skipped
        let batch = async_reader.read_batch(10).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].op, OperationType::Collect);
    }

    #[tokio::test]
    async fn test_async_reader_parses_withdrawal_fields() {
        let csv_content = "op,identity,name,coin,amount,email\n\
            withdraw,1001,,TRX,150,alice@example.com\n";
        let reader = Cursor::new(csv_content.as_bytes());
        let mut async_reader = AsyncReader::new(reader);

        let batch = async_reader.read_batch(10).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].coin.as_deref(), Some("TRX"));
        assert_eq!(batch[0].amount, Some(Decimal::new(150, 0)));
        assert_eq!(batch[0].email.as_deref(), Some("alice@example.com"));
    }

    #[tokio::test]
    async fn test_async_reader_batch_size_larger_than_records() {
        let csv_content = "op,identity,name,coin,amount,email\nlogin,1,,,,\n";
        let reader = Cursor::new(csv_content.as_bytes());
        let mut async_reader = AsyncReader::new(reader);

        let batch = async_reader.read_batch(100).await;
        assert_eq!(batch.len(), 1);
    }
}
