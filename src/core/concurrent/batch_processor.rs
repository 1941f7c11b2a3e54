//! Batch replay with identity-based partitioning
//!
//! This module provides the `BatchProcessor` struct, which replays batches
//! of operation records concurrently while keeping each user's operations
//! in order.
//!
//! # Design
//!
//! A batch is partitioned by identity: operations for different users run
//! in parallel tasks, operations for the same user run sequentially in
//! their original order. Combined with sequential batch handling in the
//! strategy layer this preserves per-user ordering across an entire
//! replay stream.

use std::collections::HashMap;
use std::sync::Arc;

use super::ConcurrentMiningEngine;
use crate::types::{MiningError, OperationRecord, UserId};

/// Result of replaying a single operation
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    /// The operation record that was replayed
    pub record: OperationRecord,

    /// The result of applying it
    pub result: Result<(), MiningError>,
}

/// Batch processor with identity-based partitioning
#[derive(Clone)]
pub struct BatchProcessor {
    /// Shared thread-safe engine
    engine: Arc<ConcurrentMiningEngine>,
}

impl BatchProcessor {
    /// Create a new BatchProcessor over a shared engine
    pub fn new(engine: Arc<ConcurrentMiningEngine>) -> Self {
        Self { engine }
    }

    /// Partition a batch of operations by identity
    ///
    /// Every record lands in exactly one sub-batch, and records for each
    /// identity keep their original relative order.
    pub fn partition_by_identity(
        &self,
        batch: Vec<OperationRecord>,
    ) -> HashMap<UserId, Vec<OperationRecord>> {
        let mut identity_batches: HashMap<UserId, Vec<OperationRecord>> = HashMap::new();

        for record in batch {
            identity_batches
                .entry(record.identity)
                .or_default()
                .push(record);
        }

        identity_batches
    }

    /// Replay all operations for a single identity sequentially
    ///
    /// Errors are captured per record and never stop the replay.
    pub async fn process_identity_operations(
        &self,
        operations: Vec<OperationRecord>,
    ) -> Vec<ReplayOutcome> {
        let mut outcomes = Vec::with_capacity(operations.len());

        for record in operations {
            let result = self.engine.apply(record.clone());
            outcomes.push(ReplayOutcome { record, result });
        }

        outcomes
    }

    /// Replay a batch of operations with identity-based partitioning
    ///
    /// Spawns one task per identity present in the batch and waits for all
    /// of them. Outcome order across identities is unspecified.
    pub async fn process_batch(&self, batch: Vec<OperationRecord>) -> Vec<ReplayOutcome> {
        let identity_batches = self.partition_by_identity(batch);

        let mut tasks = Vec::new();
        for (_identity, operations) in identity_batches {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move {
                processor.process_identity_operations(operations).await
            }));
        }

        let mut outcomes = Vec::new();
        for task in tasks {
            match task.await {
                Ok(identity_outcomes) => outcomes.extend(identity_outcomes),
                Err(e) => {
                    eprintln!("Replay task panicked: {:?}", e);
                }
            }
        }

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::concurrent::{
        ConcurrentAccountLedger, ConcurrentCoinCatalog, ConcurrentWithdrawalStore,
    };
    use crate::types::OperationType;
    use rust_decimal::Decimal;

    fn processor() -> BatchProcessor {
        let engine = ConcurrentMiningEngine::new(
            Arc::new(ConcurrentAccountLedger::new()),
            Arc::new(ConcurrentCoinCatalog::new()),
            Arc::new(ConcurrentWithdrawalStore::new()),
        );
        engine.seed_coins();
        BatchProcessor::new(Arc::new(engine))
    }

    fn op(op: OperationType, identity: UserId) -> OperationRecord {
        OperationRecord {
            op,
            identity,
            name: None,
            coin: None,
            amount: None,
            email: None,
        }
    }

    #[test]
    fn test_partition_by_identity_empty_batch() {
        let processor = processor();
        assert!(processor.partition_by_identity(Vec::new()).is_empty());
    }

    #[test]
    fn test_partition_by_identity_groups_and_preserves_order() {
        let processor = processor();

        let batch = vec![
            op(OperationType::Login, 1),
            op(OperationType::Login, 2),
            op(OperationType::Collect, 1),
            op(OperationType::WatchAd, 2),
            op(OperationType::WatchAd, 1),
        ];

        let partitioned = processor.partition_by_identity(batch);

        assert_eq!(partitioned.len(), 2);
        let ops_1: Vec<OperationType> = partitioned[&1].iter().map(|r| r.op).collect();
        assert_eq!(
            ops_1,
            vec![
                OperationType::Login,
                OperationType::Collect,
                OperationType::WatchAd
            ]
        );
        assert_eq!(partitioned[&2].len(), 2);
    }

    #[tokio::test]
    async fn test_process_identity_operations_in_order() {
        let processor = processor();

        let outcomes = processor
            .process_identity_operations(vec![
                op(OperationType::Login, 1),
                op(OperationType::Collect, 1),
                op(OperationType::WatchAd, 1),
            ])
            .await;

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(|o| o.result.is_ok()));
        assert_eq!(
            processor.engine.mining_status(1).unwrap(),
            Decimal::new(60, 0)
        );
    }

    #[tokio::test]
    async fn test_process_identity_operations_captures_errors() {
        let processor = processor();

        // Collect before login fails but must not stop the replay
        let outcomes = processor
            .process_identity_operations(vec![
                op(OperationType::Collect, 1),
                op(OperationType::Login, 1),
                op(OperationType::Collect, 1),
            ])
            .await;

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].result.is_err());
        assert!(outcomes[1].result.is_ok());
        assert!(outcomes[2].result.is_ok());
    }

    #[tokio::test]
    async fn test_process_batch_handles_multiple_identities() {
        let processor = processor();

        let mut batch = Vec::new();
        for identity in 1i64..=5 {
            batch.push(op(OperationType::Login, identity));
            batch.push(op(OperationType::WatchAd, identity));
            batch.push(op(OperationType::Collect, identity));
        }

        let outcomes = processor.process_batch(batch).await;

        assert_eq!(outcomes.len(), 15);
        for identity in 1i64..=5 {
            assert_eq!(
                processor.engine.mining_status(identity).unwrap(),
                Decimal::new(60, 0)
            );
        }
    }
}
