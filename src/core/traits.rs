//! Injected capabilities for the rewards engine
//!
//! The engine depends on two external collaborators that production wires
//! in at startup: a cache invalidation hook and a payout provider. Both are
//! modeled as traits so deployments without a cache or a payment
//! integration run against the no-op implementations below.

use crate::types::{MiningError, UserId, Withdrawal};

/// Cache invalidation hook
///
/// Called after every balance mutation so a read-side cache never serves a
/// stale balance. Invalidation is best-effort: implementations must not
/// fail the calling operation.
pub trait CacheInvalidator: Send + Sync {
    /// Drop any cached entries for the identity
    fn invalidate(&self, identity: UserId);
}

/// Cache invalidator used when no cache is configured
pub struct NoopCache;

impl CacheInvalidator for NoopCache {
    fn invalidate(&self, _identity: UserId) {}
}

/// Payout platform integration
///
/// A provider accepts a withdrawal record and returns an opaque reference
/// identifying the submission on the platform side. The operator flow that
/// approves withdrawals is the only caller.
pub trait PayoutProvider: Send + Sync {
    /// Submit a withdrawal to the payout platform
    ///
    /// # Errors
    ///
    /// Returns `PayoutUnavailable` when the platform cannot accept the
    /// submission.
    fn submit(&self, withdrawal: &Withdrawal) -> Result<String, MiningError>;
}

/// Payout provider used when no platform integration is configured
///
/// Every submission fails with `PayoutUnavailable` for the withdrawal's
/// own platform name.
pub struct UnconfiguredPayout;

impl PayoutProvider for UnconfiguredPayout {
    fn submit(&self, withdrawal: &Withdrawal) -> Result<String, MiningError> {
        Err(MiningError::payout_unavailable(&withdrawal.platform))
    }
}
