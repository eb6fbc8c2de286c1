//! Backend seam between the workload drivers and the transactional service.

use eyre::Result;

/// One escalation tier of the decision-evaluation entry points.
///
/// Level 0 takes the full parameter set; each higher level drops trailing
/// parameters down to level 3, which takes only the drone identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Zero,
    One,
    Two,
    Three,
}

impl Level {
    /// All levels in ascending order; the drivers process them in this order.
    pub const ALL: [Self; 4] = [Self::Zero, Self::One, Self::Two, Self::Three];

    pub fn index(self) -> usize {
        match self {
            Self::Zero => 0,
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

/// Parameters of a decision call. Higher levels ignore the trailing fields.
#[derive(Debug, Clone)]
pub struct DecisionRequest {
    pub drone_id: u64,
    pub drone_name: String,
    pub zone: u64,
    pub window_start: String,
    pub window_end: String,
    pub granted: bool,
}

impl Default for DecisionRequest {
    fn default() -> Self {
        Self {
            drone_id: 0,
            drone_name: "TestDrone".to_owned(),
            zone: 1,
            window_start: "00:00:00".to_owned(),
            window_end: "23:59:59".to_owned(),
            granted: true,
        }
    }
}

/// Confirmation record for one submitted call.
#[derive(Debug, Clone)]
pub struct CallReceipt {
    pub gas_used: u64,
    /// Hex transaction identifier as reported by the backend.
    pub tx_hash: String,
}

/// Transactional backend the workload drivers run against.
///
/// Every method submits (or reads) and awaits confirmation before
/// returning; the drivers never hold more than one call in flight.
#[async_trait::async_trait]
pub trait AccessControlBackend {
    /// Submit one decision call against the aggregator and await its receipt.
    async fn evaluate(&self, level: Level, request: &DecisionRequest) -> Result<CallReceipt>;

    /// Read-only check whether a drone is registered.
    async fn drone_exists(&self, drone_id: u64) -> Result<bool>;

    /// Register a drone in the given zone.
    async fn create_drone(&self, name: &str, zone: u64) -> Result<CallReceipt>;

    /// Read-only check whether a zone policy exists.
    async fn policy_exists(&self, zone: u64) -> Result<bool>;

    /// Create an access policy for a zone and time window.
    async fn create_policy(
        &self,
        zone: u64,
        window_start: &str,
        window_end: &str,
    ) -> Result<CallReceipt>;
}
