//! Test-data setup for workload runs.

use eyre::{Result, WrapErr};
use tracing::info;

use crate::backend::{AccessControlBackend, DecisionRequest};

/// Ensures the benchmark drone and zone policy exist before a workload run.
///
/// Existence is checked with read-only calls; creation only happens when a
/// fixture is absent. A creation failure is fatal here, unlike workload
/// failures, because every later measurement depends on these records.
pub async fn ensure<B: AccessControlBackend + ?Sized>(
    backend: &B,
    request: &DecisionRequest,
) -> Result<()> {
    if backend.drone_exists(request.drone_id).await? {
        info!(drone_id = request.drone_id, "benchmark drone already registered");
    } else {
        backend
            .create_drone(&request.drone_name, request.zone)
            .await
            .wrap_err("failed to create benchmark drone")?;
        println!("✓ Test drone created");
    }

    if backend.policy_exists(request.zone).await? {
        info!(zone = request.zone, "benchmark policy already registered");
    } else {
        backend
            .create_policy(request.zone, &request.window_start, &request.window_end)
            .await
            .wrap_err("failed to create benchmark policy")?;
        println!("✓ Test policy created");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedBackend;

    #[tokio::test]
    async fn creates_missing_fixtures_once() {
        let backend = ScriptedBackend::succeeding();
        let request = DecisionRequest::default();

        ensure(&backend, &request).await.unwrap();
        ensure(&backend, &request).await.unwrap();

        // The second run sees both fixtures and creates nothing new.
        assert_eq!(*backend.drones_created.lock().unwrap(), 1);
        assert_eq!(*backend.policies_created.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn existing_fixtures_are_left_alone() {
        let backend = ScriptedBackend::succeeding().with_fixtures_present();

        ensure(&backend, &DecisionRequest::default()).await.unwrap();

        assert_eq!(*backend.drones_created.lock().unwrap(), 0);
        assert_eq!(*backend.policies_created.lock().unwrap(), 0);
    }
}
