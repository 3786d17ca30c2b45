//! Check-in and check-out orchestration.
//!
//! A submission resolves the PIN, picks the time (caller override or clock),
//! waits the configured commit delay, and only then writes to the store. The
//! wait can be cancelled and is bounded by a timeout; in either case nothing
//! is committed. The store lock is never held across the wait.

use std::future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{watch, RwLock};
use tracing::{info, warn};

use crate::calculation::{calculate_late_penalty, LatePenaltyResult, LatePolicy};
use crate::config::SubmissionSettings;
use crate::error::{KioskError, KioskResult};
use crate::models::{AttendanceRecord, ClockTime, Employee, NewAttendanceRecord, Photo};
use crate::store::AttendanceStore;

use super::clock::Clock;

/// The store shared between the kiosk and admin surfaces.
pub type SharedStore = Arc<RwLock<AttendanceStore>>;

/// A check-in or check-out as submitted at the kiosk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckRequest {
    /// The employee's PIN.
    pub pin: String,
    /// Time override; the clock is read when absent.
    #[serde(default)]
    pub time: Option<ClockTime>,
    /// Captured photo.
    #[serde(default)]
    pub photo: Photo,
}

/// Cancels a pending submission.
#[derive(Debug)]
pub struct CancelHandle(watch::Sender<bool>);

impl CancelHandle {
    /// Signals cancellation. Has no effect once the submission committed.
    pub fn cancel(&self) {
        self.0.send_replace(true);
    }
}

/// Observed by a pending submission to learn it was cancelled.
#[derive(Debug, Clone)]
pub struct CancelSignal(watch::Receiver<bool>);

impl CancelSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        let (_, receiver) = watch::channel(false);
        Self(receiver)
    }

    /// Resolves once cancellation is requested. Never resolves if the handle
    /// is dropped without cancelling.
    async fn cancelled(&mut self) {
        loop {
            if *self.0.borrow_and_update() {
                return;
            }
            if self.0.changed().await.is_err() {
                future::pending::<()>().await;
            }
        }
    }
}

/// Creates a linked cancel handle and signal.
pub fn cancellation() -> (CancelHandle, CancelSignal) {
    let (sender, receiver) = watch::channel(false);
    (CancelHandle(sender), CancelSignal(receiver))
}

/// Drives check-in and check-out against a shared store.
#[derive(Debug, Clone)]
pub struct SubmissionService {
    store: SharedStore,
    clock: Arc<dyn Clock>,
    policy: LatePolicy,
    settings: SubmissionSettings,
}

impl SubmissionService {
    /// Creates a submission service.
    pub fn new(
        store: SharedStore,
        clock: Arc<dyn Clock>,
        policy: LatePolicy,
        settings: SubmissionSettings,
    ) -> Self {
        Self {
            store,
            clock,
            policy,
            settings,
        }
    }

    /// The store this service writes to.
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// The late-penalty policy in force.
    pub fn policy(&self) -> &LatePolicy {
        &self.policy
    }

    /// The time a submission would record: the override, or the clock.
    pub fn resolve_time(&self, time: Option<ClockTime>) -> ClockTime {
        time.unwrap_or_else(|| ClockTime::from_naive_time(self.clock.now().time()))
    }

    /// The penalty a check-in at `time` would incur, without recording it.
    pub fn preview_penalty(&self, time: Option<ClockTime>) -> LatePenaltyResult {
        calculate_late_penalty(self.resolve_time(time), &self.policy)
    }

    /// Resolves a PIN to an employee.
    pub async fn verify_pin(&self, pin: &str) -> KioskResult<Employee> {
        let store = self.store.read().await;
        store
            .find_employee_by_pin(pin)
            .cloned()
            .ok_or(KioskError::PinNotFound)
    }

    /// Records a check-in after the commit delay.
    pub async fn check_in(
        &self,
        request: CheckRequest,
        cancel: CancelSignal,
    ) -> KioskResult<AttendanceRecord> {
        let employee = self.prepare(&request, "in").await?;
        let now = self.clock.now();
        let time = self.resolve_time(request.time);
        let penalty = calculate_late_penalty(time, &self.policy);

        self.wait_for_commit(cancel, &employee.id).await?;

        let mut store = self.store.write().await;
        let employee = store
            .directory()
            .get(&employee.id)
            .cloned()
            .ok_or(KioskError::PinNotFound)?;

        Ok(store.add_record(NewAttendanceRecord {
            employee_id: employee.id,
            employee_name: employee.name,
            date: now.date(),
            check_in_time: time,
            check_in_photo: request.photo,
            late_minutes: penalty.late_minutes,
            late_penalty: penalty.late_penalty,
        }))
    }

    /// Records a check-out on today's record after the commit delay.
    pub async fn check_out(
        &self,
        request: CheckRequest,
        cancel: CancelSignal,
    ) -> KioskResult<AttendanceRecord> {
        let employee = self.prepare(&request, "out").await?;
        let now = self.clock.now();
        let time = self.resolve_time(request.time);

        self.wait_for_commit(cancel, &employee.id).await?;

        let mut store = self.store.write().await;
        store.check_out(&employee.id, now.date(), time, request.photo)
    }

    async fn prepare(&self, request: &CheckRequest, action: &str) -> KioskResult<Employee> {
        let employee = self.verify_pin(&request.pin).await.inspect_err(|_| {
            warn!(action, "Submission refused: PIN not found");
        })?;

        if request.photo.is_empty() {
            warn!(employee_id = %employee.id, action, "Submission refused: no photo");
            return Err(KioskError::PhotoRequired {
                action: action.to_string(),
            });
        }
        Ok(employee)
    }

    async fn wait_for_commit(&self, mut cancel: CancelSignal, employee_id: &str) -> KioskResult<()> {
        let delay = self.settings.commit_delay();
        let wait = async {
            tokio::select! {
                _ = tokio::time::sleep(delay) => Ok(()),
                _ = cancel.cancelled() => Err(KioskError::SubmissionCancelled),
            }
        };

        match tokio::time::timeout(self.settings.timeout(), wait).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => {
                info!(employee_id = %employee_id, "Submission cancelled before commit");
                Err(err)
            }
            Err(_) => {
                warn!(
                    employee_id = %employee_id,
                    timeout_ms = self.settings.timeout_ms,
                    "Submission timed out before commit"
                );
                Err(KioskError::SubmissionTimedOut {
                    timeout_ms: self.settings.timeout_ms,
                })
            }
        }
    }
}
