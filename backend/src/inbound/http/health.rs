//! Readiness and liveness probes for the users service.
//!
//! The service moves through three phases: it starts up (schema migrated, pool
//! built, listener not yet bound), serves traffic, then drains once shutdown
//! begins. Readiness holds only while serving; liveness fails once draining.

use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, http::header, web};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum Phase {
    Starting = 0,
    Serving = 1,
    Draining = 2,
}

impl Phase {
    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Starting,
            1 => Self::Serving,
            _ => Self::Draining,
        }
    }
}

/// Lifecycle phase shared between `main`, the server and the probe handlers.
#[derive(Debug)]
pub struct HealthState {
    phase: AtomicU8,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            phase: AtomicU8::new(Phase::Starting as u8),
        }
    }
}

impl HealthState {
    /// Fresh state in the starting phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// The listener is bound and user routes can take traffic.
    ///
    /// Has no effect once draining has begun.
    pub fn mark_ready(&self) {
        let swapped = self.phase.compare_exchange(
            Phase::Starting as u8,
            Phase::Serving as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
        if swapped.is_err() {
            debug!("readiness signal ignored during shutdown");
        }
    }

    /// Shutdown has begun; both probes report unavailable from now on.
    pub fn mark_draining(&self) {
        self.phase.store(Phase::Draining as u8, Ordering::Release);
    }

    fn phase(&self) -> Phase {
        Phase::from_raw(self.phase.load(Ordering::Acquire))
    }

    /// Whether load balancers should route requests here.
    pub fn is_ready(&self) -> bool {
        self.phase() == Phase::Serving
    }

    /// Whether the process should be left running.
    pub fn is_alive(&self) -> bool {
        self.phase() != Phase::Draining
    }
}

fn probe_response(healthy: bool) -> HttpResponse {
    let mut builder = if healthy {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Users routes are accepting traffic"),
        (status = 405, description = "Probe called with a method other than GET"),
        (status = 503, description = "Still starting up, or draining")
    )
)]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_ready())
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Process is running"),
        (status = 405, description = "Probe called with a method other than GET"),
        (status = 503, description = "Process is draining for shutdown")
    )
)]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_alive())
}
