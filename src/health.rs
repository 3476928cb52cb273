//! Health-check handlers.
//!
//! | Check | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? |
//! | **Readiness** | `/readyz` | Can it serve item requests? |
//!
//! Both are mounted by [`api::routes`](crate::api::routes). The item store
//! lives in memory and is seeded before the listener opens, so the service is
//! ready as soon as it answers at all.

use crate::{Request, Response};

/// Liveness check. Always `200 OK` with body `"ok"`.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// Readiness check. Always `200 OK` with body `"ready"`.
pub async fn readiness(_req: Request) -> Response {
    Response::text("ready")
}
