#![forbid(unsafe_code)]

use std::sync::Arc;

use log::{debug, info};
use poem::Request;
use poem_openapi::{OpenApi, param::Path, payload::PlainText};

use crate::api::GREETING;
use crate::utils::config::ServiceMode;
use crate::utils::registry::WorkerRegistry;
use crate::utils::worker_utils::{debug_request, parse_worker_id, RequestDebug};

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct IdentifyApi {
    registry: Arc<WorkerRegistry>,
    mode: ServiceMode,
}

struct ReqIdentifyWorker {
    raw_id: String,
    worker_id: i64,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqIdentifyWorker {
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(128);
        s.push_str("  Request path:");
        s.push_str("\n    raw id: ");
        s.push_str(&self.raw_id);
        s.push_str("\n    worker_id: ");
        s.push_str(&self.worker_id.to_string());
        s
    }
}

impl IdentifyApi {
    pub fn new(registry: Arc<WorkerRegistry>, mode: ServiceMode) -> Self {
        IdentifyApi { registry, mode }
    }
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl IdentifyApi {
    /// Record the calling worker's id and answer with a greeting.
    ///
    /// Ids that are not integers are recorded as 0.
    #[oai(path = "/worker/:id", method = "get")]
    async fn identify_worker(&self, http_req: &Request, id: Path<String>) -> PlainText<String> {
        info!("Worker received a request {}", id.0);
        let req = ReqIdentifyWorker { worker_id: parse_worker_id(&id.0), raw_id: id.0 };
        debug_request(http_req, &req);

        if self.mode == ServiceMode::Tracking {
            let count = self.registry.record(req.worker_id);
            debug!("Recorded worker {}, {} ids seen.", req.worker_id, count);
        }

        PlainText(GREETING.to_string())
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use poem::test::TestClient;

    use crate::api::{make_routes, GREETING};
    use crate::utils::config::ServiceMode;
    use crate::utils::registry::WorkerRegistry;

    fn client(mode: ServiceMode) -> (Arc<WorkerRegistry>, TestClient<poem::Route>) {
        let registry = Arc::new(WorkerRegistry::new());
        let cli = TestClient::new(make_routes(registry.clone(), mode, "http://localhost:3000"));
        (registry, cli)
    }

    #[tokio::test]
    async fn every_id_gets_the_greeting() {
        let (registry, cli) = client(ServiceMode::Tracking);

        for id in ["1", "0", "-4", "abc", "99999999999999999999"] {
            let resp = cli.get(format!("/worker/{}", id)).send().await;
            resp.assert_status_is_ok();
            resp.assert_content_type("text/plain; charset=utf-8");
            resp.assert_text(GREETING).await;
        }

        assert_eq!(registry.snapshot(), vec![1, 0, -4, 0, i64::MAX]);
    }

    #[tokio::test]
    async fn non_numeric_id_records_zero() {
        let (registry, cli) = client(ServiceMode::Tracking);

        let resp = cli.get("/worker/abc").send().await;
        resp.assert_status_is_ok();
        resp.assert_text(GREETING).await;

        assert_eq!(registry.snapshot(), vec![0]);
    }

    #[tokio::test]
    async fn duplicates_are_kept() {
        let (registry, cli) = client(ServiceMode::Tracking);

        for id in [5, 5, 2, 5] {
            cli.get(format!("/worker/{}", id)).send().await.assert_status_is_ok();
        }

        assert_eq!(registry.snapshot(), vec![5, 5, 2, 5]);
    }

    #[tokio::test]
    async fn greeting_mode_records_nothing() {
        let (registry, cli) = client(ServiceMode::Greeting);

        let resp = cli.get("/worker/12").send().await;
        resp.assert_status_is_ok();
        resp.assert_text(GREETING).await;

        assert!(registry.is_empty());
    }
}
