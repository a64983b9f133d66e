#![forbid(unsafe_code)]

use std::sync::Arc;

use log::error;
use poem_openapi::{ApiResponse, OpenApi, payload::{Json, PlainText}};
use serde_json::Value;

use crate::utils::errors::Errors;
use crate::utils::registry::WorkerRegistry;

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct HealthApi {
    registry: Arc<WorkerRegistry>,
}

impl HealthApi {
    pub fn new(registry: Arc<WorkerRegistry>) -> Self {
        HealthApi { registry }
    }
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
enum WorkerResponse {
    /// Worker ids in the order they were received.
    #[oai(status = 200, content_type = "application/json")]
    Http200(Json<Value>),
    #[oai(status = 500)]
    Http500(PlainText<String>),
}

fn make_http_200(ids: Value) -> WorkerResponse {
    WorkerResponse::Http200(Json(ids))
}
fn make_http_500(msg: String) -> WorkerResponse {
    WorkerResponse::Http500(PlainText(msg))
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl HealthApi {
    #[oai(path = "/health", method = "get")]
    async fn health(&self) -> WorkerResponse {
        // Serialize a consistent copy so the lock is not held during encoding.
        let ids = self.registry.snapshot();
        match serde_json::to_value(ids) {
            Ok(v) => make_http_200(v),
            Err(e) => {
                error!("{}", Errors::Serialization(e.to_string()));
                make_http_500(e.to_string())
            }
        }
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use futures::future::join_all;
    use poem::http::header::CONTENT_TYPE;
    use poem::test::{TestClient, TestResponse};
    use poem::Route;

    use crate::api::make_routes;
    use crate::utils::config::ServiceMode;
    use crate::utils::registry::WorkerRegistry;

    fn client() -> TestClient<Route> {
        TestClient::new(make_routes(Arc::new(WorkerRegistry::new()), ServiceMode::Tracking,
                                    "http://localhost:3000"))
    }

    async fn read_ids(resp: TestResponse) -> Vec<i64> {
        resp.assert_status_is_ok();
        resp.assert_header(CONTENT_TYPE, "application/json");

        let body = resp.0.into_body().into_string().await.unwrap();
        serde_json::from_str(&body).unwrap()
    }

    #[tokio::test]
    async fn empty_before_any_worker() {
        let cli = client();
        let resp = cli.get("/health").send().await;
        assert_eq!(read_ids(resp).await, Vec::<i64>::new());
    }

    #[tokio::test]
    async fn reports_ids_in_arrival_order() {
        let cli = client();
        let ids = [3, 1, 4, 1, 5, 9, 2, 6];
        for id in ids {
            cli.get(format!("/worker/{}", id)).send().await.assert_status_is_ok();
        }
        cli.get("/worker/not-a-number").send().await.assert_status_is_ok();

        let resp = cli.get("/health").send().await;
        assert_eq!(read_ids(resp).await, vec![3, 1, 4, 1, 5, 9, 2, 6, 0]);
    }

    #[tokio::test]
    async fn health_is_read_only() {
        let cli = client();
        cli.get("/worker/8").send().await.assert_status_is_ok();

        for _ in 0..3 {
            let resp = cli.get("/health").send().await;
            assert_eq!(read_ids(resp).await, vec![8]);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_workers_are_all_recorded() {
        const WORKERS: i64 = 200;

        let cli = Arc::new(client());
        let tasks = (0..WORKERS).map(|id| {
            let cli = Arc::clone(&cli);
            tokio::spawn(async move {
                cli.get(format!("/worker/{}", id)).send().await.assert_status_is_ok();
            })
        });
        for joined in join_all(tasks).await {
            joined.unwrap();
        }

        let resp = cli.get("/health").send().await;
        let mut ids = read_ids(resp).await;
        assert_eq!(ids.len() as i64, WORKERS);
        ids.sort_unstable();
        assert_eq!(ids, (0..WORKERS).collect::<Vec<i64>>());
    }
}
