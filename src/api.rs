#![forbid(unsafe_code)]

use std::sync::Arc;

use poem::Route;
use poem_openapi::OpenApiService;

use crate::api::greeting::GreetingApi;
use crate::api::health::HealthApi;
use crate::api::identify::IdentifyApi;
use crate::api::version::VersionApi;
use crate::utils::config::ServiceMode;
use crate::utils::registry::WorkerRegistry;

pub mod greeting;
pub mod health;
pub mod identify;
pub mod version;

// Fixed body returned by the greeting and identification endpoints.
pub const GREETING: &str = "Hello, World!";

// ---------------------------------------------------------------------------
// make_routes:
// ---------------------------------------------------------------------------
/** Assemble the worker endpoints and the OpenAPI documentation routes.
 * The registry is shared by every endpoint that reads or writes it.
 */
pub fn make_routes(registry: Arc<WorkerRegistry>, mode: ServiceMode, server_url: &str) -> Route {
    let endpoints = (
        GreetingApi,
        IdentifyApi::new(Arc::clone(&registry), mode),
        HealthApi::new(registry),
        VersionApi::new(mode),
    );
    let api_service =
        OpenApiService::new(endpoints, "Worker Server", env!("CARGO_PKG_VERSION")).server(server_url);

    // Allow the generated openapi specs to be retrieved from the server.
    let spec = api_service.spec_endpoint();
    let spec_yaml = api_service.spec_endpoint_yaml();
    let ui = api_service.swagger_ui();

    Route::new()
        .nest("/", api_service)
        .nest("/docs", ui)
        .at("/spec", spec)
        .at("/spec_yaml", spec_yaml)
}
