#![forbid(unsafe_code)]

use poem_openapi::{OpenApi, payload::Json, Object};

use crate::utils::config::ServiceMode;

// From cargo.toml.
const SERVER_NAME: &str = env!("CARGO_PKG_NAME");
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct VersionApi {
    mode: ServiceMode,
}

impl VersionApi {
    pub fn new(mode: ServiceMode) -> Self {
        VersionApi { mode }
    }
}

#[derive(Object)]
struct RespVersion
{
    result_code: String,
    result_msg: String,
    server_name: String,
    server_version: String,
    mode: String,
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl VersionApi {
    #[oai(path = "/version", method = "get")]
    async fn get_version(&self) -> Json<RespVersion> {
        Json(RespVersion::new("0", "success", self.mode))
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl RespVersion {
    fn new(result_code: &str, result_msg: &str, mode: ServiceMode) -> Self {
        Self {result_code: result_code.to_string(),
              result_msg: result_msg.to_string(),
              server_name: SERVER_NAME.to_string(),
              server_version: SERVER_VERSION.to_string(),
              mode: mode.to_string(),
        }
    }
}
