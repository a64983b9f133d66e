#![forbid(unsafe_code)]

use poem_openapi::{OpenApi, payload::PlainText};

use crate::api::GREETING;

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
pub struct GreetingApi;

#[OpenApi]
impl GreetingApi {
    #[oai(path = "/", method = "get")]
    async fn greeting(&self) -> PlainText<String> {
        PlainText(GREETING.to_string())
    }
}
