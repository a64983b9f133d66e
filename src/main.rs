#![forbid(unsafe_code)]

use std::sync::Arc;

use anyhow::Result;
use lazy_static::lazy_static;
use log::{error, info};
use poem::listener::TcpListener;
use poem::Route;

use crate::api::make_routes;
use crate::utils::config::{init_log, init_runtime_context, RuntimeCtx};
use crate::utils::errors::Errors;
use crate::utils::registry::WorkerRegistry;

// Modules
mod api;
mod utils;

// ***************************************************************************
//                                Constants
// ***************************************************************************
const SERVER_NAME : &str = "WorkerServer"; // for poem logging

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Parsed on first access in main.  A missing port ends the process here.
lazy_static! {
    static ref RUNTIME_CTX: RuntimeCtx = init_runtime_context();
}

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
#[tokio::main]
async fn main() -> Result<()> {
    // --------------- Initialize Worker --------------
    worker_init()?;
    let args = &RUNTIME_CTX.args;

    // The registry lives for the whole process and is shared by the handlers.
    let registry = Arc::new(WorkerRegistry::new());

    // --------------- Main Loop Set Up ---------------
    let server_url = format!("http://localhost:{}", args.port);
    let app = make_routes(registry, args.mode, &server_url);
    let addr = args.listen_addr();

    // ------------------ Main Loop -------------------
    info!("Worker is running on port {} in {} mode", args.port, args.mode);
    serve(addr, app).await
}

// ---------------------------------------------------------------------------
// serve:
// ---------------------------------------------------------------------------
/** Run the server until the process is killed.  A listener that cannot be
 * bound is logged and returned as an error; there is no retry.
 */
async fn serve(addr: String, app: Route) -> Result<()> {
    if let Err(e) = poem::Server::new(TcpListener::bind(addr.clone()))
        .name(SERVER_NAME)
        .run(app)
        .await
    {
        let err = Errors::ServerStart(addr, e.to_string());
        error!("{}", err);
        return Err(err.into());
    }

    Ok(())
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// worker_init:
// ---------------------------------------------------------------------------
/** Parse the command line and configure logging.  Either failure is fatal. */
fn worker_init() -> Result<()> {
    // Force the reading of input parameters before anything else.
    let args = &RUNTIME_CTX.args;

    init_log(args.log_config.as_deref())?;
    info!("{}", Errors::InputParms(format!("{:#?}", args)));
    print_version_info();
    Ok(())
}

// ---------------------------------------------------------------------------
// print_version_info:
// ---------------------------------------------------------------------------
fn print_version_info() {
    info!("*** Running {}={}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
}
