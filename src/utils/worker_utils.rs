#![forbid(unsafe_code)]

use std::num::IntErrorKind;

use poem::Request;
use log::{debug, LevelFilter};

// ***************************************************************************
// GENERAL PUBLIC FUNCTIONS
// ***************************************************************************
// ---------------------------------------------------------------------------
// parse_worker_id:
// ---------------------------------------------------------------------------
/** Convert the worker id path segment into an integer.
 *
 * Malformed input is never rejected:
 *
 *   - a segment that is not a base-10 integer becomes 0,
 *   - a well-formed integer outside the i64 range saturates to the
 *     nearest bound.
 *
 * A single leading '+' or '-' is accepted.
 */
pub fn parse_worker_id(raw: &str) -> i64 {
    match raw.parse::<i64>() {
        Ok(id) => id,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 0,
        },
    }
}

// ***************************************************************************
//                                  Traits
// ***************************************************************************
pub trait RequestDebug {
    fn get_request_info(&self) -> String;
}

// ---------------------------------------------------------------------------
// debug_request:
// ---------------------------------------------------------------------------
// Dump http request information to the log.
pub fn debug_request(http_req: &Request, req: &impl RequestDebug) {
    // Skip the work unless debug logging is on.
    if log::max_level() < LevelFilter::Debug {
        return;
    }

    let mut s = "\n".to_string();

    let uri = http_req.uri();
    s += format!("  URI: {:?}\n", uri).as_str();

    for (name, value) in http_req.headers().iter() {
        s += format!("  Header: {} = {:?} \n", name, value).as_str();
    }

    s += req.get_request_info().as_str();

    // Write the single log record.
    debug!("{}", s);
}
