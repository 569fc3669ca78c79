//! Adapter - line-delimited JSON over TCP
//!
//! Lets an external UI or bot drive Wagara Blast sessions out of process.
//! Every connection owns an independent [`session::Session`]; one request
//! line yields exactly one response line.
//!
//! # Requests
//!
//! | `type` | Fields | Response |
//! |--------|--------|----------|
//! | `hello` | `client?` | `welcome` |
//! | `new_game` | `mode`, `level?`, `date?`, `seed?` | `observation` |
//! | `place` | `piece`, `row`, `col` | `observation` with events |
//! | `booster` | `booster`, `row?`, `col?` | `observation` with events and `suggestion?` |
//! | `placements` | | `placements` |
//! | `observe` | | `observation` |
//!
//! All requests accept an optional `seq` that the response echoes. Anything
//! other than `hello` is rejected until the handshake is done.
//!
//! # Environment
//!
//! | Variable | Default |
//! |----------|---------|
//! | `WAGARA_ADAPTER_HOST` | `127.0.0.1` |
//! | `WAGARA_ADAPTER_PORT` | `7878` |
//! | `WAGARA_ADAPTER_MAX_LINE` | `4096` |
//! | `WAGARA_ADAPTER_DISABLED` | unset (`1` or `true` disables) |

pub mod protocol;
pub mod server;
pub mod session;

pub use protocol::{parse_request, ErrorCode, Request, Response};
pub use server::{run_server, serve_lines, ServerConfig};
pub use session::Session;
