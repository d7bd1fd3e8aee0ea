// Server module entry
// Listener creation, accept loop, per-connection tasks and shutdown

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the file is mounted under another name
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::bind_listener;
pub use server_loop::{run_until, start_server_loop};
