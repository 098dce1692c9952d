//! Threading utilities.

use std::thread;

/// Spawns a named thread, so that it shows up in the logs.
pub fn spawn<N, F, T>(name: N, f: F) -> std::io::Result<thread::JoinHandle<T>>
where
    N: Into<String>,
    F: FnOnce() -> T,
    F: Send + 'static,
    T: Send + 'static,
{
    thread::Builder::new().name(name.into()).spawn(f)
}
