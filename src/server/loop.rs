// Server loop module
// Accepts connections until a shutdown signal arrives

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::shutdown_signal;
use crate::config::AppState;
use crate::logger;

/// Run the accept loop on `listener` until SIGINT/SIGTERM.
///
/// The listener is dropped (and the port released) when this returns.
pub async fn start_server_loop(listener: TcpListener, state: Arc<AppState>) {
    run_until(listener, state, shutdown_signal()).await;
}

/// Accept loop with an arbitrary shutdown future
pub async fn run_until<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F)
where
    F: std::future::Future<Output = &'static str>,
{
    let active_connections = Arc::new(AtomicUsize::new(0));
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            reason = &mut shutdown => {
                logger::log_shutdown(reason);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::server::bind_listener;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn test_serves_over_tcp_until_shutdown() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("public");
        let mut config = Config::load_from("does-not-exist-dimsum.toml")
            .unwrap()
            .with_overrides(None, None, Some(root.to_string_lossy().into_owned()));
        config.logging.access_log = false;
        let state = Arc::new(AppState::new(config));
        state.layout.ensure_dirs().unwrap();

        let listener = bind_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let server = tokio::spawn(run_until(listener, Arc::clone(&state), async move {
            let _ = rx.await;
            "test shutdown"
        }));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(
                b"POST /api/upload/excel?filename=a.xlsx HTTP/1.1\r\n\
                  Host: localhost\r\n\
                  Content-Length: 5\r\n\
                  Connection: close\r\n\r\n\
                  hello",
            )
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
        assert!(response
            .to_ascii_lowercase()
            .contains("access-control-allow-origin: *"));
        assert!(response.ends_with(r#"{"ok":true}"#));
        assert_eq!(
            std::fs::read(state.layout.excel_dir().join("a.xlsx")).unwrap(),
            b"hello"
        );

        tx.send(()).unwrap();
        server.await.unwrap();
        assert!(tokio::net::TcpStream::connect(addr).await.is_err());
    }
}
