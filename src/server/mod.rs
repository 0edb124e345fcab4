// Server module entry point
// Listener construction, the accept loop, and shutdown signals

pub mod connection;
pub mod listener;
pub mod signal;

pub use listener::create_listener;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::config::Config;
use crate::logger;

/// Run the accept loop until shutdown is requested
///
/// Each accepted connection is handled in its own task; requests are
/// independent and share nothing beyond the read-only configuration.
pub async fn run(
    listener: TcpListener,
    config: Arc<Config>,
    shutdown: Arc<Notify>,
) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(
                            stream,
                            peer_addr,
                            &config,
                            &active_connections,
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                logger::log_shutdown();
                break;
            }
        }
    }

    Ok(())
}
