use anyhow::Context;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tracing::{error, info};

use crate::config::Config;
use crate::files::Resolver;
use crate::http::connection::Connection;

/// The bound listening socket and everything a connection needs.
///
/// Connections are served one at a time: the next one is not accepted until
/// the current one has been answered and closed.
pub struct Server {
    listener: TcpListener,
    resolver: Resolver,
    max_request_bytes: usize,
}

impl Server {
    /// Binds the listening socket described by `cfg`.
    pub async fn start(cfg: &Config) -> anyhow::Result<Self> {
        let addr = tokio::net::lookup_host(&cfg.server.listen_addr)
            .await
            .with_context(|| format!("invalid listen address {}", cfg.server.listen_addr))?
            .next()
            .with_context(|| format!("{} resolved to no address", cfg.server.listen_addr))?;

        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()?
        } else {
            TcpSocket::new_v6()?
        };
        socket.set_reuseaddr(true)?;
        socket
            .bind(addr)
            .with_context(|| format!("failed to bind {}", addr))?;
        let listener = socket.listen(cfg.server.backlog)?;

        info!(
            "Listening on {} (document root {})",
            listener.local_addr()?,
            cfg.static_files.root.display()
        );

        Ok(Self {
            listener,
            resolver: Resolver::new(cfg.static_files.root.clone()),
            max_request_bytes: cfg.server.max_request_bytes,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts and serves connections until accept itself fails.
    pub async fn serve(&self) -> anyhow::Result<()> {
        loop {
            info!("Waiting for a connection");
            let (socket, peer) = self.listener.accept().await?;
            self.serve_connection(socket, peer).await;
        }
    }

    async fn serve_connection(&self, socket: TcpStream, peer: SocketAddr) {
        info!("Accepted connection from {}", peer);

        let mut conn = Connection::new(socket, self.resolver.clone(), self.max_request_bytes);
        if let Err(e) = conn.run().await {
            error!("Connection error from {}: {}", peer, describe_fault(&e));
        }
        drop(conn);

        info!("Closed connection from {}", peer);
    }

    /// Serves until `shutdown` completes or accepting fails, then stops.
    ///
    /// An accept failure is logged rather than returned, so it ends the
    /// server the same way a shutdown signal does.
    pub async fn run_until<F: Future>(self, shutdown: F) {
        tokio::select! {
            res = self.serve() => {
                if let Err(e) = res {
                    error!("Accept loop failed: {}", describe_fault(&e));
                }
            }

            _ = shutdown => {
                info!("Shutdown signal received");
            }
        }

        self.stop();
    }

    /// Closes the listening socket.
    pub fn stop(self) {
        match self.listener.local_addr() {
            Ok(addr) => info!("Closing listener on {}", addr),
            Err(_) => info!("Closing listener"),
        }
    }
}

/// Renders an error and its whole cause chain on one line.
pub fn describe_fault(e: &anyhow::Error) -> String {
    format!("{:#}", e)
}
