//! `tiny_http` front end.
//!
//! `tiny_http::Server::recv` blocks, so the accept loop polls it with
//! `recv_timeout` on the blocking pool and checks for shutdown between polls.
//! Each request is served on its own task; reading the body and writing the
//! response happen on the blocking pool.

use std::future::Future;
use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::error::ServerError;
use crate::router::{App, Incoming, Reply};

const ACCEPT_POLL: Duration = Duration::from_millis(250);

pub struct HttpServer {
    server: Arc<tiny_http::Server>,
    app: Arc<App>,
}

impl HttpServer {
    /// Bind `addr` (`host:port`; port 0 picks a free port).
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] if the address cannot be bound.
    pub fn bind(addr: &str, app: Arc<App>) -> Result<Self, ServerError> {
        let server = tiny_http::Server::http(addr).map_err(|e| ServerError::Bind {
            addr: addr.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            server: Arc::new(server),
            app,
        })
    }

    /// The bound socket address.
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Serve until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Recv`] if the listener fails.
    pub async fn run_until(self, shutdown: impl Future<Output = ()>) -> Result<(), ServerError> {
        tokio::pin!(shutdown);
        loop {
            let listener = Arc::clone(&self.server);
            let accepted = tokio::task::spawn_blocking(move || listener.recv_timeout(ACCEPT_POLL));
            let request = tokio::select! {
                () = &mut shutdown => {
                    tracing::info!("shutting down HTTP server");
                    return Ok(());
                }
                accepted = accepted => accepted?.map_err(ServerError::Recv)?,
            };

            let Some(request) = request else { continue };
            let app = Arc::clone(&self.app);
            tokio::spawn(async move {
                if let Err(error) = serve(&app, request).await {
                    tracing::warn!(%error, "failed to serve request");
                }
            });
        }
    }
}

async fn serve(app: &App, request: tiny_http::Request) -> Result<(), ServerError> {
    let limit = app.max_upload_bytes();
    let (request, incoming) =
        tokio::task::spawn_blocking(move || read_incoming(request, limit)).await??;
    tracing::debug!(method = %incoming.method, url = %incoming.url, "request");

    let reply = app.handle(incoming).await;
    tokio::task::spawn_blocking(move || request.respond(into_response(reply)))
        .await?
        .map_err(ServerError::Respond)
}

fn read_incoming(
    mut request: tiny_http::Request,
    limit: u64,
) -> Result<(tiny_http::Request, Incoming), ServerError> {
    let content_type = request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Content-Type"))
        .map(|h| h.value.as_str().to_string());

    // One byte past the limit is enough for the router to reject the upload.
    let mut body = Vec::new();
    request
        .as_reader()
        .take(limit.saturating_add(1))
        .read_to_end(&mut body)
        .map_err(ServerError::Body)?;

    let incoming = Incoming {
        method: request.method().clone(),
        url: request.url().to_string(),
        content_type,
        body,
    };
    Ok((request, incoming))
}

fn into_response(reply: Reply) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let response = tiny_http::Response::from_data(reply.body).with_status_code(reply.status);
    match tiny_http::Header::from_bytes("Content-Type", reply.content_type) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}
