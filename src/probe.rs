use crate::types::{Port, ScanResult};
use std::future::Future;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time;
use tracing::{debug, trace};

/// A single connect-with-timeout check against one host:port.
///
/// Implementations never fail: every outcome is folded into
/// [`ScanResult::open`].
pub trait Probe: Send + Sync + 'static {
    fn probe(
        &self,
        host: &str,
        port: Port,
        timeout: Duration,
    ) -> impl Future<Output = ScanResult> + Send;
}

/// Probe backed by a real TCP connect.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProbe;

impl Probe for TcpProbe {
    async fn probe(&self, host: &str, port: Port, timeout: Duration) -> ScanResult {
        probe(host, port, timeout).await
    }
}

/// Attempt one TCP connection to `host:port`, giving up after `timeout`.
///
/// Name resolution counts against the timeout. A successful connection is
/// closed before returning.
pub async fn probe(host: &str, port: Port, timeout: Duration) -> ScanResult {
    let Ok(tcp_port) = u16::try_from(port) else {
        debug!(host, port, "port outside TCP range, reporting closed");
        return ScanResult::new(host, port, false);
    };

    let open = match time::timeout(timeout, TcpStream::connect((host, tcp_port))).await {
        Ok(Ok(stream)) => {
            drop(stream);
            true
        }
        Ok(Err(e)) => {
            trace!(host, port, error = %e, "connect failed");
            false
        }
        Err(_) => {
            trace!(host, port, ?timeout, "connect timed out");
            false
        }
    };
    ScanResult::new(host, port, open)
}
