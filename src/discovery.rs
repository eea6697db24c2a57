use crate::probe::{Probe, TcpProbe};
use crate::types::Port;
use std::time::Duration;
use tracing::debug;

/// Ports tried, in order, when checking whether a host is up.
pub const DISCOVERY_PORTS: [Port; 2] = [80, 22];

/// Connect timeout for each discovery attempt.
pub const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(2);

/// Report whether `host` accepts a TCP connection on port 80 or, failing that, 22.
pub async fn is_alive(host: &str) -> bool {
    is_alive_with(&TcpProbe, host).await
}

/// Same as [`is_alive`], using `probe` for the connection attempts.
pub async fn is_alive_with<P: Probe>(probe: &P, host: &str) -> bool {
    for port in DISCOVERY_PORTS {
        if probe.probe(host, port, DISCOVERY_TIMEOUT).await.open {
            debug!(host, port, "host answered discovery probe");
            return true;
        }
    }
    false
}
