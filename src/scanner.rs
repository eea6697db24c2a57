use crate::probe::{Probe, TcpProbe};
use crate::types::{Port, ScanConfig, ScanResult};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Bounded-concurrency TCP port scanner.
///
/// Every port gets its own task, but at most `config.concurrency()` of them
/// hold an admission slot (and therefore a connect attempt) at any instant.
#[derive(Debug, Clone)]
pub struct Scanner<P = TcpProbe> {
    config: ScanConfig,
    probe: Arc<P>,
}

impl Scanner<TcpProbe> {
    pub fn new(config: ScanConfig) -> Self {
        Self::with_probe(config, TcpProbe)
    }
}

impl<P: Probe> Scanner<P> {
    /// Scanner that runs `probe` for each port instead of a real TCP connect.
    pub fn with_probe(config: ScanConfig, probe: P) -> Self {
        Self {
            config,
            probe: Arc::new(probe),
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Probe every port in `ports` on `host` and return one result per port.
    ///
    /// - All tasks are spawned up front in `ports` order; each waits on the
    ///   admission gate (`Semaphore`) before probing and frees its slot as soon
    ///   as the probe returns.
    /// - Results go into a channel sized to `ports.len()`, so sends never wait.
    /// - Nothing is read back until every task has finished.
    ///
    /// The returned order follows completion, not `ports`.
    pub async fn scan(&self, host: &str, ports: &[Port]) -> Vec<ScanResult> {
        if ports.is_empty() {
            debug!(host, "no ports to scan");
            return Vec::new();
        }

        let started = Instant::now();
        info!(
            host,
            ports = ports.len(),
            concurrency = self.config.concurrency(),
            timeout = ?self.config.timeout(),
            "scan started"
        );

        let gate = Arc::new(Semaphore::new(
            self.config.concurrency().min(Semaphore::MAX_PERMITS),
        ));
        let (tx, mut rx) = mpsc::channel::<ScanResult>(ports.len());
        let host: Arc<str> = Arc::from(host);
        let timeout = self.config.timeout();
        let mut set = JoinSet::new();

        for &port in ports {
            let gate = gate.clone();
            let tx = tx.clone();
            let probe = self.probe.clone();
            let host = host.clone();

            set.spawn(async move {
                let result = {
                    let _permit = gate
                        .acquire()
                        .await
                        .expect("admission gate is never closed");
                    probe.probe(&host, port, timeout).await
                };
                if tx.send(result).await.is_err() {
                    warn!(port, "result buffer closed before task finished");
                }
            });
        }
        drop(tx);

        // Join barrier: every probe task completes before any result is read.
        while let Some(res) = set.join_next().await {
            if let Err(e) = res {
                if e.is_panic() {
                    std::panic::resume_unwind(e.into_panic());
                }
                warn!(error = %e, "probe task did not complete");
            }
        }

        let mut results = Vec::with_capacity(ports.len());
        while let Some(result) = rx.recv().await {
            results.push(result);
        }

        info!(
            host = %host,
            scanned = results.len(),
            open = results.iter().filter(|r| r.open).count(),
            elapsed = ?started.elapsed(),
            "scan finished"
        );
        results
    }
}
