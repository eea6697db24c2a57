use std::io::{self, Write};
use std::time::Duration;

use port_probe_rs::probe::{Probe, TcpProbe};
use port_probe_rs::types::{ScanConfig, ScanReport};
use port_probe_rs::{discovery, ports, report, scanner::Scanner};

use anyhow::Result;
use clap::{CommandFactory, Parser};
use time::OffsetDateTime;
use tokio::time::Instant;
use tracing_subscriber::{fmt, EnvFilter};

/// port-probe-rs — Fast async TCP connect port scanner.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "port-probe-rs",
    version,
    about = "Fast async TCP connect port scanner with a bounded pool of concurrent probes.",
    long_about = None
)]
struct Cli {
    /// Target host to scan (name or IP address).
    #[arg(long)]
    host: Option<String>,

    /// Port range to scan (e.g., 1-1000 or 22,80,443 or 8080).
    #[arg(long, default_value = "1-1000")]
    ports: String,

    /// Max concurrent TCP connect attempts.
    #[arg(long, default_value_t = ScanConfig::DEFAULT_CONCURRENCY)]
    threads: usize,

    /// Per-connection timeout (e.g., 2s, 500ms).
    #[arg(long, default_value = "2s", value_parser = humantime::parse_duration)]
    timeout: Duration,

    /// Show closed ports in the results table.
    #[arg(long = "show-closed", default_value_t = false)]
    show_closed: bool,

    /// Check that the host answers on port 80 or 22 before scanning.
    #[arg(long = "host-discovery", default_value_t = false)]
    host_discovery: bool,

    /// Print results as pretty JSON instead of a table.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Log filter used when RUST_LOG is not set (e.g., warn, info, port_probe_rs=debug).
    #[arg(long = "log-level", default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    run(cli, TcpProbe, &mut std::io::stdout()).await
}

/// Execute one CLI invocation, writing the report to `out`.
///
/// With `--json`, `out` receives only the JSON document; progress and
/// diagnostic lines go to stderr instead.
async fn run<P: Probe>(cli: Cli, probe: P, out: &mut impl Write) -> Result<()> {
    let host = match cli.host.as_deref().map(str::trim) {
        Some(h) if !h.is_empty() => h.to_string(),
        _ => {
            writeln!(out, "Usage: port-probe-rs --host <target_host> [options]")?;
            write!(out, "{}", Cli::command().render_help())?;
            return Ok(());
        }
    };

    if cli.host_discovery {
        status(out, cli.json, &format!("Performing host discovery for {host}..."))?;
        if discovery::is_alive_with(&probe, &host).await {
            status(out, cli.json, &format!("Host {host} is up"))?;
        } else {
            status(out, cli.json, &format!("Host {host} appears to be down"))?;
            return Ok(());
        }
    }

    let ports = match ports::parse_ports(&cli.ports) {
        Ok(p) => p,
        Err(e) => {
            status(out, cli.json, &format!("Error parsing port range: {e}"))?;
            return Ok(());
        }
    };

    let config = ScanConfig::new(cli.timeout, cli.threads);
    let scanner = Scanner::with_probe(config, probe);

    status(out, cli.json, &format!("Starting port scan on {host}..."))?;
    status(
        out,
        cli.json,
        &format!(
            "Scanning {} ports with {} threads",
            ports.len(),
            config.concurrency()
        ),
    )?;

    let started_at = OffsetDateTime::now_utc();
    let start = Instant::now();
    let results = scanner.scan(&host, &ports).await;
    let elapsed = start.elapsed();

    if cli.json {
        let report = ScanReport::new(host, results, started_at, elapsed);
        writeln!(out, "{}", report::render_json(&report)?)?;
    } else {
        writeln!(out)?;
        write!(out, "{}", report::render_text(&host, &results, cli.show_closed))?;
        writeln!(out, "Scan completed in {elapsed:?}")?;
    }

    Ok(())
}

/// Progress line: part of the report in text mode, stderr in JSON mode.
fn status(out: &mut impl Write, json: bool, line: &str) -> io::Result<()> {
    if json {
        eprintln!("{line}");
        Ok(())
    } else {
        writeln!(out, "{line}")
    }
}
