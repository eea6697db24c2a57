use crate::types::{ScanReport, ScanResult};
use std::fmt::Write as _;
use std::time::Duration;
use time::OffsetDateTime;

/// Sort results by ascending port. Stable, so duplicates keep their order.
pub fn sort_results(results: &mut [ScanResult]) {
    results.sort_by_key(|r| r.port);
}

pub fn open_count(results: &[ScanResult]) -> usize {
    results.iter().filter(|r| r.open).count()
}

/// Render the plain-text results table for `host`.
///
/// Closed ports are listed only when `show_closed` is set; the summary line
/// always counts open ports.
pub fn render_text(host: &str, results: &[ScanResult], show_closed: bool) -> String {
    let mut sorted = results.to_vec();
    sort_results(&mut sorted);

    let mut out = String::new();
    let _ = writeln!(out, "Scan Results for {host}:");
    out.push_str("PORT\tSTATE\n");
    out.push_str("----\t-----\n");
    for r in &sorted {
        if r.open {
            let _ = writeln!(out, "{}/tcp\topen", r.port);
        } else if show_closed {
            let _ = writeln!(out, "{}/tcp\tclosed", r.port);
        }
    }
    let _ = writeln!(out, "Scan completed: {} open ports found", open_count(&sorted));
    out
}

impl ScanReport {
    /// Build a report with results sorted by port.
    pub fn new(
        host: impl Into<String>,
        mut results: Vec<ScanResult>,
        started_at: OffsetDateTime,
        elapsed: Duration,
    ) -> Self {
        sort_results(&mut results);
        Self {
            host: host.into(),
            started_at,
            elapsed_ms: elapsed.as_millis() as u64,
            scanned: results.len(),
            open_count: open_count(&results),
            results,
        }
    }
}

/// Pretty JSON for a finished scan.
pub fn render_json(report: &ScanReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unordered() -> Vec<ScanResult> {
        vec![
            ScanResult::new("example.org", 443, true),
            ScanResult::new("example.org", 80, true),
            ScanResult::new("example.org", 22, false),
        ]
    }

    #[test]
    fn text_lists_open_ports_ascending() {
        let out = render_text("example.org", &unordered(), false);
        assert_eq!(
            out,
            "Scan Results for example.org:\n\
             PORT\tSTATE\n\
             ----\t-----\n\
             80/tcp\topen\n\
             443/tcp\topen\n\
             Scan completed: 2 open ports found\n"
        );
    }

    #[test]
    fn text_includes_closed_when_asked() {
        let out = render_text("example.org", &unordered(), true);
        let rows: Vec<&str> = out.lines().skip(3).take(3).collect();
        assert_eq!(rows, vec!["22/tcp\tclosed", "80/tcp\topen", "443/tcp\topen"]);
        assert!(out.ends_with("Scan completed: 2 open ports found\n"));
    }

    #[test]
    fn empty_results_render_summary() {
        let out = render_text("10.0.0.1", &[], true);
        assert!(out.starts_with("Scan Results for 10.0.0.1:\n"));
        assert!(out.contains("Scan completed: 0 open ports found"));
    }

    #[test]
    fn json_report_is_sorted_and_counted() {
        let report = ScanReport::new(
            "example.org",
            unordered(),
            OffsetDateTime::UNIX_EPOCH,
            Duration::from_millis(1500),
        );
        let v: serde_json::Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();

        assert_eq!(v["host"], "example.org");
        assert_eq!(v["started_at"], "1970-01-01T00:00:00Z");
        assert_eq!(v["elapsed_ms"], 1500);
        assert_eq!(v["scanned"], 3);
        assert_eq!(v["open_count"], 2);
        let ports: Vec<i64> = v["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["port"].as_i64().unwrap())
            .collect();
        assert_eq!(ports, vec![22, 80, 443]);
    }
}
