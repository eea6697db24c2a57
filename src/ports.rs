use crate::types::Port;
use thiserror::Error;

/// Errors produced while expanding a port specification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PortParseError {
    /// A token that should have been an integer was not.
    #[error("invalid port number: {token:?}")]
    InvalidNumber { token: String },
    /// A range spec that did not split into exactly `start-end`.
    #[error("invalid port range format: {spec:?}")]
    MalformedRange { spec: String },
}

/// Expand a port specification into the ordered list of ports to scan.
///
/// Supported forms, checked in this order:
/// - inclusive range: `20-25` (ascending; `25-20` expands to nothing)
/// - comma list: `80, 443,22` (pieces trimmed, order and duplicates kept)
/// - single port: `8080`
///
/// Values are not bounds-checked; anything that is not a valid TCP port is
/// reported as closed by the probe.
pub fn parse_ports(spec: &str) -> Result<Vec<Port>, PortParseError> {
    if spec.contains('-') {
        let parts: Vec<&str> = spec.split('-').collect();
        let [start, end] = parts.as_slice() else {
            return Err(PortParseError::MalformedRange {
                spec: spec.to_string(),
            });
        };
        let start = parse_port_token(start)?;
        let end = parse_port_token(end)?;
        return Ok((start..=end).collect());
    }

    if spec.contains(',') {
        return spec
            .split(',')
            .map(|piece| parse_port_token(piece.trim()))
            .collect();
    }

    Ok(vec![parse_port_token(spec)?])
}

fn parse_port_token(token: &str) -> Result<Port, PortParseError> {
    token
        .parse::<Port>()
        .map_err(|_| PortParseError::InvalidNumber {
            token: token.to_string(),
        })
}
