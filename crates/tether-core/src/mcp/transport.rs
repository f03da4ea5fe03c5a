//! Transport kinds and the inference rule for remote servers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use super::spec::{RemoteConfig, ServerConfig};

/// How a client talks to an MCP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transport {
    Stdio,
    Http,
    StreamableHttp,
    Sse,
}

impl Transport {
    pub const ALL: [Transport; 4] = [
        Transport::Stdio,
        Transport::Http,
        Transport::StreamableHttp,
        Transport::Sse,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Transport::Stdio => "stdio",
            Transport::Http => "http",
            Transport::StreamableHttp => "streamable-http",
            Transport::Sse => "sse",
        }
    }

    pub fn is_remote(self) -> bool {
        !matches!(self, Transport::Stdio)
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Transport::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown transport '{s}' (expected stdio, http, streamable-http or sse)")
            })
    }
}

/// Determine the transport a config should be labelled with.
///
/// Stdio configs are always `stdio`. Remote configs use their explicit
/// `transport` when set; otherwise a URL whose path contains an `/sse`
/// segment is `sse` and everything else (including unparsable URLs) is `http`.
pub fn infer_transport(config: &ServerConfig) -> Transport {
    match config {
        ServerConfig::Stdio(_) => Transport::Stdio,
        ServerConfig::Remote(remote) => infer_remote_transport(remote),
    }
}

/// [`infer_transport`] for a config already known to be remote.
pub fn infer_remote_transport(remote: &RemoteConfig) -> Transport {
    remote
        .transport
        .unwrap_or_else(|| transport_from_url(&remote.url))
}

fn transport_from_url(raw: &str) -> Transport {
    match Url::parse(raw) {
        Ok(url) if has_sse_segment(url.path()) => Transport::Sse,
        _ => Transport::Http,
    }
}

/// Matches `/sse` followed by end of path, `/`, `?` or `&`.
fn has_sse_segment(path: &str) -> bool {
    path.match_indices("/sse").any(|(idx, needle)| {
        matches!(
            path[idx + needle.len()..].chars().next(),
            None | Some('/' | '?' | '&')
        )
    })
}
