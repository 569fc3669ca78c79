//! TCP server for the adapter
//!
//! Accepts connections and gives every client its own [`Session`]. Clients
//! share nothing, so each connection is a single task that reads a line,
//! applies it and writes the response before reading the next one.

use std::net::SocketAddr;

use anyhow::Context;
use log::{debug, info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use crate::protocol::{create_error, ErrorCode, Response};
use crate::session::Session;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7878;
pub const DEFAULT_MAX_LINE: usize = 4096;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Longest accepted request line in bytes, newline excluded
    pub max_line_len: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_line_len: DEFAULT_MAX_LINE,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] over an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("WAGARA_ADAPTER_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = lookup("WAGARA_ADAPTER_PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let max_line_len = lookup("WAGARA_ADAPTER_MAX_LINE")
            .and_then(|s| s.trim().parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or(DEFAULT_MAX_LINE);

        Self {
            host,
            port,
            max_line_len,
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid adapter address {}:{}", self.host, self.port))
    }
}

/// Check if the adapter is disabled via environment
pub fn is_disabled() -> bool {
    std::env::var("WAGARA_ADAPTER_DISABLED")
        .map(|v| disabled_value(&v))
        .unwrap_or(false)
}

fn disabled_value(v: &str) -> bool {
    let v = v.trim();
    v == "1" || v.eq_ignore_ascii_case("true")
}

/// Start the TCP server
///
/// `ready_tx` receives the bound address once the listener is up, which lets
/// callers bind port 0 and learn the real port.
pub async fn run_server(
    config: ServerConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    if is_disabled() {
        info!("adapter disabled via WAGARA_ADAPTER_DISABLED");
        return Ok(());
    }

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    let bound = listener.local_addr()?;
    info!("adapter listening on {}", bound);
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let mut client_id_counter = 0u64;
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;
        let max_line_len = config.max_line_len;

        info!("client {} connected from {}", client_id, addr);
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id, max_line_len).await {
                warn!("client {} error: {:#}", client_id, e);
            }
            info!("client {} disconnected", client_id);
        });
    }
}

async fn handle_client(socket: TcpStream, client_id: u64, max_line_len: usize) -> anyhow::Result<()> {
    let (reader, writer) = socket.into_split();
    serve_lines(BufReader::new(reader), writer, Session::new(client_id), max_line_len).await
}

/// Outcome of reading one line under the length limit
enum ReadLine {
    Line,
    TooLong,
    Eof,
}

/// Read up to `max_line_len` bytes of the next line into `buf`
///
/// An over-long line is consumed through its newline and reported as
/// [`ReadLine::TooLong`].
async fn read_bounded_line<R>(reader: &mut R, buf: &mut Vec<u8>, max_line_len: usize) -> anyhow::Result<ReadLine>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    // One extra byte for the newline
    let limit = max_line_len as u64 + 1;
    let n = (&mut *reader).take(limit).read_until(b'\n', buf).await?;
    if n == 0 {
        return Ok(ReadLine::Eof);
    }
    if buf.last() == Some(&b'\n') {
        return Ok(ReadLine::Line);
    }
    if buf.len() <= max_line_len {
        // Final line without a newline
        return Ok(ReadLine::Line);
    }

    let mut rest = Vec::new();
    loop {
        rest.clear();
        let n = (&mut *reader).take(limit).read_until(b'\n', &mut rest).await?;
        if n == 0 || rest.last() == Some(&b'\n') {
            break;
        }
    }
    Ok(ReadLine::TooLong)
}

/// Drive a session over any line-oriented byte stream
pub async fn serve_lines<R, W>(
    mut reader: R,
    mut writer: W,
    mut session: Session,
    max_line_len: usize,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line: Vec<u8> = Vec::with_capacity(max_line_len.min(DEFAULT_MAX_LINE));
    let mut out: Vec<u8> = Vec::with_capacity(4096);

    loop {
        let response = match read_bounded_line(&mut reader, &mut line, max_line_len).await? {
            ReadLine::Eof => break,
            ReadLine::TooLong => {
                warn!("client {}: line exceeds {} bytes", session.client_id(), max_line_len);
                create_error(
                    0,
                    ErrorCode::LineTooLong,
                    format!("request lines are limited to {} bytes", max_line_len),
                )
            }
            ReadLine::Line => {
                let text = match std::str::from_utf8(&line) {
                    Ok(text) => text.trim(),
                    Err(_) => {
                        warn!("client {}: line is not utf-8", session.client_id());
                        let err = create_error(0, ErrorCode::ParseError, "line is not valid utf-8");
                        write_response(&mut writer, &mut out, &err).await?;
                        continue;
                    }
                };
                if text.is_empty() {
                    continue;
                }
                session.handle_line(text)
            }
        };

        debug!("client {}: -> seq {}", session.client_id(), response.seq());
        write_response(&mut writer, &mut out, &response).await?;
    }

    Ok(())
}

async fn write_response<W>(writer: &mut W, buf: &mut Vec<u8>, response: &Response) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    buf.clear();
    serde_json::to_writer(&mut *buf, response)?;
    buf.push(b'\n');
    writer.write_all(buf).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 7878);
        assert_eq!(config.max_line_len, 4096);
        assert_eq!(
            config.socket_addr().unwrap(),
            "127.0.0.1:7878".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_config_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("WAGARA_ADAPTER_HOST", "0.0.0.0"),
            ("WAGARA_ADAPTER_PORT", "9000"),
            ("WAGARA_ADAPTER_MAX_LINE", "128"),
        ]));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_line_len, 128);
    }

    #[test]
    fn test_config_ignores_garbage() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("WAGARA_ADAPTER_HOST", "  "),
            ("WAGARA_ADAPTER_PORT", "port"),
            ("WAGARA_ADAPTER_MAX_LINE", "0"),
        ]));
        assert_eq!(config, ServerConfig::default());

        let bad = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert!(bad.socket_addr().is_err());
    }

    #[test]
    fn test_disabled_values() {
        assert!(disabled_value("1"));
        assert!(disabled_value("TRUE"));
        assert!(disabled_value(" true "));
        assert!(!disabled_value("0"));
        assert!(!disabled_value(""));
    }

    async fn run_script(input: &[u8], max_line_len: usize) -> Vec<serde_json::Value> {
        let mut out = Vec::new();
        serve_lines(input, &mut out, Session::new(1), max_line_len)
            .await
            .unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_serve_lines_script() {
        let script = b"{\"type\":\"hello\",\"seq\":1}\n\n{\"type\":\"new_game\",\"seq\":2,\"mode\":\"classic\",\"seed\":5}\n{\"type\":\"observe\",\"seq\":3}";
        let replies = run_script(script, DEFAULT_MAX_LINE).await;
        assert_eq!(replies.len(), 3);
        assert_eq!(replies[0]["type"], "welcome");
        assert_eq!(replies[1]["type"], "observation");
        assert_eq!(replies[1]["seq"], 2);
        assert_eq!(replies[2]["type"], "observation");
        assert_eq!(replies[2]["state"]["score"], 0);
    }

    #[tokio::test]
    async fn test_serve_lines_rejects_long_lines() {
        let mut script = Vec::new();
        script.extend_from_slice(b"{\"type\":\"hello\",\"seq\":1}\n");
        script.extend(std::iter::repeat(b'x').take(200));
        script.push(b'\n');
        script.extend_from_slice(b"{\"type\":\"hello\",\"seq\":2}\n");

        let replies = run_script(&script, 64).await;
        assert_eq!(replies.len(), 3);
        assert_eq!(replies[0]["type"], "welcome");
        assert_eq!(replies[1]["code"], "line_too_long");
        // The stream stays usable after the oversized line
        assert_eq!(replies[2]["type"], "welcome");
        assert_eq!(replies[2]["seq"], 2);
    }

    #[tokio::test]
    async fn test_serve_lines_rejects_invalid_utf8() {
        let replies = run_script(b"\xff\xfe\n{\"type\":\"hello\",\"seq\":4}\n", 64).await;
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["code"], "parse_error");
        assert_eq!(replies[1]["seq"], 4);
    }
}
