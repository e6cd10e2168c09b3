//! TCP transport

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, trace, warn};
use zenkeo_core::constants::{DEFAULT_TIMEOUT, MAX_RESPONSE_SIZE};

use crate::{error::*, Transport};

/// TCP transport for Zenkeo units
///
/// Holds at most one stream. Every [`receive`](Transport::receive) is a
/// single read of up to [`MAX_RESPONSE_SIZE`] bytes; there is no length
/// framing on this protocol to reassemble against.
pub struct TcpTransport {
    addr: String,
    port: u16,
    socket_addr: Option<SocketAddr>,
    stream: Option<TcpStream>,
    connect_timeout: Duration,
}

impl TcpTransport {
    /// Create new TCP transport
    pub fn new(addr: impl Into<String>, port: u16) -> Self {
        Self {
            addr: addr.into(),
            port,
            socket_addr: None,
            stream: None,
            connect_timeout: Duration::from_secs(DEFAULT_TIMEOUT),
        }
    }

    /// Set connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Resolve address to SocketAddr
    async fn resolve_addr(&mut self) -> Result<SocketAddr> {
        if let Some(addr) = self.socket_addr {
            return Ok(addr);
        }

        let addr_str = format!("{}:{}", self.addr, self.port);

        let addrs: Vec<SocketAddr> = tokio::net::lookup_host(&addr_str)
            .await
            .map_err(|e| Error::InvalidAddress(format!("{}: {}", addr_str, e)))?
            .collect();

        let addr = addrs
            .first()
            .ok_or_else(|| Error::InvalidAddress(format!("No addresses found for {}", addr_str)))?;

        self.socket_addr = Some(*addr);
        Ok(*addr)
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn connect(&mut self) -> Result<()> {
        if self.is_connected() {
            return Err(Error::AlreadyConnected);
        }

        let addr = self.resolve_addr().await?;

        debug!("Connecting to {}...", addr);

        let stream = timeout(self.connect_timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| Error::ConnectionTimeout(self.connect_timeout))?
            .map_err(Error::from_connect)?;

        // Disable Nagle's algorithm; each frame is a single write
        stream.set_nodelay(true)?;

        debug!("Connected to {}", addr);

        self.stream = Some(stream);
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            debug!("Disconnecting from {}...", self.remote_addr());

            // Graceful shutdown
            let _ = stream.shutdown().await;
        }

        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;

        trace!("Sending {} bytes: {:02X?}", data.len(), &data[..data.len().min(16)]);

        stream.write_all(data).await?;
        stream.flush().await?;

        Ok(())
    }

    async fn receive(&mut self, timeout_duration: Duration) -> Result<BytesMut> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;

        let mut buf = BytesMut::with_capacity(MAX_RESPONSE_SIZE);

        // Bound the read to the ceiling even if the buffer over-allocated
        let n = timeout(
            timeout_duration,
            (&mut *stream).take(MAX_RESPONSE_SIZE as u64).read_buf(&mut buf),
        )
        .await
        .map_err(|_| Error::ReadTimeout)?
        .map_err(Error::Io)?;

        if n == 0 {
            // Peer closed; drop our end so the next call reconnects
            self.stream = None;
            return Err(Error::ConnectionClosed);
        }

        trace!("Received {} bytes: {:02X?}", n, &buf[..n.min(16)]);

        Ok(buf)
    }

    fn remote_addr(&self) -> String {
        self.socket_addr
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| format!("{}:{}", self.addr, self.port))
    }
}

impl Drop for TcpTransport {
    fn drop(&mut self) {
        if self.is_connected() {
            warn!("TCP transport dropped while still connected");
        }
    }
}
