//! High-level device interface

use std::sync::Arc;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use zenkeo_core::constants::{DEFAULT_READ_TIMEOUT, MAX_RESPONSE_SIZE};
use zenkeo_core::{
    parser, Command, Diagnostics, Envelope, MacAddress, Session, SessionState, TracingDiagnostics,
};
use zenkeo_transport::{TcpTransport, Transport};
use zenkeo_types::{DeviceState, StateRequest};

use crate::config::{ClientConfig, ReadStrategy};
use crate::error::Result;

/// Zenkeo air-conditioner client
///
/// High-level interface for one unit. Exchanges are strictly one at a time;
/// concurrent callers queue on an internal lock. The connection is opened
/// lazily and reopened whenever the previous exchange failed or was
/// abandoned mid-way.
///
/// # Examples
///
/// ```no_run
/// use zenkeo::{DeviceClient, FanSpeed, Mode, StateRequest};
///
/// #[tokio::main]
/// async fn main() -> zenkeo::Result<()> {
///     let client = DeviceClient::new("192.168.1.50", "A4:CF:12:0B:9E:01")?;
///
///     if let Some(state) = client.get_state().await? {
///         println!("{}", state);
///     }
///
///     let request = StateRequest::new(true, Mode::Cool, FanSpeed::Auto, 22);
///     client.change_state(request).await?;
///
///     Ok(())
/// }
/// ```
pub struct DeviceClient {
    transport: Mutex<Box<dyn Transport>>,
    session: Session,
    mac: MacAddress,
    read_timeout: Duration,
    read_strategy: ReadStrategy,
    diagnostics: Arc<dyn Diagnostics>,
}

impl DeviceClient {
    /// Create a client for the unit at `host` on the default port
    ///
    /// # Errors
    ///
    /// Fails if `mac` is not a valid MAC address.
    pub fn new(host: impl Into<String>, mac: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(host, mac))
    }

    /// Create a client from a full configuration
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let mac = MacAddress::parse(&config.mac)?;
        let transport =
            TcpTransport::new(config.host, config.port).with_connect_timeout(config.connect_timeout);

        Ok(Self::with_transport(Box::new(transport), mac)
            .with_read_timeout(config.read_timeout)
            .with_read_strategy(config.read_strategy))
    }

    /// Create a client over an arbitrary transport
    pub fn with_transport(transport: Box<dyn Transport>, mac: MacAddress) -> Self {
        Self {
            transport: Mutex::new(transport),
            session: Session::new(),
            mac,
            read_timeout: Duration::from_secs(DEFAULT_READ_TIMEOUT),
            read_strategy: ReadStrategy::default(),
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    /// Set read timeout
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set how responses are collected
    pub fn with_read_strategy(mut self, strategy: ReadStrategy) -> Self {
        self.read_strategy = strategy;
        self
    }

    /// Replace the diagnostics sink
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Get the unit's MAC address
    pub fn mac(&self) -> &MacAddress {
        &self.mac
    }

    /// Get current session state
    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    /// Send the hello handshake, returning the raw response
    pub async fn hello(&self) -> Result<Bytes> {
        self.exchange(&Command::Hello).await
    }

    /// Send the init command, returning the raw response
    pub async fn init(&self) -> Result<Bytes> {
        self.exchange(&Command::Init).await
    }

    /// Power the unit on with its current settings
    pub async fn turn_on(&self) -> Result<Bytes> {
        info!("Turning on {}", self.mac);
        self.exchange(&Command::PowerOn).await
    }

    /// Power the unit off
    pub async fn turn_off(&self) -> Result<Bytes> {
        info!("Turning off {}", self.mac);
        self.exchange(&Command::PowerOff).await
    }

    /// Read the current state
    ///
    /// The protocol has no read-only query: this writes
    /// [`StateRequest::query`] and decodes the echoed state, so a unit whose
    /// settings differ may briefly take the query values.
    ///
    /// Returns `Ok(None)` when the unit answered with something that does not
    /// decode; connection failures are errors. An undecodable answer also
    /// closes the connection so its unread remainder is never taken for the
    /// next reply.
    pub async fn get_state(&self) -> Result<Option<DeviceState>> {
        self.execute_for_state(Command::query()).await
    }

    /// Write a full state and return what the unit reports back
    ///
    /// Returns `Ok(None)` when the response does not decode, closing the
    /// connection like [`get_state`](Self::get_state).
    pub async fn change_state(&self, request: StateRequest) -> Result<Option<DeviceState>> {
        info!(
            "Changing state: power={} mode={} fan={} target={}",
            request.power, request.mode, request.fan_speed, request.target_temperature
        );
        self.execute_for_state(Command::SetState(request)).await
    }

    /// Close the connection. The next operation reconnects.
    pub async fn disconnect(&self) -> Result<()> {
        let mut transport = self.transport.lock().await;

        if transport.is_connected() {
            info!("Disconnecting from {}...", transport.remote_addr());
        }

        transport.disconnect().await?;
        self.session.close();

        Ok(())
    }

    // Helper methods

    async fn execute_for_state(&self, command: Command) -> Result<Option<DeviceState>> {
        let payload = command.payload()?;

        let mut guard = self.transport.lock().await;
        let transport = &mut **guard;

        let response = self.exchange_locked(transport, &command, payload).await?;

        // Still under the lock: a failed decode drops the stream before anyone reuses it
        match parser::parse_state(&response) {
            Ok(state) => {
                debug!("Decoded {}", state);
                Ok(Some(state))
            }
            Err(e) => {
                self.diagnostics.parse_failed(&e, &response);
                self.discard_stream(transport).await;
                Ok(None)
            }
        }
    }

    async fn exchange(&self, command: &Command) -> Result<Bytes> {
        // Built before touching the socket so a bad request costs no sequence number
        let payload = command.payload()?;

        let mut guard = self.transport.lock().await;
        let response = self.exchange_locked(&mut **guard, command, payload).await?;

        Ok(response.freeze())
    }

    async fn exchange_locked(
        &self,
        transport: &mut dyn Transport,
        command: &Command,
        payload: Bytes,
    ) -> Result<BytesMut> {
        self.ensure_connected(transport).await?;

        let sequence = self.session.next_sequence();
        let frame = Envelope::new(self.mac.clone(), sequence, payload).encode()?;

        self.session.begin_exchange()?;
        self.diagnostics.frame_sent(command, sequence, &frame);

        match self.round_trip(transport, command, &frame).await {
            Ok(response) => {
                self.session.complete_exchange()?;
                self.diagnostics.response_received(command, &response);
                Ok(response)
            }
            Err(e) => {
                warn!("{} failed: {}", command.name(), e);
                self.discard_stream(transport).await;
                Err(e.into())
            }
        }
    }

    /// Fault the session and close the stream; the next exchange reconnects.
    ///
    /// Used whenever the bytes left on the socket can no longer be matched
    /// to a request.
    async fn discard_stream(&self, transport: &mut dyn Transport) {
        self.session.fault();
        if let Err(e) = transport.disconnect().await {
            debug!("Failed to close faulted stream: {}", e);
        }
    }

    async fn ensure_connected(&self, transport: &mut dyn Transport) -> Result<()> {
        let state = self.session.state();

        if state == SessionState::Connected && transport.is_connected() {
            return Ok(());
        }

        let reason = match state {
            SessionState::Unconnected => None,
            SessionState::Connected => Some("connection closed"),
            SessionState::Exchanging => Some("previous exchange abandoned"),
            SessionState::Faulted => Some("previous exchange failed"),
        };

        match reason {
            Some(reason) => {
                self.diagnostics.reconnecting(&transport.remote_addr(), reason);
                transport.disconnect().await?;
                self.session.close();
            }
            None => {
                if transport.is_connected() {
                    transport.disconnect().await?;
                }
                info!("Connecting to {}...", transport.remote_addr());
            }
        }

        transport.connect().await?;
        self.session.connected();

        Ok(())
    }

    async fn round_trip(
        &self,
        transport: &mut dyn Transport,
        command: &Command,
        frame: &[u8],
    ) -> zenkeo_transport::Result<BytesMut> {
        transport.send(frame).await?;

        match self.read_strategy {
            ReadStrategy::UntilComplete if command.expects_state() => {
                self.receive_state(transport).await
            }
            _ => transport.receive(self.read_timeout).await,
        }
    }

    /// Keep reading until a full state body is buffered
    ///
    /// Stops early on the size ceiling or the overall deadline. The buffer
    /// never grows past [`MAX_RESPONSE_SIZE`]. An incomplete buffer fails to
    /// parse, which drops the stream.
    async fn receive_state(&self, transport: &mut dyn Transport) -> zenkeo_transport::Result<BytesMut> {
        let deadline = Instant::now() + self.read_timeout;
        let mut buf = transport.receive(self.read_timeout).await?;

        while !parser::is_complete(&buf) && buf.len() < MAX_RESPONSE_SIZE {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }

            match transport.receive(remaining).await {
                Ok(more) => {
                    let room = MAX_RESPONSE_SIZE - buf.len();
                    if more.len() > room {
                        debug!("Dropping {} bytes past the response ceiling", more.len() - room);
                    }
                    buf.extend_from_slice(&more[..more.len().min(room)]);
                }
                Err(zenkeo_transport::Error::ReadTimeout) => break,
                Err(e) => return Err(e),
            }
        }

        if !parser::is_complete(&buf) {
            debug!("State response still incomplete after {} bytes", buf.len());
        }

        Ok(buf)
    }
}
