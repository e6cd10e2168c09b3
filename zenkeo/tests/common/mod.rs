//! Loopback stand-in for a Zenkeo unit

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use zenkeo::{ClientConfig, DeviceClient};
use zenkeo_core::Envelope;

pub const MAC: &str = "AA:BB:CC:DD:EE:FF";

/// Leading bytes the unit puts before the payload it echoes
pub const RESPONSE_PREFIX: [u8; 6] = [0x00, 0x00, 0x27, 0x14, 0x00, 0x2B];

/// What the fake unit does with one request
pub enum Reply {
    Send(Vec<u8>),
    Delayed(Duration, Vec<u8>),

    /// First `at` bytes, a pause, then the rest
    Split { bytes: Vec<u8>, at: usize, pause: Duration },

    Close,
}

/// Decides the reply from the connection index and the decoded request
pub type Responder = Arc<dyn Fn(usize, &Envelope) -> Reply + Send + Sync>;

pub struct MockDevice {
    pub port: u16,
    pub received: Arc<Mutex<Vec<Envelope>>>,
    accepted: Arc<AtomicUsize>,
}

impl MockDevice {
    /// Echo every payload behind a short prefix
    pub async fn echo() -> Self {
        Self::spawn(Arc::new(|_: usize, envelope: &Envelope| Reply::Send(echo(envelope)))).await
    }

    pub async fn spawn(responder: Responder) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let received = Arc::new(Mutex::new(Vec::new()));

        let accepted = Arc::new(AtomicUsize::new(0));

        let log = received.clone();
        let counter = accepted.clone();
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let index = counter.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(serve(socket, index, responder.clone(), log.clone()));
            }
        });

        Self {
            port,
            received,
            accepted,
        }
    }

    pub fn client(&self) -> DeviceClient {
        self.client_with(|config| config)
    }

    pub fn client_with(&self, configure: impl FnOnce(ClientConfig) -> ClientConfig) -> DeviceClient {
        let config = ClientConfig::new("127.0.0.1", MAC)
            .with_port(self.port)
            .with_read_timeout(Duration::from_secs(2));
        DeviceClient::from_config(configure(config)).unwrap()
    }

    /// Connections accepted so far
    pub fn connections(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }

    pub fn sequences(&self) -> Vec<u8> {
        self.received.lock().unwrap().iter().map(|e| e.sequence).collect()
    }
}

pub fn echo(envelope: &Envelope) -> Vec<u8> {
    let mut response = RESPONSE_PREFIX.to_vec();
    response.extend_from_slice(&envelope.payload);
    response
}

async fn serve(
    mut socket: TcpStream,
    index: usize,
    responder: Responder,
    log: Arc<Mutex<Vec<Envelope>>>,
) {
    loop {
        let mut header = [0u8; Envelope::HEADER_SIZE];
        if socket.read_exact(&mut header).await.is_err() {
            return;
        }

        let length = u32::from_be_bytes([header[76], header[77], header[78], header[79]]) as usize;
        let mut frame = header.to_vec();
        frame.resize(Envelope::HEADER_SIZE + length, 0);
        if socket.read_exact(&mut frame[Envelope::HEADER_SIZE..]).await.is_err() {
            return;
        }

        let envelope = Envelope::decode(&frame).unwrap();
        let reply = responder(index, &envelope);
        log.lock().unwrap().push(envelope);

        match reply {
            Reply::Send(bytes) => {
                if socket.write_all(&bytes).await.is_err() {
                    return;
                }
            }
            Reply::Delayed(delay, bytes) => {
                tokio::time::sleep(delay).await;
                if socket.write_all(&bytes).await.is_err() {
                    return;
                }
            }
            Reply::Split { bytes, at, pause } => {
                if socket.write_all(&bytes[..at]).await.is_err() {
                    return;
                }
                tokio::time::sleep(pause).await;
                if socket.write_all(&bytes[at..]).await.is_err() {
                    return;
                }
            }
            Reply::Close => return,
        }
    }
}
