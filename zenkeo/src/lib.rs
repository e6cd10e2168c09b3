//! # zenkeo
//!
//! Rust client for Atlantic Zenkeo networked air conditioners.
//!
//! ## Features
//!
//! - Byte-exact implementation of the unit's TCP protocol
//! - Async/await API using Tokio
//! - Parse failures reported as "unavailable", connection failures as errors
//! - Thermostat-style controller that remembers the last active mode
//!
//! ## Quick Start
//!
//! ```no_run
//! use zenkeo::DeviceClient;
//!
//! #[tokio::main]
//! async fn main() -> zenkeo::Result<()> {
//!     // The MAC is resolved by the caller (ARP, router, label...)
//!     let client = DeviceClient::new("192.168.1.50", "A4:CF:12:0B:9E:01")?;
//!
//!     client.hello().await?;
//!     client.init().await?;
//!
//!     match client.get_state().await? {
//!         Some(state) => println!("{}", state),
//!         None => println!("Unit unavailable"),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod climate;
pub mod config;
pub mod device;
pub mod error;

// Re-exports
pub use climate::{Climate, ClimateState, HvacMode};
pub use config::{ClientConfig, ReadStrategy};
pub use device::DeviceClient;
pub use error::{Error, Result};

// Re-export types
pub use zenkeo_core::{Command, Diagnostics, MacAddress, ParseError, SessionState, TracingDiagnostics};
pub use zenkeo_types::{DeviceState, FanSpeed, Limits, Mode, StateRequest};
