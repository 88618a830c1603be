//! # ensqr
//!
//! Resolve ENS names and turn every resolved record into a scannable payload.
//!
//! A resolution looks up the ETH address and five text records
//! (`com.twitter`, `org.telegram`, `com.github`, `email`, `url`) for a name,
//! concurrently, over Ethereum JSON-RPC. Failed lookups degrade to
//! "not found" for that field alone. The resulting record set is then turned
//! into an ordered list of display items, each a label plus the payload a QR
//! code or similar would encode.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ensqr::{derive_items, EnsQrConfig, ResolutionOutcome, ResolutionPipeline, RpcNameService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EnsQrConfig::builder()
//!         .rpc_url("https://eth.llamarpc.com")
//!         .build()?;
//!
//!     let service = RpcNameService::new(&config)?;
//!     let pipeline = ResolutionPipeline::new(service, config);
//!
//!     match pipeline.resolve("vitalik.eth").await? {
//!         ResolutionOutcome::Found(records) => {
//!             for item in derive_items(&records).iter() {
//!                 println!("{}: {}", item.label, item.payload);
//!             }
//!         }
//!         ResolutionOutcome::NothingFound => println!("No ENS name found"),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod abi;
pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod namehash;
pub mod pipeline;
pub mod qr;
pub mod records;
pub mod session;

// Re-exports for convenience
pub use client::{NameService, ResolverHandle, RpcNameService, RpcResolver};
pub use config::{EnsQrConfig, EnsQrConfigBuilder};
pub use display::{derive_items, Cursor, DisplayItem, DisplayItems};
pub use error::{EnsQrError, Result};
pub use namehash::{namehash, Node};
pub use pipeline::ResolutionPipeline;
pub use qr::{encode_item, render_item};
pub use records::{Field, FieldValue, RecordSet, ResolutionOutcome};
pub use session::{ResolutionSession, ResolutionTicket};

/// Current version of ensqr
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default Ethereum mainnet JSON-RPC endpoint
pub const DEFAULT_RPC_URL: &str = "https://eth.llamarpc.com";

/// ENS registry contract on mainnet
pub const ENS_REGISTRY_ADDRESS: &str = "0x00000000000C2E074eC69A0dFb2997BA6C7d2e1e";

/// Top-level suffix of names served by the dWeb gateway
pub const ENS_TLD_SUFFIX: &str = ".eth";

/// Gateway host suffix for dWeb links (`foo.eth` -> `foo.eth.limo`)
pub const DWEB_GATEWAY_SUFFIX: &str = ".limo";
