//! Enov8 CMDB API interaction
//!
//! # Module Structure
//!
//! - [`resource`] - Resource types and the fixed endpoint map
//! - [`payload`] - JSON body for resource updates
//! - [`http`] - HTTP client with per-client timeout and TLS settings
//!
//! # Example
//!
//! ```ignore
//! use crate::cmdb::http::{CmdbHttpClient, TransportOptions};
//! use crate::cmdb::resource::{endpoint_url, ResourceType};
//!
//! async fn example() -> Result<(), crate::error::ActionError> {
//!     let client = CmdbHttpClient::new(TransportOptions::default())?;
//!     let url = endpoint_url("https://cmdb.example.com", ResourceType::SystemComponent);
//!     let body = r#"{"Resource Name":"OrderService"}"#.to_string();
//!     client.put(&url, &[("app-id", "bot"), ("app-key", "key")], body).await?;
//!     Ok(())
//! }
//! ```

pub mod http;
pub mod payload;
pub mod resource;
