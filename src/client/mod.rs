//! Gateway protocol client.
//!
//! | File | Contents |
//! |------|----------|
//! | `core.rs` | [`GatewayClient`] and the four remote operations |
//! | `builder.rs` | [`GatewayClientBuilder`] |
//! | `poller.rs` | [`GatewayClient::wait_for_task`] and [`WaitOptions`] |

mod builder;
mod core;
mod poller;

pub use builder::GatewayClientBuilder;
pub use core::GatewayClient;
pub use poller::{WaitOptions, DEFAULT_POLL_INTERVAL};
