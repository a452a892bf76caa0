//! Application layer for Palaver
//!
//! Pure view-model and generic runtime for the chat client, keeping the
//! orchestration loop independent of any concrete terminal or socket so the
//! same code runs in production and in simulation tests.
//!
//! # Components
//!
//! - [`App`]: view model, the render sink for [`palaver_client`] effects
//! - [`Driver`]: trait for platform-specific I/O
//! - [`Runtime`]: generic orchestration loop using Driver
//! - [`IdentityStore`]: persistent `{display_name, session_id}` storage
//! - [`StatsPoller`]: periodic read of aggregate server counters

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod app;
mod driver;
mod identity;
mod runtime;
mod stats;

pub use app::{App, Screen};
pub use driver::{AppInput, Driver};
pub use identity::{FileIdentityStore, IdentityError, IdentityStore, MemoryIdentityStore};
pub use runtime::Runtime;
pub use stats::{StatsHandle, StatsPoller};
