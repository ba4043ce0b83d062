//! Comparison session state machine and URL synchronization for
//! FretCompare.
//!
//! The session is the page-facing surface of the comparison feature:
//!
//! - [`ComparisonSet`]: the bounded, ordered membership with named
//!   transitions (`add`, `remove`, `clear`, `replace_all`)
//! - [`url`]: the query-parameter codec and the [`HistoryWriter`] observer
//!   for shallow navigation
//! - [`ComparisonSession`]: the facade wiring token resolution, data
//!   fetching, the set, and URL sync together
//!
//! # Example
//!
//! ```rust,ignore
//! use fret_session::{ComparisonSession, RecordingHistory, Viewport};
//! use fret_data::{ApiClient, ApiConfig, StoreCache};
//!
//! let client = ApiClient::over_http(&ApiConfig::default())?;
//! let mut session = ComparisonSession::new(
//!     client,
//!     StoreCache::new(),
//!     Viewport::Wide,
//!     RecordingHistory::new(),
//! );
//!
//! session.hydrate("?products=fender-strat,gibson-lp").await;
//! let view = session.view();
//! ```

pub mod session;
pub mod set;
pub mod url;

pub use session::{ComparisonSession, REFRESH_FAILED_NOTICE};
pub use set::{ComparisonSet, SetState, Transition, Viewport};
pub use url::{HistoryWriter, RecordingHistory};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::session::ComparisonSession;
    pub use crate::set::{ComparisonSet, SetState, Transition, Viewport};
    pub use crate::url::{HistoryWriter, RecordingHistory};
}
