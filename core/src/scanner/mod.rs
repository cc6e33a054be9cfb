//! Process discovery: enumeration command invocation, output parsing and
//! deduplication.

mod lsof;
pub mod parse;

use crate::error::Result;
use crate::models::ListenerRecord;

pub use lsof::LsofScanner;

/// Trait for discovery sources producing one complete record set per call.
///
/// This is the seam between the fragile text scraping and its consumers:
/// the presentation layer can be driven by a fake implementation in tests
/// instead of spawning the real enumeration command.
pub trait Scanner: Send + Sync {
    /// Run one discovery cycle and return the deduplicated record set.
    fn scan(&self) -> impl std::future::Future<Output = Result<Vec<ListenerRecord>>> + Send;
}
