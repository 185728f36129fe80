//! Browse views over cards and entries
//!
//! List-and-filter view-models used by the CLI and TUI surfaces. Each view
//! owns its own error slot; a failed refresh keeps the previously loaded
//! rows visible alongside the error message.

pub mod cards;
pub mod entries;

pub use cards::CardBrowser;
pub use entries::EntryBrowser;
