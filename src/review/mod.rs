//! Review session engine
//!
//! A session pulls the currently due cards into a queue, walks them one at
//! a time through reveal and rating, submits each rating to the scheduler,
//! and re-checks the due set when the queue runs out. Session state is
//! transient; navigating away simply drops it.

pub mod queue;
pub mod session;

pub use queue::{Advance, ReviewQueue};
pub use session::{RetryPoint, ReviewSession, SessionState, SessionStats};
