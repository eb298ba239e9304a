//! Synthetic event feeds.
//!
//! A [`Feed`] owns an [`EventSource`] and, while attached, a background worker that asks the
//! source for a new event once per cadence and delivers it over a channel. Widgets drain the
//! channel once per frame, so all buffer mutation stays on the UI thread.

mod source;
mod worker;

pub use source::{EventSource, ScriptedSource};
pub use worker::Feed;
