//! Rule-based maintenance assistant
//!
//! Classifies a free-text question (greeting, component mention, intent
//! keywords) and answers from response templates filled with the shared
//! boiler knowledge.

pub mod bot;
pub mod intent;
pub mod responses;

pub use bot::{ChatBot, Exchange};
pub use intent::{Classified, Intent};
