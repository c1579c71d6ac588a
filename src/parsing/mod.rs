//! Line-level parsing building blocks.
//!
//! These pieces are shared by both recency policies:
//!
//! - [`patterns`] - noise and URL pattern tables (plain data)
//! - [`classifier`] - noise versus candidate line decisions
//! - [`line`] - structural message-line shapes
//! - [`datetime`] - date-section headers and 12-hour clock resolution

pub mod classifier;
pub mod datetime;
pub mod line;
pub mod patterns;

// Re-export commonly used items
pub use classifier::{LineClassifier, LineKind, NoiseKind};
pub use datetime::{DateResolver, Meridiem, parse_date_header, resolve_time};
pub use line::parse_message_line;
pub use patterns::{KAKAO_SYSTEM_PATTERNS, PatternTable, URL_PATTERNS};
