//! Client-side login throttling.
//!
//! Two failure classes are tracked independently: credential rejections
//! and transport failures. Each has its own strike threshold and lockout
//! length ([`LockoutPolicy`]).

pub mod notice;
pub mod policy;
pub mod state;

pub use notice::{format_remaining, AttemptNotice};
pub use policy::{LockoutCause, LockoutPolicy};
pub use state::{LoginAttemptState, Strike, Throttle, Tick};
