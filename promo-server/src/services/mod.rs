//! Service Layer
//!
//! Business flows above the repositories. The bonus engine has its own
//! module (`crate::bonus`), the rest lives here.

pub mod invitation;

pub use invitation::InvitationService;
