//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod event;
pub mod guest;
pub mod host;
pub mod notification_preferences;
pub mod otp;
pub mod vendor;
pub mod white_label;

pub use event::EventEntity;
pub use guest::GuestEntity;
pub use host::HostEntity;
pub use notification_preferences::NotificationPreferencesEntity;
pub use otp::OtpEntity;
pub use vendor::VendorEntity;
pub use white_label::WhiteLabelEntity;
