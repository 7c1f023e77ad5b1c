//! Repository implementations for database operations.

pub mod credential;
pub mod event;
pub mod guest;
pub mod host;
pub mod notification_preferences;
pub mod otp;
pub mod vendor;
pub mod white_label;

pub use credential::CredentialRepository;
pub use event::{EventContent, EventRepository};
pub use guest::{GuestDetails, GuestRepository, NewGuest};
pub use host::{HostRepository, NewHost};
pub use notification_preferences::NotificationPreferencesRepository;
pub use otp::OtpRepository;
pub use vendor::VendorRepository;
pub use white_label::{NewWhiteLabel, WhiteLabelRepository};
