//! Domain models for Labbe.

pub mod account;
pub mod event;
pub mod guest;
pub mod notification;
pub mod otp;
pub mod vendor;
pub mod white_label;

pub use account::{Account, AccountKind, AccountRole, Credentials, Host, Vendor};
pub use event::{Event, EventStatus, GuestStats, GuestStatusBreakdown, PopulatedEvent};
pub use guest::{Guest, GuestInput, GuestStatus, InvitationMethod};
pub use notification::NotificationPreferences;
pub use otp::{OtpPurpose, OtpRecord, OtpUserType};
pub use vendor::VendorProfile;
pub use white_label::WhiteLabel;
