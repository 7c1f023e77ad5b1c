//! Domain services for Labbe.
//!
//! Services contain business logic that operates on domain models.

pub mod guest_reconcile;

pub use guest_reconcile::{plan_guest_reconcile, GuestChange, GuestReconcilePlan};
