//! Building blocks demonstrating dispatch and ownership patterns.
//!
//! # Modules
//!
//! - [`dispatch`] -- overriding vs. separately named operations
//! - [`notify`] -- one service implementing two capabilities whose `send`
//!   operations clash
//! - [`resource`] -- scoped, idempotent resource release

pub mod dispatch;
pub mod notify;
pub mod resource;

pub use dispatch::{dispatch_all, BaseRecord, HidingRecord, OverridingRecord, Record};
pub use notify::{Channel, Delivery, EmailService, NotificationService, SmsService};
pub use resource::{
    scoped, BaseResource, Connection, DatabaseResource, EventLog, FileResource, Guard, Release,
};
