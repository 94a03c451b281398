//! Domain records shared by the agency bookings server and the browser build.
//!
//! Everything here is plain data plus the validation that both sides agree on.
//! Nothing in this crate talks to a database or the DOM.

pub mod book_out;
pub mod booking;
pub mod brand;
pub mod client;
pub mod error;
pub mod notification;
pub mod talent;

pub use book_out::{BookOut, BookOutReason, NewBookOut};
pub use booking::{
    booking_file_storage_path, sanitize_file_name, Booking, BookingFile, BookingStatus,
    BookingType, CreateBookingPayload, Currency, FieldPatch, NotifyChannels, RateType,
    UpdateBookingPayload, UploadedFile, ALL_DAY_CALL_TIME, ALL_DAY_WRAP_TIME,
};
pub use brand::{
    creator_share_cents, BrandSummary, Campaign, CampaignStatus, Contract, ContractStatus,
    Creator, License, LicenseStatus, PaymentStatus, PLATFORM_FEE_PERCENT,
};
pub use client::{industry_key, Client, NewClient, PaymentTerms, INDUSTRY_TAGS};
pub use error::BookingError;
pub use notification::{
    BookingNotificationRow, ChannelSettings, NotificationChannel, CHANNEL_SETTINGS_STORAGE_KEY,
};
pub use talent::Talent;
