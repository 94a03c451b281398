pub mod analytics;
pub mod auth;
pub mod availability;
pub mod booking_filters;
pub mod booking_form;
pub mod calendar;
pub mod clients;
pub mod dialog;
pub mod files;
pub mod gateway;
pub mod money;
pub mod notifications;
pub mod settings;
pub mod storage;
pub mod submission;
pub mod time_format;

#[cfg(test)]
pub mod test_support;
