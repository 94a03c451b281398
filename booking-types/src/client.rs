use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BookingError;

/// Tags offered when creating a client, as displayed.
pub const INDUSTRY_TAGS: [&str; 14] = [
    "Fashion",
    "Beauty",
    "Fitness",
    "Commercial",
    "Editorial",
    "E-commerce",
    "Advertising",
    "Film/TV",
    "Events",
    "Sports",
    "Luxury",
    "Tech",
    "Food & Beverage",
    "Automotive",
];

/// Lowercase alphanumeric key of a tag, so "Film/TV" matches the `filmtv`
/// filter and "E-commerce" matches `ecommerce`.
pub fn industry_key(tag: &str) -> String {
    tag.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTerms {
    #[default]
    Net15,
    Net30,
    Net60,
    Net90,
    UponCompletion,
    SplitDeposit,
}

impl PaymentTerms {
    pub const ALL: [PaymentTerms; 6] = [
        PaymentTerms::Net15,
        PaymentTerms::Net30,
        PaymentTerms::Net60,
        PaymentTerms::Net90,
        PaymentTerms::UponCompletion,
        PaymentTerms::SplitDeposit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Net15 => "net15",
            Self::Net30 => "net30",
            Self::Net60 => "net60",
            Self::Net90 => "net90",
            Self::UponCompletion => "upon_completion",
            Self::SplitDeposit => "split_deposit",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Net15 => "Net 15",
            Self::Net30 => "Net 30",
            Self::Net60 => "Net 60",
            Self::Net90 => "Net 90",
            Self::UponCompletion => "Upon Completion",
            Self::SplitDeposit => "50% Deposit / 50% Upon Completion",
        }
    }

    /// Accepts both the stored key and the display label.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == value || t.label().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for PaymentTerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub company: String,
    pub contact_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub terms: PaymentTerms,
    pub industry_tags: Vec<String>,
    pub notes: Option<String>,
    pub revenue_cents: i64,
    pub bookings_count: i64,
    pub last_booking_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Client {
    pub fn has_industry(&self, key: &str) -> bool {
        self.industry_tags.iter().any(|tag| industry_key(tag) == key)
    }

    /// Folds a duplicate record into this one: counters add up, tags union,
    /// and the most recent activity wins.
    pub fn absorb(&mut self, duplicate: &Client) {
        self.revenue_cents += duplicate.revenue_cents;
        self.bookings_count += duplicate.bookings_count;
        for tag in &duplicate.industry_tags {
            if !self.industry_tags.contains(tag) {
                self.industry_tags.push(tag.clone());
            }
        }
        self.last_booking_at = self.last_booking_at.max(duplicate.last_booking_at);
    }
}

/// Form body for adding or editing a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewClient {
    pub company: String,
    pub contact_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub terms: PaymentTerms,
    pub industry_tags: Vec<String>,
    pub notes: Option<String>,
}

impl NewClient {
    pub fn is_complete(&self) -> bool {
        !self.company.trim().is_empty() && !self.contact_name.trim().is_empty()
    }

    pub fn validate(&self) -> Result<(), BookingError> {
        if self.company.trim().is_empty() {
            return Err(BookingError::validation("company name is required"));
        }
        if self.contact_name.trim().is_empty() {
            return Err(BookingError::validation("contact name is required"));
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            if !email.contains('@') {
                return Err(BookingError::validation("email address is invalid"));
            }
        }
        Ok(())
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.industry_tags.iter().position(|t| t == tag) {
            self.industry_tags.remove(pos);
        } else {
            self.industry_tags.push(tag.to_string());
        }
    }
}

impl From<&Client> for NewClient {
    fn from(client: &Client) -> Self {
        Self {
            company: client.company.clone(),
            contact_name: client.contact_name.clone(),
            email: client.email.clone(),
            phone: client.phone.clone(),
            website: client.website.clone(),
            address: client.address.clone(),
            terms: client.terms,
            industry_tags: client.industry_tags.clone(),
            notes: client.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn industry_key_normalizes_display_tags() {
        assert_eq!(industry_key("Film/TV"), "filmtv");
        assert_eq!(industry_key("E-commerce"), "ecommerce");
        assert_eq!(industry_key("Food & Beverage"), "foodbeverage");
    }

    #[test]
    fn payment_terms_parse_key_or_label() {
        assert_eq!(PaymentTerms::parse("net30"), Some(PaymentTerms::Net30));
        assert_eq!(PaymentTerms::parse("Net 60"), Some(PaymentTerms::Net60));
        assert_eq!(PaymentTerms::parse("Da"), None);
    }

    #[test]
    fn new_client_needs_company_and_contact() {
        let mut form = NewClient {
            company: "Acme Inc.".into(),
            ..Default::default()
        };
        assert!(!form.is_complete());
        assert!(form.validate().is_err());

        form.contact_name = "John Doe".into();
        assert!(form.is_complete());
        assert!(form.validate().is_ok());

        form.email = Some("not-an-email".into());
        assert!(form.validate().is_err());
    }

    #[test]
    fn toggling_a_tag_twice_removes_it() {
        let mut form = NewClient::default();
        form.toggle_tag("Beauty");
        assert_eq!(form.industry_tags, vec!["Beauty".to_string()]);
        form.toggle_tag("Beauty");
        assert!(form.industry_tags.is_empty());
    }
}
