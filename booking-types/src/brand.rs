//! Records behind the brand-facing dashboard: marketplace creators,
//! campaigns, contracts and usage licenses.
//!
//! Escrow here is a status on a campaign or contract; no payment provider is
//! involved.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Share of every contract fee kept by the platform.
pub const PLATFORM_FEE_PERCENT: i64 = 10;

/// What the creator receives out of `amount_cents` once the platform fee is
/// taken.
pub fn creator_share_cents(amount_cents: i64) -> i64 {
    amount_cents - amount_cents * PLATFORM_FEE_PERCENT / 100
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    InProgress,
    PendingApproval,
    Completed,
}

impl CampaignStatus {
    pub const ALL: [CampaignStatus; 4] = [
        CampaignStatus::Draft,
        CampaignStatus::InProgress,
        CampaignStatus::PendingApproval,
        CampaignStatus::Completed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::InProgress => "In Progress",
            Self::PendingApproval => "Pending Approval",
            Self::Completed => "Completed",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InProgress => "in_progress",
            Self::PendingApproval => "pending_approval",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value.trim())
    }

    /// Funds for these campaigns are still held.
    pub fn holds_escrow(&self) -> bool {
        matches!(self, Self::InProgress | Self::PendingApproval)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    pub creators: Vec<String>,
    pub status: CampaignStatus,
    pub budget_cents: i64,
    pub escrow_cents: i64,
    pub assets_delivered: i32,
    pub go_live: Option<NaiveDate>,
    pub license_expiry: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub territory: String,
    pub channels: Vec<String>,
    pub duration_days: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    PendingSignature,
    Signed,
}

impl ContractStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::PendingSignature => "Pending Signature",
            Self::Signed => "Signed",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingSignature => "pending_signature",
            Self::Signed => "signed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        [Self::PendingSignature, Self::Signed]
            .into_iter()
            .find(|s| s.as_str() == value.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    InEscrow,
    Released,
}

impl PaymentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::InEscrow => "In Escrow",
            Self::Released => "Released",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InEscrow => "in_escrow",
            Self::Released => "released",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        [Self::InEscrow, Self::Released]
            .into_iter()
            .find(|s| s.as_str() == value.trim())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: i64,
    pub project_name: String,
    pub creator_name: String,
    pub creator_handle: Option<String>,
    pub status: ContractStatus,
    pub signed_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub territory: String,
    pub channels: Vec<String>,
    pub total_fee_cents: i64,
    pub platform_fee_cents: i64,
    pub payment_status: PaymentStatus,
    pub deliverables: Option<String>,
}

impl Contract {
    pub fn creator_earnings_cents(&self) -> i64 {
        self.total_fee_cents - self.platform_fee_cents
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseStatus {
    Active,
    ExpiringSoon,
    Expired,
}

impl LicenseStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::ExpiringSoon => "Expiring Soon",
            Self::Expired => "Expired",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::ExpiringSoon => "expiring_soon",
            Self::Expired => "expired",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        [Self::Active, Self::ExpiringSoon, Self::Expired]
            .into_iter()
            .find(|s| s.as_str() == value.trim())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub id: i64,
    pub asset_name: String,
    pub creator_name: String,
    pub territory: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub channels: Vec<String>,
    pub status: LicenseStatus,
}

impl License {
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.end_date - today).num_days().max(0)
    }

    pub fn is_live(&self) -> bool {
        matches!(self.status, LicenseStatus::Active | LicenseStatus::ExpiringSoon)
    }
}

/// A creator listed in the brand marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub tagline: String,
    pub followers: i64,
    pub engagement_pct: f64,
    pub price_cents: i64,
    pub turnaround: String,
    pub tags: Vec<String>,
    pub verified: bool,
    pub creator_type: String,
}

impl Creator {
    /// Case-insensitive match on name, location or any tag.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query)
            || self.location.to_lowercase().contains(&query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }
}

/// Headline numbers on the brand dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandSummary {
    pub escrow_total_cents: i64,
    pub escrow_project_ids: Vec<i64>,
    pub pending_approvals: usize,
    pub active_campaigns: usize,
    pub live_licenses: usize,
    pub expiring_licenses: usize,
    pub creator_earnings_cents: i64,
}

impl BrandSummary {
    pub fn compute(campaigns: &[Campaign], contracts: &[Contract], licenses: &[License]) -> Self {
        let escrow_total_cents = campaigns
            .iter()
            .filter(|c| c.status.holds_escrow())
            .map(|c| c.escrow_cents)
            .sum();
        let escrow_project_ids = campaigns
            .iter()
            .filter(|c| c.escrow_cents > 0)
            .map(|c| c.id)
            .collect();

        Self {
            escrow_total_cents,
            escrow_project_ids,
            pending_approvals: campaigns
                .iter()
                .filter(|c| c.status == CampaignStatus::PendingApproval)
                .count(),
            active_campaigns: campaigns
                .iter()
                .filter(|c| c.status == CampaignStatus::InProgress)
                .count(),
            live_licenses: licenses.iter().filter(|l| l.is_live()).count(),
            expiring_licenses: licenses
                .iter()
                .filter(|l| l.status == LicenseStatus::ExpiringSoon)
                .count(),
            creator_earnings_cents: contracts.iter().map(Contract::creator_earnings_cents).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign(id: i64, status: CampaignStatus, escrow_cents: i64) -> Campaign {
        Campaign {
            id,
            name: format!("Campaign {}", id),
            creators: vec!["Sophia Chen".into()],
            status,
            budget_cents: escrow_cents,
            escrow_cents,
            assets_delivered: 0,
            go_live: None,
            license_expiry: None,
            due_date: None,
            territory: "Global".into(),
            channels: vec!["Social".into()],
            duration_days: 30,
        }
    }

    #[test]
    fn escrow_total_only_counts_open_campaigns() {
        let campaigns = vec![
            campaign(1, CampaignStatus::InProgress, 500_000),
            campaign(2, CampaignStatus::PendingApproval, 250_000),
            campaign(3, CampaignStatus::Completed, 320_000),
            campaign(4, CampaignStatus::Draft, 0),
        ];
        let summary = BrandSummary::compute(&campaigns, &[], &[]);
        assert_eq!(summary.escrow_total_cents, 750_000);
        assert_eq!(summary.pending_approvals, 1);
        assert_eq!(summary.active_campaigns, 1);
        assert_eq!(summary.escrow_project_ids, vec![1, 2, 3]);
    }

    #[test]
    fn creator_keeps_ninety_percent() {
        assert_eq!(creator_share_cents(500_000), 450_000);
        let contract = Contract {
            id: 1,
            project_name: "Spring Collection Launch".into(),
            creator_name: "Sophia Chen".into(),
            creator_handle: None,
            status: ContractStatus::Signed,
            signed_date: None,
            expiration_date: None,
            territory: "North America".into(),
            channels: vec![],
            total_fee_cents: 500_000,
            platform_fee_cents: 50_000,
            payment_status: PaymentStatus::Released,
            deliverables: None,
        };
        assert_eq!(contract.creator_earnings_cents(), 450_000);
    }

    #[test]
    fn creator_search_covers_tags() {
        let creator = Creator {
            id: 1,
            name: "Emma".into(),
            location: "Los Angeles, CA".into(),
            tagline: String::new(),
            followers: 42_300,
            engagement_pct: 4.2,
            price_cents: 45_000,
            turnaround: "12h".into(),
            tags: vec!["Fashion".into(), "Beauty".into()],
            verified: true,
            creator_type: "model".into(),
        };
        assert!(creator.matches("beauty"));
        assert!(creator.matches("los angeles"));
        assert!(!creator.matches("fitness"));
    }
}
