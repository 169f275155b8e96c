//! Subscription tiers and the usage limits they put on an organization.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Cap on how many of a resource a tier allows.
pub enum Limit {
    /// No cap.
    Unlimited,
    /// At most this many.
    Capped(u32),
}

impl Limit {
    /// Whether `used` already fills the cap, so one more would exceed it.
    #[must_use]
    pub fn is_reached(self, used: u32) -> bool {
        match self {
            Self::Unlimited => false,
            Self::Capped(max) => used >= max,
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlimited => formatter.write_str("unlimited"),
            Self::Capped(max) => write!(formatter, "{max}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// How often a tier is billed.
pub enum BillingCycle {
    /// Billed every month.
    Monthly,
    /// Billed once a year.
    Yearly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Pricing plan an organization subscribes to.
pub struct SubscriptionTier {
    /// Tier identifier.
    pub id: u32,
    /// Plan name.
    pub name: String,
    /// Price per billing cycle in whole currency units.
    pub price: u64,
    /// Billing cadence.
    pub billing_cycle: BillingCycle,
    /// Customer accounts allowed.
    pub max_customers: Limit,
    /// Regional managers allowed.
    pub max_managers: Limit,
    /// Zones allowed.
    pub max_zones: Limit,
    /// Feature flags included in the plan.
    pub features: Vec<String>,
}

impl SubscriptionTier {
    /// Whether the plan includes the named feature flag.
    #[must_use]
    pub fn has_feature(&self, name: &str) -> bool {
        self.features.iter().any(|feature| feature == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Lifecycle state of an organization.
pub enum OrganizationStatus {
    /// Paying and in good standing.
    Active,
    /// Evaluating the product.
    Trial,
    /// Suspended, usually after a trial lapsed.
    Suspended,
    /// Closed.
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Lifecycle state of a subscription.
pub enum SubscriptionStatus {
    /// Paid and current.
    Active,
    /// Trial period.
    Trial,
    /// Trial or billing period ran out.
    Expired,
    /// Cancelled by the organization.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// An organization's subscription to a tier.
pub struct Subscription {
    /// Tier subscribed to.
    pub tier_id: u32,
    /// Current status.
    pub status: SubscriptionStatus,
    /// Last day of the trial, if on one.
    pub trial_end: Option<NaiveDate>,
}

impl Subscription {
    /// Whether the subscription grants access on `today`.
    ///
    /// A trial counts through its end date and not after, even if the nightly
    /// expiry job has not flipped its status yet.
    #[must_use]
    pub fn is_usable_on(&self, today: NaiveDate) -> bool {
        match self.status {
            SubscriptionStatus::Active => true,
            SubscriptionStatus::Trial => self.trial_end.is_none_or(|end| today <= end),
            SubscriptionStatus::Expired | SubscriptionStatus::Cancelled => false,
        }
    }

    /// Whole days left in the trial on `today`, or `None` when not on a trial.
    #[must_use]
    pub fn trial_days_left(&self, today: NaiveDate) -> Option<i64> {
        if self.status != SubscriptionStatus::Trial {
            return None;
        }
        self.trial_end.map(|end| (end - today).num_days().max(0))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Current resource counts of an organization.
pub struct UsageStats {
    /// Customer accounts.
    pub customers: u32,
    /// Regional managers.
    pub managers: u32,
    /// Zones.
    pub zones: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Operations that consume a tier-limited resource.
pub enum LimitedAction {
    /// Add a customer account.
    CreateCustomer,
    /// Add a regional manager.
    CreateManager,
    /// Add a zone.
    CreateZone,
}

impl LimitedAction {
    fn resource(self) -> &'static str {
        match self {
            Self::CreateCustomer => "Customer",
            Self::CreateManager => "Manager",
            Self::CreateZone => "Zone",
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Why an organization may not perform an action.
pub enum LimitError {
    /// Organization is suspended or closed.
    #[error("Organization is not active")]
    OrganizationInactive,
    /// Subscription is missing, expired, or cancelled.
    #[error("No active subscription")]
    NoActiveSubscription,
    /// Subscription belongs to a different tier than the one supplied.
    #[error("Subscription tier {expected} does not match tier {actual}")]
    TierMismatch {
        /// Tier the subscription names.
        expected: u32,
        /// Tier that was supplied.
        actual: u32,
    },
    /// The tier does not include a feature.
    #[error("Feature {0:?} is not included in your subscription")]
    FeatureDisabled(String),
    /// The tier's cap for the resource is used up.
    #[error("{resource} limit of {limit} reached. Please upgrade your subscription.")]
    LimitReached {
        /// Resource that is capped.
        resource: &'static str,
        /// The cap.
        limit: Limit,
    },
}

/// Organization status, subscription status and tier match, in that order.
fn check_standing(
    organization: OrganizationStatus,
    subscription: Option<&Subscription>,
    tier: &SubscriptionTier,
    today: NaiveDate,
) -> Result<(), LimitError> {
    if !matches!(
        organization,
        OrganizationStatus::Active | OrganizationStatus::Trial
    ) {
        return Err(LimitError::OrganizationInactive);
    }

    let subscription = subscription
        .filter(|sub| sub.is_usable_on(today))
        .ok_or(LimitError::NoActiveSubscription)?;
    if subscription.tier_id != tier.id {
        return Err(LimitError::TierMismatch {
            expected: subscription.tier_id,
            actual: tier.id,
        });
    }
    Ok(())
}

/// Decide whether an organization may perform `action` under its subscription.
///
/// # Errors
///
/// Returns a [`LimitError`] naming the first check that fails: organization
/// status, subscription status, tier match, then the resource cap.
pub fn enforce_limits(
    organization: OrganizationStatus,
    subscription: Option<&Subscription>,
    tier: &SubscriptionTier,
    usage: UsageStats,
    action: LimitedAction,
    today: NaiveDate,
) -> Result<(), LimitError> {
    check_standing(organization, subscription, tier, today)?;

    let (limit, used) = match action {
        LimitedAction::CreateCustomer => (tier.max_customers, usage.customers),
        LimitedAction::CreateManager => (tier.max_managers, usage.managers),
        LimitedAction::CreateZone => (tier.max_zones, usage.zones),
    };
    if limit.is_reached(used) {
        return Err(LimitError::LimitReached {
            resource: action.resource(),
            limit,
        });
    }
    Ok(())
}

/// Decide whether an organization may use the named feature.
///
/// # Errors
///
/// Runs the same standing checks as [`enforce_limits`], then returns
/// [`LimitError::FeatureDisabled`] when the tier lacks the feature.
pub fn enforce_feature(
    organization: OrganizationStatus,
    subscription: Option<&Subscription>,
    tier: &SubscriptionTier,
    feature: &str,
    today: NaiveDate,
) -> Result<(), LimitError> {
    check_standing(organization, subscription, tier, today)?;
    if tier.has_feature(feature) {
        Ok(())
    } else {
        Err(LimitError::FeatureDisabled(feature.to_owned()))
    }
}
