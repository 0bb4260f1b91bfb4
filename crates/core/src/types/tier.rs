//! Subscription tiers and the static plan table.
//!
//! A store owner's tier caps how many products the store may list. The plan
//! table is static configuration, not persisted state.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A store owner's subscription tier.
///
/// Unknown persisted values deserialize as [`Tier::Free`], so stale data from
/// older seeds never breaks a load. `Free` sits last because serde requires
/// the `other` catch-all on the final variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    #[default]
    #[serde(other)]
    Free,
}

/// Static description of one tier: monthly price and product quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierPlan {
    pub tier: Tier,
    pub name: &'static str,
    pub price: Decimal,
    pub max_products: usize,
    pub benefits: &'static [&'static str],
}

static FREE: TierPlan = TierPlan {
    tier: Tier::Free,
    name: "Free",
    price: dec!(0),
    max_products: 2,
    benefits: &["Up to 2 products", "Basic dashboard", "Community support"],
};

static BRONZE: TierPlan = TierPlan {
    tier: Tier::Bronze,
    name: "Bronze",
    price: dec!(19),
    max_products: 10,
    benefits: &[
        "Up to 10 products",
        "Discount code tools",
        "Priority listing boost",
        "Email support",
    ],
};

static SILVER: TierPlan = TierPlan {
    tier: Tier::Silver,
    name: "Silver",
    price: dec!(49),
    max_products: 20,
    benefits: &[
        "Up to 20 products",
        "Advanced analytics",
        "Priority support",
        "Featured store badge",
    ],
};

static GOLD: TierPlan = TierPlan {
    tier: Tier::Gold,
    name: "Gold",
    price: dec!(99),
    max_products: 100,
    benefits: &[
        "Up to 100 products",
        "Exclusive privileges",
        "Top placement",
        "VIP 24/7 support",
        "Custom store theme",
    ],
};

impl Tier {
    /// All tiers, cheapest first.
    pub const ALL: [Self; 4] = [Self::Free, Self::Bronze, Self::Silver, Self::Gold];

    /// The static plan backing this tier.
    #[must_use]
    pub const fn plan(self) -> &'static TierPlan {
        match self {
            Self::Free => &FREE,
            Self::Bronze => &BRONZE,
            Self::Silver => &SILVER,
            Self::Gold => &GOLD,
        }
    }

    /// Human-readable plan name ("Free", "Bronze", ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.plan().name
    }

    /// Product quota for this tier.
    #[must_use]
    pub const fn max_products(self) -> usize {
        self.plan().max_products
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::Bronze => write!(f, "bronze"),
            Self::Silver => write!(f, "silver"),
            Self::Gold => write!(f, "gold"),
        }
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "bronze" => Ok(Self::Bronze),
            "silver" => Ok(Self::Silver),
            "gold" => Ok(Self::Gold),
            _ => Err(format!("invalid tier: {s}")),
        }
    }
}
