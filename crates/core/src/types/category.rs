//! Product categories and the category selector used for filtering.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not a known category slug.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// Closed set of categories products are bucketed into.
///
/// Serialized as the URL slug of the category page (e.g. `"photo-gifts"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[serde(rename = "calendars-diaries", alias = "calendars")]
    CalendarsDiaries,
    Apparel,
    Packaging,
    Stationery,
    CorporateGifts,
    PhotoGifts,
    Drinkware,
    #[serde(rename = "marketing-promo", alias = "marketing")]
    MarketingPromo,
    GiftHampers,
    SampleKit,
    RewardsRecognition,
    PremiumProducts,
}

impl Category {
    /// Every category, in navigation order.
    pub const ALL: [Self; 12] = [
        Self::CalendarsDiaries,
        Self::Apparel,
        Self::Packaging,
        Self::Stationery,
        Self::CorporateGifts,
        Self::PhotoGifts,
        Self::Drinkware,
        Self::MarketingPromo,
        Self::GiftHampers,
        Self::SampleKit,
        Self::RewardsRecognition,
        Self::PremiumProducts,
    ];

    /// Canonical slug, also the path of the category page.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::CalendarsDiaries => "calendars-diaries",
            Self::Apparel => "apparel",
            Self::Packaging => "packaging",
            Self::Stationery => "stationery",
            Self::CorporateGifts => "corporate-gifts",
            Self::PhotoGifts => "photo-gifts",
            Self::Drinkware => "drinkware",
            Self::MarketingPromo => "marketing-promo",
            Self::GiftHampers => "gift-hampers",
            Self::SampleKit => "sample-kit",
            Self::RewardsRecognition => "rewards-recognition",
            Self::PremiumProducts => "premium-products",
        }
    }

    /// Default display name, used when no copy is configured.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CalendarsDiaries => "Calendars & Diaries",
            Self::Apparel => "Apparel",
            Self::Packaging => "Packaging",
            Self::Stationery => "Business Stationery",
            Self::CorporateGifts => "Corporate Gifts",
            Self::PhotoGifts => "Photo Gifts",
            Self::Drinkware => "Drinkware",
            Self::MarketingPromo => "Marketing & Promo",
            Self::GiftHampers => "Gift Hampers",
            Self::SampleKit => "Sample Kit",
            Self::RewardsRecognition => "Rewards and Recognition",
            Self::PremiumProducts => "Premium Products",
        }
    }

    /// Look up a category by slug, accepting the short listing aliases.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.trim();
        match slug.to_ascii_lowercase().as_str() {
            "calendars" => Some(Self::CalendarsDiaries),
            "marketing" => Some(Self::MarketingPromo),
            lower => Self::ALL.into_iter().find(|c| c.slug() == lower),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl core::str::FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// Category selection for the listing page: one category or everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategorySelector {
    #[default]
    All,
    Only(Category),
}

impl CategorySelector {
    /// Sentinel slug selecting every category.
    pub const ALL_SLUG: &'static str = "all";

    /// Parse a selector from a query value.
    ///
    /// Unrecognized values select every category rather than failing.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        Category::from_slug(value).map_or(Self::All, Self::Only)
    }

    /// Whether `category` passes this selector.
    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == category,
        }
    }

    /// Slug for links and form values.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::All => Self::ALL_SLUG,
            Self::Only(category) => category.slug(),
        }
    }
}

impl From<Category> for CategorySelector {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}
