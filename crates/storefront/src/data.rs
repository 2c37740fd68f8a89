//! Static storefront data loaded from JSON at startup.
//!
//! Two documents live in the data directory:
//!
//! - `catalog.json` - products, assembled into a [`Catalog`]
//! - `site.json` - navigation, mega-menu, hero slides, category copy,
//!   stores, FAQs and the other tables the pages render
//!
//! Both are read once and shared read-only for the lifetime of the process.

use std::path::Path;

use lk_printers_core::catalog::CatalogDocument;
use lk_printers_core::{Catalog, CatalogError, Category, StoreId};
use serde::Deserialize;

/// File name of the product catalog.
pub const CATALOG_FILE: &str = "catalog.json";

/// File name of the site tables.
pub const SITE_FILE: &str = "site.json";

/// Data loading errors.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Copy shown at the top of a category page.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryCopy {
    pub category: Category,
    pub title: String,
    pub description: String,
}

/// A link in the main navigation bar.
#[derive(Debug, Clone, Deserialize)]
pub struct NavLink {
    pub name: String,
    pub href: String,
}

/// An entry inside a mega-menu section.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub href: String,
    #[serde(default)]
    pub is_new: bool,
}

/// A titled column in a mega-menu.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuSection {
    pub title: String,
    pub items: Vec<MenuItem>,
}

/// The dropdown shown when hovering a navigation link.
#[derive(Debug, Clone, Deserialize)]
pub struct MegaMenu {
    /// Name of the [`NavLink`] this menu hangs off.
    pub nav: String,
    pub sections: Vec<MenuSection>,
}

/// A slide in the home page hero carousel.
#[derive(Debug, Clone, Deserialize)]
pub struct HeroSlide {
    pub title: String,
    pub subtitle: String,
    pub cta: String,
    pub href: String,
    /// CSS modifier for the slide background.
    #[serde(default)]
    pub theme: String,
}

/// A tile in the home page "featured categories" grid.
#[derive(Debug, Clone, Deserialize)]
pub struct FeaturedCategory {
    pub name: String,
    pub description: String,
    pub image: String,
    pub href: String,
}

/// A "shop by business need" tile.
#[derive(Debug, Clone, Deserialize)]
pub struct BusinessNeed {
    pub name: String,
    pub description: String,
    pub href: String,
}

/// A customer testimonial.
#[derive(Debug, Clone, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub company: String,
    pub review: String,
    pub rating: u8,
}

/// A promise shown in the promo banner (free shipping, returns, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct Promise {
    pub title: String,
    pub description: String,
}

/// A physical store.
#[derive(Debug, Clone, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub hours: String,
    pub city: String,
}

impl Store {
    /// Case-insensitive substring match on city or address. `needle` must
    /// already be lower-cased.
    fn matches(&self, needle: &str) -> bool {
        self.city.to_lowercase().contains(needle) || self.address.to_lowercase().contains(needle)
    }
}

/// A help-centre question.
#[derive(Debug, Clone, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// Customer support contact details.
#[derive(Debug, Clone, Deserialize)]
pub struct SupportContact {
    pub phone: String,
    pub email: String,
    pub hours: String,
}

/// Everything in `site.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteData {
    pub categories: Vec<CategoryCopy>,
    pub navigation: Vec<NavLink>,
    #[serde(default)]
    pub mega_menus: Vec<MegaMenu>,
    #[serde(default)]
    pub hero_slides: Vec<HeroSlide>,
    #[serde(default)]
    pub featured_categories: Vec<FeaturedCategory>,
    #[serde(default)]
    pub business_needs: Vec<BusinessNeed>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub promises: Vec<Promise>,
    #[serde(default)]
    pub stores: Vec<Store>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    #[serde(default)]
    pub same_day_cities: Vec<String>,
    #[serde(default)]
    pub tracking_steps: Vec<String>,
    pub support: SupportContact,
}

impl SiteData {
    /// Copy for a category page, falling back to the category's name.
    #[must_use]
    pub fn category_copy(&self, category: Category) -> CategoryCopy {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .cloned()
            .unwrap_or_else(|| CategoryCopy {
                category,
                title: category.name().to_string(),
                description: "Browse our products".to_string(),
            })
    }

    /// Mega-menu attached to a navigation link, if any.
    #[must_use]
    pub fn mega_menu(&self, nav: &str) -> Option<&MegaMenu> {
        self.mega_menus.iter().find(|m| m.nav == nav)
    }

    /// Stores whose city or address contains `query`, ignoring case. An empty
    /// query returns every store.
    #[must_use]
    pub fn stores_matching(&self, query: &str) -> Vec<&Store> {
        let needle = query.trim().to_lowercase();
        self.stores.iter().filter(|s| s.matches(&needle)).collect()
    }
}

/// Load the product catalog from `dir/catalog.json`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or fails
/// catalog validation.
pub fn load_catalog(dir: &Path) -> Result<Catalog, DataError> {
    let doc: CatalogDocument = read_json(&dir.join(CATALOG_FILE))?;
    let catalog = Catalog::try_from(doc)?;
    tracing::info!(
        products = catalog.len(),
        currency = catalog.currency().code(),
        "Loaded catalog"
    );
    Ok(catalog)
}

/// Load the site tables from `dir/site.json`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON.
pub fn load_site(dir: &Path) -> Result<SiteData, DataError> {
    let site: SiteData = read_json(&dir.join(SITE_FILE))?;
    tracing::info!(
        categories = site.categories.len(),
        stores = site.stores.len(),
        faqs = site.faqs.len(),
        "Loaded site data"
    );
    Ok(site)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DataError::Parse {
        path: display,
        source,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn site_json() -> &'static str {
        r#"{
            "categories": [
                {"category": "apparel", "title": "Custom Apparel", "description": "Tees and hoodies"}
            ],
            "navigation": [{"name": "All Products", "href": "/products"}],
            "mega_menus": [{
                "nav": "All Products",
                "sections": [{"title": "Best Sellers", "items": [
                    {"name": "Mugs", "href": "/products?q=mug"},
                    {"name": "Drinkware", "href": "/drinkware", "is_new": true}
                ]}]
            }],
            "stores": [
                {"id": 1, "name": "Bangalore HQ", "address": "123 MG Road, Bangalore", "phone": "1", "hours": "9-8", "city": "Bangalore"},
                {"id": 2, "name": "Chennai", "address": "789 Anna Nagar, Chennai", "phone": "2", "hours": "9-8", "city": "Chennai"}
            ],
            "support": {"phone": "1800-123-4567", "email": "support@lkprinters.com", "hours": "Mon-Sat"}
        }"#
    }

    #[test]
    fn test_site_parses_with_defaults() {
        let site: SiteData = serde_json::from_str(site_json()).unwrap();
        assert!(site.faqs.is_empty());
        assert!(site.hero_slides.is_empty());
        let menu = site.mega_menu("All Products").unwrap();
        assert!(menu.sections[0].items[1].is_new);
        assert!(site.mega_menu("Drinkware").is_none());
    }

    #[test]
    fn test_category_copy_falls_back_to_name() {
        let site: SiteData = serde_json::from_str(site_json()).unwrap();
        assert_eq!(site.category_copy(Category::Apparel).title, "Custom Apparel");
        assert_eq!(site.category_copy(Category::Drinkware).title, "Drinkware");
    }

    #[test]
    fn test_stores_matching() {
        let site: SiteData = serde_json::from_str(site_json()).unwrap();
        assert_eq!(site.stores_matching("").len(), 2);
        let hits = site.stores_matching("  CHENNAI ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Chennai");
        // Address match
        assert_eq!(site.stores_matching("mg road").len(), 1);
        assert!(site.stores_matching("pune").is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_catalog(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn test_bundled_data_loads() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let catalog = load_catalog(&dir).unwrap();
        assert!(!catalog.is_empty());
        let site = load_site(&dir).unwrap();
        for category in Category::ALL {
            assert!(
                site.categories.iter().any(|c| c.category == category),
                "missing copy for {category}"
            );
        }
    }
}
