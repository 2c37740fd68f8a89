//! Catalog commands.
//!
//! # Usage
//!
//! ```bash
//! lk-cli catalog check
//! lk-cli catalog search --category photo-gifts --query mug
//! ```

use std::path::Path;

use lk_printers_core::{Catalog, CatalogFilter, Category, CategorySelector, ProductId};
use lk_printers_storefront::data::{self, SiteData};

use super::CommandError;

/// Something in the data files worth fixing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// No product is filed under the category, so its page is always empty.
    EmptyCategory(Category),
    /// `site.json` has no title or description for the category.
    MissingCopy(Category),
    /// A menu link points at a product page that does not exist.
    DeadProductLink { menu: String, href: String },
}

impl Finding {
    /// Whether `catalog check` should fail because of this finding.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::DeadProductLink { .. })
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCategory(c) => write!(f, "category {c} has no products"),
            Self::MissingCopy(c) => write!(f, "category {c} has no page copy"),
            Self::DeadProductLink { menu, href } => {
                write!(f, "menu {menu:?} links to missing product {href}")
            }
        }
    }
}

/// Cross-check the catalog against the site tables.
#[must_use]
pub fn findings(catalog: &Catalog, site: &SiteData) -> Vec<Finding> {
    let stocked: Vec<Category> = catalog
        .category_counts()
        .into_iter()
        .map(|(c, _)| c)
        .collect();

    let mut out: Vec<Finding> = Category::ALL
        .into_iter()
        .filter(|c| !stocked.contains(c))
        .map(Finding::EmptyCategory)
        .collect();

    out.extend(
        Category::ALL
            .into_iter()
            .filter(|c| !site.categories.iter().any(|copy| copy.category == *c))
            .map(Finding::MissingCopy),
    );

    for menu in &site.mega_menus {
        for item in menu.sections.iter().flat_map(|s| &s.items) {
            let Some(id) = item.href.strip_prefix("/product/") else {
                continue;
            };
            let known = id
                .parse::<ProductId>()
                .is_ok_and(|id| catalog.get(id).is_some());
            if !known {
                out.push(Finding::DeadProductLink {
                    menu: menu.nav.clone(),
                    href: item.href.clone(),
                });
            }
        }
    }

    out
}

/// Load both data files and report problems.
///
/// # Errors
///
/// Returns an error if a file cannot be loaded or any finding is an error.
pub fn check(data_dir: &Path) -> Result<(), CommandError> {
    let catalog = data::load_catalog(data_dir)?;
    let site = data::load_site(data_dir)?;

    let findings = findings(&catalog, &site);
    for finding in &findings {
        if finding.is_error() {
            tracing::error!("{finding}");
        } else {
            tracing::warn!("{finding}");
        }
    }

    #[allow(clippy::print_stdout)]
    {
        println!(
            "{} products, {} stores, {} menus",
            catalog.len(),
            site.stores.len(),
            site.mega_menus.len()
        );
        for (category, count) in catalog.category_counts() {
            println!("  {:<24} {count:>3}", category.name());
        }
    }

    let errors = findings.iter().filter(|f| f.is_error()).count();
    if errors > 0 {
        return Err(CommandError::Check(errors));
    }
    Ok(())
}

/// Print the products a listing page would show.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub fn search(data_dir: &Path, category: &str, query: &str) -> Result<(), CommandError> {
    let catalog = data::load_catalog(data_dir)?;
    let filter = CatalogFilter::new(CategorySelector::parse(category), query);
    let products = catalog.filter(&filter);
    let currency = catalog.currency();

    #[allow(clippy::print_stdout)]
    {
        for product in &products {
            println!(
                "{:>4}  {:<28} {:>8}  {}",
                product.id.as_u32(),
                product.name,
                product.price.display(currency),
                product.category.name()
            );
        }
        println!("{} of {} products", products.len(), catalog.len());
    }
    Ok(())
}
