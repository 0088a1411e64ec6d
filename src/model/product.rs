//! Catalog products as served by the product listing endpoint.
//!
//! A [`Product`] is immutable once loaded. Its `price` is either a [`Price`] or `None`,
//! the latter marking a showcase item that can be viewed but never bought.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raised when a number cannot be used as a price.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("Invalid price: {0} (prices must be finite and non-negative)")]
pub struct InvalidPrice(pub f64);

/// A non-negative, finite amount of money.
///
/// The constructor is the only way in, so every `Price` in the system already satisfies
/// the invariant; deserialization goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    pub const ZERO: Price = Price(0.0);

    /// Returns `None` for negative, NaN or infinite amounts.
    pub fn new(amount: f64) -> Option<Self> {
        (amount.is_finite() && amount >= 0.0).then_some(Self(amount))
    }

    pub fn amount(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Price {
    type Error = InvalidPrice;

    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        Price::new(amount).ok_or(InvalidPrice(amount))
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

/// Saturates at `f64::MAX`, so a sum of prices is still a finite `Price`.
impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price((self.0 + rhs.0).min(f64::MAX))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Price> for Price {
    fn sum<I: Iterator<Item = &'a Price>>(iter: I) -> Price {
        iter.copied().sum()
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{:.2}", self.0)
        }
    }
}

/// Product categories. The set is fixed by the listing service; anything else fails to
/// decode rather than being silently bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "софт-скил")]
    SoftSkill,
    #[serde(rename = "хард-скил")]
    HardSkill,
    #[serde(rename = "другое")]
    Other,
    #[serde(rename = "дополнительное")]
    Additional,
    #[serde(rename = "кнопка")]
    Button,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::SoftSkill,
        Category::HardSkill,
        Category::Other,
        Category::Additional,
        Category::Button,
    ];

    /// Name used by the listing service.
    pub fn wire_name(self) -> &'static str {
        match self {
            Category::SoftSkill => "софт-скил",
            Category::HardSkill => "хард-скил",
            Category::Other => "другое",
            Category::Additional => "дополнительное",
            Category::Button => "кнопка",
        }
    }

    /// Stable ASCII name, suitable for style hooks and log fields.
    pub fn slug(self) -> &'static str {
        match self {
            Category::SoftSkill => "soft",
            Category::HardSkill => "hard",
            Category::Other => "other",
            Category::Additional => "additional",
            Category::Button => "button",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Raised when a string is not one of the known categories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Accepts either the wire name or the slug.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.wire_name() == s || c.slug() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub category: Category,
    /// `None` marks a priceless product: visible in the catalog, never purchasable.
    pub price: Option<Price>,
}

impl Product {
    /// Creates a new Product with an empty description and image.
    ///
    /// # Arguments
    /// * `id` - Catalog identifier
    /// * `title` - Display title
    /// * `category` - One of the fixed categories
    /// * `price` - `None` for a priceless product
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        category: Category,
        price: Option<Price>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            image: String::new(),
            category,
            price,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn is_purchasable(&self) -> bool {
        self.price.is_some()
    }
}

/// Response body of `GET /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductList {
    pub total: usize,
    pub items: Vec<Product>,
}

impl From<Vec<Product>> for ProductList {
    fn from(items: Vec<Product>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}
