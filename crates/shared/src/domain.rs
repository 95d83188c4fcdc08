use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    Beer,
    Whisky,
    Vodka,
    Rum,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Beer,
        Category::Whisky,
        Category::Vodka,
        Category::Rum,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Beer => "Beer",
            Category::Whisky => "Whisky",
            Category::Vodka => "Vodka",
            Category::Rum => "Rum",
        }
    }

    /// Catalog endpoint path, relative to the configured base URL.
    pub fn endpoint_path(self) -> &'static str {
        match self {
            Category::Beer => "api/beers",
            Category::Whisky => "api/whisky",
            Category::Vodka => "api/vodka",
            Category::Rum => "api/rum",
        }
    }

    pub fn has_sub_filters(self) -> bool {
        self == Category::Whisky
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::UnknownCategory(raw.to_string()))
    }
}

/// Secondary classification, only meaningful while [`Category::Whisky`] is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SubFilter {
    #[default]
    All,
    SingleMalts,
    WorldWhisky,
    MadeInIndiaWhisky,
    BlendedScotch,
}

impl SubFilter {
    pub const ALL: [SubFilter; 5] = [
        SubFilter::All,
        SubFilter::SingleMalts,
        SubFilter::WorldWhisky,
        SubFilter::MadeInIndiaWhisky,
        SubFilter::BlendedScotch,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SubFilter::All => "All",
            SubFilter::SingleMalts => "Single Malts",
            SubFilter::WorldWhisky => "World Whisky",
            SubFilter::MadeInIndiaWhisky => "Made in India Whisky",
            SubFilter::BlendedScotch => "Blended Scotch",
        }
    }

    /// `All` admits every product; the others compare the product's category label exactly.
    pub fn matches(self, product: &Product) -> bool {
        match self {
            SubFilter::All => true,
            other => product.category == other.label(),
        }
    }
}

impl fmt::Display for SubFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SubFilter {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        SubFilter::ALL
            .into_iter()
            .find(|filter| filter.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::UnknownSubFilter(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(value) => write!(f, "{value}"),
            ProductId::Text(value) => f.write_str(value),
        }
    }
}

/// Identity used when rendering a product list. Identifiers may be missing or
/// repeated across categories, so the list position is the fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProductKey {
    Id(ProductId),
    Index(usize),
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductKey::Id(id) => write!(f, "{id}"),
            ProductKey::Index(index) => write!(f, "#{index}"),
        }
    }
}

/// Non-negative currency amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize)]
pub struct Price(f64);

impl Price {
    pub fn new(amount: f64) -> Result<Self, DomainError> {
        if amount.is_finite() && amount >= 0.0 {
            Ok(Self(amount))
        } else {
            Err(DomainError::InvalidPrice(amount.to_string()))
        }
    }

    pub fn amount(self) -> f64 {
        self.0
    }
}

impl FromStr for Price {
    type Err = DomainError;

    /// Accepts thousands separators, e.g. `"1,250"`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let cleaned = raw.replace(',', "");
        let amount = cleaned
            .trim()
            .parse::<f64>()
            .map_err(|_| DomainError::InvalidPrice(raw.to_string()))?;
        Price::new(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{:.2}", self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawPrice {
            Number(f64),
            Text(String),
            Other(serde::de::IgnoredAny),
        }

        // Unusable prices read as zero so one bad record does not sink the list.
        let price = match RawPrice::deserialize(deserializer)? {
            RawPrice::Number(amount) => Price::new(amount).ok(),
            RawPrice::Text(text) => text.parse().ok(),
            RawPrice::Other(_) => None,
        };
        Ok(price.unwrap_or_default())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub volume: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image: String,
}

impl Product {
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: Price) -> Self {
        Self {
            id: None,
            name: name.into(),
            category: category.into(),
            volume: String::new(),
            price,
            image: String::new(),
        }
    }

    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_volume(mut self, volume: impl Into<String>) -> Self {
        self.volume = volume.into();
        self
    }

    /// Render identity at `index` within the list being displayed. Keys are
    /// only unique when the backend's ids are.
    pub fn key(&self, index: usize) -> ProductKey {
        match &self.id {
            Some(ProductId::Text(text)) if text.trim().is_empty() => ProductKey::Index(index),
            Some(id) => ProductKey::Id(id.clone()),
            None => ProductKey::Index(index),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub text: String,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_parse_case_insensitively() {
        assert_eq!("whisky".parse::<Category>(), Ok(Category::Whisky));
        assert_eq!(" RUM ".parse::<Category>(), Ok(Category::Rum));
        assert_eq!(
            "gin".parse::<Category>(),
            Err(DomainError::UnknownCategory("gin".into()))
        );
    }

    #[test]
    fn every_category_has_a_distinct_endpoint() {
        let mut paths: Vec<_> = Category::ALL.iter().map(|c| c.endpoint_path()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), Category::ALL.len());
        assert_eq!(Category::Beer.endpoint_path(), "api/beers");
    }

    #[test]
    fn sub_filter_matches_exact_category_label() {
        let malt = Product::new("Glenfiddich 12", "Single Malts", Price::default());
        assert!(SubFilter::SingleMalts.matches(&malt));
        assert!(SubFilter::All.matches(&malt));
        assert!(!SubFilter::BlendedScotch.matches(&malt));

        let lowercase = Product::new("Odd label", "single malts", Price::default());
        assert!(!SubFilter::SingleMalts.matches(&lowercase));
    }

    #[test]
    fn sub_filters_parse_from_labels() {
        assert_eq!(
            "made in india whisky".parse::<SubFilter>(),
            Ok(SubFilter::MadeInIndiaWhisky)
        );
        assert!("Bourbon".parse::<SubFilter>().is_err());
    }

    #[test]
    fn product_tolerates_sparse_wire_records() {
        let products: Vec<Product> = serde_json::from_str(
            r#"[
                {"id": 4, "name": "Kingfisher", "category": "Beer", "volume": "650 ml", "price": 180, "image": "https://img/kf.png"},
                {"name": "No id", "price": "1,250"},
                {"id": "w-9", "name": "Text id", "price": 99.5}
            ]"#,
        )
        .expect("products");

        assert_eq!(products[0].id, Some(ProductId::Number(4)));
        assert_eq!(products[1].id, None);
        assert_eq!(products[1].price.amount(), 1250.0);
        assert_eq!(products[1].category, "");
        assert_eq!(products[2].id, Some(ProductId::Text("w-9".into())));
        assert_eq!(products[2].price.to_string(), "99.50");
    }

    #[test]
    fn negative_price_is_rejected() {
        assert!(Price::new(-1.0).is_err());
        assert!(Price::new(f64::NAN).is_err());
        assert!("-5".parse::<Price>().is_err());
    }

    #[test]
    fn odd_records_decode_without_failing_the_list() {
        let products: Vec<Product> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "Old Monk", "category": "Rum", "volume": "750 ml", "price": 420, "image": ""},
                {"id": 2, "name": "Bacardi", "category": null, "volume": null, "price": "N/A", "image": null},
                {"id": 3, "name": null, "price": -30},
                {"id": 4, "name": "Captain Morgan", "price": null}
            ]"#,
        )
        .expect("products");

        assert_eq!(products.len(), 4);
        assert_eq!(products[0].price.amount(), 420.0);
        assert_eq!(products[1].image, "");
        assert_eq!(products[1].volume, "");
        assert_eq!(products[1].category, "");
        assert_eq!(products[1].price, Price::default());
        assert_eq!(products[2].name, "");
        assert_eq!(products[2].price, Price::default());
        assert_eq!(products[3].price, Price::default());
    }

    #[test]
    fn key_falls_back_to_index_without_usable_id() {
        let plain = Product::new("A", "Beer", Price::default());
        assert_eq!(plain.key(3), ProductKey::Index(3));

        let blank = plain.clone().with_id(ProductId::Text("  ".into()));
        assert_eq!(blank.key(1), ProductKey::Index(1));

        let numbered = plain.with_id(ProductId::Number(7));
        assert_eq!(numbered.key(1), ProductKey::Id(ProductId::Number(7)));
    }

    #[test]
    fn turn_roles_serialize_snake_case() {
        let turn = ConversationTurn::assistant("hi");
        let value = serde_json::to_value(&turn).expect("json");
        assert_eq!(value["role"], "assistant");
    }
}
