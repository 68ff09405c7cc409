//! E-commerce product records used as video source material.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;

/// A product scraped or entered for promotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product title
    pub title: String,

    /// Long-form description
    #[serde(default)]
    pub description: String,

    /// Current price
    pub price: f64,

    /// Price before discount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,

    /// Average rating (0-5)
    #[serde(default)]
    pub rating: f64,

    /// Number of reviews behind `rating`
    #[serde(default)]
    pub review_count: u32,

    /// Image URLs, in display order
    #[serde(default)]
    pub images: Vec<String>,

    /// Video URLs, in display order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<String>>,

    /// Page the product was taken from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Marketplace name (e.g. "amazon")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// When the product data was captured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// Whether copy was rewritten by an AI assistant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_enhanced: Option<bool>,

    /// AI-generated selling summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
}

impl Product {
    /// Create a product with the required fields; everything else empty.
    pub fn new(title: impl Into<String>, price: f64, images: Vec<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            price,
            original_price: None,
            rating: 0.0,
            review_count: 0,
            images,
            videos: None,
            source_url: None,
            platform: None,
            timestamp: None,
            ai_enhanced: None,
            ai_summary: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_original_price(mut self, original_price: f64) -> Self {
        self.original_price = Some(original_price);
        self
    }

    pub fn with_rating(mut self, rating: f64, review_count: u32) -> Self {
        self.rating = rating;
        self.review_count = review_count;
        self
    }

    pub fn with_source(mut self, url: impl Into<String>, platform: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self.platform = Some(platform.into());
        self
    }

    /// First image, used as the cover frame.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whole-percent discount against `original_price`.
    ///
    /// `None` when there is no original price or it is not above the current price.
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?;
        if !original.is_finite() || original <= 0.0 || original <= self.price {
            return None;
        }
        Some(((original - self.price) / original * 100.0).round() as u32)
    }

    pub fn is_ai_enhanced(&self) -> bool {
        self.ai_enhanced.unwrap_or(false)
    }

    /// Name of the first numeric field that is NaN or infinite.
    ///
    /// JSON has no encoding for these, so such a product cannot be stored.
    pub fn non_finite_field(&self) -> Option<&'static str> {
        if !self.price.is_finite() {
            return Some("price");
        }
        if self.original_price.is_some_and(|p| !p.is_finite()) {
            return Some("originalPrice");
        }
        if !self.rating.is_finite() {
            return Some("rating");
        }
        None
    }

    /// Check that the product carries enough data to render a video.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Product title is required".to_string());
        }

        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("Invalid product price: {}", self.price));
        }

        if self.images.is_empty() {
            return Err("At least one product image is required".to_string());
        }

        if let Some(bad) = self.images.iter().find(|u| Url::parse(u).is_err()) {
            return Err(format!("Invalid image URL: {}", bad));
        }

        if let Some(url) = &self.source_url {
            if Url::parse(url).is_err() {
                return Err(format!("Invalid source URL: {}", url));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product::new(
            "Wireless Earbuds",
            29.99,
            vec!["https://cdn.example.com/earbuds.jpg".to_string()],
        )
    }

    #[test]
    fn test_validate_populated_product() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_data() {
        let mut no_title = sample();
        no_title.title = "   ".to_string();
        assert!(no_title.validate().is_err());

        let mut no_images = sample();
        no_images.images.clear();
        assert_eq!(
            no_images.validate().unwrap_err(),
            "At least one product image is required"
        );

        let mut bad_price = sample();
        bad_price.price = f64::NAN;
        assert!(bad_price.validate().is_err());

        let mut bad_image = sample();
        bad_image.images.push("not a url".to_string());
        assert!(bad_image.validate().unwrap_err().contains("not a url"));
    }

    #[test]
    fn test_non_finite_field() {
        assert_eq!(sample().non_finite_field(), None);

        let mut bad_price = sample();
        bad_price.price = f64::INFINITY;
        assert_eq!(bad_price.non_finite_field(), Some("price"));

        assert_eq!(
            sample().with_original_price(f64::NAN).non_finite_field(),
            Some("originalPrice")
        );

        let mut bad_rating = sample();
        bad_rating.rating = f64::NAN;
        assert_eq!(bad_rating.non_finite_field(), Some("rating"));
    }

    #[test]
    fn test_discount_percent() {
        assert_eq!(sample().discount_percent(), None);
        assert_eq!(sample().with_original_price(59.99).discount_percent(), Some(50));
        assert_eq!(sample().with_original_price(10.0).discount_percent(), None);
    }

    #[test]
    fn test_camel_case_json() {
        let product = sample().with_original_price(39.99).with_rating(4.5, 1200);
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["originalPrice"], 39.99);
        assert_eq!(json["reviewCount"], 1200);
        assert!(json.get("videos").is_none());

        let parsed: Product = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, product);
    }

    #[test]
    fn test_deserialize_minimal() {
        let product: Product =
            serde_json::from_str(r#"{"title":"Mug","price":12.5}"#).unwrap();
        assert_eq!(product.title, "Mug");
        assert!(product.images.is_empty());
        assert_eq!(product.primary_image(), None);
        assert!(!product.is_ai_enhanced());
    }
}
