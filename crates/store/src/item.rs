//! Cart line items.

use gocart_core::{Price, ProductId, Quantity};
use serde::{Deserialize, Serialize};

/// One distinct product in the cart.
///
/// `id` is the only field the cart looks at. Title, image and price are
/// carried through exactly as the catalog supplied them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    #[serde(alias = "imageUrl")]
    pub image_url: String,
    pub price: Price,
    pub quantity: Quantity,
}

/// A product being added to the cart, before it has a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCartItem {
    pub id: ProductId,
    pub title: String,
    #[serde(alias = "imageUrl")]
    pub image_url: String,
    pub price: Price,
}

impl NewCartItem {
    /// Turn the candidate into a cart line holding `quantity` units.
    #[must_use]
    pub fn with_quantity(self, quantity: Quantity) -> CartItem {
        CartItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_snake_and_camel_image_url() {
        let snake: CartItem = serde_json::from_str(
            r#"{"id":"A","title":"T","image_url":"u","price":10,"quantity":1}"#,
        )
        .unwrap();
        let camel: CartItem = serde_json::from_str(
            r#"{"id":"A","title":"T","imageUrl":"u","price":10,"quantity":1}"#,
        )
        .unwrap();
        assert_eq!(snake, camel);
        assert_eq!(snake.image_url, "u");
    }

    #[test]
    fn test_writes_snake_case() {
        let item = NewCartItem {
            id: ProductId::new("A"),
            title: "T".to_string(),
            image_url: "u".to_string(),
            price: Price::from_cents(1000),
        }
        .with_quantity(Quantity::ONE);

        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(
            json,
            r#"{"id":"A","title":"T","image_url":"u","price":10.00,"quantity":1}"#
        );
    }

    #[test]
    fn test_rejects_zero_quantity() {
        let result = serde_json::from_str::<CartItem>(
            r#"{"id":"A","title":"T","image_url":"u","price":10,"quantity":0}"#,
        );
        assert!(result.is_err());
    }
}
