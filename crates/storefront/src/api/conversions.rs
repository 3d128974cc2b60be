//! Normalization of API wire types into domain types.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::warn;

use tindi_core::{Price, Product, ProductId, parse_leading_int};

use super::types::ApiProduct;

/// Convert API products, dropping records without a usable id.
pub fn convert_products(raw: Vec<ApiProduct>) -> Vec<Product> {
    raw.into_iter().filter_map(convert_product).collect()
}

/// Convert one API product. Returns `None` if it has neither `_id` nor `id`.
pub fn convert_product(raw: ApiProduct) -> Option<Product> {
    let Some(id) = raw
        .document_id
        .as_ref()
        .and_then(id_from)
        .or_else(|| raw.id.as_ref().and_then(id_from))
    else {
        warn!(name = ?raw.name, "Dropping product without an id");
        return None;
    };

    Some(Product {
        id: ProductId::new(id),
        name: raw.name.unwrap_or_default(),
        price: price_from(raw.price.as_ref()),
        image: raw.image,
        category: raw.category,
        description: raw.description,
        stock: stock_from(raw.stock.as_ref()),
    })
}

/// Ids may be strings or numbers. Empty strings and zero count as absent.
fn id_from(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn price_from(value: Option<&Value>) -> Price {
    let text = match value {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        None | Some(Value::Null) => return Price::default(),
        Some(other) => {
            warn!(price = %other, "Unexpected price type, using 0");
            return Price::default();
        }
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_or_else(
            |_| {
                warn!(price = %text, "Unparsable price, using 0");
                Price::default()
            },
            Price::new,
        )
}

/// Stock as an integer, truncating fractions. Missing or unparsable is 0.
fn stock_from(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n.as_i64().unwrap_or_else(|| {
            #[allow(clippy::cast_possible_truncation)] // saturating float-to-int cast
            let truncated = n.as_f64().unwrap_or(0.0).trunc() as i64;
            truncated
        }),
        Some(Value::String(s)) => parse_leading_int(s).unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: serde_json::Value) -> ApiProduct {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_prefers_document_id() {
        let product = convert_product(parse(json!({
            "_id": "65f1", "id": 7, "name": "Router", "price": 1500
        })))
        .unwrap();
        assert_eq!(product.id.as_str(), "65f1");
    }

    #[test]
    fn test_falls_back_to_numeric_id() {
        let product = convert_product(parse(json!({"id": 7, "name": "Router"}))).unwrap();
        assert_eq!(product.id.as_str(), "7");

        let product =
            convert_product(parse(json!({"_id": "", "id": "abc", "name": "Router"}))).unwrap();
        assert_eq!(product.id.as_str(), "abc");
    }

    #[test]
    fn test_drops_products_without_id() {
        let products = convert_products(vec![
            parse(json!({"name": "Orphan"})),
            parse(json!({"id": "ok", "name": "Kept"})),
        ]);
        assert_eq!(products.len(), 1);
        assert_eq!(products.first().unwrap().name, "Kept");
    }

    #[test]
    fn test_price_from_number_or_string() {
        assert_eq!(price_from(Some(&json!(1500))), Price::from_whole(1500));
        assert_eq!(price_from(Some(&json!("1500"))), Price::from_whole(1500));
        assert_eq!(
            price_from(Some(&json!(2500.5))),
            Price::new(Decimal::from_str("2500.5").unwrap())
        );
        assert_eq!(price_from(Some(&json!("n/a"))), Price::default());
        assert_eq!(price_from(None), Price::default());
    }

    #[test]
    fn test_stock_normalization() {
        assert_eq!(stock_from(Some(&json!(12))), 12);
        assert_eq!(stock_from(Some(&json!(3.7))), 3);
        assert_eq!(stock_from(Some(&json!("8"))), 8);
        assert_eq!(stock_from(Some(&json!("lots"))), 0);
        assert_eq!(stock_from(Some(&Value::Null)), 0);
        assert_eq!(stock_from(None), 0);
        assert_eq!(stock_from(Some(&json!(-4))), -4);
    }
}
