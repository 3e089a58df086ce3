//! Product and sku models

use super::catalog::CatalogObject;
use super::category::AttributeValue;
use super::ids::{CatalogCode, Guid};
use serde::{Deserialize, Serialize};

/// Reference from a sku to one value of a sku option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuOptionValueRef {
    /// GUID of the sku option
    pub option: Guid,
    /// Key of the selected value
    pub value: String,
}

/// Product sku
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sku {
    pub guid: Guid,
    pub code: String,
    #[serde(default)]
    pub option_values: Vec<SkuOptionValueRef>,
    #[serde(default)]
    pub attribute_values: Vec<AttributeValue>,
}

/// Product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub guid: Guid,
    pub code: String,

    /// Master catalog the product belongs to
    pub catalog: CatalogCode,

    #[serde(default)]
    pub name: Option<String>,

    /// Categories the product is placed in, across any catalog
    #[serde(default)]
    pub categories: Vec<Guid>,

    #[serde(default)]
    pub brand: Option<Guid>,

    pub product_type: Guid,

    #[serde(default)]
    pub hidden: bool,

    #[serde(default)]
    pub attribute_values: Vec<AttributeValue>,

    #[serde(default)]
    pub skus: Vec<Sku>,
}

impl Product {
    /// Attribute GUIDs referenced by the product and its skus, first use wins
    pub fn referenced_attributes(&self) -> Vec<Guid> {
        let mut seen = Vec::new();
        let values = self
            .attribute_values
            .iter()
            .chain(self.skus.iter().flat_map(|sku| sku.attribute_values.iter()));
        for value in values {
            if !seen.contains(&value.attribute) {
                seen.push(value.attribute.clone());
            }
        }
        seen
    }

    /// Sku option GUIDs referenced by the product's skus, first use wins
    pub fn referenced_sku_options(&self) -> Vec<Guid> {
        let mut seen = Vec::new();
        for option_value in self.skus.iter().flat_map(|sku| sku.option_values.iter()) {
            if !seen.contains(&option_value.option) {
                seen.push(option_value.option.clone());
            }
        }
        seen
    }
}

impl CatalogObject for Product {
    fn guid(&self) -> &Guid {
        &self.guid
    }

    fn catalog(&self) -> Option<&CatalogCode> {
        Some(&self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        serde_json::from_value(serde_json::json!({
            "guid": "P1",
            "code": "CAM-100",
            "catalog": "MASTER",
            "product_type": "PT1",
            "attribute_values": [
                {"attribute": "A_DESC", "value": "A camera"},
                {"attribute": "A_DESC", "value": "Une camera", "language": "fr"}
            ],
            "skus": [
                {
                    "guid": "S1", "code": "CAM-100-BLK",
                    "option_values": [{"option": "O_COLOR", "value": "BLACK"}],
                    "attribute_values": [{"attribute": "A_WEIGHT", "value": "1.2"}]
                },
                {
                    "guid": "S2", "code": "CAM-100-RED",
                    "option_values": [{"option": "O_COLOR", "value": "RED"}]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_referenced_attributes_dedup_in_order() {
        let guids: Vec<String> = product()
            .referenced_attributes()
            .into_iter()
            .map(Guid::into_inner)
            .collect();
        assert_eq!(guids, vec!["A_DESC", "A_WEIGHT"]);
    }

    #[test]
    fn test_referenced_sku_options() {
        let guids = product().referenced_sku_options();
        assert_eq!(guids.len(), 1);
        assert_eq!(guids[0].as_str(), "O_COLOR");
    }
}
