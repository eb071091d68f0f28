use serde::Serialize;
use serde_json::{Map, Value};

/// Cash-on-delivery amount. The API takes it either as a decimal string or a
/// plain number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CodPrice {
    Amount(f64),
    Text(String),
}

/// One package record of an `add` / `check` request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Package {
    pub service_type: String,
    pub rec_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rec_firm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rec_street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rec_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rec_zip: Option<String>,
    pub rec_country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rec_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rec_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cod_price: Option<CodPrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cod_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ins_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<u64>,
    /// Additional services joined with `+`, e.g. `"1+S"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_full_errors: Option<u8>,
    /// Fields outside the known schema, sent verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Package {
    pub fn new(
        service_type: impl Into<String>,
        rec_name: impl Into<String>,
        rec_country: impl Into<String>,
    ) -> Self {
        Self {
            service_type: service_type.into(),
            rec_name: rec_name.into(),
            rec_country: rec_country.into(),
            ..Default::default()
        }
    }
}

/// Body of `POST /{carrier}/add` and `POST /{carrier}/check`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AddRequest {
    pub packages: Vec<Package>,
}

impl AddRequest {
    pub fn new(packages: Vec<Package>) -> Self {
        Self { packages }
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_fields_are_omitted() {
        let value = serde_json::to_value(Package::new("DR", "Test", "CZ")).unwrap();
        assert_eq!(
            value,
            json!({ "service_type": "DR", "rec_name": "Test", "rec_country": "CZ" })
        );
    }

    #[test]
    fn cod_price_serializes_untagged() {
        let mut package = Package::new("DR", "Test", "CZ");
        package.cod_price = Some(CodPrice::Text("150.00".into()));
        let value = serde_json::to_value(&package).unwrap();
        assert_eq!(value["cod_price"], json!("150.00"));

        package.cod_price = Some(CodPrice::Amount(99.5));
        let value = serde_json::to_value(&package).unwrap();
        assert_eq!(value["cod_price"], json!(99.5));
    }

    #[test]
    fn extra_fields_are_flattened() {
        let mut package = Package::new("DR", "Test", "CZ");
        package.extra.insert("foo".into(), json!("bar"));
        let value = serde_json::to_value(&package).unwrap();
        assert_eq!(value["foo"], json!("bar"));
        assert!(value.get("extra").is_none());
    }

    #[test]
    fn request_wraps_packages() {
        let request = AddRequest::new(vec![Package::new("DR", "Test", "CZ")]);
        let value = request.to_value().unwrap();
        assert_eq!(value["packages"].as_array().map(Vec::len), Some(1));
    }
}
