//! # Test Fixtures
//!
//! Canned package records plus a seeded generator for randomized but always
//! schema-valid packages.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value, json};

use crate::domain::{AddRequest, CodPrice, Package};

const SERVICE_TYPES: [&str; 4] = ["DR", "NP", "RR", "BA"];
const NAMES: [&str; 6] = [
    "Jan Novák",
    "Petra Svobodová",
    "Tomáš Dvořák",
    "Lucie Černá",
    "Martin Procházka",
    "Eva Kučerová",
];
const CITIES: [(&str, &str); 5] = [
    ("Praha", "11000"),
    ("Brno", "60200"),
    ("Ostrava", "70200"),
    ("Plzeň", "30100"),
    ("Olomouc", "77900"),
];
const STREETS: [&str; 4] = ["Hlavní", "Nádražní", "Školní", "Zahradní"];

/// A minimal package that every carrier accepts.
pub fn canned_package() -> Package {
    Package {
        rec_street: Some("Hlavní 1".into()),
        rec_city: Some("Praha".into()),
        rec_zip: Some("11000".into()),
        rec_phone: Some("+420777123456".into()),
        rec_email: Some("test@example.com".into()),
        weight: Some(1.2),
        price: Some(1000.0),
        ins_currency: Some("CZK".into()),
        ..Package::new("DR", "Test", "CZ")
    }
}

pub fn canned_request(count: usize) -> AddRequest {
    AddRequest::new(vec![canned_package(); count.max(1)])
}

/// A record the validator must reject: `rec_name` is missing and `weight`
/// is sent as text.
pub fn invalid_package() -> Map<String, Value> {
    let mut record = Map::new();
    record.insert("service_type".into(), json!("DR"));
    record.insert("rec_country".into(), json!("CZ"));
    record.insert("rec_city".into(), json!("Praha"));
    record.insert("weight".into(), json!("heavy"));
    record.insert("return_full_errors".into(), json!(1));
    record
}

pub fn invalid_request() -> Value {
    json!({ "packages": [Value::Object(invalid_package())] })
}

/// Deterministic when seeded, entropy-backed otherwise.
#[derive(Debug, Clone)]
pub struct PackageGenerator {
    rng: StdRng,
    sequence: u64,
}

impl PackageGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng, sequence: 0 }
    }

    pub fn package(&mut self) -> Package {
        self.sequence += 1;

        let service_type = SERVICE_TYPES.choose(&mut self.rng).copied().unwrap_or("DR");
        let name = NAMES.choose(&mut self.rng).copied().unwrap_or("Test");
        let (city, zip) = CITIES.choose(&mut self.rng).copied().unwrap_or(("Praha", "11000"));
        let street = STREETS.choose(&mut self.rng).copied().unwrap_or("Hlavní");
        let house_number: u16 = self.rng.random_range(1..200);
        let weight = round_to_1(self.rng.random_range(0.1..30.0));
        let price = f64::from(self.rng.random_range(100u32..10_000));

        // Alternate the representation so both branches of the union get exercised.
        let cod_price = if self.rng.random_bool(0.5) {
            CodPrice::Amount(price)
        } else {
            CodPrice::Text(format!("{price:.2}"))
        };

        Package {
            rec_street: Some(format!("{street} {house_number}")),
            rec_city: Some(city.to_string()),
            rec_zip: Some(zip.to_string()),
            rec_phone: Some(format!("+420{}", self.rng.random_range(600_000_000u32..799_999_999))),
            rec_email: Some(format!("checks+{}@example.com", self.sequence)),
            price: Some(price),
            cod_price: Some(cod_price),
            cod_currency: Some("CZK".into()),
            ins_currency: Some("CZK".into()),
            weight: Some(weight),
            eid: Some(format!("chk{:08x}{:04}", self.rng.random::<u32>(), self.sequence % 10_000)),
            vs: Some(self.rng.random_range(1_000_000..9_999_999)),
            ..Package::new(service_type, name, "CZ")
        }
    }

    pub fn request(&mut self, count: usize) -> AddRequest {
        AddRequest::new((0..count.max(1)).map(|_| self.package()).collect())
    }
}

fn round_to_1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
