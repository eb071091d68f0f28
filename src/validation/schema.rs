use std::fmt::{self, Display};

use super::types::TypeSpec;

/// Every package field the `add` and `check` endpoints understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageField {
    ServiceType,
    RecName,
    RecFirm,
    RecStreet,
    RecCity,
    RecZip,
    RecCountry,
    RecPhone,
    RecEmail,
    Price,
    CodPrice,
    CodCurrency,
    InsCurrency,
    Weight,
    Length,
    Height,
    Width,
    Eid,
    RealOrderId,
    Reference,
    BranchId,
    Note,
    Vs,
    OrderNumber,
    Services,
    ReturnFullErrors,
}

/// Fields that must be present regardless of their declared type.
pub const REQUIRED_FIELDS: [PackageField; 3] = [
    PackageField::ServiceType,
    PackageField::RecName,
    PackageField::RecCountry,
];

impl PackageField {
    pub const ALL: [PackageField; 26] = [
        PackageField::ServiceType,
        PackageField::RecName,
        PackageField::RecFirm,
        PackageField::RecStreet,
        PackageField::RecCity,
        PackageField::RecZip,
        PackageField::RecCountry,
        PackageField::RecPhone,
        PackageField::RecEmail,
        PackageField::Price,
        PackageField::CodPrice,
        PackageField::CodCurrency,
        PackageField::InsCurrency,
        PackageField::Weight,
        PackageField::Length,
        PackageField::Height,
        PackageField::Width,
        PackageField::Eid,
        PackageField::RealOrderId,
        PackageField::Reference,
        PackageField::BranchId,
        PackageField::Note,
        PackageField::Vs,
        PackageField::OrderNumber,
        PackageField::Services,
        PackageField::ReturnFullErrors,
    ];

    /// Wire name of the field.
    pub fn name(self) -> &'static str {
        match self {
            PackageField::ServiceType => "service_type",
            PackageField::RecName => "rec_name",
            PackageField::RecFirm => "rec_firm",
            PackageField::RecStreet => "rec_street",
            PackageField::RecCity => "rec_city",
            PackageField::RecZip => "rec_zip",
            PackageField::RecCountry => "rec_country",
            PackageField::RecPhone => "rec_phone",
            PackageField::RecEmail => "rec_email",
            PackageField::Price => "price",
            PackageField::CodPrice => "cod_price",
            PackageField::CodCurrency => "cod_currency",
            PackageField::InsCurrency => "ins_currency",
            PackageField::Weight => "weight",
            PackageField::Length => "length",
            PackageField::Height => "height",
            PackageField::Width => "width",
            PackageField::Eid => "eid",
            PackageField::RealOrderId => "real_order_id",
            PackageField::Reference => "reference",
            PackageField::BranchId => "branch_id",
            PackageField::Note => "note",
            PackageField::Vs => "vs",
            PackageField::OrderNumber => "order_number",
            PackageField::Services => "services",
            PackageField::ReturnFullErrors => "return_full_errors",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    pub fn expected(self) -> TypeSpec {
        match self {
            PackageField::Price
            | PackageField::Weight
            | PackageField::Length
            | PackageField::Height
            | PackageField::Width
            | PackageField::Vs
            | PackageField::OrderNumber
            // 0/1 flag
            | PackageField::ReturnFullErrors => TypeSpec::NUMBER,
            PackageField::CodPrice => TypeSpec::STRING_OR_NUMBER,
            _ => TypeSpec::STRING,
        }
    }

    pub fn is_required(self) -> bool {
        REQUIRED_FIELDS.contains(&self)
    }
}

impl Display for PackageField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
