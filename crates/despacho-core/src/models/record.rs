//! Shipping record and flag models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// A named slot of the shipping record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Chilean RUT (national ID).
    NationalId,
    /// Recipient full name.
    FullName,
    /// Street and number.
    StreetAddress,
    /// Comuna / city.
    Locality,
    /// Region.
    Region,
    /// Contact phone.
    Phone,
    /// Contact email.
    Email,
    /// Delivery notes.
    Notes,
    /// Order (pre-sale) number.
    OrderNumber,
    /// Order type as shown by the order UI.
    OrderType,
    /// Pickup branch.
    Branch,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Field; 11] = [
        Field::NationalId,
        Field::FullName,
        Field::StreetAddress,
        Field::Locality,
        Field::Region,
        Field::Phone,
        Field::Email,
        Field::Notes,
        Field::OrderNumber,
        Field::OrderType,
        Field::Branch,
    ];

    /// Canonical key used in serialized records and form edits.
    pub fn key(&self) -> &'static str {
        match self {
            Field::NationalId => "nationalId",
            Field::FullName => "fullName",
            Field::StreetAddress => "streetAddress",
            Field::Locality => "locality",
            Field::Region => "region",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Notes => "notes",
            Field::OrderNumber => "orderNumber",
            Field::OrderType => "orderType",
            Field::Branch => "branch",
        }
    }

    /// Label printed on the dispatch sheet.
    pub fn sheet_label(&self) -> &'static str {
        match self {
            Field::NationalId => "RUT",
            Field::FullName => "NOMBRES",
            Field::StreetAddress => "DOMICILIO",
            Field::Locality => "COMUNA",
            Field::Region => "REGIÓN",
            Field::Phone => "TELÉFONO",
            Field::Email => "CORREO",
            Field::Notes => "INDICACIONES",
            Field::OrderNumber => "PREVENTA",
            Field::OrderType => "TIPO DE PEDIDO",
            Field::Branch => "SUCURSAL",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| FormError::UnknownField(key.to_string()))
    }
}

/// Extracted shipping record. An empty string means the field is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    pub national_id: String,
    pub full_name: String,
    pub street_address: String,
    pub locality: String,
    pub region: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
    pub order_number: String,
    pub order_type: String,
    pub branch: String,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field value.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::NationalId => &self.national_id,
            Field::FullName => &self.full_name,
            Field::StreetAddress => &self.street_address,
            Field::Locality => &self.locality,
            Field::Region => &self.region,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::Notes => &self.notes,
            Field::OrderNumber => &self.order_number,
            Field::OrderType => &self.order_type,
            Field::Branch => &self.branch,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::NationalId => &mut self.national_id,
            Field::FullName => &mut self.full_name,
            Field::StreetAddress => &mut self.street_address,
            Field::Locality => &mut self.locality,
            Field::Region => &mut self.region,
            Field::Phone => &mut self.phone,
            Field::Email => &mut self.email,
            Field::Notes => &mut self.notes,
            Field::OrderNumber => &mut self.order_number,
            Field::OrderType => &mut self.order_type,
            Field::Branch => &mut self.branch,
        }
    }

    /// Overwrite a field value.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// Whether a field holds a value.
    pub fn is_filled(&self, field: Field) -> bool {
        !self.get(field).is_empty()
    }

    /// Fields that hold a value, in form order.
    pub fn filled(&self) -> Vec<Field> {
        Field::ALL.into_iter().filter(|f| self.is_filled(*f)).collect()
    }

    /// Fields that are still empty, in form order.
    pub fn missing(&self) -> Vec<Field> {
        Field::ALL.into_iter().filter(|f| !self.is_filled(*f)).collect()
    }

    /// Iterate over `(field, value)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}

/// A shipping flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Flag {
    /// "Por pagar": recipient pays on delivery.
    CashOnDelivery,
    /// "Pagado": shipping already paid.
    Prepaid,
    /// Pickup at a courier branch ("agencia").
    PickupAtBranch,
    /// Home delivery.
    HomeDelivery,
    /// Billed to a customer account ("cuenta corriente"). Never inferred.
    OnAccount,
}

impl Flag {
    /// Every flag, in form order.
    pub const ALL: [Flag; 5] = [
        Flag::CashOnDelivery,
        Flag::Prepaid,
        Flag::PickupAtBranch,
        Flag::HomeDelivery,
        Flag::OnAccount,
    ];

    /// Canonical key used in serialized flag sets and form edits.
    pub fn key(&self) -> &'static str {
        match self {
            Flag::CashOnDelivery => "cashOnDelivery",
            Flag::Prepaid => "prepaid",
            Flag::PickupAtBranch => "pickupAtBranch",
            Flag::HomeDelivery => "homeDelivery",
            Flag::OnAccount => "onAccount",
        }
    }

    /// Checkbox caption printed on the dispatch sheet.
    pub fn sheet_label(&self) -> &'static str {
        match self {
            Flag::CashOnDelivery => "Por Pagar",
            Flag::Prepaid => "Pagado",
            Flag::PickupAtBranch => "Agencia",
            Flag::HomeDelivery => "Domicilio",
            Flag::OnAccount => "CTA CTE",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Flag {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Flag::ALL
            .iter()
            .copied()
            .find(|f| f.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| FormError::UnknownFlag(key.to_string()))
    }
}

/// Independent shipping flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlagSet {
    pub cash_on_delivery: bool,
    pub prepaid: bool,
    pub pickup_at_branch: bool,
    pub home_delivery: bool,
    pub on_account: bool,
}

impl FlagSet {
    /// Get a flag value.
    pub fn get(&self, flag: Flag) -> bool {
        match flag {
            Flag::CashOnDelivery => self.cash_on_delivery,
            Flag::Prepaid => self.prepaid,
            Flag::PickupAtBranch => self.pickup_at_branch,
            Flag::HomeDelivery => self.home_delivery,
            Flag::OnAccount => self.on_account,
        }
    }

    /// Set a flag value.
    pub fn set(&mut self, flag: Flag, value: bool) {
        let slot = match flag {
            Flag::CashOnDelivery => &mut self.cash_on_delivery,
            Flag::Prepaid => &mut self.prepaid,
            Flag::PickupAtBranch => &mut self.pickup_at_branch,
            Flag::HomeDelivery => &mut self.home_delivery,
            Flag::OnAccount => &mut self.on_account,
        };
        *slot = value;
    }

    /// Iterate over `(flag, value)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Flag, bool)> + '_ {
        Flag::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}
