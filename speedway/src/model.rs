// Speedway
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! High-level data types.
//!
//! Every entity is split in two types: an `*Data` type with the attributes that clients send in
//! requests, and the entity itself, which pairs those attributes with the `Id` that the database
//! assigned on creation.

use derive_getters::Getters;
use derive_more::Constructor;
use serde::de::Visitor;
use serde::{Deserialize, Serialize};
use speedway_core::model::{ModelError, ModelResult};
use std::fmt;

/// Identifier of a stored entity.
///
/// Identifiers are assigned by the database and are always positive.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub(crate) struct Id(i64);

impl Id {
    /// Creates a new identifier from an untrusted `id`, making sure it is valid.
    pub(crate) fn new(id: i64) -> ModelResult<Self> {
        if id <= 0 {
            return Err(ModelError(format!("Invalid id {}: must be positive", id)));
        }
        Ok(Self(id))
    }

    /// Returns the identifier as an `i64` for the database.
    pub(crate) fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
impl From<i64> for Id {
    /// Creates a new identifier from a hardcoded value, which must be valid.
    fn from(id: i64) -> Self {
        Id::new(id).expect("Hardcoded ids must be valid")
    }
}

/// A deserialization visitor for an `Id`.
struct IdVisitor;

impl Visitor<'_> for IdVisitor {
    type Value = Id;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a positive integer")
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Id::new(v).map_err(|e| E::custom(e.to_string()))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        match i64::try_from(v) {
            Ok(v) => self.visit_i64(v),
            Err(_) => Err(E::custom(format!("Invalid id {}: too large", v))),
        }
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_i64(IdVisitor)
    }
}

/// Attributes of a driver.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DriverData {
    /// Given name.
    pub(crate) first_name: Option<String>,

    /// Family name.
    pub(crate) last_name: Option<String>,

    /// Age in years.
    pub(crate) age: Option<i32>,

    /// Name the driver races under.
    pub(crate) nickname: Option<String>,

    /// Number of races won.
    pub(crate) wins: Option<i32>,

    /// Number of races lost.
    pub(crate) losses: Option<i32>,
}

/// A stored driver.
#[derive(Constructor, Getters, Serialize)]
#[cfg_attr(test, derive(Clone, Debug, Deserialize, PartialEq))]
pub(crate) struct Driver {
    /// Identifier assigned by the database.
    id: Id,

    /// Attributes of the driver.
    #[serde(flatten)]
    data: DriverData,
}

/// Attributes of a car.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CarData {
    /// Name the car is known by.
    pub(crate) nickname: Option<String>,

    /// Make and model.
    pub(crate) model: Option<String>,

    /// Year of manufacture.
    pub(crate) year: Option<i32>,

    /// Free-form condition of the car, such as "AVAILABLE" or "REPAIR".
    pub(crate) status: Option<String>,

    /// Top speed in miles per hour.
    pub(crate) top_speed: Option<i32>,
}

/// A stored car.
#[derive(Constructor, Getters, Serialize)]
#[cfg_attr(test, derive(Clone, Debug, Deserialize, PartialEq))]
pub(crate) struct Car {
    /// Identifier assigned by the database.
    id: Id,

    /// Attributes of the car.
    #[serde(flatten)]
    data: CarData,
}

/// Attributes of a race.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RaceData {
    /// Name of the event.
    pub(crate) name: Option<String>,

    /// Category the race belongs to, such as "SPRINT".
    pub(crate) category: Option<String>,

    /// Date the race takes place on, as given by the client.
    pub(crate) date: Option<String>,

    /// Best lap time recorded, as given by the client.
    pub(crate) best_time: Option<String>,

    /// Free-form status of the race, such as "SCHEDULED" or "FINISHED".
    pub(crate) status: Option<String>,
}

/// A stored race.
#[derive(Constructor, Getters, Serialize)]
#[cfg_attr(test, derive(Clone, Debug, Deserialize, PartialEq))]
pub(crate) struct Race {
    /// Identifier assigned by the database.
    id: Id,

    /// Attributes of the race.
    #[serde(flatten)]
    data: RaceData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{assert_de_tokens_error, assert_tokens, Token};

    #[test]
    fn test_id_ok() {
        assert_eq!(1, Id::new(1).unwrap().as_i64());
        assert_eq!(i64::MAX, Id::new(i64::MAX).unwrap().as_i64());
    }

    #[test]
    fn test_id_error() {
        assert!(Id::new(0).is_err());
        assert!(Id::new(-5).is_err());
    }

    #[test]
    fn test_id_ser_de_ok() {
        assert_tokens(&Id::from(42), &[Token::I64(42)]);
    }

    #[test]
    fn test_id_de_error() {
        assert_de_tokens_error::<Id>(&[Token::I64(0)], "Invalid id 0: must be positive");
        assert_de_tokens_error::<Id>(
            &[Token::U64(u64::MAX)],
            &format!("Invalid id {}: too large", u64::MAX),
        );
    }

    #[test]
    fn test_driver_json_empty_payload() {
        let data: DriverData = serde_json::from_str("{}").unwrap();
        assert_eq!(DriverData::default(), data);
    }

    #[test]
    fn test_driver_json_ignores_id_in_payload() {
        let data: DriverData =
            serde_json::from_str(r#"{"id": 8, "firstName": "Mario", "wins": 3}"#).unwrap();
        assert_eq!(
            DriverData {
                first_name: Some("Mario".to_owned()),
                wins: Some(3),
                ..Default::default()
            },
            data
        );
    }

    #[test]
    fn test_driver_json_flattens_attributes() {
        let driver = Driver::new(
            Id::from(1),
            DriverData { nickname: Some("Flash".to_owned()), ..Default::default() },
        );
        assert_eq!(
            serde_json::json!({
                "id": 1,
                "firstName": null,
                "lastName": null,
                "age": null,
                "nickname": "Flash",
                "wins": null,
                "losses": null,
            }),
            serde_json::to_value(&driver).unwrap()
        );
    }

    #[test]
    fn test_car_json_camel_case() {
        let car = Car::new(
            Id::from(3),
            CarData { top_speed: Some(190), year: Some(1999), ..Default::default() },
        );
        let json = serde_json::to_value(&car).unwrap();
        assert_eq!(3, json["id"]);
        assert_eq!(190, json["topSpeed"]);
        assert_eq!(1999, json["year"]);
        assert!(json["model"].is_null());
    }

    #[test]
    fn test_race_json_round_trip() {
        let race = Race::new(
            Id::from(7),
            RaceData {
                name: Some("Night Sprint".to_owned()),
                best_time: Some("1:02.300".to_owned()),
                ..Default::default()
            },
        );
        let json = serde_json::to_string(&race).unwrap();
        assert!(json.contains(r#""bestTime":"1:02.300""#));
        assert_eq!(race, serde_json::from_str::<Race>(&json).unwrap());
    }
}
