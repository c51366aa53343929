use std::fmt::{Debug, Display};
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use mongodb::bson::Bson;
use serde::{de::Error, Deserialize, Serialize};

/// Identifier of a campaign, rendered as the 24 hex digits of an ObjectId.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct CampaignId(ObjectId);

impl CampaignId {
    pub fn new() -> CampaignId {
        CampaignId(ObjectId::new())
    }
}

impl Display for CampaignId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0.to_hex())
    }
}

impl Debug for CampaignId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        Display::fmt(self, f)
    }
}

impl FromStr for CampaignId {
    type Err = CampaignIdParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(CampaignId)
            .map_err(|_| CampaignIdParseError {
                value: s.to_string(),
            })
    }
}

impl Serialize for CampaignId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CampaignId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CampaignId::from_str(&s).map_err(D::Error::custom)
    }
}

impl From<CampaignId> for Bson {
    fn from(id: CampaignId) -> Bson {
        Bson::ObjectId(id.0)
    }
}

/// Stores a [`CampaignId`] as a native BSON ObjectId instead of its string
/// form, for use with `#[serde(with = "...")]` on stored documents.
pub mod object_id {
    use mongodb::bson::oid::ObjectId;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::CampaignId;

    pub fn serialize<S: Serializer>(id: &CampaignId, serializer: S) -> Result<S::Ok, S::Error> {
        id.0.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<CampaignId, D::Error> {
        ObjectId::deserialize(deserializer).map(CampaignId)
    }
}

/// Like [`object_id`], for an optional reference. `None` is stored as null.
pub mod option_object_id {
    use mongodb::bson::oid::ObjectId;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::CampaignId;

    pub fn serialize<S: Serializer>(
        id: &Option<CampaignId>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        id.map(|id| id.0).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<CampaignId>, D::Error> {
        Ok(Option::<ObjectId>::deserialize(deserializer)?.map(CampaignId))
    }
}

#[derive(Clone, Debug)]
pub struct CampaignIdParseError {
    value: String,
}

impl Display for CampaignIdParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "'{}' is not a valid campaign id", self.value)
    }
}
