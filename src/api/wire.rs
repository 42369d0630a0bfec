//! Response adapter between backend JSON and [`User`].
//!
//! The backend stores records with a Mongo-style `_id`. This is the only
//! place that name is known; everything past the gateway sees `User::id`.
use serde::Deserialize;

use crate::model::{User, UserFields};

#[derive(Debug, Deserialize)]
pub struct WireUser {
    #[serde(rename = "_id", alias = "id")]
    pub id: WireId,
    #[serde(flatten)]
    pub fields: UserFields,
}

/// Identifiers arrive as strings from Mongo but some backends send numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Text(String),
    Number(i64),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Text(s) => s,
            WireId::Number(n) => n.to_string(),
        }
    }
}

impl From<WireUser> for User {
    fn from(w: WireUser) -> Self {
        User { id: w.id.into(), fields: w.fields }
    }
}

/// Body of a successful DELETE that was not a 204.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteAck {
    pub success: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_underscore_id() {
        let raw = r#"{"_id":"665f1c","name":"Ali","fatherName":"Raza","cnic":"35202-1234567-1",
            "phone":"0300-1234567","address":"Lahore","degree":"BSCS","semester":"5",
            "university":"NU","__v":0}"#;
        let user: User = serde_json::from_str::<WireUser>(raw).unwrap().into();
        assert_eq!(user.id, "665f1c");
        assert_eq!(user.fields.father_name, "Raza");
        assert_eq!(user.fields.university, "NU");
    }

    #[test]
    fn accepts_plain_numeric_id() {
        let user: User = serde_json::from_str::<WireUser>(r#"{"id":7,"name":"Sara"}"#)
            .unwrap()
            .into();
        assert_eq!(user.id, "7");
        assert_eq!(user.fields.name, "Sara");
        assert!(user.fields.cnic.is_empty());
    }

    #[test]
    fn missing_id_is_rejected() {
        assert!(serde_json::from_str::<WireUser>(r#"{"name":"Sara"}"#).is_err());
    }
}
