//! User record types.
//!
//! `UserFields` is what the form edits and what create/update send;
//! `User` adds the server-assigned identifier.
use serde::{Deserialize, Serialize};

/// The eight editable fields of a user record, serialized in camelCase.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub father_name: String,
    #[serde(default)]
    pub cnic: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub semester: String,
    #[serde(default)]
    pub university: String,
}

impl UserFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::FatherName => &self.father_name,
            Field::Cnic => &self.cnic,
            Field::Phone => &self.phone,
            Field::Address => &self.address,
            Field::Degree => &self.degree,
            Field::Semester => &self.semester,
            Field::University => &self.university,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::FatherName => &mut self.father_name,
            Field::Cnic => &mut self.cnic,
            Field::Phone => &mut self.phone,
            Field::Address => &mut self.address,
            Field::Degree => &mut self.degree,
            Field::Semester => &mut self.semester,
            Field::University => &mut self.university,
        }
    }
}

/// A stored user as the client sees it. `id` is already mapped from the wire `_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub fields: UserFields,
}

impl User {
    pub fn name(&self) -> &str {
        &self.fields.name
    }
}

/// Field selector, in form order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    FatherName,
    Cnic,
    Phone,
    Address,
    Degree,
    Semester,
    University,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Name,
        Field::FatherName,
        Field::Cnic,
        Field::Phone,
        Field::Address,
        Field::Degree,
        Field::Semester,
        Field::University,
    ];

    /// JSON key used by the backend.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::FatherName => "fatherName",
            Field::Cnic => "cnic",
            Field::Phone => "phone",
            Field::Address => "address",
            Field::Degree => "degree",
            Field::Semester => "semester",
            Field::University => "university",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Full Name",
            Field::FatherName => "Father's Name",
            Field::Cnic => "CNIC (XXXXX-XXXXXXX-X)",
            Field::Phone => "Phone No (03XX-XXXXXXX)",
            Field::Address => "Full Address",
            Field::Degree => "Degree Program",
            Field::Semester => "Current Semester",
            Field::University => "University Name",
        }
    }

    /// Label used on the detail screen.
    pub fn detail_label(self) -> &'static str {
        match self {
            Field::Name => "Full Name",
            Field::FatherName => "Father's Name",
            Field::Cnic => "CNIC",
            Field::Phone => "Phone Number",
            Field::Address => "Address",
            Field::Degree => "Degree Program",
            Field::Semester => "Current Semester",
            Field::University => "University",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Name => "e.g., John Doe",
            Field::FatherName => "e.g., Richard Doe",
            Field::Cnic => "e.g., 35202-1234567-1",
            Field::Phone => "e.g., 0300-1234567",
            Field::Address => "e.g., House 123, Street 4, City",
            Field::Degree => "e.g., BS Computer Science",
            Field::Semester => "e.g., 5th",
            Field::University => "e.g., National University",
        }
    }

    /// Lowercase words split at camelCase humps: `fatherName` -> `father name`.
    pub fn humanized(self) -> String {
        let mut out = String::new();
        for c in self.key().chars() {
            if c.is_ascii_uppercase() {
                out.push(' ');
                out.push(c.to_ascii_lowercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_serialize_with_camel_case_keys() {
        let f = UserFields { father_name: "Richard Doe".into(), ..Default::default() };
        let v = serde_json::to_value(&f).unwrap();
        assert_eq!(v["fatherName"], "Richard Doe");
        assert!(v.get("father_name").is_none());
    }

    #[test]
    fn humanized_splits_camel_case() {
        assert_eq!(Field::FatherName.humanized(), "father name");
        assert_eq!(Field::Cnic.humanized(), "cnic");
    }

    #[test]
    fn get_mut_targets_matching_field() {
        let mut f = UserFields::default();
        for field in Field::ALL {
            f.get_mut(field).push_str(field.key());
        }
        for field in Field::ALL {
            assert_eq!(f.get(field), field.key());
        }
    }
}
