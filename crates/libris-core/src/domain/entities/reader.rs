use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ReaderId;

/// A library reader or a staff member.
///
/// Staff status relaxes several lending rules (see
/// [`StaffRelaxation`](crate::domain::StaffRelaxation)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reader {
    pub id: ReaderId,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_staff: bool,
}

impl Reader {
    /// A regular (non-staff) reader.
    pub fn new(id: impl Into<ReaderId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: None,
            email: None,
            is_staff: false,
        }
    }

    /// A reader flagged as library staff.
    pub fn staff(id: impl Into<ReaderId>, name: impl Into<String>) -> Self {
        Self {
            is_staff: true,
            ..Self::new(id, name)
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_reader_is_not_staff() {
        let reader = Reader::new(1, "Ana");
        assert!(!reader.is_staff);
        assert_eq!(reader.id, ReaderId::new(1));
        assert!(reader.phone.is_none());
    }

    #[test]
    fn staff_constructor_sets_flag() {
        let reader = Reader::staff(2, "Ion").with_email("ion@library.test");
        assert!(reader.is_staff);
        assert_eq!(reader.email.as_deref(), Some("ion@library.test"));
    }

    #[test]
    fn missing_optional_fields_deserialize_to_defaults() {
        let reader: Reader = serde_json::from_str(r#"{"id": 3, "name": "Maria"}"#).unwrap();
        assert_eq!(reader, Reader::new(3, "Maria"));
    }
}
