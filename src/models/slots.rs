use serde::{Deserialize, Serialize};

/// One named field of the reservation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotName {
    Location,
    Cuisine,
    DiningTime,
    DiningDate,
    NumberOfPeople,
    PhoneNumber,
}

impl SlotName {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotName::Location => "Location",
            SlotName::Cuisine => "Cuisine",
            SlotName::DiningTime => "DiningTime",
            SlotName::DiningDate => "DiningDate",
            SlotName::NumberOfPeople => "NumberOfPeople",
            SlotName::PhoneNumber => "PhoneNumber",
        }
    }
}

/// The structured reservation form. Every field is independently nullable —
/// `None` means "not yet collected" — and slots fill in any order, so each
/// field is validated only when present. Serialized flat, this is also the
/// record placed on the reservation queue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationSlots {
    #[serde(rename = "Location", default)]
    pub location: Option<String>,
    #[serde(rename = "Cuisine", default)]
    pub cuisine: Option<String>,
    #[serde(rename = "DiningTime", default)]
    pub dining_time: Option<String>,
    #[serde(rename = "DiningDate", default)]
    pub dining_date: Option<String>,
    #[serde(rename = "NumberOfPeople", default)]
    pub number_of_people: Option<String>,
    #[serde(rename = "PhoneNumber", default)]
    pub phone_number: Option<String>,
}

impl ReservationSlots {
    pub fn clear(&mut self, slot: SlotName) {
        match slot {
            SlotName::Location => self.location = None,
            SlotName::Cuisine => self.cuisine = None,
            SlotName::DiningTime => self.dining_time = None,
            SlotName::DiningDate => self.dining_date = None,
            SlotName::NumberOfPeople => self.number_of_people = None,
            SlotName::PhoneNumber => self.phone_number = None,
        }
    }
}
