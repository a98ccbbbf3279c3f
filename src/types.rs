use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder written for listings without a website. Downstream files
/// expect this exact literal, not an empty field.
pub const MISSING_WEBSITE: &str = "a";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchoolType {
    Afdeling,
    Hovedskole,
    Institution,
    /// Produced when a listing carries a type label outside the three
    /// known phrases. Never used to query the site.
    Unknown,
}

impl SchoolType {
    /// The query-string value the directory expects for this category.
    pub fn slug(&self) -> &'static str {
        match self {
            SchoolType::Afdeling => "afdeling",
            SchoolType::Hovedskole => "hovedskole",
            SchoolType::Institution => "institution-unden-enheder",
            SchoolType::Unknown => "",
        }
    }

    /// Maps the localized type label from a listing's info text. Labels
    /// must match exactly; anything else is `Unknown`.
    pub fn from_label(label: &str) -> SchoolType {
        match label {
            "Afdeling (underordnet enhed)" => SchoolType::Afdeling,
            "Hovedskole (institution med enheder)" => SchoolType::Hovedskole,
            "Institution uden enheder" => SchoolType::Institution,
            _ => SchoolType::Unknown,
        }
    }
}

impl fmt::Display for SchoolType {
    /// Short form used in the output line: the slug up to the first dash.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = self.slug().split('-').next().unwrap_or("");
        write!(f, "{}", short)
    }
}

impl FromStr for SchoolType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "afdeling" => Ok(SchoolType::Afdeling),
            "hovedskole" => Ok(SchoolType::Hovedskole),
            "institution" | "institution-unden-enheder" => Ok(SchoolType::Institution),
            _ => Err(format!(
                "unknown school type '{s}', expected afdeling, hovedskole or institution"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
}

impl Address {
    pub fn new(street: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.street, self.city)
    }
}

/// One directory entry. Constructed once per parsed listing and immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    pub name: String,
    pub school_type: SchoolType,
    pub dean: String,
    pub address: Address,
    pub website: String,
}

impl School {
    pub fn new(
        name: String,
        school_type: SchoolType,
        dean: String,
        address: Address,
        website: String,
    ) -> Self {
        Self {
            name,
            school_type,
            dean,
            address,
            website,
        }
    }
}

impl fmt::Display for School {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}",
            self.name, self.school_type, self.dean, self.address, self.website
        )
    }
}
