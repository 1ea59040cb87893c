//! Reminder language and its localized text bundle

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Localized strings used in notifications and calendar entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBundle {
    /// Subject label, followed by the name and date
    pub subject: &'static str,
    pub header: &'static str,
    /// Text before the name
    pub body1: &'static str,
    /// Text directly after the name
    pub body2: &'static str,
    pub footer: &'static str,
}

const GERMAN: TextBundle = TextBundle {
    subject: "Geburtstag:",
    header: "Geburtstags-Erinnerung",
    body1: "Heute ist der Geburtstag von",
    body2: ".",
    footer: "Diese E-Mail wurde automatisch generiert. Bitte nicht antworten.",
};

const ENGLISH: TextBundle = TextBundle {
    subject: "Birthday:",
    header: "Birthday Reminder",
    body1: "Today is",
    body2: "'s birthday.",
    footer: "This email was automatically generated. Please do not reply.",
};

/// Supported reminder languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    De,
    #[default]
    En,
}

impl Language {
    /// Resolve a language code case-insensitively, falling back to English
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "de" => Self::De,
            _ => Self::En,
        }
    }

    /// Lowercase code used for the HTML `lang` attribute
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::De => "de",
            Self::En => "en",
        }
    }

    #[must_use]
    pub const fn texts(self) -> &'static TextBundle {
        match self {
            Self::De => &GERMAN,
            Self::En => &ENGLISH,
        }
    }

    /// `"<body1> <name><body2>"`, shared by mail bodies and calendar descriptions
    #[must_use]
    pub fn greeting(self, name: &str) -> String {
        let texts = self.texts();
        format!("{} {name}{}", texts.body1, texts.body2)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code().to_ascii_uppercase())
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Self::from_code(&code))
    }
}
