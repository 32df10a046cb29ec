//! Mobile platform types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::AwsError;

/// Mobile platform backed by an SNS platform application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// iOS device (APNS).
    Ios,
    /// Android device (GCM/FCM).
    Android,
}

impl Platform {
    /// Lowercase platform name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = AwsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            other => Err(AwsError::Config(format!("Unknown platform '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("ios".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!("Android".parse::<Platform>().unwrap(), Platform::Android);
        assert!("web".parse::<Platform>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Platform::Ios).unwrap(), r#""ios""#);
        let p: Platform = serde_json::from_str(r#""android""#).unwrap();
        assert_eq!(p, Platform::Android);
    }
}
