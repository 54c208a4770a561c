//! Wire Types
//!
//! JSON bodies of the `predict` and `train` operations and endpoint
//! resolution against the service base URL.

use std::fmt;

use digitpad_sample::Sample;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::NetError;

/// Classifier label, always within 0..=9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 { Some(Self(value)) } else { None }
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Digit {
    type Error = InvalidDigit;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidDigit(value))
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("label {0} is outside 0..=9")]
pub struct InvalidDigit(pub u8);

/// `POST /api/predict` body
#[derive(Debug, Serialize)]
pub struct PredictRequest<'a> {
    pub image: &'a Sample,
}

/// `POST /api/predict` success body
#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    pub prediction: Digit,
}

/// `POST /api/train` body
#[derive(Debug, Serialize)]
pub struct TrainRequest<'a> {
    pub image: &'a Sample,
    pub label: Digit,
}

/// `POST /api/train` success body
#[derive(Debug, Deserialize)]
pub struct TrainResponse {
    pub status: String,
}

/// Resolved operation URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub predict: Url,
    pub train: Url,
}

impl Endpoints {
    pub const PREDICT_PATH: &'static str = "api/predict";
    pub const TRAIN_PATH: &'static str = "api/train";

    /// Resolve both operations relative to `base`.
    ///
    /// `http://host/app` and `http://host/app/` both yield
    /// `http://host/app/api/predict`.
    pub fn from_base(base: &str) -> Result<Self, NetError> {
        let mut base = Url::parse(base).map_err(|e| NetError::InvalidUrl(format!("{base}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(NetError::InvalidUrl(base.to_string()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);

        let join = |path: &str| {
            base.join(path)
                .map_err(|e| NetError::InvalidUrl(format!("{path}: {e}")))
        };
        Ok(Self {
            predict: join(Self::PREDICT_PATH)?,
            train: join(Self::TRAIN_PATH)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_range() {
        assert_eq!(Digit::new(0).map(Digit::value), Some(0));
        assert_eq!(Digit::new(9).map(Digit::value), Some(9));
        assert_eq!(Digit::new(10), None);
        assert_eq!(Digit::try_from(12), Err(InvalidDigit(12)));
    }

    #[test]
    fn test_digit_serde() {
        let digit: Digit = serde_json::from_str("7").unwrap();
        assert_eq!(digit.value(), 7);
        assert_eq!(serde_json::to_string(&digit).unwrap(), "7");

        assert!(serde_json::from_str::<Digit>("10").is_err());
        assert!(serde_json::from_str::<Digit>("-1").is_err());
        assert!(serde_json::from_str::<Digit>("\"7\"").is_err());
    }

    #[test]
    fn test_response_shapes() {
        let predict: PredictResponse = serde_json::from_str(r#"{"prediction": 4}"#).unwrap();
        assert_eq!(predict.prediction.value(), 4);

        let train: TrainResponse =
            serde_json::from_str(r#"{"status": "Model trained on one sample"}"#).unwrap();
        assert_eq!(train.status, "Model trained on one sample");

        assert!(serde_json::from_str::<PredictResponse>(r#"{"status": "ok"}"#).is_err());
    }

    #[test]
    fn test_endpoints_from_base() {
        let endpoints = Endpoints::from_base("http://localhost:8000").unwrap();
        assert_eq!(endpoints.predict.as_str(), "http://localhost:8000/api/predict");
        assert_eq!(endpoints.train.as_str(), "http://localhost:8000/api/train");

        let nested = Endpoints::from_base("https://example.com/digits?x=1").unwrap();
        assert_eq!(nested.predict.as_str(), "https://example.com/digits/api/predict");

        let slashed = Endpoints::from_base("https://example.com/digits/").unwrap();
        assert_eq!(slashed, nested);
    }

    #[test]
    fn test_endpoints_reject_bad_urls() {
        assert!(matches!(Endpoints::from_base("not a url"), Err(NetError::InvalidUrl(_))));
        assert!(matches!(Endpoints::from_base("mailto:a@b.c"), Err(NetError::InvalidUrl(_))));
    }
}
