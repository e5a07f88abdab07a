use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use validator::{Validate, ValidationError};

pub const MAX_QUESTION_COUNT: u32 = 50;
pub const MAX_DETAILS_CHARS: u64 = 2000;

/// How many questions to ask for: a fixed count or the generator's choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Quantity {
    #[default]
    Auto,
    Count(u32),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuantityRepr {
    Number(u32),
    Text(String),
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match QuantityRepr::deserialize(deserializer)? {
            QuantityRepr::Number(n) => Ok(Quantity::Count(n)),
            QuantityRepr::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
                    return Ok(Quantity::Auto);
                }
                trimmed
                    .parse::<u32>()
                    .map(Quantity::Count)
                    .map_err(|_| de::Error::custom(format!("invalid quantity '{}'", text)))
            }
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Quantity::Auto => serializer.serialize_str("auto"),
            Quantity::Count(n) => serializer.serialize_u32(*n),
        }
    }
}

/// Requested answer format for the whole quiz.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatPreference {
    #[default]
    #[serde(alias = "random")]
    Auto,
    Choice,
    Write,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct QuizSettings {
    #[serde(default)]
    #[validate(custom(function = "validate_quantity"))]
    pub quantity: Quantity,

    #[serde(default)]
    pub format: FormatPreference,

    #[serde(default)]
    #[validate(length(max = MAX_DETAILS_CHARS))]
    pub details: String,
}

fn validate_quantity(quantity: &Quantity) -> Result<(), ValidationError> {
    match quantity {
        Quantity::Auto => Ok(()),
        Quantity::Count(n) if (1..=MAX_QUESTION_COUNT).contains(n) => Ok(()),
        Quantity::Count(_) => {
            let mut err = ValidationError::new("quantity_range");
            err.message = Some(
                format!("quantity must be 'auto' or between 1 and {}", MAX_QUESTION_COUNT).into(),
            );
            Err(err)
        }
    }
}
