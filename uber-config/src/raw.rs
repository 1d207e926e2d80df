//! Serde shapes of the configuration document.
//!
//! Storage hands out an untyped [`RawDocument`]. The keys the model
//! interprets are split off and decoded into [`ConfigDoc`]; every other
//! top-level entry is kept as a `Value` pair, whatever its key type, and
//! flattened back in when the document is written.

// Standard library
use std::fmt;

// External crates
use indexmap::IndexMap;
use serde::de::{Deserializer, Error, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use serde_yaml_ng::{Mapping, Value};
use uber_core::error::{Result, UberError};

/// Untyped document as read from storage, before validation.
pub type RawDocument = Mapping;

/// Top-level keys decoded into [`ConfigDoc`].
pub(crate) const MODEL_KEYS: [&str; 4] = ["ip", "memory", "cpus", "sites"];

/// One entry of the `sites` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SiteDoc {
    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub name: String,

    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub domain: String,

    #[serde(deserialize_with = "deserialize_string_or_number")]
    pub directory: String,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_option_string_or_number"
    )]
    pub webroot: Option<String>,
}

/// The whole document. Null and missing values decode to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct ConfigDoc {
    #[serde(default, deserialize_with = "deserialize_option_string_or_number")]
    pub ip: Option<String>,

    #[serde(default, deserialize_with = "deserialize_option_integer")]
    pub memory: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_option_integer")]
    pub cpus: Option<i64>,

    #[serde(flatten, skip_deserializing)]
    pub extra: IndexMap<Value, Value>,

    #[serde(default)]
    pub sites: Option<Vec<SiteDoc>>,
}

impl ConfigDoc {
    pub(crate) fn from_document(raw: &RawDocument) -> Result<Self> {
        let mut model = Mapping::new();
        let mut extra = IndexMap::new();
        for (key, value) in raw {
            match key.as_str() {
                Some(name) if MODEL_KEYS.contains(&name) => {
                    model.insert(key.clone(), value.clone());
                }
                _ => {
                    extra.insert(key.clone(), value.clone());
                }
            }
        }

        let mut doc: ConfigDoc =
            serde_yaml_ng::from_value(Value::Mapping(model)).map_err(invalid_document)?;
        doc.extra = extra;
        Ok(doc)
    }

    pub(crate) fn into_document(self) -> Result<RawDocument> {
        match serde_yaml_ng::to_value(self)? {
            Value::Mapping(mapping) => Ok(mapping),
            _ => Err(UberError::Serialization(
                "configuration did not serialize to a mapping".to_string(),
            )),
        }
    }
}

impl SiteDoc {
    pub(crate) fn from_value(raw: &Value) -> Result<Self> {
        SiteDoc::deserialize(raw).map_err(|e| {
            UberError::Validation(format!("invalid site entry: {}", e))
        })
    }
}

fn invalid_document(err: serde_yaml_ng::Error) -> UberError {
    UberError::Validation(err.to_string())
}

struct StringOrNumberVisitor;

impl<'de> Visitor<'de> for StringOrNumberVisitor {
    type Value = String;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or number")
    }

    fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(value.to_string())
    }

    fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(value.to_string())
    }

    fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(value.to_string())
    }

    fn visit_f64<E>(self, value: f64) -> std::result::Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(value.to_string())
    }
}

/// Strings pass through; numbers (`name: 2024`) are rendered as text.
fn deserialize_string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(StringOrNumberVisitor)
}

fn deserialize_option_string_or_number<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OptionVisitor;

    impl<'de> Visitor<'de> for OptionVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number, or null")
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserialize_string_or_number(deserializer).map(Some)
        }
    }

    deserializer.deserialize_option(OptionVisitor)
}

/// Whole numbers, written either as numbers or numeric strings (`cpus: "2"`).
fn deserialize_option_integer<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct IntegerVisitor;

    impl<'de> Visitor<'de> for IntegerVisitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a whole number")
        }

        fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E>
        where
            E: Error,
        {
            i64::try_from(value).map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: Error,
        {
            value
                .trim()
                .parse()
                .map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
        }
    }

    struct OptionVisitor;

    impl<'de> Visitor<'de> for OptionVisitor {
        type Value = Option<i64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a whole number or null")
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(IntegerVisitor).map(Some)
        }
    }

    deserializer.deserialize_option(OptionVisitor)
}
