use serde::{Deserialize, Deserializer};

/// A field of a partial update.
///
/// Use with `#[serde(default)]` so a missing key becomes `Absent`, while an
/// explicit JSON `null` becomes `Null`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn into_value(self) -> Option<T> {
        match self {
            Patch::Value(v) => Some(v),
            Patch::Absent | Patch::Null => None,
        }
    }
}

impl Patch<String> {
    /// Text value, if one was supplied and is not blank.
    pub fn into_text(self) -> Option<String> {
        self.into_value()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}
