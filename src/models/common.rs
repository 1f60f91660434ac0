use serde::{Deserialize, Deserializer};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Resolve `skip`/`limit` query parameters into a safe OFFSET/LIMIT pair.
pub fn page_bounds(skip: Option<i64>, limit: Option<i64>) -> (i64, i64) {
    let skip = skip.unwrap_or(0).max(0);
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(0, MAX_PAGE_SIZE);
    (skip, limit)
}

/// Keeps "field absent" and "field sent as null" apart in PATCH bodies.
///
/// Use together with `#[serde(default)]`: an absent field stays `None`,
/// an explicit `null` becomes `Some(None)`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Overwrite `target` only when the client supplied a value.
pub fn merge<T>(target: &mut T, patch: Option<T>) {
    if let Some(value) = patch {
        *target = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "double_option")]
        country: Option<Option<String>>,
    }

    #[test]
    fn double_option_distinguishes_absent_from_null() {
        let absent: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.country, None);

        let null: Probe = serde_json::from_str(r#"{"country": null}"#).unwrap();
        assert_eq!(null.country, Some(None));

        let value: Probe = serde_json::from_str(r#"{"country": "Spain"}"#).unwrap();
        assert_eq!(value.country, Some(Some("Spain".to_string())));
    }

    #[test]
    fn merge_only_overwrites_supplied_values() {
        let mut name = "Arsenal".to_string();
        merge(&mut name, None);
        assert_eq!(name, "Arsenal");
        merge(&mut name, Some("Chelsea".to_string()));
        assert_eq!(name, "Chelsea");

        let mut country = Some("England".to_string());
        merge(&mut country, Some(None));
        assert_eq!(country, None);
    }

    #[test]
    fn page_bounds_apply_defaults_and_caps() {
        assert_eq!(page_bounds(None, None), (0, DEFAULT_PAGE_SIZE));
        assert_eq!(page_bounds(Some(-5), Some(1000)), (0, MAX_PAGE_SIZE));
        assert_eq!(page_bounds(Some(40), Some(10)), (40, 10));
    }
}
