//! Response envelope normalisation.
//!
//! Backend endpoints answer either `{ "data": T }` or a bare `T`. Callers
//! decode into [`Payload`] and normalise once with [`Payload::into_inner`].

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// The two response shapes the backend produces.
///
/// # Examples
/// ```
/// use frontend::domain::Payload;
/// use serde_json::json;
///
/// let wrapped: Payload<Vec<u8>> = serde_json::from_value(json!({ "data": [1, 2] })).unwrap();
/// let bare: Payload<Vec<u8>> = serde_json::from_value(json!([1, 2])).unwrap();
/// assert_eq!(wrapped.into_inner(), bare.into_inner());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Payload<T> {
    /// `{ "data": T, ... }`; sibling fields such as `success` are ignored.
    Envelope {
        /// Wrapped value.
        data: T,
    },
    /// `T` with no wrapper.
    Bare(T),
}

impl<T> Payload<T> {
    /// Unwrap `.data` when present, otherwise take the value itself.
    pub fn into_inner(self) -> T {
        match self {
            Self::Envelope { data } => data,
            Self::Bare(value) => value,
        }
    }
}

/// Decode a JSON body of either shape into `T`.
///
/// The error string names what was expected so adapters can wrap it in
/// their own decode error.
pub fn decode_payload<T: DeserializeOwned>(body: Value) -> Result<T, String> {
    serde_json::from_value::<Payload<T>>(body)
        .map(Payload::into_inner)
        .map_err(|err| {
            format!(
                "expected {} or an object wrapping it in `data`: {err}",
                std::any::type_name::<T>()
            )
        })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Named {
        name: String,
    }

    #[rstest]
    #[case::envelope(json!({ "success": true, "data": [{ "name": "a" }, { "name": "b" }] }))]
    #[case::bare(json!([{ "name": "a" }, { "name": "b" }]))]
    fn both_shapes_normalise_to_the_same_items(#[case] body: Value) {
        let items: Vec<Named> = decode_payload(body).expect("decodes");
        let names = items.into_iter().map(|item| item.name).collect::<Vec<_>>();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn bare_objects_decode_when_no_data_key_exists() {
        let item: Named = decode_payload(json!({ "name": "solo" })).expect("bare object");
        assert_eq!(item.name, "solo");
    }

    #[rstest]
    #[case::null(Value::Null)]
    #[case::wrong_inner_shape(json!({ "data": { "name": 1 } }))]
    #[case::message_only(json!({ "message": "nope" }))]
    fn mismatched_bodies_fail(#[case] body: Value) {
        assert!(decode_payload::<Vec<Named>>(body).is_err());
    }

    #[test]
    fn decode_errors_keep_the_serde_detail() {
        let err = decode_payload::<Named>(json!([1, 2])).expect_err("array is not an object");
        assert!(err.contains("Named"), "{err}");
        assert!(err.contains("did not match any variant"), "{err}");
    }
}
