//! Priority-ordered, per-field override merging.
//!
//! Every override source (stored page document, tenant branding, account
//! branding) is a record of optional fields. A source only replaces the fields
//! it actually carries; an empty source is a no-op and never masks a lower
//! layer.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// A partial record that can be laid over a complete `T`.
pub trait Overlay<T> {
    fn overlay_onto(&self, base: &mut T);
}

impl<T, O: Overlay<T>> Overlay<T> for Option<O> {
    fn overlay_onto(&self, base: &mut T) {
        if let Some(overlay) = self {
            overlay.overlay_onto(base);
        }
    }
}

/// Fold `layers` onto a copy of `base`, lowest priority first.
pub fn cascade<'a, T, O, I>(base: &T, layers: I) -> T
where
    T: Clone,
    O: Overlay<T> + 'a,
    I: IntoIterator<Item = &'a O>,
{
    layers.into_iter().fold(base.clone(), |mut merged, layer| {
        layer.overlay_onto(&mut merged);
        merged
    })
}

/// Copy every `Some` field of `$overlay` into the same-named field of `$base`.
///
/// `set` targets plain fields, `wrap` targets `Option` fields on the base.
macro_rules! overlay_fields {
    (set $overlay:expr => $base:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$overlay.$field {
                $base.$field = value.clone();
            }
        )+
    };
    (wrap $overlay:expr => $base:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$overlay.$field {
                $base.$field = Some(value.clone());
            }
        )+
    };
}

pub(crate) use overlay_fields;

/// Decode one optional field of a stored record. `null` and values of the
/// wrong shape both come back as `None` so that the rest of the record
/// still applies.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }

    match serde_json::from_value(value) {
        Ok(decoded) => Ok(Some(decoded)),
        Err(err) => {
            warn!(%err, "ignoring malformed stored field");
            Ok(None)
        }
    }
}
