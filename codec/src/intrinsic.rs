//! The intrinsic handler table.
//!
//! A small closed set of host types maps to wire-exact forms that
//! structural walking would degrade: raw byte buffers, timestamps,
//! points, and rectangles. Both entry points consult this table before
//! structural dispatch, so intrinsic semantics win at every nesting
//! depth.

use crate::error::DecodeError;
use crate::impls::{self, Blob};
use std::any::{Any, TypeId};
use std::sync::OnceLock;
use wire_types::{Point, Rect, Timestamp, Value};

struct Handler {
    type_id: TypeId,
    encode: fn(&dyn Any) -> Option<Value>,
    decode: fn(&Value) -> Result<Box<dyn Any>, DecodeError>,
}

fn handlers() -> &'static [Handler] {
    static TABLE: OnceLock<Vec<Handler>> = OnceLock::new();
    TABLE.get_or_init(|| {
        vec![
            Handler {
                type_id: TypeId::of::<Blob>(),
                encode: |any| any.downcast_ref::<Blob>().map(Blob::to_value),
                decode: |value| impls::parse_blob(value).map(boxed),
            },
            Handler {
                type_id: TypeId::of::<Timestamp>(),
                encode: |any| any.downcast_ref::<Timestamp>().map(|t| Value::Timestamp(*t)),
                decode: |value| impls::parse_timestamp(value).map(boxed),
            },
            Handler {
                type_id: TypeId::of::<Point>(),
                encode: |any| any.downcast_ref::<Point>().map(|p| Value::Point(*p)),
                decode: |value| impls::parse_point(value).map(boxed),
            },
            Handler {
                type_id: TypeId::of::<Rect>(),
                encode: |any| any.downcast_ref::<Rect>().map(|r| Value::Rect(*r)),
                decode: |value| impls::parse_rect(value).map(boxed),
            },
        ]
    })
}

fn boxed<T: Any>(value: T) -> Box<dyn Any> {
    Box::new(value)
}

fn handler_for(type_id: TypeId) -> Option<&'static Handler> {
    handlers().iter().find(|handler| handler.type_id == type_id)
}

/// Encodes `value` through the intrinsic table, if its type is listed.
pub(crate) fn encode<T: Any>(value: &T) -> Option<Value> {
    let handler = handler_for(TypeId::of::<T>())?;
    (handler.encode)(value)
}

/// Decodes into `T` through the intrinsic table, if `T` is listed.
pub(crate) fn decode<T: Any>(value: &Value) -> Option<Result<T, DecodeError>> {
    let handler = handler_for(TypeId::of::<T>())?;
    Some((handler.decode)(value).and_then(|any| {
        any.downcast::<T>()
            .map(|concrete| *concrete)
            .map_err(|_| DecodeError::wrong_type("intrinsic", value))
    }))
}
