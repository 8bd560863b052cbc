//! Locating the quaternion inside a message.
//!
//! Messages arrive as dynamic [`serde_json::Value`] trees. A content path is a
//! `/`-separated list of field names from the message root, e.g. `pose/orientation`
//! for a `geometry_msgs/PoseStamped`. Empty segments (leading, trailing or doubled
//! slashes) are ignored, so an empty path addresses the whole message.

use orientation::Quaternion;
use serde_json::Value;

use crate::error::{InspectorError, Result};

/// Walks `path` down from `msg`.
pub fn resolve<'a>(msg: &'a Value, path: &str) -> Result<&'a Value> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .try_fold(msg, |node, field| {
            // `get` with a string key only ever matches object fields.
            node.get(field)
                .ok_or_else(|| InspectorError::missing_field(path, field))
        })
}

/// Reads a `{ x, y, z, w }` object as a quaternion. Extra fields are ignored.
pub fn quaternion_from_value(value: &Value, path: &str) -> Result<Quaternion> {
    let Some(object) = value.as_object() else {
        return Err(InspectorError::unsupported_field_type(path, kind_name(value)));
    };

    let component = |name: &str| object.get(name).and_then(Value::as_f64);
    match (component("x"), component("y"), component("z"), component("w")) {
        (Some(x), Some(y), Some(z), Some(w)) => Ok(Quaternion::new(x, y, z, w)),
        _ => Err(InspectorError::unsupported_field_type(path, "object")),
    }
}

/// Resolves `path` and reads the quaternion found there.
pub fn extract_quaternion(msg: &Value, path: &str) -> Result<Quaternion> {
    let field = resolve(msg, path)?;
    quaternion_from_value(field, path)
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
