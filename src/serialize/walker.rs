//! Bounded, cycle-safe conversion of a [`Value`] into a [`LogValue`].
//!
//! # Rules
//! - Scalars pass through; non-finite floats become `null`, bigints and
//!   symbols become strings.
//! - Strings over the limit keep a prefix plus a `…(truncated N chars)` marker.
//! - Dates, regexes, errors and functions are rendered regardless of depth.
//! - Composites at exhausted depth become `[Array(n)]` / `[Object Name]`.
//! - A composite reached twice in one call renders as `[Circular]`.
//! - Arrays, maps, sets and objects are cut to their width limits with a
//!   trailing overflow marker.
//! - Host objects render through `Display`, falling back to `[object Tag]`.

use std::collections::HashSet;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use chrono::SecondsFormat;
use serde_json::{Map, Number};

use crate::serialize::options::SerializeOptions;
use crate::serialize::value::{ArrayRef, ErrorValue, HostObject, MapRef, ObjectRef, SetRef, Value};
use crate::serialize::LogValue;

/// Marker for a composite already visited in the current call.
pub const CIRCULAR: &str = "[Circular]";

/// Sentinel field added to objects that had keys dropped.
pub const MORE_KEYS_FIELD: &str = "__moreKeys";

/// Room reserved for the truncation marker.
const TRUNCATION_RESERVE: usize = 24;

/// Convert `value` into a bounded, JSON-safe [`LogValue`].
///
/// Never fails. Each call owns a fresh visited set.
pub fn serialize(value: &Value, options: &SerializeOptions) -> LogValue {
    let mut walker = Walker {
        options,
        visited: HashSet::new(),
    };
    walker.walk(value, options.depth)
}

/// Truncate `text` to `max` characters, marker included.
///
/// Limits below the marker reserve keep no prefix at all.
pub fn truncate_string(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_owned();
    }
    let length = text.chars().count();
    if length <= max {
        return text.to_owned();
    }
    let keep = max.saturating_sub(TRUNCATION_RESERVE);
    let kept: String = text.chars().take(keep).collect();
    format!("{kept}…(truncated {} chars)", length - keep)
}

struct Walker<'a> {
    options: &'a SerializeOptions,
    visited: HashSet<usize>,
}

impl Walker<'_> {
    fn walk(&mut self, value: &Value, depth_left: usize) -> LogValue {
        match value {
            Value::Undefined | Value::Null => LogValue::Null,
            Value::Bool(b) => LogValue::Bool(*b),
            Value::Int(n) => LogValue::from(*n),
            Value::UInt(n) => LogValue::from(*n),
            Value::Float(n) => Number::from_f64(*n).map_or(LogValue::Null, LogValue::Number),
            Value::BigInt(n) => LogValue::String(n.to_string()),
            Value::Symbol(description) => {
                LogValue::String(format!("Symbol({})", description.as_deref().unwrap_or_default()))
            }
            Value::String(s) => LogValue::String(truncate_string(s, self.options.max_string_length)),
            Value::Date(at) => LogValue::String(at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::Regex(re) => LogValue::String(format!("/{}/", re.as_str())),
            Value::Error(err) => self.walk_error(err, depth_left),
            Value::Function(name) => {
                let name = name.as_deref().filter(|name| !name.is_empty()).unwrap_or("anonymous");
                LogValue::String(format!("[Function {name}]"))
            }

            Value::Array(array) if depth_left == 0 => {
                LogValue::String(format!("[Array({})]", array.read().len()))
            }
            Value::Map(_) if depth_left == 0 => placeholder("Map"),
            Value::Set(_) if depth_left == 0 => placeholder("Set"),
            Value::Object(object) if depth_left == 0 => {
                placeholder(object.read().class().unwrap_or("Object"))
            }

            Value::Array(array) => {
                self.enter(array.identity(), |walker| walker.walk_array(array, depth_left - 1))
            }
            Value::Map(map) => self.enter(map.identity(), |walker| walker.walk_map(map, depth_left - 1)),
            Value::Set(set) => self.enter(set.identity(), |walker| walker.walk_set(set, depth_left - 1)),
            Value::Object(object) => {
                self.enter(object.identity(), |walker| walker.walk_object(object, depth_left - 1))
            }

            Value::Host(host) => self.describe_host(host.as_ref()),
        }
    }

    /// Register `identity`, or short-circuit with the circular marker.
    fn enter(&mut self, identity: usize, visit: impl FnOnce(&mut Self) -> LogValue) -> LogValue {
        if !self.visited.insert(identity) {
            return LogValue::String(CIRCULAR.to_owned());
        }
        visit(self)
    }

    fn walk_error(&mut self, err: &ErrorValue, depth_left: usize) -> LogValue {
        let max = self.options.max_string_length;
        let mut out = Map::new();
        out.insert("name".to_owned(), LogValue::String(truncate_string(err.name(), max)));
        out.insert("message".to_owned(), LogValue::String(truncate_string(err.message(), max)));
        out.insert(
            "stack".to_owned(),
            err.stack()
                .map_or(LogValue::Null, |stack| LogValue::String(truncate_string(stack, max))),
        );
        for (key, value) in err.fields() {
            out.insert(key.clone(), self.walk(value, depth_left.saturating_sub(1)));
        }
        LogValue::Object(out)
    }

    fn walk_array(&mut self, array: &ArrayRef, child_depth: usize) -> LogValue {
        let limit = self.options.max_array_length;
        let (items, total) = {
            let items = array.read();
            (items.iter().take(limit).cloned().collect::<Vec<_>>(), items.len())
        };
        let mut out: Vec<LogValue> = items.iter().map(|item| self.walk(item, child_depth)).collect();
        if total > limit {
            out.push(overflow(total - limit, "items"));
        }
        LogValue::Array(out)
    }

    fn walk_map(&mut self, map: &MapRef, child_depth: usize) -> LogValue {
        let limit = self.options.max_keys;
        let (entries, total) = {
            let entries = map.read();
            (entries.iter().take(limit).cloned().collect::<Vec<_>>(), entries.len())
        };
        let kept: Vec<LogValue> = entries
            .iter()
            .map(|(key, value)| {
                let key = self.walk(key, child_depth);
                LogValue::Array(vec![key, self.walk(value, child_depth)])
            })
            .collect();

        let mut out = tagged("Map");
        out.insert("entries".to_owned(), LogValue::Array(kept));
        if total > limit {
            out.insert("more".to_owned(), overflow(total - limit, "entries"));
        }
        LogValue::Object(out)
    }

    fn walk_set(&mut self, set: &SetRef, child_depth: usize) -> LogValue {
        let limit = self.options.max_array_length;
        let (members, total) = {
            let members = set.read();
            (members.iter().take(limit).cloned().collect::<Vec<_>>(), members.len())
        };
        let kept: Vec<LogValue> = members.iter().map(|member| self.walk(member, child_depth)).collect();

        let mut out = tagged("Set");
        out.insert("values".to_owned(), LogValue::Array(kept));
        if total > limit {
            out.insert("more".to_owned(), overflow(total - limit, "items"));
        }
        LogValue::Object(out)
    }

    fn walk_object(&mut self, object: &ObjectRef, child_depth: usize) -> LogValue {
        let limit = self.options.max_keys;
        let (fields, total) = {
            let object = object.read();
            let fields = object.fields();
            (
                fields
                    .iter()
                    .take(limit)
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect::<Vec<_>>(),
                fields.len(),
            )
        };
        let mut out = Map::new();
        for (key, value) in fields {
            let rendered = self.walk(&value, child_depth);
            out.insert(key, rendered);
        }
        if total > limit {
            out.insert(MORE_KEYS_FIELD.to_owned(), overflow(total - limit, "keys"));
        }
        LogValue::Object(out)
    }

    fn describe_host(&self, host: &dyn HostObject) -> LogValue {
        let rendered = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut text = String::new();
            fmt::write(&mut text, format_args!("{host}")).map(|()| text)
        }));
        match rendered {
            Ok(Ok(text)) => LogValue::String(truncate_string(&text, self.options.max_string_length)),
            Ok(Err(_)) | Err(_) => {
                let tag = panic::catch_unwind(AssertUnwindSafe(|| host.type_tag().to_owned()))
                    .unwrap_or_else(|_| "Object".to_owned());
                LogValue::String(format!("[object {tag}]"))
            }
        }
    }
}

fn placeholder(type_name: &str) -> LogValue {
    LogValue::String(format!("[Object {type_name}]"))
}

fn overflow(dropped: usize, unit: &str) -> LogValue {
    LogValue::String(format!("…(+{dropped} {unit})"))
}

fn tagged(type_name: &str) -> Map<String, LogValue> {
    let mut out = Map::new();
    out.insert("type".to_owned(), LogValue::String(type_name.to_owned()));
    out
}
