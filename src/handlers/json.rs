//! JSON handler for structured logging
//!
//! Writes each record as a single-line JSON object (JSONL format). It is a
//! complete `Handler` on its own and is also the encoder `FlareHandler`
//! embeds to extract the attribute blob of a record.

use crate::core::attr::{Attr, Value, LEVEL_KEY, MESSAGE_KEY, SOURCE_KEY, TIME_KEY};
use crate::core::{Handler, HandlerOptions, Level, Record, Result};
use parking_lot::Mutex;
use serde_json::Map;
use std::io::Write;
use std::sync::Arc;

type JsonMap = Map<String, serde_json::Value>;

/// Attributes bound with `with_attrs`, already resolved at the group depth
/// that was open when they were bound.
#[derive(Clone)]
struct Bound {
    depth: usize,
    fields: JsonMap,
}

pub struct JsonHandler<W> {
    writer: Arc<Mutex<W>>,
    options: HandlerOptions,
    groups: Vec<String>,
    bound: Vec<Bound>,
}

impl<W> Clone for JsonHandler<W> {
    fn clone(&self) -> Self {
        Self {
            writer: Arc::clone(&self.writer),
            options: self.options.clone(),
            groups: self.groups.clone(),
            bound: self.bound.clone(),
        }
    }
}

impl<W: Write + Send + 'static> JsonHandler<W> {
    pub fn new(writer: W, options: HandlerOptions) -> Self {
        Self::with_shared_writer(Arc::new(Mutex::new(writer)), options)
    }

    /// Create a handler writing into a writer the caller keeps a handle on
    pub fn with_shared_writer(writer: Arc<Mutex<W>>, options: HandlerOptions) -> Self {
        Self {
            writer,
            options,
            groups: Vec::new(),
            bound: Vec::new(),
        }
    }

    pub fn writer(&self) -> &Arc<Mutex<W>> {
        &self.writer
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.options.level
    }

    /// Derive a handler whose output always carries `attrs`
    #[must_use]
    pub fn with_attrs(&self, attrs: &[Attr]) -> Self {
        let mut derived = self.clone();
        if attrs.is_empty() {
            return derived;
        }

        let mut fields = JsonMap::new();
        for attr in attrs {
            self.resolve_into(&mut fields, &self.groups, attr.clone());
        }
        if !fields.is_empty() {
            derived.bound.push(Bound {
                depth: self.groups.len(),
                fields,
            });
        }
        derived
    }

    /// Derive a handler that nests every later attribute under `name`
    #[must_use]
    pub fn with_group(&self, name: &str) -> Self {
        let mut derived = self.clone();
        if !name.is_empty() {
            derived.groups.push(name.to_string());
        }
        derived
    }

    /// Build the JSON object for a record
    pub fn encode(&self, record: &Record) -> JsonMap {
        let mut root = JsonMap::new();

        self.insert_builtin(&mut root, Attr::new(TIME_KEY, record.time));
        self.insert_builtin(&mut root, Attr::new(LEVEL_KEY, record.level));
        self.insert_builtin(&mut root, Attr::new(MESSAGE_KEY, record.message.as_str()));
        if self.options.add_source {
            if let Some(ref source) = record.source {
                self.insert_builtin(&mut root, Attr::new(SOURCE_KEY, source.to_value()));
            }
        }

        for bound in &self.bound {
            merge_at(&mut root, &self.groups[..bound.depth], bound.fields.clone());
        }

        let mut fields = JsonMap::new();
        for attr in &record.attrs {
            self.resolve_into(&mut fields, &self.groups, attr.clone());
        }
        if !fields.is_empty() {
            merge_at(&mut root, &self.groups, fields);
        }

        root
    }

    fn rewrite(&self, groups: &[String], attr: Attr) -> Option<Attr> {
        match self.options.replace_attr {
            Some(ref hook) => hook(groups, attr).into_attr(),
            None => Some(attr),
        }
    }

    fn insert_builtin(&self, root: &mut JsonMap, attr: Attr) {
        if let Some(attr) = self.rewrite(&[], attr) {
            if !attr.key.is_empty() {
                root.insert(attr.key, attr.value.to_json_value());
            }
        }
    }

    fn resolve_into(&self, out: &mut JsonMap, groups: &[String], attr: Attr) {
        if let Value::Group(members) = attr.value {
            if members.is_empty() {
                return;
            }
            if attr.key.is_empty() {
                for member in members {
                    self.resolve_into(out, groups, member);
                }
                return;
            }

            let mut path = groups.to_vec();
            path.push(attr.key.clone());
            let mut nested = JsonMap::new();
            for member in members {
                self.resolve_into(&mut nested, &path, member);
            }
            if !nested.is_empty() {
                out.insert(attr.key, serde_json::Value::Object(nested));
            }
            return;
        }

        if let Some(attr) = self.rewrite(groups, attr) {
            if !attr.key.is_empty() {
                out.insert(attr.key, attr.value.to_json_value());
            }
        }
    }
}

/// Merge `fields` into the object found by walking `path` from `target`,
/// creating intermediate objects as needed.
fn merge_at(target: &mut JsonMap, path: &[String], fields: JsonMap) {
    match path.split_first() {
        None => target.extend(fields),
        Some((head, rest)) => {
            let slot = target
                .entry(head.clone())
                .or_insert_with(|| serde_json::Value::Object(JsonMap::new()));
            match slot {
                serde_json::Value::Object(inner) => merge_at(inner, rest, fields),
                other => {
                    let mut inner = JsonMap::new();
                    merge_at(&mut inner, rest, fields);
                    *other = serde_json::Value::Object(inner);
                }
            }
        }
    }
}

impl<W: Write + Send + 'static> Handler for JsonHandler<W> {
    fn enabled(&self, level: Level) -> bool {
        JsonHandler::enabled(self, level)
    }

    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler> {
        Arc::new(JsonHandler::with_attrs(self, attrs))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        Arc::new(JsonHandler::with_group(self, name))
    }

    fn handle(&self, record: &Record) -> Result<()> {
        let object = serde_json::Value::Object(self.encode(record));
        let mut line = serde_json::to_vec(&object)?;
        line.push(b'\n');

        let mut writer = self.writer.lock();
        writer.write_all(&line)?;
        Ok(())
    }
}
