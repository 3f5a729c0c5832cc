//! Value-tree serializer.
//!
//! Output is pure ASCII: control bytes and `"`/`\` use their short escapes,
//! everything else non-ASCII becomes a `\uXXXX` escape (surrogate pairs for
//! supplementary codepoints). Sparse arrays encode either as arrays with
//! `null` fillers or as objects keyed by stringified index, depending on the
//! configured density thresholds. The nesting depth limit is checked on
//! entry to every container, so a tree whose deepest container sits exactly
//! at the limit still encodes.

use crate::config::Config;
use crate::error::{EncodeError, EncodeResult};
use crate::types::{Array, Object, Value};
use crate::unicode;

struct Encoder<'c> {
    out: String,
    config: &'c Config,
    depth: usize,
}

/// Serialize a value tree with an explicit configuration.
pub fn encode_document(value: &Value, config: &Config) -> EncodeResult<String> {
    let mut encoder = Encoder {
        out: String::new(),
        config,
        depth: 0,
    };
    encoder.value(value)?;
    Ok(encoder.out)
}

/// Sparse-policy decision: the object form is chosen when the occupancy
/// ratio (max index over occupied count) exceeds the configured ratio and
/// the max index clears the safety floor.
fn object_form(array: &Array, config: &Config) -> bool {
    if !config.sparse_convert || !array.is_sparse() {
        return false;
    }
    let max = array.max_index();
    max as f64 > config.sparse_ratio * array.occupied() as f64 && max > config.sparse_safe
}

impl Encoder<'_> {
    fn value(&mut self, value: &Value) -> EncodeResult<()> {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(true) => self.out.push_str("true"),
            Value::Bool(false) => self.out.push_str("false"),
            Value::Number(n) => self.number(*n),
            Value::String(s) => self.string(s),
            Value::Array(a) => return self.array(a),
            Value::Object(o) => return self.object(o),
        }
        Ok(())
    }

    fn enter(&mut self) -> EncodeResult<()> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Err(EncodeError::ExcessiveNesting(self.depth));
        }
        Ok(())
    }

    fn array(&mut self, array: &Array) -> EncodeResult<()> {
        self.enter()?;
        if object_form(array, self.config) {
            self.out.push_str("{ ");
            let mut first = true;
            for (index, value) in array.iter() {
                if !first {
                    self.out.push_str(", ");
                }
                first = false;
                self.out.push('"');
                self.out.push_str(&index.to_string());
                self.out.push_str("\": ");
                self.value(value)?;
            }
            self.out.push_str(" }");
        } else {
            self.out.push_str("[ ");
            let mut first = true;
            for index in 1..=array.max_index() {
                if !first {
                    self.out.push_str(", ");
                }
                first = false;
                match array.get(index) {
                    Some(value) => self.value(value)?,
                    None => self.out.push_str("null"),
                }
            }
            self.out.push_str(" ]");
        }
        self.depth -= 1;
        Ok(())
    }

    fn object(&mut self, object: &Object) -> EncodeResult<()> {
        self.enter()?;
        self.out.push_str("{ ");
        let mut first = true;
        for (key, value) in object {
            if !first {
                self.out.push_str(", ");
            }
            first = false;
            self.string(key);
            self.out.push_str(": ");
            self.value(value)?;
        }
        self.out.push_str(" }");
        self.depth -= 1;
        Ok(())
    }

    fn string(&mut self, bytes: &[u8]) {
        self.out.push('"');
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            match b {
                b'"' => {
                    self.out.push_str("\\\"");
                    i += 1;
                }
                b'\\' => {
                    self.out.push_str("\\\\");
                    i += 1;
                }
                0x08 => {
                    self.out.push_str("\\b");
                    i += 1;
                }
                0x0C => {
                    self.out.push_str("\\f");
                    i += 1;
                }
                b'\n' => {
                    self.out.push_str("\\n");
                    i += 1;
                }
                b'\r' => {
                    self.out.push_str("\\r");
                    i += 1;
                }
                b'\t' => {
                    self.out.push_str("\\t");
                    i += 1;
                }
                0x00..=0x1F | 0x7F => {
                    unicode::push_escape(&mut self.out, u32::from(b));
                    i += 1;
                }
                0x20..=0x7E => {
                    self.out.push(b as char);
                    i += 1;
                }
                _ => match unicode::read_escapable(bytes, i) {
                    Some((cp, len)) => {
                        unicode::push_escape(&mut self.out, cp);
                        i += len;
                    }
                    None => {
                        unicode::push_escape(&mut self.out, u32::from(b));
                        i += 1;
                    }
                },
            }
        }
        self.out.push('"');
    }

    fn number(&mut self, n: f64) {
        if n.is_nan() {
            self.out.push_str("nan");
        } else if n.is_infinite() {
            self.out.push_str(if n < 0.0 { "-inf" } else { "inf" });
        } else if n == n.trunc() && n.abs() < 9_007_199_254_740_992.0 {
            // Integral values inside the exact-integer range print without a
            // fractional part.
            self.out.push_str(&format!("{}", n as i64));
        } else {
            self.out.push_str(&format!("{n}"));
        }
    }
}
