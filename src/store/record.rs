//! Feature record type and its lenient ingest decoder.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DecodeError, Decoded, FieldMismatch};

/// One measurement posted by an analysis client.
///
/// `bpm` is kept as an opaque string; clients may send an empty value or a
/// placeholder when tempo is unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureRecord {
    /// Fundamental frequency (pitch) in Hz
    pub f0: f64,
    /// Root-mean-square loudness
    pub rms: f64,
    /// Spectral centroid in Hz
    pub centroid: f64,
    pub started_at: String,
    pub ended_at: String,
    /// Client wall clock at send time (epoch)
    pub local_time: i64,
    pub bpm: String,
}

impl FeatureRecord {
    /// Decode a request body, recovering as much as possible.
    ///
    /// Missing or `null` fields keep their zero value silently. Fields with
    /// the wrong JSON type keep their zero value and are reported; the rest
    /// of the object still decodes. A body that is not a JSON object yields
    /// an all-default record. Unknown fields are ignored, keys match
    /// case-insensitively when no exact key exists, and anything after the
    /// first JSON value is ignored.
    pub fn decode_lenient(body: &[u8]) -> Decoded<FeatureRecord> {
        let value: Value = match serde_json::Deserializer::from_slice(body)
            .into_iter::<Value>()
            .next()
        {
            Some(Ok(value)) => value,
            Some(Err(err)) => {
                return Decoded::with_error(Self::default(), DecodeError::Malformed(err.to_string()))
            }
            None => {
                return Decoded::with_error(
                    Self::default(),
                    DecodeError::Malformed("empty body".to_string()),
                )
            }
        };

        let fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Decoded::with_error(
                    Self::default(),
                    DecodeError::NotAnObject(json_kind(&other)),
                )
            }
        };

        let mut reader = FieldReader::new(&fields);
        let record = FeatureRecord {
            f0: reader.number("f0"),
            rms: reader.number("rms"),
            centroid: reader.number("centroid"),
            started_at: reader.text("startedAt"),
            ended_at: reader.text("endedAt"),
            local_time: reader.integer("localTime"),
            bpm: reader.text("bpm"),
        };

        match reader.finish() {
            Some(err) => Decoded::with_error(record, err),
            None => Decoded::clean(record),
        }
    }
}

struct FieldReader<'a> {
    fields: &'a Map<String, Value>,
    mismatches: Vec<FieldMismatch>,
}

impl<'a> FieldReader<'a> {
    fn new(fields: &'a Map<String, Value>) -> Self {
        Self {
            fields,
            mismatches: Vec::new(),
        }
    }

    fn number(&mut self, field: &'static str) -> f64 {
        self.read(field, "number", Value::as_f64)
    }

    fn integer(&mut self, field: &'static str) -> i64 {
        self.read(field, "integer", Value::as_i64)
    }

    fn text(&mut self, field: &'static str) -> String {
        self.read(field, "string", |value| value.as_str().map(str::to_owned))
    }

    fn read<T: Default>(
        &mut self,
        field: &'static str,
        expected: &'static str,
        convert: impl Fn(&Value) -> Option<T>,
    ) -> T {
        match self.lookup(field) {
            None | Some(Value::Null) => T::default(),
            Some(value) => convert(value).unwrap_or_else(|| {
                self.mismatches.push(FieldMismatch {
                    field,
                    expected,
                    found: json_kind(value),
                });
                T::default()
            }),
        }
    }

    // Exact key first, then the first key equal ignoring case.
    fn lookup(&self, field: &str) -> Option<&'a Value> {
        let fields = self.fields;
        fields.get(field).or_else(|| {
            let folded = field.to_lowercase();
            fields
                .iter()
                .find(|(key, _)| key.to_lowercase() == folded)
                .map(|(_, value)| value)
        })
    }

    fn finish(self) -> Option<DecodeError> {
        if self.mismatches.is_empty() {
            None
        } else {
            Some(DecodeError::FieldTypes(self.mismatches))
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
