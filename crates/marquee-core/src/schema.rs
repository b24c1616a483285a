//! Validación estructural de payloads JSON.
//!
//! The HTTP layer hands request bodies over as raw `serde_json::Value`s and
//! each payload type pulls its own fields out through [`Fields`]. Every
//! offending field is collected (not just the first one) so clients get the
//! complete list of locations in a single 422 response.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Inclusive character bounds for a string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Length {
  pub min: usize,
  pub max: usize,
}

/// Bounds applied to every `name` field (casts and movies).
pub const NAME_LENGTH: Length = Length { min: 1, max: 50 };

/// One segment of an error location, e.g. `["body", "casts_id", 2]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LocSegment {
  Key(String),
  Index(usize),
}

impl From<&str> for LocSegment {
  fn from(key: &str) -> Self {
    LocSegment::Key(key.to_owned())
  }
}

impl From<usize> for LocSegment {
  fn from(index: usize) -> Self {
    LocSegment::Index(index)
  }
}

/// What went wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
  Missing,
  StringType,
  StringTooShort(usize),
  StringTooLong(usize),
  IntType,
  IntParsing,
  ListType,
  ObjectType,
  InvalidJson(String),
}

impl Violation {
  pub fn code(&self) -> &'static str {
    match self {
      Violation::Missing => "missing",
      Violation::StringType => "string_type",
      Violation::StringTooShort(_) => "string_too_short",
      Violation::StringTooLong(_) => "string_too_long",
      Violation::IntType => "int_type",
      Violation::IntParsing => "int_parsing",
      Violation::ListType => "list_type",
      Violation::ObjectType => "model_attributes_type",
      Violation::InvalidJson(_) => "json_invalid",
    }
  }

  pub fn message(&self) -> String {
    match self {
      Violation::Missing => "Field required".to_owned(),
      Violation::StringType => "Input should be a valid string".to_owned(),
      Violation::StringTooShort(min) => format!("String should have at least {min} {}", plural(*min)),
      Violation::StringTooLong(max) => format!("String should have at most {max} {}", plural(*max)),
      Violation::IntType => "Input should be a valid integer".to_owned(),
      Violation::IntParsing => "Input should be a valid integer, unable to parse string as an integer".to_owned(),
      Violation::ListType => "Input should be a valid list".to_owned(),
      Violation::ObjectType => "Input should be a valid dictionary or object to extract fields from".to_owned(),
      Violation::InvalidJson(reason) => format!("JSON decode error: {reason}"),
    }
  }
}

fn plural(n: usize) -> &'static str {
  if n == 1 { "character" } else { "characters" }
}

/// A single located schema violation, serialized as `{"loc", "msg", "type"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub loc: Vec<LocSegment>,
  pub msg: String,
  #[serde(rename = "type")]
  pub kind: &'static str,
}

impl FieldError {
  pub fn new(loc: Vec<LocSegment>, violation: Violation) -> Self {
    FieldError { loc, msg: violation.message(), kind: violation.code() }
  }

  /// A violation on a top-level body field.
  pub fn body(field: &str, violation: Violation) -> Self {
    Self::new(vec!["body".into(), field.into()], violation)
  }

  /// A violation on a path parameter.
  pub fn path(param: &str, violation: Violation) -> Self {
    Self::new(vec!["path".into(), param.into()], violation)
  }

  /// Returns true when any segment of the location names `field`.
  pub fn mentions(&self, field: &str) -> bool {
    self.loc.iter().any(|seg| matches!(seg, LocSegment::Key(k) if k == field))
  }
}

/// All schema violations found in one payload. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaErrors(Vec<FieldError>);

impl SchemaErrors {
  pub fn single(error: FieldError) -> Self {
    SchemaErrors(vec![error])
  }

  /// The body could not be parsed as JSON at all.
  pub fn invalid_json(reason: impl Into<String>) -> Self {
    Self::single(FieldError::new(vec!["body".into()], Violation::InvalidJson(reason.into())))
  }

  /// A path id that is not an integer.
  pub fn invalid_path_id() -> Self {
    Self::single(FieldError::path("id", Violation::IntParsing))
  }

  pub fn errors(&self) -> &[FieldError] {
    &self.0
  }

  pub fn into_errors(self) -> Vec<FieldError> {
    self.0
  }
}

impl fmt::Display for SchemaErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} validation error(s)", self.0.len())?;
    for err in &self.0 {
      write!(f, "; {}: {}", render_loc(&err.loc), err.msg)?;
    }
    Ok(())
  }
}

impl std::error::Error for SchemaErrors {}

fn render_loc(loc: &[LocSegment]) -> String {
  loc
    .iter()
    .map(|seg| match seg {
      LocSegment::Key(k) => k.clone(),
      LocSegment::Index(i) => i.to_string(),
    })
    .collect::<Vec<_>>()
    .join(".")
}

/// Tipos que se construyen a partir de un payload JSON sin tipar.
pub trait FromPayload: Sized {
  fn from_payload(payload: &Value) -> Result<Self, SchemaErrors>;
}

/// Field reader over a JSON object that accumulates violations.
///
/// Readers return `None` when the field is absent or invalid; callers must
/// check [`Fields::into_result`] before trusting any of the values.
pub struct Fields<'a> {
  object: &'a Map<String, Value>,
  errors: Vec<FieldError>,
}

impl<'a> Fields<'a> {
  pub fn of(payload: &'a Value) -> Result<Self, SchemaErrors> {
    match payload {
      Value::Object(object) => Ok(Fields { object, errors: Vec::new() }),
      _ => Err(SchemaErrors::single(FieldError::new(vec!["body".into()], Violation::ObjectType))),
    }
  }

  /// Absent and `null` both mean "not supplied".
  fn supplied(&self, field: &str) -> Option<&'a Value> {
    self.object.get(field).filter(|v| !v.is_null())
  }

  pub fn required_str(&mut self, field: &str, length: Option<Length>) -> Option<String> {
    match self.supplied(field) {
      Some(value) => self.read_str(field, value, length),
      None => {
        self.errors.push(FieldError::body(field, Violation::Missing));
        None
      }
    }
  }

  pub fn optional_str(&mut self, field: &str, length: Option<Length>) -> Option<String> {
    let value = self.supplied(field)?;
    self.read_str(field, value, length)
  }

  pub fn required_str_list(&mut self, field: &str) -> Option<Vec<String>> {
    match self.supplied(field) {
      Some(value) => self.read_str_list(field, value),
      None => {
        self.errors.push(FieldError::body(field, Violation::Missing));
        None
      }
    }
  }

  pub fn optional_str_list(&mut self, field: &str) -> Option<Vec<String>> {
    let value = self.supplied(field)?;
    self.read_str_list(field, value)
  }

  pub fn required_int_list<T: From<i64>>(&mut self, field: &str) -> Option<Vec<T>> {
    match self.supplied(field) {
      Some(value) => self.read_int_list(field, value),
      None => {
        self.errors.push(FieldError::body(field, Violation::Missing));
        None
      }
    }
  }

  pub fn optional_int_list<T: From<i64>>(&mut self, field: &str) -> Option<Vec<T>> {
    let value = self.supplied(field)?;
    self.read_int_list(field, value)
  }

  pub fn is_clean(&self) -> bool {
    self.errors.is_empty()
  }

  pub fn into_result(self) -> Result<(), SchemaErrors> {
    if self.errors.is_empty() { Ok(()) } else { Err(SchemaErrors(self.errors)) }
  }

  pub fn into_errors(self) -> SchemaErrors {
    SchemaErrors(self.errors)
  }

  fn read_str(&mut self, field: &str, value: &Value, length: Option<Length>) -> Option<String> {
    let Some(s) = value.as_str() else {
      self.errors.push(FieldError::body(field, Violation::StringType));
      return None;
    };

    if let Some(Length { min, max }) = length {
      let chars = s.chars().count();
      if chars < min {
        self.errors.push(FieldError::body(field, Violation::StringTooShort(min)));
        return None;
      }
      if chars > max {
        self.errors.push(FieldError::body(field, Violation::StringTooLong(max)));
        return None;
      }
    }

    Some(s.to_owned())
  }

  fn read_str_list(&mut self, field: &str, value: &Value) -> Option<Vec<String>> {
    let Some(items) = value.as_array() else {
      self.errors.push(FieldError::body(field, Violation::ListType));
      return None;
    };

    let before = self.errors.len();
    let mut out = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
      match item.as_str() {
        Some(s) => out.push(s.to_owned()),
        None => self.errors.push(FieldError::new(vec!["body".into(), field.into(), idx.into()], Violation::StringType)),
      }
    }

    (self.errors.len() == before).then_some(out)
  }

  fn read_int_list<T: From<i64>>(&mut self, field: &str, value: &Value) -> Option<Vec<T>> {
    let Some(items) = value.as_array() else {
      self.errors.push(FieldError::body(field, Violation::ListType));
      return None;
    };

    let before = self.errors.len();
    let mut out = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
      match as_i64(item) {
        Ok(n) => out.push(T::from(n)),
        Err(violation) => self.errors.push(FieldError::new(vec!["body".into(), field.into(), idx.into()], violation)),
      }
    }

    (self.errors.len() == before).then_some(out)
  }
}

/// Integers arrive as JSON numbers or as numeric strings.
fn as_i64(value: &Value) -> Result<i64, Violation> {
  match value {
    Value::Number(n) => n.as_i64().ok_or(Violation::IntType),
    Value::String(s) => s.trim().parse::<i64>().map_err(|_| Violation::IntParsing),
    _ => Err(Violation::IntType),
  }
}
