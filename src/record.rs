use crate::{JsonValue, statics, value::JsonNumber};
use indexmap::IndexMap;
use thiserror::Error;

/// The ten columns of a record, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    IsDisabledForSpawning,
    AllowedLocations,
    CooldownPerSquadMemberMin,
    CooldownPerSquadMemberMax,
    CooldownGroup,
    Variations,
    ShouldOverrideInitialAndRandomUsage,
    InitialUsageOverride,
    RandomUsageOverrideUsage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Id,
    Bool,
    Int,
    Text,
    List,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Id,
        Field::IsDisabledForSpawning,
        Field::AllowedLocations,
        Field::CooldownPerSquadMemberMin,
        Field::CooldownPerSquadMemberMax,
        Field::CooldownGroup,
        Field::Variations,
        Field::ShouldOverrideInitialAndRandomUsage,
        Field::InitialUsageOverride,
        Field::RandomUsageOverrideUsage,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Field::Id => statics::P_FIELD_ID,
            Field::IsDisabledForSpawning => statics::P_FIELD_IS_DISABLED_FOR_SPAWNING,
            Field::AllowedLocations => statics::P_FIELD_ALLOWED_LOCATIONS,
            Field::CooldownPerSquadMemberMin => statics::P_FIELD_COOLDOWN_MIN,
            Field::CooldownPerSquadMemberMax => statics::P_FIELD_COOLDOWN_MAX,
            Field::CooldownGroup => statics::P_FIELD_COOLDOWN_GROUP,
            Field::Variations => statics::P_FIELD_VARIATIONS,
            Field::ShouldOverrideInitialAndRandomUsage => statics::P_FIELD_SHOULD_OVERRIDE_USAGE,
            Field::InitialUsageOverride => statics::P_FIELD_INITIAL_USAGE_OVERRIDE,
            Field::RandomUsageOverrideUsage => statics::P_FIELD_RANDOM_USAGE_OVERRIDE,
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Id => FieldKind::Id,
            Field::IsDisabledForSpawning | Field::ShouldOverrideInitialAndRandomUsage => {
                FieldKind::Bool
            }
            Field::AllowedLocations | Field::Variations => FieldKind::List,
            Field::CooldownGroup => FieldKind::Text,
            Field::CooldownPerSquadMemberMin
            | Field::CooldownPerSquadMemberMax
            | Field::InitialUsageOverride
            | Field::RandomUsageOverrideUsage => FieldKind::Int,
        }
    }

    /// Initial table column width in points.
    pub fn initial_width(self) -> f32 {
        match self {
            Field::Id => 250.0,
            Field::IsDisabledForSpawning => 60.0,
            Field::AllowedLocations => 210.0,
            Field::CooldownPerSquadMemberMin | Field::CooldownPerSquadMemberMax => 180.0,
            Field::CooldownGroup => 200.0,
            Field::Variations => 258.0,
            Field::ShouldOverrideInitialAndRandomUsage => 220.0,
            Field::InitialUsageOverride => 120.0,
            Field::RandomUsageOverrideUsage => 180.0,
        }
    }
}

/// A typed value for one field, produced from a display string.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Text(String),
    List(Vec<String>),
}

/// One entry of the `Parameters` array.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub id: String,
    pub is_disabled_for_spawning: bool,
    pub allowed_locations: Vec<String>,
    pub cooldown_per_squad_member_min: i64,
    pub cooldown_per_squad_member_max: i64,
    pub cooldown_group: String,
    pub variations: Vec<String>,
    pub should_override_initial_and_random_usage: bool,
    pub initial_usage_override: i64,
    pub random_usage_override_usage: i64,
    /// Keys this editor does not know about, written back after the known ones.
    pub extra: IndexMap<String, JsonValue>,
}

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("document root is not an object")]
    RootNotObject,
    #[error("\"{}\" is not an array", statics::P_PARAMETERS)]
    ParametersNotArray,
    #[error("parameter #{index} is not an object")]
    RecordNotObject { index: usize },
    #[error("parameter #{index} is missing required field \"{field}\"")]
    MissingField { index: usize, field: &'static str },
    #[error("parameter #{index} field \"{field}\" must be {expected}, found {found}")]
    WrongType {
        index: usize,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    #[error("{field} must be a whole number, got {input:?}")]
    InvalidInteger { field: &'static str, input: String },
}

/// Decode the `Parameters` array of a document.
///
/// A document without `Parameters` has no records; that is not an error.
pub fn decode(root: &JsonValue) -> Result<Vec<Record>, SchemaError> {
    let obj = root.as_object().ok_or(SchemaError::RootNotObject)?;
    let Some(params) = obj.get(statics::P_PARAMETERS) else {
        return Ok(Vec::new());
    };
    let entries = params.as_array().ok_or(SchemaError::ParametersNotArray)?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| Record::from_json(index, entry))
        .collect()
}

/// Replace the `Parameters` array of `root` with `records`. Sibling keys keep
/// their values and their position.
pub fn encode(root: &mut JsonValue, records: &[Record]) {
    let params = encode_records(records);
    match root.as_object_mut() {
        Some(map) => {
            map.insert(statics::P_PARAMETERS.to_string(), params);
        }
        None => {
            let mut map = IndexMap::new();
            map.insert(statics::P_PARAMETERS.to_string(), params);
            *root = JsonValue::Object(map);
        }
    }
}

pub fn encode_records(records: &[Record]) -> JsonValue {
    JsonValue::Array(records.iter().map(Record::to_json).collect())
}

/// Coerce a display string into the typed value for `field`.
///
/// `Ok(None)` means the field cannot be edited (`Id`); callers drop the edit.
pub fn encode_field(field: Field, display: &str) -> Result<Option<FieldValue>, FormatError> {
    let value = match field.kind() {
        FieldKind::Id => return Ok(None),
        FieldKind::Bool => FieldValue::Bool(display.to_lowercase() == statics::LIT_TRUE),
        FieldKind::Int => FieldValue::Int(parse_int(field, display)?),
        FieldKind::Text => FieldValue::Text(display.to_string()),
        FieldKind::List => FieldValue::List(parse_list(display)),
    };
    Ok(Some(value))
}

fn parse_int(field: Field, display: &str) -> Result<i64, FormatError> {
    let trimmed = display.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| FormatError::InvalidInteger {
            field: field.key(),
            input: display.to_string(),
        })
}

/// Parse the bracketed list display form, e.g. `[alpha, 'beta', "gamma"]`.
///
/// Anything not wrapped in `[` `]` yields an empty list. Items containing a
/// comma or quote characters do not survive this form.
pub fn parse_list(display: &str) -> Vec<String> {
    let Some(inner) = display
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    else {
        return Vec::new();
    };

    inner
        .split(',')
        .map(|piece| strip_one_quote_layer(piece.trim()))
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_one_quote_layer(s: &str) -> &str {
    let is_quote = |c: char| c == '\'' || c == '"';
    let s = s.strip_prefix(is_quote).unwrap_or(s);
    s.strip_suffix(is_quote).unwrap_or(s)
}

/// Render a list the way the table shows it: `['a', 'b']`.
pub fn format_list(items: &[String]) -> String {
    let mut out = String::from("[");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let quote = if item.contains('\'') && !item.contains('"') {
            '"'
        } else {
            '\''
        };
        out.push(quote);
        out.push_str(item);
        out.push(quote);
    }
    out.push(']');
    out
}

/// Double-click toggle for boolean cells.
pub fn toggle_bool_display(current: &str) -> &'static str {
    if current == statics::LIT_TRUE {
        statics::LIT_FALSE
    } else {
        statics::LIT_TRUE
    }
}

fn bool_display(v: bool) -> &'static str {
    if v { statics::LIT_TRUE } else { statics::LIT_FALSE }
}

/// Typed access to one `Parameters` entry, with errors that name the entry.
struct EntryReader<'a> {
    index: usize,
    obj: &'a IndexMap<String, JsonValue>,
}

impl<'a> EntryReader<'a> {
    fn required(&self, field: Field) -> Result<&'a JsonValue, SchemaError> {
        self.obj.get(field.key()).ok_or(SchemaError::MissingField {
            index: self.index,
            field: field.key(),
        })
    }

    fn wrong_type(&self, field: Field, expected: &'static str, found: &JsonValue) -> SchemaError {
        SchemaError::WrongType {
            index: self.index,
            field: field.key(),
            expected,
            found: found.type_name(),
        }
    }

    fn string(&self, field: Field) -> Result<String, SchemaError> {
        let v = self.required(field)?;
        v.as_str()
            .map(str::to_string)
            .ok_or_else(|| self.wrong_type(field, "a string", v))
    }

    fn boolean(&self, field: Field) -> Result<bool, SchemaError> {
        let v = self.required(field)?;
        v.as_bool()
            .ok_or_else(|| self.wrong_type(field, "a boolean", v))
    }

    fn list(&self, field: Field) -> Result<Vec<String>, SchemaError> {
        let v = self.required(field)?;
        let items = v
            .as_array()
            .ok_or_else(|| self.wrong_type(field, "a list of strings", v))?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.wrong_type(field, "a list of strings", item))
            })
            .collect()
    }

    /// Integer fields are optional: absent, null or a blank string reads as 0.
    fn integer(&self, field: Field) -> Result<i64, SchemaError> {
        match self.obj.get(field.key()) {
            None | Some(JsonValue::Null) => Ok(0),
            Some(JsonValue::String(s)) if s.trim().is_empty() => Ok(0),
            Some(v) => v
                .as_i64()
                .ok_or_else(|| self.wrong_type(field, "an integer", v)),
        }
    }
}

impl Record {
    fn from_json(index: usize, entry: &JsonValue) -> Result<Self, SchemaError> {
        let obj = entry
            .as_object()
            .ok_or(SchemaError::RecordNotObject { index })?;
        let fields = EntryReader { index, obj };

        let extra = obj
            .iter()
            .filter(|(k, _)| Field::from_key(k).is_none())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Self {
            id: fields.string(Field::Id)?,
            is_disabled_for_spawning: fields.boolean(Field::IsDisabledForSpawning)?,
            allowed_locations: fields.list(Field::AllowedLocations)?,
            cooldown_per_squad_member_min: fields.integer(Field::CooldownPerSquadMemberMin)?,
            cooldown_per_squad_member_max: fields.integer(Field::CooldownPerSquadMemberMax)?,
            cooldown_group: fields.string(Field::CooldownGroup)?,
            variations: fields.list(Field::Variations)?,
            should_override_initial_and_random_usage: fields
                .boolean(Field::ShouldOverrideInitialAndRandomUsage)?,
            initial_usage_override: fields.integer(Field::InitialUsageOverride)?,
            random_usage_override_usage: fields.integer(Field::RandomUsageOverrideUsage)?,
            extra,
        })
    }

    pub fn to_json(&self) -> JsonValue {
        let mut map = IndexMap::with_capacity(Field::ALL.len() + self.extra.len());
        for field in Field::ALL {
            map.insert(field.key().to_string(), self.json_value(field));
        }
        for (k, v) in &self.extra {
            map.insert(k.clone(), v.clone());
        }
        JsonValue::Object(map)
    }

    fn json_value(&self, field: Field) -> JsonValue {
        let list = |items: &[String]| {
            JsonValue::Array(items.iter().cloned().map(JsonValue::String).collect())
        };
        let int = |v: i64| JsonValue::Number(JsonNumber::I64(v));
        match field {
            Field::Id => JsonValue::String(self.id.clone()),
            Field::IsDisabledForSpawning => JsonValue::Bool(self.is_disabled_for_spawning),
            Field::AllowedLocations => list(&self.allowed_locations),
            Field::CooldownPerSquadMemberMin => int(self.cooldown_per_squad_member_min),
            Field::CooldownPerSquadMemberMax => int(self.cooldown_per_squad_member_max),
            Field::CooldownGroup => JsonValue::String(self.cooldown_group.clone()),
            Field::Variations => list(&self.variations),
            Field::ShouldOverrideInitialAndRandomUsage => {
                JsonValue::Bool(self.should_override_initial_and_random_usage)
            }
            Field::InitialUsageOverride => int(self.initial_usage_override),
            Field::RandomUsageOverrideUsage => int(self.random_usage_override_usage),
        }
    }

    /// The text shown in the table cell for `field`.
    pub fn display(&self, field: Field) -> String {
        match field {
            Field::Id => self.id.clone(),
            Field::IsDisabledForSpawning => bool_display(self.is_disabled_for_spawning).to_string(),
            Field::AllowedLocations => format_list(&self.allowed_locations),
            Field::CooldownPerSquadMemberMin => self.cooldown_per_squad_member_min.to_string(),
            Field::CooldownPerSquadMemberMax => self.cooldown_per_squad_member_max.to_string(),
            Field::CooldownGroup => self.cooldown_group.clone(),
            Field::Variations => format_list(&self.variations),
            Field::ShouldOverrideInitialAndRandomUsage => {
                bool_display(self.should_override_initial_and_random_usage).to_string()
            }
            Field::InitialUsageOverride => self.initial_usage_override.to_string(),
            Field::RandomUsageOverrideUsage => self.random_usage_override_usage.to_string(),
        }
    }

    /// Store a typed value. Returns whether the record changed. Only reached
    /// through `apply_display`, so the value kind always matches `field`.
    fn set(&mut self, field: Field, value: FieldValue) -> bool {
        fn assign<T: PartialEq>(slot: &mut T, v: T) -> bool {
            if *slot == v {
                return false;
            }
            *slot = v;
            true
        }

        match (field, value) {
            (Field::IsDisabledForSpawning, FieldValue::Bool(v)) => {
                assign(&mut self.is_disabled_for_spawning, v)
            }
            (Field::ShouldOverrideInitialAndRandomUsage, FieldValue::Bool(v)) => {
                assign(&mut self.should_override_initial_and_random_usage, v)
            }
            (Field::AllowedLocations, FieldValue::List(v)) => {
                assign(&mut self.allowed_locations, v)
            }
            (Field::Variations, FieldValue::List(v)) => assign(&mut self.variations, v),
            (Field::CooldownPerSquadMemberMin, FieldValue::Int(v)) => {
                assign(&mut self.cooldown_per_squad_member_min, v)
            }
            (Field::CooldownPerSquadMemberMax, FieldValue::Int(v)) => {
                assign(&mut self.cooldown_per_squad_member_max, v)
            }
            (Field::InitialUsageOverride, FieldValue::Int(v)) => {
                assign(&mut self.initial_usage_override, v)
            }
            (Field::RandomUsageOverrideUsage, FieldValue::Int(v)) => {
                assign(&mut self.random_usage_override_usage, v)
            }
            (Field::CooldownGroup, FieldValue::Text(v)) => assign(&mut self.cooldown_group, v),
            (field, value) => {
                log::warn!("ignoring {value:?} for {}", field.key());
                false
            }
        }
    }

    /// Commit a display string into the record. `Id` edits are dropped silently;
    /// an invalid integer leaves the record untouched.
    pub fn apply_display(&mut self, field: Field, display: &str) -> Result<bool, FormatError> {
        match encode_field(field, display)? {
            Some(value) => Ok(self.set(field, value)),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_json() -> JsonValue {
        JsonValue::parse(
            r#"{
                "Id": "Wolf_01",
                "IsDisabledForSpawning": false,
                "AllowedLocations": ["Forest", "Mountain"],
                "CooldownPerSquadMemberMin": 10,
                "CooldownPerSquadMemberMax": 20,
                "CooldownGroup": "Animals",
                "Variations": [],
                "ShouldOverrideInitialAndRandomUsage": true,
                "InitialUsageOverride": 1,
                "RandomUsageOverrideUsage": 2
            }"#,
        )
        .unwrap()
    }

    fn doc(entries: &str) -> JsonValue {
        JsonValue::parse(&format!(r#"{{ "Parameters": [{entries}] }}"#)).unwrap()
    }

    #[test]
    fn parse_list_strips_brackets_whitespace_and_quotes() {
        assert_eq!(
            parse_list(r#"[alpha, 'beta', "gamma"]"#),
            vec!["alpha", "beta", "gamma"]
        );
        assert_eq!(parse_list(""), Vec::<String>::new());
        assert_eq!(parse_list("[]"), Vec::<String>::new());
        assert_eq!(parse_list("alpha, beta"), Vec::<String>::new());
        assert_eq!(parse_list("[ , '',  x ]"), vec!["x"]);
    }

    #[test]
    fn parse_list_strips_a_single_quote_layer() {
        assert_eq!(parse_list(r#"['"nested"']"#), vec![r#""nested""#]);
    }

    #[test]
    fn format_list_round_trips_through_parse_list() {
        let items = vec!["Forest".to_string(), " padded ".to_string(), "it's".to_string()];
        let shown = format_list(&items);
        assert_eq!(shown, r#"['Forest', ' padded ', "it's"]"#);
        assert_eq!(parse_list(&shown), items);
        assert_eq!(format_list(&[]), "[]");
    }

    #[test]
    fn bool_toggle_flips_between_literals() {
        assert_eq!(toggle_bool_display("true"), "false");
        assert_eq!(toggle_bool_display(toggle_bool_display("true")), "true");
    }

    #[test]
    fn encode_field_coerces_per_kind() {
        assert_eq!(
            encode_field(Field::IsDisabledForSpawning, "TRUE"),
            Ok(Some(FieldValue::Bool(true)))
        );
        assert_eq!(
            encode_field(Field::IsDisabledForSpawning, "yes"),
            Ok(Some(FieldValue::Bool(false)))
        );
        assert_eq!(
            encode_field(Field::InitialUsageOverride, ""),
            Ok(Some(FieldValue::Int(0)))
        );
        assert_eq!(
            encode_field(Field::InitialUsageOverride, "42"),
            Ok(Some(FieldValue::Int(42)))
        );
        assert_eq!(
            encode_field(Field::CooldownGroup, " free text "),
            Ok(Some(FieldValue::Text(" free text ".to_string())))
        );
        assert_eq!(encode_field(Field::Id, "Renamed"), Ok(None));
    }

    #[test]
    fn encode_field_rejects_non_numeric_integers() {
        assert_eq!(
            encode_field(Field::CooldownPerSquadMemberMin, "abc"),
            Err(FormatError::InvalidInteger {
                field: statics::P_FIELD_COOLDOWN_MIN,
                input: "abc".to_string(),
            })
        );
    }

    #[test]
    fn decode_reads_all_fields() {
        let records = decode(&doc(&sample_json().to_pretty_json())).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id, "Wolf_01");
        assert!(!r.is_disabled_for_spawning);
        assert_eq!(r.allowed_locations, vec!["Forest", "Mountain"]);
        assert_eq!(r.cooldown_per_squad_member_min, 10);
        assert_eq!(r.cooldown_per_squad_member_max, 20);
        assert_eq!(r.cooldown_group, "Animals");
        assert!(r.variations.is_empty());
        assert!(r.should_override_initial_and_random_usage);
        assert_eq!(r.initial_usage_override, 1);
        assert_eq!(r.random_usage_override_usage, 2);
        assert!(r.extra.is_empty());
    }

    #[test]
    fn decode_without_parameters_is_empty() {
        let root = JsonValue::parse(r#"{ "Other": 1 }"#).unwrap();
        assert_eq!(decode(&root), Ok(Vec::new()));
    }

    #[test]
    fn decode_defaults_missing_integer_fields() {
        let root = doc(
            r#"{ "Id": "A", "IsDisabledForSpawning": true, "AllowedLocations": [],
                 "CooldownGroup": "", "Variations": ["v"],
                 "ShouldOverrideInitialAndRandomUsage": false,
                 "InitialUsageOverride": null, "RandomUsageOverrideUsage": "" }"#,
        );
        let records = decode(&root).unwrap();
        assert_eq!(records[0].cooldown_per_squad_member_min, 0);
        assert_eq!(records[0].initial_usage_override, 0);
        assert_eq!(records[0].random_usage_override_usage, 0);

        let json = records[0].to_json();
        assert_eq!(json.get("RandomUsageOverrideUsage").and_then(JsonValue::as_i64), Some(0));
    }

    #[test]
    fn decode_rejects_non_blank_strings_in_integer_fields() {
        let root = doc(
            r#"{ "Id": "A", "IsDisabledForSpawning": true, "AllowedLocations": [],
                 "CooldownGroup": "", "Variations": [],
                 "ShouldOverrideInitialAndRandomUsage": false,
                 "InitialUsageOverride": "  ", "RandomUsageOverrideUsage": "7" }"#,
        );
        assert_eq!(
            decode(&root),
            Err(SchemaError::WrongType {
                index: 0,
                field: "RandomUsageOverrideUsage",
                expected: "an integer",
                found: "string",
            })
        );
    }

    #[test]
    fn decode_reports_missing_required_field() {
        let root = doc(r#"{ "Id": "A" }"#);
        assert_eq!(
            decode(&root),
            Err(SchemaError::MissingField {
                index: 0,
                field: statics::P_FIELD_IS_DISABLED_FOR_SPAWNING,
            })
        );
    }

    #[test]
    fn decode_reports_wrong_types() {
        let mut entry = sample_json();
        *entry.get_mut("CooldownPerSquadMemberMax").unwrap() = JsonValue::String("5".into());
        let err = decode(&doc(&entry.to_pretty_json())).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::WrongType { index: 0, field: "CooldownPerSquadMemberMax", .. }
        ));

        let root = JsonValue::parse(r#"{ "Parameters": {} }"#).unwrap();
        assert_eq!(decode(&root), Err(SchemaError::ParametersNotArray));
        assert_eq!(decode(&JsonValue::Null), Err(SchemaError::RootNotObject));
        assert_eq!(decode(&doc("1")), Err(SchemaError::RecordNotObject { index: 0 }));
    }

    #[test]
    fn unknown_record_keys_survive_encode() {
        let mut entry = sample_json();
        entry
            .as_object_mut()
            .unwrap()
            .insert("Comment".to_string(), JsonValue::String("keep".into()));
        let records = decode(&doc(&entry.to_pretty_json())).unwrap();
        assert_eq!(records[0].extra.len(), 1);

        let json = records[0].to_json();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.last(), Some(&"Comment"));
    }

    #[test]
    fn encode_replaces_parameters_and_keeps_siblings_in_place() {
        let mut root =
            JsonValue::parse(r#"{ "Version": 3, "Parameters": [], "Tail": "x" }"#).unwrap();
        let record = Record {
            id: "Bear_02".to_string(),
            ..Default::default()
        };
        encode(&mut root, std::slice::from_ref(&record));

        let keys: Vec<&str> = root.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["Version", "Parameters", "Tail"]);
        assert_eq!(decode(&root).unwrap(), vec![record]);
    }

    #[test]
    fn decode_encode_decode_is_stable() {
        let root = doc(&sample_json().to_pretty_json());
        let first = decode(&root).unwrap();
        let mut again = root.clone();
        encode(&mut again, &first);
        assert_eq!(decode(&again).unwrap(), first);
    }

    #[test]
    fn apply_display_ignores_id_and_rejects_bad_integers() {
        let mut record = decode(&doc(&sample_json().to_pretty_json())).unwrap().remove(0);
        let before = record.clone();

        assert_eq!(record.apply_display(Field::Id, "Other"), Ok(false));
        assert!(record.apply_display(Field::InitialUsageOverride, "x").is_err());
        assert_eq!(record, before);

        assert_eq!(record.apply_display(Field::Variations, "[a, b]"), Ok(true));
        assert_eq!(record.variations, vec!["a", "b"]);
        assert_eq!(record.apply_display(Field::Variations, "['a', 'b']"), Ok(false));
    }

    #[test]
    fn set_ignores_values_of_the_wrong_kind() {
        let mut record = decode(&doc(&sample_json().to_pretty_json())).unwrap().remove(0);
        let before = record.clone();
        assert!(!record.set(Field::Id, FieldValue::Text("Renamed".into())));
        assert!(!record.set(Field::CooldownGroup, FieldValue::Int(3)));
        assert_eq!(record, before);
        assert!(record.set(Field::CooldownGroup, FieldValue::Text("Pack".into())));
    }

    #[test]
    fn display_matches_table_rendering() {
        let record = decode(&doc(&sample_json().to_pretty_json())).unwrap().remove(0);
        assert_eq!(record.display(Field::IsDisabledForSpawning), "false");
        assert_eq!(record.display(Field::AllowedLocations), "['Forest', 'Mountain']");
        assert_eq!(record.display(Field::Variations), "[]");
        assert_eq!(record.display(Field::CooldownPerSquadMemberMax), "20");
    }
}
