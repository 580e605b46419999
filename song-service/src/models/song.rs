use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field carrying the client-supplied song identifier.
pub const SONG_ID_FIELD: &str = "id";

/// MongoDB's own document identifier. Never accepted from or returned to clients.
pub const MONGO_ID_FIELD: &str = "_id";

/// Schema-less fields of a song, kept exactly as the client sent them.
pub type SongFields = Map<String, Value>;

/// A song record: a typed `id` plus whatever else the client stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    #[serde(flatten)]
    pub fields: SongFields,
}

impl Song {
    /// Builds a song from a request body.
    ///
    /// The body must be a JSON object whose `id` is an integer; a stray `_id`
    /// is dropped so the database keeps ownership of its own identifier.
    pub fn from_body(body: Value) -> Result<Self, String> {
        let Value::Object(mut fields) = body else {
            return Err("song body must be a JSON object".to_string());
        };
        fields.remove(MONGO_ID_FIELD);

        let id = match fields.remove(SONG_ID_FIELD) {
            Some(value) => parse_id(&value)?,
            None => return Err("song body is missing the integer \"id\" field".to_string()),
        };

        Ok(Self { id, fields })
    }

    /// Shallow merge: every key in `patch` overwrites the matching key here.
    pub fn apply(&mut self, patch: &SongFields) -> Result<(), String> {
        for (key, value) in patch {
            if key == SONG_ID_FIELD {
                self.id = parse_id(value)?;
            } else if key != MONGO_ID_FIELD {
                self.fields.insert(key.clone(), value.clone());
            }
        }
        Ok(())
    }
}

/// Normalises a PUT body into a patch, rejecting non-objects and non-integer ids.
pub fn patch_from_body(body: Value) -> Result<SongFields, String> {
    let Value::Object(mut patch) = body else {
        return Err("update body must be a JSON object".to_string());
    };
    patch.remove(MONGO_ID_FIELD);
    if let Some(value) = patch.get(SONG_ID_FIELD) {
        parse_id(value)?;
    }
    Ok(patch)
}

/// The integer `id` a validated patch would assign, if it sets one.
pub fn patch_id(patch: &SongFields) -> Option<i64> {
    patch.get(SONG_ID_FIELD).and_then(Value::as_i64)
}

fn parse_id(value: &Value) -> Result<i64, String> {
    value
        .as_i64()
        .ok_or_else(|| format!("song \"id\" must be an integer, got {}", value))
}
