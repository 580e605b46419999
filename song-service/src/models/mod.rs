pub mod song;

pub use song::{patch_from_body, patch_id, Song, SongFields, MONGO_ID_FIELD, SONG_ID_FIELD};
