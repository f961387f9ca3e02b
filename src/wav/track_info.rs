use crate::{
    riff::chunks::ChunkID,
    wav::list::ListChunk,
};

pub const ICMT: ChunkID = ChunkID::new(b"ICMT");
pub const IART: ChunkID = ChunkID::new(b"IART");
pub const INAM: ChunkID = ChunkID::new(b"INAM");
pub const IPRD: ChunkID = ChunkID::new(b"IPRD");
pub const IPRT: ChunkID = ChunkID::new(b"IPRT");
pub const ICRD: ChunkID = ChunkID::new(b"ICRD");
pub const ISFT: ChunkID = ChunkID::new(b"ISFT");

/// Friendly view of the well-known `LIST`/`INFO` entries
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackInfo {
    pub comment: Option<String>,
    pub artist: Option<String>,
    pub copyright_date: Option<String>,
    pub track_name: Option<String>,
    pub album_name: Option<String>,
    pub album_track_id: Option<u32>,
    pub software: Option<String>,
}

impl TrackInfo {
    pub fn is_empty(&self) -> bool {
        *self == TrackInfo::default()
    }

    /// Build a fresh `INFO` list; `None` when no field has a non-empty value
    pub fn to_list_chunk(&self) -> Option<ListChunk> {
        let mut list = ListChunk::info();
        self.apply_to(&mut list);
        (!list.is_empty()).then_some(list)
    }

    /// Write these fields over `list`.
    ///
    /// Set fields replace existing entries in place or are appended in key order. An unset
    /// field removes its key only when the stored value would have projected into it, so
    /// unnamed keys, non-UTF-8 text and non-numeric `IPRT` values are left untouched.
    pub fn apply_to(&self, list: &mut ListChunk) {
        let album_track_id = self.album_track_id.map(|id| id.to_string());
        let fields: [(ChunkID, Option<&str>); 7] = [
            (ICMT, self.comment.as_deref()),
            (IART, self.artist.as_deref()),
            (INAM, self.track_name.as_deref()),
            (IPRD, self.album_name.as_deref()),
            (IPRT, album_track_id.as_deref()),
            (ICRD, self.copyright_date.as_deref()),
            (ISFT, self.software.as_deref()),
        ];

        for (key, value) in fields {
            match value.filter(|v| !v.is_empty()) {
                Some(value) => {
                    list.insert(key, value);
                }
                None => {
                    if list.get(key).is_some_and(|raw| projects(key, raw)) {
                        list.remove(key);
                    }
                }
            }
        }
    }

    /// Project the well-known keys out of a list chunk; other keys are ignored
    pub fn from_list_chunk(list: &ListChunk) -> Self {
        let text = |key: ChunkID| {
            let raw = list.get(key)?;
            match text_value(raw) {
                Some(value) => Some(value.to_owned()),
                None if !raw.is_empty() => {
                    tracing::warn!(%key, "INFO value is not UTF-8, leaving it out of track info");
                    None
                }
                None => None,
            }
        };

        let album_track_id = text(IPRT).and_then(|raw| match raw.trim().parse::<u32>() {
            Ok(id) => Some(id),
            Err(_) => {
                tracing::warn!(value = %raw, "ignoring non-numeric IPRT track number");
                None
            }
        });

        TrackInfo {
            comment: text(ICMT),
            artist: text(IART),
            copyright_date: text(ICRD),
            track_name: text(INAM),
            album_name: text(IPRD),
            album_track_id,
            software: text(ISFT),
        }
    }
}

fn text_value(raw: &[u8]) -> Option<&str> {
    core::str::from_utf8(raw).ok().filter(|v| !v.is_empty())
}

/// Whether `raw` stored under `key` maps onto a `TrackInfo` field
fn projects(key: ChunkID, raw: &[u8]) -> bool {
    match text_value(raw) {
        Some(value) if key == IPRT => value.trim().parse::<u32>().is_ok(),
        Some(_) => true,
        None => false,
    }
}
