use std::collections::HashMap;

use core::fmt::{Debug, Formatter, Result as FmtResult};

use crate::{riff::chunks::ChunkID, traits::ChunkCodec};

/// Map from chunk id to the codec that interprets its payload.
///
/// An empty registry is valid: every chunk then decodes as unknown.
pub struct ChunkRegistry<C> {
    codecs: HashMap<ChunkID, Box<dyn ChunkCodec<C>>>,
}

impl<C> ChunkRegistry<C> {
    pub fn new() -> Self {
        ChunkRegistry {
            codecs: HashMap::new(),
        }
    }

    /// Register (or replace) the codec for `id`
    pub fn register(&mut self, id: ChunkID, codec: impl ChunkCodec<C> + 'static) -> &mut Self {
        self.codecs.insert(id, Box::new(codec));
        self
    }

    /// Builder form of [`register`](Self::register)
    pub fn with(mut self, id: ChunkID, codec: impl ChunkCodec<C> + 'static) -> Self {
        self.register(id, codec);
        self
    }

    #[inline]
    pub fn get(&self, id: &ChunkID) -> Option<&dyn ChunkCodec<C>> {
        self.codecs.get(id).map(|codec| codec.as_ref())
    }

    #[inline]
    pub fn contains(&self, id: &ChunkID) -> bool {
        self.codecs.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ChunkID> {
        self.codecs.keys()
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl<C> Default for ChunkRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Debug for ChunkRegistry<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut ids: Vec<&ChunkID> = self.codecs.keys().collect();
        ids.sort();
        f.debug_struct("ChunkRegistry").field("ids", &ids).finish()
    }
}
