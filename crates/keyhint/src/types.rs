//! # Common Types

/// The integer type of vocabulary ids.
///
/// Id `0` is conventionally reserved for padding, and is never a word.
pub type TokenId = u32;

/// The default pad value.
pub const DEFAULT_PAD_ID: TokenId = 0;

/// The default display string for ids with no token.
pub const DEFAULT_UNK_TOKEN: &str = "<UNK>";

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type KHHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> KHHashMap<K, V> {
            KHHashMap::with_capacity(capacity)
        }
    } else {
        /// Type Alias for hash maps in this crate.
        pub type KHHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Create a new hash map with the given capacity.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> KHHashMap<K, V> {
            KHHashMap::with_capacity(capacity)
        }
    }
}

/// Convert a `usize` position to a [`TokenId`], if it fits.
pub fn token_id_from_usize(idx: usize) -> Option<TokenId> {
    TokenId::try_from(idx).ok()
}
