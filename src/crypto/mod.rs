//! Codecs behind the encryptor: the algorithm catalog, message digests,
//! bcrypt password hashing, and reversible AES encryption. The facade picks
//! one per call from the catalog entry's shape.

pub mod algorithm;
pub mod digest;
pub mod passwords;
pub mod secrets;
