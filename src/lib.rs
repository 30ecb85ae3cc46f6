pub mod assemble;
pub mod digest;
pub mod errors;
pub mod ignore;
pub mod logger;
pub mod output;
pub mod selector;
pub mod trie;
pub mod utils;

pub use crate::digest::{build_digest, Digest, DigestConfig};
pub use crate::errors::DigestError;
pub use crate::ignore::IgnoreMatcher;
