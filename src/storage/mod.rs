mod articles;
mod digests;
mod schema;
mod threads;
mod types;

pub use schema::{Database, REQUIRED_TABLES};
pub(crate) use types::date_key;
pub use types::{
    Article, AxiomScores, DatabaseError, DateFilter, Digest, Thread, ThreadMember,
};
