mod database;
pub(crate) mod result_ext;

pub use database::Database;
pub use result_ext::{RepositoryErrorMapper, ResultExt};
