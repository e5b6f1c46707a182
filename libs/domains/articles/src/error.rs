use result_channel::Fault;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArticleError {
    #[error("article {0} not found")]
    NotFound(i32),

    /// Raw storage error message, reported to clients as-is.
    #[error("{0}")]
    Database(String),

    /// A recovered panic or a channel that closed without a result.
    #[error(transparent)]
    Fault(#[from] Fault),
}

pub type ArticleResult<T> = Result<T, ArticleError>;

impl From<DbErr> for ArticleError {
    fn from(err: DbErr) -> Self {
        ArticleError::Database(err.to_string())
    }
}

impl ArticleError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ArticleError::NotFound(_))
    }
}
