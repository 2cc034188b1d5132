use axum::http::StatusCode;

/// Classification of a [`UserError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    InvalidData,
    CreationFailed,
    UpdateFailed,
    DeletionFailed,
    /// A read failed for a reason no operation classifies.
    Internal,
}

impl ErrorKind {
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::AlreadyExists => StatusCode::CONFLICT,
            ErrorKind::InvalidData => StatusCode::BAD_REQUEST,
            ErrorKind::CreationFailed
            | ErrorKind::UpdateFailed
            | ErrorKind::DeletionFailed
            | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    AlreadyExists(String),
    #[error("{0}")]
    InvalidData(String),
    #[error("{0}")]
    CreationFailed(String),
    #[error("{0}")]
    UpdateFailed(String),
    #[error("{0}")]
    DeletionFailed(String),
    #[error("{0}")]
    Internal(String),
}

impl UserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::NotFound(_) => ErrorKind::NotFound,
            UserError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            UserError::InvalidData(_) => ErrorKind::InvalidData,
            UserError::CreationFailed(_) => ErrorKind::CreationFailed,
            UserError::UpdateFailed(_) => ErrorKind::UpdateFailed,
            UserError::DeletionFailed(_) => ErrorKind::DeletionFailed,
            UserError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind().status_code()
    }

    /// NotFound and AlreadyExists pass through every operation unchanged.
    pub fn is_classified(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotFound | ErrorKind::AlreadyExists)
    }
}
