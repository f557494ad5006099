// SPDX-License-Identifier: MPL-2.0

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, ThisError)]
pub enum Error {
    /// A row referenced an employee, meeting, or project that does not exist.
    #[error("referential integrity violated: {0}")]
    ReferentialIntegrity(String),

    #[error("no {entity} found with id {id}")]
    NotFound { entity: &'static str, id: i32 },

    /// Any other constraint declared by the schema, e.g. an assignment ending before it starts.
    #[error("constraint violated: {0}")]
    Constraint(String),

    #[error(transparent)]
    Database(DieselError),

    #[error("could not open database: {0}")]
    Connection(#[from] diesel::result::ConnectionError),

    #[error("could not update database to the latest version: {0}")]
    Migration(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn is_referential_integrity(&self) -> bool {
        matches!(self, Error::ReferentialIntegrity(_))
    }
}

impl From<DieselError> for Error {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Error::ReferentialIntegrity(info.message().to_owned())
            }
            DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
                Error::Constraint(info.message().to_owned())
            }
            err => Error::Database(err),
        }
    }
}
