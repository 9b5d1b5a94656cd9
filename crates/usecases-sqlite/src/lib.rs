// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use thiserror::Error;

use tones_repo::{prelude::RepoError, record::RecordId};
use tones_repo_sqlite::prelude::{Connection as RepoConnection, *};
use tones_storage_sqlite::Error as StorageError;

pub mod database;
pub mod maintenance;
pub mod tone;

#[derive(Error, Debug)]
pub enum Error {
    /// The record exists but has another content type
    #[error("record {id} is of type \"{record_type}\" and not a tone")]
    NotATone { id: RecordId, record_type: String },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    DatabaseMigration(anyhow::Error),

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl<E> From<DieselTransactionError<E>> for Error
where
    E: Into<Error>,
{
    fn from(err: DieselTransactionError<E>) -> Self {
        err.into_inner().into()
    }
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Self::Storage(err.into())
    }
}

pub type TransactionError = DieselTransactionError<Error>;

pub type Result<T> = std::result::Result<T, Error>;
