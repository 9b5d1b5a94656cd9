// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Storage-independent repositories for records, their metadata
//! and global options
//!
//! Tones are stored as records of a content type with one metadata
//! value per declared field.

use jiff::Timestamp;

#[macro_use]
mod macros;

pub mod meta;
pub mod option;
pub mod record;

pub use self::prelude::{OptionalRepoResult, RepoError, RepoResult};

pub type RecordId = i64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordHeader<Id> {
    pub id: Id,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

pub mod prelude {
    use thiserror::Error;

    pub trait RecordCollector {
        type Header;
        type Record;

        /// Collect a new element
        fn collect(&mut self, header: Self::Header, record: Self::Record);
    }

    impl<H, R> RecordCollector for Vec<(H, R)> {
        type Header = H;
        type Record = R;

        fn collect(&mut self, header: Self::Header, record: Self::Record) {
            self.push((header, record));
        }
    }

    pub trait ReservableRecordCollector: RecordCollector {
        /// Reserve additional capacity for new elements
        fn reserve(&mut self, additional: usize);
    }

    impl<H, R> ReservableRecordCollector for Vec<(H, R)> {
        fn reserve(&mut self, additional: usize) {
            Vec::reserve(self, additional);
        }
    }

    #[derive(Error, Debug)]
    pub enum RepoError {
        /// No record, metadata or option with the given key
        #[error("not found")]
        NotFound,

        #[error("conflict")]
        Conflict,

        /// The transaction has been aborted and may be retried
        #[error("aborted")]
        Aborted,

        #[error(transparent)]
        Other(#[from] anyhow::Error),
    }

    pub type RepoResult<T> = Result<T, RepoError>;

    pub trait OptionalRepoResult<T> {
        fn optional(self) -> RepoResult<Option<T>>;
    }

    impl<T> OptionalRepoResult<T> for Result<T, RepoError> {
        fn optional(self) -> RepoResult<Option<T>> {
            self.map_or_else(
                |err| {
                    if matches!(err, RepoError::NotFound) {
                        Ok(None)
                    } else {
                        Err(err)
                    }
                },
                |val| Ok(Some(val)),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn optional_maps_only_not_found_to_none() {
        let found: RepoResult<&str> = Ok("440");
        assert_eq!(Some("440"), found.optional().unwrap());
        let missing: RepoResult<&str> = Err(RepoError::NotFound);
        assert_eq!(None, missing.optional().unwrap());
        let conflict: RepoResult<&str> = Err(RepoError::Conflict);
        assert!(matches!(conflict.optional(), Err(RepoError::Conflict)));
    }

    #[test]
    fn collect_records_into_vec() {
        let mut collector: Vec<(u8, &str)> = Vec::new();
        ReservableRecordCollector::reserve(&mut collector, 2);
        collector.collect(1, "A4");
        collector.collect(2, "C5");
        assert_eq!(vec![(1, "A4"), (2, "C5")], collector);
    }
}
