// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! A catalog of test tones with a public JSON listing
//!
//! The sub-crates are re-exported as modules, optionally depending
//! on the enabled features.

pub use tones_core::*;

#[cfg(feature = "repo")]
pub mod repo {
    pub use tones_repo::*;
}

#[cfg(feature = "sqlite")]
pub mod repo_sqlite {
    pub use tones_repo_sqlite::*;
}

#[cfg(feature = "sqlite")]
pub mod storage_sqlite {
    pub use tones_storage_sqlite::*;
}

#[cfg(feature = "sqlite")]
pub mod usecases_sqlite {
    pub use tones_usecases_sqlite::*;
}

#[cfg(feature = "json-backend")]
pub mod backend_webapi_json {
    pub use tones_backend_webapi_json::*;
}
