// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::prelude::*;

/// Named values that are persisted independent of any record
pub trait OptionRepo {
    fn load_option_value(&mut self, name: &str) -> RepoResult<Option<String>>;

    fn store_option_value(&mut self, name: &str, value: &str) -> RepoResult<()>;
}
