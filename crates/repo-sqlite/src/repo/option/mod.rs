// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use tones_repo::option::OptionRepo;

use crate::{
    db::option_value::{models::*, schema::*},
    prelude::*,
};

impl OptionRepo for crate::Connection<'_> {
    fn load_option_value(&mut self, name: &str) -> RepoResult<Option<String>> {
        option_value::table
            .select(option_value::value)
            .filter(option_value::name.eq(name))
            .first::<String>(self.as_mut())
            .map_err(repo_error)
            .optional()
    }

    fn store_option_value(&mut self, name: &str, value: &str) -> RepoResult<()> {
        let insertable = InsertableRecord { name, value };
        diesel::insert_into(option_value::table)
            .values(&insertable)
            .on_conflict(option_value::name)
            .do_update()
            .set(option_value::value.eq(value))
            .execute(self.as_mut())
            .map_err(repo_error)?;
        Ok(())
    }
}
