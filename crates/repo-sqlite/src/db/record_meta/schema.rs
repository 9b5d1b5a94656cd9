// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

diesel::table! {
    record_meta (row_id) {
        row_id -> BigInt,
        record_id -> BigInt,
        meta_key -> Text,
        meta_value -> Text,
    }
}
