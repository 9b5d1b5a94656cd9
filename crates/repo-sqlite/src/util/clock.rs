// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use jiff::Timestamp;

/// Milliseconds since the Unix epoch as stored in the database
pub(crate) type TimestampMillis = i64;

pub(crate) fn encode_timestamp(timestamp: Timestamp) -> TimestampMillis {
    timestamp.as_millisecond()
}

/// Decode a timestamp from the database
///
/// Values outside the supported range are clamped. This should never happen.
pub(crate) fn decode_timestamp(millis: TimestampMillis) -> Timestamp {
    let decoded = Timestamp::from_millisecond(millis);
    debug_assert!(decoded.is_ok());
    decoded.unwrap_or_else(|_| {
        if millis < 0 {
            Timestamp::MIN
        } else {
            Timestamp::MAX
        }
    })
}
