// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::util::url::BaseUrl;

/// Location of the audio assets relative to the base URL
pub const ASSET_DIR_PATH: &str = "assets/mp3/";

/// Appended to the base file name of every audio asset
pub const ASSET_FILE_SUFFIX: &str = "_-6dBFS_5s.mp3";

const REMOVED_CHARS: &[char] = &[
    '?', '[', ']', '/', '\\', '=', '<', '>', ':', ';', ',', '\'', '"', '&', '$', '#', '*', '(',
    ')', '|', '~', '`', '!', '{', '}', '%', '+', '\u{2019}', '\u{ab}', '\u{bb}', '\u{201d}',
    '\u{201c}',
];

const TRIMMED_CHARS: &[char] = &['.', '-', '_'];

/// Strip all characters that are unsafe in a file name
///
/// Path separators and other reserved characters are removed, runs
/// of whitespace and dashes are replaced by a single dash. Leading
/// and trailing periods, dashes and underscores are trimmed. The
/// letter case is preserved.
#[must_use]
pub fn sanitize_file_name(file_name: &str) -> String {
    let mut sanitized = String::with_capacity(file_name.len());
    let mut pending_dash = false;
    for c in file_name.chars() {
        if REMOVED_CHARS.contains(&c) {
            continue;
        }
        if c.is_whitespace() || c == '-' {
            pending_dash = true;
            continue;
        }
        if c.is_control() {
            continue;
        }
        if pending_dash {
            sanitized.push('-');
            pending_dash = false;
        }
        sanitized.push(c);
    }
    sanitized.trim_matches(TRIMMED_CHARS).to_owned()
}

/// Download URL of an audio asset
///
/// The sanitized file name is appended to the base URL as is,
/// without any percent-encoding.
#[must_use]
pub fn asset_url(base_url: &BaseUrl, file: &str) -> String {
    let file_name = sanitize_file_name(file);
    format!("{base_url}{ASSET_DIR_PATH}{file_name}{ASSET_FILE_SUFFIX}")
}
