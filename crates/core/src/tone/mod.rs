// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::{
    schema::{
        ContentType, ContentTypeLabels, FieldDataType, FieldDeclaration, Registry, RegistryError,
    },
    util::url::BaseUrl,
};

mod asset;
pub use self::asset::{ASSET_DIR_PATH, ASSET_FILE_SUFFIX, asset_url, sanitize_file_name};

/// Record type of tones
pub const CONTENT_TYPE: &str = "tones";

/// Metadata key of the frequency in Hz
pub const FREQUENCY_FIELD_KEY: &str = "tone_freq";

/// Metadata key of the base file name of the audio asset
pub const FILE_FIELD_KEY: &str = "tone_file";

/// A test tone
///
/// The metadata fields are stored as submitted, i.e. neither the
/// frequency nor the file name are validated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tone {
    pub title: String,

    pub frequency: Option<String>,

    pub file: Option<String>,
}

impl Tone {
    #[must_use]
    pub fn field_value(&self, key: &str) -> Option<&str> {
        match key {
            FREQUENCY_FIELD_KEY => self.frequency.as_deref(),
            FILE_FIELD_KEY => self.file.as_deref(),
            _ => None,
        }
    }

    pub fn set_field_value(&mut self, key: &str, value: String) -> bool {
        match key {
            FREQUENCY_FIELD_KEY => self.frequency = Some(value),
            FILE_FIELD_KEY => self.file = Some(value),
            _ => return false,
        }
        true
    }

    /// Download URL of the audio asset
    ///
    /// Derived from the file name on every invocation and never stored.
    #[must_use]
    pub fn asset_url(&self, base_url: &BaseUrl) -> String {
        asset_url(base_url, self.file.as_deref().unwrap_or_default())
    }
}

#[must_use]
pub fn content_type() -> ContentType {
    ContentType {
        name: CONTENT_TYPE.to_owned(),
        labels: ContentTypeLabels {
            name: "Tones".to_owned(),
            singular_name: "Tone".to_owned(),
        },
        public: true,
        has_archive: true,
        rewrite_slug: CONTENT_TYPE.to_owned(),
        menu_icon: Some("dashicons-format-audio".to_owned()),
    }
}

#[must_use]
pub fn field_declarations() -> [FieldDeclaration; 2] {
    [
        FieldDeclaration {
            content_type: CONTENT_TYPE.to_owned(),
            key: FREQUENCY_FIELD_KEY.to_owned(),
            label: "Tone Freq".to_owned(),
            data_type: FieldDataType::Integer,
            single: true,
            show_in_rest: true,
        },
        FieldDeclaration {
            content_type: CONTENT_TYPE.to_owned(),
            key: FILE_FIELD_KEY.to_owned(),
            label: "Tone File".to_owned(),
            data_type: FieldDataType::String,
            single: true,
            show_in_rest: true,
        },
    ]
}

/// Declare the tones content type and its fields
///
/// Safe to invoke repeatedly.
pub fn register_schema(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.declare_type(content_type())?;
    for field in field_declarations() {
        registry.declare_field(field)?;
    }
    Ok(())
}

///////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////
