// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Declarations of content types and their metadata fields
//!
//! The [`Registry`] is populated once during startup and shared
//! read-only afterwards. Declarations are keyed by name, i.e.
//! declaring the same type or field again replaces the previous
//! declaration instead of adding a duplicate.

use thiserror::Error;

use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypeLabels {
    pub name: String,
    pub singular_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    /// Unique name, also used as the record type in storage
    pub name: String,

    pub labels: ContentTypeLabels,

    /// Records are listed publicly
    pub public: bool,

    pub has_archive: bool,

    /// Path segment for public URLs
    pub rewrite_slug: String,

    pub menu_icon: Option<String>,
}

fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty() && !name.contains(|c: char| c.is_whitespace() || c == '/')
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContentTypeInvalidity {
    NameInvalid,
    LabelEmpty,
    RewriteSlugInvalid,
}

impl Validate for ContentType {
    type Invalidity = ContentTypeInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self {
            name,
            labels,
            rewrite_slug,
            public: _,
            has_archive: _,
            menu_icon: _,
        } = self;
        ValidationContext::new()
            .invalidate_if(!is_valid_identifier(name), Self::Invalidity::NameInvalid)
            .invalidate_if(
                labels.name.trim().is_empty() || labels.singular_name.trim().is_empty(),
                Self::Invalidity::LabelEmpty,
            )
            .invalidate_if(
                !is_valid_identifier(rewrite_slug),
                Self::Invalidity::RewriteSlugInvalid,
            )
            .into()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldDataType {
    Integer,
    String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    /// Name of the declared [`ContentType`]
    pub content_type: String,

    /// Metadata key
    pub key: String,

    /// Label of the corresponding input control in the editor
    pub label: String,

    pub data_type: FieldDataType,

    /// At most one value per record
    pub single: bool,

    /// Visible through the public JSON API
    pub show_in_rest: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldDeclarationInvalidity {
    ContentTypeInvalid,
    KeyInvalid,
    LabelEmpty,
}

impl Validate for FieldDeclaration {
    type Invalidity = FieldDeclarationInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self {
            content_type,
            key,
            label,
            data_type: _,
            single: _,
            show_in_rest: _,
        } = self;
        ValidationContext::new()
            .invalidate_if(
                !is_valid_identifier(content_type),
                Self::Invalidity::ContentTypeInvalid,
            )
            .invalidate_if(!is_valid_identifier(key), Self::Invalidity::KeyInvalid)
            .invalidate_if(label.trim().is_empty(), Self::Invalidity::LabelEmpty)
            .into()
    }
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("invalid content type \"{name}\": {reason}")]
    InvalidContentType { name: String, reason: String },

    #[error("invalid field \"{key}\": {reason}")]
    InvalidField { key: String, reason: String },

    #[error("undeclared content type \"{0}\"")]
    UndeclaredContentType(String),
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    content_types: Vec<ContentType>,
    fields: Vec<FieldDeclaration>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Default::default()
    }

    pub fn declare_type(&mut self, content_type: ContentType) -> Result<(), RegistryError> {
        if let Err(err) = content_type.validate() {
            return Err(RegistryError::InvalidContentType {
                name: content_type.name,
                reason: format!("{err:?}"),
            });
        }
        if let Some(declared) = self
            .content_types
            .iter_mut()
            .find(|declared| declared.name == content_type.name)
        {
            *declared = content_type;
        } else {
            self.content_types.push(content_type);
        }
        Ok(())
    }

    /// Declare a metadata field of a content type
    ///
    /// The content type must have been declared before. Fields keep
    /// the order of their first declaration.
    pub fn declare_field(&mut self, field: FieldDeclaration) -> Result<(), RegistryError> {
        if let Err(err) = field.validate() {
            return Err(RegistryError::InvalidField {
                key: field.key,
                reason: format!("{err:?}"),
            });
        }
        if self.content_type(&field.content_type).is_none() {
            return Err(RegistryError::UndeclaredContentType(field.content_type));
        }
        if let Some(declared) = self.fields.iter_mut().find(|declared| {
            declared.content_type == field.content_type && declared.key == field.key
        }) {
            *declared = field;
        } else {
            self.fields.push(field);
        }
        Ok(())
    }

    #[must_use]
    pub fn content_type(&self, name: &str) -> Option<&ContentType> {
        self.content_types
            .iter()
            .find(|content_type| content_type.name == name)
    }

    pub fn content_types(&self) -> impl Iterator<Item = &ContentType> {
        self.content_types.iter()
    }

    pub fn fields_of<'a>(
        &'a self,
        content_type: &'a str,
    ) -> impl Iterator<Item = &'a FieldDeclaration> {
        self.fields
            .iter()
            .filter(move |field| field.content_type == content_type)
    }

    #[must_use]
    pub fn field<'a>(
        &'a self,
        content_type: &'a str,
        key: &str,
    ) -> Option<&'a FieldDeclaration> {
        self.fields_of(content_type).find(|field| field.key == key)
    }
}

///////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests;
