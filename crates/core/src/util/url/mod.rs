// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, ops::Deref, str::FromStr};

use ::url::Url;
use thiserror::Error;

/// An absolute URL that ends with a trailing path separator
///
/// Relative paths are resolved below this URL, never next to it.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct BaseUrl(Url);

#[derive(Error, Debug)]
pub enum BaseUrlError {
    #[error("cannot be a base")]
    CannotBeABase,

    #[error("no leading path separator")]
    NoLeadingPathSeparator,

    #[error("no trailing path separator")]
    NoTrailingPathSeparator,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub fn validate_base_url(url: &Url) -> Result<(), BaseUrlError> {
    if url.cannot_be_a_base() {
        return Err(BaseUrlError::CannotBeABase);
    }
    // Only absolute paths are permitted
    if !url.path().starts_with('/') {
        return Err(BaseUrlError::NoLeadingPathSeparator);
    }
    // Not only the path but the whole URL must end with
    // a trailing path separator!
    if !url.as_str().ends_with('/') {
        return Err(BaseUrlError::NoTrailingPathSeparator);
    }
    Ok(())
}

#[must_use]
pub fn is_valid_base_url(url: &Url) -> bool {
    validate_base_url(url).is_ok()
}

impl TryFrom<Url> for BaseUrl {
    type Error = BaseUrlError;

    fn try_from(url: Url) -> Result<Self, Self::Error> {
        validate_base_url(&url)?;
        Ok(Self(url))
    }
}

impl BaseUrl {
    pub fn try_autocomplete_from(url: Url) -> Result<Self, BaseUrlError> {
        if url.as_str().ends_with('/') {
            return Self::try_from(url);
        }
        // FromStr applies the autocompletion
        url.as_str().parse()
    }

    pub fn parse_strict(s: &str) -> Result<Self, BaseUrlError> {
        let url = Url::parse(s).map_err(anyhow::Error::from)?;
        url.try_into()
    }

    pub fn parse_lazy(s: &str) -> Result<Self, BaseUrlError> {
        let url = Url::parse(s).map_err(anyhow::Error::from)?;
        Self::try_autocomplete_from(url)
    }
}

impl From<BaseUrl> for Url {
    fn from(from: BaseUrl) -> Self {
        let BaseUrl(inner) = from;
        inner
    }
}

impl FromStr for BaseUrl {
    type Err = BaseUrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let url: Url = if s.ends_with('/') {
            s.parse()
        } else {
            // Autocomplete the string before parsing
            format!("{s}/").parse()
        }
        .map_err(anyhow::Error::from)?;
        Self::try_from(url)
    }
}

impl AsRef<Url> for BaseUrl {
    fn as_ref(&self) -> &Url {
        &self.0
    }
}

impl Deref for BaseUrl {
    type Target = Url;

    fn deref(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

///////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////
