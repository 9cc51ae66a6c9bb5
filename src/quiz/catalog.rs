use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};

use thiserror::Error;

const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/400x600/E8E8E8/1a1a1a?text=";

// Below this, later questions start running out of unused distractors
const RECOMMENDED_CATALOG_SIZE: usize = 9;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read quiz data: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse quiz data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("fit #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("fit name {0:?} appears more than once")]
    DuplicateName(String),
}

/// A denim style the visitor has to recognise.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Fit {
    pub name: String,
    pub personality: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

impl Fit {
    #[cfg(test)]
    pub(crate) fn new(name: impl Into<String>, personality: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            personality: personality.into(),
            image_url: None,
            caption: None,
        }
    }

    pub fn image_url_or_placeholder(&self) -> String {
        match &self.image_url {
            Some(url) if !url.trim().is_empty() => url.clone(),
            _ => format!("{}{}", PLACEHOLDER_IMAGE_URL, self.name.replace(' ', "+")),
        }
    }
}

/// Contents of the quiz data file. Loaded once and shared read-only by every session.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Catalog {
    pub fits: Vec<Fit>,
    pub discount_code: String,
    pub shop_url: String,
}

impl Catalog {
    pub fn new(file: File) -> Result<Self, CatalogError> {
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_reader(reader)?;
        catalog.validate()?;

        if catalog.fits.len() < RECOMMENDED_CATALOG_SIZE {
            log::warn!(
                "Catalog has only {} fits, questions may get fewer than 2 wrong options",
                catalog.fits.len()
            );
        }

        return Ok(catalog);
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for (index, fit) in self.fits.iter().enumerate() {
            if fit.name.trim().is_empty() {
                return Err(CatalogError::EmptyName { index });
            }
            if !seen.insert(fit.name.as_str()) {
                return Err(CatalogError::DuplicateName(fit.name.clone()));
            }
        }
        Ok(())
    }
}
