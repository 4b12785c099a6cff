use crate::backend::{CreateMode, SourceInput};

use err_derive::Error;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(display = "Please provide a title.")]
    MissingTitle,

    #[error(display = "Please provide a source URL.")]
    MissingUrl,

    #[error(display = "Please choose a file to upload.")]
    MissingFile,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Title,
    Source,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Source,
            FormField::Source => FormField::Title,
        }
    }
}

/// Pending input for a new video. `source` holds a URL or a file path
/// depending on the create mode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateForm {
    pub title: String,
    pub source: String,
}

impl CreateForm {
    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.title,
            FormField::Source => &mut self.source,
        }
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.source.clear();
    }

    pub fn validate(&self, mode: CreateMode) -> Result<(String, SourceInput), ValidationError> {
        let source = match mode {
            CreateMode::Url => SourceInput::Url(self.source.trim().to_owned()),
            CreateMode::File => SourceInput::File(PathBuf::from(self.source.trim())),
        };
        let title = validate_create(&self.title, &source)?;
        Ok((title, source))
    }
}

/// Checks the inputs of a create request, returning the trimmed title.
pub fn validate_create(title: &str, source: &SourceInput) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::MissingTitle);
    }

    match source {
        SourceInput::Url(url) if url.trim().is_empty() => Err(ValidationError::MissingUrl),
        SourceInput::File(path) if path.to_string_lossy().trim().is_empty() => {
            Err(ValidationError::MissingFile)
        }
        _ => Ok(title.to_owned()),
    }
}
