use err_derive::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error(display = "Request failed: {}", _0)]
    Request(#[error(from)] reqwest::Error),

    #[error(display = "Invalid server address {}: {}", address, reason)]
    InvalidUrl { address: String, reason: String },

    #[error(display = "Endpoint {} does not use the {} placeholder", template, placeholder)]
    MissingPlaceholder {
        template: String,
        placeholder: String,
    },

    #[error(display = "Endpoint {} has no value for {}", template, placeholder)]
    UnknownPlaceholder {
        template: String,
        placeholder: String,
    },

    #[error(display = "\"{}\" cannot be used as the {} path segment", value, placeholder)]
    UnaddressableSegment { placeholder: String, value: String },

    #[error(display = "Failed to read {}", path)]
    ReadUploadFile {
        path: String,
        #[error(source)]
        error: std::io::Error,
    },
}
