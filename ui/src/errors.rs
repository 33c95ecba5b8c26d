//! User-facing error types. `Display` is the text shown on screen.

/// Problems with acquiring an image. Handled locally, no network involved.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("Please choose an image file ({0} is not an image).")]
    NotAnImage(String),

    #[error("No file selected.")]
    NoFile,

    #[error("The selected file is empty.")]
    Empty,

    #[error("The image is too large ({size} bytes, the limit is {limit} bytes).")]
    TooLarge { size: usize, limit: usize },

    #[error("No image found in clipboard.")]
    NoImageInClipboard,

    #[error("Clipboard access was denied. Try pressing Ctrl+V (Cmd+V on Mac) to paste instead.")]
    ClipboardDenied { reason: String },

    #[error("Reading images from the clipboard is not supported here. Try pressing Ctrl+V (Cmd+V on Mac) to paste instead.")]
    ClipboardUnsupported,

    #[error("Failed to read file: {0}")]
    FileRead(String),

    #[error("Could not preview the image: {0}")]
    Preview(String),
}

/// Why a submission did not produce a location.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    /// The request never got an HTTP answer.
    #[error("Could not reach the server. Please check your connection and try again.")]
    Transport(String),

    /// Non-2xx with a message in the body; shown verbatim.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// Non-2xx without a usable message.
    #[error("Server Error: {0}")]
    Status(u16),

    /// 2xx whose body is not a valid location.
    #[error("The server returned an unexpected response.")]
    Malformed(String),
}
