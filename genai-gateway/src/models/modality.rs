/// Input modality served by one gateway route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Text,
    Image,
    Document,
    Audio,
}

impl Modality {
    /// Fixed message returned to clients on any failure.
    pub fn error_message(self) -> &'static str {
        match self {
            Modality::Text => "An error occurred while generating text.",
            Modality::Image => "An error occurred while generating text from image.",
            Modality::Document => "An error occurred while generating text from document.",
            Modality::Audio => "An error occurred while generating text from audio.",
        }
    }

    /// Multipart field carrying the uploaded file, if the modality takes one.
    pub fn file_field(self) -> Option<&'static str> {
        match self {
            Modality::Text => None,
            Modality::Image => Some("image"),
            Modality::Document => Some("document"),
            Modality::Audio => Some("audio"),
        }
    }

    /// Instruction sent when the client supplies no prompt.
    ///
    /// `None` means the prompt is mandatory.
    pub fn default_prompt(self) -> Option<&'static str> {
        match self {
            Modality::Text | Modality::Image => None,
            Modality::Document => Some("Analyze this document: "),
            Modality::Audio => Some("Analyze this audio: "),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Image => "image",
            Modality::Document => "document",
            Modality::Audio => "audio",
        }
    }
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
