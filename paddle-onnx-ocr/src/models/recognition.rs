use serde::{Deserialize, Serialize};

use crate::error::{FailureKind, OcrError};

/// One unit of work submitted by the host
#[derive(Debug, Clone, Default)]
pub struct RecognitionRequest {
    pub image_data: Vec<u8>,
}

impl RecognitionRequest {
    pub fn new(image_data: impl Into<Vec<u8>>) -> Self {
        Self {
            image_data: image_data.into(),
        }
    }
}

/// One vertex of a text region's bounding quadrilateral, in source pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoxPoint {
    pub x: f32,
    pub y: f32,
}

impl BoxPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One detected and recognized line of text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TextBlock {
    pub text: String,
    pub box_points: Vec<BoxPoint>,
}

/// Outcome handed back to the host.
///
/// Serializes as `success`, `text_blocks` and `error_message`. The failure
/// category is kept out of the wire schema and exposed via [`failure_kind`].
///
/// [`failure_kind`]: RecognitionResult::failure_kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RecognitionResult {
    pub success: bool,
    pub text_blocks: Vec<TextBlock>,
    pub error_message: String,
    #[serde(skip)]
    failure: Option<FailureKind>,
}

impl RecognitionResult {
    pub fn success(text_blocks: Vec<TextBlock>) -> Self {
        Self {
            success: true,
            text_blocks,
            error_message: String::new(),
            failure: None,
        }
    }

    pub fn failure(error: &OcrError) -> Self {
        Self {
            success: false,
            text_blocks: Vec::new(),
            error_message: error.to_string(),
            failure: Some(error.kind()),
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure
    }

    /// Recognized lines joined with newlines, in detection order
    pub fn text(&self) -> String {
        self.text_blocks
            .iter()
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
