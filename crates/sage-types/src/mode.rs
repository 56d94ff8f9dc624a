use serde::{Deserialize, Serialize};

/// How thorough an answer the tutor should give. Maps onto the upstream
/// `student_level` knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerMode {
    Easy,
    Intermediate,
    Advanced,
}

impl Default for AnswerMode {
    fn default() -> Self {
        AnswerMode::Intermediate
    }
}

impl AnswerMode {
    /// The upstream service expects 0.4 / 0.6 / 1.0 for the three modes.
    pub fn student_level(self) -> f64 {
        match self {
            AnswerMode::Easy => 0.4,
            AnswerMode::Intermediate => 0.6,
            AnswerMode::Advanced => 1.0,
        }
    }
}
