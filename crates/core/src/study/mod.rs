mod navigator;
mod score;

pub use navigator::{NavigatorError, StudyNavigator};
pub use score::{AnswerStatus, Score};
