pub mod corpus;
pub mod generation;
pub mod quiz_item;
pub mod settings;
pub mod source;
pub use corpus::Corpus;
pub use generation::GenerationOutcome;
pub use quiz_item::{QuizFormat, QuizItem};
pub use settings::{FormatPreference, Quantity, QuizSettings};
pub use source::Source;
