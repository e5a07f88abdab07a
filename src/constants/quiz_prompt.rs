pub const INSUFFICIENT_CONTENT_MESSAGE: &str =
    "The material does not contain enough information to create a quiz.";

pub const QUIZ_TASK_INSTRUCTION: &str =
    "Create quiz questions based on the #Source material below.";

pub const SOURCE_ONLY_RULE: &str = "Use ONLY the text under #Source material as your source of information. Do not rely on anything else you know, beyond what is needed to phrase the questions.";

pub const OUTPUT_CONTRACT_RULES: &str = "- Respond with JSON only, and follow the array structure below STRICTLY.
- Every question must contain \"quizID\", \"format\", \"questionText\", \"answer\" and \"explanation\". \"choice\" questions also contain \"options\".
- \"quizID\" must be q001, q002, q003, ... in order.
- \"format\" must be \"choice\" or \"write\".
- \"questionText\" must not contain phrases such as \"according to the source material\" or \"in the text\".
- \"options\" is used only when \"format\" is \"choice\"; leave it out for \"write\" questions.
- When \"format\" is \"choice\", \"answer\" must be copied exactly from one of the \"options\".
- \"explanation\" briefly explains why the answer is correct. Do not add citation markers such as \"[1]\".";

pub const CHOICE_RULES: &str = "- Multiple-choice (\"choice\") questions: write plausible but clearly wrong distractors. Four options is typical, but choose the number of options that suits each question rather than always using four.";

pub const WRITE_RULES: &str = "- Free-response (\"write\") questions are graded by exact string match, with no normalisation. Phrase each one so that exactly ONE literal answer is correct: a single word, number, name or tightly constrained phrase.
- Never ask open-ended questions that could be answered in several ways.
  Bad: \"Why was the treaty important?\"
  Good: \"In which year was the treaty signed?\"";

pub const NO_PREFERENCE: &str = "No preference.";
