/// Example reply in the exact shape the generation prompt asks for.
pub const RESPONSE_JSON: &str = include_str!("../../resources/response.json");

pub const QUIZ_GENERATION_PROMPT: &str = r#"Text:
{text}

You are an expert MCQ maker. Given the above text, it is your job to create a quiz of {number} multiple choice questions for {subject} students in {tone} tone.
Make sure the questions are not repeated and check all the questions to be conforming the text as well.
Every question must have exactly four choices labelled A, B, C and D, and exactly one correct label.

## OUTPUT FORMAT

Return ONLY a JSON object formatted like RESPONSE_JSON below and use it as a guide:
- keys are the question numbers as strings, starting at "1"
- "question" holds the question text
- "choices" maps each label A, B, C, D to the choice text
- "correct" holds the label of the correct choice

Do not wrap the JSON in markdown code blocks and do not add any commentary before or after it.
Ensure to make {number} MCQs.

### RESPONSE_JSON
{response_json}

### RESPONSE_SCHEMA
{response_schema}
"#;

pub const QUIZ_REVIEW_PROMPT: &str = r#"You are an expert english grammarian and writer. Given a Multiple Choice Quiz for {subject} students, generated from the source text below.
You need to evaluate the complexity of the quiz and give a complete analysis of whether the students will be able to understand the questions and answer them. Only use at max 50 words for the complexity analysis.
Then go through every question, judge its difficulty, clarity and grammar, and finish it with a verdict of PASS or REVISE.
If a question is not at par with the cognitive and analytical abilities of the students, suggest an updated wording and tone that perfectly fits the student abilities.

Source text:
{text}

Quiz_MCQ:
{quiz}

Check from an expert English Writer of the above quiz:
"#;
