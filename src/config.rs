use std::env;
use std::path::PathBuf;

use crate::quiz::AnswerPolicy;

const DEFAULT_QUIZ_DATA_PATH: &str = "data/quiz_data.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub quiz_data_path: PathBuf,
    pub answer_policy: AnswerPolicy,
}

impl Config {
    /// Reads the environment; `.env` should already be loaded by then.
    /// The bot token itself (`TELOXIDE_TOKEN`) is picked up by `Bot::from_env`.
    pub fn from_env() -> Self {
        let quiz_data_path = env::var("QUIZ_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_QUIZ_DATA_PATH));

        let answer_policy = env::var("QUIZ_ANSWER_POLICY")
            .map(|value| parse_answer_policy(&value))
            .unwrap_or_default();

        Self {
            quiz_data_path,
            answer_policy,
        }
    }
}

fn parse_answer_policy(value: &str) -> AnswerPolicy {
    match value.trim().to_lowercase().as_str() {
        "lenient" | "" => AnswerPolicy::Lenient,
        "strict" | "offered" => AnswerPolicy::OfferedOnly,
        other => {
            log::warn!("Unknown QUIZ_ANSWER_POLICY {:?}, falling back to lenient", other);
            AnswerPolicy::Lenient
        }
    }
}
