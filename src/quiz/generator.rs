//! Quiz orchestration: select, build, retry.

use rand::Rng;
use rusqlite::Connection;
use tracing::{debug, info};

use super::builders::QuestionBuilder;
use super::context::{QuizContext, QuizExclusions};
use super::error::{BuildError, QuizError};
use super::selector::choose_question_type;
use crate::config::{self, QuizSettings};
use crate::domain::{QuestionType, QuizQuestion};

/// Check a requested quiz length against the offered lengths and the dataset
pub fn validate_question_count(requested: usize, available: usize) -> Result<(), QuizError> {
  if !config::QUESTION_COUNT_CHOICES.contains(&requested) {
    return Err(QuizError::InvalidQuestionCount { requested });
  }
  if requested > available {
    return Err(QuizError::NotEnoughItems { requested, available });
  }
  Ok(())
}

/// Types the dataset can never satisfy become a translation question
fn resolve_question_type(
  context: &QuizContext,
  selected: QuestionType,
  include_audio: bool,
) -> QuestionType {
  if context.is_feasible(selected, include_audio) {
    selected
  } else {
    debug!("{} is not possible with this dataset", selected.as_str());
    QuestionType::JyutpingToEnglish
  }
}

/// Generate `question_count` questions, or none at all.
///
/// Each slot re-selects a question type whenever the chosen one runs out of
/// candidates, up to `settings.max_attempts` times. Database errors abort
/// immediately.
pub fn generate_quiz<R: Rng + ?Sized>(
  conn: &Connection,
  rng: &mut R,
  settings: &QuizSettings,
  question_count: usize,
  include_audio: bool,
) -> Result<Vec<QuizQuestion>, QuizError> {
  let context = QuizContext::load(conn)?;
  let mut exclusions = QuizExclusions::new();
  let mut questions = Vec::with_capacity(question_count);

  for slot in 0..question_count {
    let question = generate_question(conn, rng, settings, &context, &mut exclusions, include_audio)
      .inspect_err(|e| debug!("Quiz generation stopped at question {}: {}", slot + 1, e))?;
    questions.push(question);
  }

  info!(
    "Generated quiz of {} questions (audio: {})",
    questions.len(),
    include_audio
  );
  Ok(questions)
}

fn generate_question<R: Rng + ?Sized>(
  conn: &Connection,
  rng: &mut R,
  settings: &QuizSettings,
  context: &QuizContext,
  exclusions: &mut QuizExclusions,
  include_audio: bool,
) -> Result<QuizQuestion, QuizError> {
  let counts = context.selector_counts();
  let max_attempts = settings.max_attempts.max(1);

  for attempt in 1..=max_attempts {
    let selected = choose_question_type(rng, &settings.selector, &counts, include_audio);
    let question_type = resolve_question_type(context, selected, include_audio);

    match QuestionBuilder::new(conn, rng, context, exclusions, include_audio).build(question_type) {
      Ok(question) => return Ok(question),
      Err(BuildError::EmptyCandidatePool(reason)) => {
        debug!(
          "Attempt {}/{}: {} has no candidates ({})",
          attempt,
          max_attempts,
          question_type.as_str(),
          reason
        );
      }
      Err(BuildError::Database(e)) => return Err(QuizError::Database(e)),
    }
  }

  Err(QuizError::GenerationFailed {
    attempts: max_attempts,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Answer;
  use crate::quiz::builders::test_support::assert_question_shape;
  use crate::testing::TestEnv;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use std::collections::HashSet;

  fn generate(env: &TestEnv, seed: u64, count: usize, include_audio: bool) -> Result<Vec<QuizQuestion>, QuizError> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_quiz(&env.conn, &mut rng, &QuizSettings::default(), count, include_audio)
  }

  /// Three topics of words, two of them recorded with three words per tone,
  /// and a few related sentences
  fn mixed_dataset(env: &TestEnv) {
    env.food_words(8);
    let recorded = [
      (
        "Numbers",
        vec![
          ("jat1", "one"),
          ("ji6", "two"),
          ("saam1", "three"),
          ("sei3", "four"),
          ("ng5", "five"),
          ("luk6", "six"),
          ("cat1", "seven"),
          ("baat3", "eight"),
          ("gau2", "nine"),
          ("sap6", "ten"),
        ],
      ),
      (
        "Everyday",
        vec![
          ("hou2", "good"),
          ("zau2", "wine"),
          ("heoi3", "go"),
          ("lei4", "come"),
          ("haang4", "walk"),
          ("cin4", "money"),
          ("ngo5", "I"),
          ("maai5", "buy"),
        ],
      ),
    ];
    for (topic_name, words) in recorded {
      let topic = env.topic(topic_name);
      for (jyutping, english) in words {
        env.word_with_audio(topic, jyutping, english, &format!("{}.mp3", jyutping));
      }
    }

    let phrases = env.topic("Phrases");
    let greeting = env.sentence(phrases, "nei5 hou2 maa3?", "how are you?");
    let fine = env.sentence(phrases, "ngo5 hou2 hou2", "I'm very well");
    let eaten = env.sentence(phrases, "sik6 zo2 faan6 mei6?", "have you eaten?");
    let yes = env.sentence(phrases, "sik6 zo2 laa3", "yes, I have eaten");
    env.sentence(phrases, "keoi5 sik6 faan6", "he eats rice");
    env.sentence(phrases, "ngo5 zung1 ji3 jam2 caa4", "I like drinking tea");
    env.respond(fine, greeting);
    env.respond(yes, eaten);
  }

  #[test]
  fn test_validate_question_count() {
    assert!(validate_question_count(10, 10).is_ok());
    assert!(validate_question_count(50, 200).is_ok());
    assert!(matches!(
      validate_question_count(12, 100),
      Err(QuizError::InvalidQuestionCount { requested: 12 })
    ));
    assert!(matches!(
      validate_question_count(25, 24),
      Err(QuizError::NotEnoughItems { requested: 25, available: 24 })
    ));
  }

  #[test]
  fn test_four_words_yield_translation_questions() {
    let env = TestEnv::new().unwrap();
    env.food_words(4);
    for seed in 0..20 {
      let questions = generate(&env, seed, 3, false).unwrap();
      assert_eq!(questions.len(), 3);
      assert!(questions.iter().all(|q| q.question_type.is_translation()));
    }
  }

  #[test]
  fn test_two_words_fail_generation() {
    let env = TestEnv::new().unwrap();
    env.food_words(2);
    for seed in 0..5 {
      let result = generate(&env, seed, 1, true);
      assert!(matches!(result, Err(QuizError::GenerationFailed { attempts: 5 })));
    }
  }

  #[test]
  fn test_empty_database_fails_generation() {
    let env = TestEnv::new().unwrap();
    assert!(matches!(generate(&env, 0, 1, false), Err(QuizError::GenerationFailed { .. })));
  }

  #[test]
  fn test_zero_questions() {
    let env = TestEnv::new().unwrap();
    assert!(generate(&env, 0, 0, false).unwrap().is_empty());
  }

  #[test]
  fn test_same_seed_same_quiz() {
    let env = TestEnv::new().unwrap();
    mixed_dataset(&env);
    let first = generate(&env, 42, 10, true).unwrap();
    let second = generate(&env, 42, 10, true).unwrap();
    assert_eq!(first, second);
  }

  #[test]
  fn test_mixed_dataset_quiz() {
    let env = TestEnv::new().unwrap();
    mixed_dataset(&env);

    for seed in 0..10 {
      let questions = generate(&env, seed, 10, true).unwrap();
      assert_eq!(questions.len(), 10);

      // No prompt repeats within a quiz
      let prompts: Vec<&str> = questions
        .iter()
        .filter(|q| q.question_type.is_translation())
        .filter_map(|q| q.prompt.as_deref())
        .collect();
      let unique: HashSet<&str> = prompts.iter().copied().collect();
      assert_eq!(prompts.len(), unique.len());

      for question in &questions {
        assert_question_shape(question);
        if question.question_type == QuestionType::WordOrder {
          assert!(matches!(question.answer, Answer::Ordered(_)));
        }
      }
    }
  }

  #[test]
  fn test_audio_disabled_never_asks_audio_questions() {
    let env = TestEnv::new().unwrap();
    mixed_dataset(&env);
    for seed in 0..10 {
      let questions = generate(&env, seed, 10, false).unwrap();
      assert!(questions.iter().all(|q| !q.question_type.needs_audio()));
    }
  }

  #[test]
  fn test_audio_requested_without_recordings() {
    let env = TestEnv::new().unwrap();
    env.food_words(8);
    let phrases = env.topic("Phrases");
    env.sentence(phrases, "keoi5 sik6 faan6", "he eats rice");

    for seed in 0..10 {
      let questions = generate(&env, seed, 5, true).unwrap();
      assert_eq!(questions.len(), 5);
      assert!(questions.iter().all(|q| !q.question_type.needs_audio()));
    }
  }

  #[test]
  fn test_max_attempts_is_configurable() {
    let env = TestEnv::new().unwrap();
    env.food_words(2);
    let settings = QuizSettings {
      max_attempts: 2,
      ..QuizSettings::default()
    };
    let mut rng = StdRng::seed_from_u64(0);
    let result = generate_quiz(&env.conn, &mut rng, &settings, 1, false);
    assert!(matches!(result, Err(QuizError::GenerationFailed { attempts: 2 })));
  }
}
