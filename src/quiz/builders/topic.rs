use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use super::{audio_option, jyutping_option, QuestionBuilder};
use crate::config;
use crate::db::{self, ItemFilter};
use crate::domain::{Answer, Item, ItemKind, QuestionType, QuizOption, QuizQuestion};
use crate::quiz::error::BuildError;
use crate::quiz::sampler;

impl<R: Rng + ?Sized> QuestionBuilder<'_, R> {
  /// Unused word outside the topic
  fn topic_outsider(&mut self, topic_word_ids: &[i64], audio_only: bool) -> Result<Item, BuildError> {
    let filter = ItemFilter::new()
      .excluding_ids(topic_word_ids.iter().copied())
      .excluding_ids(self.exclusions.word_ids())
      .audio_only(audio_only);
    Ok(Item::from(sampler::random_word(self.conn, self.rng, &filter)?))
  }

  /// Three words from one topic and one from elsewhere; pick the outsider.
  ///
  /// Presented as recordings only when audio is allowed, the topic has
  /// enough recorded words to fill the distractors and a recorded outsider
  /// exists.
  pub(super) fn topic_excluded_word(&mut self) -> Result<QuizQuestion, BuildError> {
    let word_count = self.context.word_count;
    let topics: Vec<_> = db::topics_with_min_words(self.conn, config::MIN_TOPIC_WORDS)?
      .into_iter()
      .filter(|t| t.word_count < word_count)
      .collect();
    let topic = topics
      .choose(self.rng)
      .ok_or(BuildError::EmptyCandidatePool("topics with enough words"))?;

    let mut audio_mode = self.include_audio
      && topic.audio_word_count >= config::MIN_TOPIC_WORDS
      && self.context.audio_words > topic.audio_word_count
      && self.rng.random_bool(0.5);

    let topic_word_ids = db::topic_word_ids(self.conn, topic.topic.id)?;
    let outsider = match self.topic_outsider(&topic_word_ids, audio_mode) {
      // Recorded outsiders may all be used up late in a quiz
      Err(BuildError::EmptyCandidatePool(_)) if audio_mode => {
        debug!("No unused recorded word outside \"{}\", asking in text", topic.topic.topic_name);
        audio_mode = false;
        self.topic_outsider(&topic_word_ids, false)?
      }
      result => result?,
    };

    let topic_filter = ItemFilter::new().in_topic(topic.topic.id).audio_only(audio_mode);
    let distractors =
      sampler::incorrect_items(self.conn, self.rng, Some(&outsider), ItemKind::Word, &topic_filter)?;

    let to_option: fn(&Item, bool) -> QuizOption = if audio_mode { audio_option } else { jyutping_option };
    let mut options = vec![to_option(&outsider, true)];
    options.extend(distractors.iter().map(|d| to_option(d, false)));
    let options = self.shuffled(options);

    let question = format!("Which word is not in the topic \"{}\"?", topic.topic.topic_name);
    self.record_prompt(&outsider);
    Ok(
      QuizQuestion::new(
        QuestionType::TopicExcludedWord,
        question,
        Answer::Single(outsider.jyutping().to_string()),
      )
      .with_options(options),
    )
  }
}
