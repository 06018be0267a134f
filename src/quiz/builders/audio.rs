use rand::Rng;
use rand::seq::IndexedRandom;

use super::{audio_option, QuestionBuilder};
use crate::db::{ItemFilter, TokenCount};
use crate::domain::{Answer, Item, ItemKind, QuestionType, QuizOption, QuizQuestion, Word};
use crate::quiz::error::BuildError;
use crate::quiz::jyutping::{self, TONES};
use crate::quiz::sampler;

impl<R: Rng + ?Sized> QuestionBuilder<'_, R> {
  /// Unused single syllable word with a recording
  fn audio_prompt(&mut self) -> Result<Word, BuildError> {
    let filter = ItemFilter::new()
      .excluding_ids(self.exclusions.word_ids())
      .audio_only(true)
      .tokens(TokenCount::Single);
    sampler::random_word(self.conn, self.rng, &filter)
  }

  pub(super) fn audio_to_tone(&mut self) -> Result<QuizQuestion, BuildError> {
    let word = self.audio_prompt()?;
    let tone = jyutping::final_tone(&word.jyutping).ok_or(BuildError::EmptyCandidatePool("toned words"))?;

    let other_tones: Vec<char> = TONES.iter().copied().filter(|t| *t != tone).collect();
    let mut options = vec![QuizOption::text(tone.to_string(), true)];
    options.extend(
      other_tones
        .choose_multiple(self.rng, 3)
        .map(|t| QuizOption::text(t.to_string(), false)),
    );
    let options = self.shuffled(options);

    let audio = word.audio_file.clone();
    self.record_prompt(&Item::from(word));
    Ok(
      QuizQuestion::new(
        QuestionType::AudioToTone,
        "Which tone do you hear?",
        Answer::Single(tone.to_string()),
      )
      .with_audio(audio)
      .with_options(options),
    )
  }

  /// Three recordings carry a tone, the answer is the one that does not
  pub(super) fn audio_to_not_tone(&mut self) -> Result<QuizQuestion, BuildError> {
    let word = Item::from(self.audio_prompt()?);
    let absent = jyutping::absent_tones(word.jyutping());
    let tone = *absent
      .choose(self.rng)
      .ok_or(BuildError::EmptyCandidatePool("tones absent from the word"))?;

    let base = ItemFilter::new()
      .audio_only(true)
      .tokens(TokenCount::Single)
      .with_tone(tone);
    let distractors = sampler::incorrect_items(self.conn, self.rng, Some(&word), ItemKind::Word, &base)?;

    let mut options = vec![audio_option(&word, true)];
    options.extend(distractors.iter().map(|d| audio_option(d, false)));
    let options = self.shuffled(options);

    self.record_prompt(&word);
    Ok(
      QuizQuestion::new(
        QuestionType::AudioToNotTone,
        format!("Which word is not tone {}?", tone),
        Answer::Single(word.jyutping().to_string()),
      )
      .with_options(options),
    )
  }
}
