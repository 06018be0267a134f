use rand::Rng;

use super::{english_option, jyutping_option, QuestionBuilder};
use crate::db::{self, ItemFilter};
use crate::domain::{Answer, Item, QuestionType, QuizOption, QuizQuestion};
use crate::quiz::error::BuildError;
use crate::quiz::sampler;

impl<R: Rng + ?Sized> QuestionBuilder<'_, R> {
  /// Any unused word or sentence, with three distractors of the same kind
  fn translation_prompt(&mut self) -> Result<(Item, Vec<Item>), BuildError> {
    let word_ids = self.exclusions.word_ids();
    let sentence_ids = self.exclusions.sentence_ids();
    let prompt = sampler::random_word_or_sentence(self.conn, self.rng, &word_ids, &sentence_ids)?;
    let distractors =
      sampler::incorrect_items(self.conn, self.rng, Some(&prompt), prompt.kind(), &ItemFilter::new())?;
    Ok((prompt, distractors))
  }

  fn translation_options(
    &mut self,
    prompt: &Item,
    distractors: &[Item],
    to_option: fn(&Item, bool) -> QuizOption,
  ) -> Vec<QuizOption> {
    let mut options = vec![to_option(prompt, true)];
    options.extend(distractors.iter().map(|d| to_option(d, false)));
    self.shuffled(options)
  }

  fn prompt_audio(&self, prompt: &Item) -> Option<String> {
    prompt.audio().filter(|_| self.include_audio).map(str::to_string)
  }

  pub(super) fn jyutping_to_english(&mut self) -> Result<QuizQuestion, BuildError> {
    let (prompt, distractors) = self.translation_prompt()?;
    let options = self.translation_options(&prompt, &distractors, english_option);
    let audio = self.prompt_audio(&prompt);

    self.record_prompt(&prompt);
    Ok(
      QuizQuestion::new(
        QuestionType::JyutpingToEnglish,
        format!("What does this {} mean?", prompt.kind().as_str()),
        Answer::Single(prompt.english().to_string()),
      )
      .with_prompt(prompt.jyutping())
      .with_hint(prompt.cantonese())
      .with_audio(audio)
      .with_options(options),
    )
  }

  pub(super) fn english_to_jyutping(&mut self) -> Result<QuizQuestion, BuildError> {
    let (prompt, distractors) = self.translation_prompt()?;
    let options = self.translation_options(&prompt, &distractors, jyutping_option);

    self.record_prompt(&prompt);
    Ok(
      QuizQuestion::new(
        QuestionType::EnglishToJyutping,
        "How do you say this in Cantonese?",
        Answer::Single(prompt.jyutping().to_string()),
      )
      .with_prompt(prompt.english())
      .with_options(options),
    )
  }

  /// Free text, any transcription sharing the prompt's gloss is accepted.
  ///
  /// Drawn like the button variants, so it needs the same distractor pool
  /// even though the distractors are not shown.
  pub(super) fn english_to_jyutping_text(&mut self) -> Result<QuizQuestion, BuildError> {
    let (prompt, _) = self.translation_prompt()?;
    let accepted = db::jyutping_for_english(self.conn, prompt.english())?;

    self.record_prompt(&prompt);
    Ok(
      QuizQuestion::new(
        QuestionType::EnglishToJyutpingText,
        "Type this in jyutping.",
        Answer::AnyOf(accepted),
      )
      .with_prompt(prompt.english()),
    )
  }
}
