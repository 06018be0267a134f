use rand::Rng;
use rand::seq::SliceRandom;

use super::QuestionBuilder;
use crate::db::{ItemFilter, TokenCount};
use crate::domain::{Answer, Item, ItemKind, QuestionType, QuizOption, QuizQuestion, Sentence};
use crate::quiz::error::BuildError;
use crate::quiz::jyutping::SentenceTokens;
use crate::quiz::sampler;

impl<R: Rng + ?Sized> QuestionBuilder<'_, R> {
  /// Unused sentence of at least two syllables
  fn multi_token_sentence(&mut self) -> Result<(Sentence, SentenceTokens), BuildError> {
    let filter = ItemFilter::new()
      .excluding_ids(self.exclusions.sentence_ids())
      .tokens(TokenCount::Multiple);
    let sentence = sampler::random_sentence(self.conn, self.rng, &filter)?;
    let tokens = SentenceTokens::parse(&sentence.jyutping);
    // Tabs are not split on by the syllable filter
    if tokens.tokens.len() < 2 {
      return Err(BuildError::EmptyCandidatePool("multi-syllable sentences"));
    }
    Ok((sentence, tokens))
  }

  fn missing_word(
    &mut self,
    question_type: QuestionType,
  ) -> Result<(QuizQuestion, Sentence, String), BuildError> {
    let (sentence, tokens) = self.multi_token_sentence()?;
    let index = self.rng.random_range(0..tokens.tokens.len());
    let missing = tokens.tokens[index].clone();

    let question = QuizQuestion::new(
      question_type,
      "Fill in the missing word.",
      Answer::Single(missing.clone()),
    )
    .with_prompt(tokens.with_blank(index))
    .with_hint(Some(sentence.english.as_str()));
    Ok((question, sentence, missing))
  }

  pub(super) fn missing_word_text(&mut self) -> Result<QuizQuestion, BuildError> {
    let (question, sentence, _) = self.missing_word(QuestionType::MissingWordText)?;
    self.record_prompt(&Item::from(sentence));
    Ok(question)
  }

  pub(super) fn missing_word_buttons(&mut self) -> Result<QuizQuestion, BuildError> {
    let (question, sentence, missing) = self.missing_word(QuestionType::MissingWordButtons)?;

    let base = ItemFilter::new()
      .tokens(TokenCount::Single)
      .excluding_jyutping(missing.clone());
    let distractors = sampler::incorrect_items(self.conn, self.rng, None, ItemKind::Word, &base)?;

    let mut options = vec![QuizOption::text(missing, true)];
    options.extend(distractors.iter().map(|d| QuizOption::text(d.jyutping(), false)));
    let options = self.shuffled(options);

    self.record_prompt(&Item::from(sentence));
    Ok(question.with_options(options))
  }

  /// Rebuild the sentence from its shuffled syllables
  pub(super) fn word_order(&mut self) -> Result<QuizQuestion, BuildError> {
    let (sentence, tokens) = self.multi_token_sentence()?;
    let mut tiles = tokens.tokens.clone();
    tiles.shuffle(self.rng);

    let prompt = sentence.english.clone();
    self.record_prompt(&Item::from(sentence));
    Ok(
      QuizQuestion::new(
        QuestionType::WordOrder,
        "Put the words in order.",
        Answer::Ordered(tokens.tokens),
      )
      .with_prompt(prompt)
      .with_tiles(tiles),
    )
  }
}
