use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use super::{jyutping_option, QuestionBuilder};
use crate::db::{self, ItemFilter};
use crate::domain::{Answer, Item, ItemKind, QuestionType, QuizQuestion, Sentence};
use crate::quiz::context::ResponseDirection;
use crate::quiz::error::BuildError;
use crate::quiz::sampler;

fn question_text(direction: ResponseDirection) -> &'static str {
  match direction {
    ResponseDirection::Responses => "Which sentence is a reply to this?",
    ResponseDirection::ResponseTo => "Which sentence could this be a reply to?",
  }
}

impl<R: Rng + ?Sized> QuestionBuilder<'_, R> {
  /// An eligible prompt sentence with everything on the other side of the
  /// relation, or `None` when no sentence qualifies
  fn response_prompt(
    &mut self,
    direction: ResponseDirection,
  ) -> Result<Option<(Sentence, Vec<Sentence>)>, BuildError> {
    let eligible = self.context.eligible_response_prompts(direction, self.exclusions);
    let Some(&id) = eligible.choose(self.rng) else {
      return Ok(None);
    };
    let prompt = db::get_sentence(self.conn, id)?
      .ok_or(BuildError::EmptyCandidatePool("response prompts"))?;
    let related = match direction {
      ResponseDirection::Responses => db::get_responses(self.conn, id)?,
      ResponseDirection::ResponseTo => db::get_response_to(self.conn, id)?,
    };
    if related.is_empty() {
      return Err(BuildError::EmptyCandidatePool("related sentences"));
    }
    Ok(Some((prompt, related)))
  }

  fn response_buttons_for(
    &mut self,
    question_type: QuestionType,
    direction: ResponseDirection,
  ) -> Result<QuizQuestion, BuildError> {
    let Some((prompt, related)) = self.response_prompt(direction)? else {
      debug!("No eligible prompt for {}, asking a translation", question_type.as_str());
      return self.jyutping_to_english();
    };

    let answer = related
      .choose(self.rng)
      .cloned()
      .map(Item::from)
      .ok_or(BuildError::EmptyCandidatePool("related sentences"))?;
    let base = ItemFilter::new().excluding_ids(related.iter().map(|s| s.id).chain([prompt.id]));
    let distractors =
      sampler::incorrect_items(self.conn, self.rng, Some(&answer), ItemKind::Sentence, &base)?;

    let mut options = vec![jyutping_option(&answer, true)];
    options.extend(distractors.iter().map(|d| jyutping_option(d, false)));
    let options = self.shuffled(options);

    let prompt = Item::from(prompt);
    self.record_prompt(&prompt);
    Ok(
      QuizQuestion::new(
        question_type,
        question_text(direction),
        Answer::Single(answer.jyutping().to_string()),
      )
      .with_prompt(prompt.jyutping())
      .with_hint(Some(prompt.english()))
      .with_options(options),
    )
  }

  /// Free text, any sentence on the other side of the relation is accepted
  fn response_text_for(
    &mut self,
    question_type: QuestionType,
    direction: ResponseDirection,
  ) -> Result<QuizQuestion, BuildError> {
    let Some((prompt, related)) = self.response_prompt(direction)? else {
      debug!("No eligible prompt for {}, asking a translation", question_type.as_str());
      return self.jyutping_to_english();
    };

    let accepted = related.into_iter().map(|s| s.jyutping).collect();
    let prompt = Item::from(prompt);
    self.record_prompt(&prompt);
    Ok(
      QuizQuestion::new(question_type, question_text(direction), Answer::AnyOf(accepted))
        .with_prompt(prompt.jyutping())
        .with_hint(Some(prompt.english())),
    )
  }

  pub(super) fn response_buttons(&mut self) -> Result<QuizQuestion, BuildError> {
    self.response_buttons_for(QuestionType::ResponseButtons, ResponseDirection::Responses)
  }

  pub(super) fn response_text(&mut self) -> Result<QuizQuestion, BuildError> {
    self.response_text_for(QuestionType::ResponseText, ResponseDirection::Responses)
  }

  pub(super) fn response_to_buttons(&mut self) -> Result<QuizQuestion, BuildError> {
    self.response_buttons_for(QuestionType::ResponseToButtons, ResponseDirection::ResponseTo)
  }

  pub(super) fn response_to_text(&mut self) -> Result<QuizQuestion, BuildError> {
    self.response_text_for(QuestionType::ResponseToText, ResponseDirection::ResponseTo)
  }
}
