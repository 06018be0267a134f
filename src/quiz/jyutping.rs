//! Helpers for jyutping strings: tones, tokens and blanks.
//!
//! Jyutping marks the tone of each syllable with a trailing digit 1-6,
//! syllables are separated by whitespace.

/// All Cantonese tone markers
pub const TONES: [char; 6] = ['1', '2', '3', '4', '5', '6'];

/// Tone of the last syllable, if it carries a tone marker
pub fn final_tone(jyutping: &str) -> Option<char> {
  jyutping
    .trim()
    .trim_end_matches('?')
    .chars()
    .last()
    .filter(|c| TONES.contains(c))
}

/// Tones that appear in no syllable of `jyutping`
pub fn absent_tones(jyutping: &str) -> Vec<char> {
  TONES
    .iter()
    .copied()
    .filter(|tone| !jyutping.contains(*tone))
    .collect()
}

/// A sentence split into syllables, remembering whether it was a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceTokens {
  pub tokens: Vec<String>,
  pub question_mark: bool,
}

impl SentenceTokens {
  pub fn parse(jyutping: &str) -> Self {
    let trimmed = jyutping.trim();
    let (body, question_mark) = match trimmed.strip_suffix('?') {
      Some(body) => (body, true),
      None => (trimmed, false),
    };
    Self {
      tokens: body.split_whitespace().map(str::to_string).collect(),
      question_mark,
    }
  }

  /// Render the sentence with the token at `index` replaced by `_`
  pub fn with_blank(&self, index: usize) -> String {
    let mut rendered = self
      .tokens
      .iter()
      .enumerate()
      .map(|(i, token)| if i == index { "_" } else { token.as_str() })
      .collect::<Vec<_>>()
      .join(" ");
    if self.question_mark {
      rendered.push('?');
    }
    rendered
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_final_tone() {
    assert_eq!(final_tone("faan6"), Some('6'));
    assert_eq!(final_tone("ngau4 juk6"), Some('6'));
    assert_eq!(final_tone("nei5 hou2 maa3?"), Some('3'));
    assert_eq!(final_tone("hello"), None);
    assert_eq!(final_tone(""), None);
  }

  #[test]
  fn test_absent_tones() {
    assert_eq!(absent_tones("faan6"), vec!['1', '2', '3', '4', '5']);
    assert_eq!(absent_tones("si1 si2 si3 si4 si5 si6"), Vec::<char>::new());
  }

  #[test]
  fn test_parse_plain_sentence() {
    let tokens = SentenceTokens::parse("keoi5 sik6 faan6");
    assert_eq!(tokens.tokens, vec!["keoi5", "sik6", "faan6"]);
    assert!(!tokens.question_mark);
  }

  #[test]
  fn test_parse_question() {
    let tokens = SentenceTokens::parse("nei5 hou2 maa3?");
    assert_eq!(tokens.tokens, vec!["nei5", "hou2", "maa3"]);
    assert!(tokens.question_mark);

    // Detached question mark
    let tokens = SentenceTokens::parse("nei5 hou2 maa3 ?");
    assert_eq!(tokens.tokens, vec!["nei5", "hou2", "maa3"]);
    assert_eq!(SentenceTokens::parse("hai6 ?").tokens, vec!["hai6"]);
  }

  #[test]
  fn test_blank_rendering() {
    let tokens = SentenceTokens::parse("keoi5 sik6 faan6");
    assert_eq!(tokens.with_blank(1), "keoi5 _ faan6");
    assert_eq!(tokens.tokens[1], "sik6");

    let question = SentenceTokens::parse("nei5 hou2 maa3?");
    assert_eq!(question.with_blank(2), "nei5 hou2 _?");
  }
}
