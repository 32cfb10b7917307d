use crate::content::ResolvedContent;

pub const CORRECT_FEEDBACK: &str = "✅ Correct!";
pub const WRONG_FEEDBACK: &str = "❌ Wrong. Try again.";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Failure {
    /// The date key could not be computed; nothing was fetched.
    Date,
    /// Neither the dated nor the default folder had a usable question.
    NoQuestion,
}

#[derive(Clone, PartialEq, Debug)]
pub enum Phase {
    Loading,
    Presenting,
    /// Terminal for the page view.
    Revealed,
    Unavailable(Failure),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Selection {
    Correct,
    Wrong,
    Ignored,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OptionState {
    Open,
    Wrong,
    Correct,
    Locked,
}

/// Everything the page knows about today's question. Replaced wholesale by
/// the next load.
#[derive(Clone, PartialEq, Debug)]
pub struct QuizSession {
    phase: Phase,
    content: Option<ResolvedContent>,
    wrong: Vec<bool>,
    feedback: Option<&'static str>,
    form_open: bool,
}

impl QuizSession {
    pub fn loading() -> Self {
        Self {
            phase: Phase::Loading,
            content: None,
            wrong: Vec::new(),
            feedback: None,
            form_open: false,
        }
    }

    pub fn presenting(content: ResolvedContent) -> Self {
        Self {
            phase: Phase::Presenting,
            wrong: vec![false; content.question.options.len()],
            content: Some(content),
            feedback: None,
            form_open: false,
        }
    }

    pub fn unavailable(failure: Failure) -> Self {
        Self {
            phase: Phase::Unavailable(failure),
            ..Self::loading()
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn options(&self) -> &[String] {
        self.content
            .as_ref()
            .map(|c| c.question.options.as_slice())
            .unwrap_or_default()
    }

    pub fn feedback(&self) -> Option<&'static str> {
        self.feedback
    }

    pub fn select(&mut self, index: usize) -> Selection {
        if self.phase != Phase::Presenting || self.wrong.get(index) != Some(&false) {
            return Selection::Ignored;
        }
        let Some(content) = &self.content else {
            return Selection::Ignored;
        };

        if content.question.options[index] == content.question.correct {
            self.phase = Phase::Revealed;
            self.feedback = Some(CORRECT_FEEDBACK);
            Selection::Correct
        } else {
            self.wrong[index] = true;
            self.feedback = Some(WRONG_FEEDBACK);
            Selection::Wrong
        }
    }

    pub fn option_state(&self, index: usize) -> OptionState {
        let is_correct = self
            .content
            .as_ref()
            .and_then(|c| c.question.options.get(index).map(|o| *o == c.question.correct))
            .unwrap_or(false);

        match self.phase {
            _ if self.wrong.get(index) == Some(&true) => OptionState::Wrong,
            Phase::Presenting => OptionState::Open,
            Phase::Revealed if is_correct => OptionState::Correct,
            _ => OptionState::Locked,
        }
    }

    /// The title when there is one. The word of the day names the answer, so
    /// it only stands in for a missing title once the answer is revealed.
    pub fn heading(&self) -> Option<&str> {
        let question = &self.content.as_ref()?.question;
        match (&question.title, &question.word) {
            (Some(title), _) => Some(title.as_str()),
            (None, Some(word)) if self.phase == Phase::Revealed => Some(word.as_str()),
            _ => None,
        }
    }

    /// The question image until the answer is found, then the answer image.
    pub fn shown_image(&self) -> Option<&str> {
        let content = self.content.as_ref()?;
        match self.phase {
            Phase::Revealed => Some(content.answer_img.as_str()),
            _ => Some(content.question_img.as_str()),
        }
    }

    pub fn next_visible(&self) -> bool {
        self.phase == Phase::Revealed && !self.form_open
    }

    pub fn form_open(&self) -> bool {
        self.form_open
    }

    pub fn open_form(&mut self) -> bool {
        if self.phase != Phase::Revealed {
            return false;
        }
        self.form_open = true;
        true
    }
}
