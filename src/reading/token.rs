/// A fixed multi-word phrase that starts at a token and is displayed as one unit.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Collocation {
    /// The original (unnormalized) words of the phrase, in reading order.
    pub words: Vec<String>,
}

impl Collocation {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The phrase as it is shown on screen.
    pub fn display_text(&self) -> String {
        self.words.join(" ")
    }
}

/// Token struct for RSVP reading
///
/// Produced once per loaded document; `global_index` is the cursor's source of truth.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    /// The word exactly as it appeared in the text, punctuation included.
    pub text: String,
    pub global_index: usize,
    pub paragraph_index: usize,
    pub position_in_paragraph: usize,
    pub is_last_in_paragraph: bool,
    pub is_last_overall: bool,
    /// Indicates if this token starts a new sentence.
    pub is_sentence_start: bool,
    pub collocation: Option<Collocation>,
}

impl Token {
    pub fn starts_collocation(&self) -> bool {
        self.collocation.is_some()
    }
}
