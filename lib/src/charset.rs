use std::fmt;

/// Character list used when nothing else is configured
pub const DEFAULT_CHARACTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789&é\"'(-è_çà)=~#{[|`\\^@]}€^¨$£¤*µù%!§:/;.,?<> ";

/// Ordered list of characters allowed in the output
///
/// Order matters twice: it is the left-to-right layout of the profiling run
/// and the tie-break order when two glyphs are equally close to a target.
/// Repeats are kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharacterSet {
    chars: Vec<char>,
}

impl CharacterSet {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }

    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}

impl From<&str> for CharacterSet {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}
