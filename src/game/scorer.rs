pub struct Scorer;

impl Scorer {
    /// Points for a word of `length` letters (the Qu tile counts as two).
    ///
    /// - 0 to 2 letters: 0
    /// - 3 or 4 letters: 1
    /// - 5 letters: 2
    /// - 6 letters: 3
    /// - 7 letters: 5
    /// - 8 or more: 11
    pub fn word_score(length: usize) -> u32 {
        match length {
            0..=2 => 0,
            3 | 4 => 1,
            5 => 2,
            6 => 3,
            7 => 5,
            _ => 11,
        }
    }
}
