/// Separator written after every extracted segment.
pub const SEGMENT_SEPARATOR: &str = "\n\n";

/// Aggregated source text handed to the generation step. Segments appear in
/// the order they were pushed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Corpus {
    text: String,
    segments: usize,
}

impl Corpus {
    pub fn push_segment(&mut self, segment: &str) {
        self.text.push_str(segment);
        self.text.push_str(SEGMENT_SEPARATOR);
        self.segments += 1;
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn segment_count(&self) -> usize {
        self.segments
    }

    /// True when there is nothing worth sending to the generator.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}
