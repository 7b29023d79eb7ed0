//! Pattern-label generation port trait.

/// Supplies cosmetic per-step labels. Labels are attached once at step
/// creation and never participate in the arithmetic; keeping the generator
/// behind a trait keeps randomness out of the engine.
pub trait LabelSource {
    fn next_label(&mut self) -> String;

    fn take_labels(&mut self, count: usize) -> Vec<String> {
        (0..count).map(|_| self.next_label()).collect()
    }
}
