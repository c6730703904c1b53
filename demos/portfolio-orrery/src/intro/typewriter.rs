//! Character-by-character reveal of the two poem lines.

pub const POEM_ZH: &str =
    "你此刻的意识，是宇宙亿万年间最珍贵的一束火花。它无法被复制，也无需永恒——它本身就已不可思议。";
pub const POEM_EN: &str = "In this instant your awareness is the rarest ember the cosmos has kindled across the eons. It cannot be copied nor long for forever\u{2014}the miracle is that it simply exists.";

/// Delay before the first character.
pub const FIRST_DELAY_MS: u32 = 320;
pub const STEP_DELAY_MS: u32 = 48;

/// State of one line after a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineReveal {
    pub text: String,
    /// Still revealing; the caret should blink.
    pub typing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterTick {
    pub zh: LineReveal,
    pub en: LineReveal,
    /// Both lines are complete; do not reschedule.
    pub done: bool,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    zh: Vec<char>,
    en: Vec<char>,
    step: usize,
}

impl Typewriter {
    pub fn new() -> Self {
        Self::with_lines(POEM_ZH, POEM_EN)
    }

    pub fn with_lines(zh: &str, en: &str) -> Self {
        Self { zh: zh.chars().collect(), en: en.chars().collect(), step: 0 }
    }

    pub fn reset(&mut self) {
        self.step = 0;
    }

    pub fn step(&self) -> usize {
        self.step
    }

    fn max_len(&self) -> usize {
        self.zh.len().max(self.en.len())
    }

    fn reveal(line: &[char], count: usize) -> LineReveal {
        let shown = count.min(line.len());
        LineReveal { text: line[..shown].iter().collect(), typing: shown < line.len() }
    }

    /// Reveal one more character of each line.
    pub fn tick(&mut self) -> TypewriterTick {
        let count = self.step + 1;
        self.step += 1;
        if self.step > self.max_len() {
            return self.finish();
        }
        TypewriterTick {
            zh: Self::reveal(&self.zh, count),
            en: Self::reveal(&self.en, count),
            done: false,
        }
    }

    /// Jump to the full lines.
    pub fn finish(&mut self) -> TypewriterTick {
        self.step = self.max_len() + 1;
        TypewriterTick {
            zh: LineReveal { text: self.zh.iter().collect(), typing: false },
            en: LineReveal { text: self.en.iter().collect(), typing: false },
            done: true,
        }
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_one_scalar_per_tick() {
        let mut tw = Typewriter::with_lines("你好", "hey");
        let first = tw.tick();
        assert_eq!(first.zh.text, "你");
        assert_eq!(first.en.text, "h");
        assert!(first.zh.typing && first.en.typing);
        assert!(!first.done);
    }

    #[test]
    fn shorter_line_stops_typing_first() {
        let mut tw = Typewriter::with_lines("你好", "hey");
        tw.tick();
        let second = tw.tick();
        assert_eq!(second.zh.text, "你好");
        assert!(!second.zh.typing);
        assert!(second.en.typing);
    }

    #[test]
    fn completes_after_longest_line() {
        let mut tw = Typewriter::with_lines("ab", "abcd");
        let ticks: Vec<_> = (0..5).map(|_| tw.tick()).collect();
        assert!(ticks[..4].iter().all(|t| !t.done));
        assert_eq!(ticks[3].en.text, "abcd");
        assert!(ticks[4].done);
        assert_eq!(ticks[4].zh.text, "ab");
    }

    #[test]
    fn finish_shows_everything() {
        let mut tw = Typewriter::new();
        tw.tick();
        let done = tw.finish();
        assert_eq!(done.zh.text, POEM_ZH);
        assert_eq!(done.en.text, POEM_EN);
        assert!(done.done);
    }
}
