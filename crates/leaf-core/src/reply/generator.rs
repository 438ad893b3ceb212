//! Canned reply text and latency
//!
//! There is no model behind this: replies are filled-in templates picked at
//! random, delivered after a random delay.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;

/// Models offered in the model picker
pub const MODELS: [&str; 4] = ["GPT-4", "GPT-3.5", "Claude-3", "Gemini Pro"];

pub const DEFAULT_MODEL: &str = "GPT-4";

pub fn is_known_model(name: &str) -> bool {
    MODELS.contains(&name)
}

const TEMPLATES: &[&str] = &[
    "I understand you're asking about \"{prompt}\". This is a simulated response from {model}. \
     In a real implementation, this would connect to your chosen AI model's API.",
    "## Thoughts on \"{prompt}\"\n\
     \n\
     Here's a quick take from **{model}**:\n\
     \n\
     - This is a *simulated* reply\n\
     - No network call was made\n\
     - Replies arrive after a short random delay\n\
     \n\
     > Connect a real model to get real answers.",
    "Good question! Here's how **{model}** might sketch it:\n\
     \n\
     1. Restate the problem: _{prompt}_\n\
     2. Break it into small steps\n\
     3. Try a tiny example first\n\
     \n\
     ```text\n\
     simulated output for: {prompt}\n\
     ```",
    "Thanks for asking about \"{prompt}\".\n\
     \n\
     ---\n\
     \n\
     This is a placeholder answer from {model}. See [the docs](https://example.com/leaf-notes) \
     for how a real provider would plug in.",
];

/// Fill one of the reply templates
pub fn fill_template(template: &str, prompt: &str, model: &str) -> String {
    template.replace("{prompt}", prompt).replace("{model}", model)
}

/// Builds simulated replies
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplyGenerator;

impl ReplyGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Pick a random template and fill it in
    pub fn compose_with<R: Rng + ?Sized>(&self, rng: &mut R, prompt: &str, model: &str) -> String {
        let template = TEMPLATES.choose(rng).copied().unwrap_or(TEMPLATES[0]);
        fill_template(template, prompt.trim(), model)
    }
}

/// Window the simulated latency is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyTiming {
    pub min: Duration,
    pub max: Duration,
}

impl Default for ReplyTiming {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(1000),
            max: Duration::from_millis(3000),
        }
    }
}

impl ReplyTiming {
    pub fn fixed(delay: Duration) -> Self {
        Self {
            min: delay,
            max: delay,
        }
    }

    /// Uniform delay in `[min, max]`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        let min_ms = self.min.as_millis() as u64;
        let max_ms = self.max.as_millis() as u64;
        Duration::from_millis(rng.gen_range(min_ms..=max_ms))
    }
}
