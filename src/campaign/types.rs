use serde::Deserialize;

/// One day of the investigation, as authored in `campaign/day_NN.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Day {
    pub meta: DayMeta,
    pub narrative: Narrative,
    #[serde(rename = "puzzle")]
    pub challenge: Challenge,
    #[serde(default)]
    pub reward: Option<Reward>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DayMeta {
    pub day: u32,
    #[serde(default = "default_act")]
    pub act: u8,
    pub title: String,
    #[serde(default)]
    pub title_fr: Option<String>,
    pub kind: PuzzleKind,
}

fn default_act() -> u8 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct Narrative {
    pub en: String,
    #[serde(default)]
    pub fr: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Challenge {
    /// Canonical answer. `None` means the day is solved by an interaction
    /// signal rather than a typed answer.
    #[serde(default)]
    pub solution: Option<String>,
    pub hints: Vec<String>,
    #[serde(default)]
    pub mechanic: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Reward {
    pub name: String,
    #[serde(default)]
    pub name_fr: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// The closed set of mechanics a day can be gated by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleKind {
    VisualSearch,
    ScratchReveal,
    UvLight,
    RadioTuning,
    Assembly,
    Code,
    Cipher,
    FingerprintMatch,
    AudioAnalysis,
    NarrativeOnly,
    MetaRealWorld,
    Scanner,
    Maze,
    Flashlight,
    Decrypt,
    ColorMix,
    SuspectElimination,
    GpsPursuit,
    AimDisarm,
    DialogueBranch,
    Repair,
    FinalSynthesis,
    Ending,
}

impl PuzzleKind {
    pub const ALL: [PuzzleKind; 23] = [
        PuzzleKind::VisualSearch,
        PuzzleKind::ScratchReveal,
        PuzzleKind::UvLight,
        PuzzleKind::RadioTuning,
        PuzzleKind::Assembly,
        PuzzleKind::Code,
        PuzzleKind::Cipher,
        PuzzleKind::FingerprintMatch,
        PuzzleKind::AudioAnalysis,
        PuzzleKind::NarrativeOnly,
        PuzzleKind::MetaRealWorld,
        PuzzleKind::Scanner,
        PuzzleKind::Maze,
        PuzzleKind::Flashlight,
        PuzzleKind::Decrypt,
        PuzzleKind::ColorMix,
        PuzzleKind::SuspectElimination,
        PuzzleKind::GpsPursuit,
        PuzzleKind::AimDisarm,
        PuzzleKind::DialogueBranch,
        PuzzleKind::Repair,
        PuzzleKind::FinalSynthesis,
        PuzzleKind::Ending,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PuzzleKind::VisualSearch => "Visual Search",
            PuzzleKind::ScratchReveal => "Scratch & Reveal",
            PuzzleKind::UvLight => "UV Light",
            PuzzleKind::RadioTuning => "Radio Tuning",
            PuzzleKind::Assembly => "Assembly",
            PuzzleKind::Code => "Code Lock",
            PuzzleKind::Cipher => "Cipher",
            PuzzleKind::FingerprintMatch => "Fingerprint Match",
            PuzzleKind::AudioAnalysis => "Audio Analysis",
            PuzzleKind::NarrativeOnly => "Story",
            PuzzleKind::MetaRealWorld => "Field Work",
            PuzzleKind::Scanner => "Scanner",
            PuzzleKind::Maze => "Maze",
            PuzzleKind::Flashlight => "Flashlight",
            PuzzleKind::Decrypt => "Decrypt",
            PuzzleKind::ColorMix => "Color Mix",
            PuzzleKind::SuspectElimination => "Suspect Wall",
            PuzzleKind::GpsPursuit => "GPS Pursuit",
            PuzzleKind::AimDisarm => "Disarm",
            PuzzleKind::DialogueBranch => "Interrogation",
            PuzzleKind::Repair => "Repair",
            PuzzleKind::FinalSynthesis => "Final Door",
            PuzzleKind::Ending => "Ending",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Day {
    /// Builds a day in memory with English text only.
    pub fn new(
        day: u32,
        kind: PuzzleKind,
        solution: Option<&str>,
        hints: &[&str],
        reward: Option<&str>,
    ) -> Self {
        Day {
            meta: DayMeta {
                day,
                act: 1,
                title: format!("Day {day}"),
                title_fr: None,
                kind,
            },
            narrative: Narrative {
                en: String::new(),
                fr: None,
            },
            challenge: Challenge {
                solution: solution.map(str::to_string),
                hints: hints.iter().map(|h| h.to_string()).collect(),
                mechanic: None,
            },
            reward: reward.map(|name| Reward {
                name: name.to_string(),
                name_fr: None,
                description: None,
            }),
        }
    }

    pub fn number(&self) -> u32 {
        self.meta.day
    }

    pub fn kind(&self) -> PuzzleKind {
        self.meta.kind
    }

    pub fn solution(&self) -> Option<&str> {
        self.challenge.solution.as_deref()
    }

    pub fn hints(&self) -> &[String] {
        &self.challenge.hints
    }

    pub fn title(&self, locale: Locale) -> &str {
        match locale {
            Locale::Fr => self.meta.title_fr.as_deref().unwrap_or(&self.meta.title),
            Locale::En => &self.meta.title,
        }
    }

    pub fn narrative(&self, locale: Locale) -> &str {
        match locale {
            Locale::Fr => self.narrative.fr.as_deref().unwrap_or(&self.narrative.en),
            Locale::En => &self.narrative.en,
        }
    }

    pub fn reward_name(&self, locale: Locale) -> Option<&str> {
        self.reward.as_ref().map(|r| match locale {
            Locale::Fr => r.name_fr.as_deref().unwrap_or(&r.name),
            Locale::En => r.name.as_str(),
        })
    }
}

pub fn act_title(act: u8) -> &'static str {
    match act {
        1 => "ACT 1: THE CRIME SCENE",
        2 => "ACT 2: THE INVESTIGATION",
        _ => "ACT 3: THE PURSUIT",
    }
}
