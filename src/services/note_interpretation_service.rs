use std::sync::Arc;

use tracing::debug;

use crate::models::{AdjustmentSignal, BodyArea, Equipment, IntensityHint, SignalKind};
use crate::services::inference_service::SimilarityModel;

/// One canonical phrase in the fixed vocabulary. Matching is independent per
/// entry: every entry whose similarity with the input clears its threshold
/// fires, in vocabulary order.
#[derive(Clone)]
struct VocabularyEntry {
    phrase: &'static str,
    threshold: f64,
    kind: SignalKind,
    description: &'static str,
}

/// Interprets free-text notes into structured adjustment signals by
/// similarity-matching against the fixed vocabulary. Deterministic for a
/// fixed embedder and vocabulary.
#[derive(Clone)]
pub struct NoteInterpretationService {
    embedder: Arc<dyn SimilarityModel>,
    vocabulary: Vec<VocabularyEntry>,
}

impl NoteInterpretationService {
    pub fn new(embedder: Arc<dyn SimilarityModel>) -> Self {
        Self {
            embedder,
            vocabulary: Self::load_vocabulary(),
        }
    }

    /// Convert notes into adjustment signals. Missing or blank notes yield an
    /// empty signal list, not an error.
    pub fn interpret(&self, notes: Option<&str>) -> Vec<AdjustmentSignal> {
        let text = match notes {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Vec::new(),
        };

        let mut signals = Vec::new();
        for entry in &self.vocabulary {
            let score = self.embedder.similarity(text, entry.phrase);
            if score >= entry.threshold {
                debug!(phrase = entry.phrase, score, "vocabulary entry fired");
                signals.push(AdjustmentSignal {
                    kind: entry.kind.clone(),
                    note: format!("{} (notes matched \"{}\")", entry.description, entry.phrase),
                });
            }
        }
        signals
    }

    /// Fixed vocabulary. Phrases lean on distinctive tokens so unrelated
    /// entries do not fire on shared filler words; thresholds are calibrated
    /// per entry against the hashed bag-of-words embedder.
    fn load_vocabulary() -> Vec<VocabularyEntry> {
        vec![
            VocabularyEntry {
                phrase: "knee knees kneecap",
                threshold: 0.12,
                kind: SignalKind::InjuryNote(BodyArea::Knee),
                description: "Excluding exercises that load the knee",
            },
            VocabularyEntry {
                phrase: "shoulder shoulders rotator cuff",
                threshold: 0.12,
                kind: SignalKind::InjuryNote(BodyArea::Shoulder),
                description: "Excluding exercises that load the shoulder",
            },
            VocabularyEntry {
                phrase: "lower back lumbar spine",
                threshold: 0.12,
                kind: SignalKind::InjuryNote(BodyArea::LowerBack),
                description: "Excluding exercises that load the lower back",
            },
            VocabularyEntry {
                phrase: "wrist wrists",
                threshold: 0.12,
                kind: SignalKind::InjuryNote(BodyArea::Wrist),
                description: "Excluding exercises that load the wrist",
            },
            VocabularyEntry {
                phrase: "ankle ankles",
                threshold: 0.12,
                kind: SignalKind::InjuryNote(BodyArea::Ankle),
                description: "Excluding exercises that load the ankle",
            },
            VocabularyEntry {
                phrase: "barbell barbells",
                threshold: 0.15,
                kind: SignalKind::EquipmentAvoid(Equipment::Barbell),
                description: "Avoiding barbell exercises",
            },
            VocabularyEntry {
                phrase: "machines machine gym",
                threshold: 0.15,
                kind: SignalKind::EquipmentAvoid(Equipment::Machines),
                description: "Avoiding machine exercises",
            },
            VocabularyEntry {
                phrase: "spicy chili dishes",
                threshold: 0.15,
                kind: SignalKind::CuisineAvoid("spicy".to_string()),
                description: "Avoiding spicy dishes",
            },
            VocabularyEntry {
                phrase: "dairy milk cheese lactose",
                threshold: 0.15,
                kind: SignalKind::CuisineAvoid("dairy".to_string()),
                description: "Avoiding dairy-based dishes",
            },
            VocabularyEntry {
                phrase: "fried greasy oily",
                threshold: 0.15,
                kind: SignalKind::CuisineAvoid("fried".to_string()),
                description: "Avoiding fried dishes",
            },
            VocabularyEntry {
                phrase: "nut nuts peanuts almonds",
                threshold: 0.15,
                kind: SignalKind::CuisineAvoid("nuts".to_string()),
                description: "Avoiding dishes containing nuts",
            },
            VocabularyEntry {
                phrase: "limited time mornings busy schedule",
                threshold: 0.18,
                kind: SignalKind::IntensityHint(IntensityHint::ShorterSessions),
                description: "Keeping sessions short",
            },
            VocabularyEntry {
                phrase: "gentle easy light intensity",
                threshold: 0.18,
                kind: SignalKind::IntensityHint(IntensityHint::Easier),
                description: "Keeping intensity low",
            },
        ]
    }
}
